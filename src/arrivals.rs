use crate::directory::RouteDirectory;
use crate::error::EtaResult;
use crate::geo::{distance_km, eta_minutes};
use crate::uwave::TransitSource;

/// Reported in place of estimates when the bus does not call at the stop
pub const NOT_SERVED: f64 = -1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum StopArrivals {
    /// The bus line does not stop here
    NotServed,
    /// Minutes until each running bus reaches the stop, in feed order.
    /// Empty when no buses are running.
    Estimates(Vec<f64>),
}

impl StopArrivals {
    pub fn into_minutes(self) -> Vec<f64> {
        match self {
            StopArrivals::NotServed => vec![NOT_SERVED],
            StopArrivals::Estimates(minutes) => minutes,
        }
    }
}

/// Estimates how long each bus currently running on `bus_line_id` will take to reach `stop_id`.
///
/// Distance is as the crow flies, speed depends on how crowded the bus is.
pub async fn estimate_arrivals(
    source: &impl TransitSource,
    directory: &RouteDirectory,
    stop_id: &str,
    bus_line_id: &str,
) -> EtaResult<StopArrivals> {
    let loaded = directory.ensure_loaded(source).await?;

    // an unknown stop or line can't be served either
    let stop = loaded.stop(stop_id).filter(|_| {
        loaded
            .find_bus(bus_line_id)
            .is_some_and(|bus| bus.stops_at(stop_id))
    });
    let Some(stop) = stop else {
        log::debug!("Bus {} does not stop at {}", bus_line_id, stop_id);
        return Ok(StopArrivals::NotServed);
    };

    let positions = source.get_bus_positions(bus_line_id).await?;
    log::debug!(
        "{} buses running on {} (status {})",
        positions.payload.len(),
        bus_line_id,
        positions.status
    );

    let minutes = positions
        .payload
        .iter()
        .map(|location| {
            let distance = distance_km(stop.point(), location.point());
            eta_minutes(distance, &location.crowd_level)
        })
        .collect();

    Ok(StopArrivals::Estimates(minutes))
}
