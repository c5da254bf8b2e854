use std::collections::HashMap;

use crate::uwave::entities::{Bus, BusStop};

/// Where a stop lives in the directory: (bus index, stop index)
type StopRef = (usize, usize);

/// Stop id lookup over the stops owned by the directory's buses
#[derive(Debug, Default)]
pub struct StopIndex {
    stops: HashMap<String, StopRef>,
}

impl StopIndex {
    /// Walks every bus in order. Stops shared between lines keep their first occurrence.
    pub fn build(buses: &[Bus]) -> StopIndex {
        let mut stops = HashMap::new();

        for (bus_idx, bus) in buses.iter().enumerate() {
            for (stop_idx, stop) in bus.bus_stops.iter().enumerate() {
                stops.entry(stop.id.clone()).or_insert((bus_idx, stop_idx));
            }
        }

        StopIndex { stops }
    }

    /// `buses` must be the slice the index was built from
    pub fn get<'a>(&self, buses: &'a [Bus], stop_id: &str) -> Option<&'a BusStop> {
        let &(bus_idx, stop_idx) = self.stops.get(stop_id)?;
        buses.get(bus_idx)?.bus_stops.get(stop_idx)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }
}
