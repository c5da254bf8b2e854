mod index;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::uwave::entities::{Bus, BusLines, BusStop};
use crate::uwave::error::UwaveResult;
use crate::uwave::TransitSource;

use self::index::StopIndex;

/// A complete snapshot of the bus lines feed, with its stop index
#[derive(Debug)]
pub struct Directory {
    status: i32,
    buses: Vec<Bus>,
    stop_index: StopIndex,
}

impl Directory {
    fn new(lines: BusLines) -> Directory {
        let stop_index = StopIndex::build(&lines.payload);
        Directory {
            status: lines.status,
            buses: lines.payload,
            stop_index,
        }
    }

    pub fn find_bus(&self, bus_id: &str) -> Option<&Bus> {
        self.buses.iter().find(|b| b.id == bus_id)
    }

    /// Buses which stop at `stop_id`, in feed order
    pub fn buses_serving_stop(&self, stop_id: &str) -> Vec<&Bus> {
        self.buses.iter().filter(|b| b.stops_at(stop_id)).collect()
    }

    pub fn stop(&self, stop_id: &str) -> Option<&BusStop> {
        self.stop_index.get(&self.buses, stop_id)
    }
}

/// Lazily loaded, never refreshed cache of every bus line.
///
/// The first call that needs the directory fetches it; later calls reuse it for the
/// life of the process. A failed or empty fetch leaves the cache empty so the next
/// call tries again.
#[derive(Default)]
pub struct RouteDirectory {
    loaded: Mutex<Option<Arc<Directory>>>,
}

impl RouteDirectory {
    pub fn new() -> RouteDirectory {
        RouteDirectory::default()
    }

    pub async fn ensure_loaded(&self, source: &impl TransitSource) -> UwaveResult<Arc<Directory>> {
        // held across the fetch so concurrent callers wait for one load
        let mut loaded = self.loaded.lock().await;

        if let Some(directory) = loaded.as_ref() {
            return Ok(directory.clone());
        }

        log::info!("Loading bus lines");
        let directory = Arc::new(Directory::new(source.get_bus_lines().await?));
        log::info!(
            "Loaded {} bus lines with {} stops (status {})",
            directory.buses.len(),
            directory.stop_index.len(),
            directory.status
        );

        if directory.buses.is_empty() {
            log::warn!("Bus lines feed is empty, not caching");
        } else {
            *loaded = Some(directory.clone());
        }

        Ok(directory)
    }

    pub async fn find_route(
        &self,
        source: &impl TransitSource,
        bus_id: &str,
    ) -> UwaveResult<Option<Bus>> {
        let directory = self.ensure_loaded(source).await?;
        Ok(directory.find_bus(bus_id).cloned())
    }

    pub async fn find_buses_serving_stop(
        &self,
        source: &impl TransitSource,
        stop_id: &str,
    ) -> UwaveResult<Vec<Bus>> {
        let directory = self.ensure_loaded(source).await?;
        Ok(directory
            .buses_serving_stop(stop_id)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn resolve_stop(
        &self,
        source: &impl TransitSource,
        stop_id: &str,
    ) -> UwaveResult<Option<BusStop>> {
        let directory = self.ensure_loaded(source).await?;
        Ok(directory.stop(stop_id).cloned())
    }
}
