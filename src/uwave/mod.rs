pub mod client;
pub mod entities;
pub mod error;

use entities::{BusLines, BusPositions};
use error::UwaveResult;

/// Upstream feed of bus lines and live bus positions.
///
/// Implemented by [`client::UwaveClient`] over HTTP; tests substitute an in-memory feed.
pub trait TransitSource {
    /// Every bus line with its ordered stops
    async fn get_bus_lines(&self) -> UwaveResult<BusLines>;

    /// Current positions of the buses running on one line
    async fn get_bus_positions(&self, bus_line_id: &str) -> UwaveResult<BusPositions>;
}
