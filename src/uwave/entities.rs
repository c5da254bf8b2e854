use geo::Point;
use serde::{Deserialize, Serialize};

/// Envelope used by every uWave endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UwaveResponse<T> {
    pub status: i32,
    pub payload: Vec<T>,
}

/// All bus lines, as returned by `/busLines`
pub type BusLines = UwaveResponse<Bus>;

/// Live vehicles on one line, as returned by `/busPositions/{id}`
pub type BusPositions = UwaveResponse<BusLocation>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BusStop {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl BusStop {
    pub fn point(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bus {
    pub id: String,
    pub short_name: String,
    pub full_name: String,
    pub origin: String,
    #[serde(default)]
    pub path: Vec<[f64; 2]>,
    #[serde(default)]
    pub bus_stops: Vec<BusStop>,
}

impl Bus {
    pub fn stops_at(&self, stop_id: &str) -> bool {
        self.bus_stops.iter().any(|s| s.id == stop_id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusLocation {
    pub bearing: f64,
    // open ended, see geo::CrowdLevel
    pub crowd_level: String,
    pub lat: f64,
    pub lng: f64,
    pub vehicle_plate: String,
}

impl BusLocation {
    pub fn point(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}
