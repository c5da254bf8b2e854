use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use url::Url;

use crate::uwave::entities::{Bus, BusLines, BusLocation, BusPositions, BusStop, UwaveResponse};
use crate::uwave::error::{UwaveError, UwaveResult};
use crate::uwave::TransitSource;

pub fn init() {
    dotenvy::from_filename(".dev.vars").ok();
    env_logger::try_init().ok();
}

fn stop(id: &str, lat: f64, lng: f64, name: &str) -> BusStop {
    BusStop {
        id: id.to_string(),
        lat,
        lng,
        name: name.to_string(),
    }
}

fn bus(id: &str, short_name: &str, full_name: &str, stops: Vec<BusStop>) -> Bus {
    Bus {
        id: id.to_string(),
        short_name: short_name.to_string(),
        full_name: full_name.to_string(),
        origin: stops[0].name.clone(),
        path: stops.iter().map(|s| [s.lat, s.lng]).collect(),
        bus_stops: stops,
    }
}

pub fn location(lat: f64, lng: f64, crowd_level: &str, vehicle_plate: &str) -> BusLocation {
    BusLocation {
        bearing: 90.0,
        crowd_level: crowd_level.to_string(),
        lat,
        lng,
        vehicle_plate: vehicle_plate.to_string(),
    }
}

/// Three lines; 383009 is shared by the first two
pub fn fixture_buses() -> Vec<Bus> {
    vec![
        bus(
            "44479",
            "CL-R",
            "Campus Loop Red",
            vec![
                stop("383009", 1.3, 103.78, "Pioneer MRT"),
                stop("383010", 1.3483, 103.6831, "Hall 7"),
            ],
        ),
        bus(
            "44480",
            "CR",
            "Campus Rider Green",
            vec![
                stop("383009", 1.3, 103.78, "Pioneer MRT"),
                stop("383011", 1.3462, 103.6795, "Nanyang Crescent"),
            ],
        ),
        bus(
            "44481",
            "CWR",
            "Campus Weekend Rider Brown",
            vec![stop("383012", 1.3407, 103.6894, "Jurong West St 91")],
        ),
    ]
}

/// In-memory feed which counts how often it is asked for bus lines
pub struct FakeSource {
    buses: Vec<Bus>,
    positions: HashMap<String, Vec<BusLocation>>,
    fail_bus_lines: bool,
    bus_lines_calls: AtomicUsize,
    bus_positions_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> FakeSource {
        let positions = HashMap::from([
            (
                "44479".to_string(),
                vec![
                    location(1.3, 103.78, "low", "PC1001A"),
                    location(1.3483, 103.6831, "crowded", "PC1002B"),
                    location(1.3462, 103.6795, "medium", "PC1003C"),
                ],
            ),
            ("44480".to_string(), vec![]),
        ]);

        FakeSource {
            buses: fixture_buses(),
            positions,
            fail_bus_lines: false,
            bus_lines_calls: AtomicUsize::new(0),
            bus_positions_calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> FakeSource {
        FakeSource {
            buses: vec![],
            ..FakeSource::new()
        }
    }

    pub fn failing_bus_lines(self) -> FakeSource {
        FakeSource {
            fail_bus_lines: true,
            ..self
        }
    }

    pub fn with_positions(mut self, bus_line_id: &str, locations: Vec<BusLocation>) -> FakeSource {
        self.positions.insert(bus_line_id.to_string(), locations);
        self
    }

    pub fn bus_lines_calls(&self) -> usize {
        self.bus_lines_calls.load(Ordering::SeqCst)
    }

    pub fn bus_positions_calls(&self) -> usize {
        self.bus_positions_calls.load(Ordering::SeqCst)
    }
}

impl TransitSource for FakeSource {
    async fn get_bus_lines(&self) -> UwaveResult<BusLines> {
        self.bus_lines_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_bus_lines {
            let url = Url::parse("http://uwave.test/busLines").unwrap();
            return Err(UwaveError::Status(503, url));
        }

        Ok(UwaveResponse {
            status: 200,
            payload: self.buses.clone(),
        })
    }

    async fn get_bus_positions(&self, bus_line_id: &str) -> UwaveResult<BusPositions> {
        self.bus_positions_calls.fetch_add(1, Ordering::SeqCst);

        Ok(UwaveResponse {
            status: 200,
            payload: self.positions.get(bus_line_id).cloned().unwrap_or_default(),
        })
    }
}
