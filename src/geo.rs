use geo::Point;

/// Average bus speeds, in km/h
const SPEED_HIGH_CROWD: f64 = 17.8;
const SPEED_LOW_CROWD: f64 = 21.5;
const SPEED_MEDIUM_CROWD: f64 = 19.65;

const STATUTE_MILES_PER_DEGREE: f64 = 60.0 * 1.1515;
const KM_PER_STATUTE_MILE: f64 = 1.609344;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrowdLevel {
    High,
    Medium,
    Low,
}

impl From<&str> for CrowdLevel {
    fn from(value: &str) -> Self {
        match value {
            "crowded" | "high" => CrowdLevel::High,
            "low" => CrowdLevel::Low,
            _ => CrowdLevel::Medium,
        }
    }
}

impl CrowdLevel {
    pub fn speed_kmh(self) -> f64 {
        match self {
            CrowdLevel::High => SPEED_HIGH_CROWD,
            CrowdLevel::Medium => SPEED_MEDIUM_CROWD,
            CrowdLevel::Low => SPEED_LOW_CROWD,
        }
    }
}

/// Great circle distance in kilometres, via the spherical law of cosines.
/// Points are x = longitude, y = latitude, in degrees.
pub fn distance_km(a: Point, b: Point) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();
    let theta = (a.x() - b.x()).to_radians();

    // rounding can push this just past 1, which acos rejects
    let cos_central = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * theta.cos()).min(1.0);

    cos_central.acos().to_degrees() * STATUTE_MILES_PER_DEGREE * KM_PER_STATUTE_MILE
}

/// Minutes needed to cover `distance_km` at the average speed for `crowd_level`
pub fn eta_minutes(distance_km: f64, crowd_level: &str) -> f64 {
    distance_km / CrowdLevel::from(crowd_level).speed_kmh() * 60.0
}
