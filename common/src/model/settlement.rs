use serde::{Deserialize, Serialize};

/// A present-day settlement as listed in the lookup index.
///
/// Coordinates are optional because the source registry does not geocode
/// every entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub settlement_type: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Settlement {
    /// Returns `(lat, lon)` only when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}
