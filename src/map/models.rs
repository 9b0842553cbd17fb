use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Exact-string identity of a coordinate, ordered lexicographically on
/// `(lat, lng)`. `"1.0"` and `"1.00"` are different keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationKey {
    pub lat: String,
    pub lng: String,
}

impl LocationKey {
    pub fn new(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }
}

/// One map location standing for every event that shares its key.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DisplayPoint {
    pub position: LatLng,
    pub occurrences: usize,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GroupingPolicy {
    #[default]
    Exact,
    /// Drops fractional digits past `decimals` before keying, so nearby
    /// venues collapse into one marker.
    Truncated { decimals: usize },
}

impl GroupingPolicy {
    pub fn from_decimals(decimals: Option<usize>) -> Self {
        match decimals {
            Some(decimals) => Self::Truncated { decimals },
            None => Self::Exact,
        }
    }

    pub fn apply(&self, raw: &str) -> String {
        match self {
            Self::Exact => raw.to_string(),
            Self::Truncated { decimals } => match raw.split_once('.') {
                Some((whole, _)) if *decimals == 0 => whole.to_string(),
                Some((whole, fraction)) => {
                    let kept: String = fraction.chars().take(*decimals).collect();
                    format!("{whole}.{kept}")
                }
                None => raw.to_string(),
            },
        }
    }
}
