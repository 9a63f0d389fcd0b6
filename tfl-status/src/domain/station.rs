//! Station and coordinate types.

use std::fmt;

use serde::Serialize;

/// Error returned when constructing an invalid station.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

/// Suffixes the API appends to stop point names.
const NAME_SUFFIXES: &[&str] = &[
    " underground station",
    " dlr station",
    " rail station",
    " tram stop",
    " station",
];

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Whether this is the (0, 0) placeholder the API uses for a missing position.
    pub fn is_placeholder(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// A resolved station.
///
/// Stations are only produced by the resolver and are immutable once built.
/// `naptan` is set when the search returned a hub whose underground child
/// stop is needed for per-stop endpoints (arrivals, crowding).
///
/// # Examples
///
/// ```
/// use tfl_status::domain::Station;
///
/// let station = Station::new("940GZZLUOXC", "Oxford Circus Underground Station", 51.515, -0.1415).unwrap();
/// assert_eq!(station.short_name(), "Oxford Circus");
/// assert_eq!(station.stop_id(), "940GZZLUOXC");
///
/// assert!(Station::new("", "Nowhere", 0.0, 0.0).is_err());
/// assert!(Station::new("X", "Nowhere", 91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    id: String,
    name: String,
    lat: f64,
    lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    naptan: Option<String>,
}

impl Station {
    /// Create a station, validating the identifier and position.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Result<Self, InvalidStation> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(InvalidStation {
                reason: "id must not be empty",
            });
        }

        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidStation {
                reason: "latitude out of range",
            });
        }

        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidStation {
                reason: "longitude out of range",
            });
        }

        Ok(Self {
            id,
            name: name.into(),
            lat,
            lon,
            naptan: None,
        })
    }

    /// Attach the underground stop id for a hub station.
    pub fn with_naptan(mut self, naptan: impl Into<String>) -> Self {
        self.naptan = Some(naptan.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn naptan(&self) -> Option<&str> {
        self.naptan.as_deref()
    }

    /// The id to use for per-stop endpoints: the naptan child if known.
    pub fn stop_id(&self) -> &str {
        self.naptan.as_deref().unwrap_or(&self.id)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lon: self.lon,
        }
    }

    /// The name without the API's "Underground Station" style suffix.
    pub fn short_name(&self) -> &str {
        strip_suffix(&self.name)
    }
}

/// Strip a trailing station-type suffix, ignoring case.
pub fn strip_suffix(name: &str) -> &str {
    let lower = name.to_lowercase();
    for suffix in NAME_SUFFIXES {
        // Lower-casing can change byte lengths for non-ASCII names.
        if lower.len() == name.len() && lower.ends_with(suffix) && lower.len() > suffix.len() {
            return &name[..name.len() - suffix.len()];
        }
    }
    name
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
