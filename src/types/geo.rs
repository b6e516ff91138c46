use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A latitude-longitude pair.
///
/// Constructed in the conventional `(lat, lon)` order; the coordinate-list
/// endpoints expect the reversed `lon,lat` order on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Wire form used by the distance, datum-convert, and altitude
    /// endpoints: `lon,lat`.
    pub(crate) fn to_wire(&self) -> String {
        format!("{},{}", self.lon, self.lat)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Geodetic datum for coordinates sent to or returned by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datum {
    /// World geodetic system (WGS84). This is the service default.
    #[default]
    Wgs,
    /// Tokyo datum, the legacy Japanese geodetic system.
    Tky,
}

impl std::fmt::Display for Datum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Datum::Wgs => "wgs",
                Datum::Tky => "tky",
            }
        )
    }
}

impl FromStr for Datum {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wgs" => Ok(Datum::Wgs),
            "tky" => Ok(Datum::Tky),
            _ => Err(()),
        }
    }
}
