//! Address geocoding.
//!
//! The `Geocoder` trait is the seam for a real geocoding service. The only
//! implementation today is [`StubGeocoder`], which resolves every non-blank
//! address to a fixed point.

use serde::{Deserialize, Serialize};

use crate::data_sources::BoxFuture;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Downtown San Diego.
pub const STUB_LOCATION: Coordinates = Coordinates {
    latitude: 32.715736,
    longitude: -117.161087,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("could not geocode {address:?}: {reason}")]
pub struct GeocodeError {
    pub address: String,
    pub reason: String,
}

pub trait Geocoder: Send + Sync {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinates, GeocodeError>>;
}

#[derive(Debug, Clone)]
pub struct StubGeocoder {
    location: Coordinates,
}

impl StubGeocoder {
    pub fn new(location: Coordinates) -> Self {
        Self { location }
    }
}

impl Default for StubGeocoder {
    fn default() -> Self {
        Self::new(STUB_LOCATION)
    }
}

impl Geocoder for StubGeocoder {
    fn geocode<'a>(&'a self, address: &'a str) -> BoxFuture<'a, Result<Coordinates, GeocodeError>> {
        Box::pin(async move {
            if address.trim().is_empty() {
                return Err(GeocodeError {
                    address: address.to_string(),
                    reason: "address is blank".to_string(),
                });
            }
            Ok(self.location)
        })
    }
}
