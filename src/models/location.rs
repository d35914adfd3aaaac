use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Canonical latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting NaN and infinite components
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(AppError::InvalidInput(
                "Invalid latitude or longitude values".to_string(),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Geo-point encodings accepted in the `location` document field
///
/// Producers write locations in whichever shape their client library emits.
/// All of them are normalized into a [`Coordinate`] at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredLocation {
    /// Serialized document-store GeoPoint (`{"_latitude": .., "_longitude": ..}`)
    GeoPoint {
        #[serde(rename = "_latitude")]
        latitude: f64,
        #[serde(rename = "_longitude")]
        longitude: f64,
    },
    /// Plain object (`{"latitude": .., "longitude": ..}`)
    LatLng { latitude: f64, longitude: f64 },
    /// GeoJSON point; note the longitude-first ordering
    GeoJson {
        #[serde(rename = "type")]
        kind: GeoJsonKind,
        coordinates: [f64; 2],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeoJsonKind {
    Point,
}

/// Outcome of normalizing a stored location
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationResolution {
    Resolved(Coordinate),
    Unresolved,
}

impl StoredLocation {
    /// Parses a raw JSON document field. Unknown shapes yield `None`.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    pub fn resolve(&self) -> LocationResolution {
        let coordinate = match *self {
            StoredLocation::GeoPoint {
                latitude,
                longitude,
            }
            | StoredLocation::LatLng {
                latitude,
                longitude,
            } => Coordinate {
                latitude,
                longitude,
            },
            StoredLocation::GeoJson {
                coordinates: [longitude, latitude],
                ..
            } => Coordinate {
                latitude,
                longitude,
            },
        };

        if coordinate.is_finite() {
            LocationResolution::Resolved(coordinate)
        } else {
            LocationResolution::Unresolved
        }
    }
}

/// Resolves an optional stored location, treating absence as unresolved
pub fn resolve_location(location: Option<&StoredLocation>) -> LocationResolution {
    location
        .map(StoredLocation::resolve)
        .unwrap_or(LocationResolution::Unresolved)
}
