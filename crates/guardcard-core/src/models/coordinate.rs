//! Geographic coordinate in WGS 84 degrees.

use crate::error::{GuardCardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Downtown Los Angeles, used as the default map region
    pub fn los_angeles() -> Self {
        Self::new(34.0522, -118.2437)
    }

    /// Check that both components are finite and within WGS 84 bounds
    pub fn validate(&self) -> Result<()> {
        check_component("lat", self.lat, 90.0)?;
        check_component("lng", self.lng, 180.0)?;
        Ok(())
    }

    /// Returns a validated copy of this coordinate
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

fn check_component(field: &'static str, value: f64, limit: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(GuardCardError::InvalidCoordinate {
            field,
            value,
            reason: "must be a finite number".to_string(),
        });
    }
    if value < -limit || value > limit {
        return Err(GuardCardError::InvalidCoordinate {
            field,
            value,
            reason: format!("must be within [-{limit}, {limit}]"),
        });
    }
    Ok(())
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`, the format used by environment variables and config files
impl FromStr for Coordinate {
    type Err = GuardCardError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| GuardCardError::ConfigInvalid {
            key: "coordinate".to_string(),
            reason,
        };

        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| invalid(format!("expected 'lat,lng', got '{}'", s)))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid latitude '{}'", lat.trim())))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid longitude '{}'", lng.trim())))?;

        Coordinate::new(lat, lng).validated()
    }
}

impl From<Coordinate> for geo::Point {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

impl From<geo::Point> for Coordinate {
    fn from(p: geo::Point) -> Self {
        Coordinate::new(p.y(), p.x())
    }
}
