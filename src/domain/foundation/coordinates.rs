//! Geographic coordinates value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// New York City, the fallback when a request carries no location.
    pub const NEW_YORK: Coordinates = Coordinates {
        lat: 40.7128,
        lng: -74.006,
    };

    /// Creates coordinates, rejecting values outside the valid ranges.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, ValidationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::out_of_range("lat", -90.0, 90.0, lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(ValidationError::out_of_range("lng", -180.0, 180.0, lng));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_coordinates() {
        let c = Coordinates::try_new(40.7128, -74.006).unwrap();
        assert_eq!(c.lat(), 40.7128);
        assert_eq!(c.lng(), -74.006);
        assert_eq!(c.to_string(), "40.7128,-74.006");
    }

    #[test]
    fn rejects_latitude_out_of_range() {
        assert!(matches!(
            Coordinates::try_new(91.0, 0.0),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_longitude_out_of_range() {
        assert!(Coordinates::try_new(0.0, -180.5).is_err());
    }

    #[test]
    fn rejects_nan() {
        assert!(Coordinates::try_new(f64::NAN, 0.0).is_err());
    }
}
