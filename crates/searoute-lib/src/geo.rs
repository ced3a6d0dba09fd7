//! Geographic primitives shared by every routing stage.
//!
//! Distances are great-circle nautical miles computed with the haversine
//! formula. Land tests work in planar degree space (see [`crate::land`]);
//! the conversion between the two uses the fixed approximation
//! `1° ≈ 60 nm`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Nautical miles per degree of arc.
pub const NM_PER_DEGREE: f64 = 60.0;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a validated coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Reject non-finite values and values outside [-90, 90] / [-180, 180].
    pub fn validate(&self) -> Result<()> {
        let valid = self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);
        if valid {
            Ok(())
        } else {
            Err(Error::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Great-circle distance to `other` in nautical miles.
    pub fn distance_nm(&self, other: &Coordinate) -> f64 {
        haversine_nm(self, other)
    }

    /// Initial great-circle bearing towards `other`, in degrees clockwise from north.
    pub fn initial_bearing(&self, other: &Coordinate) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let dlambda = (other.longitude - self.longitude).to_radians();
        let y = dlambda.sin() * phi2.cos();
        let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }

    /// Cartesian position on the unit sphere.
    pub fn to_unit_vector(&self) -> [f64; 3] {
        let phi = self.latitude.to_radians();
        let lambda = self.longitude.to_radians();
        [phi.cos() * lambda.cos(), phi.cos() * lambda.sin(), phi.sin()]
    }

    /// Whether two coordinates denote the same position within `tolerance` degrees.
    pub fn approx_eq(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance
            && (self.longitude - other.longitude).abs() <= tolerance
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two coordinates in nautical miles.
pub fn haversine_nm(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_NM * h.sqrt().min(1.0).asin()
}

/// Convert a distance in nautical miles to planar degrees.
pub fn nm_to_degrees(nm: f64) -> f64 {
    nm / NM_PER_DEGREE
}

/// Straight-line distance through the unit sphere for a great-circle distance.
pub(crate) fn chord_for_nm(nm: f64) -> f64 {
    let angle = (nm / EARTH_RADIUS_NM).min(std::f64::consts::PI);
    2.0 * (angle / 2.0).sin()
}

/// Total great-circle length of a coordinate chain.
pub fn path_length_nm(points: &[Coordinate]) -> f64 {
    points.windows(2).map(|pair| haversine_nm(&pair[0], &pair[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_known_distance() {
        // One degree of latitude along a meridian.
        let a = Coordinate::from((0.0, 0.0));
        let b = Coordinate::from((1.0, 0.0));
        let expected = EARTH_RADIUS_NM * 1.0_f64.to_radians();
        assert!((haversine_nm(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn haversine_same_point_is_zero() {
        let a = Coordinate::from((51.9, 4.4));
        assert_eq!(haversine_nm(&a, &a), 0.0);
    }

    #[test]
    fn haversine_handles_antipodes() {
        let a = Coordinate::from((0.0, 0.0));
        let b = Coordinate::from((0.0, 180.0));
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_NM;
        assert!((haversine_nm(&a, &b) - half_circumference).abs() < 1e-6);
    }

    #[test]
    fn coordinate_validation_rejects_out_of_range() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(matches!(
            Coordinate::new(91.0, 0.0),
            Err(Error::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn bearing_points_east_along_equator() {
        let a = Coordinate::from((0.0, 0.0));
        let b = Coordinate::from((0.0, 10.0));
        assert!((a.initial_bearing(&b) - 90.0).abs() < 1e-9);
        assert!((b.initial_bearing(&a) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn chord_matches_unit_vectors() {
        let a = Coordinate::from((10.0, 20.0));
        let b = Coordinate::from((-5.0, 35.0));
        let va = a.to_unit_vector();
        let vb = b.to_unit_vector();
        let chord = ((va[0] - vb[0]).powi(2) + (va[1] - vb[1]).powi(2) + (va[2] - vb[2]).powi(2))
            .sqrt();
        assert!((chord_for_nm(haversine_nm(&a, &b)) - chord).abs() < 1e-9);
    }
}
