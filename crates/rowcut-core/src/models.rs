//! Canonical value types shared across the rowcut crates.

use geo::Point;
use serde::{Deserialize, Serialize};

/// Coordinate Reference System identified by EPSG code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crs {
    pub epsg: u32,
    pub name: String,
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl Crs {
    pub fn new(epsg: u32, name: impl Into<String>) -> Self {
        Self { epsg, name: name.into() }
    }

    /// Any EPSG code, named by its authority string
    pub fn epsg(code: u32) -> Self {
        Self::new(code, format!("EPSG:{}", code))
    }

    /// WGS 84 (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::new(4326, "WGS 84")
    }

    /// NAD83 / New York Long Island ftUS (EPSG:2263), the default target for
    /// NYC street right-of-way datasets
    pub fn ny_long_island_ft() -> Self {
        Self::new(2263, "NAD83 / New York Long Island (ftUS)")
    }
}

/// Unit vector approximating the local direction of travel along an axis.
///
/// Always has magnitude 1; a zero or non-finite displacement normalizes to the
/// +x direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tangent {
    dx: f64,
    dy: f64,
}

impl Tangent {
    pub fn from_displacement(dx: f64, dy: f64) -> Self {
        let norm = (dx * dx + dy * dy).sqrt();
        if norm > 0.0 && norm.is_finite() {
            Self { dx: dx / norm, dy: dy / norm }
        } else {
            Self { dx: 1.0, dy: 0.0 }
        }
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Unit normal, the tangent rotated 90° counter-clockwise
    pub fn normal(&self) -> (f64, f64) {
        (-self.dy, self.dx)
    }
}

/// A point sampled along an axis, with its arc-length position `s` and the
/// unit tangent estimated there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub point: Point<f64>,
    pub s: f64,
    pub tangent: Tangent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tangent_is_unit_length() {
        let t = Tangent::from_displacement(3.0, 4.0);
        let magnitude = (t.dx() * t.dx() + t.dy() * t.dy()).sqrt();
        assert!((magnitude - 1.0).abs() < 1e-12);
        assert!((t.dx() - 0.6).abs() < 1e-12);
        assert!((t.dy() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_zero_displacement_falls_back_to_x_axis() {
        let t = Tangent::from_displacement(0.0, 0.0);
        assert_eq!(t.dx(), 1.0);
        assert_eq!(t.dy(), 0.0);
    }

    #[test]
    fn test_non_finite_displacement_falls_back_to_x_axis() {
        let t = Tangent::from_displacement(f64::NAN, 1.0);
        assert_eq!(t.dx(), 1.0);
        assert_eq!(t.dy(), 0.0);
    }

    #[test]
    fn test_normal_is_perpendicular() {
        let t = Tangent::from_displacement(1.0, 0.0);
        let (nx, ny) = t.normal();
        assert_eq!((nx, ny), (0.0, 1.0));

        let t = Tangent::from_displacement(1.0, 1.0);
        let (nx, ny) = t.normal();
        let dot = t.dx() * nx + t.dy() * ny;
        assert!(dot.abs() < 1e-12);
    }

    #[test]
    fn test_crs_helpers() {
        assert_eq!(Crs::wgs84().epsg, 4326);
        assert_eq!(Crs::ny_long_island_ft().epsg, 2263);
        assert_eq!(Crs::epsg(3857).name, "EPSG:3857");
        assert_eq!(Crs::default(), Crs::wgs84());
    }
}
