// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable points used across design documents and layouts

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// A 2D point in plan (meters)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point2D {
        Point2D::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A 3D point (meters, z up)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Drop the z coordinate
    pub fn plan(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Point3D {
        Point3D::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn distance_to(&self, other: &Point3D) -> f64 {
        (other.to_nalgebra() - self.to_nalgebra()).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);

        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(a.midpoint(&b), Point2D::new(1.5, 2.0));
    }

    #[test]
    fn test_point3d_plan_projection() {
        let p = Point3D::new(1.0, 2.0, 3.5);
        assert_eq!(p.plan(), Point2D::new(1.0, 2.0));
        assert_eq!(p.offset(1.0, 0.0, -3.5), Point3D::new(2.0, 2.0, 0.0));
        assert!((Point3D::origin().distance_to(&Point3D::new(0.0, 3.0, 4.0)) - 5.0).abs() < 1e-12);
    }
}
