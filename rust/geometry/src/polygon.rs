// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed plan polygons (site outlines, department and program footprints)

use crate::bounds::BoundingBox2D;
use crate::point::Point2D;
use crate::profile::Profile2D;
use serde::{Deserialize, Serialize};

/// Closed polygon in plan. The closing edge is implicit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Polygon2D {
    pub points: Vec<Point2D>,
}

impl Polygon2D {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle starting at `origin`, listed
    /// origin, +x, +x+y, +y.
    pub fn rectangle(origin: Point2D, width: f64, depth: f64) -> Self {
        Self::new(vec![
            origin,
            origin.offset(width, 0.0),
            origin.offset(width, depth),
            origin.offset(0.0, depth),
        ])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than 3 vertices or zero area
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || self.area() < 1e-9
    }

    /// Shoelace signed area (positive = counter-clockwise)
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.points[i].x * self.points[j].y;
            area -= self.points[j].x * self.points[i].y;
        }

        area / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn bounds(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&self.points)
    }

    /// Area centroid; falls back to the vertex mean for degenerate polygons
    pub fn centroid(&self) -> Option<Point2D> {
        if self.points.is_empty() {
            return None;
        }

        let signed = self.signed_area();
        if signed.abs() < 1e-12 {
            let n = self.points.len() as f64;
            let (sx, sy) = self
                .points
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
            return Some(Point2D::new(sx / n, sy / n));
        }

        let n = self.points.len();
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            let p = &self.points[i];
            let q = &self.points[j];
            let cross = p.x * q.y - q.x * p.y;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        let factor = 1.0 / (6.0 * signed);
        Some(Point2D::new(cx * factor, cy * factor))
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Polygon2D {
        Polygon2D::new(self.points.iter().map(|p| p.offset(dx, dy)).collect())
    }

    /// Convert to an extrusion profile with counter-clockwise winding
    pub fn to_profile(&self) -> Profile2D {
        let mut outer: Vec<_> = self.points.iter().map(Point2D::to_nalgebra).collect();
        if self.signed_area() < 0.0 {
            outer.reverse();
        }
        Profile2D::new(outer)
    }
}
