// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion outlines
//!
//! A [`Profile2D`] is the closed outline of a footprint in nalgebra
//! coordinates, wound counter-clockwise. Plan footprints never carry
//! courtyards, so profiles have no holes.

use crate::error::{Error, Result};
use nalgebra::Point2;

/// Counter-clockwise closed outline
#[derive(Debug, Clone, PartialEq)]
pub struct Profile2D {
    outline: Vec<Point2<f64>>,
}

impl Profile2D {
    pub fn new(outline: Vec<Point2<f64>>) -> Self {
        Self { outline }
    }

    pub fn outline(&self) -> &[Point2<f64>] {
        &self.outline
    }

    pub fn len(&self) -> usize {
        self.outline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Boundary edges including the closing edge, skipping zero-length ones
    pub fn edges(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        let n = self.outline.len();
        (0..n)
            .map(move |i| (self.outline[i], self.outline[(i + 1) % n]))
            .filter(|(a, b)| (b - a).norm_squared() > 1e-20)
    }

    /// Triangulate the outline, returning index triples into [`outline`](Self::outline)
    pub fn triangulate(&self) -> Result<Vec<[usize; 3]>> {
        if self.outline.len() < 3 {
            return Err(Error::InvalidProfile {
                vertices: self.outline.len(),
                reason: "an outline needs at least three vertices".to_string(),
            });
        }

        let coords: Vec<f64> = self.outline.iter().flat_map(|p| [p.x, p.y]).collect();
        let flat = earcutr::earcut(&coords, &[], 2).map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

        let triangles: Vec<[usize; 3]> = flat.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect();
        if triangles.is_empty() {
            return Err(Error::TriangulationError(format!(
                "{} vertices enclose no area",
                self.outline.len()
            )));
        }
        Ok(triangles)
    }
}
