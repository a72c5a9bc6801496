// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat triangle buffers attached to extruded volumes.
//!
//! Buffers are laid out the way renderers consume them: three `f32` per
//! position and normal, three `u32` per triangle.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions
            .extend([position.x, position.y, position.z].map(|c| c as f32));
        self.normals.extend([normal.x, normal.y, normal.z].map(|c| c as f32));
        index
    }

    pub fn push_triangle(&mut self, triangle: [u32; 3]) {
        self.indices.extend(triangle);
    }

    /// Two triangles over four vertices given in winding order
    pub fn push_quad(&mut self, corners: [u32; 4]) {
        let [a, b, c, d] = corners;
        self.push_triangle([a, b, c]);
        self.push_triangle([a, c, d]);
    }

    /// Shift every vertex by `offset`; normals are unaffected
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        let delta = [offset.x as f32, offset.y as f32, offset.z as f32];
        for vertex in self.positions.chunks_exact_mut(3) {
            for (c, d) in vertex.iter_mut().zip(delta) {
                *c += d;
            }
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Component-wise extent of all vertices, origin for an empty mesh
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let mut vertices = self.positions.chunks_exact(3).map(|v| Point3::new(v[0], v[1], v[2]));
        let Some(first) = vertices.next() else {
            return (Point3::origin(), Point3::origin());
        };
        vertices.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_tile() -> Mesh {
        let mut mesh = Mesh::new();
        let up = Vector3::z();
        let corners = [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]
            .map(|(x, y)| mesh.push_vertex(Point3::new(x, y, 0.0), up));
        mesh.push_quad(corners);
        mesh
    }

    #[test]
    fn test_quad_counts() {
        let mesh = floor_tile();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert!(Mesh::new().is_empty());
    }

    #[test]
    fn test_translate_moves_bounds() {
        let mut mesh = floor_tile();
        mesh.translate(&Vector3::new(5.0, -1.0, 3.0));
        let (min, max) = mesh.bounds();
        assert_eq!(min, Point3::new(5.0, -1.0, 3.0));
        assert_eq!(max, Point3::new(7.0, 0.0, 3.0));
        assert_eq!(&mesh.normals[..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(Mesh::new().bounds(), (Point3::origin(), Point3::origin()));
    }
}
