// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertical extrusion of footprint outlines into closed triangle meshes.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::Profile2D;
use nalgebra::{Point2, Point3, Vector3};

/// Extrude `profile` from `base_elevation` up by `height`.
///
/// The mesh has a downward-facing floor, an upward-facing roof and one
/// outward-facing quad per boundary edge. Each face gets its own vertices so
/// normals stay flat.
pub fn extrude_profile(profile: &Profile2D, base_elevation: f64, height: f64) -> Result<Mesh> {
    if !(height.is_finite() && height > 0.0) {
        return Err(Error::InvalidExtrusion(height));
    }
    let triangles = profile.triangulate()?;

    let mut mesh = Mesh::new();
    let lift = |p: &Point2<f64>, z: f64| Point3::new(p.x, p.y, z);

    for (z, normal) in [(0.0, -Vector3::<f64>::z()), (height, Vector3::z())] {
        let first = mesh.vertex_count() as u32;
        for p in profile.outline() {
            mesh.push_vertex(lift(p, z), normal);
        }
        for &[a, b, c] in &triangles {
            let [a, b, c] = [a, b, c].map(|i| first + i as u32);
            // Floor is seen from below
            if normal.z < 0.0 {
                mesh.push_triangle([a, c, b]);
            } else {
                mesh.push_triangle([a, b, c]);
            }
        }
    }

    for (a, b) in profile.edges() {
        let along = b - a;
        let outward = Vector3::new(along.y, -along.x, 0.0).normalize();
        let corners = [lift(&a, 0.0), lift(&b, 0.0), lift(&b, height), lift(&a, height)]
            .map(|p| mesh.push_vertex(p, outward));
        mesh.push_quad(corners);
    }

    if mesh.is_empty() {
        return Err(Error::EmptyMesh {
            vertices: profile.len(),
        });
    }

    mesh.translate(&Vector3::new(0.0, 0.0, base_elevation));
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slab(width: f64, depth: f64) -> Profile2D {
        Profile2D::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(width, 0.0),
            Point2::new(width, depth),
            Point2::new(0.0, depth),
        ])
    }

    #[test]
    fn test_box_topology() {
        let mesh = extrude_profile(&slab(8.0, 4.0), 0.0, 3.0).unwrap();
        // floor + roof of 4 vertices each, 4 walls of 4 vertices each
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
    }

    #[test]
    fn test_base_elevation_and_extent() {
        let mesh = extrude_profile(&slab(8.0, 4.0), 6.0, 3.0).unwrap();
        let (min, max) = mesh.bounds();
        assert!((min.z - 6.0).abs() < 1e-4);
        assert!((max.z - 9.0).abs() < 1e-4);
        assert!((max.x - 8.0).abs() < 1e-4);
        assert!((max.y - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_wall_normals_point_outward() {
        let mesh = extrude_profile(&slab(8.0, 4.0), 0.0, 3.0).unwrap();
        // first wall runs along y = 0, so it faces -y
        let first_wall = 8 * 3;
        assert_eq!(&mesh.normals[first_wall..first_wall + 3], &[0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_deterministic() {
        let profile = slab(5.0, 5.0);
        assert_eq!(
            extrude_profile(&profile, 0.0, 3.0).unwrap(),
            extrude_profile(&profile, 0.0, 3.0).unwrap()
        );
    }

    #[test]
    fn test_rejects_bad_height() {
        let profile = slab(5.0, 5.0);
        for height in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                extrude_profile(&profile, 0.0, height),
                Err(Error::InvalidExtrusion(_))
            ));
        }
    }
}
