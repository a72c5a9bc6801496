// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry capability used by the layout pipeline
//!
//! The pipeline only needs three things from a geometry backend: plan
//! rectangles, centroids and vertical extrusion. They are expressed as a
//! trait so the planner does not depend on how solids are represented.
//! [`MeshKernel`] is the implementation used everywhere; it produces
//! triangulated solids through [`extrude_profile`].

use crate::bounds::BoundingBox2D;
use crate::error::{Error, Result};
use crate::extrusion::extrude_profile;
use crate::mesh::Mesh;
use crate::point::Point2D;
use crate::polygon::Polygon2D;
use serde::{Deserialize, Serialize};

/// A footprint extruded upward from a base elevation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    /// Plan footprint the solid was extruded from
    pub footprint: Polygon2D,
    /// Elevation of the bottom face
    pub base_elevation: f64,
    /// Extrusion height
    pub height: f64,
    /// Footprint bounds
    pub bounds: BoundingBox2D,
    /// Enclosed volume (footprint area x height)
    pub volume: f64,
    /// Triangle mesh, absent when the kernel is configured without meshes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<Mesh>,
}

/// Geometry operations the planner relies on
pub trait GeometryKernel {
    /// Axis-aligned rectangle with `origin` as its first corner
    fn rectangle(&self, origin: Point2D, width: f64, depth: f64) -> Polygon2D {
        Polygon2D::rectangle(origin, width, depth)
    }

    /// Footprint centroid
    fn centroid(&self, footprint: &Polygon2D) -> Option<Point2D> {
        footprint.centroid()
    }

    /// Extrude `footprint` upward by `height` starting at `base_elevation`.
    ///
    /// Must be a pure function of its arguments.
    fn extrude(&self, footprint: &Polygon2D, base_elevation: f64, height: f64) -> Result<Solid>;
}

/// Kernel producing triangulated solids
#[derive(Debug, Clone, Copy)]
pub struct MeshKernel {
    include_meshes: bool,
}

impl MeshKernel {
    pub fn new(include_meshes: bool) -> Self {
        Self { include_meshes }
    }

    pub fn includes_meshes(&self) -> bool {
        self.include_meshes
    }
}

impl Default for MeshKernel {
    fn default() -> Self {
        Self::new(true)
    }
}

impl GeometryKernel for MeshKernel {
    fn extrude(&self, footprint: &Polygon2D, base_elevation: f64, height: f64) -> Result<Solid> {
        let bounds = match footprint.bounds() {
            Some(bounds) if !footprint.is_degenerate() => bounds,
            _ => {
                return Err(Error::InvalidProfile {
                    vertices: footprint.len(),
                    reason: format!("enclosed area {:.3} is too small", footprint.area()),
                })
            }
        };

        // Triangulate even when the mesh is dropped so bad inputs fail alike.
        let mesh = extrude_profile(&footprint.to_profile(), base_elevation, height)?;

        Ok(Solid {
            footprint: footprint.clone(),
            base_elevation,
            height,
            bounds,
            volume: footprint.area() * height,
            mesh: self.include_meshes.then_some(mesh),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extrude_footprint() {
        let kernel = MeshKernel::default();
        let footprint = kernel.rectangle(Point2D::new(10.0, 10.0), 10.0, 15.0);
        let solid = kernel.extrude(&footprint, 0.0, 3.5).unwrap();

        assert_relative_eq!(solid.volume, 525.0);
        assert_eq!(solid.bounds, BoundingBox2D::new(10.0, 10.0, 20.0, 25.0));

        let mesh = solid.mesh.unwrap();
        let (min, max) = mesh.bounds();
        assert!((min.z - 0.0).abs() < 1e-4);
        assert!((max.z - 3.5).abs() < 1e-4);
        assert!((max.x - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_base_elevation() {
        let kernel = MeshKernel::default();
        let footprint = kernel.rectangle(Point2D::default(), 2.0, 2.0);
        let solid = kernel.extrude(&footprint, 7.0, 3.0).unwrap();

        let (min, max) = solid.mesh.unwrap().bounds();
        assert!((min.z - 7.0).abs() < 1e-4);
        assert!((max.z - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_without_meshes() {
        let kernel = MeshKernel::new(false);
        let footprint = kernel.rectangle(Point2D::default(), 2.0, 3.0);
        let solid = kernel.extrude(&footprint, 0.0, 3.0).unwrap();
        assert!(solid.mesh.is_none());
        assert_relative_eq!(solid.volume, 18.0);
    }

    #[test]
    fn test_degenerate_footprint_rejected() {
        let kernel = MeshKernel::default();
        let flat = kernel.rectangle(Point2D::default(), 0.0, 3.0);
        assert!(kernel.extrude(&flat, 0.0, 3.0).is_err());
        assert!(kernel.extrude(&Polygon2D::default(), 0.0, 3.0).is_err());

        let ok = kernel.rectangle(Point2D::default(), 1.0, 1.0);
        assert!(kernel.extrude(&ok, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_centroid_via_kernel() {
        let kernel = MeshKernel::default();
        let footprint = kernel.rectangle(Point2D::new(0.0, 0.0), 4.0, 2.0);
        assert_eq!(kernel.centroid(&footprint), Some(Point2D::new(2.0, 1.0)));
    }
}
