// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ArchPlan Geometry
//!
//! Plan-level geometry for building layouts: serializable points, bounding
//! boxes and footprint polygons, plus earcutr triangulation and
//! extrusion of footprints into triangulated 3D solids.

pub mod bounds;
pub mod error;
pub mod extrusion;
pub mod kernel;
pub mod mesh;
pub mod point;
pub mod polygon;
pub mod profile;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use bounds::BoundingBox2D;
pub use error::{Error, Result};
pub use extrusion::extrude_profile;
pub use kernel::{GeometryKernel, MeshKernel, Solid};
pub use mesh::Mesh;
pub use point::{Point2D, Point3D};
pub use polygon::Polygon2D;
pub use profile::Profile2D;
