// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub type Result<T> = std::result::Result<T, Error>;

/// Failures while turning plan footprints into solids
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// earcut rejected the outline or returned no triangles
    #[error("footprint could not be triangulated: {0}")]
    TriangulationError(String),

    #[error("footprint with {vertices} vertices cannot be extruded: {reason}")]
    InvalidProfile { vertices: usize, reason: String },

    /// Heights must be strictly positive and finite
    #[error("extrusion height {0} is not a positive finite number")]
    InvalidExtrusion(f64),

    #[error("extruding {vertices} vertices produced no triangles")]
    EmptyMesh { vertices: usize },
}
