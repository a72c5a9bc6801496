// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the layout pipeline.

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while producing or exporting a layout.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input document could not be read.
    #[error(transparent)]
    Core(#[from] archplan_core::Error),

    /// A footprint could not be turned into a solid.
    #[error("geometry error: {0}")]
    Geometry(#[from] archplan_geometry::Error),

    /// Layout results could not be rendered as JSON.
    #[error("serialization error: {0}")]
    Serialization(String),
}
