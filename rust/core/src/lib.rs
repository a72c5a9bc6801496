// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ArchPlan Core
//!
//! Typed building design documents and the normalizer that produces them
//! from loosely-structured, often AI-generated JSON.
//!
//! ## Overview
//!
//! - **Document model**: project, rooms, walls, openings, structural
//!   elements and exterior, with unknown fields preserved
//! - **Normalization**: missing sections are synthesized, out-of-range
//!   values clamped, and walls, openings and columns derived from rooms
//! - **Response handling**: code-fence stripping for generated text and a
//!   fixed sample design to fall back on
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use archplan_core::normalize_str;
//!
//! let doc = normalize_str(r#"{"rooms": [{"name": "Hall", "width": 40}]}"#)?;
//! assert_eq!(doc.rooms[0].width, 15.0);
//! assert_eq!(doc.walls.len(), 4);
//! ```
//!
//! Only input that is not a JSON object is rejected. Everything else is
//! repaired, and [`normalize_with_report`] lists each repair.

pub mod coerce;
pub mod derive;
pub mod document;
pub mod error;
pub mod fallback;
pub mod normalize;

pub use document::{
    DesignDocument, Exterior, Facade, Opening, OpeningType, Project, Roof, Room, RoomShape, Site,
    StructuralElement, Wall,
};
pub use error::{Error, Result};
pub use fallback::{design_from_response, extract_json_payload, fallback_design, parse_design_response};
pub use normalize::{normalize, normalize_str, normalize_with_report, NormalizationReport, Repair};
