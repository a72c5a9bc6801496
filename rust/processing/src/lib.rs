// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Space-planning layout for normalized designs
//!
//! Rooms are grouped into departments by name, departments are packed onto
//! the site in rows using planning-unit sizes, programs are packed inside
//! their department, consecutive departments are joined by circulation
//! edges, and every placed footprint is extruded into a volume.
//!
//! The same document and options always produce the same coordinates.

pub mod circulation;
pub mod classify;
pub mod department;
pub mod error;
pub mod packer;
pub mod params;
pub mod pipeline;
pub mod volumes;

pub use circulation::{build_circulation, CirculationEdge};
pub use classify::{adjacency_weight, classify_rooms, department_for};
pub use department::{recompute_proportions, Department, Program};
pub use error::{Error, Result};
pub use packer::{place_departments, place_programs, PackingConfig, RowPacker};
pub use params::{circulation_factor_for, grid_points, BuildingInfo, DesignParameters, ProgramRow, ProgramTable};
pub use pipeline::{run_layout, LayoutOptions, LayoutResults, LayoutSummary, SiteOverflow};
pub use volumes::{build_volumes, Volume, VolumeSource};
