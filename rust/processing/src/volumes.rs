// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 3D volumes for placed departments and programs

use crate::department::{Department, Program};
use crate::error::Result;
use archplan_geometry::{GeometryKernel, Polygon2D, Solid};
use serde::{Deserialize, Serialize};

/// Volumes stand on the ground plane
pub const BASE_ELEVATION: f64 = 0.0;

/// What a volume was extruded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VolumeSource {
    Department { department: String },
    Program { department: String, program: String },
}

/// An extruded footprint tagged with its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub source: VolumeSource,
    #[serde(flatten)]
    pub solid: Solid,
}

fn extrude<K: GeometryKernel>(kernel: &K, footprint: &Polygon2D, height: f64, source: VolumeSource) -> Result<Volume> {
    let solid = kernel.extrude(footprint, BASE_ELEVATION, height)?;
    Ok(Volume { source, solid })
}

/// Extrude a department footprint to its tallest program's height
pub fn department_volume<K: GeometryKernel>(kernel: &K, department: &Department) -> Option<Result<Volume>> {
    let footprint = department.footprint.as_ref()?;
    let source = VolumeSource::Department {
        department: department.name.clone(),
    };
    Some(extrude(kernel, footprint, department.height(), source))
}

/// Extrude a program footprint to the program's height
pub fn program_volume<K: GeometryKernel>(kernel: &K, program: &Program) -> Option<Result<Volume>> {
    let footprint = program.footprint.as_ref()?;
    let source = VolumeSource::Program {
        department: program.department.clone(),
        program: program.name.clone(),
    };
    Some(extrude(kernel, footprint, program.height, source))
}

/// One volume per placed department followed by one per placed program.
///
/// Unplaced entities produce nothing. A footprint the kernel rejects is
/// logged and skipped.
pub fn build_volumes<K: GeometryKernel>(kernel: &K, departments: &[Department]) -> Vec<Volume> {
    let attempts = departments.iter().flat_map(move |dept| {
        std::iter::once(department_volume(kernel, dept))
            .chain(dept.programs.iter().map(move |p| program_volume(kernel, p)))
    });

    attempts
        .flatten()
        .filter_map(|attempt| match attempt {
            Ok(volume) => Some(volume),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping volume for unusable footprint");
                None
            }
        })
        .collect()
}
