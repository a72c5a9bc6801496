// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout pipeline
//!
//! A single forward pass over a normalized document:
//! classify → place departments → place programs → circulation → extrude.
//! Every stage is total; nothing here can fail once a document exists.

use crate::circulation::{build_circulation, CirculationEdge};
use crate::department::Department;
use crate::error::{Error, Result};
use crate::packer::{place_departments, place_programs, PackingConfig};
use crate::params::{DesignParameters, ProgramTable};
use crate::volumes::{build_volumes, Volume};
use archplan_core::DesignDocument;
use archplan_geometry::{BoundingBox2D, GeometryKernel, Point2D, Polygon2D};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Per-run layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Recorded with the results; placement is fully determined by the input
    pub design_seed: u64,
    /// Overrides the factor derived from the project name
    pub circulation_factor: Option<f64>,
    /// Departments wider than this are reported, not resized
    pub acceptable_width: f64,
    /// Explicit planning-unit widths, replacing those derived from programs
    pub kpu_widths: Option<Vec<f64>>,
    /// Explicit planning-unit depths, replacing those derived from programs
    pub kpu_depths: Option<Vec<f64>>,
    /// Spacing of the planning grid (meters)
    pub grid_spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            design_seed: 50,
            circulation_factor: None,
            acceptable_width: 18.0,
            kpu_widths: None,
            kpu_depths: None,
            grid_spacing: 5.0,
        }
    }
}

/// Counts describing a finished layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub departments: usize,
    pub programs: usize,
    pub circulation_elements: usize,
    pub volumes: usize,
    pub design_seed: u64,
}

/// A department whose footprint leaves the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteOverflow {
    pub department: String,
    pub footprint: BoundingBox2D,
    pub site: BoundingBox2D,
}

/// Everything a layout pass produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResults {
    pub departments: Vec<Department>,
    pub circulation: Vec<CirculationEdge>,
    pub geometry_3d: Vec<Volume>,
    pub site_outline: Polygon2D,
    pub building_outline: Polygon2D,
    /// Parameters as read from the document, before placement
    pub design_parameters: DesignParameters,
    pub program_table: ProgramTable,
    pub grid_points: Vec<Point2D>,
    pub summary: LayoutSummary,
    /// Best-effort placement: departments outside the site are listed here
    pub site_overflow: Vec<SiteOverflow>,
}

impl LayoutResults {
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// Departments whose footprint is not inside the site bounds
fn find_site_overflow(departments: &[Department], site: &Polygon2D) -> Vec<SiteOverflow> {
    let Some(site_bounds) = site.bounds() else {
        return Vec::new();
    };

    departments
        .iter()
        .filter_map(|dept| {
            let footprint = dept.bounds()?;
            (!site_bounds.contains_box(&footprint)).then(|| SiteOverflow {
                department: dept.name.clone(),
                footprint,
                site: site_bounds,
            })
        })
        .collect()
}

fn warn_wide_departments(departments: &[Department], acceptable_width: f64) {
    for dept in departments {
        if let Some(bounds) = dept.bounds() {
            if bounds.width() > acceptable_width {
                tracing::warn!(
                    department = %dept.name,
                    width = bounds.width(),
                    acceptable_width,
                    "Department wider than acceptable width"
                );
            }
        }
    }
}

/// Run the full layout pass over a normalized document
pub fn run_layout<K: GeometryKernel>(
    document: &DesignDocument,
    options: &LayoutOptions,
    config: &PackingConfig,
    kernel: &K,
) -> LayoutResults {
    let start = Instant::now();

    let design_parameters = DesignParameters::from_document(document, options, config);
    tracing::info!(
        departments = design_parameters.departments.len(),
        kpu_widths = design_parameters.kpu_widths.len(),
        kpu_depths = design_parameters.kpu_depths.len(),
        circulation_factor = design_parameters.circulation_factor,
        "Design parameters ready"
    );

    let mut departments = design_parameters.departments.clone();
    place_departments(
        &mut departments,
        &design_parameters.kpu_widths,
        &design_parameters.kpu_depths,
        config,
    );
    place_programs(&mut departments, config);
    warn_wide_departments(&departments, options.acceptable_width);

    let site_overflow = find_site_overflow(&departments, &design_parameters.site_outline);
    for overflow in &site_overflow {
        tracing::warn!(
            department = %overflow.department,
            max_x = overflow.footprint.max_x,
            max_y = overflow.footprint.max_y,
            "Department footprint extends beyond the site"
        );
    }

    let circulation = build_circulation(kernel, &departments);
    let geometry_3d = build_volumes(kernel, &departments);

    let summary = LayoutSummary {
        departments: departments.len(),
        programs: departments.iter().map(|d| d.programs.len()).sum(),
        circulation_elements: circulation.len(),
        volumes: geometry_3d.len(),
        design_seed: options.design_seed,
    };

    tracing::info!(
        departments = summary.departments,
        programs = summary.programs,
        circulation = summary.circulation_elements,
        volumes = summary.volumes,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Layout complete"
    );

    LayoutResults {
        site_outline: design_parameters.site_outline.clone(),
        building_outline: design_parameters.building_outline.clone(),
        program_table: design_parameters.program_table(),
        grid_points: design_parameters.grid_points(options.grid_spacing),
        departments,
        circulation,
        geometry_3d,
        design_parameters,
        summary,
        site_overflow,
    }
}
