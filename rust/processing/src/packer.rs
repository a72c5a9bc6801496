// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Greedy row packing of departments and programs
//!
//! Rectangles are laid left to right from a starting corner. After each
//! placement the cursor advances by the rectangle's width plus the gap;
//! once it passes the wrap threshold it returns to the starting x and moves
//! down by the deepest rectangle of the row plus the gap. Rectangles are
//! therefore separated by at least the gap in x or y.

use crate::department::Department;
use archplan_geometry::{Point2D, Polygon2D};
use serde::{Deserialize, Serialize};

/// Packing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// Starting x and y of the first department (meters)
    pub department_margin: f64,
    /// Space between departments
    pub department_gap: f64,
    /// Departments wrap to a new row once the cursor passes this x
    pub row_width: f64,
    /// Space between programs inside a department
    pub program_gap: f64,
    /// Department-local start of the first program
    pub program_origin: f64,
    /// Planning-unit widths used when the design has no programs
    pub default_widths: Vec<f64>,
    /// Planning-unit depths used when the design has no programs
    pub default_depths: Vec<f64>,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            department_margin: 10.0,
            department_gap: 5.0,
            row_width: 80.0,
            program_gap: 2.0,
            program_origin: 0.0,
            default_widths: vec![10.0, 15.0, 20.0],
            default_depths: vec![15.0, 20.0, 25.0],
        }
    }
}

/// Cursor state for one packing pass
#[derive(Debug, Clone)]
pub struct RowPacker {
    origin: Point2D,
    gap: f64,
    wrap_x: f64,
    cursor: Point2D,
    row_depth: f64,
}

impl RowPacker {
    pub fn new(origin: Point2D, gap: f64, wrap_x: f64) -> Self {
        Self {
            origin,
            gap,
            wrap_x,
            cursor: origin,
            row_depth: 0.0,
        }
    }

    /// Next free corner
    pub fn cursor(&self) -> Point2D {
        self.cursor
    }

    /// Place a `width` × `depth` rectangle at the cursor and advance
    pub fn place(&mut self, width: f64, depth: f64) -> Polygon2D {
        let footprint = Polygon2D::rectangle(self.cursor, width, depth);

        self.row_depth = self.row_depth.max(depth);
        self.cursor.x += width + self.gap;
        if self.cursor.x > self.wrap_x {
            self.cursor.x = self.origin.x;
            self.cursor.y += self.row_depth + self.gap;
            self.row_depth = 0.0;
        }

        footprint
    }
}

/// Assign each department a planning unit and a footprint on the site.
///
/// Department `i` gets `widths[i % len]` × `depths[i % len]`. With an empty
/// pool nothing is placed and every footprint is cleared.
pub fn place_departments(departments: &mut [Department], widths: &[f64], depths: &[f64], config: &PackingConfig) {
    if widths.is_empty() || depths.is_empty() {
        tracing::warn!(
            departments = departments.len(),
            "No planning units available, departments left unplaced"
        );
        for department in departments.iter_mut() {
            department.footprint = None;
            department.area_provided = None;
        }
        return;
    }

    let origin = Point2D::new(config.department_margin, config.department_margin);
    let mut packer = RowPacker::new(origin, config.department_gap, config.row_width);

    for (i, department) in departments.iter_mut().enumerate() {
        let width = widths[i % widths.len()];
        let depth = depths[i % depths.len()];

        department.footprint = Some(packer.place(width, depth));
        department.area_provided = Some(width * depth);
    }
}

/// Place every department's programs inside its footprint.
///
/// Programs are packed from the department-local origin at their own size,
/// wrapping at the department width, then moved into site coordinates.
/// Programs of unplaced departments stay unplaced.
pub fn place_programs(departments: &mut [Department], config: &PackingConfig) {
    for department in departments.iter_mut() {
        let Some(bounds) = department.bounds() else {
            for program in &mut department.programs {
                program.footprint = None;
            }
            continue;
        };

        let local_origin = Point2D::new(config.program_origin, config.program_origin);
        let mut packer = RowPacker::new(local_origin, config.program_gap, bounds.width());

        for program in &mut department.programs {
            let local = packer.place(program.width, program.depth);
            program.footprint = Some(local.translated(bounds.min_x, bounds.min_y));
        }
    }
}
