// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Design parameters consumed by packing
//!
//! Everything the packer needs is read from the normalized document once:
//! the site outline, departments, planning-unit pools, the circulation
//! factor and building height information.

use crate::classify::classify_rooms;
use crate::department::Department;
use crate::packer::PackingConfig;
use crate::pipeline::LayoutOptions;
use archplan_core::{DesignDocument, Project, Room};
use archplan_geometry::{Point2D, Polygon2D};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Circulation factor for projects whose type is not recognised
pub const DEFAULT_CIRCULATION_FACTOR: f64 = 1.5;
/// Floor height used when there are no rooms (meters)
pub const DEFAULT_FLOOR_HEIGHT: f64 = 3.5;
/// Largest planning grid produced; bigger grids are skipped
pub const MAX_GRID_POINTS: usize = 1_000_000;

const CIRCULATION_FACTORS: &[(&[&str], f64)] = &[
    (&["hospital", "medical", "clinic"], 1.8),
    (&["office", "corporate"], 1.4),
    (&["retail", "mall", "shopping"], 1.6),
    (&["residential", "apartment", "housing"], 1.3),
];

/// Circulation factor implied by the project name
pub fn circulation_factor_for(project_name: &str) -> f64 {
    let lowered = project_name.to_lowercase();
    CIRCULATION_FACTORS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, factor)| *factor)
        .unwrap_or(DEFAULT_CIRCULATION_FACTOR)
}

/// Building massing figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingInfo {
    pub floors: u32,
    /// Mean room height
    pub floor_height: f64,
    pub total_height: f64,
}

impl BuildingInfo {
    pub fn new(project: &Project, rooms: &[Room]) -> Self {
        let floor_height = if rooms.is_empty() {
            DEFAULT_FLOOR_HEIGHT
        } else {
            rooms.iter().map(|r| r.height).sum::<f64>() / rooms.len() as f64
        };
        Self {
            floors: project.floors,
            floor_height,
            total_height: project.floors as f64 * floor_height,
        }
    }
}

/// Sorted, de-duplicated planning-unit sizes
fn unique_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Planning-unit `(widths, depths)` from the program sizes.
///
/// Falls back to the configured defaults when there are no programs.
pub fn planning_unit_pools(departments: &[Department], config: &PackingConfig) -> (Vec<f64>, Vec<f64>) {
    let programs = || departments.iter().flat_map(|d| d.programs.iter());
    let widths = unique_sorted(programs().map(|p| p.width));
    let depths = unique_sorted(programs().map(|p| p.depth));

    if widths.is_empty() || depths.is_empty() {
        return (config.default_widths.clone(), config.default_depths.clone());
    }
    (widths, depths)
}

/// Grid points over the outline's bounding box, both edges included.
///
/// Points run column by column: x outer, y inner.
pub fn grid_points(outline: &Polygon2D, spacing: f64) -> Vec<Point2D> {
    let Some(bounds) = outline.bounds() else {
        return Vec::new();
    };
    if !(spacing.is_finite() && spacing > 0.0) {
        return Vec::new();
    }

    // Step counts are rounded down with a small tolerance so that an edge
    // lying exactly on the grid is included.
    let steps = |extent: f64| (extent / spacing + 1e-9).floor() as usize;
    let columns = steps(bounds.width());
    let rows = steps(bounds.depth());

    let count = columns
        .checked_add(1)
        .zip(rows.checked_add(1))
        .and_then(|(c, r)| c.checked_mul(r))
        .filter(|&n| n <= MAX_GRID_POINTS);
    let Some(count) = count else {
        tracing::warn!(
            width = bounds.width(),
            depth = bounds.depth(),
            spacing,
            max_points = MAX_GRID_POINTS,
            "Planning grid too large, skipping"
        );
        return Vec::new();
    };

    let mut points = Vec::with_capacity(count);
    for i in 0..=columns {
        for j in 0..=rows {
            points.push(Point2D::new(
                bounds.min_x + i as f64 * spacing,
                bounds.min_y + j as f64 * spacing,
            ));
        }
    }
    points
}

/// One row of the program table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRow {
    /// Running id across all departments, from 1
    pub prog_id: usize,
    pub program_name: String,
    pub dept_name: String,
    pub quantity: u32,
    pub unit_area: f64,
    /// Adjacency weight × 10, truncated
    pub pref_value: i64,
    pub color_code: usize,
    pub kind: String,
    /// Department the program prefers to sit next to
    pub adjacency: String,
}

/// Flat program listing for space-planning tools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramTable {
    pub rows: Vec<ProgramRow>,
}

impl ProgramTable {
    pub const HEADER: [&'static str; 9] = [
        "ProgId",
        "ProgramName",
        "DeptName",
        "Quantity",
        "UnitArea",
        "PrefValue",
        "ColorCode",
        "Type",
        "Adjacency",
    ];

    pub fn from_departments(departments: &[Department]) -> Self {
        let rows = departments
            .iter()
            .flat_map(|dept| dept.programs.iter().map(move |p| (dept, p)))
            .enumerate()
            .map(|(index, (dept, program))| {
                let prog_id = index + 1;
                ProgramRow {
                    prog_id,
                    program_name: program.name.clone(),
                    dept_name: dept.name.clone(),
                    quantity: program.quantity,
                    unit_area: program.unit_area,
                    pref_value: (program.adjacency_weight * 10.0).trunc() as i64,
                    color_code: prog_id % 10,
                    kind: "regular".to_string(),
                    adjacency: dept.name.clone(),
                }
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Comma-separated rendering with a header line.
    ///
    /// Names are written verbatim; the format has no quoting.
    pub fn to_csv_string(&self) -> String {
        let mut out = Self::HEADER.join(",");
        out.push('\n');
        for row in &self.rows {
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{},{},{},{},{},{},{},{},{}",
                row.prog_id,
                row.program_name,
                row.dept_name,
                row.quantity,
                row.unit_area,
                row.pref_value,
                row.color_code,
                row.kind,
                row.adjacency
            );
        }
        out
    }
}

/// Finite positive sizes from a caller-supplied pool, `None` when none remain
fn explicit_pool(pool: Option<&[f64]>) -> Option<Vec<f64>> {
    let pool = pool?;
    let usable: Vec<f64> = pool.iter().copied().filter(|v| v.is_finite() && *v > 0.0).collect();
    if usable.len() < pool.len() {
        tracing::warn!(
            supplied = pool.len(),
            kept = usable.len(),
            "Ignoring non-positive planning unit sizes"
        );
    }
    (!usable.is_empty()).then_some(usable)
}

/// The flattened parameter set handed to the packer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    pub site_outline: Polygon2D,
    pub building_outline: Polygon2D,
    pub departments: Vec<Department>,
    pub kpu_widths: Vec<f64>,
    pub kpu_depths: Vec<f64>,
    pub circulation_factor: f64,
    /// Advisory upper bound on department footprint width
    pub acceptable_width: f64,
    pub building_info: BuildingInfo,
    pub design_seed: u64,
}

impl DesignParameters {
    pub fn from_document(document: &DesignDocument, options: &LayoutOptions, config: &PackingConfig) -> Self {
        let circulation_factor = options
            .circulation_factor
            .unwrap_or_else(|| circulation_factor_for(&document.project.name));
        let departments = classify_rooms(&document.rooms, circulation_factor);

        let (derived_widths, derived_depths) = planning_unit_pools(&departments, config);
        let kpu_widths = explicit_pool(options.kpu_widths.as_deref()).unwrap_or(derived_widths);
        let kpu_depths = explicit_pool(options.kpu_depths.as_deref()).unwrap_or(derived_depths);

        let site_outline = document.project.site.outline();

        Self {
            building_outline: site_outline.clone(),
            site_outline,
            departments,
            kpu_widths,
            kpu_depths,
            circulation_factor,
            acceptable_width: options.acceptable_width,
            building_info: BuildingInfo::new(&document.project, &document.rooms),
            design_seed: options.design_seed,
        }
    }

    pub fn program_table(&self) -> ProgramTable {
        ProgramTable::from_departments(&self.departments)
    }

    pub fn grid_points(&self, spacing: f64) -> Vec<Point2D> {
        grid_points(&self.site_outline, spacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use archplan_core::normalize;
    use serde_json::json;

    #[test]
    fn test_circulation_factor_by_type() {
        assert_relative_eq!(circulation_factor_for("St Mary's Hospital"), 1.8);
        assert_relative_eq!(circulation_factor_for("Corporate HQ"), 1.4);
        assert_relative_eq!(circulation_factor_for("Harbour Mall"), 1.6);
        assert_relative_eq!(circulation_factor_for("Apartment Block"), 1.3);
        assert_relative_eq!(circulation_factor_for("Generated Building"), 1.5);
        // Earlier categories win
        assert_relative_eq!(circulation_factor_for("Medical Office"), 1.8);
    }

    #[test]
    fn test_building_info() {
        let doc = normalize(&json!({
            "project": {"name": "Clinic", "floors": 3},
            "rooms": [
                {"name": "A", "width": 4, "depth": 4, "height": 3.0},
                {"name": "B", "width": 4, "depth": 4, "height": 4.0}
            ]
        }))
        .unwrap();
        let info = BuildingInfo::new(&doc.project, &doc.rooms);
        assert_eq!(info.floors, 3);
        assert_relative_eq!(info.floor_height, 3.5);
        assert_relative_eq!(info.total_height, 10.5);

        let empty = BuildingInfo::new(&doc.project, &[]);
        assert_relative_eq!(empty.floor_height, DEFAULT_FLOOR_HEIGHT);
    }

    #[test]
    fn test_pools_from_programs() {
        let doc = normalize(&json!({
            "rooms": [
                {"name": "A", "width": 6, "depth": 5},
                {"name": "B", "width": 4, "depth": 5},
                {"name": "C", "width": 6, "depth": 3}
            ]
        }))
        .unwrap();
        let depts = classify_rooms(&doc.rooms, 1.5);
        let (widths, depths) = planning_unit_pools(&depts, &PackingConfig::default());
        assert_eq!(widths, vec![4.0, 6.0]);
        assert_eq!(depths, vec![3.0, 5.0]);
    }

    #[test]
    fn test_pools_default_without_programs() {
        let config = PackingConfig::default();
        let (widths, depths) = planning_unit_pools(&[], &config);
        assert_eq!(widths, vec![10.0, 15.0, 20.0]);
        assert_eq!(depths, vec![15.0, 20.0, 25.0]);
    }

    #[test]
    fn test_grid_points() {
        let outline = Polygon2D::rectangle(Point2D::default(), 10.0, 5.0);
        let points = grid_points(&outline, 5.0);
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], Point2D::new(0.0, 0.0));
        assert_eq!(points[1], Point2D::new(0.0, 5.0));
        assert_eq!(points[2], Point2D::new(5.0, 0.0));
        assert_eq!(points[5], Point2D::new(10.0, 5.0));

        assert_eq!(grid_points(&outline, 3.0).len(), 4 * 2);
        assert!(grid_points(&outline, 0.0).is_empty());
        assert!(grid_points(&Polygon2D::default(), 5.0).is_empty());
    }

    #[test]
    fn test_oversized_grid_is_skipped() {
        let huge = Polygon2D::rectangle(Point2D::default(), 1e300, 1e300);
        assert!(grid_points(&huge, 5.0).is_empty());

        let wide = Polygon2D::rectangle(Point2D::default(), 1e5, 1e5);
        assert!(grid_points(&wide, 5.0).is_empty());

        let outline = Polygon2D::rectangle(Point2D::default(), 10.0, 5.0);
        assert!(grid_points(&outline, 1e-12).is_empty());
    }

    #[test]
    fn test_huge_site_from_document() {
        let doc = normalize(&json!({"project": {"site": {"width": 1e300, "depth": 1e300}}})).unwrap();
        let params = DesignParameters::from_document(&doc, &LayoutOptions::default(), &PackingConfig::default());
        assert!(params.grid_points(5.0).is_empty());
    }

    #[test]
    fn test_explicit_pools_drop_unusable_sizes() {
        let doc = normalize(&json!({"rooms": [{"name": "Lab", "width": 6, "depth": 4}]})).unwrap();
        let options = LayoutOptions {
            kpu_widths: Some(vec![-20.0, 0.0, f64::NAN, 12.0]),
            kpu_depths: Some(vec![-5.0, f64::INFINITY]),
            ..LayoutOptions::default()
        };
        let params = DesignParameters::from_document(&doc, &options, &PackingConfig::default());
        assert_eq!(params.kpu_widths, vec![12.0]);
        // nothing usable left, so the derived pool is used
        assert_eq!(params.kpu_depths, vec![4.0]);
    }

    #[test]
    fn test_program_table() {
        let doc = normalize(&json!({
            "rooms": [
                {"name": "Emergency Room", "width": 10, "depth": 6, "features": ["critical"]},
                {"name": "Reception", "width": 5, "depth": 4},
                {"name": "Trauma Bay", "width": 5, "depth": 5}
            ]
        }))
        .unwrap();
        let depts = classify_rooms(&doc.rooms, 1.8);
        let table = ProgramTable::from_departments(&depts);

        assert_eq!(table.len(), 3);
        // Department order groups both emergency rooms first
        assert_eq!(table.rows[1].program_name, "Trauma Bay");
        assert_eq!(table.rows[1].prog_id, 2);
        assert_eq!(table.rows[0].pref_value, 45);
        assert_eq!(table.rows[2].dept_name, "Administration");
        assert_eq!(table.rows[2].pref_value, 10);
        assert_eq!(table.rows[2].color_code, 3);

        let csv = table.to_csv_string();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "ProgId,ProgramName,DeptName,Quantity,UnitArea,PrefValue,ColorCode,Type,Adjacency");
        assert_eq!(
            lines[1],
            "1,Emergency Room,Emergency Department,1,60,45,1,regular,Emergency Department"
        );
        assert_eq!(lines.len(), 4);
    }
}
