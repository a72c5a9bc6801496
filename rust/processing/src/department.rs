// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Departments and the programs they group

use archplan_core::{Room, RoomShape};
use archplan_geometry::{BoundingBox2D, Point3D, Polygon2D};
use serde::{Deserialize, Serialize};

/// Height used for a department with no programs (meters)
pub const DEFAULT_DEPARTMENT_HEIGHT: f64 = 3.0;

/// A room viewed as a placeable unit inside a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// 1-based index within its department
    pub id: usize,
    pub name: String,
    pub department: String,
    pub quantity: u32,
    /// Footprint area of one unit (m²)
    pub unit_area: f64,
    pub adjacency_weight: f64,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    /// Position of the source room in the design
    pub position: Point3D,
    pub shape: RoomShape,
    pub features: Vec<String>,
    /// Site-coordinate footprint once placed
    pub footprint: Option<Polygon2D>,
}

impl Program {
    pub fn from_room(id: usize, department: &str, room: &Room, adjacency_weight: f64) -> Self {
        Self {
            id,
            name: room.name.clone(),
            department: department.to_string(),
            quantity: 1,
            unit_area: room.area(),
            adjacency_weight,
            width: room.width,
            depth: room.depth,
            height: room.height,
            position: room.position,
            shape: room.shape,
            features: room.features.clone(),
            footprint: None,
        }
    }

    pub fn total_area(&self) -> f64 {
        self.unit_area * self.quantity as f64
    }

    pub fn is_placed(&self) -> bool {
        self.footprint.is_some()
    }
}

/// A named group of programs placed as one block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub programs: Vec<Program>,
    /// Sum of program areas (m²)
    pub area_needed: f64,
    /// Share of the area needed by all departments
    pub area_proportion_needed: f64,
    /// Floor of the first room in the department
    pub floor: u32,
    pub circulation_factor: f64,
    /// Site-coordinate footprint once placed
    pub footprint: Option<Polygon2D>,
    /// Footprint area once placed (m²)
    pub area_provided: Option<f64>,
}

impl Department {
    pub fn new(name: impl Into<String>, floor: u32) -> Self {
        Self {
            name: name.into(),
            programs: Vec::new(),
            area_needed: 0.0,
            area_proportion_needed: 0.0,
            floor,
            circulation_factor: 1.0,
            footprint: None,
            area_provided: None,
        }
    }

    pub fn add_program(&mut self, program: Program) {
        self.area_needed += program.total_area();
        self.programs.push(program);
    }

    pub fn is_placed(&self) -> bool {
        self.footprint.is_some()
    }

    pub fn bounds(&self) -> Option<BoundingBox2D> {
        self.footprint.as_ref().and_then(Polygon2D::bounds)
    }

    /// Extrusion height: the tallest program, or the default when empty
    pub fn height(&self) -> f64 {
        self.programs
            .iter()
            .map(|p| p.height)
            .reduce(f64::max)
            .unwrap_or(DEFAULT_DEPARTMENT_HEIGHT)
    }
}

/// Recompute every department's share of the total area needed.
///
/// Shares sum to 1 when any area is needed and are all 0 otherwise.
pub fn recompute_proportions(departments: &mut [Department]) {
    let total: f64 = departments.iter().map(|d| d.area_needed).sum();
    for department in departments.iter_mut() {
        department.area_proportion_needed = if total > 0.0 {
            department.area_needed / total
        } else {
            0.0
        };
    }
}
