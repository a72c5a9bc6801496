// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Circulation network between placed departments

use crate::department::Department;
use archplan_geometry::{GeometryKernel, Point2D};
use serde::{Deserialize, Serialize};

/// A corridor segment between two department centroids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirculationEdge {
    /// Department the edge starts at
    pub from: String,
    /// Department the edge ends at
    pub to: String,
    pub start: Point2D,
    pub end: Point2D,
}

impl CirculationEdge {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Connect consecutive placed departments, in placement order.
///
/// Unplaced departments are skipped, so `n` placed departments yield
/// `n - 1` edges.
pub fn build_circulation<K: GeometryKernel>(kernel: &K, departments: &[Department]) -> Vec<CirculationEdge> {
    let nodes: Vec<(&str, Point2D)> = departments
        .iter()
        .filter_map(|dept| {
            let footprint = dept.footprint.as_ref()?;
            Some((dept.name.as_str(), kernel.centroid(footprint)?))
        })
        .collect();

    nodes
        .windows(2)
        .map(|pair| CirculationEdge {
            from: pair[0].0.to_string(),
            to: pair[1].0.to_string(),
            start: pair[0].1,
            end: pair[1].1,
        })
        .collect()
}
