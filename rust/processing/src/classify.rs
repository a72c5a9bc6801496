// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Department classifier
//!
//! Rooms are grouped into departments by case-insensitive keyword matches
//! on the room name. Rules are tried in order and the first match wins;
//! rooms matching nothing land in [`DEFAULT_DEPARTMENT`]. Departments are
//! listed in the order their first room appears.

use crate::department::{recompute_proportions, Department, Program};
use archplan_core::Room;
use rustc_hash::FxHashMap;

/// Department for rooms no rule matches
pub const DEFAULT_DEPARTMENT: &str = "General Services";

/// Feature keyword that boosts a program's adjacency weight
pub const CRITICAL_FEATURE: &str = "critical";
pub const CRITICAL_MULTIPLIER: f64 = 1.5;

/// One keyword rule: any keyword in the lowercased name selects `target`
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T> {
    pub keywords: &'static [&'static str],
    pub target: T,
}

impl<T: Copy> KeywordRule<T> {
    fn matches(&self, lowercase_name: &str) -> bool {
        self.keywords.iter().any(|k| lowercase_name.contains(k))
    }
}

/// First rule whose keywords occur in `name`
fn first_match<T: Copy>(rules: &[KeywordRule<T>], name: &str) -> Option<T> {
    let lowered = name.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.target)
}

pub const DEPARTMENT_RULES: &[KeywordRule<&str>] = &[
    KeywordRule { keywords: &["emergency", "trauma", "triage"], target: "Emergency Department" },
    KeywordRule { keywords: &["surgical", "operating", "surgery"], target: "Surgical Department" },
    KeywordRule { keywords: &["patient", "room", "bed"], target: "Patient Care" },
    KeywordRule { keywords: &["office", "admin", "reception"], target: "Administration" },
    KeywordRule { keywords: &["lab", "diagnostic", "imaging"], target: "Diagnostic Services" },
    KeywordRule { keywords: &["garden", "healing", "wellness"], target: "Wellness Areas" },
    KeywordRule { keywords: &["cafeteria", "dining", "kitchen"], target: "Food Services" },
    KeywordRule { keywords: &["parking", "garage"], target: "Parking" },
];

pub const ADJACENCY_RULES: &[KeywordRule<f64>] = &[
    KeywordRule { keywords: &["emergency", "trauma", "surgical"], target: 3.0 },
    KeywordRule { keywords: &["patient", "room"], target: 2.0 },
    KeywordRule { keywords: &["office", "admin"], target: 1.5 },
];

/// Base adjacency weight for names no rule matches
pub const BASE_ADJACENCY_WEIGHT: f64 = 1.0;

/// Department a room name belongs to
pub fn department_for(name: &str) -> &'static str {
    first_match(DEPARTMENT_RULES, name).unwrap_or(DEFAULT_DEPARTMENT)
}

/// Adjacency weight from the room name, boosted for critical features
pub fn adjacency_weight(room: &Room) -> f64 {
    let base = first_match(ADJACENCY_RULES, &room.name).unwrap_or(BASE_ADJACENCY_WEIGHT);
    if room.has_feature(CRITICAL_FEATURE) {
        base * CRITICAL_MULTIPLIER
    } else {
        base
    }
}

/// Group rooms into departments.
///
/// Every room becomes exactly one program. Area proportions are computed
/// over the returned set.
pub fn classify_rooms(rooms: &[Room], circulation_factor: f64) -> Vec<Department> {
    let mut departments: Vec<Department> = Vec::new();
    let mut index_by_name: FxHashMap<&'static str, usize> = FxHashMap::default();

    for room in rooms {
        let name = department_for(&room.name);
        let index = *index_by_name.entry(name).or_insert_with(|| {
            departments.push(Department::new(name, room.floor));
            departments.len() - 1
        });

        let department = &mut departments[index];
        let program = Program::from_room(
            department.programs.len() + 1,
            name,
            room,
            adjacency_weight(room),
        );
        department.add_program(program);
    }

    for department in &mut departments {
        department.circulation_factor = circulation_factor;
    }
    recompute_proportions(&mut departments);

    tracing::debug!(
        rooms = rooms.len(),
        departments = departments.len(),
        "Classified rooms into departments"
    );

    departments
}
