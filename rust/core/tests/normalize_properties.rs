// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Properties every normalized document holds, checked over a spread of
//! hand-written inputs ranging from empty to hostile.

use approx::assert_relative_eq;
use archplan_core::{normalize, normalize_with_report, DesignDocument, OpeningType, StructuralElement};
use serde_json::{json, Value};

fn inputs() -> Vec<Value> {
    vec![
        json!({}),
        json!({"rooms": []}),
        json!({"rooms": "lots of rooms"}),
        json!({"project": "not a project", "exterior": [1, 2]}),
        json!({
            "project": {"name": "Riverside Hospital", "floors": 3},
            "rooms": [
                {"name": "ER", "floor": 1, "width": 20, "depth": 12, "height": 4.5},
                {"name": "Ward", "floor": 2, "width": 9, "depth": 7, "height": 3.2},
                {"name": "Pharmacy", "floor": 1, "width": "5", "depth": "4.5"},
                {"name": "Void", "width": null, "depth": 0, "height": -1},
                42
            ]
        }),
        json!({
            "rooms": [{"name": "Studio", "width": 7, "depth": 7, "height": 3}],
            "walls": [{"start": [0, 0, 0], "end": [7, 0, 1]}, "garbage"],
            "openings": [{"type": "door", "wall_id": "0", "position": 99}]
        }),
    ]
}

fn assert_room_ranges(doc: &DesignDocument) {
    assert!(!doc.rooms.is_empty());
    for room in &doc.rooms {
        assert!((2.0..=15.0).contains(&room.width), "width {}", room.width);
        assert!((2.0..=15.0).contains(&room.depth), "depth {}", room.depth);
        assert!((2.2..=5.0).contains(&room.height), "height {}", room.height);
    }
}

#[test]
fn test_rooms_always_in_range() {
    for input in inputs() {
        let doc = normalize(&input).unwrap();
        assert_room_ranges(&doc);
    }
}

#[test]
fn test_every_section_present() {
    for input in inputs() {
        let value = normalize(&input).unwrap().to_value().unwrap();
        for section in ["project", "rooms", "walls", "openings", "structural", "exterior"] {
            assert!(value.get(section).is_some(), "missing {} for {}", section, input);
        }
    }
}

#[test]
fn test_openings_reference_existing_walls() {
    for input in inputs() {
        let doc = normalize(&input).unwrap();
        for opening in &doc.openings {
            assert!(opening.wall_id < doc.walls.len());
        }
    }
}

#[test]
fn test_walls_are_level() {
    for input in inputs() {
        let doc = normalize(&input).unwrap();
        for wall in &doc.walls {
            assert_eq!(wall.start.z, wall.end.z);
        }
    }
}

#[test]
fn test_idempotent_over_inputs() {
    for input in inputs() {
        let once = normalize(&input).unwrap();
        let twice = normalize(&once.to_value().unwrap()).unwrap();
        assert_eq!(once.rooms, twice.rooms);
        assert_eq!(once.walls.len(), twice.walls.len());
        assert_eq!(once.openings.len(), twice.openings.len());
        assert_eq!(once, twice);
    }
}

#[test]
fn test_derived_wall_count_matches_rooms() {
    let doc = normalize(&inputs()[4]).unwrap();
    assert_eq!(doc.rooms.len(), 5);
    assert_eq!(doc.walls.len(), 20);
    assert_eq!(doc.openings.len(), 4);
}

#[test]
fn test_oversized_room_scenario() {
    let doc = normalize(&json!({
        "rooms": [{"name": "Hall", "width": 20, "depth": 3, "height": 3}]
    }))
    .unwrap();

    let hall = &doc.rooms[0];
    assert_relative_eq!(hall.width, 15.0);
    assert_relative_eq!(hall.depth, 3.0);

    assert_eq!(doc.walls.len(), 4);
    assert_relative_eq!(doc.walls[0].length(), 15.0);

    assert_eq!(doc.structural.len(), 1);
    match &doc.structural[0] {
        StructuralElement::Column { position, diameter, height } => {
            assert_relative_eq!(position.x, 7.5);
            assert_relative_eq!(position.y, 1.5);
            assert_relative_eq!(*diameter, 0.3);
            assert_relative_eq!(*height, 3.0);
        }
        other => panic!("expected column, got {:?}", other),
    }
}

#[test]
fn test_empty_input_scenario() {
    let (doc, report) = normalize_with_report(&json!({})).unwrap();

    assert_eq!(doc.project.name, "Generated Building");
    assert_eq!(doc.project.style, "modern");
    assert_eq!(doc.project.floors, 1);

    assert_eq!(doc.rooms.len(), 1);
    let room = &doc.rooms[0];
    assert_eq!(room.name, "Living Room");
    assert_relative_eq!(room.width, 6.0);
    assert_relative_eq!(room.depth, 5.0);
    assert_relative_eq!(room.height, 3.0);

    assert_eq!(doc.walls.len(), 4);
    let kinds: Vec<_> = doc.openings.iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        [OpeningType::Door, OpeningType::Window, OpeningType::Door, OpeningType::Window]
    );
    assert!(doc.structural.is_empty());
    assert_eq!(doc.exterior.roof.kind, "gabled");
    assert_eq!(doc.exterior.facade.material, "brick");

    assert!(report.for_section("walls").count() >= 1);
    assert!(report.for_section("exterior").count() >= 1);
}

#[test]
fn test_supplied_wall_coercion() {
    let doc = normalize(&inputs()[5]).unwrap();

    // The non-object wall entry is dropped; the array wall is kept and levelled
    assert_eq!(doc.walls.len(), 1);
    assert_relative_eq!(doc.walls[0].end.z, 0.0);
    assert_relative_eq!(doc.walls[0].thickness, 0.2);

    // Position 99 is pulled back onto the 7 m wall
    assert_eq!(doc.openings.len(), 1);
    assert_relative_eq!(doc.openings[0].position, 7.0 - 0.9);
}
