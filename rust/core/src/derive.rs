// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry derived from rooms when a document omits it
//!
//! - Walls: four per room, tracing the footprint from the origin corner
//!   along +x, then +y, then back.
//! - Openings: one per wall for the first [`OPENING_WALL_LIMIT`] walls,
//!   doors on even wall indices and windows on odd ones.
//! - Columns: one centered column for every room spanning more than
//!   [`COLUMN_SPAN_THRESHOLD`] in either direction.

use crate::document::{Opening, OpeningType, Room, StructuralElement, Wall};
use serde_json::Map;

/// Thickness of derived walls (meters)
pub const DERIVED_WALL_THICKNESS: f64 = 0.2;
/// Material tag of derived walls
pub const DERIVED_WALL_MATERIAL: &str = "concrete";

/// Openings are derived for at most this many walls
pub const OPENING_WALL_LIMIT: usize = 4;

pub const DOOR_WIDTH: f64 = 0.9;
pub const DOOR_HEIGHT: f64 = 2.1;
/// Offset of a derived door from its wall start
pub const DOOR_POSITION: f64 = 1.0;
pub const WINDOW_WIDTH: f64 = 1.2;
pub const WINDOW_HEIGHT: f64 = 1.0;
/// Offset of a derived window from its wall start
pub const WINDOW_POSITION: f64 = 1.5;
/// Style tag of derived openings
pub const DERIVED_OPENING_STYLE: &str = "standard";

/// Rooms wider or deeper than this get a column
pub const COLUMN_SPAN_THRESHOLD: f64 = 8.0;
pub const COLUMN_DIAMETER: f64 = 0.3;

/// Four walls per room, in room order
pub fn derive_walls(rooms: &[Room]) -> Vec<Wall> {
    let mut walls = Vec::with_capacity(rooms.len() * 4);

    for room in rooms {
        let corners = [
            room.position,
            room.position.offset(room.width, 0.0, 0.0),
            room.position.offset(room.width, room.depth, 0.0),
            room.position.offset(0.0, room.depth, 0.0),
        ];

        for i in 0..corners.len() {
            walls.push(Wall {
                start: corners[i],
                end: corners[(i + 1) % corners.len()],
                height: room.height,
                thickness: DERIVED_WALL_THICKNESS,
                material: DERIVED_WALL_MATERIAL.to_string(),
                extra: Map::new(),
            });
        }
    }

    walls
}

/// Alternating door/window openings over the first walls
pub fn derive_openings(walls: &[Wall]) -> Vec<Opening> {
    walls
        .iter()
        .take(OPENING_WALL_LIMIT)
        .enumerate()
        .map(|(wall_id, _)| {
            if wall_id % 2 == 0 {
                Opening {
                    kind: OpeningType::Door,
                    wall_id,
                    position: DOOR_POSITION,
                    width: DOOR_WIDTH,
                    height: DOOR_HEIGHT,
                    style: DERIVED_OPENING_STYLE.to_string(),
                    extra: Map::new(),
                }
            } else {
                Opening {
                    kind: OpeningType::Window,
                    wall_id,
                    position: WINDOW_POSITION,
                    width: WINDOW_WIDTH,
                    height: WINDOW_HEIGHT,
                    style: DERIVED_OPENING_STYLE.to_string(),
                    extra: Map::new(),
                }
            }
        })
        .collect()
}

/// One column at the center of every long-span room
pub fn derive_structural(rooms: &[Room]) -> Vec<StructuralElement> {
    rooms
        .iter()
        .filter(|room| room.width > COLUMN_SPAN_THRESHOLD || room.depth > COLUMN_SPAN_THRESHOLD)
        .map(|room| StructuralElement::Column {
            position: room.center(),
            diameter: COLUMN_DIAMETER,
            height: room.height,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RoomShape;
    use archplan_geometry::Point3D;

    fn room(width: f64, depth: f64, x: f64, y: f64) -> Room {
        Room {
            name: "Room".into(),
            floor: 1,
            width,
            depth,
            height: 3.0,
            position: Point3D::new(x, y, 1.5),
            shape: RoomShape::Rectangle,
            features: Vec::new(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_walls_trace_footprint() {
        let walls = derive_walls(&[room(6.0, 5.0, 2.0, 3.0)]);
        assert_eq!(walls.len(), 4);

        let expected = [
            Point3D::new(2.0, 3.0, 1.5),
            Point3D::new(8.0, 3.0, 1.5),
            Point3D::new(8.0, 8.0, 1.5),
            Point3D::new(2.0, 8.0, 1.5),
        ];
        for (i, wall) in walls.iter().enumerate() {
            assert_eq!(wall.start, expected[i]);
            assert_eq!(wall.end, expected[(i + 1) % 4]);
            assert_eq!(wall.start.z, wall.end.z);
            assert_eq!(wall.height, 3.0);
            assert_eq!(wall.thickness, DERIVED_WALL_THICKNESS);
        }
    }

    #[test]
    fn test_openings_alternate_over_first_four_walls() {
        let walls = derive_walls(&[room(6.0, 5.0, 0.0, 0.0), room(4.0, 4.0, 6.0, 0.0)]);
        let openings = derive_openings(&walls);

        assert_eq!(openings.len(), 4);
        let kinds: Vec<_> = openings.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![
                OpeningType::Door,
                OpeningType::Window,
                OpeningType::Door,
                OpeningType::Window
            ]
        );
        assert_eq!(openings[0].width, DOOR_WIDTH);
        assert_eq!(openings[1].height, WINDOW_HEIGHT);
        assert!(openings.iter().enumerate().all(|(i, o)| o.wall_id == i));
    }

    #[test]
    fn test_openings_for_short_wall_list() {
        let walls = derive_walls(&[room(6.0, 5.0, 0.0, 0.0)]);
        assert_eq!(derive_openings(&walls[..1]).len(), 1);
        assert!(derive_openings(&[]).is_empty());
    }

    #[test]
    fn test_columns_for_long_spans() {
        let rooms = [
            room(10.0, 6.0, 0.0, 0.0),
            room(8.0, 8.0, 20.0, 0.0),
            room(4.0, 9.0, 40.0, 2.0),
        ];
        let structural = derive_structural(&rooms);
        assert_eq!(structural.len(), 2);

        match &structural[0] {
            StructuralElement::Column {
                position,
                diameter,
                height,
            } => {
                assert_eq!(*position, Point3D::new(5.0, 3.0, 1.5));
                assert_eq!(*diameter, COLUMN_DIAMETER);
                assert_eq!(*height, 3.0);
            }
            other => panic!("expected column, got {:?}", other),
        }
        match &structural[1] {
            StructuralElement::Column { position, .. } => {
                assert_eq!(*position, Point3D::new(42.0, 6.5, 1.5));
            }
            other => panic!("expected column, got {:?}", other),
        }
    }
}
