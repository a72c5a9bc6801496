// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Design document normalizer
//!
//! Turns an arbitrary JSON mapping into a [`DesignDocument`] with all six
//! sections present and every value in range:
//!
//! 1. `project` is synthesized or completed field by field.
//! 2. `rooms` falls back to a single 6 x 5 x 3 m living room; every room is
//!    clamped to 2..15 m in plan and 2.2..5 m in height.
//! 3. `walls`, `openings` and `structural` are coerced when supplied and
//!    derived from the rooms when missing or empty (see [`crate::derive`]).
//! 4. `exterior` defaults to a gabled 30 degree roof over a red brick facade.
//!
//! Normalizing a normalized document returns it unchanged.

use crate::coerce;
use crate::derive::{self, DERIVED_OPENING_STYLE, DERIVED_WALL_MATERIAL, DERIVED_WALL_THICKNESS};
use crate::document::{
    DesignDocument, Exterior, Facade, Opening, OpeningType, Project, Roof, Room, RoomShape, Site,
    StructuralElement, Wall, DEFAULT_PROJECT_NAME, DEFAULT_SITE_EDGE, DEFAULT_STYLE,
};
use crate::error::{Error, Result};
use archplan_geometry::Point3D;
use serde::Serialize;
use serde_json::{Map, Value};

pub const MIN_ROOM_SPAN: f64 = 2.0;
pub const MAX_ROOM_SPAN: f64 = 15.0;
pub const MIN_ROOM_HEIGHT: f64 = 2.2;
pub const MAX_ROOM_HEIGHT: f64 = 5.0;

/// Plan size used for a room that gives none (before clamping)
const DEFAULT_ROOM_SPAN: f64 = 4.0;
const DEFAULT_ROOM_HEIGHT: f64 = 3.0;
const DEFAULT_FLOOR: u32 = 1;
const DEFAULT_WALL_HEIGHT: f64 = 3.0;
const DEFAULT_COLUMN_HEIGHT: f64 = 3.0;
const DEFAULT_BEAM_SECTION: &str = "rectangular";

const DOCUMENT_SECTIONS: &[&str] = &[
    "project",
    "rooms",
    "walls",
    "openings",
    "structural",
    "exterior",
];
const PROJECT_FIELDS: &[&str] = &["name", "style", "floors", "site"];
const ROOM_FIELDS: &[&str] = &[
    "name", "floor", "width", "depth", "height", "position", "shape", "features",
];
const WALL_FIELDS: &[&str] = &["start", "end", "height", "thickness", "material"];
const OPENING_FIELDS: &[&str] = &["type", "wall_id", "position", "width", "height", "style"];
const EXTERIOR_FIELDS: &[&str] = &["roof", "facade"];

/// One repair the normalizer applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repair {
    /// Top-level section (`rooms`, `walls`, ...)
    pub section: &'static str,
    /// Path of the repaired field within the document, e.g. `rooms[2].width`
    pub field: String,
    /// What was done
    pub action: String,
}

/// Every repair applied during one normalization, in the order applied
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizationReport {
    pub repairs: Vec<Repair>,
}

impl NormalizationReport {
    fn record(&mut self, section: &'static str, field: impl Into<String>, action: impl Into<String>) {
        let repair = Repair {
            section,
            field: field.into(),
            action: action.into(),
        };
        tracing::debug!(section, field = %repair.field, action = %repair.action, "Repaired design field");
        self.repairs.push(repair);
    }

    /// True when the input needed no repair
    pub fn is_clean(&self) -> bool {
        self.repairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.repairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repairs.is_empty()
    }

    /// Repairs applied to one section
    pub fn for_section<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a Repair> + 'a {
        self.repairs.iter().filter(move |r| r.section == section)
    }
}

/// Normalize a parsed JSON value
pub fn normalize(input: &Value) -> Result<DesignDocument> {
    normalize_with_report(input).map(|(document, _)| document)
}

/// Parse and normalize JSON text
pub fn normalize_str(text: &str) -> Result<DesignDocument> {
    let value: Value = serde_json::from_str(text).map_err(|source| Error::Json {
        context: "design document",
        source,
    })?;
    normalize(&value)
}

/// Normalize and report every repair that was needed
pub fn normalize_with_report(input: &Value) -> Result<(DesignDocument, NormalizationReport)> {
    let map = input
        .as_object()
        .ok_or_else(|| Error::malformed("document", format!("must be a JSON object, found {}", json_kind(input))))?;

    let mut normalizer = Normalizer::default();

    let project = normalizer.project(map.get("project"));
    let rooms = normalizer.rooms(map.get("rooms"));
    let walls = normalizer.walls(map.get("walls"), &rooms);
    let openings = normalizer.openings(map.get("openings"), &walls);
    let structural = normalizer.structural(map.get("structural"), &rooms);
    let exterior = normalizer.exterior(map.get("exterior"));

    let document = DesignDocument {
        project,
        rooms,
        walls,
        openings,
        structural,
        exterior,
        extra: coerce::extra_fields(map, DOCUMENT_SECTIONS),
    };

    tracing::debug!(
        rooms = document.rooms.len(),
        walls = document.walls.len(),
        openings = document.openings.len(),
        structural = document.structural.len(),
        repairs = normalizer.report.len(),
        "Normalized design document"
    );

    Ok((document, normalizer.report))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Default)]
struct Normalizer {
    report: NormalizationReport,
}

impl Normalizer {
    /// Read a number, substitute `default` when unusable, then clamp.
    fn bounded(
        &mut self,
        section: &'static str,
        field: impl Fn() -> String,
        value: Option<&Value>,
        default: f64,
        min: f64,
        max: f64,
    ) -> f64 {
        let raw = match coerce::number(value) {
            Some(n) => n,
            None => {
                self.report.record(section, field(), format!("defaulted to {}", default));
                default
            }
        };
        let clamped = raw.clamp(min, max);
        if clamped != raw {
            self.report
                .record(section, field(), format!("clamped {} to {}", raw, clamped));
        }
        clamped
    }

    /// Read a strictly positive number or fall back to `default`.
    fn positive(&mut self, section: &'static str, field: impl Fn() -> String, value: Option<&Value>, default: f64) -> f64 {
        match coerce::number(value) {
            Some(n) if n > 0.0 => n,
            _ => {
                self.report.record(section, field(), format!("defaulted to {}", default));
                default
            }
        }
    }

    fn text(&mut self, section: &'static str, field: impl Fn() -> String, value: Option<&Value>, default: &str) -> String {
        coerce::text(value).unwrap_or_else(|| {
            self.report.record(section, field(), format!("defaulted to {:?}", default));
            default.to_string()
        })
    }

    fn point(&mut self, section: &'static str, field: impl Fn() -> String, value: Option<&Value>) -> Point3D {
        coerce::point3(value).unwrap_or_else(|| {
            self.report.record(section, field(), "defaulted to origin");
            Point3D::origin()
        })
    }

    fn project(&mut self, value: Option<&Value>) -> Project {
        let Some(map) = coerce::object(value) else {
            self.report.record("project", "project", "synthesized default project");
            return Project::default();
        };

        let name = self.text("project", || "project.name".into(), map.get("name"), DEFAULT_PROJECT_NAME);
        let style = self.text("project", || "project.style".into(), map.get("style"), DEFAULT_STYLE);

        let floors = match coerce::integer(map.get("floors")) {
            Some(n) if n >= 1 => n.min(u32::MAX as i64) as u32,
            _ => {
                self.report.record("project", "project.floors", "defaulted to 1");
                1
            }
        };

        let site = match coerce::object(map.get("site")) {
            Some(site) => Site {
                width: self.positive("project", || "project.site.width".into(), site.get("width"), DEFAULT_SITE_EDGE),
                depth: self.positive("project", || "project.site.depth".into(), site.get("depth"), DEFAULT_SITE_EDGE),
            },
            None => {
                self.report.record("project", "project.site", "defaulted to 100 x 100 m");
                Site::default()
            }
        };

        Project {
            name,
            style,
            floors,
            site,
            extra: coerce::extra_fields(map, PROJECT_FIELDS),
        }
    }

    fn rooms(&mut self, value: Option<&Value>) -> Vec<Room> {
        let Some(items) = coerce::non_empty_array(value) else {
            self.report.record("rooms", "rooms", "synthesized default living room");
            return vec![default_living_room()];
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.room(index, item))
            .collect()
    }

    fn room(&mut self, index: usize, value: &Value) -> Room {
        let empty = Map::new();
        let map = match value.as_object() {
            Some(map) => map,
            None => {
                self.report.record(
                    "rooms",
                    format!("rooms[{}]", index),
                    format!("replaced {} with a default room", json_kind(value)),
                );
                &empty
            }
        };
        let path = |field: &str| format!("rooms[{}].{}", index, field);

        let name = coerce::text(map.get("name")).unwrap_or_else(|| {
            let fallback = format!("Room {}", index + 1);
            self.report
                .record("rooms", path("name"), format!("defaulted to {:?}", fallback));
            fallback
        });

        let floor = match coerce::integer(map.get("floor")) {
            Some(n) if n >= 0 => n.min(u32::MAX as i64) as u32,
            Some(n) => {
                self.report
                    .record("rooms", path("floor"), format!("clamped {} to 0", n));
                0
            }
            None => {
                self.report
                    .record("rooms", path("floor"), format!("defaulted to {}", DEFAULT_FLOOR));
                DEFAULT_FLOOR
            }
        };

        let width = self.bounded("rooms", || path("width"), map.get("width"), DEFAULT_ROOM_SPAN, MIN_ROOM_SPAN, MAX_ROOM_SPAN);
        let depth = self.bounded("rooms", || path("depth"), map.get("depth"), DEFAULT_ROOM_SPAN, MIN_ROOM_SPAN, MAX_ROOM_SPAN);
        let height = self.bounded("rooms", || path("height"), map.get("height"), DEFAULT_ROOM_HEIGHT, MIN_ROOM_HEIGHT, MAX_ROOM_HEIGHT);
        let position = self.point("rooms", || path("position"), map.get("position"));

        let shape = match coerce::text(map.get("shape")) {
            Some(tag) => RoomShape::from_tag(&tag),
            None => {
                self.report.record("rooms", path("shape"), "defaulted to rectangle");
                RoomShape::Rectangle
            }
        };

        Room {
            name,
            floor,
            width,
            depth,
            height,
            position,
            shape,
            features: coerce::text_list(map.get("features")),
            extra: coerce::extra_fields(map, ROOM_FIELDS),
        }
    }

    fn walls(&mut self, value: Option<&Value>, rooms: &[Room]) -> Vec<Wall> {
        let supplied: Vec<Wall> = coerce::non_empty_array(value)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| self.wall(index, item))
                    .collect()
            })
            .unwrap_or_default();

        if !supplied.is_empty() {
            return supplied;
        }

        let walls = derive::derive_walls(rooms);
        self.report.record(
            "walls",
            "walls",
            format!("derived {} walls from {} rooms", walls.len(), rooms.len()),
        );
        walls
    }

    fn wall(&mut self, index: usize, value: &Value) -> Option<Wall> {
        let Some(map) = value.as_object() else {
            self.report.record(
                "walls",
                format!("walls[{}]", index),
                format!("dropped {}", json_kind(value)),
            );
            return None;
        };
        let path = |field: &str| format!("walls[{}].{}", index, field);

        let start = self.point("walls", || path("start"), map.get("start"));
        let mut end = self.point("walls", || path("end"), map.get("end"));
        if end.z != start.z {
            self.report.record(
                "walls",
                path("end.z"),
                format!("levelled {} to start z {}", end.z, start.z),
            );
            end.z = start.z;
        }

        Some(Wall {
            start,
            end,
            height: self.positive("walls", || path("height"), map.get("height"), DEFAULT_WALL_HEIGHT),
            thickness: self.positive("walls", || path("thickness"), map.get("thickness"), DERIVED_WALL_THICKNESS),
            material: self.text("walls", || path("material"), map.get("material"), DERIVED_WALL_MATERIAL),
            extra: coerce::extra_fields(map, WALL_FIELDS),
        })
    }

    fn openings(&mut self, value: Option<&Value>, walls: &[Wall]) -> Vec<Opening> {
        let supplied: Vec<Opening> = coerce::non_empty_array(value)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| self.opening(index, item, walls))
                    .collect()
            })
            .unwrap_or_default();

        let mut openings = if supplied.is_empty() {
            let derived = derive::derive_openings(walls);
            self.report.record(
                "openings",
                "openings",
                format!("derived {} openings", derived.len()),
            );
            derived
        } else {
            supplied
        };

        for (index, opening) in openings.iter_mut().enumerate() {
            let Some(wall) = walls.get(opening.wall_id) else {
                continue;
            };
            let max_position = (wall.length() - opening.width).max(0.0);
            let fitted = opening.position.clamp(0.0, max_position);
            if fitted != opening.position {
                self.report.record(
                    "openings",
                    format!("openings[{}].position", index),
                    format!("moved {} to {} to fit wall {}", opening.position, fitted, opening.wall_id),
                );
                opening.position = fitted;
            }
        }

        openings
    }

    fn opening(&mut self, index: usize, value: &Value, walls: &[Wall]) -> Option<Opening> {
        let path = |field: &str| format!("openings[{}].{}", index, field);

        let Some(map) = value.as_object() else {
            self.report
                .record("openings", format!("openings[{}]", index), format!("dropped {}", json_kind(value)));
            return None;
        };

        let wall_id = match coerce::integer(map.get("wall_id")) {
            Some(id) if id >= 0 && (id as usize) < walls.len() => id as usize,
            other => {
                self.report.record(
                    "openings",
                    path("wall_id"),
                    format!("dropped opening referencing missing wall {:?}", other),
                );
                return None;
            }
        };

        let kind = match coerce::text(map.get("type")) {
            Some(tag) if tag.to_lowercase().contains("door") => OpeningType::Door,
            Some(tag) if tag.to_lowercase().contains("window") => OpeningType::Window,
            other => {
                self.report.record(
                    "openings",
                    path("type"),
                    format!("treated {:?} as window", other),
                );
                OpeningType::Window
            }
        };

        let (default_width, default_height) = match kind {
            OpeningType::Door => (derive::DOOR_WIDTH, derive::DOOR_HEIGHT),
            OpeningType::Window => (derive::WINDOW_WIDTH, derive::WINDOW_HEIGHT),
        };

        let position = match coerce::number(map.get("position")) {
            Some(p) => p,
            None => {
                self.report.record("openings", path("position"), "defaulted to 0");
                0.0
            }
        };

        Some(Opening {
            kind,
            wall_id,
            position,
            width: self.positive("openings", || path("width"), map.get("width"), default_width),
            height: self.positive("openings", || path("height"), map.get("height"), default_height),
            style: self.text("openings", || path("style"), map.get("style"), DERIVED_OPENING_STYLE),
            extra: coerce::extra_fields(map, OPENING_FIELDS),
        })
    }

    fn structural(&mut self, value: Option<&Value>, rooms: &[Room]) -> Vec<StructuralElement> {
        let supplied: Vec<StructuralElement> = coerce::non_empty_array(value)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| self.structural_element(index, item))
                    .collect()
            })
            .unwrap_or_default();

        if !supplied.is_empty() {
            return supplied;
        }

        let derived = derive::derive_structural(rooms);
        // An explicit empty list with no long-span rooms is already normal.
        if value.is_none() || !derived.is_empty() {
            self.report.record(
                "structural",
                "structural",
                format!("derived {} columns", derived.len()),
            );
        }
        derived
    }

    fn structural_element(&mut self, index: usize, value: &Value) -> Option<StructuralElement> {
        let Some(map) = value.as_object() else {
            self.report.record(
                "structural",
                format!("structural[{}]", index),
                format!("dropped {}", json_kind(value)),
            );
            return None;
        };
        let path = |field: &str| format!("structural[{}].{}", index, field);

        let is_beam = coerce::text(map.get("type"))
            .map(|tag| tag.to_lowercase().contains("beam"))
            .unwrap_or(false);

        let element = if is_beam {
            StructuralElement::Beam {
                start: self.point("structural", || path("start"), map.get("start")),
                end: self.point("structural", || path("end"), map.get("end")),
                cross_section: self.text("structural", || path("cross_section"), map.get("cross_section"), DEFAULT_BEAM_SECTION),
            }
        } else {
            StructuralElement::Column {
                position: self.point("structural", || path("position"), map.get("position")),
                diameter: self.positive("structural", || path("diameter"), map.get("diameter"), derive::COLUMN_DIAMETER),
                height: self.positive("structural", || path("height"), map.get("height"), DEFAULT_COLUMN_HEIGHT),
            }
        };

        Some(element)
    }

    fn exterior(&mut self, value: Option<&Value>) -> Exterior {
        let Some(map) = coerce::object(value) else {
            self.report.record("exterior", "exterior", "defaulted to gabled roof and brick facade");
            return Exterior::default();
        };

        let default_roof = Roof::default();
        let roof = match coerce::object(map.get("roof")) {
            Some(roof) => Roof {
                kind: self.text("exterior", || "exterior.roof.type".into(), roof.get("type"), &default_roof.kind),
                pitch: self.bounded("exterior", || "exterior.roof.pitch".into(), roof.get("pitch"), default_roof.pitch, 0.0, 90.0),
            },
            None => {
                self.report.record("exterior", "exterior.roof", "defaulted to gabled 30 degrees");
                default_roof
            }
        };

        let default_facade = Facade::default();
        let facade = match coerce::object(map.get("facade")) {
            Some(facade) => Facade {
                material: self.text("exterior", || "exterior.facade.material".into(), facade.get("material"), &default_facade.material),
                color: self.text("exterior", || "exterior.facade.color".into(), facade.get("color"), &default_facade.color),
            },
            None => {
                self.report.record("exterior", "exterior.facade", "defaulted to red brick");
                default_facade
            }
        };

        Exterior {
            roof,
            facade,
            extra: coerce::extra_fields(map, EXTERIOR_FIELDS),
        }
    }
}

/// The room used when a document has none
pub fn default_living_room() -> Room {
    Room {
        name: "Living Room".to_string(),
        floor: DEFAULT_FLOOR,
        width: 6.0,
        depth: 5.0,
        height: 3.0,
        position: Point3D::origin(),
        shape: RoomShape::Rectangle,
        features: Vec::new(),
        extra: Map::new(),
    }
}
