// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed design document
//!
//! This is the shape every normalized document has. Unknown fields are kept
//! in the `extra` maps so a round trip through the normalizer preserves
//! whatever the producer added.

use crate::error::{Error, Result};
use archplan_geometry::{Point2D, Point3D, Polygon2D};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default project name when none is supplied
pub const DEFAULT_PROJECT_NAME: &str = "Generated Building";
/// Default architectural style
pub const DEFAULT_STYLE: &str = "modern";
/// Default site edge length (meters) when the project has no site
pub const DEFAULT_SITE_EDGE: f64 = 100.0;

/// A complete building design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    pub project: Project,
    pub rooms: Vec<Room>,
    pub walls: Vec<Wall>,
    pub openings: Vec<Opening>,
    pub structural: Vec<StructuralElement>,
    pub exterior: Exterior,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DesignDocument {
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::Serialization)
    }

    /// Sum of room footprint areas
    pub fn total_room_area(&self) -> f64 {
        self.rooms.iter().map(Room::area).sum()
    }
}

/// Project metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub style: String,
    /// Number of floors, at least 1
    pub floors: u32,
    pub site: Site,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROJECT_NAME.to_string(),
            style: DEFAULT_STYLE.to_string(),
            floors: 1,
            site: Site::default(),
            extra: Map::new(),
        }
    }
}

/// Rectangular site footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub width: f64,
    pub depth: f64,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            width: DEFAULT_SITE_EDGE,
            depth: DEFAULT_SITE_EDGE,
        }
    }
}

impl Site {
    /// Site outline starting at the origin
    pub fn outline(&self) -> Polygon2D {
        Polygon2D::rectangle(Point2D::default(), self.width, self.depth)
    }
}

/// Plan shape tag of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RoomShape {
    #[default]
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "L-shaped")]
    LShaped,
    #[serde(rename = "circular")]
    Circular,
    #[serde(rename = "custom")]
    Custom,
}

impl RoomShape {
    /// Lenient tag parsing: unknown tags become `Custom`.
    pub fn from_tag(tag: &str) -> Self {
        let normalized: String = tag
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "rectangle" | "rectangular" | "rect" | "square" => RoomShape::Rectangle,
            "lshaped" | "lshape" | "l" => RoomShape::LShaped,
            "circular" | "circle" | "round" => RoomShape::Circular,
            _ => RoomShape::Custom,
        }
    }
}

/// A room on one floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub floor: u32,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub position: Point3D,
    pub shape: RoomShape,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Room {
    pub fn area(&self) -> f64 {
        self.width * self.depth
    }

    /// Rectangular plan footprint starting at the room's origin corner
    pub fn footprint(&self) -> Polygon2D {
        Polygon2D::rectangle(self.position.plan(), self.width, self.depth)
    }

    /// Footprint center at floor level
    pub fn center(&self) -> Point3D {
        self.position.offset(self.width / 2.0, self.depth / 2.0, 0.0)
    }

    /// Case-insensitive substring match against any feature tag
    pub fn has_feature(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.features
            .iter()
            .any(|f| f.to_lowercase().contains(&needle))
    }
}

/// A straight wall segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start: Point3D,
    /// Same z as `start`
    pub end: Point3D,
    pub height: f64,
    pub thickness: f64,
    pub material: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Wall {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Door or window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningType {
    Door,
    Window,
}

/// An opening hosted by a wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    #[serde(rename = "type")]
    pub kind: OpeningType,
    /// Index into the document's walls
    pub wall_id: usize,
    /// Distance along the wall from its start (meters)
    pub position: f64,
    pub width: f64,
    pub height: f64,
    pub style: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Column or beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StructuralElement {
    Column {
        position: Point3D,
        diameter: f64,
        height: f64,
    },
    Beam {
        start: Point3D,
        end: Point3D,
        cross_section: String,
    },
}

impl StructuralElement {
    pub fn is_column(&self) -> bool {
        matches!(self, StructuralElement::Column { .. })
    }
}

/// Roof and facade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Exterior {
    pub roof: Roof,
    pub facade: Facade,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roof {
    #[serde(rename = "type")]
    pub kind: String,
    /// Pitch in degrees
    pub pitch: f64,
}

impl Default for Roof {
    fn default() -> Self {
        Self {
            kind: "gabled".to_string(),
            pitch: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facade {
    pub material: String,
    pub color: String,
}

impl Default for Facade {
    fn default() -> Self {
        Self {
            material: "brick".to_string(),
            color: "red".to_string(),
        }
    }
}
