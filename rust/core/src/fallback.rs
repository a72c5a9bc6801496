// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reading designs out of generated text, with a sample design to fall
//! back on when the text cannot be used.

use crate::document::{
    DesignDocument, Exterior, Opening, OpeningType, Project, Room, RoomShape, Site,
    StructuralElement, Wall, DEFAULT_STYLE,
};
use crate::error::{Error, Result};
use crate::normalize::normalize;
use archplan_geometry::Point3D;
use serde_json::{Map, Value};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Strip surrounding whitespace and a markdown code fence from a response.
///
/// Only a leading ` ```json ` and a trailing ` ``` ` are removed; anything
/// else is returned as-is for the JSON parser to judge.
pub fn extract_json_payload(response: &str) -> &str {
    let mut payload = response.trim();
    if let Some(rest) = payload.strip_prefix(JSON_FENCE) {
        payload = rest;
    }
    if let Some(rest) = payload.strip_suffix(FENCE) {
        payload = rest;
    }
    payload.trim()
}

/// Parse a generated response and normalize the design it contains
pub fn parse_design_response(response: &str) -> Result<DesignDocument> {
    let payload = extract_json_payload(response);
    let value: Value = serde_json::from_str(payload).map_err(|source| Error::Json {
        context: "generated response",
        source,
    })?;
    normalize(&value)
}

/// Like [`parse_design_response`], substituting [`fallback_design`] on failure
pub fn design_from_response(response: &str, prompt: &str) -> DesignDocument {
    match parse_design_response(response) {
        Ok(document) => document,
        Err(err) => {
            tracing::warn!(error = %err, "Generated response unusable, using fallback design");
            fallback_design(prompt)
        }
    }
}

/// Fixed four-room, two-floor sample design named after the prompt
pub fn fallback_design(prompt: &str) -> DesignDocument {
    let storey = 3.5;

    let rooms = vec![
        sample_room("Living Room", 1, (8.0, 6.0, 3.5), Point3D::origin(), RoomShape::Rectangle, &["fireplace", "large_windows"]),
        sample_room("Kitchen", 1, (6.0, 4.0, 3.5), Point3D::new(8.0, 0.0, 0.0), RoomShape::LShaped, &["island", "pantry"]),
        sample_room("Master Bedroom", 2, (6.0, 5.0, 3.2), Point3D::new(0.0, 0.0, storey), RoomShape::Rectangle, &["ensuite", "walk_in_closet"]),
        sample_room("Bathroom", 2, (3.0, 3.0, 3.2), Point3D::new(6.0, 0.0, storey), RoomShape::Rectangle, &["shower", "bathtub"]),
    ];

    let walls = vec![
        sample_wall(Point3D::origin(), Point3D::new(14.0, 0.0, 0.0)),
        sample_wall(Point3D::new(14.0, 0.0, 0.0), Point3D::new(14.0, 6.0, 0.0)),
    ];

    let openings = vec![
        Opening {
            kind: OpeningType::Door,
            wall_id: 0,
            position: 2.0,
            width: 0.9,
            height: 2.1,
            style: "standard".to_string(),
            extra: Map::new(),
        },
        Opening {
            kind: OpeningType::Window,
            wall_id: 0,
            position: 6.0,
            width: 1.5,
            height: 1.2,
            style: "casement".to_string(),
            extra: Map::new(),
        },
    ];

    DesignDocument {
        project: Project {
            name: format!("AI-Generated {}", prompt),
            style: DEFAULT_STYLE.to_string(),
            floors: 2,
            site: Site {
                width: 20.0,
                depth: 15.0,
            },
            extra: Map::new(),
        },
        rooms,
        walls,
        openings,
        structural: vec![StructuralElement::Column {
            position: Point3D::new(7.0, 3.0, 0.0),
            diameter: 0.3,
            height: 2.0 * storey,
        }],
        exterior: Exterior::default(),
        extra: Map::new(),
    }
}

fn sample_room(
    name: &str,
    floor: u32,
    (width, depth, height): (f64, f64, f64),
    position: Point3D,
    shape: RoomShape,
    features: &[&str],
) -> Room {
    Room {
        name: name.to_string(),
        floor,
        width,
        depth,
        height,
        position,
        shape,
        features: features.iter().map(|f| f.to_string()).collect(),
        extra: Map::new(),
    }
}

fn sample_wall(start: Point3D, end: Point3D) -> Wall {
    Wall {
        start,
        end,
        height: 3.5,
        thickness: 0.2,
        material: "concrete".to_string(),
        extra: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_with_report;

    #[test]
    fn test_extract_fenced_payload() {
        let response = "  ```json\n{\"rooms\": []}\n```  \n";
        assert_eq!(extract_json_payload(response), "{\"rooms\": []}");
    }

    #[test]
    fn test_extract_plain_payload() {
        assert_eq!(extract_json_payload("\n{\"a\": 1}\n"), "{\"a\": 1}");
        // Unlabelled fences are only stripped at the end
        assert_eq!(extract_json_payload("```\n{}\n```"), "```\n{}");
    }

    #[test]
    fn test_parse_response() {
        let doc = parse_design_response("```json\n{\"project\": {\"name\": \"Kiosk\"}}\n```").unwrap();
        assert_eq!(doc.project.name, "Kiosk");
        assert_eq!(doc.rooms.len(), 1);

        let err = parse_design_response("Sorry, I cannot help with that.").unwrap_err();
        assert_eq!(err.section(), "generated response");
    }

    #[test]
    fn test_unusable_response_falls_back() {
        let doc = design_from_response("not json", "courtyard house");
        assert_eq!(doc.project.name, "AI-Generated courtyard house");
        assert_eq!(doc.rooms.len(), 4);
        assert_eq!(doc.project.floors, 2);
    }

    #[test]
    fn test_fallback_is_already_normal() {
        let fallback = fallback_design("studio");
        let (normalized, report) = normalize_with_report(&fallback.to_value().unwrap()).unwrap();
        assert_eq!(normalized, fallback);
        assert!(report.is_clean(), "unexpected repairs: {:?}", report.repairs);
    }
}
