//! Element description files.
//!
//! A diagram editor knows the geometry of every element; a snapshot on disk
//! does not. The CLI reads that geometry from a TOML file listing one
//! `[[element]]` table per element:
//!
//! ```toml
//! [[element]]
//! id = "SubProcess_1"
//! x = 150
//! y = 100
//! width = 120
//! height = 80
//!
//! [[element]]
//! id = "Task_1"
//! parent = "SubProcess_1"
//! x = 160
//! y = 110
//! width = 20
//! height = 20
//!
//! [[element]]
//! id = "Flow_1"
//! waypoints = [[50, 35], [70, 20]]
//! ```

use std::{fs, io, path::Path};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use cameo::{
    CameoError,
    element::Element,
    geometry::{Bounds, Point, Size},
    identifier::ElementId,
    registry::{ElementRegistry, InMemoryRegistry},
};

/// Errors in an element description file.
#[derive(Debug, Error)]
pub enum ElementFileError {
    #[error("Failed to parse element file: {0}")]
    Parse(String),

    #[error("Element `{0}` needs either x/y/width/height or waypoints")]
    MissingGeometry(String),

    #[error("Element `{0}` has both a box and waypoints")]
    AmbiguousGeometry(String),

    #[error("Element `{0}` is listed more than once")]
    Duplicate(String),
}

impl From<ElementFileError> for CameoError {
    fn from(err: ElementFileError) -> Self {
        CameoError::Io(io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

#[derive(Debug, Deserialize)]
struct ElementFile {
    #[serde(default, rename = "element")]
    elements: Vec<ElementEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementEntry {
    id: String,
    parent: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    waypoints: Option<Vec<Point>>,
}

impl ElementEntry {
    fn into_element(self) -> Result<Element, ElementFileError> {
        let has_box = self.x.is_some()
            || self.y.is_some()
            || self.width.is_some()
            || self.height.is_some();

        let element = match (self.waypoints, has_box) {
            (Some(_), true) => return Err(ElementFileError::AmbiguousGeometry(self.id)),
            (Some(waypoints), false) if !waypoints.is_empty() => {
                Element::connection(self.id.as_str(), waypoints)
            }
            (Some(_), false) => return Err(ElementFileError::MissingGeometry(self.id)),
            (None, _) => match (self.x, self.y, self.width, self.height) {
                (Some(x), Some(y), Some(width), Some(height)) => Element::shape(
                    self.id.as_str(),
                    Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height)),
                ),
                _ => return Err(ElementFileError::MissingGeometry(self.id)),
            },
        };

        Ok(match self.parent {
            Some(parent) => element.with_parent(parent),
            None => element,
        })
    }
}

/// Parses an element description into a registry.
///
/// # Errors
///
/// Returns [`ElementFileError`] for malformed TOML, elements without usable
/// geometry, and duplicate identifiers.
pub fn parse_elements(content: &str) -> Result<InMemoryRegistry, ElementFileError> {
    let file: ElementFile =
        toml::from_str(content).map_err(|e| ElementFileError::Parse(e.to_string()))?;

    let mut registry = InMemoryRegistry::new();
    for entry in file.elements {
        if registry.contains(&ElementId::new(&entry.id)) {
            return Err(ElementFileError::Duplicate(entry.id));
        }
        let element = entry.into_element()?;
        debug!(id:% = element.id(); "Element registered");
        registry.add(element);
    }

    Ok(registry)
}

/// Reads and parses an element description file.
///
/// # Errors
///
/// Returns [`CameoError::Io`] if the file cannot be read or is invalid.
pub fn load_elements(path: impl AsRef<Path>) -> Result<InMemoryRegistry, CameoError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let registry = parse_elements(&content)?;

    info!(path = path.display().to_string(), elements = registry.len(); "Elements loaded");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_connections_and_parents() {
        let registry = parse_elements(
            r#"
            [[element]]
            id = "Cli_Sub"
            x = 150
            y = 100
            width = 120
            height = 80

            [[element]]
            id = "Cli_Task"
            parent = "Cli_Sub"
            x = 160.5
            y = 110
            width = 20
            height = 20

            [[element]]
            id = "Cli_Flow"
            waypoints = [[50, 35], [70, 20]]
            "#,
        )
        .unwrap();

        assert_eq!(registry.len(), 3);

        let sub = registry.get(&ElementId::new("Cli_Sub")).unwrap();
        assert_eq!(sub.children(), &[ElementId::new("Cli_Task")]);

        let task = registry.get(&ElementId::new("Cli_Task")).unwrap();
        assert_eq!(task.bounds().unwrap().min_x(), 160.5);

        let flow = registry.get(&ElementId::new("Cli_Flow")).unwrap();
        let bounds = flow.bounds().unwrap();
        assert_eq!((bounds.width(), bounds.height()), (20.0, 15.0));
    }

    #[test]
    fn test_empty_file_is_empty_registry() {
        assert!(parse_elements("").unwrap().is_empty());
    }

    #[test]
    fn test_incomplete_box_is_rejected() {
        let err = parse_elements("[[element]]\nid = \"Cli_Half\"\nx = 1\ny = 2\n").unwrap_err();
        assert!(matches!(err, ElementFileError::MissingGeometry(id) if id == "Cli_Half"));
    }

    #[test]
    fn test_box_and_waypoints_are_rejected() {
        let err = parse_elements(
            "[[element]]\nid = \"Cli_Both\"\nx = 1\nwaypoints = [[0, 0], [1, 1]]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ElementFileError::AmbiguousGeometry(_)));
    }

    #[test]
    fn test_empty_waypoints_are_rejected() {
        let err = parse_elements("[[element]]\nid = \"Cli_None\"\nwaypoints = []\n").unwrap_err();
        assert!(matches!(err, ElementFileError::MissingGeometry(_)));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = parse_elements(
            "[[element]]\nid = \"Cli_Dup\"\nwaypoints = [[0, 0]]\n\n[[element]]\nid = \"Cli_Dup\"\nwaypoints = [[1, 1]]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ElementFileError::Duplicate(_)));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = parse_elements("[[element]]\nid = \"Cli_Typo\"\nwidht = 3\n").unwrap_err();
        assert!(matches!(err, ElementFileError::Parse(_)));
    }

    #[test]
    fn test_invalid_file_maps_to_invalid_data() {
        let err: CameoError = ElementFileError::Parse("bad".to_string()).into();
        assert!(matches!(err, CameoError::Io(e) if e.kind() == io::ErrorKind::InvalidData));
    }
}
