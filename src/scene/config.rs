//! Scene description loading and validation.
//!
//! A scene can be described in JSON and turned into a
//! [`BuildingRegistry`]. Boundary validation happens while the
//! registry is built, so a malformed description fails before the
//! first loss query.

use crate::Bounds;
use crate::scene::building::{Building, BuildingKind};
use crate::scene::material::WallMaterial;
use crate::scene::registry::BuildingRegistry;
use anyhow::{Context, Result};
use serde::Deserialize;

/// One building in a scene description.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildingDescription {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    pub walls: WallMaterial,
    pub kind: BuildingKind,
}

/// A full scene: the set of buildings the engine will see.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDescription {
    pub buildings: Vec<BuildingDescription>,
}

impl SceneDescription {
    /// Parses a scene from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse scene description")
    }

    /// Validates the description and builds the registry.
    pub fn into_registry(self) -> Result<BuildingRegistry> {
        let mut registry = BuildingRegistry::new();
        for (i, b) in self.buildings.into_iter().enumerate() {
            let bounds = Bounds::new(b.x_min, b.x_max, b.y_min, b.y_max, b.z_min, b.z_max)
                .with_context(|| format!("building {} has invalid boundaries", i))?;
            registry.add(Building::new(bounds, b.walls, b.kind));
        }
        Ok(registry)
    }
}

/// Convenience: JSON string straight to a registry.
pub fn load_scene_str(json: &str) -> Result<BuildingRegistry> {
    SceneDescription::from_json(json)?.into_registry()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "buildings": [
            {
                "x_min": 20.0, "x_max": 25.0,
                "y_min": 20.0, "y_max": 25.0,
                "z_min": 0.0, "z_max": 15.0,
                "walls": "ConcreteWithWindows",
                "kind": "Residential"
            }
        ]
    }"#;

    #[test]
    fn test_load_scene() {
        let registry = load_scene_str(SCENE).unwrap();
        assert_eq!(registry.len(), 1);
        let b = registry.get(0).unwrap();
        assert_eq!(b.walls(), WallMaterial::ConcreteWithWindows);
        assert_eq!(b.bounds().z_max(), 15.0);
    }

    #[test]
    fn test_reject_bad_boundaries() {
        let bad = r#"{
            "buildings": [
                {
                    "x_min": 25.0, "x_max": 20.0,
                    "y_min": 20.0, "y_max": 25.0,
                    "z_min": 0.0, "z_max": 15.0,
                    "walls": "Wood",
                    "kind": "Office"
                }
            ]
        }"#;
        assert!(load_scene_str(bad).is_err());
    }

    #[test]
    fn test_reject_malformed_json() {
        assert!(load_scene_str("{ not json").is_err());
    }
}
