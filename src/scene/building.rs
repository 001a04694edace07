use crate::Bounds;
use crate::scene::material::WallMaterial;
use serde::{Deserialize, Serialize};

/// Broad usage category of a building.
///
/// Carried as an opaque tag; the loss model reads only the boundaries
/// and the wall material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Residential,
    Office,
    Commercial,
}

/// A rectilinear building: boundaries, exterior walls, usage tag.
///
/// Buildings are created by the scene builder, registered once and
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Building {
    bounds: Bounds,
    walls: WallMaterial,
    kind: BuildingKind,
}

impl Building {
    pub fn new(bounds: Bounds, walls: WallMaterial, kind: BuildingKind) -> Self {
        Self {
            bounds,
            walls,
            kind,
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn walls(&self) -> WallMaterial {
        self.walls
    }

    pub fn kind(&self) -> BuildingKind {
        self.kind
    }
}
