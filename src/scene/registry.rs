use crate::scene::building::Building;

/// Ordered collection of the buildings in a scene.
///
/// Populated while the scene is built, then handed to the loss engine
/// and only read. There is no removal; a scene is torn down by
/// dropping the registry.
#[derive(Debug, Clone, Default)]
pub struct BuildingRegistry {
    buildings: Vec<Building>,
}

impl BuildingRegistry {
    pub fn new() -> Self {
        Self {
            buildings: Vec::new(),
        }
    }

    /// Registers a building and returns its index.
    pub fn add(&mut self, building: Building) -> usize {
        self.buildings.push(building);
        self.buildings.len() - 1
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Building> {
        self.buildings.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter()
    }
}
