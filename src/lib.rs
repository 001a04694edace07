pub mod error;
pub mod geom;
pub mod mobility;
pub mod scene;
pub mod sim;

// Prelude
pub use error::PropagationError;
pub use geom::bounds::Bounds;
pub use geom::point::Point;
pub use geom::vector::Vector;
pub use mobility::{ConstantPositionMobility, Mobility};
pub use scene::building::{Building, BuildingKind};
pub use scene::material::WallMaterial;
pub use scene::registry::BuildingRegistry;
pub use sim::first_order::FirstOrderBuildingsAwareLossModel;
pub use sim::itu_r_1411::ItuR1411LosModel;
pub use sim::model::PropagationLossModel;
