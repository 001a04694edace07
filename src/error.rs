use thiserror::Error;

/// Errors that can abort a propagation loss query.
///
/// These are scene errors on the caller's side: the engine cannot
/// produce a meaningful loss for them. Modeling ambiguities (an
/// unreachable diffraction corner, an inconsistent corner count in
/// line of sight) are not errors; they are logged and fall back to
/// conservative values inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PropagationError {
    /// A node reports a position below ground level.
    #[error("node placed underground (z = {z})")]
    InvalidNodePosition { z: f64 },

    /// A node lies strictly within a building footprint.
    #[error("node at ({x}, {y}) is inside a building footprint")]
    InsideBuilding { x: f64, y: f64 },
}
