use serde::{Deserialize, Serialize};

/// Exterior wall material of a building.
///
/// Each material carries two calibrated constants: the loss added by
/// one wall traversal and the amplitude coefficient applied to a
/// specularly reflected signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallMaterial {
    Wood,
    ConcreteWithWindows,
    ConcreteWithoutWindows,
    StoneBlocks,
}

impl WallMaterial {
    /// Attenuation in dB for a single wall traversal.
    pub fn penetration_loss_db(&self) -> f64 {
        match self {
            WallMaterial::Wood => 20.0,
            WallMaterial::ConcreteWithWindows => 30.0,
            WallMaterial::ConcreteWithoutWindows => 30.0,
            WallMaterial::StoneBlocks => 40.0,
        }
    }

    /// Amplitude coefficient in [0, 1] for a specular reflection.
    pub fn reflection_coefficient(&self) -> f64 {
        match self {
            WallMaterial::Wood => 0.4,
            WallMaterial::ConcreteWithWindows => 0.6,
            WallMaterial::ConcreteWithoutWindows => 0.61,
            WallMaterial::StoneBlocks => 0.9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penetration_ordering() {
        // Heavier walls attenuate more
        assert!(
            WallMaterial::Wood.penetration_loss_db()
                < WallMaterial::ConcreteWithWindows.penetration_loss_db()
        );
        assert!(
            WallMaterial::ConcreteWithoutWindows.penetration_loss_db()
                < WallMaterial::StoneBlocks.penetration_loss_db()
        );
    }

    #[test]
    fn test_reflection_coefficients_in_range() {
        for m in [
            WallMaterial::Wood,
            WallMaterial::ConcreteWithWindows,
            WallMaterial::ConcreteWithoutWindows,
            WallMaterial::StoneBlocks,
        ] {
            let rho = m.reflection_coefficient();
            assert!(rho > 0.0 && rho < 1.0);
        }
    }
}
