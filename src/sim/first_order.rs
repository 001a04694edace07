//! First-order buildings-aware path loss.
//!
//! The engine selects the dominant propagation path between two nodes
//! out of four candidate mechanisms: direct line of sight,
//! through-wall penetration, single-corner diffraction and
//! single-surface specular reflection. Higher-order interactions
//! (cascaded reflections, multi-corner diffraction chains, vertical
//! diffraction) are out of the model's scope; it aims for a realistic
//! ordering of regimes, not a calibrated prediction.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PropagationError;
use crate::geom::EPS;
use crate::mobility::Mobility;
use crate::scene::registry::BuildingRegistry;
use crate::sim::itu_r_1411::ItuR1411LosModel;
use crate::sim::model::PropagationLossModel;
use crate::sim::sight::{self, DiffractionCorners};
use crate::{Building, Point};

/// Default carrier frequency, Hz.
pub const DEFAULT_FREQUENCY: f64 = 2.160e9;

/// Default transmit gain, dBm.
pub const DEFAULT_TX_GAIN_DBM: f64 = 20.0;

/// Above this base loss the scene is treated as free-space dominated:
/// reflection and diffraction contributions are negligible relative
/// to the segment loss itself.
const FREE_SPACE_THRESHOLD_DB: f64 = 90.0;

// Soft-knee diffraction attenuation curve constants
const DIFF_A: f64 = 0.70;
const DIFF_B: f64 = 24.9;
const DIFF_C: f64 = 3.555;
const DIFF_D: f64 = 31.7;

/// Deterministic dominant-path loss engine over a building scene.
///
/// Owns the building registry, the line-of-sight collaborator and one
/// random stream for the noise term. All queries are synchronous and,
/// for a fixed stream, reproducible.
pub struct FirstOrderBuildingsAwareLossModel {
    registry: BuildingRegistry,
    itu: ItuR1411LosModel,
    tx_gain_dbm: f64,
    noise_enabled: bool,
    rng: StdRng,
}

impl FirstOrderBuildingsAwareLossModel {
    /// Creates an engine over `registry` with an explicit carrier
    /// frequency (Hz) and transmit gain (dBm).
    pub fn new(registry: BuildingRegistry, frequency: f64, tx_gain_dbm: f64) -> Self {
        Self {
            registry,
            itu: ItuR1411LosModel::new(frequency),
            tx_gain_dbm,
            noise_enabled: true,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an engine with the default frequency (2.16 GHz) and
    /// transmit gain (20 dBm).
    pub fn with_defaults(registry: BuildingRegistry) -> Self {
        Self::new(registry, DEFAULT_FREQUENCY, DEFAULT_TX_GAIN_DBM)
    }

    pub fn registry(&self) -> &BuildingRegistry {
        &self.registry
    }

    /// Updates the carrier frequency; forwarded to the line-of-sight
    /// collaborator.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.itu.set_frequency(frequency);
    }

    /// Updates the transmit gain used by the reflection mechanism.
    pub fn set_gain(&mut self, tx_gain_dbm: f64) {
        self.tx_gain_dbm = tx_gain_dbm;
    }

    /// Turns the additive noise term on or off. Intended for tests and
    /// calibration runs; defaults to on.
    pub fn set_noise_enabled(&mut self, enabled: bool) {
        self.noise_enabled = enabled;
    }

    fn compute_loss(&mut self, rx: Point, tx: Point) -> Result<f64, PropagationError> {
        if rx.z < 0.0 {
            return Err(PropagationError::InvalidNodePosition { z: rx.z });
        }
        if tx.z < 0.0 {
            return Err(PropagationError::InvalidNodePosition { z: tx.z });
        }

        let base = self.itu.loss(rx, tx);
        debug!("base line-of-sight loss: {:.3} dB", base);

        let all: Vec<&Building> = self.registry.iter().collect();
        let blockers = sight::buildings_between(rx, tx, &all)?;

        if base > FREE_SPACE_THRESHOLD_DB {
            return Ok(base + self.noise(base));
        }

        if !blockers.is_empty() {
            let direct = base + self.penetration_loss(&blockers);
            let diffracted = base + self.obstructed_diffraction_loss(&blockers, &all, rx, tx)?;
            let reflected = self.reflection_loss(&all, rx, tx)?;
            debug!(
                "candidates: direct {:.3} dB, diffracted {:.3} dB, reflected {:.3} dB",
                direct, diffracted, reflected
            );
            let loss = direct.min(diffracted).min(reflected);
            return Ok(loss + self.noise(loss));
        }

        let loss = base + self.grazing_diffraction_loss(&all, rx, tx)?;
        Ok(loss + self.noise(loss))
    }

    /// Through-wall loss: two traversals (entry and exit) per blocking
    /// building.
    fn penetration_loss(&self, blockers: &[&Building]) -> f64 {
        blockers
            .iter()
            .map(|b| 2.0 * b.walls().penetration_loss_db())
            .sum()
    }

    /// Diffraction loss when the direct segment is obstructed.
    ///
    /// Dominant-path principle: the first blocking building with a
    /// corner whose path to the transmitter is clear decides the
    /// mechanism. With no viable corner the mechanism is invalidated
    /// (+inf loses the minimum arbitration).
    fn obstructed_diffraction_loss(
        &self,
        blockers: &[&Building],
        all: &[&Building],
        rx: Point,
        tx: Point,
    ) -> Result<f64, PropagationError> {
        for &building in blockers {
            match sight::diffraction_corners(building, rx, tx) {
                DiffractionCorners::None => {}
                DiffractionCorners::Single(corner) => {
                    if sight::buildings_between(corner, tx, all)?.is_empty() {
                        let theta = planar_angle(tx, corner, rx);
                        debug!("diffraction at {:.2} with theta {:.2} deg", corner, theta);
                        return Ok(diffraction_attenuation(theta));
                    }
                }
                DiffractionCorners::Pair(first, second) => {
                    let first_clear = sight::buildings_between(first, tx, all)?.is_empty();
                    let second_clear = sight::buildings_between(second, tx, all)?.is_empty();
                    if first_clear || second_clear {
                        let theta_1 = planar_angle(tx, first, rx);
                        let theta_2 = planar_angle(tx, second, rx);
                        debug!(
                            "diffraction at {:.2} / {:.2} with thetas {:.2} / {:.2} deg",
                            first, second, theta_1, theta_2
                        );
                        return Ok(
                            diffraction_attenuation(theta_1).min(diffraction_attenuation(theta_2))
                        );
                    }
                }
            }
        }
        Ok(f64::INFINITY)
    }

    /// Grazing diffraction added on top of an unobstructed segment
    /// when a nearby corner intrudes on the link.
    ///
    /// The bending angle is negated (the corner sits outside the
    /// direct line); the strongest non-negative contribution across
    /// buildings is kept.
    fn grazing_diffraction_loss(
        &self,
        all: &[&Building],
        rx: Point,
        tx: Point,
    ) -> Result<f64, PropagationError> {
        let mut strongest: Option<f64> = None;
        for &building in all {
            match sight::diffraction_corners(building, rx, tx) {
                DiffractionCorners::None => {}
                DiffractionCorners::Single(corner) => {
                    if sight::buildings_between(corner, tx, all)?.is_empty() {
                        let theta = -planar_angle(tx, corner, rx);
                        debug!("grazing diffraction at {:.2} with theta {:.2} deg", corner, theta);
                        let candidate = diffraction_attenuation(theta);
                        strongest = Some(strongest.map_or(candidate, |s: f64| s.max(candidate)));
                    }
                }
                DiffractionCorners::Pair(_, _) => {
                    warn!(
                        "a building in line of sight can contribute at most one diffraction corner"
                    );
                    return Ok(0.0);
                }
            }
        }
        match strongest {
            Some(bonus) if bonus >= 0.0 => Ok(bonus),
            _ => Ok(0.0),
        }
    }

    /// Best single-surface specular reflection across the scene.
    ///
    /// A building must not occlude its own reflection: both legs are
    /// checked against the mirror building only.
    fn reflection_loss(
        &self,
        all: &[&Building],
        rx: Point,
        tx: Point,
    ) -> Result<f64, PropagationError> {
        let mut best: Option<f64> = None;
        for &building in all {
            let Some(mirror) = sight::reflection_point(building, rx, tx) else {
                continue;
            };
            let own = [building];
            if !sight::buildings_between(mirror, rx, &own)?.is_empty()
                || !sight::buildings_between(mirror, tx, &own)?.is_empty()
            {
                continue;
            }
            let rho = building.walls().reflection_coefficient();
            let leg_tx = self.itu.loss(tx, mirror);
            let leg_rx = self.itu.loss(mirror, rx);
            debug!(
                "reflection at {:.2}: legs {:.3} dB / {:.3} dB, rho {}",
                mirror, leg_tx, leg_rx, rho
            );
            let candidate = self.tx_gain_dbm - reflected_gain(self.tx_gain_dbm, rho, leg_tx, leg_rx);
            best = Some(best.map_or(candidate, |b: f64| b.min(candidate)));
        }
        Ok(best.unwrap_or(f64::INFINITY))
    }

    /// Additive noise proportional to the loss magnitude, drawn
    /// uniformly from the engine's own stream.
    fn noise(&mut self, loss: f64) -> f64 {
        if !self.noise_enabled {
            return 0.0;
        }
        let y = 0.25 * loss + 5.0;
        let bound = (1.1 * y - 0.9 * y).abs();
        self.rng.gen_range(-bound..=bound)
    }
}

impl PropagationLossModel for FirstOrderBuildingsAwareLossModel {
    fn loss(&mut self, rx: &dyn Mobility, tx: &dyn Mobility) -> Result<f64, PropagationError> {
        self.compute_loss(rx.position(), tx.position())
    }

    fn assign_streams(&mut self, first_stream: i64) -> i64 {
        self.rng = StdRng::seed_from_u64(first_stream as u64);
        1
    }
}

/// Signal gain left after one reflection, dBm.
///
/// A budget still positive at the mirror is scaled by the material
/// coefficient; a budget already negative is scaled by `(2 - rho)`
/// instead.
fn reflected_gain(tx_gain_dbm: f64, rho: f64, leg_tx_db: f64, leg_rx_db: f64) -> f64 {
    let first_half = tx_gain_dbm - leg_tx_db;
    if first_half > 0.0 {
        first_half * rho - leg_rx_db
    } else {
        first_half * (2.0 - rho) - leg_rx_db
    }
}

/// Plan-view bending angle in degrees at `corner` between the
/// incoming direction from `tx` and the outgoing direction to `rx`.
fn planar_angle(tx: Point, corner: Point, rx: Point) -> f64 {
    let incoming = (corner - tx).horizontal();
    let outgoing = (rx - corner).horizontal();
    let magnitudes = incoming.length() * outgoing.length();
    if magnitudes < EPS {
        return 0.0;
    }
    let cos_theta = (incoming.dot(outgoing) / magnitudes).clamp(-1.0, 1.0);
    cos_theta.acos().to_degrees()
}

/// Attenuation in dB as a function of the bending angle in degrees.
fn diffraction_attenuation(theta_deg: f64) -> f64 {
    -DIFF_A / ((theta_deg / DIFF_B) - DIFF_C).exp() + DIFF_D
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bounds, BuildingKind, WallMaterial};

    fn single_building_registry(material: WallMaterial) -> BuildingRegistry {
        let mut registry = BuildingRegistry::new();
        let bounds = Bounds::new(20., 25., 20., 25., 0., 15.).unwrap();
        registry.add(Building::new(bounds, material, BuildingKind::Residential));
        registry
    }

    #[test]
    fn test_diffraction_attenuation_curve() {
        // Straight-through bending is cheap, right-angle bending is
        // close to the curve's plateau.
        let straight = diffraction_attenuation(0.0);
        let right_angle = diffraction_attenuation(90.0);
        assert!((straight - 7.209).abs() < 0.01, "got {}", straight);
        assert!((right_angle - 31.040).abs() < 0.01, "got {}", right_angle);
        assert!(straight < diffraction_attenuation(10.0));
        assert!(diffraction_attenuation(10.0) < right_angle);
    }

    #[test]
    fn test_planar_angle_ignores_height() {
        let tx = Point::new(0., 0., 5.);
        let corner = Point::new(10., 0., 0.);
        let rx = Point::new(20., 10., 9.);
        let theta = planar_angle(tx, corner, rx);
        assert!((theta - 45.0).abs() < 1e-9, "got {}", theta);
    }

    #[test]
    fn test_planar_angle_straight_line() {
        let tx = Point::new(0., 0., 5.);
        let corner = Point::new(10., 10., 0.);
        let rx = Point::new(20., 20., 5.);
        assert!(planar_angle(tx, corner, rx).abs() < 1e-9);
    }

    #[test]
    fn test_reflected_gain_branches() {
        // Positive budget at the mirror: scaled down by rho
        let gain = reflected_gain(20.0, 0.5, 10.0, 30.0);
        assert!((gain - (10.0 * 0.5 - 30.0)).abs() < 1e-12);
        // Negative budget: scaled by (2 - rho)
        let gain = reflected_gain(20.0, 0.5, 50.0, 30.0);
        assert!((gain - (-30.0 * 1.5 - 30.0)).abs() < 1e-12);
    }

    #[test]
    fn test_penetration_loss_sums_two_traversals() {
        let registry = single_building_registry(WallMaterial::StoneBlocks);
        let engine = FirstOrderBuildingsAwareLossModel::with_defaults(registry);
        let all: Vec<&Building> = engine.registry.iter().collect();
        assert_eq!(engine.penetration_loss(&all), 80.0);
    }

    #[test]
    fn test_underground_node_is_rejected() {
        let registry = single_building_registry(WallMaterial::Wood);
        let mut engine = FirstOrderBuildingsAwareLossModel::with_defaults(registry);
        let below = Point::new(0., 0., -1.);
        let above = Point::new(10., 0., 5.);
        let err = engine.loss(&below, &above).unwrap_err();
        assert_eq!(err, PropagationError::InvalidNodePosition { z: -1. });
    }

    #[test]
    fn test_node_inside_building_is_rejected() {
        let registry = single_building_registry(WallMaterial::Wood);
        let mut engine = FirstOrderBuildingsAwareLossModel::with_defaults(registry);
        let inside = Point::new(22., 22., 5.);
        let outside = Point::new(10., 10., 5.);
        assert!(matches!(
            engine.loss(&inside, &outside),
            Err(PropagationError::InsideBuilding { .. })
        ));
    }

    #[test]
    fn test_noise_respects_bound() {
        let registry = BuildingRegistry::new();
        let mut engine = FirstOrderBuildingsAwareLossModel::with_defaults(registry);
        engine.assign_streams(7);
        for loss in [0.0, 30.0, 60.0, 120.0] {
            let bound = 0.2 * (0.25 * loss + 5.0);
            for _ in 0..200 {
                let n = engine.noise(loss);
                assert!(n.abs() <= bound + 1e-12, "noise {} exceeds {}", n, bound);
            }
        }
    }

    #[test]
    fn test_noise_disabled() {
        let registry = BuildingRegistry::new();
        let mut engine = FirstOrderBuildingsAwareLossModel::with_defaults(registry);
        engine.set_noise_enabled(false);
        assert_eq!(engine.noise(60.0), 0.0);
    }

    #[test]
    fn test_assign_streams_reproducible() {
        let mut engine_a =
            FirstOrderBuildingsAwareLossModel::with_defaults(BuildingRegistry::new());
        let mut engine_b =
            FirstOrderBuildingsAwareLossModel::with_defaults(BuildingRegistry::new());
        assert_eq!(engine_a.assign_streams(42), 1);
        assert_eq!(engine_b.assign_streams(42), 1);
        for _ in 0..32 {
            assert_eq!(engine_a.noise(50.0), engine_b.noise(50.0));
        }
    }

    #[test]
    fn test_calc_rx_power() {
        let registry = single_building_registry(WallMaterial::Wood);
        let mut engine = FirstOrderBuildingsAwareLossModel::with_defaults(registry);
        engine.set_noise_enabled(false);
        let a = Point::new(15., 15., 5.);
        let b = Point::new(15., 30., 5.);
        let loss = engine.loss(&a, &b).unwrap();
        let rx_power = engine.calc_rx_power(16.0, &a, &b).unwrap();
        assert!((rx_power - (16.0 - loss)).abs() < 1e-12);
    }
}
