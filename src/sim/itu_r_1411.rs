//! ITU-R P.1411 line-of-sight loss.
//!
//! Site-general model for propagation within street canyons: below
//! the breakpoint distance the loss grows at 20-25 dB per decade,
//! beyond it at 40 dB per decade. The model returns the mean of the
//! lower and upper bound curves.

use crate::Point;

/// Speed of light in vacuum, m/s.
const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Ideal line-of-sight loss for a 3D segment at a fixed frequency.
///
/// Pure function of the two endpoints; the endpoint z coordinates are
/// the antenna heights and must be positive for the breakpoint
/// geometry to exist.
#[derive(Debug, Clone, Copy)]
pub struct ItuR1411LosModel {
    frequency: f64,
    lambda: f64,
}

impl ItuR1411LosModel {
    /// Creates the model for a carrier frequency in Hz.
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            lambda: SPEED_OF_LIGHT / frequency,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
        self.lambda = SPEED_OF_LIGHT / frequency;
    }

    /// Loss in dB over the segment between `a` and `b`.
    pub fn loss(&self, a: Point, b: Point) -> f64 {
        let dist = a.distance_to(&b);
        if dist == 0.0 {
            return 0.0;
        }

        let height_product = a.z * b.z;
        let breakpoint_ratio =
            self.lambda * self.lambda / (8.0 * std::f64::consts::PI * height_product);
        let l_bp = (20.0 * breakpoint_ratio.log10()).abs();
        let r_bp = 4.0 * height_product / self.lambda;

        let (lower, upper) = if dist <= r_bp {
            (
                l_bp + 20.0 * (dist / r_bp).log10(),
                l_bp + 20.0 + 25.0 * (dist / r_bp).log10(),
            )
        } else {
            (
                l_bp + 40.0 * (dist / r_bp).log10(),
                l_bp + 20.0 + 40.0 * (dist / r_bp).log10(),
            )
        };

        (lower + upper) / 2.0
    }
}
