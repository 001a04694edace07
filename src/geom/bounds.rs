//! Axis-aligned boxes.
//!
//! A `Bounds` is the rectilinear volume occupied by a building:
//! a footprint in the xy plane extruded from `z_min` to `z_max`.

use crate::Point;
use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Axis-aligned box with immutable boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    z_min: f64,
    z_max: f64,
}

impl Bounds {
    /// Creates a validated box.
    ///
    /// Requires `x_min < x_max`, `y_min < y_max` and `0 <= z_min < z_max`
    /// (buildings do not extend underground).
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, z_min: f64, z_max: f64) -> Result<Self> {
        ensure!(x_min < x_max, "degenerate x extent: [{}, {}]", x_min, x_max);
        ensure!(y_min < y_max, "degenerate y extent: [{}, {}]", y_min, y_max);
        ensure!(z_min >= 0., "negative base height: {}", z_min);
        ensure!(z_min < z_max, "degenerate z extent: [{}, {}]", z_min, z_max);
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min,
            z_max,
        })
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn z_min(&self) -> f64 {
        self.z_min
    }

    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// The four plan corners of the footprint at z = 0,
    /// counter-clockwise from (x_min, y_min).
    pub fn plan_corners(&self) -> [Point; 4] {
        [
            Point::new(self.x_min, self.y_min, 0.),
            Point::new(self.x_max, self.y_min, 0.),
            Point::new(self.x_max, self.y_max, 0.),
            Point::new(self.x_min, self.y_max, 0.),
        ]
    }

    /// Checks whether the closed segment pq meets the closed box.
    ///
    /// Slab method: the segment is clipped against the three axis slabs
    /// in turn. Comparisons are inclusive, so a segment grazing a face,
    /// an edge or a corner counts as intersecting.
    pub fn intersects_segment(&self, p: Point, q: Point) -> bool {
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        let slabs = [
            (self.x_min, self.x_max, p.x, q.x),
            (self.y_min, self.y_max, p.y, q.y),
            (self.z_min, self.z_max, p.z, q.z),
        ];
        for (lo, hi, a, b) in slabs {
            let d = b - a;
            if d == 0.0 {
                // Segment parallel to the slab: either entirely in or out.
                if a < lo || a > hi {
                    return false;
                }
            } else {
                let mut ta = (lo - a) / d;
                let mut tb = (hi - a) / d;
                if ta > tb {
                    std::mem::swap(&mut ta, &mut tb);
                }
                t0 = t0.max(ta);
                t1 = t1.min(tb);
                if t0 > t1 {
                    return false;
                }
            }
        }
        true
    }
}
