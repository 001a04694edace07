//! Line-of-sight assessment between node pairs and buildings.
//!
//! Decisions are made zone-first: most pairs are declared in or out
//! of sight from the zone combination alone (comparisons only), and
//! the line/box intersection runs only for the ambiguous diagonal and
//! strip pairings. The same zone pairs drive the enumeration of
//! diffraction corners and the construction of specular reflection
//! points.

use crate::error::PropagationError;
use crate::geom::nearly_zero;
use crate::sim::zone::Zone;
use crate::{Bounds, Building, Point};

/// Plan corners of a building that can bend a signal between two
/// nodes. At most two corners qualify (opposite-quadrant pairs).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiffractionCorners {
    None,
    Single(Point),
    Pair(Point, Point),
}

/// Returns the subset of `buildings` that block the segment pq.
///
/// Fails if either endpoint lies strictly inside a footprint; a node
/// embedded in a wall is a scene construction error the caller must
/// see.
pub fn buildings_between<'a>(
    p: Point,
    q: Point,
    buildings: &[&'a Building],
) -> Result<Vec<&'a Building>, PropagationError> {
    let mut blocking = Vec::new();
    for &building in buildings {
        let bounds = building.bounds();
        let zone_p = Zone::of(p, bounds);
        let zone_q = Zone::of(q, bounds);
        if zone_p == Zone::Inside {
            return Err(PropagationError::InsideBuilding { x: p.x, y: p.y });
        }
        if zone_q == Zone::Inside {
            return Err(PropagationError::InsideBuilding { x: q.x, y: q.y });
        }
        if default_los(zone_p, zone_q) {
            continue;
        }
        if default_nlos(zone_p, zone_q) {
            blocking.push(building);
            continue;
        }
        if p.z >= bounds.z_max() && q.z >= bounds.z_max() {
            // Both endpoints at or above the rooftop
            continue;
        }
        if crosses_building(p, q, bounds) {
            blocking.push(building);
        }
    }
    Ok(blocking)
}

/// Zone pairs that can never be blocked by this building: both points
/// on the same side, or around a shared corner quadrant.
fn default_los(a: Zone, b: Zone) -> bool {
    use Zone::*;
    matches!(
        (a, b),
        (A, A)
            | (B, B)
            | (C, C)
            | (D, D)
            | (E, E)
            | (F, F)
            | (G, G)
            | (H, H)
            | (A, B)
            | (B, A)
            | (A, C)
            | (C, A)
            | (A, H)
            | (H, A)
            | (B, C)
            | (C, B)
            | (C, D)
            | (D, C)
            | (C, E)
            | (E, C)
            | (D, E)
            | (E, D)
            | (E, F)
            | (F, E)
            | (E, G)
            | (G, E)
            | (F, G)
            | (G, F)
            | (G, H)
            | (H, G)
            | (A, G)
            | (G, A)
    )
}

/// Zone pairs that straddle the building along a principal axis and
/// are always blocked.
fn default_nlos(a: Zone, b: Zone) -> bool {
    use Zone::*;
    matches!((a, b), (H, D) | (D, H) | (B, F) | (F, B))
}

/// Resolves the ambiguous zone pairs: diagonal quadrants and
/// strip-to-quadrant combinations.
///
/// A segment running inside a wall plane (shared x or y coordinate
/// equal to a building face) grazes the building and counts as
/// blocked; everything else is decided by the exact segment/box
/// intersection.
fn crosses_building(p: Point, q: Point, bounds: &Bounds) -> bool {
    if (p.x == q.x && (p.x == bounds.x_min() || p.x == bounds.x_max()))
        || (p.y == q.y && (p.y == bounds.y_min() || p.y == bounds.y_max()))
    {
        return true;
    }
    bounds.intersects_segment(p, q)
}

/// Enumerates the corner(s) of `building` that can diffract a signal
/// between `rx` and `tx`, from their zone pair.
///
/// Corners are plan positions; the returned z is zero and the engine
/// works with the nodes' own heights.
pub fn diffraction_corners(building: &Building, rx: Point, tx: Point) -> DiffractionCorners {
    use Zone::*;
    let bounds = building.bounds();
    let [bottom_left, bottom_right, top_right, top_left] = bounds.plan_corners();

    match (Zone::of(rx, bounds), Zone::of(tx, bounds)) {
        (B, G) | (G, B) | (H, B) | (B, H) | (H, C) | (C, H) => {
            DiffractionCorners::Single(top_left)
        }
        (B, E) | (E, B) | (D, B) | (B, D) | (D, A) | (A, D) => {
            DiffractionCorners::Single(top_right)
        }
        (H, E) | (E, H) | (F, H) | (H, F) | (F, A) | (A, F) => {
            DiffractionCorners::Single(bottom_left)
        }
        (D, G) | (G, D) | (F, D) | (D, F) | (F, C) | (C, F) => {
            DiffractionCorners::Single(bottom_right)
        }
        (C, G) | (G, C) => DiffractionCorners::Pair(top_left, bottom_right),
        (A, E) | (E, A) => DiffractionCorners::Pair(bottom_left, top_right),
        _ => DiffractionCorners::None,
    }
}

/// Constructs the specular reflection point on one face of `building`
/// for the pair (rx, tx), if their zones select a common mirror face.
///
/// Image method: one endpoint is mirrored through the face plane and
/// the face is intersected with the line to the other endpoint. The
/// returned z is informational; the engine evaluates the two legs
/// with the heights it is given.
pub fn reflection_point(building: &Building, rx: Point, tx: Point) -> Option<Point> {
    use Zone::*;
    let bounds = building.bounds();
    match (Zone::of(rx, bounds), Zone::of(tx, bounds)) {
        (G, F) | (F, G) | (F, E) | (E, F) | (E, G) | (G, E) | (F, F) => {
            mirror_on_y_face(bounds.y_min(), rx, tx)
        }
        (A, B) | (B, A) | (B, C) | (C, B) | (A, C) | (C, A) | (B, B) => {
            mirror_on_y_face(bounds.y_max(), rx, tx)
        }
        (A, H) | (H, A) | (H, G) | (G, H) | (G, A) | (A, G) | (H, H) => {
            mirror_on_x_face(bounds.x_min(), rx, tx)
        }
        (C, D) | (D, C) | (D, E) | (E, D) | (E, C) | (C, E) | (D, D) => {
            mirror_on_x_face(bounds.x_max(), rx, tx)
        }
        _ => None,
    }
}

fn mirror_on_y_face(wall_y: f64, rx: Point, tx: Point) -> Option<Point> {
    let to_rx = wall_y - rx.y;
    let to_tx = wall_y - tx.y;
    if nearly_zero(to_rx + to_tx) {
        // Both nodes in the wall plane: no specular point
        return None;
    }
    let x = (rx.x * to_tx + tx.x * to_rx) / (to_rx + to_tx);
    Some(Point::new(x, wall_y, 1.))
}

fn mirror_on_x_face(wall_x: f64, rx: Point, tx: Point) -> Option<Point> {
    let to_rx = wall_x - rx.x;
    let to_tx = wall_x - tx.x;
    if nearly_zero(to_rx + to_tx) {
        return None;
    }
    let y = (rx.y * to_tx + tx.y * to_rx) / (to_rx + to_tx);
    Some(Point::new(wall_x, y, 1.))
}
