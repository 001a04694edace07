//! Plan-view zone classification.
//!
//! The area around a building footprint is split into eight zones,
//! four corner quadrants and four edge strips:
//!
//! ```text
//!      A   |   B    |   C
//!   -------+--------+-------
//!      H   |building|   D
//!   -------+--------+-------
//!      G   |   F    |   E
//! ```
//!
//! Many point pairs can be declared in or out of sight of each other
//! from their zone pair alone, using nothing but comparisons; the
//! sight module builds on this to skip most line/box intersections.

use crate::Bounds;
use crate::Point;

/// Position of a point relative to one building footprint.
///
/// `Inside` means strictly within the footprint, which for a radio
/// node is a scene construction error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    Inside,
}

impl Zone {
    /// Classifies a point against a footprint.
    ///
    /// Only x and y matter. The interior test is strict, so a point
    /// exactly on a wall resolves to the surrounding zone, not to
    /// `Inside`.
    pub fn of(point: Point, bounds: &Bounds) -> Zone {
        let x = point.x;
        let y = point.y;

        if x > bounds.x_min() && x < bounds.x_max() && y > bounds.y_min() && y < bounds.y_max() {
            return Zone::Inside;
        }
        if x <= bounds.x_min() {
            if y >= bounds.y_max() {
                return Zone::A;
            }
            if y <= bounds.y_min() {
                return Zone::G;
            }
            return Zone::H;
        }
        if x >= bounds.x_max() {
            if y >= bounds.y_max() {
                return Zone::C;
            }
            if y <= bounds.y_min() {
                return Zone::E;
            }
            return Zone::D;
        }
        if y >= bounds.y_max() {
            Zone::B
        } else {
            Zone::F
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(20., 25., 20., 25., 0., 15.).unwrap()
    }

    fn zone_of(x: f64, y: f64) -> Zone {
        Zone::of(Point::new(x, y, 0.), &bounds())
    }

    #[test]
    fn test_corner_quadrants() {
        assert_eq!(zone_of(19., 26.), Zone::A);
        assert_eq!(zone_of(26., 26.), Zone::C);
        assert_eq!(zone_of(26., 19.), Zone::E);
        assert_eq!(zone_of(19., 19.), Zone::G);
    }

    #[test]
    fn test_edge_strips() {
        assert_eq!(zone_of(22., 26.), Zone::B);
        assert_eq!(zone_of(26., 22.), Zone::D);
        assert_eq!(zone_of(22., 19.), Zone::F);
        assert_eq!(zone_of(19., 22.), Zone::H);
    }

    #[test]
    fn test_inside() {
        assert_eq!(zone_of(22., 22.), Zone::Inside);
        assert_eq!(zone_of(20.001, 24.999), Zone::Inside);
    }

    #[test]
    fn test_point_on_wall_is_outside() {
        // The interior comparison is strict: wall contact resolves to
        // the surrounding zone.
        assert_eq!(zone_of(20., 22.), Zone::H);
        assert_eq!(zone_of(25., 22.), Zone::D);
        assert_eq!(zone_of(22., 25.), Zone::B);
        assert_eq!(zone_of(22., 20.), Zone::F);
    }

    #[test]
    fn test_point_on_corner() {
        assert_eq!(zone_of(20., 25.), Zone::A);
        assert_eq!(zone_of(25., 25.), Zone::C);
        assert_eq!(zone_of(25., 20.), Zone::E);
        assert_eq!(zone_of(20., 20.), Zone::G);
    }

    #[test]
    fn test_inside_exactly_matches_the_open_footprint() {
        // Sweep around and over the footprint: a point is classified
        // `Inside` precisely when it lies in the open rectangle.
        let b = bounds();
        for ix in 0..50 {
            for iy in 0..50 {
                let p = Point::new(15. + 0.3 * ix as f64, 15. + 0.3 * iy as f64, 0.);
                let strictly_inside = p.x > 20. && p.x < 25. && p.y > 20. && p.y < 25.;
                assert_eq!(Zone::of(p, &b) == Zone::Inside, strictly_inside, "at {}", p);
            }
        }
    }
}
