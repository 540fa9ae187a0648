// SPDX-License-Identifier: Apache-2.0

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Sub};

use nalgebra::Vector2;

/// A point in design units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of this point about `center`, in radians within `[0, 2π)`.
    ///
    /// A point that coincides with `center` has no defined angle; 0 is
    /// returned and a warning is logged.
    pub fn angle_about(&self, center: &Coordinate) -> f64 {
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        if dx == 0.0 && dy == 0.0 {
            log::warn!(
                "angle of ({}, {}) about itself is undefined; using 0",
                self.x,
                self.y
            );
            return 0.0;
        }
        let angle = dy.atan2(dx);
        if angle < 0.0 {
            angle + 2.0 * PI
        } else {
            // folds -0.0 into 0.0
            angle + 0.0
        }
    }

    /// Snaps this point to the nearest multiple of `alignment` on each axis.
    /// Non-positive alignments leave the point untouched.
    pub fn grid_aligned(&self, alignment: f64) -> Coordinate {
        if alignment <= 0.0 {
            return *self;
        }
        // halves round toward +inf on both axes
        let snap = |v: f64| (v / alignment + 0.5).floor() * alignment;
        Coordinate {
            x: snap(self.x),
            y: snap(self.y),
        }
    }

    pub fn to_geo_point(self) -> geo::Point<f64> {
        geo::Point::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinate { x, y }
    }
}

impl Add<Vector2<f64>> for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Vector2<f64>) -> Coordinate {
        Coordinate {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Coordinate {
    type Output = Vector2<f64>;

    fn sub(self, rhs: Coordinate) -> Vector2<f64> {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle in design units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box of the given size centered on the origin.
    pub fn centered(width: f64, height: f64) -> Self {
        BoundingBox {
            min_x: -width / 2.0,
            min_y: -height / 2.0,
            max_x: width / 2.0,
            max_y: height / 2.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Closed five-point trace: lower-left, upper-left, upper-right,
    /// lower-right, back to lower-left.
    pub fn outline(&self) -> [Coordinate; 5] {
        [
            Coordinate::new(self.min_x, self.min_y),
            Coordinate::new(self.min_x, self.max_y),
            Coordinate::new(self.max_x, self.max_y),
            Coordinate::new(self.max_x, self.min_y),
            Coordinate::new(self.min_x, self.min_y),
        ]
    }

    pub fn to_geo_polygon(&self) -> geo::Polygon<f64> {
        geo::Rect::new(
            geo::coord! { x: self.min_x, y: self.min_y },
            geo::coord! { x: self.max_x, y: self.max_y },
        )
        .to_polygon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_quadrants() {
        let c = Coordinate::ORIGIN;
        assert_eq!(Coordinate::new(1.0, 0.0).angle_about(&c), 0.0);
        assert!((Coordinate::new(0.0, 1.0).angle_about(&c) - PI / 2.0).abs() < 1e-12);
        assert!((Coordinate::new(-1.0, 0.0).angle_about(&c) - PI).abs() < 1e-12);
        assert!((Coordinate::new(0.0, -1.0).angle_about(&c) - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn angle_of_center_is_zero() {
        let c = Coordinate::new(3.0, 4.0);
        assert_eq!(c.angle_about(&c), 0.0);
    }

    #[test]
    fn negative_zero_angle_is_zero() {
        let angle = Coordinate::new(1.0, -0.0).angle_about(&Coordinate::ORIGIN);
        assert!(angle.is_sign_positive());
        assert!(Coordinate::new(f64::NAN, 0.0).angle_about(&Coordinate::ORIGIN).is_nan());
    }

    #[test]
    fn grid_alignment() {
        let p = Coordinate::new(3.4, -2.6);
        assert_eq!(p.grid_aligned(1.0), Coordinate::new(3.0, -3.0));
        assert_eq!(p.grid_aligned(0.0), p);
        assert_eq!(Coordinate::new(2.5, -2.5).grid_aligned(1.0), Coordinate::new(3.0, -2.0));
    }

    #[test]
    fn outline_is_closed() {
        let outline = BoundingBox::centered(6.0, 10.0).outline();
        assert_eq!(outline[0], outline[4]);
        assert_eq!(outline[2], Coordinate::new(3.0, 5.0));
    }
}
