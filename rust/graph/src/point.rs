// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hashable 2D coordinates.
//!
//! Kernel output is matched against caller input by exact coordinate
//! equality, so points are used as hash-map keys. [`Point`] compares by the
//! bit pattern of its fields after folding `-0.0` into `0.0` (and every NaN
//! into one canonical NaN), which gives a total order and a hash that agrees
//! with equality. There is no tolerance: two points are the same vertex only
//! if their coordinates are identical.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// An immutable 2D coordinate with exact, total equality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[inline]
fn canonical(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Orders a pair so the lexicographically smaller point comes first.
    pub fn ordered(a: Point, b: Point) -> (Point, Point) {
        if b < a {
            (b, a)
        } else {
            (a, b)
        }
    }

    fn key(&self) -> (u64, u64) {
        (canonical(self.x).to_bits(), canonical(self.y).to_bits())
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical(self.x)
            .total_cmp(&canonical(other.x))
            .then_with(|| canonical(self.y).total_cmp(&canonical(other.y)))
    }
}

impl From<Point2<f64>> for Point {
    fn from(p: Point2<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<&Point2<f64>> for Point {
    fn from(p: &Point2<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for Point2<f64> {
    fn from(p: Point) -> Self {
        Point2::new(p.x, p.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from(v: [f64; 2]) -> Self {
        Point::new(v[0], v[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn signed_zero_is_one_key() {
        let a = Point::new(0.0, -0.0);
        let b = Point::new(-0.0, 0.0);
        assert_eq!(a, b);

        let mut set = FxHashSet::default();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn equality_is_exact() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(1.0 + f64::EPSILON, 2.0);
        assert_ne!(a, b);
    }

    #[test]
    fn lexicographic_order() {
        let a = Point::new(-1.0, 5.0);
        let b = Point::new(-1.0, 6.0);
        let c = Point::new(0.0, -100.0);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(Point::ordered(c, a), (a, c));
        assert_eq!(Point::ordered(a, c), (a, c));
    }

    #[test]
    fn nalgebra_conversion() {
        let p: Point = Point2::new(3.5, -2.0).into();
        assert_eq!(p, Point::new(3.5, -2.0));
        let back: Point2<f64> = p.into();
        assert_eq!(back, Point2::new(3.5, -2.0));
    }
}
