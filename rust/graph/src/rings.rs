// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ring packing for the kernel call boundary.
//!
//! Callers supply the outer ring and the holes clockwise. The kernel wants the
//! outer boundary counter-clockwise and the holes clockwise, all in one
//! contiguous coordinate buffer addressed by per-ring `(offset, count)`
//! descriptors. The outer ring is therefore re-emitted in reverse and holes are
//! copied through unchanged.

use nalgebra::Point2;

use crate::error::{Error, Result};

/// Location of one ring inside a [`PackedRings`] buffer, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingDescriptor {
    /// Index of the ring's first point.
    pub offset: usize,
    /// Number of points in the ring.
    pub count: usize,
}

/// Contiguous `[x0, y0, x1, y1, ...]` buffer plus ring descriptors, outer first.
#[derive(Debug, Clone)]
pub struct PackedRings {
    coords: Vec<f64>,
    rings: Vec<RingDescriptor>,
}

impl PackedRings {
    /// Flat coordinate buffer (two values per point).
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// All ring descriptors; the first one is the outer ring.
    pub fn rings(&self) -> &[RingDescriptor] {
        &self.rings
    }

    /// Descriptor of the outer ring.
    pub fn outer(&self) -> RingDescriptor {
        self.rings[0]
    }

    /// Descriptors of the hole rings.
    pub fn holes(&self) -> &[RingDescriptor] {
        &self.rings[1..]
    }

    /// Total number of points across all rings.
    pub fn point_count(&self) -> usize {
        self.coords.len() / 2
    }

    /// Points of one ring, in the kernel's winding.
    pub fn ring_points(&self, ring: RingDescriptor) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.coords[ring.offset * 2..(ring.offset + ring.count) * 2]
            .chunks_exact(2)
            .map(|c| Point2::new(c[0], c[1]))
    }
}

/// Packs one clockwise outer ring and zero or more clockwise holes into the
/// kernel's layout.
///
/// Fails with [`Error::InvalidArgument`] if the outer ring is empty, a hole is
/// empty, or any coordinate is not finite. An empty `holes` slice means "no
/// holes".
pub fn pack_rings(outer: &[Point2<f64>], holes: &[Vec<Point2<f64>>]) -> Result<PackedRings> {
    if outer.is_empty() {
        return Err(Error::invalid("outer ring must have at least one point"));
    }
    check_finite(outer, "outer ring")?;
    for (i, hole) in holes.iter().enumerate() {
        if hole.is_empty() {
            return Err(Error::invalid(format!("hole ring {i} is empty")));
        }
        check_finite(hole, "hole ring")?;
    }

    let total = outer.len() + holes.iter().map(|h| h.len()).sum::<usize>();
    let mut coords = Vec::with_capacity(total * 2);
    let mut rings = Vec::with_capacity(holes.len() + 1);

    // Outer ring reversed: clockwise in, counter-clockwise out
    rings.push(RingDescriptor {
        offset: 0,
        count: outer.len(),
    });
    for p in outer.iter().rev() {
        coords.push(p.x);
        coords.push(p.y);
    }

    // Holes stay clockwise
    for hole in holes {
        rings.push(RingDescriptor {
            offset: coords.len() / 2,
            count: hole.len(),
        });
        for p in hole {
            coords.push(p.x);
            coords.push(p.y);
        }
    }

    Ok(PackedRings { coords, rings })
}

fn check_finite(ring: &[Point2<f64>], what: &str) -> Result<()> {
    match ring.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
        Some(i) => Err(Error::invalid(format!("{what} point {i} is not finite"))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(-10.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, -10.0),
            Point2::new(-10.0, -10.0),
        ]
    }

    #[test]
    fn outer_is_reversed() {
        let packed = pack_rings(&square(), &[]).unwrap();
        let pts: Vec<_> = packed.ring_points(packed.outer()).collect();
        assert_eq!(
            pts,
            vec![
                Point2::new(-10.0, -10.0),
                Point2::new(10.0, -10.0),
                Point2::new(10.0, 10.0),
                Point2::new(-10.0, 10.0),
            ]
        );
        assert!(packed.holes().is_empty());
    }

    #[test]
    fn holes_pass_through_with_offsets() {
        let hole_a = vec![
            Point2::new(2.0, 2.0),
            Point2::new(2.0, -2.0),
            Point2::new(-2.0, -2.0),
        ];
        let hole_b = vec![
            Point2::new(5.0, 5.0),
            Point2::new(6.0, 5.0),
            Point2::new(6.0, 6.0),
            Point2::new(5.0, 6.0),
        ];
        let packed = pack_rings(&square(), &[hole_a.clone(), hole_b.clone()]).unwrap();

        assert_eq!(
            packed.rings(),
            &[
                RingDescriptor { offset: 0, count: 4 },
                RingDescriptor { offset: 4, count: 3 },
                RingDescriptor { offset: 7, count: 4 },
            ]
        );
        assert_eq!(packed.point_count(), 11);
        assert_eq!(packed.coords().len(), 22);

        let a: Vec<_> = packed.ring_points(packed.holes()[0]).collect();
        let b: Vec<_> = packed.ring_points(packed.holes()[1]).collect();
        assert_eq!(a, hole_a);
        assert_eq!(b, hole_b);
    }

    #[test]
    fn empty_outer_is_rejected() {
        let err = pack_rings(&[], &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn empty_hole_is_rejected() {
        let err = pack_rings(&square(), &[Vec::new()]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn non_finite_is_rejected() {
        let mut outer = square();
        outer[2] = Point2::new(f64::NAN, 0.0);
        assert!(matches!(
            pack_rings(&outer, &[]),
            Err(Error::InvalidArgument(_))
        ));

        let hole = vec![Point2::new(0.0, f64::INFINITY)];
        assert!(matches!(
            pack_rings(&square(), &[hole]),
            Err(Error::InvalidArgument(_))
        ));
    }
}
