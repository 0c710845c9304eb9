// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pure-Rust straight skeleton for strictly convex polygons.
//!
//! Every edge of a convex polygon moves inward along its normal at unit speed.
//! An edge collapses when the two bisectors at its ends meet; that point is
//! equidistant from the edge's line and both neighbouring lines. Collapsing the
//! earliest edge and repeating until three lines remain traces the whole
//! skeleton. Simultaneous events land on the same node through snapping.
//!
//! Offsets clip the polygon against every edge line shifted inward by the
//! distance, which is exact for convex input.

use std::cell::{Cell, RefCell};

use nalgebra::{Point2, Vector2};
use rustc_hash::FxHashMap;
use skeleton_lite_graph::{GeneratedSkeleton, Kernel, OffsetBuffer, PackedRings};

/// Relative tolerance for snapping event points and dropping empty offsets.
const SNAP_TOLERANCE: f64 = 1e-9;

/// Opaque handle for one generated skeleton.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ConvexHandle(u64);

/// Offset polygons owned by the kernel until released.
#[derive(Debug)]
pub struct ConvexOffset {
    coords: Vec<f64>,
    lengths: Vec<i32>,
}

/// Inward-shifted supporting line of one polygon edge: `normal . x = offset + t`.
#[derive(Debug, Clone, Copy)]
struct EdgeLine {
    normal: Vector2<f64>,
    offset: f64,
}

impl EdgeLine {
    fn through(a: Point2<f64>, b: Point2<f64>) -> Self {
        let d = (b - a).normalize();
        let normal = Vector2::new(-d.y, d.x);
        Self {
            normal,
            offset: normal.dot(&a.coords),
        }
    }

    fn signed_distance(&self, p: &Point2<f64>, shift: f64) -> f64 {
        self.normal.dot(&p.coords) - self.offset - shift
    }
}

/// Straight skeleton kernel for strictly convex outer rings without holes.
///
/// Other inputs are refused by returning no skeleton. Live handles and
/// outstanding offset results are counted so release discipline can be
/// observed.
#[derive(Debug, Default)]
pub struct ConvexKernel {
    polygons: RefCell<FxHashMap<u64, Vec<Point2<f64>>>>,
    next_id: Cell<u64>,
    released: Cell<usize>,
    offsets_outstanding: Cell<usize>,
}

impl ConvexKernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles issued and not yet released.
    pub fn live_handles(&self) -> usize {
        self.polygons.borrow().len()
    }

    /// Handles released so far.
    pub fn released_handles(&self) -> usize {
        self.released.get()
    }

    /// Offset results issued and not yet released.
    pub fn outstanding_offsets(&self) -> usize {
        self.offsets_outstanding.get()
    }
}

impl Kernel for ConvexKernel {
    type Handle = ConvexHandle;
    type Offset = ConvexOffset;

    fn generate_skeleton(&self, rings: &PackedRings) -> Option<GeneratedSkeleton<ConvexHandle>> {
        if !rings.holes().is_empty() {
            tracing::warn!(holes = rings.holes().len(), "convex kernel cannot handle holes");
            return None;
        }
        let polygon: Vec<Point2<f64>> = rings.ring_points(rings.outer()).collect();
        if !is_strictly_convex(&polygon) {
            tracing::warn!(
                points = polygon.len(),
                "convex kernel needs a strictly convex counter-clockwise ring"
            );
            return None;
        }

        let arcs = skeleton_arcs(&polygon);
        let (skeleton, spokes) = emit_halfedges(&polygon, &arcs);

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.polygons.borrow_mut().insert(id, polygon);

        Some(GeneratedSkeleton {
            handle: ConvexHandle(id),
            skeleton,
            spokes,
        })
    }

    fn release_skeleton(&self, handle: ConvexHandle) {
        if self.polygons.borrow_mut().remove(&handle.0).is_some() {
            self.released.set(self.released.get() + 1);
        }
    }

    fn compute_offset(&self, handle: &ConvexHandle, distance: f64) -> Option<ConvexOffset> {
        let polygons = self.polygons.borrow();
        let polygon = polygons.get(&handle.0)?;

        let mut result = ConvexOffset {
            coords: Vec::new(),
            lengths: Vec::new(),
        };
        let contour = inset(polygon, distance);
        if contour.len() >= 3 && area(&contour).abs() > tolerance(polygon) {
            for p in &contour {
                result.coords.push(p.x);
                result.coords.push(p.y);
            }
            result.lengths.push(i32::try_from(contour.len()).ok()?);
        }

        self.offsets_outstanding.set(self.offsets_outstanding.get() + 1);
        Some(result)
    }

    fn offset_buffer<'a>(&'a self, result: &'a ConvexOffset) -> OffsetBuffer<'a> {
        OffsetBuffer {
            coords: &result.coords,
            lengths: &result.lengths,
        }
    }

    fn release_offset(&self, _result: ConvexOffset) {
        self.offsets_outstanding
            .set(self.offsets_outstanding.get().saturating_sub(1));
    }
}

/// Every turn is a strict left turn and no edge has zero length.
fn is_strictly_convex(polygon: &[Point2<f64>]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let c = polygon[(i + 2) % n];
        let ab = b - a;
        let bc = c - b;
        ab.norm() > 0.0 && ab.perp(&bc) > 0.0
    })
}

fn tolerance(polygon: &[Point2<f64>]) -> f64 {
    let scale = polygon
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(1.0, f64::max);
    SNAP_TOLERANCE * scale
}

/// Point equidistant from three lines, and that distance.
fn equidistant(l0: &EdgeLine, l1: &EdgeLine, l2: &EdgeLine) -> Option<(Point2<f64>, f64)> {
    // Rows [nx, ny, -1] . [x, y, t] = offset, solved by Cramer's rule
    let det3 = |a: [f64; 3], b: [f64; 3], c: [f64; 3]| {
        a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0])
    };
    let row = |l: &EdgeLine| [l.normal.x, l.normal.y, -1.0];
    let (r0, r1, r2) = (row(l0), row(l1), row(l2));
    let rhs = [l0.offset, l1.offset, l2.offset];

    let det = det3(r0, r1, r2);
    if det.abs() < f64::EPSILON {
        return None;
    }
    let with_column = |k: usize| {
        let mut m = [r0, r1, r2];
        for (r, value) in m.iter_mut().zip(rhs) {
            r[k] = value;
        }
        det3(m[0], m[1], m[2]) / det
    };
    let (x, y, t) = (with_column(0), with_column(1), with_column(2));
    (x.is_finite() && y.is_finite() && t.is_finite()).then(|| (Point2::new(x, y), t))
}

/// Skeleton arcs as `(from, to)` pairs, zero-length arcs dropped.
fn skeleton_arcs(polygon: &[Point2<f64>]) -> Vec<(Point2<f64>, Point2<f64>)> {
    let n = polygon.len();
    let eps = tolerance(polygon);
    let mut lines: Vec<EdgeLine> = (0..n)
        .map(|i| EdgeLine::through(polygon[i], polygon[(i + 1) % n]))
        .collect();
    // origins[i] is where the wavefront vertex starting lines[i] came from
    let mut origins: Vec<Point2<f64>> = polygon.to_vec();
    let mut nodes: Vec<Point2<f64>> = Vec::new();
    let mut arcs = Vec::new();
    let mut now = 0.0;

    let snap = |p: Point2<f64>, nodes: &mut Vec<Point2<f64>>| {
        match nodes.iter().find(|q| (**q - p).norm() <= eps) {
            Some(q) => *q,
            None => {
                nodes.push(p);
                p
            }
        }
    };
    let mut push_arc = |from: Point2<f64>, to: Point2<f64>| {
        if from != to {
            arcs.push((from, to));
        }
    };

    while lines.len() > 3 {
        let m = lines.len();
        let event = (0..m)
            .filter_map(|i| {
                let prev = &lines[(i + m - 1) % m];
                let next = &lines[(i + 1) % m];
                equidistant(prev, &lines[i], next).map(|(p, t)| (i, p, t))
            })
            // Edges whose neighbours diverge meet behind the wavefront
            .filter(|&(_, _, t)| t >= now - eps)
            .min_by(|a, b| a.2.total_cmp(&b.2));
        let Some((i, p, t)) = event else {
            break;
        };
        now = t;

        let q = snap(p, &mut nodes);
        let j = (i + 1) % m;
        push_arc(origins[i], q);
        push_arc(origins[j], q);
        origins[j] = q;
        lines.remove(i);
        origins.remove(i);
    }

    if lines.len() == 3 {
        if let Some((p, _)) = equidistant(&lines[0], &lines[1], &lines[2]) {
            let q = snap(p, &mut nodes);
            for &origin in &origins {
                push_arc(origin, q);
            }
        }
    }

    arcs
}

/// Splits arcs into the two kernel streams as halfedge pairs.
///
/// Arcs touching the polygon go to the spoke stream. Interior arcs and the
/// contour halfedges go to the skeleton stream.
fn emit_halfedges(
    polygon: &[Point2<f64>],
    arcs: &[(Point2<f64>, Point2<f64>)],
) -> (Vec<f64>, Vec<f64>) {
    let mut skeleton = Vec::new();
    let mut spokes = Vec::new();
    let push_pair = |buffer: &mut Vec<f64>, a: Point2<f64>, b: Point2<f64>| {
        buffer.extend_from_slice(&[a.x, a.y, b.x, b.y, b.x, b.y, a.x, a.y]);
    };

    for &(a, b) in arcs {
        if polygon.contains(&a) || polygon.contains(&b) {
            push_pair(&mut spokes, a, b);
        } else {
            push_pair(&mut skeleton, a, b);
        }
    }
    for (i, &a) in polygon.iter().enumerate() {
        push_pair(&mut skeleton, a, polygon[(i + 1) % polygon.len()]);
    }

    (skeleton, spokes)
}

/// Sutherland-Hodgman clip against every edge line shifted by `distance`.
fn inset(polygon: &[Point2<f64>], distance: f64) -> Vec<Point2<f64>> {
    let n = polygon.len();
    let mut contour = polygon.to_vec();

    for i in 0..n {
        if contour.is_empty() {
            break;
        }
        let line = EdgeLine::through(polygon[i], polygon[(i + 1) % n]);
        let mut clipped = Vec::with_capacity(contour.len() + 1);
        for k in 0..contour.len() {
            let cur = contour[k];
            let next = contour[(k + 1) % contour.len()];
            let dc = line.signed_distance(&cur, distance);
            let dn = line.signed_distance(&next, distance);
            if dc >= 0.0 {
                clipped.push(cur);
            }
            if (dc >= 0.0) != (dn >= 0.0) {
                let s = dc / (dc - dn);
                clipped.push(cur + (next - cur) * s);
            }
        }
        contour = clipped;
    }

    contour
}

/// Signed shoelace area; positive for counter-clockwise contours.
fn area(contour: &[Point2<f64>]) -> f64 {
    let n = contour.len();
    (0..n)
        .map(|i| {
            let a = contour[i];
            let b = contour[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}
