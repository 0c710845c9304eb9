// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge classification.
//!
//! The kernel reports undifferentiated segments. A segment's role follows from
//! how many of its endpoints are input vertices (points of the caller's
//! rings):
//!
//! | input endpoints | type     | stored as                      |
//! |-----------------|----------|--------------------------------|
//! | 2               | Border   | smaller endpoint first         |
//! | 1               | Spoke    | input endpoint first           |
//! | 0               | Skeleton | smaller endpoint first         |
//!
//! "Smaller" is the lexicographic `(x, y)` order of [`Point`]. Segments may
//! arrive in either direction and more than once; each collection keeps one
//! edge per unordered endpoint pair.
//!
//! With [`BorderSource::RingAdjacency`] (the default) Border edges are derived
//! from the rings themselves and kernel segments joining two input vertices
//! are ignored.

use rustc_hash::FxHashSet;

use crate::config::{BorderSource, SkeletonOptions};
use crate::error::{Error, Result};
use crate::keys::EdgeType;
use crate::point::Point;
use crate::topology::SkeletonTopology;

/// Number of `f64` values per kernel segment: `x1, y1, x2, y2`.
pub const SEGMENT_STRIDE: usize = 4;

/// One kernel segment. Not retained after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSegment {
    pub a: Point,
    pub b: Point,
}

/// Splits a flat kernel buffer into segments.
///
/// Fails with [`Error::MalformedResult`] if the length is not a multiple of
/// [`SEGMENT_STRIDE`] or a coordinate is not finite.
pub fn parse_segments(raw: &[f64]) -> Result<Vec<RawSegment>> {
    if raw.len() % SEGMENT_STRIDE != 0 {
        return Err(Error::malformed(format!(
            "segment buffer holds {} values, not a multiple of {SEGMENT_STRIDE}",
            raw.len()
        )));
    }

    raw.chunks_exact(SEGMENT_STRIDE)
        .enumerate()
        .map(|(i, c)| {
            let segment = RawSegment {
                a: Point::new(c[0], c[1]),
                b: Point::new(c[2], c[3]),
            };
            if segment.a.is_finite() && segment.b.is_finite() {
                Ok(segment)
            } else {
                Err(Error::malformed(format!(
                    "segment {i} has a non-finite coordinate"
                )))
            }
        })
        .collect()
}

/// Counters gathered while classifying.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationStats {
    /// Candidates dropped because the same edge was already present.
    pub duplicates: usize,
    /// Kernel segments between two input vertices that were not used because
    /// borders come from ring adjacency.
    pub ignored_kernel_borders: usize,
    /// Kernel segments whose class differs from the stream they arrived in.
    pub cross_stream: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Skeleton,
    Spoke,
}

/// Classifies kernel segments against a fixed set of input rings.
#[derive(Debug)]
pub struct EdgeClassifier<'a> {
    rings: &'a [Vec<Point>],
    input: FxHashSet<Point>,
    border_source: BorderSource,
}

impl<'a> EdgeClassifier<'a> {
    /// Prepares a classifier. `rings` holds the outer ring followed by the
    /// holes; winding does not matter.
    pub fn new(rings: &'a [Vec<Point>], options: &SkeletonOptions) -> Self {
        let input = rings.iter().flatten().copied().collect();
        Self {
            rings,
            input,
            border_source: options.border_source,
        }
    }

    /// Returns `true` if `p` is a point of one of the input rings.
    pub fn is_input(&self, p: &Point) -> bool {
        self.input.contains(p)
    }

    /// Classifies both kernel streams into a fresh topology.
    pub fn classify(
        &self,
        skeleton: &[f64],
        spokes: &[f64],
    ) -> Result<(SkeletonTopology, ClassificationStats)> {
        let skeleton = parse_segments(skeleton)?;
        let spokes = parse_segments(spokes)?;

        let mut stats = ClassificationStats::default();
        let mut candidates: Vec<(EdgeType, Point, Point)> =
            Vec::with_capacity(skeleton.len() + spokes.len());

        if self.border_source == BorderSource::RingAdjacency {
            for ring in self.rings {
                for (i, &a) in ring.iter().enumerate() {
                    let b = ring[(i + 1) % ring.len()];
                    candidates.push((EdgeType::Border, a, b));
                }
            }
        }

        let tagged = skeleton
            .iter()
            .map(|s| (Stream::Skeleton, s))
            .chain(spokes.iter().map(|s| (Stream::Spoke, s)));

        for (stream, segment) in tagged {
            let (edge_type, start, end) = self.orient(segment);

            if start == end {
                return Err(Error::DegenerateEdge {
                    edge_type,
                    position: start,
                });
            }
            if (stream == Stream::Spoke) != (edge_type == EdgeType::Spoke) {
                stats.cross_stream += 1;
            }
            if edge_type == EdgeType::Border && self.border_source == BorderSource::RingAdjacency {
                stats.ignored_kernel_borders += 1;
                continue;
            }
            candidates.push((edge_type, start, end));
        }

        // Borders first, then spokes, then skeleton; stable within a class
        candidates.sort_by_key(|(edge_type, _, _)| *edge_type);

        let mut topology = SkeletonTopology::new();
        for (edge_type, start, end) in candidates {
            if topology.insert_edge(start, end, edge_type)?.is_none() {
                stats.duplicates += 1;
            }
        }

        tracing::debug!(
            borders = topology.borders().len(),
            spokes = topology.spokes().len(),
            skeleton = topology.skeleton().len(),
            vertices = topology.vertex_count(),
            duplicates = stats.duplicates,
            ignored_kernel_borders = stats.ignored_kernel_borders,
            cross_stream = stats.cross_stream,
            "classified kernel segments"
        );

        Ok((topology, stats))
    }

    /// Assigns a type and canonical direction to one segment.
    fn orient(&self, segment: &RawSegment) -> (EdgeType, Point, Point) {
        let (a, b) = (segment.a, segment.b);
        match (self.is_input(&a), self.is_input(&b)) {
            (true, true) => (EdgeType::Border, a, b),
            (true, false) => (EdgeType::Spoke, a, b),
            (false, true) => (EdgeType::Spoke, b, a),
            (false, false) => (EdgeType::Skeleton, a, b),
        }
    }
}

/// Classifies kernel output for the given rings (outer first).
///
/// See [`EdgeClassifier`] for the rules.
pub fn classify(
    rings: &[Vec<Point>],
    skeleton: &[f64],
    spokes: &[f64],
    options: &SkeletonOptions,
) -> Result<SkeletonTopology> {
    EdgeClassifier::new(rings, options)
        .classify(skeleton, spokes)
        .map(|(topology, _)| topology)
}
