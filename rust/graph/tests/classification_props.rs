// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property-based tests for edge classification.
//!
//! Run with: cargo test -p skeleton-lite-graph -- prop

use proptest::prelude::*;
use rustc_hash::FxHashSet;
use skeleton_lite_graph::{classify, EdgeType, Point, SkeletonOptions, SkeletonTopology};

// =============================================================================
// Strategies
// =============================================================================

/// Distinct integer-grid points, used as one input ring.
fn arb_ring() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::hash_set((-50i32..50, -50i32..50), 3..12).prop_map(|set| {
        let mut pts: Vec<_> = set.into_iter().collect();
        pts.sort();
        pts.into_iter()
            .map(|(x, y)| Point::new(x as f64, y as f64))
            .collect()
    })
}

/// Distinct half-grid points, never equal to a ring point.
fn arb_interior() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::hash_set((-50i32..50, -50i32..50), 1..8).prop_map(|set| {
        let mut pts: Vec<_> = set.into_iter().collect();
        pts.sort();
        pts.into_iter()
            .map(|(x, y)| Point::new(x as f64 + 0.5, y as f64 + 0.5))
            .collect()
    })
}

/// A ring, interior points, and a noisy segment stream over both: segments
/// are repeated and reversed at random.
fn arb_scene() -> impl Strategy<Value = (Vec<Point>, Vec<f64>)> {
    (arb_ring(), arb_interior()).prop_flat_map(|(ring, interior)| {
        let pool: Vec<Point> = ring.iter().chain(interior.iter()).copied().collect();
        let n = pool.len();
        let segment = (0..n, 0..n, any::<bool>(), 1usize..3);
        prop::collection::vec(segment, 0..40).prop_map(move |segments| {
            let mut buffer = Vec::new();
            for (i, j, reverse, repeat) in segments {
                if i == j {
                    continue;
                }
                let (a, b) = if reverse { (pool[j], pool[i]) } else { (pool[i], pool[j]) };
                for _ in 0..repeat {
                    buffer.extend_from_slice(&[a.x, a.y, b.x, b.y]);
                }
            }
            (ring.clone(), buffer)
        })
    })
}

fn unordered(a: Point, b: Point) -> (Point, Point) {
    Point::ordered(a, b)
}

fn check_invariants(topology: &SkeletonTopology, ring: &[Point]) {
    let input: FxHashSet<Point> = ring.iter().copied().collect();
    for edge_type in EdgeType::ALL {
        let mut seen = FxHashSet::default();
        for (start, end) in topology.segments(edge_type) {
            assert_ne!(start, end, "self-loop in {edge_type}");
            assert!(seen.insert(unordered(start, end)), "duplicate {edge_type} edge");
            match edge_type {
                EdgeType::Border => {
                    assert!(input.contains(&start) && input.contains(&end));
                }
                EdgeType::Spoke => {
                    assert!(input.contains(&start));
                    assert!(!input.contains(&end));
                }
                EdgeType::Skeleton => {
                    assert!(!input.contains(&start) && !input.contains(&end));
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_borders_follow_ring_adjacency((ring, buffer) in arb_scene()) {
        let topology = classify(&[ring.clone()], &buffer, &[], &SkeletonOptions::default()).unwrap();

        let adjacent: FxHashSet<(Point, Point)> = (0..ring.len())
            .map(|i| unordered(ring[i], ring[(i + 1) % ring.len()]))
            .collect();
        let borders = topology.segments(EdgeType::Border);

        prop_assert_eq!(borders.len(), adjacent.len());
        for (a, b) in borders {
            prop_assert!(adjacent.contains(&unordered(a, b)));
        }
    }

    #[test]
    fn prop_collections_are_deduplicated((ring, buffer) in arb_scene()) {
        let topology = classify(&[ring.clone()], &buffer, &[], &SkeletonOptions::default()).unwrap();
        check_invariants(&topology, &ring);
    }

    #[test]
    fn prop_stream_split_does_not_matter((ring, buffer) in arb_scene()) {
        let mid = (buffer.len() / 8) * 4;
        let options = SkeletonOptions::default();
        let joined = classify(&[ring.clone()], &buffer, &[], &options).unwrap();
        let split = classify(&[ring.clone()], &buffer[..mid], &buffer[mid..], &options).unwrap();

        for edge_type in EdgeType::ALL {
            let a: FxHashSet<_> = joined.segments(edge_type).into_iter().collect();
            let b: FxHashSet<_> = split.segments(edge_type).into_iter().collect();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn prop_clone_preserves_edge_sets((ring, buffer) in arb_scene()) {
        let topology = classify(&[ring.clone()], &buffer, &[], &SkeletonOptions::default()).unwrap();
        let copy = topology.clone();

        prop_assert_eq!(copy.vertex_count(), topology.vertex_count());
        for edge_type in EdgeType::ALL {
            let a: FxHashSet<_> = topology.segments(edge_type).into_iter().collect();
            let b: FxHashSet<_> = copy.segments(edge_type).into_iter().collect();
            prop_assert_eq!(a, b);
        }
        check_invariants(&copy, &ring);
    }
}
