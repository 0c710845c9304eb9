// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traversal methods for navigating a skeleton topology.
//!
//! Supports downward lookups (edge → vertices → positions) and upward lookups
//! (vertex → incident edges → neighbouring vertices) via the incidence index.

use nalgebra::Point2;
use rustc_hash::FxHashSet;

use crate::keys::*;
use crate::point::Point;
use crate::topology::SkeletonTopology;

impl SkeletonTopology {
    /// Returns the start and end vertex keys of an edge.
    pub fn edge_vertices(&self, key: EdgeKey) -> Option<(VertexKey, VertexKey)> {
        self.edges.get(key).map(|e| (e.start, e.end))
    }

    /// Returns the start and end positions of an edge.
    pub fn edge_points(&self, key: EdgeKey) -> Option<(Point, Point)> {
        let (start, end) = self.edge_vertices(key)?;
        Some((self.vertex_position(start)?, self.vertex_position(end)?))
    }

    /// Returns the start and end positions of an edge as nalgebra points.
    pub fn edge_positions(&self, key: EdgeKey) -> Option<(Point2<f64>, Point2<f64>)> {
        self.edge_points(key).map(|(a, b)| (a.into(), b.into()))
    }

    /// Returns the Euclidean length of an edge.
    pub fn edge_length(&self, key: EdgeKey) -> Option<f64> {
        self.edge_points(key).map(|(a, b)| a.distance(&b))
    }

    /// Returns the edges incident to a vertex (empty for unknown keys).
    pub fn vertex_edges(&self, key: VertexKey) -> &[EdgeKey] {
        self.vertex_to_edges
            .get(&key)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the distinct vertices sharing an edge with `key`.
    pub fn adjacent_vertices(&self, key: VertexKey) -> Vec<VertexKey> {
        let mut seen = FxHashSet::default();
        let mut result = Vec::new();
        for &ek in self.vertex_edges(key) {
            if let Some((start, end)) = self.edge_vertices(ek) {
                let other = if start == key { end } else { start };
                if seen.insert(other) {
                    result.push(other);
                }
            }
        }
        result
    }

    /// Looks up the vertex interned for an exact position.
    pub fn find_vertex(&self, position: Point) -> Option<VertexKey> {
        self.registry.get(&position).copied()
    }

    /// Vertices lying on an input ring.
    pub fn input_vertices(&self) -> impl Iterator<Item = VertexKey> + '_ {
        self.vertices
            .iter()
            .filter(|(_, v)| v.is_input)
            .map(|(k, _)| k)
    }

    /// Interior vertices created by the skeleton.
    pub fn skeleton_vertices(&self) -> impl Iterator<Item = VertexKey> + '_ {
        self.vertices
            .iter()
            .filter(|(_, v)| !v.is_input)
            .map(|(k, _)| k)
    }

    /// Endpoint positions of every edge of one type, in collection order.
    pub fn segments(&self, edge_type: EdgeType) -> Vec<(Point, Point)> {
        self.edges_of_type(edge_type)
            .iter()
            .filter_map(|&ek| self.edge_points(ek))
            .collect()
    }
}
