// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for a classified straight skeleton.
//!
//! [`SkeletonTopology`] owns every vertex and edge in slot maps with stable,
//! generational keys. A coordinate registry interns each distinct position
//! into exactly one vertex, so a boundary corner shared by a Border edge and a
//! Spoke edge is the same [`VertexKey`] in both. Each vertex keeps an upward
//! index of the edges that use it.
//!
//! Edges are grouped by [`EdgeType`] in first-insertion order. Within one
//! group no two edges share the same unordered pair of endpoints.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::keys::*;
use crate::point::Point;

/// Data stored for a vertex: one distinct coordinate.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub position: Point,
    /// `true` if the vertex lies on an input ring (it ends a Border edge or
    /// starts a Spoke edge).
    pub is_input: bool,
}

/// Data stored for an edge.
///
/// Border and Skeleton edges are stored with the lexicographically smaller
/// endpoint first. Spoke edges always start at the input vertex and end at the
/// skeleton vertex.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub start: VertexKey,
    pub end: VertexKey,
    pub edge_type: EdgeType,
}

pub(crate) type Incidence = SmallVec<[EdgeKey; 4]>;

/// Vertex registry plus the three classified edge collections.
///
/// # Example
///
/// ```
/// use skeleton_lite_graph::{EdgeType, Point, SkeletonTopology};
///
/// let topology = SkeletonTopology::from_edge_pairs([
///     (EdgeType::Border, Point::new(0.0, 0.0), Point::new(4.0, 0.0)),
///     (EdgeType::Spoke, Point::new(0.0, 0.0), Point::new(2.0, 1.0)),
/// ])
/// .unwrap();
///
/// assert_eq!(topology.vertex_count(), 3);
/// assert_eq!(topology.borders().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SkeletonTopology {
    // Entity storage
    pub(crate) vertices: SlotMap<VertexKey, VertexData>,
    pub(crate) edges: SlotMap<EdgeKey, EdgeData>,

    // Upward adjacency: vertex → edges using it
    pub(crate) vertex_to_edges: FxHashMap<VertexKey, Incidence>,

    // Coordinate registry
    pub(crate) registry: FxHashMap<Point, VertexKey>,

    // Deduplication index: (type, smaller endpoint, larger endpoint)
    pub(crate) edge_index: FxHashMap<(EdgeType, Point, Point), EdgeKey>,

    // Classified collections, in insertion order
    pub(crate) borders: Vec<EdgeKey>,
    pub(crate) spokes: Vec<EdgeKey>,
    pub(crate) skeleton: Vec<EdgeKey>,
}

impl SkeletonTopology {
    /// Creates a new, empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex access ---

    /// Returns the vertex data for the given key, or `None` if not found.
    pub fn vertex(&self, key: VertexKey) -> Option<&VertexData> {
        self.vertices.get(key)
    }

    /// Returns the position of a vertex.
    pub fn vertex_position(&self, key: VertexKey) -> Option<Point> {
        self.vertices.get(key).map(|v| v.position)
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexKey, &VertexData)> {
        self.vertices.iter()
    }

    // --- Edge access ---

    /// Returns the edge data for the given key, or `None` if not found.
    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeData> {
        self.edges.get(key)
    }

    /// Returns the number of edges across all three collections.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges around the outside of the shape and around each hole.
    pub fn borders(&self) -> &[EdgeKey] {
        &self.borders
    }

    /// Edges connecting the boundary to the skeleton.
    pub fn spokes(&self) -> &[EdgeKey] {
        &self.spokes
    }

    /// The spine of the skeleton.
    pub fn skeleton(&self) -> &[EdgeKey] {
        &self.skeleton
    }

    /// Returns the collection for one edge type.
    pub fn edges_of_type(&self, edge_type: EdgeType) -> &[EdgeKey] {
        match edge_type {
            EdgeType::Border => &self.borders,
            EdgeType::Spoke => &self.spokes,
            EdgeType::Skeleton => &self.skeleton,
        }
    }

    // --- Adjacency index helpers ---

    /// Register that an edge uses a vertex (upward adjacency).
    pub(crate) fn link_vertex_edge(&mut self, vertex: VertexKey, edge: EdgeKey) {
        let incident = self.vertex_to_edges.entry(vertex).or_default();
        if !incident.contains(&edge) {
            incident.push(edge);
        }
    }

    pub(crate) fn collection_mut(&mut self, edge_type: EdgeType) -> &mut Vec<EdgeKey> {
        match edge_type {
            EdgeType::Border => &mut self.borders,
            EdgeType::Spoke => &mut self.spokes,
            EdgeType::Skeleton => &mut self.skeleton,
        }
    }
}

/// Cloning rebuilds the topology from the endpoint positions of its three
/// edge collections. The copy gets fresh arenas and shares no state with the
/// original.
impl Clone for SkeletonTopology {
    fn clone(&self) -> Self {
        let mut copy = SkeletonTopology::new();
        for edge_type in EdgeType::ALL {
            for &ek in self.edges_of_type(edge_type) {
                if let Some((start, end)) = self.edge_points(ek) {
                    copy.push_edge(start, end, edge_type);
                }
            }
        }
        copy
    }
}
