// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction methods for skeleton topologies.
//!
//! Every edge goes through the same path: reject zero-length edges, look up
//! the orientation-independent key, intern both endpoints, then register the
//! edge on both endpoints' incidence lists.

use crate::error::{Error, Result};
use crate::keys::*;
use crate::point::Point;
use crate::topology::*;

impl SkeletonTopology {
    /// Builds a topology from `(type, start, end)` triples.
    ///
    /// Duplicates within a type (in either orientation) are dropped. Spoke
    /// triples must list the boundary point first.
    ///
    /// Returns [`Error::DegenerateEdge`] if any triple has identical endpoints.
    pub fn from_edge_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (EdgeType, Point, Point)>,
    {
        let mut topology = Self::new();
        for (edge_type, start, end) in pairs {
            topology.insert_edge(start, end, edge_type)?;
        }
        Ok(topology)
    }

    /// Returns the vertex for a position, creating it on first use.
    pub(crate) fn intern_vertex(&mut self, position: Point) -> VertexKey {
        if let Some(&key) = self.registry.get(&position) {
            return key;
        }
        let key = self.vertices.insert(VertexData {
            position,
            is_input: false,
        });
        self.registry.insert(position, key);
        key
    }

    /// Inserts an edge after rejecting zero-length input.
    ///
    /// Returns `Ok(None)` if an edge of the same type already joins the same
    /// two positions.
    pub(crate) fn insert_edge(
        &mut self,
        start: Point,
        end: Point,
        edge_type: EdgeType,
    ) -> Result<Option<EdgeKey>> {
        if start == end {
            return Err(Error::DegenerateEdge {
                edge_type,
                position: start,
            });
        }
        Ok(self.push_edge(start, end, edge_type))
    }

    /// Inserts an edge between two distinct positions, deduplicating by
    /// unordered endpoint pair within `edge_type`.
    pub(crate) fn push_edge(
        &mut self,
        start: Point,
        end: Point,
        edge_type: EdgeType,
    ) -> Option<EdgeKey> {
        debug_assert!(start != end, "zero-length edges are rejected by insert_edge");

        let (lo, hi) = Point::ordered(start, end);
        if self.edge_index.contains_key(&(edge_type, lo, hi)) {
            return None;
        }

        let (start, end) = match edge_type {
            EdgeType::Spoke => (start, end),
            EdgeType::Border | EdgeType::Skeleton => (lo, hi),
        };
        let start_key = self.intern_vertex(start);
        let end_key = self.intern_vertex(end);

        match edge_type {
            EdgeType::Border => {
                self.vertices[start_key].is_input = true;
                self.vertices[end_key].is_input = true;
            }
            EdgeType::Spoke => self.vertices[start_key].is_input = true,
            EdgeType::Skeleton => {}
        }

        let key = self.edges.insert(EdgeData {
            start: start_key,
            end: end_key,
            edge_type,
        });
        self.link_vertex_edge(start_key, key);
        self.link_vertex_edge(end_key, key);
        self.edge_index.insert((edge_type, lo, hi), key);
        self.collection_mut(edge_type).push(key);
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_per_position() {
        let mut topology = SkeletonTopology::new();
        let a = topology.intern_vertex(Point::new(1.0, 2.0));
        let b = topology.intern_vertex(Point::new(1.0, 2.0));
        let c = topology.intern_vertex(Point::new(2.0, 1.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(topology.vertex_count(), 2);
    }

    #[test]
    fn reversed_duplicate_is_dropped() {
        let mut topology = SkeletonTopology::new();
        let p = Point::new(0.0, 0.0);
        let q = Point::new(1.0, 1.0);

        assert!(topology.insert_edge(p, q, EdgeType::Skeleton).unwrap().is_some());
        assert!(topology.insert_edge(q, p, EdgeType::Skeleton).unwrap().is_none());
        assert!(topology.insert_edge(p, q, EdgeType::Skeleton).unwrap().is_none());
        assert_eq!(topology.skeleton().len(), 1);
    }

    #[test]
    fn same_pair_may_exist_in_different_collections() {
        let mut topology = SkeletonTopology::new();
        let p = Point::new(0.0, 0.0);
        let q = Point::new(1.0, 1.0);
        topology.insert_edge(p, q, EdgeType::Border).unwrap();
        topology.insert_edge(p, q, EdgeType::Spoke).unwrap();
        assert_eq!(topology.borders().len(), 1);
        assert_eq!(topology.spokes().len(), 1);
        assert_eq!(topology.vertex_count(), 2);
    }

    #[test]
    fn border_and_skeleton_are_stored_smaller_first() {
        let mut topology = SkeletonTopology::new();
        let hi = Point::new(5.0, 0.0);
        let lo = Point::new(-5.0, 3.0);
        let ek = topology.insert_edge(hi, lo, EdgeType::Skeleton).unwrap().unwrap();

        let (start, end) = topology.edge_points(ek).unwrap();
        assert_eq!(start, lo);
        assert_eq!(end, hi);
    }

    #[test]
    fn spoke_keeps_boundary_first() {
        let mut topology = SkeletonTopology::new();
        let boundary = Point::new(5.0, 0.0);
        let interior = Point::new(-5.0, 3.0);
        let ek = topology
            .insert_edge(boundary, interior, EdgeType::Spoke)
            .unwrap()
            .unwrap();

        let edge = topology.edge(ek).unwrap();
        assert_eq!(topology.vertex_position(edge.start), Some(boundary));
        assert!(topology.vertex(edge.start).unwrap().is_input);
        assert!(!topology.vertex(edge.end).unwrap().is_input);
    }

    #[test]
    fn degenerate_edge_is_rejected() {
        let mut topology = SkeletonTopology::new();
        let p = Point::new(3.0, 3.0);
        let err = topology.insert_edge(p, p, EdgeType::Skeleton).unwrap_err();
        assert!(matches!(
            err,
            Error::DegenerateEdge {
                edge_type: EdgeType::Skeleton,
                ..
            }
        ));
        assert_eq!(topology.edge_count(), 0);
        assert_eq!(topology.vertex_count(), 0);
    }

    #[test]
    fn insertion_registers_incidence() {
        let mut topology = SkeletonTopology::new();
        let center = Point::new(0.0, 0.0);
        let e0 = topology
            .insert_edge(Point::new(1.0, 0.0), center, EdgeType::Spoke)
            .unwrap()
            .unwrap();
        let e1 = topology
            .insert_edge(Point::new(0.0, 1.0), center, EdgeType::Spoke)
            .unwrap()
            .unwrap();

        let vk = topology.find_vertex(center).unwrap();
        let incident = topology.vertex_edges(vk);
        assert_eq!(incident.len(), 2);
        assert!(incident.contains(&e0));
        assert!(incident.contains(&e1));
    }

    #[test]
    fn from_edge_pairs_propagates_degenerate() {
        let p = Point::new(1.0, 1.0);
        let result = SkeletonTopology::from_edge_pairs([
            (EdgeType::Border, Point::new(0.0, 0.0), p),
            (EdgeType::Border, p, p),
        ]);
        assert!(matches!(result, Err(Error::DegenerateEdge { .. })));
    }
}
