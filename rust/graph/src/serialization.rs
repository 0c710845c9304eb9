// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for skeleton topologies.
//!
//! Vertices are written with sequential ids and edges refer to them by id.
//! Loading rebuilds the topology through the regular construction path, so a
//! document with zero-length or duplicate edges comes back validated.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keys::EdgeType;
use crate::point::Point;
use crate::topology::SkeletonTopology;

/// Serializable representation of a skeleton topology.
#[derive(Debug, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub vertices: Vec<VertexSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VertexSnapshot {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub input: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

impl SkeletonTopology {
    /// Serializes the topology to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_snapshot())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserializes a topology from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: TopologySnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    /// Creates a serializable snapshot.
    ///
    /// SlotMap keys are mapped to sequential integer ids; edges are listed
    /// Border, Spoke, Skeleton, each in collection order.
    pub fn to_snapshot(&self) -> TopologySnapshot {
        use rustc_hash::FxHashMap;

        let mut vertex_ids = FxHashMap::default();
        let vertices: Vec<VertexSnapshot> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, (k, v))| {
                vertex_ids.insert(k, i);
                VertexSnapshot {
                    id: i,
                    x: v.position.x,
                    y: v.position.y,
                    input: v.is_input,
                }
            })
            .collect();

        let edges = EdgeType::ALL
            .iter()
            .flat_map(|&t| self.edges_of_type(t).iter())
            .filter_map(|&ek| self.edges.get(ek))
            .map(|e| EdgeSnapshot {
                start: vertex_ids[&e.start],
                end: vertex_ids[&e.end],
                edge_type: e.edge_type,
            })
            .collect();

        TopologySnapshot { vertices, edges }
    }

    /// Reconstructs a topology from a snapshot.
    pub fn from_snapshot(snap: &TopologySnapshot) -> Result<Self> {
        let mut positions = Vec::with_capacity(snap.vertices.len());
        for (i, vs) in snap.vertices.iter().enumerate() {
            if vs.id != i {
                return Err(Error::Serialization(format!(
                    "vertex {i} has id {}, expected sequential ids",
                    vs.id
                )));
            }
            let p = Point::new(vs.x, vs.y);
            if !p.is_finite() {
                return Err(Error::Serialization(format!("vertex {i} is not finite")));
            }
            positions.push(p);
        }

        let lookup = |id: usize| {
            positions
                .get(id)
                .copied()
                .ok_or_else(|| Error::Serialization(format!("edge refers to missing vertex {id}")))
        };

        let mut topology = SkeletonTopology::new();
        for es in &snap.edges {
            topology.insert_edge(lookup(es.start)?, lookup(es.end)?, es.edge_type)?;
        }
        Ok(topology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SkeletonTopology {
        SkeletonTopology::from_edge_pairs([
            (EdgeType::Border, Point::new(0.0, 0.0), Point::new(6.0, 0.0)),
            (EdgeType::Border, Point::new(6.0, 0.0), Point::new(3.0, 4.0)),
            (EdgeType::Border, Point::new(3.0, 4.0), Point::new(0.0, 0.0)),
            (EdgeType::Spoke, Point::new(0.0, 0.0), Point::new(3.0, 1.5)),
            (EdgeType::Spoke, Point::new(6.0, 0.0), Point::new(3.0, 1.5)),
            (EdgeType::Spoke, Point::new(3.0, 4.0), Point::new(3.0, 1.5)),
        ])
        .unwrap()
    }

    #[test]
    fn roundtrip_empty_topology() {
        let json = SkeletonTopology::new().to_json().unwrap();
        let restored = SkeletonTopology::from_json(&json).unwrap();
        assert_eq!(restored.vertex_count(), 0);
        assert_eq!(restored.edge_count(), 0);
    }

    #[test]
    fn roundtrip_preserves_classification() {
        let topology = sample();
        let json = topology.to_json().unwrap();
        let restored = SkeletonTopology::from_json(&json).unwrap();

        assert_eq!(restored.vertex_count(), 4);
        for edge_type in EdgeType::ALL {
            assert_eq!(restored.segments(edge_type), topology.segments(edge_type));
        }
        assert_eq!(restored.input_vertices().count(), 3);
    }

    #[test]
    fn snapshot_uses_type_names() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"type\": \"Border\""));
        assert!(json.contains("\"type\": \"Spoke\""));
    }

    #[test]
    fn missing_vertex_is_rejected() {
        let json = r#"{"vertices":[{"id":0,"x":0.0,"y":0.0,"input":true}],
                       "edges":[{"start":0,"end":3,"type":"Skeleton"}]}"#;
        assert!(matches!(
            SkeletonTopology::from_json(json),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn self_loop_is_rejected() {
        let json = r#"{"vertices":[{"id":0,"x":1.0,"y":1.0,"input":false}],
                       "edges":[{"start":0,"end":0,"type":"Skeleton"}]}"#;
        assert!(matches!(
            SkeletonTopology::from_json(json),
            Err(Error::DegenerateEdge { .. })
        ));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        assert!(matches!(
            SkeletonTopology::from_json("not json"),
            Err(Error::Serialization(_))
        ));
    }
}
