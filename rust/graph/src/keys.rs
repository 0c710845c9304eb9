// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based storage.
//!
//! Vertices and edges live in `slotmap::SlotMap`s owned by a
//! [`SkeletonTopology`](crate::SkeletonTopology); keys are only meaningful
//! for the topology that issued them.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Key for a vertex (one distinct coordinate of the graph).
    pub struct VertexKey;

    /// Key for an edge (classified segment between two vertices).
    pub struct EdgeKey;
}

/// The structural role of an edge in a straight skeleton graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EdgeType {
    /// Edge of the input polygon (outer ring or a hole), between two input vertices.
    Border = 0,
    /// Edge from an input vertex inward to a skeleton vertex.
    Spoke = 1,
    /// Edge of the skeleton itself, between two interior vertices.
    Skeleton = 2,
}

impl EdgeType {
    /// All edge types, in storage order.
    pub const ALL: [EdgeType; 3] = [EdgeType::Border, EdgeType::Spoke, EdgeType::Skeleton];

    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Border => "Border",
            EdgeType::Spoke => "Spoke",
            EdgeType::Skeleton => "Skeleton",
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
