// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Skeleton-Lite Graph
//!
//! Typed straight skeleton graphs on top of an external geometry kernel.
//!
//! A kernel (see [`Kernel`]) turns polygon rings into an undifferentiated set
//! of segments plus an opaque handle for offset queries. This crate classifies
//! the segments into Border, Spoke and Skeleton edges and deduplicates them
//! over a shared vertex registry. It also owns the handle so it is released
//! exactly once.
//!
//! ```ignore
//! let graph = SkeletonGraph::generate(kernel, &outer, &holes)?;
//! for &edge in graph.spokes() {
//!     let (boundary, interior) = graph.topology().edge_positions(edge).unwrap();
//! }
//! let contours = graph.offset(1.5)?;
//! ```
//!
//! Everything is synchronous and single-threaded; the crate adds no locking
//! around the kernel.

pub mod classify;
pub mod config;
pub mod construction;
pub mod error;
pub mod graph;
pub mod guard;
pub mod kernel;
pub mod keys;
pub mod offset;
pub mod point;
pub mod rings;
pub mod serialization;
pub mod topology;
pub mod traversal;

#[cfg(test)]
mod test_kernel;

pub use classify::{classify, parse_segments, ClassificationStats, EdgeClassifier, RawSegment};
pub use config::{BorderSource, SkeletonOptions};
pub use error::{Error, Result};
pub use graph::SkeletonGraph;
pub use guard::{KernelHandle, OffsetGuard};
pub use kernel::{GeneratedSkeleton, Kernel, OffsetBuffer};
pub use keys::{EdgeKey, EdgeType, VertexKey};
pub use offset::OffsetPolygon;
pub use point::Point;
pub use rings::{pack_rings, PackedRings, RingDescriptor};
pub use topology::{EdgeData, SkeletonTopology, VertexData};

// Re-export nalgebra's point type for convenience
pub use nalgebra::Point2;
