// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Skeleton-Lite Kernels
//!
//! Implementations of [`skeleton_lite_graph::Kernel`]:
//!
//! - [`ConvexKernel`]: pure Rust, strictly convex rings without holes.
//! - [`RecordedKernel`]: replays recorded segment streams and offset buffers.
//! - `CgalKernel` (feature `cgal`): links the native CGAL wrapper library.
//!
//! ```ignore
//! use skeleton_lite_graph::SkeletonGraph;
//! use skeleton_lite_kernel::ConvexKernel;
//!
//! let graph = SkeletonGraph::generate(ConvexKernel::new(), &square, &[])?;
//! let inset = graph.offset(1.0)?;
//! ```

#[cfg(feature = "cgal")]
pub mod cgal;
pub mod convex;
pub mod recorded;

#[cfg(feature = "cgal")]
pub use cgal::{CgalHandle, CgalKernel, CgalOffset};
pub use convex::{ConvexHandle, ConvexKernel, ConvexOffset};
pub use recorded::{RecordedHandle, RecordedKernel, RecordedOffset};
