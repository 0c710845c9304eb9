// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The top-level skeleton graph.
//!
//! A [`SkeletonGraph`] is produced only by [`SkeletonGraph::generate`]: rings
//! are packed, the kernel runs, its handle is put under a [`KernelHandle`]
//! guard right away, and the segments are classified. If classification
//! fails, the guard is dropped and the handle released before the error
//! reaches the caller.
//!
//! After construction the edge classification is immutable. The only state
//! change left is the handle going from live to released, through
//! [`SkeletonGraph::dispose`] or on drop.

use nalgebra::Point2;

use crate::classify::EdgeClassifier;
use crate::config::SkeletonOptions;
use crate::error::{Error, Result};
use crate::guard::KernelHandle;
use crate::kernel::{GeneratedSkeleton, Kernel};
use crate::keys::EdgeKey;
use crate::offset::{extract_offset, validate_distance, OffsetPolygon};
use crate::point::Point;
use crate::rings::pack_rings;
use crate::topology::SkeletonTopology;

/// A classified straight skeleton that keeps its kernel handle for offset
/// queries.
#[derive(Debug)]
pub struct SkeletonGraph<K: Kernel> {
    topology: SkeletonTopology,
    handle: KernelHandle<K>,
}

impl<K: Kernel> SkeletonGraph<K> {
    /// Generates a straight skeleton for the given input.
    ///
    /// `outer` is wound clockwise. `holes` are wound clockwise too; pass an
    /// empty slice for a shape without holes.
    pub fn generate(kernel: K, outer: &[Point2<f64>], holes: &[Vec<Point2<f64>>]) -> Result<Self> {
        Self::generate_with(kernel, outer, holes, &SkeletonOptions::default())
    }

    /// Like [`generate`](Self::generate), with explicit options.
    pub fn generate_with(
        kernel: K,
        outer: &[Point2<f64>],
        holes: &[Vec<Point2<f64>>],
        options: &SkeletonOptions,
    ) -> Result<Self> {
        let packed = pack_rings(outer, holes)?;
        tracing::debug!(
            outer = outer.len(),
            holes = holes.len(),
            points = packed.point_count(),
            "generating straight skeleton"
        );

        let GeneratedSkeleton {
            handle,
            skeleton,
            spokes,
        } = kernel
            .generate_skeleton(&packed)
            .ok_or_else(|| Error::resource("kernel failed to generate a straight skeleton"))?;
        let handle = KernelHandle::new(kernel, handle);

        let rings: Vec<Vec<Point>> = std::iter::once(outer)
            .chain(holes.iter().map(Vec::as_slice))
            .map(|ring| ring.iter().map(Point::from).collect())
            .collect();
        let (topology, _) = EdgeClassifier::new(&rings, options).classify(&skeleton, &spokes)?;

        Ok(Self { topology, handle })
    }

    /// The classified edges and vertex registry.
    pub fn topology(&self) -> &SkeletonTopology {
        &self.topology
    }

    /// Edges around the outside of the shape and around each hole.
    pub fn borders(&self) -> &[EdgeKey] {
        self.topology.borders()
    }

    /// Edges connecting the boundary to the skeleton.
    pub fn spokes(&self) -> &[EdgeKey] {
        self.topology.spokes()
    }

    /// The spine of the skeleton.
    pub fn skeleton(&self) -> &[EdgeKey] {
        self.topology.skeleton()
    }

    /// Offset polygons at `distance` inside the shape.
    ///
    /// Fails with [`Error::InvalidArgument`] unless `distance` is finite and
    /// positive, and with [`Error::ResourceError`] once the graph has been
    /// disposed. An empty result means the shape vanished at this distance.
    pub fn offset(&self, distance: f64) -> Result<Vec<OffsetPolygon>> {
        validate_distance(distance)?;
        let handle = self.handle.live()?;
        extract_offset(self.handle.kernel(), handle, distance)
    }

    /// Releases the kernel handle. Safe to call more than once; only the first
    /// call reaches the kernel.
    pub fn dispose(&mut self) {
        if self.handle.release() {
            tracing::debug!("kernel handle released by dispose");
        }
    }

    /// Returns `true` once the kernel handle has been released.
    pub fn is_disposed(&self) -> bool {
        !self.handle.is_live()
    }

    /// Independent copy of the edge classification, built from endpoint
    /// positions alone. Works after disposal and never calls the kernel.
    pub fn clone_topology(&self) -> SkeletonTopology {
        self.topology.clone()
    }

    /// Releases the kernel handle and returns the edge classification.
    pub fn into_topology(self) -> SkeletonTopology {
        let Self { topology, handle } = self;
        drop(handle);
        topology
    }
}
