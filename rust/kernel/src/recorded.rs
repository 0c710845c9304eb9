// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A kernel that replays recorded output.
//!
//! Useful for shapes the convex kernel refuses (holes, reflex corners) and for
//! feeding deliberately broken buffers through the graph layer. Inputs are not
//! looked at beyond being remembered; every generation returns the same
//! segment streams.

use std::cell::{Cell, RefCell};

use nalgebra::Point2;
use skeleton_lite_graph::{GeneratedSkeleton, Kernel, OffsetBuffer, PackedRings};

/// Handle issued by [`RecordedKernel`].
#[derive(Debug)]
pub struct RecordedHandle {
    id: usize,
}

/// Copy of one recorded offset buffer.
#[derive(Debug)]
pub struct RecordedOffset {
    coords: Vec<f64>,
    lengths: Vec<i32>,
}

#[derive(Debug, Clone)]
struct OffsetRecord {
    distance: f64,
    coords: Vec<f64>,
    lengths: Vec<i32>,
}

/// Kernel that replays fixed segment streams and offset buffers.
#[derive(Debug, Default)]
pub struct RecordedKernel {
    skeleton: Vec<f64>,
    spokes: Vec<f64>,
    offsets: Vec<OffsetRecord>,
    fail_generation: bool,
    issued: Cell<usize>,
    released: RefCell<Vec<usize>>,
    offsets_outstanding: Cell<usize>,
    last_input: RefCell<Option<PackedRings>>,
}

impl RecordedKernel {
    /// Replays the given flat segment streams on every generation.
    pub fn new(skeleton: Vec<f64>, spokes: Vec<f64>) -> Self {
        Self {
            skeleton,
            spokes,
            ..Self::default()
        }
    }

    /// A kernel whose generation always fails.
    pub fn failing() -> Self {
        Self {
            fail_generation: true,
            ..Self::default()
        }
    }

    /// Records the polygons returned for `distance`.
    pub fn with_offset(self, distance: f64, polygons: &[Vec<Point2<f64>>]) -> Self {
        let coords = polygons.iter().flatten().flat_map(|p| [p.x, p.y]).collect();
        let lengths = polygons.iter().map(|p| p.len() as i32).collect();
        self.with_raw_offset(distance, coords, lengths)
    }

    /// Records a raw offset buffer for `distance`, unchecked.
    pub fn with_raw_offset(mut self, distance: f64, coords: Vec<f64>, lengths: Vec<i32>) -> Self {
        self.offsets.push(OffsetRecord {
            distance,
            coords,
            lengths,
        });
        self
    }

    /// Handles issued so far.
    pub fn issued(&self) -> usize {
        self.issued.get()
    }

    /// Number of release calls received, including repeated ones.
    pub fn release_calls(&self) -> usize {
        self.released.borrow().len()
    }

    /// Handles issued and not yet released.
    pub fn live_handles(&self) -> usize {
        let released = self.released.borrow();
        (0..self.issued.get())
            .filter(|id| !released.contains(id))
            .count()
    }

    /// Offset results issued and not yet released.
    pub fn outstanding_offsets(&self) -> usize {
        self.offsets_outstanding.get()
    }

    /// The rings passed to the most recent generation.
    pub fn last_input(&self) -> Option<PackedRings> {
        self.last_input.borrow().clone()
    }
}

impl Kernel for RecordedKernel {
    type Handle = RecordedHandle;
    type Offset = RecordedOffset;

    fn generate_skeleton(&self, rings: &PackedRings) -> Option<GeneratedSkeleton<RecordedHandle>> {
        *self.last_input.borrow_mut() = Some(rings.clone());
        if self.fail_generation {
            tracing::warn!("recorded kernel configured to fail");
            return None;
        }

        let id = self.issued.get();
        self.issued.set(id + 1);
        Some(GeneratedSkeleton {
            handle: RecordedHandle { id },
            skeleton: self.skeleton.clone(),
            spokes: self.spokes.clone(),
        })
    }

    fn release_skeleton(&self, handle: RecordedHandle) {
        self.released.borrow_mut().push(handle.id);
    }

    fn compute_offset(&self, _handle: &RecordedHandle, distance: f64) -> Option<RecordedOffset> {
        let record = self.offsets.iter().find(|r| r.distance == distance)?;
        self.offsets_outstanding.set(self.offsets_outstanding.get() + 1);
        Some(RecordedOffset {
            coords: record.coords.clone(),
            lengths: record.lengths.clone(),
        })
    }

    fn offset_buffer<'a>(&'a self, result: &'a RecordedOffset) -> OffsetBuffer<'a> {
        OffsetBuffer {
            coords: &result.coords,
            lengths: &result.lengths,
        }
    }

    fn release_offset(&self, _result: RecordedOffset) {
        self.offsets_outstanding
            .set(self.offsets_outstanding.get().saturating_sub(1));
    }
}
