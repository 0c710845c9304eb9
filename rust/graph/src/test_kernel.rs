// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scripted kernel used by unit tests.

use std::cell::Cell;

use nalgebra::Point2;

use crate::kernel::{GeneratedSkeleton, Kernel, OffsetBuffer};
use crate::rings::{pack_rings, PackedRings};

#[derive(Debug)]
pub(crate) struct ScriptedHandle(#[allow(dead_code)] usize);

#[derive(Debug)]
pub(crate) struct ScriptedOffset {
    coords: Vec<f64>,
    lengths: Vec<i32>,
}

/// Replays fixed segment streams and per-distance offset buffers, counting
/// every acquisition and release.
#[derive(Debug, Default)]
pub(crate) struct ScriptedKernel {
    pub skeleton: Vec<f64>,
    pub spokes: Vec<f64>,
    pub offsets: Vec<(f64, Vec<f64>, Vec<i32>)>,
    pub fail_generation: bool,
    pub generated: Cell<usize>,
    pub released: Cell<usize>,
    pub offsets_issued: Cell<usize>,
    pub offsets_released: Cell<usize>,
    pub last_rings: std::cell::RefCell<Option<PackedRings>>,
}

impl ScriptedKernel {
    pub fn with_segments(skeleton: Vec<f64>, spokes: Vec<f64>) -> Self {
        Self {
            skeleton,
            spokes,
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, distance: f64, coords: Vec<f64>, lengths: Vec<i32>) -> Self {
        self.offsets.push((distance, coords, lengths));
        self
    }

    pub fn generate_scripted(&self) -> ScriptedHandle {
        let triangle = [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 0.0),
        ];
        let rings = pack_rings(&triangle, &[]).unwrap();
        self.generate_skeleton(&rings).unwrap().handle
    }

    pub fn offsets_outstanding(&self) -> usize {
        self.offsets_issued.get() - self.offsets_released.get()
    }
}

impl Kernel for ScriptedKernel {
    type Handle = ScriptedHandle;
    type Offset = ScriptedOffset;

    fn generate_skeleton(&self, rings: &PackedRings) -> Option<GeneratedSkeleton<ScriptedHandle>> {
        *self.last_rings.borrow_mut() = Some(rings.clone());
        if self.fail_generation {
            return None;
        }
        let id = self.generated.get();
        self.generated.set(id + 1);
        Some(GeneratedSkeleton {
            handle: ScriptedHandle(id),
            skeleton: self.skeleton.clone(),
            spokes: self.spokes.clone(),
        })
    }

    fn release_skeleton(&self, _handle: ScriptedHandle) {
        self.released.set(self.released.get() + 1);
    }

    fn compute_offset(&self, _handle: &ScriptedHandle, distance: f64) -> Option<ScriptedOffset> {
        let (coords, lengths) = self
            .offsets
            .iter()
            .find(|(d, _, _)| *d == distance)
            .map(|(_, c, l)| (c.clone(), l.clone()))
            .unwrap_or_default();
        self.offsets_issued.set(self.offsets_issued.get() + 1);
        Some(ScriptedOffset { coords, lengths })
    }

    fn offset_buffer<'a>(&'a self, result: &'a ScriptedOffset) -> OffsetBuffer<'a> {
        OffsetBuffer {
            coords: &result.coords,
            lengths: &result.lengths,
        }
    }

    fn release_offset(&self, _result: ScriptedOffset) {
        self.offsets_released.set(self.offsets_released.get() + 1);
    }
}
