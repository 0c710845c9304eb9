// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The interface this crate needs from a straight skeleton kernel.
//!
//! A kernel computes the skeleton of packed rings and keeps per-polygon state
//! behind an opaque handle that later answers offset queries. Ownership rules:
//!
//! - A handle returned by [`Kernel::generate_skeleton`] is released exactly
//!   once through [`Kernel::release_skeleton`]. The handle is moved into that
//!   call, so it cannot be released twice.
//! - Every result of [`Kernel::compute_offset`] is handed back through
//!   [`Kernel::release_offset`], whether or not reading it succeeded.
//!
//! The crate enforces both rules with the guards in [`crate::guard`]; kernel
//! implementations only have to honour the calls.
//!
//! Kernels are not assumed to be thread-safe or reentrant.

use std::rc::Rc;
use std::sync::Arc;

use crate::rings::PackedRings;

/// Output of a successful skeleton generation.
///
/// Segment buffers are flat `[x1, y1, x2, y2, ...]` quadruples. Segments may
/// appear in either direction, more than once, and may include boundary
/// segments; classification deduplicates them.
#[derive(Debug)]
pub struct GeneratedSkeleton<H> {
    /// Opaque kernel state for later offset queries.
    pub handle: H,
    /// Segments of the skeleton stream.
    pub skeleton: Vec<f64>,
    /// Segments of the spoke stream.
    pub spokes: Vec<f64>,
}

/// Borrowed view of a kernel offset result.
#[derive(Debug, Clone, Copy)]
pub struct OffsetBuffer<'a> {
    /// Flat `[x0, y0, x1, y1, ...]` coordinates of all polygons, back to back.
    pub coords: &'a [f64],
    /// Number of points in each polygon, in emission order.
    pub lengths: &'a [i32],
}

/// A straight skeleton kernel.
pub trait Kernel {
    /// Kernel-side skeleton state.
    type Handle;
    /// Kernel-allocated offset result.
    type Offset;

    /// Computes the straight skeleton of `rings` (outer ring counter-clockwise,
    /// holes clockwise). Returns `None` if the kernel fails.
    fn generate_skeleton(&self, rings: &PackedRings) -> Option<GeneratedSkeleton<Self::Handle>>;

    /// Releases kernel-side state for a handle.
    fn release_skeleton(&self, handle: Self::Handle);

    /// Computes offset polygons at `distance > 0`. Returns `None` if the kernel fails.
    fn compute_offset(&self, handle: &Self::Handle, distance: f64) -> Option<Self::Offset>;

    /// Exposes the buffers of an offset result.
    fn offset_buffer<'a>(&'a self, result: &'a Self::Offset) -> OffsetBuffer<'a>;

    /// Releases an offset result.
    fn release_offset(&self, result: Self::Offset);
}

macro_rules! forward_kernel {
    ($($ptr:ty),*) => {$(
        impl<K: Kernel + ?Sized> Kernel for $ptr {
            type Handle = K::Handle;
            type Offset = K::Offset;

            fn generate_skeleton(&self, rings: &PackedRings) -> Option<GeneratedSkeleton<Self::Handle>> {
                (**self).generate_skeleton(rings)
            }

            fn release_skeleton(&self, handle: Self::Handle) {
                (**self).release_skeleton(handle)
            }

            fn compute_offset(&self, handle: &Self::Handle, distance: f64) -> Option<Self::Offset> {
                (**self).compute_offset(handle, distance)
            }

            fn offset_buffer<'a>(&'a self, result: &'a Self::Offset) -> OffsetBuffer<'a> {
                (**self).offset_buffer(result)
            }

            fn release_offset(&self, result: Self::Offset) {
                (**self).release_offset(result)
            }
        }
    )*};
}

forward_kernel!(Rc<K>, Arc<K>, Box<K>);

impl<K: Kernel + ?Sized> Kernel for &K {
    type Handle = K::Handle;
    type Offset = K::Offset;

    fn generate_skeleton(&self, rings: &PackedRings) -> Option<GeneratedSkeleton<Self::Handle>> {
        (**self).generate_skeleton(rings)
    }

    fn release_skeleton(&self, handle: Self::Handle) {
        (**self).release_skeleton(handle)
    }

    fn compute_offset(&self, handle: &Self::Handle, distance: f64) -> Option<Self::Offset> {
        (**self).compute_offset(handle, distance)
    }

    fn offset_buffer<'a>(&'a self, result: &'a Self::Offset) -> OffsetBuffer<'a> {
        (**self).offset_buffer(result)
    }

    fn release_offset(&self, result: Self::Offset) {
        (**self).release_offset(result)
    }
}
