// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bindings to the native CGAL straight skeleton wrapper.
//!
//! The wrapper library exports four C entry points. Segment buffers written by
//! `GenerateSkeleton` belong to the returned handle and stay valid until
//! `ReleaseSkeletonHandle`; they are copied out before this module returns.
//! Offset results are released one by one through `ReleaseOffsetResult`.
//!
//! All unsafe code in the workspace lives here.

use std::ffi::c_void;
use std::os::raw::c_int;
use std::ptr::NonNull;

use skeleton_lite_graph::{GeneratedSkeleton, Kernel, OffsetBuffer, PackedRings};

mod ffi {
    #![allow(non_snake_case)]

    use std::ffi::c_void;
    use std::os::raw::c_int;

    /// Ring location in points: `(offset, count)`.
    #[repr(C)]
    pub struct RawRing {
        pub offset: c_int,
        pub count: c_int,
    }

    /// Flat `[x1, y1, x2, y2, ...]` segment buffer; `len` counts values.
    #[repr(C)]
    pub struct RawSegments {
        pub values: *const f64,
        pub len: c_int,
    }

    #[repr(C)]
    pub struct RawOffset {
        pub coords: *const f64,
        pub coord_len: c_int,
        pub lengths: *const c_int,
        pub polygon_count: c_int,
    }

    #[link(name = "CGAL_StraightSkeleton_Wrapper")]
    extern "C" {
        pub fn GenerateSkeleton(
            points: *const f64,
            point_count: c_int,
            rings: *const RawRing,
            ring_count: c_int,
            skeleton: *mut RawSegments,
            spokes: *mut RawSegments,
        ) -> *mut c_void;

        pub fn ReleaseSkeletonHandle(handle: *mut c_void);

        pub fn ComputeOffset(handle: *mut c_void, distance: f64) -> *mut RawOffset;

        pub fn ReleaseOffsetResult(result: *mut RawOffset);
    }
}

/// Native skeleton state.
#[derive(Debug)]
pub struct CgalHandle(NonNull<c_void>);

/// Native offset result.
#[derive(Debug)]
pub struct CgalOffset(NonNull<ffi::RawOffset>);

/// Kernel backed by the native CGAL wrapper library.
#[derive(Debug, Default, Clone, Copy)]
pub struct CgalKernel;

/// Reads a native buffer, treating null or non-positive lengths as empty.
///
/// # Safety
///
/// If `ptr` is non-null it must point to `len` initialized values that
/// outlive `'a`.
unsafe fn native_slice<'a, T>(ptr: *const T, len: c_int) -> &'a [T] {
    match usize::try_from(len) {
        Ok(len) if len > 0 && !ptr.is_null() => std::slice::from_raw_parts(ptr, len),
        _ => &[],
    }
}

impl Kernel for CgalKernel {
    type Handle = CgalHandle;
    type Offset = CgalOffset;

    fn generate_skeleton(&self, rings: &PackedRings) -> Option<GeneratedSkeleton<CgalHandle>> {
        let point_count = c_int::try_from(rings.point_count()).ok()?;
        let descriptors = rings
            .rings()
            .iter()
            .map(|r| {
                Some(ffi::RawRing {
                    offset: c_int::try_from(r.offset).ok()?,
                    count: c_int::try_from(r.count).ok()?,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        let ring_count = c_int::try_from(descriptors.len()).ok()?;

        let mut skeleton = ffi::RawSegments {
            values: std::ptr::null(),
            len: 0,
        };
        let mut spokes = ffi::RawSegments {
            values: std::ptr::null(),
            len: 0,
        };

        // SAFETY: the coordinate and descriptor buffers outlive the call and
        // the counts match their lengths.
        let raw = unsafe {
            ffi::GenerateSkeleton(
                rings.coords().as_ptr(),
                point_count,
                descriptors.as_ptr(),
                ring_count,
                &mut skeleton,
                &mut spokes,
            )
        };
        let Some(handle) = NonNull::new(raw) else {
            tracing::warn!(points = point_count, rings = ring_count, "CGAL skeleton generation failed");
            return None;
        };

        // SAFETY: the segment buffers belong to the live handle.
        let (skeleton, spokes) = unsafe {
            (
                native_slice(skeleton.values, skeleton.len).to_vec(),
                native_slice(spokes.values, spokes.len).to_vec(),
            )
        };

        Some(GeneratedSkeleton {
            handle: CgalHandle(handle),
            skeleton,
            spokes,
        })
    }

    fn release_skeleton(&self, handle: CgalHandle) {
        // SAFETY: handles are moved in, so each one is released once.
        unsafe { ffi::ReleaseSkeletonHandle(handle.0.as_ptr()) }
    }

    fn compute_offset(&self, handle: &CgalHandle, distance: f64) -> Option<CgalOffset> {
        // SAFETY: a borrowed handle has not been released yet.
        let raw = unsafe { ffi::ComputeOffset(handle.0.as_ptr(), distance) };
        NonNull::new(raw).map(CgalOffset)
    }

    fn offset_buffer<'a>(&'a self, result: &'a CgalOffset) -> OffsetBuffer<'a> {
        // SAFETY: the result stays allocated until it is moved into
        // release_offset, which cannot happen while it is borrowed.
        unsafe {
            let raw = result.0.as_ref();
            OffsetBuffer {
                coords: native_slice(raw.coords, raw.coord_len),
                lengths: native_slice(raw.lengths, raw.polygon_count),
            }
        }
    }

    fn release_offset(&self, result: CgalOffset) {
        // SAFETY: results are moved in, so each one is released once.
        unsafe { ffi::ReleaseOffsetResult(result.0.as_ptr()) }
    }
}
