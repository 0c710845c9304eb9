// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scoped ownership of kernel resources.
//!
//! [`KernelHandle`] owns one skeleton handle and moves through
//! `Live -> Released` exactly once. Release happens on [`KernelHandle::release`]
//! or when the guard is dropped, whichever comes first. Both paths need
//! `&mut self`, so they cannot overlap, and the handle is moved out of the
//! state before the kernel sees it, so it cannot be released twice.
//!
//! [`OffsetGuard`] does the same for one offset result. It exists only for the
//! duration of a copy, and `Drop` hands the result back on every exit path.

use std::fmt;
use std::mem;

use crate::error::{Error, Result};
use crate::kernel::{Kernel, OffsetBuffer};

enum HandleState<H> {
    Live(H),
    Released,
}

/// Single owner of a kernel skeleton handle.
pub struct KernelHandle<K: Kernel> {
    kernel: K,
    state: HandleState<K::Handle>,
}

impl<K: Kernel> KernelHandle<K> {
    /// Takes ownership of a freshly generated handle.
    pub fn new(kernel: K, handle: K::Handle) -> Self {
        Self {
            kernel,
            state: HandleState::Live(handle),
        }
    }

    /// Returns the kernel that issued the handle.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Returns `true` until the handle has been released.
    pub fn is_live(&self) -> bool {
        matches!(self.state, HandleState::Live(_))
    }

    /// Returns the live handle, or [`Error::ResourceError`] after release.
    pub fn live(&self) -> Result<&K::Handle> {
        match &self.state {
            HandleState::Live(handle) => Ok(handle),
            HandleState::Released => Err(Error::resource("kernel handle has been released")),
        }
    }

    /// Releases the handle. Returns `true` if this call performed the release;
    /// later calls are no-ops.
    pub fn release(&mut self) -> bool {
        match mem::replace(&mut self.state, HandleState::Released) {
            HandleState::Live(handle) => {
                self.kernel.release_skeleton(handle);
                true
            }
            HandleState::Released => false,
        }
    }
}

impl<K: Kernel> Drop for KernelHandle<K> {
    fn drop(&mut self) {
        if self.release() {
            tracing::debug!("kernel handle released on drop");
        }
    }
}

impl<K: Kernel> fmt::Debug for KernelHandle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelHandle")
            .field("live", &self.is_live())
            .finish()
    }
}

/// Owner of one kernel offset result for the duration of a copy.
pub struct OffsetGuard<'k, K: Kernel> {
    kernel: &'k K,
    result: Option<K::Offset>,
}

impl<'k, K: Kernel> OffsetGuard<'k, K> {
    /// Takes ownership of an offset result.
    pub fn new(kernel: &'k K, result: K::Offset) -> Self {
        Self {
            kernel,
            result: Some(result),
        }
    }

    /// Borrowed view of the result's buffers.
    pub fn buffer(&self) -> Option<OffsetBuffer<'_>> {
        self.result
            .as_ref()
            .map(|result| self.kernel.offset_buffer(result))
    }
}

impl<K: Kernel> Drop for OffsetGuard<'_, K> {
    fn drop(&mut self) {
        if let Some(result) = self.result.take() {
            self.kernel.release_offset(result);
        }
    }
}
