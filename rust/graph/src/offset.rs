// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Offset polygon extraction.
//!
//! Each query allocates a fresh kernel result. The result is wrapped in an
//! [`OffsetGuard`] before it is read, so it goes back to the kernel whether
//! the copy succeeds or fails.

use nalgebra::Point2;

use crate::error::{Error, Result};
use crate::guard::OffsetGuard;
use crate::kernel::{Kernel, OffsetBuffer};

/// One closed offset contour. The closing edge from the last point back to
/// the first is implicit.
pub type OffsetPolygon = Vec<Point2<f64>>;

/// Rejects distances for which no offset is defined.
pub fn validate_distance(distance: f64) -> Result<()> {
    if distance.is_finite() && distance > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "offset distance must be finite and positive, got {distance}"
        )))
    }
}

/// Requests offset polygons from a live handle and copies them out.
///
/// Zero polygons is a valid result. Polygons keep the kernel's emission order.
pub fn extract_offset<K: Kernel>(
    kernel: &K,
    handle: &K::Handle,
    distance: f64,
) -> Result<Vec<OffsetPolygon>> {
    validate_distance(distance)?;

    let result = kernel
        .compute_offset(handle, distance)
        .ok_or_else(|| Error::resource(format!("kernel failed to offset by {distance}")))?;
    let guard = OffsetGuard::new(kernel, result);
    let buffer = guard
        .buffer()
        .ok_or_else(|| Error::resource("offset result already released"))?;

    let polygons = copy_polygons(buffer)?;
    tracing::debug!(distance, polygons = polygons.len(), "extracted offset polygons");
    Ok(polygons)
}

/// Splits a flat offset buffer into polygons using its length table.
pub fn copy_polygons(buffer: OffsetBuffer<'_>) -> Result<Vec<OffsetPolygon>> {
    if buffer.coords.len() % 2 != 0 {
        return Err(Error::malformed(format!(
            "offset buffer holds {} values, not a multiple of 2",
            buffer.coords.len()
        )));
    }

    let mut polygons = Vec::with_capacity(buffer.lengths.len());
    let mut cursor = 0usize;
    for (i, &len) in buffer.lengths.iter().enumerate() {
        let len = usize::try_from(len).map_err(|_| {
            Error::malformed(format!("offset polygon {i} has negative length {len}"))
        })?;
        let end = cursor + len * 2;
        let coords = buffer.coords.get(cursor..end).ok_or_else(|| {
            Error::malformed(format!(
                "offset polygon {i} needs {len} points past the end of the buffer"
            ))
        })?;
        polygons.push(
            coords
                .chunks_exact(2)
                .map(|c| Point2::new(c[0], c[1]))
                .collect(),
        );
        cursor = end;
    }

    if cursor != buffer.coords.len() {
        return Err(Error::malformed(format!(
            "offset buffer has {} trailing values",
            buffer.coords.len() - cursor
        )));
    }

    Ok(polygons)
}
