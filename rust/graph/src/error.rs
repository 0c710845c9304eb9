// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for skeleton graph operations.

use crate::keys::EdgeType;
use crate::point::Point;

/// Result type alias for skeleton graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a skeleton graph.
///
/// None of these are retried internally: the kernel is a deterministic
/// function of its inputs, so the same call would fail the same way.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller supplied input that is rejected before any kernel call
    /// (empty outer ring, non-finite coordinate, non-positive offset distance).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A kernel buffer does not have the expected shape.
    #[error("malformed kernel result: {0}")]
    MalformedResult(String),

    /// A classified edge would start and end at the same position.
    #[error("degenerate {edge_type} edge at ({}, {})", position.x, position.y)]
    DegenerateEdge { edge_type: EdgeType, position: Point },

    /// The kernel failed, or the kernel handle has already been released.
    #[error("kernel resource error: {0}")]
    ResourceError(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedResult(msg.into())
    }

    pub(crate) fn resource(msg: impl Into<String>) -> Self {
        Error::ResourceError(msg.into())
    }
}
