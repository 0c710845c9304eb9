// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Options controlling skeleton graph construction.

/// Where Border edges come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderSource {
    /// Every consecutive point pair of every input ring (wrapping around).
    /// Kernel segments joining two input vertices are ignored.
    #[default]
    RingAdjacency,
    /// Kernel segments whose two endpoints are both input vertices.
    KernelSegments,
}

impl BorderSource {
    /// Parses `rings` / `kernel` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rings" | "ring-adjacency" => Some(BorderSource::RingAdjacency),
            "kernel" | "kernel-segments" => Some(BorderSource::KernelSegments),
            _ => None,
        }
    }
}

/// Skeleton graph construction options.
#[derive(Debug, Clone, Default)]
pub struct SkeletonOptions {
    /// Border derivation strategy.
    pub border_source: BorderSource,
}

impl SkeletonOptions {
    /// Load options from environment variables.
    ///
    /// `SKELETON_BORDER_SOURCE` selects the border strategy (`rings` or
    /// `kernel`); missing or unrecognised values keep the default.
    pub fn from_env() -> Self {
        let border_source = match std::env::var("SKELETON_BORDER_SOURCE") {
            Ok(value) => BorderSource::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "unknown SKELETON_BORDER_SOURCE, using ring adjacency");
                BorderSource::default()
            }),
            Err(_) => BorderSource::default(),
        };
        Self { border_source }
    }

    /// Sets the border strategy.
    pub fn with_border_source(mut self, border_source: BorderSource) -> Self {
        self.border_source = border_source;
        self
    }
}
