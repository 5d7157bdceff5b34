// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output ranges for positional scales.

extern crate alloc;

use alloc::string::String;

use chartparts_core::{ScaleCreationContext, SceneErrorKind};

/// Where a positional scale's output range comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum Range {
    /// Horizontal viewport bounds: `(left, right)`.
    Width,
    /// Vertical viewport bounds: `(bottom, top)`.
    Height,
    /// A fixed range.
    Fixed(f64, f64),
    /// `(0, bandwidth)` of a previously resolved band scale.
    BandwidthOf(String),
}

impl Range {
    /// `(0, bandwidth)` of the named scale.
    pub fn bandwidth_of(scale: impl Into<String>) -> Self {
        Self::BandwidthOf(scale.into())
    }

    /// Resolves the range against the current viewport and scales.
    pub(crate) fn resolve(
        &self,
        ctx: &ScaleCreationContext<'_>,
    ) -> Result<(f64, f64), SceneErrorKind> {
        Ok(match self {
            Self::Width => ctx.bounds.x,
            Self::Height => ctx.bounds.y,
            Self::Fixed(a, b) => (*a, *b),
            Self::BandwidthOf(name) => (0.0, ctx.scale(name)?.bandwidth()),
        })
    }
}
