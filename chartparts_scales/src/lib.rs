// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vega-ish scale-creation directives for `chartparts_core`.
//!
//! Each directive implements [`chartparts_core::ScaleCreator`]: it names the scale it
//! produces and builds it from the viewport bounds and data in scope.
//! - **Domains** come from fixed extents, explicit members, or in-scope tables ([`Domain`]).
//! - **Ranges** come from the viewport bounds or from earlier scales ([`Range`]).
//!
//! Data-driven domains with no usable values produce no scale, which the scene pass reports
//! as an error rather than silently dropping the name.

#![no_std]

extern crate alloc;

mod continuous;
mod discrete;
mod domain;
mod func;
mod range;

pub use continuous::{LinearScale, LogScale};
pub use discrete::{BandScale, OrdinalScale, PointScale};
pub use domain::{Domain, distinct_values, infer_extent};
pub use func::{ScaleFn, scale_fn};
pub use range::Range;
