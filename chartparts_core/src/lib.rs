// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `chartparts_core`: the input model for chartparts scene composition.
//!
//! This crate provides:
//! - dynamic values and shared data rows ([`Value`], [`Datum`], [`DataFrame`])
//! - view geometry with the bottom-up vertical convention used for scale fitting
//!   ([`ViewSize`], [`ViewBounds`])
//! - chart-level options ([`ChartOptions`], [`Padding`])
//! - the declarative mark tree ([`SceneNode`], [`Mark`], [`Encoder`], [`ChannelHandler`])
//! - resolved scale objects ([`Scale`]) and the directive trait that produces them
//!   ([`ScaleCreator`])
//!
//! It does NOT walk the tree; see `chartparts_scene` for the composition engine.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod creator;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod options;
mod scale;
mod tree;
mod value;
mod view;

pub use creator::{ScaleCreationContext, ScaleCreator};
pub use error::{SceneError, SceneErrorKind};
pub use options::{ChartOptions, Padding};
pub use scale::{
    Scale, ScaleBand, ScaleLinear, ScaleLog, ScaleOrdinal, ScalePoint, Scales, nice_domain,
};
pub use tree::{
    ChannelEvent, ChannelHandler, EncodeContext, Encoder, Facet, Mark, MarkBuilder, MarkType,
    SceneNode,
};
pub use value::{DataFrame, Datum, Table, Value, merge_data};
pub use view::{ViewBounds, ViewSize, validate_viewport};
