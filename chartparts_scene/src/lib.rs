// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `chartparts_scene`: the scene composition engine.
//!
//! A scene pass walks a [`chartparts_core::SceneNode`] tree with an immutable
//! [`SceneFrame`]. Each step derives a new frame:
//! - entering a node resolves its scale directives against the viewport in scope
//!   ([`resolve_scales`])
//! - entering a mark registers its event channels ([`ChannelRegistry`]) and extends the path id
//! - binding data overlays tables, and faceting adds a `facet(<key>)` path segment
//! - pushing a view recomputes the node's scales, unless the view is unchanged
//!
//! [`build_scene`] runs a whole pass and returns a [`SceneGraph`] of emitted marks and items
//! together with the handler table a renderer uses to dispatch interaction events.
//!
//! ## Minimal example
//!
//! ```rust
//! use chartparts_core::{ChartOptions, DataFrame, Mark, MarkType, SceneNode};
//! use chartparts_scene::build_scene;
//!
//! let node = SceneNode::new().with_mark(
//!     Mark::builder(MarkType::Rect)
//!         .name("background")
//!         .encode_const("fill", "#eee")
//!         .on("click", |_| {})
//!         .build(),
//! );
//! let options = ChartOptions::new().with_size(200.0, 100.0);
//! let scene = build_scene(&node, DataFrame::new(), &options).unwrap();
//!
//! let mark = &scene.marks()[0];
//! assert_eq!(mark.id, "root.background");
//! assert_eq!(mark.items[0].handler_id("click"), Some("evt0"));
//! ```
//!
//! # Crate features
//!
//! - `std`: forwards to `chartparts_core/std`.
//! - `libm`: `no_std` float math.
//! - `trace`: enables [`Tracer`] dispatch to a [`TraceSink`].

#![no_std]

extern crate alloc;

mod builder;
mod frame;
mod graph;
mod registry;
mod resolver;
mod trace;
#[cfg(test)]
mod traversal_tests;

pub use builder::{build_scene, build_scene_traced};
pub use frame::{ROOT_ID, SceneFrame};
pub use graph::{ChannelHandlers, SceneGraph, SgItem, SgMark};
pub use registry::{ChannelNames, ChannelRegistry};
pub use resolver::resolve_scales;
pub use trace::{
    HandlerBoundEvent, MarkEmittedEvent, NodeDescendedEvent, NoopSink, TraceSink, Tracer,
    ViewPushedEvent,
};
