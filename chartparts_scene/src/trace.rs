// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for the scene pass.
//!
//! [`TraceSink`] has one method per traversal event, each defaulting to a no-op.
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. With the `trace` feature off every
//! `Tracer` method compiles to nothing; with it on, each call is one `Option` branch.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies.

use chartparts_core::{MarkType, ViewSize};

/// Emitted after a frame descends into a node and resolves its scales.
#[derive(Clone, Copy, Debug)]
pub struct NodeDescendedEvent<'a> {
    /// Path id of the frame.
    pub path: &'a str,
    /// Number of scale directives on the node.
    pub directives: usize,
    /// Number of scales in scope after resolution.
    pub scales: usize,
}

/// Emitted after a view change is requested on a frame.
#[derive(Clone, Copy, Debug)]
pub struct ViewPushedEvent<'a> {
    /// Path id of the frame.
    pub path: &'a str,
    /// Requested view size.
    pub view: ViewSize,
    /// `true` if the frame was reused without recomputing scales.
    pub reused: bool,
}

/// Emitted when a mark channel is bound to a handler id.
#[derive(Clone, Copy, Debug)]
pub struct HandlerBoundEvent<'a> {
    /// Path id of the mark.
    pub path: &'a str,
    /// Channel name.
    pub channel: &'a str,
    /// Minted handler id.
    pub id: &'a str,
}

/// Emitted after a mark and its items have been produced.
#[derive(Clone, Copy, Debug)]
pub struct MarkEmittedEvent<'a> {
    /// Path id of the mark.
    pub path: &'a str,
    /// Structural type.
    pub mark_type: MarkType,
    /// Number of items emitted.
    pub items: usize,
}

/// Receives trace events from the scene pass.
///
/// All methods have default no-op implementations.
pub trait TraceSink {
    /// Called after a node's scales are resolved.
    fn on_node_descended(&mut self, e: &NodeDescendedEvent<'_>) {
        _ = e;
    }

    /// Called after a view push.
    fn on_view_pushed(&mut self, e: &ViewPushedEvent<'_>) {
        _ = e;
    }

    /// Called when a channel handler is registered.
    fn on_handler_bound(&mut self, e: &HandlerBoundEvent<'_>) {
        _ = e;
    }

    /// Called when a mark is finished.
    fn on_mark_emitted(&mut self, e: &MarkEmittedEvent<'_>) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`NodeDescendedEvent`].
    #[inline]
    pub fn node_descended(&mut self, e: &NodeDescendedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_node_descended(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ViewPushedEvent`].
    #[inline]
    pub fn view_pushed(&mut self, e: &ViewPushedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_view_pushed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HandlerBoundEvent`].
    #[inline]
    pub fn handler_bound(&mut self, e: &HandlerBoundEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_handler_bound(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MarkEmittedEvent`].
    #[inline]
    pub fn mark_emitted(&mut self, e: &MarkEmittedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_mark_emitted(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn node_event() -> NodeDescendedEvent<'static> {
        NodeDescendedEvent {
            path: "root",
            directives: 2,
            scales: 2,
        }
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.node_descended(&node_event());
        tracer.mark_emitted(&MarkEmittedEvent {
            path: "root.rect",
            mark_type: MarkType::Rect,
            items: 3,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::string::{String, ToString};
        use alloc::vec::Vec;

        struct RecordingSink {
            paths: Vec<String>,
        }
        impl TraceSink for RecordingSink {
            fn on_node_descended(&mut self, e: &NodeDescendedEvent<'_>) {
                self.paths.push(e.path.to_string());
            }
        }

        let mut sink = RecordingSink { paths: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.node_descended(&node_event());
        tracer.view_pushed(&ViewPushedEvent {
            path: "root",
            view: ViewSize::new(1.0, 1.0),
            reused: true,
        });
        drop(tracer);
        assert_eq!(sink.paths, ["root"]);
    }
}
