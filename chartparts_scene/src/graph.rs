// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The renderer-facing scene graph produced by a scene pass.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use chartparts_core::{ChannelEvent, ChannelHandler, Datum, MarkType, Value};
use hashbrown::HashMap;
use kurbo::{Insets, Point};
use peniko::Color;

use crate::registry::ChannelNames;

/// Handler table keyed by handler id (`evt0`, `evt1`, …).
#[derive(Clone, Default)]
pub struct ChannelHandlers {
    handlers: HashMap<String, ChannelHandler>,
}

impl fmt::Debug for ChannelHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("ChannelHandlers").field("ids", &ids).finish()
    }
}

impl ChannelHandlers {
    pub(crate) fn insert(&mut self, id: String, handler: ChannelHandler) {
        self.handlers.insert(id, handler);
    }

    /// Looks up a handler by id.
    pub fn get(&self, id: &str) -> Option<&ChannelHandler> {
        self.handlers.get(id)
    }

    /// Returns `true` if `id` was minted during the pass.
    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if the pass bound no channels.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates `(id, handler)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChannelHandler)> {
        self.handlers.iter().map(|(id, h)| (id.as_str(), h))
    }

    /// Invokes the handler registered under `event.id`.
    ///
    /// Returns `false` if no such handler exists.
    pub fn dispatch(&self, event: &ChannelEvent<'_>) -> bool {
        match self.handlers.get(event.id) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

/// One emitted mark and its items.
#[derive(Clone, Debug)]
pub struct SgMark {
    /// Structural type.
    pub mark_type: MarkType,
    /// Explicit name from the declaration.
    pub name: Option<String>,
    /// Semantic role from the declaration.
    pub role: Option<String>,
    /// Path id of the mark, for example `root.bars`.
    pub id: String,
    /// Rendering order hint.
    pub z_index: i32,
    /// Items in emission order.
    pub items: Vec<SgItem>,
}

impl SgMark {
    /// Depth-first search for a mark by path id, starting with `self`.
    pub fn find(&self, id: &str) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.items
            .iter()
            .flat_map(|item| item.items.iter())
            .find_map(|mark| mark.find(id))
    }
}

/// One emitted item.
#[derive(Clone, Debug, Default)]
pub struct SgItem {
    /// Encoded properties.
    pub props: BTreeMap<String, Value>,
    /// Channel name to handler id, shared by every item of the mark.
    pub channels: Rc<ChannelNames>,
    /// Row bound to the item.
    pub datum: Option<Datum>,
    /// Nested marks (group items only).
    pub items: Vec<SgMark>,
}

impl SgItem {
    /// Reads an encoded property.
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// Reads an encoded numeric property.
    pub fn f64(&self, name: &str) -> Option<f64> {
        self.prop(name).and_then(Value::as_f64)
    }

    /// The handler id bound to `channel`.
    pub fn handler_id(&self, channel: &str) -> Option<&str> {
        self.channels.get(channel).map(String::as_str)
    }
}

/// The result of a scene pass.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    /// Root group mark (id `root`), holding one item whose children are the top-level marks.
    pub root: SgMark,
    /// Every handler minted during the pass.
    pub handlers: ChannelHandlers,
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Width multiplied by the chart scale factor.
    pub pixel_width: f64,
    /// Height multiplied by the chart scale factor.
    pub pixel_height: f64,
    /// Scene origin.
    pub origin: Point,
    /// Background fill.
    pub background: Option<Color>,
    /// Padding between the view edge and the root viewport.
    pub padding: Insets,
}

impl SceneGraph {
    /// The top-level marks of the root node.
    pub fn marks(&self) -> &[SgMark] {
        self.root
            .items
            .first()
            .map(|item| item.items.as_slice())
            .unwrap_or_default()
    }

    /// Finds a mark anywhere in the graph by path id.
    pub fn find(&self, id: &str) -> Option<&SgMark> {
        self.root.find(id)
    }

    /// Dispatches a channel event for `item` to the handler bound to `channel`.
    ///
    /// Returns `false` if the item has no such channel.
    pub fn dispatch(&self, item: &SgItem, channel: &str, point: Point) -> bool {
        let Some(id) = item.handler_id(channel) else {
            return false;
        };
        self.handlers.dispatch(&ChannelEvent {
            id,
            datum: item.datum.as_ref(),
            point,
        })
    }
}
