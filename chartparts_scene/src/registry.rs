// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler-id minting for event channels.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Cell, RefCell};
use core::fmt;

use chartparts_core::ChannelHandler;

use crate::graph::ChannelHandlers;

/// Channel name (for example `click`) to handler id, for one mark.
pub type ChannelNames = BTreeMap<String, String>;

/// The shared id counter and handler table for one scene pass.
///
/// Every frame of a pass borrows the same registry. Ids are `evt0`, `evt1`, … and are never
/// reused; registering a channel name again mints a fresh id and leaves the earlier table entry
/// in place. The registry is not `Sync`, so a pass cannot share it across threads.
pub struct ChannelRegistry {
    next_id: Cell<u64>,
    handlers: RefCell<ChannelHandlers>,
}

impl fmt::Debug for ChannelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelRegistry")
            .field("next_id", &self.next_id.get())
            .field("handlers_len", &self.handlers.borrow().len())
            .finish()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelRegistry {
    /// Creates an empty registry whose first id is `evt0`.
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            handlers: RefCell::new(ChannelHandlers::default()),
        }
    }

    /// Stores `handler` under a freshly minted id and returns the id.
    pub fn register(&self, handler: ChannelHandler) -> String {
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        let id = format!("evt{n}");
        self.handlers.borrow_mut().insert(id.clone(), handler);
        id
    }

    /// Registers every channel of a mark, in declaration order.
    ///
    /// When a name repeats, the later registration wins in the returned mapping.
    pub fn register_channels(&self, channels: &[(String, ChannelHandler)]) -> ChannelNames {
        let mut names = ChannelNames::new();
        for (name, handler) in channels {
            names.insert(name.clone(), self.register(Rc::clone(handler)));
        }
        names
    }

    /// The counter value the next registration will use.
    pub fn channel_id(&self) -> u64 {
        self.next_id.get()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the registry, returning the completed handler table.
    pub fn into_handlers(self) -> ChannelHandlers {
        self.handlers.into_inner()
    }
}
