// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closure-backed scale directives.

extern crate alloc;

use alloc::string::String;
use core::fmt;

use chartparts_core::{Scale, ScaleCreationContext, ScaleCreator, SceneErrorKind};

/// A directive backed by a closure; see [`scale_fn`].
pub struct ScaleFn<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for ScaleFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleFn")
            .field("name", &self.name)
            .field("f", &"<fn>")
            .finish()
    }
}

/// Wraps a closure as a directive registering its result under `name`.
///
/// The closure sees every scale resolved before it, so it can derive one scale from another.
pub fn scale_fn<F>(name: impl Into<String>, f: F) -> ScaleFn<F>
where
    F: Fn(&ScaleCreationContext<'_>) -> Result<Option<Scale>, SceneErrorKind>,
{
    ScaleFn {
        name: name.into(),
        f,
    }
}

impl<F> ScaleCreator for ScaleFn<F>
where
    F: Fn(&ScaleCreationContext<'_>) -> Result<Option<Scale>, SceneErrorKind>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, ctx: &ScaleCreationContext<'_>) -> Result<Option<Scale>, SceneErrorKind> {
        (self.f)(ctx)
    }
}
