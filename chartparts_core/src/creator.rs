// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale-creation directives.

use core::fmt;

use crate::error::SceneErrorKind;
use crate::scale::{Scale, Scales};
use crate::value::{DataFrame, Table};
use crate::view::{ViewBounds, ViewSize};

/// Everything a directive may read while building its scale.
#[derive(Clone, Copy, Debug)]
pub struct ScaleCreationContext<'a> {
    /// View size in scope.
    pub view: ViewSize,
    /// Viewport bounds for range fitting (`y` is inverted).
    pub bounds: ViewBounds,
    /// Data tables in scope.
    pub data: &'a DataFrame,
    /// Scales resolved so far: ancestors plus earlier directives on the same node.
    pub scales: &'a Scales,
}

impl<'a> ScaleCreationContext<'a> {
    /// Looks up a scale resolved by an ancestor or an earlier directive.
    pub fn scale(&self, name: &str) -> Result<&'a Scale, SceneErrorKind> {
        self.scales
            .get(name)
            .map(|s| &**s)
            .ok_or_else(|| SceneErrorKind::UnresolvedScale { name: name.into() })
    }

    /// Looks up a data table.
    pub fn table(&self, name: &str) -> Result<&'a Table, SceneErrorKind> {
        self.data
            .get(name)
            .ok_or_else(|| SceneErrorKind::MissingTable { name: name.into() })
    }
}

/// A named scale directive attached to a scene node.
///
/// Directives run in declaration order; each sees the scales produced by the ones before it.
/// Returning `Ok(None)` means the directive could not produce its scale, which aborts the
/// scene pass.
pub trait ScaleCreator: fmt::Debug {
    /// The name the produced scale is registered under.
    fn name(&self) -> &str;

    /// Builds the scale for the current viewport and data.
    fn create(&self, ctx: &ScaleCreationContext<'_>) -> Result<Option<Scale>, SceneErrorKind>;
}
