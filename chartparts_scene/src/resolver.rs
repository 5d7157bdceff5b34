// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequential scale resolution.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::ToString;

use chartparts_core::{
    DataFrame, ScaleCreationContext, ScaleCreator, Scales, SceneErrorKind, ViewBounds, ViewSize,
};

/// Runs a node's scale directives over the scales inherited from its ancestors.
///
/// Directives run in order, and each one sees the results of those before it. Inherited
/// entries that no directive names are carried over as the same shared objects. When there
/// are no directives, `prior` itself is returned.
///
/// A directive that returns `Ok(None)` fails the resolution with
/// [`SceneErrorKind::UnproducedScale`].
pub fn resolve_scales(
    directives: &[Rc<dyn ScaleCreator>],
    view: ViewSize,
    bounds: ViewBounds,
    data: &DataFrame,
    prior: &Rc<Scales>,
) -> Result<Rc<Scales>, SceneErrorKind> {
    if directives.is_empty() {
        return Ok(Rc::clone(prior));
    }
    let mut scales = Scales::clone(prior);
    for directive in directives {
        let ctx = ScaleCreationContext {
            view,
            bounds,
            data,
            scales: &scales,
        };
        let Some(scale) = directive.create(&ctx)? else {
            return Err(SceneErrorKind::UnproducedScale {
                name: directive.name().to_string(),
            });
        };
        scales.insert(directive.name().to_string(), Rc::new(scale));
    }
    Ok(Rc::new(scales))
}
