// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View sizes and viewport bounds.

use kurbo::Point;

use crate::error::SceneErrorKind;

/// The size of the drawing surface in scope.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewSize {
    /// Width in scene units.
    pub width: f64,
    /// Height in scene units.
    pub height: f64,
}

impl ViewSize {
    /// Creates a new view size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The default bottom-right corner for this view: `(width, height)`.
    pub fn bottom_right(self) -> Point {
        Point::new(self.width, self.height)
    }
}

/// Scale-fitting bounds derived from a viewport rectangle.
///
/// `y` runs from the bottom edge to the top edge, so screen coordinates (origin at the top)
/// map onto bottom-up scale ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBounds {
    /// Horizontal range: `(left, right)`.
    pub x: (f64, f64),
    /// Vertical range: `(bottom, top)`.
    pub y: (f64, f64),
}

impl ViewBounds {
    /// Derives bounds from a viewport's corners.
    pub fn from_corners(top_left: Point, bottom_right: Point) -> Self {
        Self {
            x: (top_left.x, bottom_right.x),
            y: (bottom_right.y, top_left.y),
        }
    }
}

/// Checks that a view and its viewport can be used for scale fitting.
///
/// All values must be finite, the view must not have a negative extent, and the viewport's
/// top-left corner must not lie right of or below its bottom-right corner.
pub fn validate_viewport(
    view: ViewSize,
    top_left: Point,
    bottom_right: Point,
) -> Result<(), SceneErrorKind> {
    let coords = [
        view.width,
        view.height,
        top_left.x,
        top_left.y,
        bottom_right.x,
        bottom_right.y,
    ];
    if coords.iter().any(|v| !v.is_finite()) {
        return Err(SceneErrorKind::MalformedViewport {
            reason: "non-finite view or viewport coordinate",
        });
    }
    if view.width < 0.0 || view.height < 0.0 {
        return Err(SceneErrorKind::MalformedViewport {
            reason: "negative view size",
        });
    }
    if top_left.x > bottom_right.x || top_left.y > bottom_right.y {
        return Err(SceneErrorKind::MalformedViewport {
            reason: "viewport top-left lies beyond bottom-right",
        });
    }
    Ok(())
}
