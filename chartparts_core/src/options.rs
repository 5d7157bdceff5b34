// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart-level rendering options.

use kurbo::{Insets, Point};
use peniko::Color;

use crate::view::ViewSize;

/// Padding around the drawing area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Padding {
    /// The same inset on every edge.
    Uniform(f64),
    /// Independent per-edge insets.
    Edges {
        /// Top inset.
        top: f64,
        /// Right inset.
        right: f64,
        /// Bottom inset.
        bottom: f64,
        /// Left inset.
        left: f64,
    },
}

impl Padding {
    /// Converts to `kurbo` insets (`x0` = left, `y0` = top, `x1` = right, `y1` = bottom).
    pub fn insets(self) -> Insets {
        match self {
            Self::Uniform(v) => Insets::uniform(v),
            Self::Edges {
                top,
                right,
                bottom,
                left,
            } => Insets::new(left, top, right, bottom),
        }
    }
}

impl From<f64> for Padding {
    fn from(value: f64) -> Self {
        Self::Uniform(value)
    }
}

/// Top-level options: dimensions, scaling, and coloration.
///
/// Every field is optional. Unset dimensions fall back to the root node's natural size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartOptions {
    /// Origin of the display in pixels; the coordinate system is translated to this point.
    pub origin: Option<Point>,
    /// Factor by which width and height are multiplied to get the final pixel size.
    pub scale: Option<f64>,
    /// Chart width.
    pub width: Option<f64>,
    /// Chart height.
    pub height: Option<f64>,
    /// Background color.
    pub background: Option<Color>,
    /// Padding between the chart bounds and the drawing area.
    pub padding: Option<Padding>,
}

impl ChartOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the origin.
    pub fn with_origin(mut self, origin: impl Into<Point>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the pixel scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets width and height.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Sets the padding.
    pub fn with_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    /// Resolves the chart size, preferring explicit options over `natural`.
    pub fn view_size(&self, natural: Option<ViewSize>) -> ViewSize {
        let natural = natural.unwrap_or_default();
        ViewSize {
            width: self.width.unwrap_or(natural.width),
            height: self.height.unwrap_or(natural.height),
        }
    }

    /// Resolved padding insets (zero when unset).
    pub fn insets(&self) -> Insets {
        self.padding.map_or(Insets::ZERO, Padding::insets)
    }

    /// Returns the drawing-area corners inside `view` after padding.
    pub fn viewport(&self, view: ViewSize) -> (Point, Point) {
        let insets = self.insets();
        (
            Point::new(insets.x0, insets.y0),
            Point::new(view.width - insets.x1, view.height - insets.y1),
        )
    }

    /// Resolved pixel scale factor (1 when unset).
    pub fn scale_factor(&self) -> f64 {
        self.scale.unwrap_or(1.0)
    }
}
