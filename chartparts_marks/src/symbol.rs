// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbol shapes for point-like marks.

use core::fmt;

use chartparts_core::{Mark, MarkBuilder, MarkType};
use kurbo::{BezPath, Circle, Shape};

/// The glyph drawn by a symbol mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolShape {
    /// A circle.
    Circle,
    /// A plus-shaped cross.
    Cross,
    /// A square rotated by 45 degrees.
    Diamond,
    /// An axis-aligned square.
    Square,
    /// A triangle pointing up.
    TriangleUp,
    /// A triangle pointing down.
    TriangleDown,
    /// A triangle pointing left.
    TriangleLeft,
    /// A triangle pointing right.
    TriangleRight,
}

/// Shape tags in declaration order.
const SHAPE_TAGS: [(SymbolShape, &str); 8] = [
    (SymbolShape::Circle, "circle"),
    (SymbolShape::Cross, "cross"),
    (SymbolShape::Diamond, "diamond"),
    (SymbolShape::Square, "square"),
    (SymbolShape::TriangleUp, "triangle-up"),
    (SymbolShape::TriangleDown, "triangle-down"),
    (SymbolShape::TriangleLeft, "triangle-left"),
    (SymbolShape::TriangleRight, "triangle-right"),
];

impl SymbolShape {
    /// Every shape, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Circle,
        Self::Cross,
        Self::Diamond,
        Self::Square,
        Self::TriangleUp,
        Self::TriangleDown,
        Self::TriangleLeft,
        Self::TriangleRight,
    ];

    /// The `shape` property value emitted for this glyph.
    pub fn tag(self) -> &'static str {
        SHAPE_TAGS[self as usize].1
    }

    /// Parses a shape tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        SHAPE_TAGS
            .iter()
            .find(|(_, t)| *t == tag)
            .map(|(shape, _)| *shape)
    }

    /// Returns a path for this symbol centered at `cx, cy`, using `size` as the diameter/side.
    pub fn path(self, cx: f64, cy: f64, size: f64) -> BezPath {
        let h = size * 0.5;
        match self {
            Self::Circle => circle_path(cx, cy, h),
            Self::Square => polygon(&[
                (cx - h, cy - h),
                (cx + h, cy - h),
                (cx + h, cy + h),
                (cx - h, cy + h),
            ]),
            Self::Diamond => polygon(&[(cx, cy - h), (cx + h, cy), (cx, cy + h), (cx - h, cy)]),
            Self::Cross => {
                let t = size / 6.0;
                polygon(&[
                    (cx - t, cy - h),
                    (cx + t, cy - h),
                    (cx + t, cy - t),
                    (cx + h, cy - t),
                    (cx + h, cy + t),
                    (cx + t, cy + t),
                    (cx + t, cy + h),
                    (cx - t, cy + h),
                    (cx - t, cy + t),
                    (cx - h, cy + t),
                    (cx - h, cy - t),
                    (cx - t, cy - t),
                ])
            }
            Self::TriangleUp => polygon(&[(cx, cy - h), (cx + h, cy + h), (cx - h, cy + h)]),
            Self::TriangleDown => polygon(&[(cx - h, cy - h), (cx + h, cy - h), (cx, cy + h)]),
            Self::TriangleLeft => polygon(&[(cx - h, cy), (cx + h, cy - h), (cx + h, cy + h)]),
            Self::TriangleRight => polygon(&[(cx - h, cy - h), (cx + h, cy), (cx - h, cy + h)]),
        }
    }
}

impl fmt::Display for SymbolShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Starts a symbol mark whose `shape` property is `shape`'s tag.
///
/// `size` and position are encoded through the returned builder like any other property.
pub fn symbol(shape: SymbolShape) -> MarkBuilder {
    Mark::builder(MarkType::Symbol).encode_const("shape", shape.tag())
}

fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut p = BezPath::new();
    let mut iter = points.iter().copied();
    if let Some(first) = iter.next() {
        p.move_to(first);
        for pt in iter {
            p.line_to(pt);
        }
        p.close_path();
    }
    p
}

fn circle_path(cx: f64, cy: f64, r: f64) -> BezPath {
    // The tolerance suits screen-space glyph sizes.
    let tolerance = 0.1;
    Circle::new((cx, cy), r).path_elements(tolerance).collect()
}
