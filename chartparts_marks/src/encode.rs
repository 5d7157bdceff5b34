// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Encoder combinators.
//!
//! Each function returns a shared [`Encoder`] for use with
//! [`MarkBuilder::encode_rc`](chartparts_core::MarkBuilder::encode_rc).

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;

use chartparts_core::{EncodeContext, Encoder, SceneErrorKind, Value};

/// Always yields `value`.
pub fn constant(value: impl Into<Value>) -> Encoder {
    let value = value.into();
    Rc::new(move |_| Ok(value.clone()))
}

/// Yields a field of the bound row (`Null` when absent).
pub fn field(name: impl Into<String>) -> Encoder {
    let name = name.into();
    Rc::new(move |ctx: &EncodeContext<'_>| Ok(ctx.field(&name)))
}

/// Maps a field of the bound row through a scale.
pub fn scaled(scale: impl Into<String>, field: impl Into<String>) -> Encoder {
    let scale = scale.into();
    let field = field.into();
    Rc::new(move |ctx: &EncodeContext<'_>| {
        ctx.scale(&scale)?
            .map(&ctx.field(&field))
            .ok_or_else(outside_domain)
    })
}

/// Maps a constant through a scale, for baselines such as `y(0)`.
pub fn scaled_value(scale: impl Into<String>, value: impl Into<Value>) -> Encoder {
    let scale = scale.into();
    let value = value.into();
    Rc::new(move |ctx: &EncodeContext<'_>| {
        ctx.scale(&scale)?
            .map(&value)
            .ok_or_else(outside_domain)
    })
}

/// Maps a field through a positional scale and adds `offset`.
pub fn scaled_field_offset(
    scale: impl Into<String>,
    field: impl Into<String>,
    offset: f64,
) -> Encoder {
    let scale = scale.into();
    let field = field.into();
    Rc::new(move |ctx: &EncodeContext<'_>| {
        ctx.scale(&scale)?
            .map_f64(&ctx.field(&field))
            .map(|v| Value::from(v + offset))
            .ok_or_else(outside_domain)
    })
}

/// Yields the band width of a band scale (0 for other scales).
pub fn bandwidth(scale: impl Into<String>) -> Encoder {
    let scale = scale.into();
    Rc::new(move |ctx: &EncodeContext<'_>| Ok(Value::from(ctx.scale(&scale)?.bandwidth())))
}

/// Yields the width of the view in scope.
pub fn view_width() -> Encoder {
    Rc::new(|ctx: &EncodeContext<'_>| Ok(Value::from(ctx.view.width)))
}

/// Yields the height of the view in scope.
pub fn view_height() -> Encoder {
    Rc::new(|ctx: &EncodeContext<'_>| Ok(Value::from(ctx.view.height)))
}

// The scene pass stamps the property key being encoded.
fn outside_domain() -> SceneErrorKind {
    SceneErrorKind::InvalidEncoding {
        property: String::new(),
        reason: "value is outside the scale domain",
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use chartparts_core::{
        DataFrame, Datum, Scale, ScaleBand, ScaleLinear, Scales, ViewBounds, ViewSize,
    };
    use kurbo::Point;

    use super::*;

    fn scales() -> Scales {
        let mut scales = Scales::new();
        scales.insert(
            "y".to_string(),
            Rc::new(Scale::Linear(ScaleLinear::new((0.0, 10.0), (100.0, 0.0)))),
        );
        scales.insert(
            "x".to_string(),
            Rc::new(Scale::Band(
                ScaleBand::new(Rc::from([Value::from("a"), Value::from("b")]), (0.0, 40.0))
                    .with_padding(0.0, 0.0),
            )),
        );
        scales
    }

    fn with_ctx(datum: Option<&Datum>, f: impl FnOnce(&EncodeContext<'_>)) {
        let data = DataFrame::new();
        let scales = scales();
        let ctx = EncodeContext {
            datum,
            index: 0,
            data: &data,
            scales: &scales,
            view: ViewSize::new(40.0, 100.0),
            bounds: ViewBounds::from_corners(Point::ZERO, Point::new(40.0, 100.0)),
        };
        f(&ctx);
    }

    #[test]
    fn field_and_scale_lookups() {
        let row: Datum = [("cat", Value::from("b")), ("v", Value::from(2.5))]
            .into_iter()
            .collect();
        with_ctx(Some(&row), |ctx| {
            assert_eq!(field("cat")(ctx), Ok(Value::from("b")));
            assert_eq!(scaled("y", "v")(ctx), Ok(Value::from(75.0)));
            assert_eq!(scaled("x", "cat")(ctx), Ok(Value::from(20.0)));
            assert_eq!(scaled_field_offset("x", "cat", 5.0)(ctx), Ok(Value::from(25.0)));
            assert_eq!(scaled_value("y", 0.0)(ctx), Ok(Value::from(100.0)));
            assert_eq!(bandwidth("x")(ctx), Ok(Value::from(20.0)));
            assert_eq!(view_height()(ctx), Ok(Value::from(100.0)));
            assert_eq!(view_width()(ctx), Ok(Value::from(40.0)));
            assert_eq!(constant(true)(ctx), Ok(Value::from(true)));
        });
    }

    #[test]
    fn unmapped_and_unresolved_inputs_fail() {
        let row: Datum = [("cat", "zzz")].into_iter().collect();
        with_ctx(Some(&row), |ctx| {
            assert_eq!(
                scaled("x", "cat")(ctx),
                Err(SceneErrorKind::InvalidEncoding {
                    property: String::new(),
                    reason: "value is outside the scale domain",
                })
            );
            assert_eq!(
                scaled("missing", "cat")(ctx),
                Err(SceneErrorKind::UnresolvedScale {
                    name: "missing".into()
                })
            );
        });
        with_ctx(None, |ctx| assert!(scaled("y", "v")(ctx).is_err()));
    }
}
