// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Example binary: a faceted bar chart built with `chartparts_scene`.

use std::cell::RefCell;
use std::rc::Rc;

use chartparts_core::{ChartOptions, DataFrame, Datum, Facet, Mark, MarkType, SceneNode, Value};
use chartparts_marks::{SymbolShape, encode, symbol};
use chartparts_scales::{BandScale, Domain, LinearScale, OrdinalScale, Range};
use chartparts_scene::{
    HandlerBoundEvent, MarkEmittedEvent, NodeDescendedEvent, SgMark, TraceSink, Tracer,
    ViewPushedEvent, build_scene_traced,
};
use kurbo::Point;
use peniko::color::palette::css;

/// Prints traversal events to stderr.
struct StderrSink;

impl TraceSink for StderrSink {
    fn on_node_descended(&mut self, e: &NodeDescendedEvent<'_>) {
        eprintln!(
            "[trace] descend {} ({} directives, {} scales)",
            e.path, e.directives, e.scales
        );
    }

    fn on_view_pushed(&mut self, e: &ViewPushedEvent<'_>) {
        let how = if e.reused { "reused" } else { "recomputed" };
        eprintln!(
            "[trace] view {} {}x{} {how}",
            e.path, e.view.width, e.view.height
        );
    }

    fn on_handler_bound(&mut self, e: &HandlerBoundEvent<'_>) {
        eprintln!("[trace] bind {}:{} -> {}", e.path, e.channel, e.id);
    }

    fn on_mark_emitted(&mut self, e: &MarkEmittedEvent<'_>) {
        eprintln!(
            "[trace] emit {} {:?} x{}",
            e.path, e.mark_type, e.items
        );
    }
}

fn sales() -> DataFrame {
    let rows: Vec<Datum> = [
        ("west", "q1", 4.0),
        ("west", "q2", 7.0),
        ("west", "q3", 5.5),
        ("east", "q1", 2.0),
        ("east", "q2", 6.0),
        ("east", "q3", 8.5),
    ]
    .into_iter()
    .map(|(region, quarter, amount)| {
        [
            ("region", Value::from(region)),
            ("quarter", Value::from(quarter)),
            ("amount", Value::from(amount)),
        ]
        .into_iter()
        .collect()
    })
    .collect();
    let mut data = DataFrame::new();
    data.insert("sales".to_string(), rows.into());
    data
}

fn panel(clicked: Rc<RefCell<Vec<String>>>) -> SceneNode {
    SceneNode::new()
        .with_scale(
            BandScale::new("x")
                .domain(Domain::distinct("cell", "quarter"))
                .padding(0.2, 0.1),
        )
        .with_scale(
            LinearScale::new("y")
                .domain(Domain::field("sales", "amount"))
                .range(Range::Height)
                .zero()
                .nice(),
        )
        .with_mark(
            Mark::builder(MarkType::Rect)
                .name("bars")
                .table("cell")
                .encode_rc("x", encode::scaled("x", "quarter"))
                .encode_rc("y", encode::scaled("y", "amount"))
                .encode_rc("width", encode::bandwidth("x"))
                .encode("height", |ctx| {
                    let y = ctx.scale("y")?;
                    let base = y.map_f64(&Value::from(0.0)).unwrap_or_default();
                    let top = y.map_f64(&ctx.field("amount")).unwrap_or(base);
                    Ok(Value::from(base - top))
                })
                .encode_const("fill", css::STEEL_BLUE)
                .on("click", move |event| {
                    if let Some(d) = event.datum {
                        clicked
                            .borrow_mut()
                            .push(format!("{} {}", d.get("quarter"), d.get("amount")));
                    }
                })
                .build(),
        )
        .with_mark(
            symbol(SymbolShape::TriangleRight)
                .name("peaks")
                .table("cell")
                .encode_rc("x", encode::scaled_field_offset("x", "quarter", 4.0))
                .encode_rc("y", encode::scaled("y", "amount"))
                .encode_const("size", 6.0)
                .build(),
        )
}

fn main() {
    let clicked: Rc<RefCell<Vec<String>>> = Rc::default();
    let chart = SceneNode::new()
        .with_scale(
            OrdinalScale::new("region_color")
                .domain(Domain::distinct("sales", "region"))
                .range([css::TOMATO, css::SEA_GREEN]),
        )
        .with_mark(
            Mark::builder(MarkType::Group)
                .name("panels")
                .facet(Facet::new("cell", "sales", "region"))
                .encode("x", |ctx| Ok(Value::from(ctx.index as f64 * 160.0)))
                .encode_const("width", 150.0)
                .encode_rc("height", encode::view_height())
                .encode("stroke", |ctx| {
                    let color = ctx.scale("region_color")?;
                    Ok(color.map(&ctx.field("region")).unwrap_or_default())
                })
                .child(panel(Rc::clone(&clicked)))
                .build(),
        );

    let options = ChartOptions::new()
        .with_size(320.0, 120.0)
        .with_padding(10.0)
        .with_scale(2.0)
        .with_background(css::WHITE)
        .with_origin(Point::new(0.0, 0.0));

    let mut sink = StderrSink;
    let mut tracer = Tracer::new(&mut sink);
    let scene = match build_scene_traced(&chart, sales(), &options, &mut tracer) {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("scene pass failed: {err}");
            std::process::exit(1);
        }
    };

    println!(
        "scene {}x{} ({}x{} px), {} handlers",
        scene.width,
        scene.height,
        scene.pixel_width,
        scene.pixel_height,
        scene.handlers.len()
    );
    print_mark(&scene.root, 0);

    let last_east_bar = scene
        .find("root.panels.facet(region=east).bars")
        .and_then(|bars| bars.items.last());
    if let Some(item) = last_east_bar {
        scene.dispatch(item, "click", Point::new(5.0, 5.0));
    }
    println!("clicked: {:?}", clicked.borrow());
}

fn print_mark(mark: &SgMark, depth: usize) {
    let pad = "  ".repeat(depth);
    println!(
        "{pad}{} [{}] {} item(s)",
        mark.id,
        mark.mark_type.as_str(),
        mark.items.len()
    );
    for item in &mark.items {
        let props: Vec<String> = item
            .props
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        let channels: Vec<String> = item
            .channels
            .iter()
            .map(|(k, v)| format!("{k}->{v}"))
            .collect();
        println!("{pad}  - {{{}}} {}", props.join(", "), channels.join(" "));
        for child in &item.items {
            print_mark(child, depth + 2);
        }
    }
}
