// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use chartparts_core::{
    ChartOptions, DataFrame, Datum, Facet, Mark, MarkType, Padding, Scale, ScaleCreationContext,
    ScaleCreator, SceneErrorKind, SceneNode, Table, Value, ViewBounds, ViewSize,
};
use chartparts_marks::encode;
use chartparts_scales::{BandScale, Domain, LinearScale, Range, scale_fn};
use hashbrown::HashSet;
use kurbo::Point;
use peniko::color::palette::css;

use crate::{ChannelRegistry, ROOT_ID, SceneFrame, build_scene};

#[derive(Debug)]
struct CountingScale {
    name: &'static str,
    calls: Rc<Cell<usize>>,
}

impl ScaleCreator for CountingScale {
    fn name(&self) -> &str {
        self.name
    }

    fn create(
        &self,
        ctx: &ScaleCreationContext<'_>,
    ) -> Result<Option<Scale>, SceneErrorKind> {
        self.calls.set(self.calls.get() + 1);
        Ok(Some(Scale::Linear(chartparts_core::ScaleLinear::new(
            (0.0, 1.0),
            ctx.bounds.x,
        ))))
    }
}

fn table(rows: Vec<Datum>) -> Table {
    Table::from(rows)
}

fn sales() -> DataFrame {
    let rows = [
        ("west", "a", 4.0),
        ("west", "b", 8.0),
        ("east", "a", 2.0),
        ("east", "b", 6.0),
    ]
    .into_iter()
    .map(|(region, cat, v)| {
        [
            ("region", Value::from(region)),
            ("cat", Value::from(cat)),
            ("v", Value::from(v)),
        ]
        .into_iter()
        .collect()
    })
    .collect();
    let mut data = DataFrame::new();
    data.insert("sales".to_string(), table(rows));
    data
}

#[test]
fn unchanged_view_reuses_frame_without_resolving() {
    let calls = Rc::new(Cell::new(0));
    let node = SceneNode::new().with_scale(CountingScale {
        name: "x",
        calls: Rc::clone(&calls),
    });
    let registry = ChannelRegistry::new();
    let root = SceneFrame::new(&node, DataFrame::new(), ViewSize::new(300.0, 200.0), &registry);
    let frame = root.descend(&node).unwrap();
    assert_eq!(calls.get(), 1);

    let same = frame
        .push_view(frame.view(), Some(frame.view_top_left()), None)
        .unwrap();
    assert!(matches!(same, Cow::Borrowed(_)));
    assert!(core::ptr::eq(&*same, &frame));
    assert_eq!(calls.get(), 1);

    // The bottom-right corner does not take part in the comparison.
    let same = frame
        .push_view(frame.view(), None, Some(Point::new(10.0, 10.0)))
        .unwrap();
    assert!(core::ptr::eq(&*same, &frame));
    assert_eq!(calls.get(), 1);

    let resized = frame
        .push_view(ViewSize::new(150.0, 200.0), None, None)
        .unwrap();
    assert!(matches!(resized, Cow::Owned(_)));
    assert_eq!(calls.get(), 2);
    assert_eq!(resized.scale("x").unwrap().range(), Some((0.0, 150.0)));
    assert_eq!(frame.scale("x").unwrap().range(), Some((0.0, 300.0)));

    let moved = frame
        .push_view(frame.view(), Some(Point::new(5.0, 0.0)), None)
        .unwrap();
    assert!(matches!(moved, Cow::Owned(_)));
    assert_eq!(calls.get(), 3);
}

#[test]
fn untouched_ancestor_scales_are_shared() {
    let parent = SceneNode::new().with_scale(LinearScale::new("y").range(Range::Height));
    let child = SceneNode::new().with_scale(LinearScale::new("x"));
    let registry = ChannelRegistry::new();
    let root = SceneFrame::new(&parent, DataFrame::new(), ViewSize::new(100.0, 50.0), &registry);
    let outer = root.descend(&parent).unwrap();
    let inner = outer.descend(&child).unwrap();

    assert!(Rc::ptr_eq(&outer.scales()["y"], &inner.scales()["y"]));
    assert!(inner.scales().contains_key("x"));
    assert!(!outer.scales().contains_key("x"));

    let bare = SceneNode::new();
    let passthrough = inner.descend(&bare).unwrap();
    assert!(Rc::ptr_eq(inner.scales(), passthrough.scales()));
}

#[test]
fn handler_ids_are_unique_across_frames() {
    let click = Mark::builder(MarkType::Rect)
        .on("click", |_| {})
        .on("hover", |_| {})
        .build();
    let other = Mark::builder(MarkType::Symbol).on("click", |_| {}).build();
    let node = SceneNode::new();
    let registry = ChannelRegistry::new();
    let root = SceneFrame::new(&node, DataFrame::new(), ViewSize::default(), &registry);

    let mut minted: Vec<String> = Vec::new();
    for _ in 0..3 {
        let a = root.enter_mark(&click);
        let b = root.descend(&node).unwrap().enter_mark(&other);
        minted.extend(a.channel_names().values().cloned());
        minted.extend(b.channel_names().values().cloned());
    }
    let unique: HashSet<&String> = minted.iter().collect();
    assert_eq!(unique.len(), minted.len());
    assert_eq!(root.channel_id(), 9);

    let handlers = registry.into_handlers();
    assert_eq!(handlers.len(), 9);
    for id in &minted {
        assert!(handlers.contains(id));
    }
}

#[test]
fn vertical_bounds_are_inverted() {
    let seen: Rc<Cell<Option<ViewBounds>>> = Rc::new(Cell::new(None));
    let probe = Rc::clone(&seen);
    let node = SceneNode::new().with_scale(scale_fn("probe", move |ctx| {
        probe.set(Some(ctx.bounds));
        Ok(Some(Scale::Linear(chartparts_core::ScaleLinear::new(
            (0.0, 1.0),
            (0.0, 1.0),
        ))))
    }));
    let registry = ChannelRegistry::new();
    let root = SceneFrame::new(&node, DataFrame::new(), ViewSize::new(300.0, 200.0), &registry);
    root.descend(&node).unwrap();

    let bounds = seen.get().unwrap();
    assert_eq!(bounds.x, (0.0, 300.0));
    assert_eq!(bounds.y, (200.0, 0.0));
}

#[test]
fn pushed_data_wins_on_collision() {
    let node = SceneNode::new();
    let registry = ChannelRegistry::new();
    let row = |v: f64| -> Datum { [("v", v)].into_iter().collect() };
    let mut base = DataFrame::new();
    base.insert("keep".to_string(), table(vec![row(0.0)]));
    let root = SceneFrame::new(&node, base, ViewSize::default(), &registry);

    let mut first = DataFrame::new();
    first.insert("a".to_string(), table(vec![row(1.0)]));
    let mut second = DataFrame::new();
    second.insert("a".to_string(), table(vec![row(2.0)]));
    second.insert("b".to_string(), table(vec![row(3.0)]));

    let frame = root.push_data(&first, None).push_data(&second, None);
    assert_eq!(frame.table("a").unwrap()[0].f64("v"), Some(2.0));
    assert_eq!(frame.table("b").unwrap()[0].f64("v"), Some(3.0));
    assert_eq!(frame.table("keep").unwrap()[0].f64("v"), Some(0.0));
    assert!(root.table("a").is_err());
}

#[test]
fn facet_key_extends_path_id() {
    let node = SceneNode::new();
    let bar = Mark::builder(MarkType::Rect).name("bar").build();
    let registry = ChannelRegistry::new();
    let root = SceneFrame::new(&node, DataFrame::new(), ViewSize::default(), &registry);
    let frame = root.enter_mark(&bar);
    assert_eq!(frame.parent_id(), "root.bar");

    let faceted = frame.push_data(&DataFrame::new(), Some("region=west"));
    assert_eq!(faceted.parent_id(), "root.bar.facet(region=west)");
    let plain = frame.push_data(&DataFrame::new(), None);
    assert_eq!(plain.parent_id(), "root.bar");
}

fn bar_chart() -> SceneNode {
    SceneNode::new()
        .with_scale(
            BandScale::new("x")
                .domain(Domain::distinct("sales", "cat"))
                .padding(0.0, 0.0),
        )
        .with_scale(
            LinearScale::new("y")
                .domain(Domain::Fixed(0.0, 10.0))
                .range(Range::Height),
        )
        .with_mark(
            Mark::builder(MarkType::Rect)
                .name("bars")
                .table("sales")
                .encode_rc("x", encode::scaled("x", "cat"))
                .encode_rc("y", encode::scaled("y", "v"))
                .encode_rc("width", encode::bandwidth("x"))
                .on("click", |_| {})
                .build(),
        )
}

#[test]
fn bar_chart_encodes_items_bottom_up() {
    let options = ChartOptions::new().with_size(200.0, 100.0);
    let scene = build_scene(&bar_chart(), sales(), &options).unwrap();

    assert_eq!(scene.root.id, ROOT_ID);
    let bars = scene.find("root.bars").unwrap();
    assert_eq!(bars.items.len(), 4);
    let first = &bars.items[0];
    assert_eq!(first.f64("x"), Some(0.0));
    assert_eq!(first.f64("y"), Some(60.0));
    assert_eq!(first.f64("width"), Some(100.0));
    assert_eq!(bars.items[1].f64("x"), Some(100.0));

    // Every item of a mark shares one channel binding.
    let id = first.handler_id("click").unwrap();
    assert!(bars.items.iter().all(|i| i.handler_id("click") == Some(id)));
    assert_eq!(scene.handlers.len(), 1);
}

#[test]
fn padding_and_options_shape_the_root() {
    let options = ChartOptions::new()
        .with_size(200.0, 100.0)
        .with_padding(Padding::Uniform(10.0))
        .with_scale(2.0)
        .with_background(css::WHITE);
    let scene = build_scene(&bar_chart(), sales(), &options).unwrap();
    assert_eq!(scene.pixel_width, 400.0);
    assert_eq!(scene.pixel_height, 200.0);
    assert_eq!(scene.background, Some(css::WHITE));
    assert_eq!(scene.padding.x0, 10.0);

    let bars = &scene.marks()[0];
    assert_eq!(bars.items[0].f64("x"), Some(10.0));
    assert_eq!(bars.items[0].f64("width"), Some(90.0));
    // (v = 4) over y range (90, 10).
    assert_eq!(bars.items[0].f64("y"), Some(58.0));
}

#[test]
fn right_and_bottom_padding_shrink_the_root_viewport() {
    let node = SceneNode::new()
        .with_scale(
            LinearScale::new("x")
                .domain(Domain::Fixed(0.0, 1.0))
                .range(Range::Width),
        )
        .with_scale(
            LinearScale::new("y")
                .domain(Domain::Fixed(0.0, 1.0))
                .range(Range::Height),
        )
        .with_mark(
            Mark::builder(MarkType::Rect)
                .name("edge")
                .encode_rc("x", encode::scaled_value("x", 1.0))
                .encode_rc("y", encode::scaled_value("y", 0.0))
                .build(),
        );
    let options = ChartOptions::new()
        .with_size(200.0, 100.0)
        .with_padding(Padding::Edges {
            top: 0.0,
            right: 50.0,
            bottom: 20.0,
            left: 0.0,
        });
    let scene = build_scene(&node, DataFrame::new(), &options).unwrap();
    let edge = &scene.marks()[0].items[0];
    assert_eq!(edge.f64("x"), Some(150.0));
    assert_eq!(edge.f64("y"), Some(80.0));
    assert_eq!(scene.padding.x1, 50.0);
}

#[test]
fn natural_size_applies_when_options_are_unset() {
    let node = bar_chart().with_size(40.0, 30.0);
    let scene = build_scene(&node, sales(), &ChartOptions::default()).unwrap();
    assert_eq!((scene.width, scene.height), (40.0, 30.0));
    assert_eq!(scene.root.items[0].f64("width"), Some(40.0));
}

#[test]
fn facets_emit_one_group_item_per_key() {
    let inner = SceneNode::new()
        .with_scale(
            LinearScale::new("y")
                .domain(Domain::Fixed(0.0, 10.0))
                .range(Range::Height),
        )
        .with_mark(
            Mark::builder(MarkType::Rect)
                .name("bars")
                .table("cell")
                .encode_rc("y", encode::scaled("y", "v"))
                .build(),
        );
    let node = SceneNode::new().with_mark(
        Mark::builder(MarkType::Group)
            .name("panel")
            .facet(Facet::new("cell", "sales", "region"))
            .encode_const("width", 50.0)
            .encode_const("height", 20.0)
            .child(inner)
            .build(),
    );
    let options = ChartOptions::new().with_size(200.0, 100.0);
    let scene = build_scene(&node, sales(), &options).unwrap();

    let panel = scene.find("root.panel").unwrap();
    assert_eq!(panel.items.len(), 2);
    let west = &panel.items[0];
    assert_eq!(west.datum.as_ref().unwrap().get("region"), Value::from("west"));
    let west_bars = &west.items[0];
    assert_eq!(west_bars.id, "root.panel.facet(region=west).bars");
    assert_eq!(west_bars.items.len(), 2);
    // Children see the group's 50x20 view: v = 8 maps to 20 - 16.
    assert_eq!(west_bars.items[1].f64("y"), Some(4.0));

    let east_bars = &panel.items[1].items[0];
    assert_eq!(east_bars.id, "root.panel.facet(region=east).bars");
    assert_eq!(east_bars.items[0].datum.as_ref().unwrap().f64("v"), Some(2.0));
    assert!(scene.find("root.panel.facet(region=east).bars").is_some());
}

#[test]
fn group_without_size_reuses_parent_view() {
    let views: Rc<RefCell<Vec<ViewBounds>>> = Rc::default();
    let probe = Rc::clone(&views);
    let inner = SceneNode::new().with_scale(scale_fn("probe", move |ctx| {
        probe.borrow_mut().push(ctx.bounds);
        Ok(Some(Scale::Linear(chartparts_core::ScaleLinear::new(
            (0.0, 1.0),
            ctx.bounds.x,
        ))))
    }));
    let node = SceneNode::new().with_mark(Mark::builder(MarkType::Group).child(inner).build());
    let scene = build_scene(&node, DataFrame::new(), &ChartOptions::new().with_size(80.0, 60.0))
        .unwrap();

    let views = views.borrow();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].x, (0.0, 80.0));
    assert_eq!(scene.marks()[0].id, "root.group");
}

#[test]
fn missing_scale_aborts_with_path() {
    let node = SceneNode::new().with_mark(
        Mark::builder(MarkType::Rect)
            .name("bars")
            .table("sales")
            .encode_rc("x", encode::scaled("nope", "cat"))
            .build(),
    );
    let err = build_scene(&node, sales(), &ChartOptions::new().with_size(10.0, 10.0)).unwrap_err();
    assert_eq!(err.path, "root.bars");
    assert_eq!(
        err.kind,
        SceneErrorKind::UnresolvedScale {
            name: "nope".into()
        }
    );
}

#[test]
fn unmapped_value_names_the_encoded_property() {
    let node = SceneNode::new()
        .with_scale(BandScale::new("x").domain(Domain::values(["a"])))
        .with_mark(
            Mark::builder(MarkType::Rect)
                .name("bars")
                .table("sales")
                .encode_rc("offset", encode::scaled("x", "cat"))
                .build(),
        );
    let err = build_scene(&node, sales(), &ChartOptions::new().with_size(10.0, 10.0)).unwrap_err();
    assert_eq!(err.path, "root.bars");
    assert_eq!(
        err.kind,
        SceneErrorKind::InvalidEncoding {
            property: "offset".into(),
            reason: "value is outside the scale domain",
        }
    );
}

#[test]
fn unproduced_and_viewport_failures_surface() {
    let mut data = sales();
    data.insert("empty".to_string(), table(Vec::new()));
    let node =
        SceneNode::new().with_scale(LinearScale::new("y").domain(Domain::field("empty", "v")));
    let err = build_scene(&node, data, &ChartOptions::new().with_size(10.0, 10.0)).unwrap_err();
    assert_eq!(err.path, ROOT_ID);
    assert_eq!(err.kind, SceneErrorKind::UnproducedScale { name: "y".into() });

    let err = build_scene(
        &SceneNode::new(),
        DataFrame::new(),
        &ChartOptions::new().with_size(-1.0, 10.0),
    )
    .unwrap_err();
    assert!(matches!(err.kind, SceneErrorKind::MalformedViewport { .. }));

    let err = build_scene(
        &SceneNode::new(),
        DataFrame::new(),
        &ChartOptions::new().with_size(10.0, 10.0).with_padding(6.0),
    )
    .unwrap_err();
    assert!(matches!(err.kind, SceneErrorKind::MalformedViewport { .. }));
}

#[test]
fn dispatch_reaches_bound_handler_with_datum() {
    let clicked: Rc<RefCell<Vec<f64>>> = Rc::default();
    let sink = Rc::clone(&clicked);
    let node = SceneNode::new().with_mark(
        Mark::builder(MarkType::Symbol)
            .name("dots")
            .table("sales")
            .on("click", move |event| {
                if let Some(v) = event.datum.and_then(|d| d.f64("v")) {
                    sink.borrow_mut().push(v);
                }
            })
            .build(),
    );
    let scene = build_scene(&node, sales(), &ChartOptions::new().with_size(10.0, 10.0)).unwrap();
    let dots = &scene.marks()[0];

    assert!(scene.dispatch(&dots.items[2], "click", Point::new(1.0, 1.0)));
    assert!(!scene.dispatch(&dots.items[2], "hover", Point::ZERO));
    assert_eq!(*clicked.borrow(), [2.0]);
}

#[test]
fn repeated_channel_leaves_orphan_entry() {
    let node = SceneNode::new().with_mark(
        Mark::builder(MarkType::Rect)
            .on("click", |_| {})
            .on("click", |_| {})
            .build(),
    );
    let scene =
        build_scene(&node, DataFrame::new(), &ChartOptions::new().with_size(1.0, 1.0)).unwrap();
    let item = &scene.marks()[0].items[0];
    assert_eq!(item.handler_id("click"), Some("evt1"));
    assert!(scene.handlers.contains("evt0"));
    assert_eq!(scene.handlers.len(), 2);
}

#[test]
fn unnamed_siblings_share_path_id() {
    let node = SceneNode::new()
        .with_mark(Mark::builder(MarkType::Rect).build())
        .with_mark(Mark::builder(MarkType::Rect).build());
    let scene =
        build_scene(&node, DataFrame::new(), &ChartOptions::new().with_size(1.0, 1.0)).unwrap();
    assert_eq!(scene.marks()[0].id, "root.rect");
    assert_eq!(scene.marks()[1].id, "root.rect");
}

#[cfg(feature = "trace")]
#[test]
fn tracer_observes_the_pass() {
    use crate::{
        HandlerBoundEvent, MarkEmittedEvent, NodeDescendedEvent, TraceSink, Tracer,
        ViewPushedEvent, build_scene_traced,
    };

    #[derive(Default)]
    struct Recording {
        descended: Vec<String>,
        reused: Vec<bool>,
        bound: Vec<String>,
        emitted: Vec<(String, usize)>,
    }
    impl TraceSink for Recording {
        fn on_node_descended(&mut self, e: &NodeDescendedEvent<'_>) {
            self.descended.push(e.path.to_string());
        }
        fn on_view_pushed(&mut self, e: &ViewPushedEvent<'_>) {
            self.reused.push(e.reused);
        }
        fn on_handler_bound(&mut self, e: &HandlerBoundEvent<'_>) {
            self.bound.push(e.id.to_string());
        }
        fn on_mark_emitted(&mut self, e: &MarkEmittedEvent<'_>) {
            self.emitted.push((e.path.to_string(), e.items));
        }
    }

    let mut sink = Recording::default();
    let mut tracer = Tracer::new(&mut sink);
    build_scene_traced(
        &bar_chart(),
        sales(),
        &ChartOptions::new().with_size(200.0, 100.0),
        &mut tracer,
    )
    .unwrap();
    drop(tracer);

    assert_eq!(sink.descended, ["root"]);
    assert!(sink.reused.is_empty());
    assert_eq!(sink.bound, ["evt0"]);
    assert_eq!(sink.emitted, [("root.bars".to_string(), 4)]);
}
