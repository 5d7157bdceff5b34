// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene pass: walks a mark tree and emits a [`SceneGraph`].

extern crate alloc;

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;

use chartparts_core::{
    ChartOptions, DataFrame, Datum, Facet, Mark, MarkType, SceneError, SceneErrorKind, SceneNode,
    Table, Value, ViewSize, validate_viewport,
};
use kurbo::Point;

use crate::frame::{ROOT_ID, SceneFrame};
use crate::graph::{SceneGraph, SgItem, SgMark};
use crate::registry::ChannelRegistry;
use crate::trace::{
    HandlerBoundEvent, MarkEmittedEvent, NodeDescendedEvent, Tracer, ViewPushedEvent,
};

/// Builds the scene graph for `node` over `data`.
///
/// The root view size comes from `options`, else from the node's natural size. Padding shrinks
/// the root viewport before scales are resolved. The first failure aborts the pass and is
/// returned with the path id of the frame that raised it.
pub fn build_scene(
    node: &SceneNode,
    data: DataFrame,
    options: &ChartOptions,
) -> Result<SceneGraph, SceneError> {
    build_scene_traced(node, data, options, &mut Tracer::none())
}

/// Like [`build_scene`], reporting traversal events to `tracer`.
pub fn build_scene_traced(
    node: &SceneNode,
    data: DataFrame,
    options: &ChartOptions,
    tracer: &mut Tracer<'_>,
) -> Result<SceneGraph, SceneError> {
    let view = options.view_size(node.size);
    let (top_left, bottom_right) = options.viewport(view);
    validate_viewport(view, top_left, bottom_right)
        .map_err(|kind| SceneError::new(ROOT_ID, kind))?;

    let registry = ChannelRegistry::new();
    // The chart node is entered from a directive-free shell carrying the padded viewport.
    let shell = SceneNode::new();
    let marks = {
        let frame =
            SceneFrame::new(&shell, data, view, &registry).with_viewport(top_left, bottom_right);
        let frame = frame.descend(node)?;
        trace_descend(tracer, &frame);
        render_node(&frame, tracer)?
    };

    let mut props = BTreeMap::new();
    props.insert("x".to_string(), Value::from(0.0));
    props.insert("y".to_string(), Value::from(0.0));
    props.insert("width".to_string(), Value::from(view.width));
    props.insert("height".to_string(), Value::from(view.height));
    let root = SgMark {
        mark_type: MarkType::Group,
        name: None,
        role: Some("frame".to_string()),
        id: ROOT_ID.to_string(),
        z_index: 0,
        items: alloc::vec![SgItem {
            props,
            items: marks,
            ..SgItem::default()
        }],
    };

    let scale = options.scale_factor();
    Ok(SceneGraph {
        root,
        handlers: registry.into_handlers(),
        width: view.width,
        height: view.height,
        pixel_width: view.width * scale,
        pixel_height: view.height * scale,
        origin: options.origin.unwrap_or(Point::ZERO),
        background: options.background,
        padding: options.insets(),
    })
}

fn render_node(
    frame: &SceneFrame<'_>,
    tracer: &mut Tracer<'_>,
) -> Result<Vec<SgMark>, SceneError> {
    let mut marks = Vec::with_capacity(frame.node().marks.len());
    for mark in &frame.node().marks {
        marks.push(render_mark(frame, mark, tracer)?);
    }
    Ok(marks)
}

fn render_mark<'a>(
    parent: &SceneFrame<'a>,
    mark: &'a Mark,
    tracer: &mut Tracer<'_>,
) -> Result<SgMark, SceneError> {
    let frame = parent.enter_mark(mark);
    for (channel, id) in frame.channel_names().iter() {
        tracer.handler_bound(&HandlerBoundEvent {
            path: frame.parent_id(),
            channel,
            id,
        });
    }

    let mut items = Vec::new();
    if let Some(facet) = &mark.facet {
        let rows = frame.table(&facet.table)?;
        for (index, (key, part)) in partition(rows, &facet.group_by).into_iter().enumerate() {
            let facet_key = format!("{}={}", facet.group_by, key);
            let faceted = frame
                .push_data(&facet_slice(facet, part), Some(&facet_key))
                .push_bound_datum(facet_datum(facet, key));
            items.push(render_item(&faceted, mark, index, tracer)?);
        }
    } else if let Some(table) = &mark.table {
        let rows = Rc::clone(frame.table(table)?);
        items.reserve(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let bound = frame.push_bound_datum(row.clone());
            items.push(render_item(&bound, mark, index, tracer)?);
        }
    } else {
        items.push(render_item(&frame, mark, 0, tracer)?);
    }

    tracer.mark_emitted(&MarkEmittedEvent {
        path: frame.parent_id(),
        mark_type: mark.mark_type,
        items: items.len(),
    });
    Ok(SgMark {
        mark_type: mark.mark_type,
        name: mark.name.clone(),
        role: mark.role.clone(),
        id: frame.parent_id().to_string(),
        z_index: mark.z_index,
        items,
    })
}

fn render_item<'a>(
    frame: &SceneFrame<'a>,
    mark: &'a Mark,
    index: usize,
    tracer: &mut Tracer<'_>,
) -> Result<SgItem, SceneError> {
    let mut props = BTreeMap::new();
    {
        let ctx = frame.encode_context(index);
        for (property, encoder) in &mark.encodings {
            let value = encoder(&ctx).map_err(|kind| frame.error(for_property(kind, property)))?;
            props.insert(property.clone(), value);
        }
    }

    let mut children = Vec::new();
    if !mark.children.is_empty() {
        let current = frame.view();
        let size = |name: &str, fallback: f64| {
            props
                .get(name)
                .and_then(Value::as_f64)
                .unwrap_or(fallback)
        };
        let view = ViewSize::new(size("width", current.width), size("height", current.height));
        let group = frame.push_view(view, None, None)?;
        trace_view(tracer, &group, view);
        for node in &mark.children {
            let child = group.descend(node)?;
            trace_descend(tracer, &child);
            children.extend(render_node(&child, tracer)?);
        }
    }

    Ok(SgItem {
        props,
        channels: Rc::clone(frame.channel_names()),
        datum: frame.bound_datum().cloned(),
        items: children,
    })
}

fn for_property(kind: SceneErrorKind, property: &str) -> SceneErrorKind {
    match kind {
        SceneErrorKind::InvalidEncoding { reason, .. } => SceneErrorKind::InvalidEncoding {
            property: property.to_string(),
            reason,
        },
        other => other,
    }
}

/// Splits `rows` by the value of `field`, in order of first appearance.
fn partition(rows: &Table, field: &str) -> Vec<(Value, Table)> {
    let mut order: Vec<(Value, Vec<Datum>)> = Vec::new();
    for row in rows.iter() {
        let key = row.get(field);
        match order.iter_mut().find(|(k, _)| *k == key) {
            Some((_, part)) => part.push(row.clone()),
            None => order.push((key, alloc::vec![row.clone()])),
        }
    }
    order
        .into_iter()
        .map(|(key, part)| (key, Table::from(part)))
        .collect()
}

fn facet_slice(facet: &Facet, part: Table) -> DataFrame {
    let mut slice = DataFrame::new();
    slice.insert(facet.name.clone(), part);
    slice
}

fn facet_datum(facet: &Facet, key: Value) -> Datum {
    [(facet.group_by.clone(), key)].into_iter().collect()
}

fn trace_view(tracer: &mut Tracer<'_>, frame: &Cow<'_, SceneFrame<'_>>, view: ViewSize) {
    tracer.view_pushed(&ViewPushedEvent {
        path: frame.parent_id(),
        view,
        reused: matches!(frame, Cow::Borrowed(_)),
    });
}

fn trace_descend(tracer: &mut Tracer<'_>, frame: &SceneFrame<'_>) {
    tracer.node_descended(&NodeDescendedEvent {
        path: frame.parent_id(),
        directives: frame.node().scales.len(),
        scales: frame.scales().len(),
    });
}
