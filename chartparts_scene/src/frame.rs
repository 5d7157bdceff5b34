// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable traversal frame.
//!
//! A [`SceneFrame`] is the context in scope at one point of a scene pass: the node and mark
//! being processed, the data tables, the viewport, the resolved scales, the channel bindings of
//! the current mark, the bound row, and a dotted path id. Every `push_*` operation returns a new
//! frame and leaves the receiver untouched, so sibling subtrees never see each other's state.

extern crate alloc;

use alloc::borrow::Cow;
use alloc::format;
use alloc::rc::Rc;

use chartparts_core::{
    DataFrame, Datum, EncodeContext, Mark, Scale, Scales, SceneError, SceneErrorKind, SceneNode,
    Table, ViewBounds, ViewSize, merge_data, validate_viewport,
};
use kurbo::Point;

use crate::registry::{ChannelNames, ChannelRegistry};
use crate::resolver::resolve_scales;

/// Path id of the root frame.
pub const ROOT_ID: &str = "root";

/// One immutable traversal context.
#[derive(Clone, Debug)]
pub struct SceneFrame<'a> {
    node: &'a SceneNode,
    mark: Option<&'a Mark>,
    data: Rc<DataFrame>,
    view: ViewSize,
    view_top_left: Point,
    view_bottom_right: Point,
    scales: Rc<Scales>,
    channel_names: Rc<ChannelNames>,
    registry: &'a ChannelRegistry,
    bound_datum: Option<Datum>,
    parent_id: Rc<str>,
}

impl<'a> SceneFrame<'a> {
    /// Creates the root frame for `node`.
    ///
    /// The viewport spans `(0, 0)` to `view`, no scales are resolved yet, and the path id is
    /// [`ROOT_ID`].
    pub fn new(
        node: &'a SceneNode,
        data: DataFrame,
        view: ViewSize,
        registry: &'a ChannelRegistry,
    ) -> Self {
        Self {
            node,
            mark: None,
            data: Rc::new(data),
            view,
            view_top_left: Point::ZERO,
            view_bottom_right: view.bottom_right(),
            scales: Rc::default(),
            channel_names: Rc::default(),
            registry,
            bound_datum: None,
            parent_id: Rc::from(ROOT_ID),
        }
    }

    /// Replaces the viewport corners of a root frame.
    ///
    /// Scales are resolved from these corners on the next [`descend`](Self::descend). The
    /// corners are taken as given; see [`validate_viewport`](chartparts_core::validate_viewport).
    pub fn with_viewport(self, top_left: Point, bottom_right: Point) -> Self {
        Self {
            view_top_left: top_left,
            view_bottom_right: bottom_right,
            ..self
        }
    }

    /// Enters a node: resolves its scale directives against the current viewport and data.
    ///
    /// The current mark and channel bindings are cleared. A node without directives shares
    /// the current scale map.
    pub fn descend(&self, node: &'a SceneNode) -> Result<Self, SceneError> {
        let scales = resolve_scales(
            &node.scales,
            self.view,
            self.bounds(),
            &self.data,
            &self.scales,
        )
        .map_err(|kind| self.error(kind))?;
        Ok(Self {
            node,
            mark: None,
            scales,
            channel_names: Rc::default(),
            ..self.clone()
        })
    }

    /// Enters a mark: registers its channels and extends the path id with the mark's name
    /// (or type, when unnamed).
    pub fn enter_mark(&self, mark: &'a Mark) -> Self {
        let names = self.registry.register_channels(&mark.channels);
        Self {
            mark: Some(mark),
            channel_names: Rc::new(names),
            parent_id: Rc::from(format!("{}.{}", self.parent_id, mark.path_segment())),
            ..self.clone()
        }
    }

    /// Overlays `data` on the tables in scope; incoming tables win on name collisions.
    ///
    /// With a facet key, the path id becomes `<parent>.facet(<key>)`.
    pub fn push_data(&self, data: &DataFrame, facet_key: Option<&str>) -> Self {
        let parent_id = match facet_key {
            Some(key) => Rc::from(format!("{}.facet({key})", self.parent_id)),
            None => Rc::clone(&self.parent_id),
        };
        Self {
            data: Rc::new(merge_data(&self.data, data)),
            parent_id,
            ..self.clone()
        }
    }

    /// Changes the viewport and recomputes the current node's scales against it.
    ///
    /// `top_left` defaults to the origin and `bottom_right` to `(width, height)`. When `view`
    /// and `top_left` both equal the current ones, the receiver is returned as is and no
    /// scales are recomputed; `bottom_right` is not part of that comparison.
    pub fn push_view(
        &self,
        view: ViewSize,
        top_left: Option<Point>,
        bottom_right: Option<Point>,
    ) -> Result<Cow<'_, Self>, SceneError> {
        let top_left = top_left.unwrap_or(Point::ZERO);
        if view == self.view && top_left == self.view_top_left {
            return Ok(Cow::Borrowed(self));
        }
        let bottom_right = bottom_right.unwrap_or_else(|| view.bottom_right());
        validate_viewport(view, top_left, bottom_right).map_err(|kind| self.error(kind))?;
        let scales = resolve_scales(
            &self.node.scales,
            view,
            ViewBounds::from_corners(top_left, bottom_right),
            &self.data,
            &self.scales,
        )
        .map_err(|kind| self.error(kind))?;
        Ok(Cow::Owned(Self {
            view,
            view_top_left: top_left,
            view_bottom_right: bottom_right,
            scales,
            ..self.clone()
        }))
    }

    /// Binds a data row to the frame.
    pub fn push_bound_datum(&self, datum: Datum) -> Self {
        Self {
            bound_datum: Some(datum),
            ..self.clone()
        }
    }

    /// The node being processed.
    pub fn node(&self) -> &'a SceneNode {
        self.node
    }

    /// The mark being processed, if any.
    pub fn mark(&self) -> Option<&'a Mark> {
        self.mark
    }

    /// The data tables in scope.
    pub fn data(&self) -> &Rc<DataFrame> {
        &self.data
    }

    /// Looks up a data table in scope.
    pub fn table(&self, name: &str) -> Result<&Table, SceneError> {
        self.data.get(name).ok_or_else(|| {
            self.error(SceneErrorKind::MissingTable { name: name.into() })
        })
    }

    /// The view size.
    pub fn view(&self) -> ViewSize {
        self.view
    }

    /// Top-left viewport corner.
    pub fn view_top_left(&self) -> Point {
        self.view_top_left
    }

    /// Bottom-right viewport corner.
    pub fn view_bottom_right(&self) -> Point {
        self.view_bottom_right
    }

    /// Range bounds of the viewport, with `y` running bottom to top.
    pub fn bounds(&self) -> ViewBounds {
        ViewBounds::from_corners(self.view_top_left, self.view_bottom_right)
    }

    /// The scales in scope.
    pub fn scales(&self) -> &Rc<Scales> {
        &self.scales
    }

    /// Looks up a scale in scope.
    pub fn scale(&self, name: &str) -> Result<&Scale, SceneError> {
        self.scales.get(name).map(|s| &**s).ok_or_else(|| {
            self.error(SceneErrorKind::UnresolvedScale { name: name.into() })
        })
    }

    /// Channel bindings of the current mark.
    pub fn channel_names(&self) -> &Rc<ChannelNames> {
        &self.channel_names
    }

    /// The registry's next handler counter value.
    pub fn channel_id(&self) -> u64 {
        self.registry.channel_id()
    }

    /// The registry shared by every frame of the pass.
    pub fn registry(&self) -> &'a ChannelRegistry {
        self.registry
    }

    /// The bound row, if any.
    pub fn bound_datum(&self) -> Option<&Datum> {
        self.bound_datum.as_ref()
    }

    /// The dotted path id.
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    /// Builds the encoder inputs for item `index` of the current mark.
    pub fn encode_context(&self, index: usize) -> EncodeContext<'_> {
        EncodeContext {
            datum: self.bound_datum.as_ref(),
            index,
            data: &self.data,
            scales: &self.scales,
            view: self.view,
            bounds: self.bounds(),
        }
    }

    /// Wraps `kind` with this frame's path id.
    pub fn error(&self, kind: SceneErrorKind) -> SceneError {
        SceneError::new(&*self.parent_id, kind)
    }
}
