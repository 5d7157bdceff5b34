// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative mark tree.
//!
//! A [`SceneNode`] holds scale directives and marks. A [`Mark`] declares how items are
//! derived from data (its encoders), which event channels it exposes, and, for group marks,
//! nested child nodes. The tree is owned by the caller and is only read during a scene pass.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;

use crate::creator::ScaleCreator;
use crate::error::SceneErrorKind;
use crate::scale::{Scale, Scales};
use crate::value::{DataFrame, Datum, Table, Value};
use crate::view::{ViewBounds, ViewSize};

/// Computes one item property.
pub type Encoder = Rc<dyn Fn(&EncodeContext<'_>) -> Result<Value, SceneErrorKind>>;

/// A user event handler bound to a mark channel.
pub type ChannelHandler = Rc<dyn Fn(&ChannelEvent<'_>)>;

/// An interaction event dispatched back to user code by a renderer.
#[derive(Clone, Copy, Debug)]
pub struct ChannelEvent<'a> {
    /// The handler id the renderer found on the item.
    pub id: &'a str,
    /// The data row bound to the item, if any.
    pub datum: Option<&'a Datum>,
    /// Pointer position in scene coordinates.
    pub point: Point,
}

/// Inputs available to an [`Encoder`] for one item.
#[derive(Clone, Copy, Debug)]
pub struct EncodeContext<'a> {
    /// Row bound to the item (absent for marks without a table).
    pub datum: Option<&'a Datum>,
    /// Index of the item within its mark.
    pub index: usize,
    /// Data tables in scope.
    pub data: &'a DataFrame,
    /// Scales in scope.
    pub scales: &'a Scales,
    /// View size in scope.
    pub view: ViewSize,
    /// Viewport bounds in scope.
    pub bounds: ViewBounds,
}

impl<'a> EncodeContext<'a> {
    /// Looks up a scale by name.
    pub fn scale(&self, name: &str) -> Result<&'a Scale, SceneErrorKind> {
        self.scales
            .get(name)
            .map(|s| &**s)
            .ok_or_else(|| SceneErrorKind::UnresolvedScale { name: name.into() })
    }

    /// Reads a field of the bound row (`Null` when absent).
    pub fn field(&self, name: &str) -> Value {
        self.datum.map(|d| d.get(name)).unwrap_or_default()
    }

    /// Looks up a data table.
    pub fn table(&self, name: &str) -> Result<&'a Table, SceneErrorKind> {
        self.data
            .get(name)
            .ok_or_else(|| SceneErrorKind::MissingTable { name: name.into() })
    }
}

/// The structural type of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkType {
    /// Circular arc / sector.
    Arc,
    /// Filled area.
    Area,
    /// Container with nested nodes.
    Group,
    /// Raster image.
    Image,
    /// Polyline.
    Line,
    /// Arbitrary vector path.
    Path,
    /// Rectangle.
    Rect,
    /// Line segment.
    Rule,
    /// Custom shape.
    Shape,
    /// Point glyph.
    Symbol,
    /// Text label.
    Text,
    /// Variable-width line.
    Trail,
}

impl MarkType {
    /// Lowercase name, used in path ids for unnamed marks.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arc => "arc",
            Self::Area => "area",
            Self::Group => "group",
            Self::Image => "image",
            Self::Line => "line",
            Self::Path => "path",
            Self::Rect => "rect",
            Self::Rule => "rule",
            Self::Shape => "shape",
            Self::Symbol => "symbol",
            Self::Text => "text",
            Self::Trail => "trail",
        }
    }
}

/// Partitions a table into one sub-scene per distinct value of a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Facet {
    /// Name under which each partition is exposed to the sub-scene.
    pub name: String,
    /// Table to partition.
    pub table: String,
    /// Field whose values define the partitions.
    pub group_by: String,
}

impl Facet {
    /// Creates a facet definition.
    pub fn new(
        name: impl Into<String>,
        table: impl Into<String>,
        group_by: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            group_by: group_by.into(),
        }
    }
}

/// A mark declaration.
#[derive(Clone)]
pub struct Mark {
    /// Structural type.
    pub mark_type: MarkType,
    /// Explicit name, preferred over the type in path ids.
    pub name: Option<String>,
    /// Semantic role passed through to the output (for example `axis` or `legend`).
    pub role: Option<String>,
    /// Table driving one item per row; `None` emits a single item.
    pub table: Option<String>,
    /// Facet partitioning; takes precedence over `table`.
    pub facet: Option<Facet>,
    /// Property encoders, evaluated in order.
    pub encodings: SmallVec<[(String, Encoder); 8]>,
    /// Event channels in declaration order. A name may appear more than once.
    pub channels: SmallVec<[(String, ChannelHandler); 2]>,
    /// Nested nodes (group marks only).
    pub children: Vec<SceneNode>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl fmt::Debug for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encodings: SmallVec<[&str; 8]> =
            self.encodings.iter().map(|(k, _)| k.as_str()).collect();
        let channels: SmallVec<[&str; 2]> =
            self.channels.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("Mark")
            .field("mark_type", &self.mark_type)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("table", &self.table)
            .field("facet", &self.facet)
            .field("encodings", &encodings)
            .field("channels", &channels)
            .field("children", &self.children)
            .field("z_index", &self.z_index)
            .finish()
    }
}

impl Mark {
    /// Starts building a mark of the given type.
    pub fn builder(mark_type: MarkType) -> MarkBuilder {
        MarkBuilder {
            mark: Self {
                mark_type,
                name: None,
                role: None,
                table: None,
                facet: None,
                encodings: SmallVec::new(),
                channels: SmallVec::new(),
                children: Vec::new(),
                z_index: 0,
            },
        }
    }

    /// The segment this mark appends to its frame's path id: the name, else the type.
    pub fn path_segment(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.mark_type.as_str())
    }
}

/// Builder for [`Mark`].
#[derive(Debug)]
pub struct MarkBuilder {
    mark: Mark,
}

impl MarkBuilder {
    /// Sets the mark name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.mark.name = Some(name.into());
        self
    }

    /// Sets the semantic role.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.mark.role = Some(role.into());
        self
    }

    /// Emits one item per row of `table`.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.mark.table = Some(table.into());
        self
    }

    /// Emits one item per facet partition.
    pub fn facet(mut self, facet: Facet) -> Self {
        self.mark.facet = Some(facet);
        self
    }

    /// Sets the z-index.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.mark.z_index = z_index;
        self
    }

    /// Adds a property encoder.
    pub fn encode<F>(self, property: impl Into<String>, f: F) -> Self
    where
        F: Fn(&EncodeContext<'_>) -> Result<Value, SceneErrorKind> + 'static,
    {
        self.encode_rc(property, Rc::new(f))
    }

    /// Adds a shared property encoder.
    pub fn encode_rc(mut self, property: impl Into<String>, encoder: Encoder) -> Self {
        self.mark.encodings.push((property.into(), encoder));
        self
    }

    /// Adds a constant property.
    pub fn encode_const(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.encode(property, move |_| Ok(value.clone()))
    }

    /// Binds an event channel.
    pub fn on<F>(mut self, channel: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ChannelEvent<'_>) + 'static,
    {
        self.mark.channels.push((channel.into(), Rc::new(handler)));
        self
    }

    /// Adds a nested node (for group marks).
    pub fn child(mut self, node: SceneNode) -> Self {
        self.mark.children.push(node);
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        self.mark
    }
}

/// A node in the mark tree: scale directives plus marks.
#[derive(Clone, Debug, Default)]
pub struct SceneNode {
    /// Scale directives, evaluated in order when a frame descends into this node.
    pub scales: Vec<Rc<dyn ScaleCreator>>,
    /// Marks, rendered in order.
    pub marks: Vec<Mark>,
    /// Natural size, used when chart options leave dimensions unset.
    pub size: Option<ViewSize>,
}

impl SceneNode {
    /// Creates an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scale directive.
    pub fn with_scale(mut self, scale: impl ScaleCreator + 'static) -> Self {
        self.scales.push(Rc::new(scale));
        self
    }

    /// Appends a mark.
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    /// Sets the natural size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(ViewSize::new(width, height));
        self
    }
}
