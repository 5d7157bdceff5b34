// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic values, data rows, and named tables.
//!
//! Marks read their inputs from a [`DataFrame`]: a mapping from table name to an immutable,
//! shared row sequence. Rows ([`Datum`]) are cheap to clone, so frames and emitted items can
//! hold on to them without copying field storage.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use hashbrown::HashMap;
use peniko::Color;

/// A dynamically typed field or property value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(Rc<str>),
    /// A color.
    Color(Color),
}

impl Value {
    /// Returns the numeric payload, if this is a [`Value::Number`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the color payload, if this is a [`Value::Color`].
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Color(c) => {
                let rgba = c.to_rgba8();
                write!(
                    f,
                    "#{:02x}{:02x}{:02x}{:02x}",
                    rgba.r, rgba.g, rgba.b, rgba.a
                )
            }
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(Rc::from(value))
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

/// A single data row: field name to [`Value`].
///
/// Cloning a `Datum` only bumps a reference count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Datum(Rc<HashMap<String, Value>>);

impl Datum {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `field`, or [`Value::Null`] when the row has no such field.
    pub fn get(&self, field: &str) -> Value {
        self.0.get(field).cloned().unwrap_or_default()
    }

    /// Returns a numeric field, if present and numeric.
    pub fn f64(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(Value::as_f64)
    }

    /// Returns `true` if the row carries `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of fields in the row.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy of this row with `field` set to `value`.
    pub fn with(&self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = HashMap::clone(&self.0);
        fields.insert(field.into(), value.into());
        Self(Rc::new(fields))
    }

    /// Returns `true` if both handles point at the same row storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<K, V> FromIterator<(K, V)> for Datum
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(Rc::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }
}

/// An immutable, shared row sequence.
pub type Table = Rc<[Datum]>;

/// Named tables visible at a point in the mark tree.
pub type DataFrame = HashMap<String, Table>;

/// Merges `incoming` over `base`, returning a new frame.
///
/// Entries in `incoming` replace same-named entries in `base`; neither input is modified.
/// Only the table handles are cloned, never the rows.
pub fn merge_data(base: &DataFrame, incoming: &DataFrame) -> DataFrame {
    let mut out = base.clone();
    for (name, table) in incoming {
        out.insert(name.clone(), Rc::clone(table));
    }
    out
}
