// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale domains and domain inference from in-scope data.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use chartparts_core::{Datum, ScaleCreationContext, SceneErrorKind, Value};

/// Where a scale's domain comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    /// A fixed numeric extent.
    Fixed(f64, f64),
    /// The finite numeric extent of one field of a table.
    Field {
        /// Table name.
        table: String,
        /// Field name.
        field: String,
    },
    /// The finite numeric extent across several fields of a table.
    Fields {
        /// Table name.
        table: String,
        /// Field names.
        fields: Vec<String>,
    },
    /// An explicit list of members (discrete scales).
    Values(Rc<[Value]>),
    /// Distinct values of a field, in first-seen order.
    Distinct {
        /// Table name.
        table: String,
        /// Field name.
        field: String,
    },
}

impl Domain {
    /// Numeric extent of `field` in `table`.
    pub fn field(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Field {
            table: table.into(),
            field: field.into(),
        }
    }

    /// Numeric extent across `fields` in `table`.
    pub fn fields<I, S>(table: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields {
            table: table.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Distinct values of `field` in `table`.
    pub fn distinct(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Distinct {
            table: table.into(),
            field: field.into(),
        }
    }

    /// An explicit member list.
    pub fn values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Values(values.into_iter().map(Into::into).collect())
    }

    /// Resolves a continuous `(min, max)` extent.
    ///
    /// Returns `Ok(None)` when the source holds no finite numbers.
    pub(crate) fn extent(
        &self,
        ctx: &ScaleCreationContext<'_>,
    ) -> Result<Option<(f64, f64)>, SceneErrorKind> {
        Ok(match self {
            Self::Fixed(lo, hi) => Some((*lo, *hi)),
            Self::Field { table, field } | Self::Distinct { table, field } => {
                infer_extent(ctx.table(table)?, &[field.as_str()])
            }
            Self::Fields { table, fields } => {
                let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
                infer_extent(ctx.table(table)?, &fields)
            }
            Self::Values(values) => numeric_extent(values.iter().filter_map(Value::as_f64)),
        })
    }

    /// Resolves a discrete member list.
    pub(crate) fn members(
        &self,
        ctx: &ScaleCreationContext<'_>,
    ) -> Result<Rc<[Value]>, SceneErrorKind> {
        Ok(match self {
            Self::Values(values) => Rc::clone(values),
            Self::Fixed(lo, hi) => Rc::from([Value::Number(*lo), Value::Number(*hi)]),
            Self::Field { table, field } | Self::Distinct { table, field } => {
                distinct_values(ctx.table(table)?, field).into()
            }
            Self::Fields { table, fields } => {
                let rows = ctx.table(table)?;
                let mut out = Vec::new();
                for field in fields {
                    for v in distinct_values(rows, field) {
                        if !out.contains(&v) {
                            out.push(v);
                        }
                    }
                }
                out.into()
            }
        })
    }
}

/// Infers a `(min, max)` extent over numeric `fields` of `rows`.
///
/// Non-finite and non-numeric values are ignored. Returns `None` if no finite values are
/// present.
pub fn infer_extent(rows: &[Datum], fields: &[&str]) -> Option<(f64, f64)> {
    numeric_extent(
        rows.iter()
            .flat_map(|row| fields.iter().filter_map(move |f| row.f64(f))),
    )
}

fn numeric_extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Returns the distinct non-null values of `field`, in first-seen order.
pub fn distinct_values(rows: &[Datum], field: &str) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::new();
    for row in rows {
        let v = row.get(field);
        if !v.is_null() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
