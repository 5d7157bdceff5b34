// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete scale directives (band, point, ordinal).

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;

use chartparts_core::{
    Scale, ScaleBand, ScaleCreationContext, ScaleCreator, ScaleOrdinal, ScalePoint,
    SceneErrorKind, Value,
};

use crate::continuous::oriented;
use crate::domain::Domain;
use crate::range::Range;

/// Directive for a band scale.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    name: String,
    domain: Domain,
    range: Range,
    padding_inner: f64,
    padding_outer: f64,
    reverse: bool,
}

impl BandScale {
    /// Creates a band scale directive over an empty domain spanning the viewport width.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Values(Rc::from([])),
            range: Range::Width,
            padding_inner: 0.1,
            padding_outer: 0.1,
            reverse: false,
        }
    }

    /// Sets the domain source.
    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Sets the range source.
    pub fn range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Sets inner and outer padding in band units.
    pub fn padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner;
        self.padding_outer = outer;
        self
    }

    /// Swaps the resolved range endpoints.
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

impl ScaleCreator for BandScale {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, ctx: &ScaleCreationContext<'_>) -> Result<Option<Scale>, SceneErrorKind> {
        let domain = self.domain.members(ctx)?;
        let range = oriented(self.range.resolve(ctx)?, self.reverse);
        Ok(Some(Scale::Band(
            ScaleBand::new(domain, range).with_padding(self.padding_inner, self.padding_outer),
        )))
    }
}

/// Directive for a point scale.
#[derive(Clone, Debug, PartialEq)]
pub struct PointScale {
    name: String,
    domain: Domain,
    range: Range,
    padding: f64,
}

impl PointScale {
    /// Creates a point scale directive over an empty domain spanning the viewport width.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Values(Rc::from([])),
            range: Range::Width,
            padding: 0.5,
        }
    }

    /// Sets the domain source.
    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Sets the range source.
    pub fn range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Sets the outer padding in point steps.
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

impl ScaleCreator for PointScale {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, ctx: &ScaleCreationContext<'_>) -> Result<Option<Scale>, SceneErrorKind> {
        let domain = self.domain.members(ctx)?;
        let range = self.range.resolve(ctx)?;
        Ok(Some(Scale::Point(
            ScalePoint::new(domain, range).with_padding(self.padding),
        )))
    }
}

/// Directive for an ordinal (category to value) scale, typically used for colors.
#[derive(Clone, Debug, PartialEq)]
pub struct OrdinalScale {
    name: String,
    domain: Domain,
    range: Rc<[Value]>,
}

impl OrdinalScale {
    /// Creates an ordinal scale directive with an empty domain and range.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Values(Rc::from([])),
            range: Rc::from([]),
        }
    }

    /// Sets the domain source.
    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Sets the output values.
    pub fn range<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.range = values.into_iter().map(Into::into).collect();
        self
    }
}

impl ScaleCreator for OrdinalScale {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, ctx: &ScaleCreationContext<'_>) -> Result<Option<Scale>, SceneErrorKind> {
        if self.range.is_empty() {
            return Ok(None);
        }
        let domain = self.domain.members(ctx)?;
        Ok(Some(Scale::Ordinal(ScaleOrdinal::new(
            domain,
            Rc::clone(&self.range),
        ))))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec::Vec;

    use chartparts_core::{DataFrame, Datum, Scales, ViewBounds, ViewSize};

    use super::*;

    fn ctx<'a>(data: &'a DataFrame, scales: &'a Scales) -> ScaleCreationContext<'a> {
        ScaleCreationContext {
            view: ViewSize::new(90.0, 30.0),
            bounds: ViewBounds {
                x: (0.0, 90.0),
                y: (30.0, 0.0),
            },
            data,
            scales,
        }
    }

    #[test]
    fn band_domain_from_distinct_values() {
        let rows: Vec<Datum> = ["a", "b", "a", "c"]
            .iter()
            .map(|c| [("cat", *c)].into_iter().collect())
            .collect();
        let mut data = DataFrame::new();
        data.insert("t".to_string(), Rc::from(rows));
        let scales = Scales::new();
        let scale = BandScale::new("x")
            .domain(Domain::distinct("t", "cat"))
            .padding(0.0, 0.0)
            .create(&ctx(&data, &scales))
            .unwrap()
            .unwrap();
        assert_eq!(scale.bandwidth(), 30.0);
        assert_eq!(scale.map_f64(&Value::from("c")), Some(60.0));
    }

    #[test]
    fn nested_band_spans_an_earlier_bandwidth() {
        let data = DataFrame::new();
        let mut scales = Scales::new();
        let outer = BandScale::new("x")
            .domain(Domain::values(["a", "b", "c"]))
            .padding(0.0, 0.0)
            .create(&ctx(&data, &scales))
            .unwrap()
            .unwrap();
        scales.insert("x".to_string(), Rc::new(outer));

        let inner = BandScale::new("x_inner")
            .domain(Domain::values(["p", "q"]))
            .range(Range::bandwidth_of("x"))
            .padding(0.0, 0.0);
        let scale = inner.create(&ctx(&data, &scales)).unwrap().unwrap();
        assert_eq!(scale.bandwidth(), 15.0);
        assert_eq!(scale.map_f64(&Value::from("q")), Some(15.0));

        let unresolved = inner.create(&ctx(&data, &Scales::new()));
        assert_eq!(
            unresolved,
            Err(SceneErrorKind::UnresolvedScale { name: "x".into() })
        );
    }

    #[test]
    fn ordinal_without_range_produces_nothing() {
        let data = DataFrame::new();
        let scales = Scales::new();
        let out = OrdinalScale::new("color")
            .domain(Domain::values(["a"]))
            .create(&ctx(&data, &scales));
        assert_eq!(out, Ok(None));
    }

    #[test]
    fn point_scale_centers_single_member() {
        let data = DataFrame::new();
        let scales = Scales::new();
        let scale = PointScale::new("x")
            .domain(Domain::values(["only"]))
            .create(&ctx(&data, &scales))
            .unwrap()
            .unwrap();
        assert_eq!(scale.map_f64(&Value::from("only")), Some(45.0));
    }
}
