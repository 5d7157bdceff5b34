// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous scale directives.

extern crate alloc;

use alloc::string::String;

use chartparts_core::{
    Scale, ScaleCreationContext, ScaleCreator, ScaleLinear, ScaleLog, SceneErrorKind,
    nice_domain,
};

use crate::domain::Domain;
use crate::range::Range;

const NICE_TICK_COUNT: usize = 10;

/// Directive for a linear scale.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScale {
    name: String,
    domain: Domain,
    range: Range,
    nice: bool,
    zero: bool,
    reverse: bool,
}

impl LinearScale {
    /// Creates a directive registering a scale named `name`, with a `(0, 1)` domain spanning
    /// the viewport width.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Fixed(0.0, 1.0),
            range: Range::Width,
            nice: false,
            zero: false,
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

    /// Extends the domain to nice tick boundaries.
    pub fn nice(mut self) -> Self {
        self.nice = true;
        self
    }

    /// Extends the domain to include zero.
    pub fn zero(mut self) -> Self {
        self.zero = true;
        self
    }

    /// Swaps the resolved range endpoints.
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

impl ScaleCreator for LinearScale {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, ctx: &ScaleCreationContext<'_>) -> Result<Option<Scale>, SceneErrorKind> {
        let Some((mut lo, mut hi)) = self.domain.extent(ctx)? else {
            return Ok(None);
        };
        if self.zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if self.nice {
            (lo, hi) = nice_domain(lo, hi, NICE_TICK_COUNT);
        }
        let range = oriented(self.range.resolve(ctx)?, self.reverse);
        Ok(Some(Scale::Linear(ScaleLinear::new((lo, hi), range))))
    }
}

/// Directive for a log scale.
#[derive(Clone, Debug, PartialEq)]
pub struct LogScale {
    name: String,
    domain: Domain,
    range: Range,
    base: f64,
    reverse: bool,
}

impl LogScale {
    /// Creates a base-10 log scale directive spanning the viewport width.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: Domain::Fixed(1.0, 10.0),
            range: Range::Width,
            base: 10.0,
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

    /// Sets the log base.
    pub fn base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Swaps the resolved range endpoints.
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

impl ScaleCreator for LogScale {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(&self, ctx: &ScaleCreationContext<'_>) -> Result<Option<Scale>, SceneErrorKind> {
        // A log domain must be strictly positive.
        let Some((lo, hi)) = self.domain.extent(ctx)?.filter(|(lo, hi)| *lo > 0.0 && *hi > 0.0)
        else {
            return Ok(None);
        };
        let range = oriented(self.range.resolve(ctx)?, self.reverse);
        Ok(Some(Scale::Log(
            ScaleLog::new((lo, hi), range).with_base(self.base),
        )))
    }
}

pub(crate) fn oriented(range: (f64, f64), reverse: bool) -> (f64, f64) {
    if reverse { (range.1, range.0) } else { range }
}
