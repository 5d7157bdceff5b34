// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved scale objects.
//!
//! A [`Scale`] is the output of a scale-creation directive: a domain bound to a concrete
//! range for the viewport that was in scope when the directive ran. Encoders look scales up
//! by name and use them to map data values into scene coordinates (or, for ordinal scales,
//! into arbitrary values such as colors).

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;

use crate::value::Value;

/// Resolved scales in scope, keyed by name.
///
/// Entries are shared so that a scale untouched by a descendant stays the very same object.
pub type Scales = HashMap<String, Rc<Scale>>;

/// A resolved scale.
#[derive(Clone, Debug, PartialEq)]
pub enum Scale {
    /// Continuous linear scale.
    Linear(ScaleLinear),
    /// Continuous log scale.
    Log(ScaleLog),
    /// Discrete band scale.
    Band(ScaleBand),
    /// Discrete point scale.
    Point(ScalePoint),
    /// Discrete value-to-value scale.
    Ordinal(ScaleOrdinal),
}

impl Scale {
    /// Maps a domain value.
    ///
    /// Continuous scales accept numbers; band and point scales accept members of their
    /// domain. Returns `None` for values the scale cannot map.
    pub fn map(&self, value: &Value) -> Option<Value> {
        match self {
            Self::Linear(s) => value.as_f64().map(|x| Value::Number(s.map(x))),
            Self::Log(s) => value.as_f64().map(|x| Value::Number(s.map(x))),
            Self::Band(s) => s.map(value).map(Value::Number),
            Self::Point(s) => s.map(value).map(Value::Number),
            Self::Ordinal(s) => s.map(value).cloned(),
        }
    }

    /// Maps a value to a scene coordinate.
    pub fn map_f64(&self, value: &Value) -> Option<f64> {
        self.map(value).and_then(|v| v.as_f64())
    }

    /// Returns the band width for band scales, and `0` for every other kind.
    pub fn bandwidth(&self) -> f64 {
        match self {
            Self::Band(s) => s.band_width(),
            _ => 0.0,
        }
    }

    /// Returns the output range for positional scales.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Linear(s) => Some(s.range),
            Self::Log(s) => Some(s.range),
            Self::Band(s) => Some(s.range),
            Self::Point(s) => Some(s.range),
            Self::Ordinal(_) => None,
        }
    }

    /// Returns tick values for continuous scales (empty for discrete scales).
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
            _ => Vec::new(),
        }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns “nice-ish” tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Extends `(min, max)` outward to the nearest “nice” tick boundaries.
///
/// Returns the input unchanged when no nice ticks can be generated.
pub fn nice_domain(min: f64, max: f64, count: usize) -> (f64, f64) {
    let ticks = nice_ticks(min, max, count);
    match (ticks.first(), ticks.last()) {
        (Some(&lo), Some(&hi)) if ticks.len() >= 2 => {
            if min <= max {
                (lo, hi)
            } else {
                (hi, lo)
            }
        }
        _ => (min, max),
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f.min(10_000.0) as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A log-scale mapping from a positive domain to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

impl ScaleLog {
    /// Creates a new base-10 log scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            base: 10.0,
        }
    }

    /// Sets the log base; invalid bases fall back to 10.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = if base.is_finite() && base > 0.0 && base != 1.0 {
            base
        } else {
            10.0
        };
        self
    }

    fn log_base(&self, x: f64) -> f64 {
        x.ln() / self.base.ln()
    }

    /// Maps a value from domain space into range space.
    ///
    /// Non-positive inputs map to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if x <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return r0;
        }
        let ld0 = self.log_base(d0);
        let denom = self.log_base(d1) - ld0;
        if denom == 0.0 {
            return r0;
        }
        let t = (self.log_base(x) - ld0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns powers of the base that fall within the domain, capped by `count`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if min <= 0.0 || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let exponent = |v: f64| {
            let e = v.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        let min_e = exponent(self.log_base(min).floor());
        let max_e = exponent(self.log_base(max).ceil());
        let mut out = Vec::new();
        for e in min_e..=max_e {
            out.push(self.base.powi(e));
            if count != 0 && out.len() >= count {
                break;
            }
        }
        out
    }
}

/// A discrete band scale for categorical positions.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    domain: Rc<[Value]>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a band scale over `domain` with 0.1 inner and outer padding.
    pub fn new(domain: Rc<[Value]>, range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the category domain.
    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.domain.len() as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the start position for the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding_inner);
        r0.min(r1) + bw * self.padding_outer + step * index as f64
    }

    /// Returns the band start for a domain member.
    pub fn map(&self, value: &Value) -> Option<f64> {
        let index = self.domain.iter().position(|v| v == value)?;
        Some(self.x(index))
    }
}

/// A discrete point scale (like band without width).
#[derive(Clone, Debug, PartialEq)]
pub struct ScalePoint {
    domain: Rc<[Value]>,
    range: (f64, f64),
    padding: f64,
}

impl ScalePoint {
    /// Creates a point scale over `domain` with 0.5 outer padding.
    pub fn new(domain: Rc<[Value]>, range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            padding: 0.5,
        }
    }

    /// Sets the outer padding in point steps.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.domain.len() as f64;
        if n < 1.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = (n - 1.0) + 2.0 * self.padding;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the position of the point at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let step = self.step();
        r0.min(r1) + self.padding * step + step * index as f64
    }

    /// Returns the position of a domain member.
    pub fn map(&self, value: &Value) -> Option<f64> {
        let index = self.domain.iter().position(|v| v == value)?;
        Some(self.x(index))
    }
}

/// Maps domain members onto a list of output values, cycling when the range is shorter.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOrdinal {
    domain: Rc<[Value]>,
    range: Rc<[Value]>,
}

impl ScaleOrdinal {
    /// Creates an ordinal scale.
    pub fn new(domain: Rc<[Value]>, range: Rc<[Value]>) -> Self {
        Self { domain, range }
    }

    /// Returns the output value for a domain member.
    pub fn map(&self, value: &Value) -> Option<&Value> {
        if self.range.is_empty() {
            return None;
        }
        let index = self.domain.iter().position(|v| v == value)?;
        self.range.get(index % self.range.len())
    }
}
