// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark declaration helpers for `chartparts_core` mark trees.
//!
//! - [`SymbolShape`] and [`symbol`]: point glyphs whose `shape` property comes from one
//!   fixed tag table.
//! - [`encode`]: small encoder combinators for the common cases (constants, fields, scaled
//!   fields, band widths, and view extents).

#![no_std]

extern crate alloc;

pub mod encode;
mod symbol;

pub use symbol::{SymbolShape, symbol};
