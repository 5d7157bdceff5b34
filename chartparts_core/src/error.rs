// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while composing a scene.

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// What went wrong while resolving scales, viewports, data, or encodings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneErrorKind {
    /// A directive or encoder referenced a scale that is not in scope.
    UnresolvedScale {
        /// The requested scale name.
        name: String,
    },
    /// A scale directive did not produce a value for the name it declares.
    UnproducedScale {
        /// The declared scale name.
        name: String,
    },
    /// A view or viewport cannot be used for scale fitting.
    MalformedViewport {
        /// Which check failed.
        reason: &'static str,
    },
    /// A mark, facet, or directive referenced a table that is not in scope.
    MissingTable {
        /// The requested table name.
        name: String,
    },
    /// An encoder could not compute a property value.
    InvalidEncoding {
        /// The encoded property. Empty until the scene pass attaches the property key.
        property: String,
        /// Why the value could not be computed.
        reason: &'static str,
    },
}

impl fmt::Display for SceneErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedScale { name } => write!(f, "scale `{name}` is not in scope"),
            Self::UnproducedScale { name } => {
                write!(f, "scale directive `{name}` produced no scale")
            }
            Self::MalformedViewport { reason } => write!(f, "malformed viewport: {reason}"),
            Self::MissingTable { name } => write!(f, "table `{name}` is not in scope"),
            Self::InvalidEncoding { property, reason } => {
                write!(f, "cannot encode `{property}`: {reason}")
            }
        }
    }
}

impl core::error::Error for SceneErrorKind {}

/// A failure that aborted a scene pass, tagged with the path of the frame that raised it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneError {
    /// Dotted path id of the offending frame (for example `root.bars.facet(region=west)`).
    pub path: String,
    /// The underlying failure.
    pub kind: SceneErrorKind,
}

impl SceneError {
    /// Creates an error for the frame at `path`.
    pub fn new(path: impl Into<String>, kind: SceneErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at `{}`)", self.kind, self.path)
    }
}

impl core::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}
