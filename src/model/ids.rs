// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthoroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use smol_str::SmolStr;
use thiserror::Error;

/// Characters reserved by the route cache key encoding (`id:x,y,w,h|...`).
const RESERVED_ID_CHARS: [char; 3] = [':', ',', '|'];

/// Node coordinates are quantised to hundredths of a diagram unit.
const NODE_ID_SCALE: f64 = 100.0;

/// A stable identifier for diagram objects that take part in routing.
///
/// Ids must be non-empty and must not contain the separators used by the
/// route cache key, so two different shape sets can never encode to the same
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: SmolStr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        validate_id(value)?;
        Ok(Self { value: SmolStr::new(value), _marker: PhantomData })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
    #[error("id must not contain {0:?}")]
    ReservedChar(char),
}

fn validate_id(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if let Some(ch) = value.chars().find(|ch| RESERVED_ID_CHARS.contains(ch)) {
        return Err(IdError::ReservedChar(ch));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeIdTag {}
pub type ShapeId = Id<ShapeIdTag>;

/// Canonical id of a visibility graph node.
///
/// Two coordinates that agree to the hundredth map to the same id. The
/// textual form is `"x,y"` with integral values printed without a fraction,
/// e.g. `"100,25"` or `"-12.5,0.05"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    x: i64,
    y: i64,
}

impl NodeId {
    pub fn from_coords(x: f64, y: f64) -> Self {
        Self { x: quantize(x), y: quantize(y) }
    }

    /// The x coordinate this id encodes.
    pub fn x(&self) -> f64 {
        self.x as f64 / NODE_ID_SCALE
    }

    /// The y coordinate this id encodes.
    pub fn y(&self) -> f64 {
        self.y as f64 / NODE_ID_SCALE
    }

    pub(crate) fn column_key(&self) -> i64 {
        self.x
    }

    pub(crate) fn row_key(&self) -> i64 {
        self.y
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(24);
        push_fixed(&mut out, self.x);
        out.push(',');
        push_fixed(&mut out, self.y);
        f.write_str(&out)
    }
}

fn quantize(value: f64) -> i64 {
    (value * NODE_ID_SCALE).round() as i64
}

fn push_fixed(out: &mut String, value: i64) {
    let mut buf = itoa::Buffer::new();
    let abs = value.unsigned_abs();
    if value < 0 {
        out.push('-');
    }
    out.push_str(buf.format(abs / 100));

    let frac = abs % 100;
    if frac != 0 {
        out.push('.');
        if frac < 10 {
            out.push('0');
        }
        out.push_str(buf.format(frac).trim_end_matches('0'));
    }
}
