//! Size limits with the `-1` "no constraint" sentinel.
//!
//! Limits travel as signed integers (config files, callers porting sentinel
//! values) and are held as [`Limit`] in memory. Any negative integer reads as
//! [`Limit::Unbounded`].

use nutype::nutype;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LimitError;

pub const UNBOUNDED: i64 = -1;

/// Non-zero pixel extent of an image axis.
#[nutype(
    validate(greater = 0),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Into,
        TryFrom,
        Display,
    )
)]
pub struct Dimension(u32);

/// A value a [`Limit`] can bound.
pub trait Extent: Copy {
    fn from_raw(raw: u64) -> Result<Self, LimitError>;

    fn to_raw(self) -> u64;
}

impl Extent for usize {
    fn from_raw(raw: u64) -> Result<Self, LimitError> {
        usize::try_from(raw).map_err(|_| LimitError::OutOfRange(raw))
    }

    fn to_raw(self) -> u64 {
        self as u64
    }
}

impl Extent for Dimension {
    fn from_raw(raw: u64) -> Result<Self, LimitError> {
        let value = u32::try_from(raw).map_err(|_| LimitError::OutOfRange(raw))?;
        Ok(Dimension::try_new(value)?)
    }

    fn to_raw(self) -> u64 {
        u64::from(self.into_inner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit<T> {
    Unbounded,
    Max(T),
}

impl<T> Default for Limit<T> {
    fn default() -> Self {
        Limit::Unbounded
    }
}

impl<T: Extent> Limit<T> {
    pub fn from_sentinel(raw: i64) -> Result<Self, LimitError> {
        if raw < 0 {
            return Ok(Limit::Unbounded);
        }
        T::from_raw(raw.unsigned_abs()).map(Limit::Max)
    }

    pub fn to_sentinel(self) -> i64 {
        match self {
            Limit::Unbounded => UNBOUNDED,
            Limit::Max(value) => i64::try_from(value.to_raw()).unwrap_or(i64::MAX),
        }
    }
}

impl<T> Limit<T> {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Limit::Unbounded)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Limit::Unbounded => None,
            Limit::Max(value) => Some(value),
        }
    }
}

impl Limit<Dimension> {
    /// Bound for an axis whose current extent is `extent`; an unbounded axis
    /// is bounded by the extent itself.
    pub fn resolve(self, extent: u32) -> u32 {
        match self {
            Limit::Unbounded => extent,
            Limit::Max(max) => max.into_inner(),
        }
    }
}

impl<T: Extent> Serialize for Limit<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_sentinel())
    }
}

impl<'de, T: Extent> Deserialize<'de> for Limit<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Limit::from_sentinel(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests;
