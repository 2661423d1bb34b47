// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt::{Debug, Formatter};
use core::str::FromStr;

use serde::ser::Serializer;
use serde::Serialize;

/// Numeric scalar as decoded from the wire: either a native integer or a
/// native floating-point number.
///
/// The two representations are kept distinct so that an integer read from
/// JSON stays an integer through a coercion round trip. Comparisons and
/// serialization treat an integral float as equal to the corresponding
/// integer, so `2` and `2.0` are the same number on the wire.
#[derive(Clone)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Collapses an integral float back to the integer representation.
    fn normalize_float(value: f64) -> Number {
        if value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value <= i64::MAX as f64
        {
            let candidate = value as i64;
            if (candidate as f64) == value {
                return Number::Int(candidate);
            }
        }
        Number::Float(value)
    }

    fn to_f64_lossy(&self) -> f64 {
        match self {
            Number::Int(v) => *v as f64,
            Number::Float(v) => *v,
        }
    }

    /// The exact `i64` representation, if there is one. Fractional and
    /// out-of-range floats return `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(v) => Some(*v),
            Number::Float(f) => match Self::normalize_float(*f) {
                Number::Int(v) => Some(v),
                Number::Float(_) => None,
            },
        }
    }

    /// The value as an `f64`. Lossless for every float and for integers
    /// up to 2^53.
    pub fn as_f64(&self) -> f64 {
        self.to_f64_lossy()
    }

    /// Truncates toward zero to an `i64`, saturating at the `i64` range.
    /// Total: this is the conversion an `int`-typed field applies to any
    /// numeric input, so `3.7` becomes `3` and `-3.7` becomes `-3`.
    pub fn to_i64_trunc(&self) -> i64 {
        match self {
            Number::Int(v) => *v,
            Number::Float(f) => *f as i64,
        }
    }

    pub fn is_integer(&self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(f) => f.is_finite() && f.fract() == 0.0,
        }
    }

    pub fn format_decimal(&self) -> String {
        match self {
            Number::Int(v) => v.to_string(),
            Number::Float(f) => {
                if f.is_nan() {
                    "NaN".to_string()
                } else {
                    f.to_string()
                }
            }
        }
    }
}

impl Debug for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format_decimal())
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = self.format_decimal();
        let v = serde_json::Number::from_str(&s)
            .map_err(|_| serde::ser::Error::custom("could not serialize number"))?;
        v.serialize(serializer)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        if let Ok(v) = i64::try_from(value) {
            Number::Int(v)
        } else {
            Number::Float(value as f64)
        }
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Number::from(value as u64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value as i64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_i64(), other.as_i64()) {
            return a == b;
        }

        let a = self.to_f64_lossy();
        let b = other.to_f64_lossy();
        if a.is_nan() || b.is_nan() {
            return false;
        }
        a == b
    }
}
