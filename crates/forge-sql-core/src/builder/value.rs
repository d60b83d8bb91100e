//! Values accepted by the precompiler.
//!
//! A [`Value`] is classified when rendered, in a fixed order: null, booleans,
//! arrays, sub-queries, expressions, byte strings, bit fields, other objects,
//! integers, doubles, then strings (date-like, empty, anything else).

use chrono::{NaiveDate, NaiveDateTime};

use crate::command::Command;
use crate::error::{Error, Result};
use crate::expression::Expression;

/// A string of binary digits, rendered as a bit literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitField(String);

impl BitField {
    /// Creates a bit field from a string of `0` and `1` characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] on an empty string or any other
    /// character.
    pub fn new(bits: impl Into<String>) -> Result<Self> {
        let bits = bits.into();
        if bits.is_empty() || !bits.chars().all(|c| c == '0' || c == '1') {
            return Err(Error::invalid("bit field must be a string of 0 and 1", bits));
        }
        Ok(Self(bits))
    }

    /// Creates a bit field of `width` bits holding `value`.
    #[must_use]
    pub fn from_u64(value: u64, width: usize) -> Self {
        Self(format!("{value:0width$b}"))
    }

    /// Returns the binary digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric value, or `None` beyond 64 significant bits.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        u64::from_str_radix(&self.0, 2).ok()
    }
}

/// A value to be rendered as SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// List of values, rendered as a parenthesized list.
    Array(Vec<Value>),
    /// Compiled sub-select.
    Subquery(Command),
    /// Raw SQL fragment with its own parameters.
    Expression(Expression),
    /// Binary string.
    Bytes(Vec<u8>),
    /// Bit field.
    Bits(BitField),
    /// Any other object, stringified and classified as a string.
    Object(String),
    /// Integer value.
    Int(i64),
    /// Double value.
    Double(f64),
    /// Text value.
    Text(String),
}

impl Value {
    /// Builds an array value.
    #[must_use]
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToValue,
    {
        Self::Array(items.into_iter().map(ToValue::to_value).collect())
    }

    /// Returns the truthiness of the value.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Double(f) => *f != 0.0,
            Self::Text(s) | Self::Object(s) => !(s.is_empty() || s == "0"),
            Self::Array(items) => !items.is_empty(),
            Self::Bytes(bytes) => !bytes.is_empty(),
            Self::Bits(bits) => bits.to_u64().map_or(true, |n| n != 0),
            Self::Subquery(_) | Self::Expression(_) => true,
        }
    }

    /// Returns the name of the variant, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Array(_) => "array",
            Self::Subquery(_) => "subquery",
            Self::Expression(_) => "expression",
            Self::Bytes(_) => "bytes",
            Self::Bits(_) => "bits",
            Self::Object(_) => "object",
            Self::Int(_) => "integer",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
        }
    }
}

/// Trait for types that can be converted to values.
pub trait ToValue {
    /// Converts into a `Value`.
    fn to_value(self) -> Value;
}

impl ToValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl ToValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

macro_rules! int_to_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(self) -> Value {
                    Value::Int(i64::from(self))
                }
            }
        )*
    };
}

int_to_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for f64 {
    fn to_value(self) -> Value {
        Value::Double(self)
    }
}

impl ToValue for f32 {
    fn to_value(self) -> Value {
        Value::Double(f64::from(self))
    }
}

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::Text(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::Text(String::from(self))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        self.map_or(Value::Null, ToValue::to_value)
    }
}

impl ToValue for Vec<u8> {
    fn to_value(self) -> Value {
        Value::Bytes(self)
    }
}

impl ToValue for &[u8] {
    fn to_value(self) -> Value {
        Value::Bytes(self.to_vec())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(self) -> Value {
        Value::array(self)
    }
}

impl ToValue for BitField {
    fn to_value(self) -> Value {
        Value::Bits(self)
    }
}

impl ToValue for Expression {
    fn to_value(self) -> Value {
        Value::Expression(self)
    }
}

impl ToValue for Command {
    fn to_value(self) -> Value {
        Value::Subquery(self)
    }
}

impl ToValue for NaiveDate {
    fn to_value(self) -> Value {
        Value::Object(self.format("%Y-%m-%d").to_string())
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(self) -> Value {
        Value::Object(self.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
