//! Classification of values into the shapes the generator dispatches on.

use super::node::{Key, Record, Value};
use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// The container-or-scalar shape of a visited value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    Mapping(&'a IndexMap<Key, Value>),
    Record(&'a Record),
    Range { first: &'a Value, last: &'a Value },
    Sequence(&'a [Value]),
    Scalar(Scalar<'a>),
}

/// A leaf value, refined into the kinds that get their own assertion form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    DateTime(&'a DateTime<FixedOffset>),
    Date(NaiveDate),
    Number(Number<'a>),
    /// Strings, integers, symbols: compared by literal equality
    Other(&'a Value),
}

/// A number compared approximately when a precision is configured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number<'a> {
    Float(f64),
    Decimal(&'a Decimal),
}

impl Value {
    /// Classifies this value.
    ///
    /// Checked in order: keyed mapping, named fields, bounded range,
    /// enumerable, and finally scalar.
    ///
    /// # Example
    ///
    /// ```
    /// use assertgen::value::node::Value;
    /// use assertgen::value::shape::{Scalar, Shape};
    ///
    /// let items = Value::Sequence(vec![Value::Integer(1)]);
    /// assert!(matches!(items.shape(), Shape::Sequence(s) if s.len() == 1));
    /// assert_eq!(Value::Null.shape(), Shape::Scalar(Scalar::Null));
    /// ```
    pub fn shape(&self) -> Shape<'_> {
        match self {
            Value::Mapping(map) => Shape::Mapping(map),
            Value::Record(record) => Shape::Record(record),
            Value::Range { first, last } => Shape::Range { first, last },
            Value::Sequence(items) | Value::Set(items) => Shape::Sequence(items),
            Value::Null => Shape::Scalar(Scalar::Null),
            Value::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            Value::DateTime(dt) => Shape::Scalar(Scalar::DateTime(dt)),
            Value::Date(d) => Shape::Scalar(Scalar::Date(*d)),
            Value::Float(f) => Shape::Scalar(Scalar::Number(Number::Float(*f))),
            Value::Decimal(d) => Shape::Scalar(Scalar::Number(Number::Decimal(d))),
            Value::Integer(_) | Value::String(_) | Value::Symbol(_) => {
                Shape::Scalar(Scalar::Other(self))
            }
        }
    }
}
