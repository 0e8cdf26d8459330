//! Value representation for observed test output.
//!
//! This module provides the core data structures for the values assertgen
//! inspects. Every observed runtime value is converted into a `Value` tree
//! before traversal, so the generator never needs runtime reflection: the
//! variant itself says whether a node is a container or a scalar.
//!
//! # Example
//!
//! ```
//! use assertgen::value::node::{Key, Record, Value};
//! use indexmap::IndexMap;
//!
//! // A keyed mapping with symbol keys
//! let mut map = IndexMap::new();
//! map.insert(Key::symbol("a"), Value::Integer(100));
//! map.insert(Key::symbol("s"), Value::from("Hello"));
//! let hash = Value::Mapping(map);
//! assert!(hash.is_drillable());
//!
//! // A record exposing named fields
//! let record = Record::new().field("a", "a").field("b", "b");
//! assert_eq!(record.len(), 2);
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

/// A key inside a keyed mapping.
///
/// Symbols and strings are kept apart because they render differently in an
/// access path: `h[:name]` versus `h['name']`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Symbol(String),
    String(String),
    Integer(i128),
}

impl Key {
    pub fn symbol(name: impl Into<String>) -> Self {
        Key::Symbol(name.into())
    }

    pub fn string(name: impl Into<String>) -> Self {
        Key::String(name.into())
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Integer(i128::from(i))
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Symbol(s) => write!(f, ":{}", s),
            Key::String(s) => write!(f, "{}", s),
            Key::Integer(i) => write!(f, "{}", i),
        }
    }
}

/// A value that exposes its contents as named fields.
///
/// Records are visited through member access (`parent.field`) instead of
/// keyed lookup, in the order the fields were added.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, builder style. Re-adding a name replaces its value in place.
    ///
    /// # Example
    ///
    /// ```
    /// use assertgen::value::node::{Record, Value};
    ///
    /// let record = Record::new().field("id", 7_i64).field("name", "widget");
    /// assert_eq!(record.get("id"), Some(&Value::Integer(7)));
    /// ```
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Inserts a field, returning the previous value under that name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a record from any serializable struct.
    ///
    /// The struct is serialized to a mapping; each top-level entry becomes a
    /// field. Nested structs become symbol-keyed mappings.
    ///
    /// # Errors
    ///
    /// Fails if serialization fails or the value does not serialize to a
    /// mapping with scalar keys.
    pub fn from_serialize<T: Serialize>(value: &T) -> anyhow::Result<Self> {
        match Value::from_serialize(value)? {
            Value::Mapping(map) => Ok(map
                .into_iter()
                .map(|(key, value)| {
                    let name = match key {
                        Key::Symbol(s) | Key::String(s) => s,
                        Key::Integer(i) => i.to_string(),
                    };
                    (name, value)
                })
                .collect()),
            other => anyhow::bail!(
                "expected a struct or map to build a record, got {}",
                other.kind_name()
            ),
        }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// An observed runtime value.
///
/// This enum covers the scalar kinds the generator formats specially
/// (null, booleans, dates, timestamps, floats, decimals) plus the container
/// kinds it drills into. Containers own their children, so a `Value` tree is
/// always finite and acyclic.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    /// An arbitrary-precision decimal
    Decimal(Decimal),
    String(String),
    Symbol(String),
    /// A calendar date without time
    Date(NaiveDate),
    /// A timestamp carrying its zone offset
    DateTime(DateTime<FixedOffset>),
    /// A keyed mapping with insertion-ordered keys
    Mapping(IndexMap<Key, Value>),
    /// A value exposing named fields
    Record(Record),
    /// A bounded range; only its two bounds are visited
    Range { first: Box<Value>, last: Box<Value> },
    /// An ordered, indexable sequence
    Sequence(Vec<Value>),
    /// Any other enumerable collection, visited positionally
    Set(Vec<Value>),
}

impl Value {
    /// Builds a range value from its two bounds.
    pub fn range(first: impl Into<Value>, last: impl Into<Value>) -> Self {
        Value::Range {
            first: Box::new(first.into()),
            last: Box::new(last.into()),
        }
    }

    /// Builds a mapping from key/value pairs, keeping their order.
    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Converts any serializable value into a `Value` tree.
    ///
    /// String keys become symbols, matching how struct field names read in
    /// generated accessors (`result[:name]`).
    ///
    /// # Example
    ///
    /// ```
    /// use assertgen::value::node::{Key, Value};
    /// use std::collections::BTreeMap;
    ///
    /// let mut input = BTreeMap::new();
    /// input.insert("answer", 42);
    ///
    /// let value = Value::from_serialize(&input).unwrap();
    /// assert_eq!(value, Value::mapping([(Key::symbol("answer"), 42_i64)]));
    /// ```
    pub fn from_serialize<T: Serialize>(value: &T) -> anyhow::Result<Self> {
        let yaml = serde_yaml::to_value(value)?;
        let options = crate::file::loader::LoadOptions {
            symbolize_keys: true,
            detect_dates: false,
        };
        crate::file::loader::convert_yaml_value(yaml, &options)
    }

    /// Returns true if this value is a container the generator recurses into.
    ///
    /// # Example
    ///
    /// ```
    /// use assertgen::value::node::Value;
    ///
    /// assert!(Value::Sequence(vec![]).is_drillable());
    /// assert!(Value::range(1_i64, 4_i64).is_drillable());
    /// assert!(!Value::Integer(42).is_drillable());
    /// ```
    pub fn is_drillable(&self) -> bool {
        matches!(
            self,
            Value::Mapping(_)
                | Value::Record(_)
                | Value::Range { .. }
                | Value::Sequence(_)
                | Value::Set(_)
        )
    }

    /// Short name of the variant, used in log events and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Mapping(_) => "mapping",
            Value::Record(_) => "record",
            Value::Range { .. } => "range",
            Value::Sequence(_) => "sequence",
            Value::Set(_) => "set",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i128::from(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i128::from(i))
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Value::Integer(i128::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
