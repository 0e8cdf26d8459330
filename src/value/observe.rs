//! Adapters from Rust types to `Value` trees.
//!
//! Implement [`Observe`] for your own record types to make them visible to the
//! generator as named fields:
//!
//! ```
//! use assertgen::value::observe::Observe;
//! use assertgen::value::node::{Record, Value};
//!
//! struct Invoice {
//!     number: String,
//!     paid: bool,
//! }
//!
//! impl Observe for Invoice {
//!     fn observe(&self) -> Value {
//!         Record::new()
//!             .field("number", self.number.observe())
//!             .field("paid", self.paid.observe())
//!             .into()
//!     }
//! }
//!
//! let invoice = Invoice { number: "INV-1".into(), paid: false };
//! assert!(matches!(invoice.observe(), Value::Record(_)));
//! ```

use super::node::{Key, Record, Value};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Range, RangeInclusive};

/// Types that can be observed by the generator.
pub trait Observe {
    fn observe(&self) -> Value;
}

/// Types usable as mapping keys.
pub trait ObserveKey {
    fn observe_key(&self) -> Key;
}

macro_rules! observe_integer {
    ($($t:ty),*) => {
        $(
            impl Observe for $t {
                fn observe(&self) -> Value {
                    Value::Integer(i128::from(*self))
                }
            }

            impl ObserveKey for $t {
                fn observe_key(&self) -> Key {
                    Key::Integer(i128::from(*self))
                }
            }
        )*
    };
}

observe_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

impl Observe for usize {
    fn observe(&self) -> Value {
        // usize is at most 64 bits on supported targets
        Value::Integer(*self as i128)
    }
}

impl Observe for isize {
    fn observe(&self) -> Value {
        Value::Integer(*self as i128)
    }
}

impl Observe for bool {
    fn observe(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Observe for f64 {
    fn observe(&self) -> Value {
        Value::Float(*self)
    }
}

impl Observe for f32 {
    fn observe(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Observe for Decimal {
    fn observe(&self) -> Value {
        Value::Decimal(*self)
    }
}

impl Observe for str {
    fn observe(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Observe for String {
    fn observe(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ObserveKey for str {
    fn observe_key(&self) -> Key {
        Key::String(self.to_string())
    }
}

impl ObserveKey for String {
    fn observe_key(&self) -> Key {
        Key::String(self.clone())
    }
}

impl ObserveKey for Key {
    fn observe_key(&self) -> Key {
        self.clone()
    }
}

impl<K: ObserveKey + ?Sized> ObserveKey for &K {
    fn observe_key(&self) -> Key {
        (**self).observe_key()
    }
}

impl<T: Observe + ?Sized> Observe for &T {
    fn observe(&self) -> Value {
        (**self).observe()
    }
}

impl<T: Observe + ?Sized> Observe for Box<T> {
    fn observe(&self) -> Value {
        (**self).observe()
    }
}

impl<T: Observe> Observe for Option<T> {
    fn observe(&self) -> Value {
        match self {
            Some(v) => v.observe(),
            None => Value::Null,
        }
    }
}

impl<T: Observe> Observe for [T] {
    fn observe(&self) -> Value {
        Value::Sequence(self.iter().map(Observe::observe).collect())
    }
}

impl<T: Observe> Observe for Vec<T> {
    fn observe(&self) -> Value {
        self.as_slice().observe()
    }
}

impl<T: Observe, const N: usize> Observe for [T; N] {
    fn observe(&self) -> Value {
        self.as_slice().observe()
    }
}

impl<T: Observe> Observe for BTreeSet<T> {
    fn observe(&self) -> Value {
        Value::Set(self.iter().map(Observe::observe).collect())
    }
}

impl<K: ObserveKey, V: Observe> Observe for IndexMap<K, V> {
    fn observe(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(k, v)| (k.observe_key(), v.observe()))
                .collect(),
        )
    }
}

impl<K: ObserveKey, V: Observe> Observe for BTreeMap<K, V> {
    fn observe(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(k, v)| (k.observe_key(), v.observe()))
                .collect(),
        )
    }
}

impl Observe for NaiveDate {
    fn observe(&self) -> Value {
        Value::Date(*self)
    }
}

impl Observe for DateTime<FixedOffset> {
    fn observe(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl Observe for DateTime<Utc> {
    fn observe(&self) -> Value {
        Value::DateTime((*self).into())
    }
}

impl<T: Observe> Observe for Range<T> {
    fn observe(&self) -> Value {
        Value::Range {
            first: Box::new(self.start.observe()),
            last: Box::new(self.end.observe()),
        }
    }
}

impl<T: Observe> Observe for RangeInclusive<T> {
    fn observe(&self) -> Value {
        Value::Range {
            first: Box::new(self.start().observe()),
            last: Box::new(self.end().observe()),
        }
    }
}

impl Observe for Record {
    fn observe(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl Observe for Value {
    fn observe(&self) -> Value {
        self.clone()
    }
}
