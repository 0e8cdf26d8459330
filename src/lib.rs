//! assertgen - record observed values as ready-to-paste test assertions.
//!
//! Hand the generator a value and the expression that produced it; it prints
//! one assertion per leaf, walking mappings, records, ranges and sequences
//! depth-first and building the accessor for every nested member.

pub mod config;
pub mod file;
pub mod generator;
pub mod value;

pub use generator::error::GenerateError;
pub use generator::options::{Options, RelativeDates};
pub use generator::{generate_asserts, record_asserts, Generator, Subject};
pub use value::node::{Key, Record, Value};
pub use value::observe::Observe;
