//! Assertion generation from observed values.
//!
//! The generator walks a [`Value`] depth-first. Containers (mappings,
//! records, ranges, sequences) are drilled into, building an access-path
//! expression for every child; each leaf produces exactly one assertion line.
//!
//! # Example
//!
//! ```
//! use assertgen::generator::{options::Options, record_asserts};
//! use assertgen::value::node::{Key, Value};
//!
//! let hash = Value::mapping([
//!     (Key::symbol("a"), Value::Integer(100)),
//!     (Key::symbol("s"), Value::from("Hello")),
//! ]);
//!
//! let lines = record_asserts(&hash, "h", &Options::default()).unwrap();
//! assert_eq!(lines, vec!["assert_equal 100, h[:a]", "assert_equal \"Hello\", h[:s]"]);
//! ```

pub mod accessor;
pub mod error;
pub mod leaf;
pub mod literal;
pub mod options;
pub mod sink;

use crate::value::node::Value;
use crate::value::shape::Shape;
use accessor::{AccessPath, PathSegment};
use error::{GenerateError, Result};
use options::Options;
use sink::{AssertSink, WriterSink};
use tracing::{debug, trace};

/// A deferred value: the literal expression text plus a lookup that
/// produces the value that expression names.
pub struct Deferred<'a> {
    expr: String,
    lookup: Box<dyn FnOnce(&str) -> anyhow::Result<Value> + 'a>,
}

impl<'a> Deferred<'a> {
    /// Pairs an expression with the lookup that resolves it.
    ///
    /// The lookup receives the expression text and runs only after the
    /// test-context guard has passed.
    pub fn new<F>(expr: impl Into<String>, lookup: F) -> Self
    where
        F: FnOnce(&str) -> anyhow::Result<Value> + 'a,
    {
        Self {
            expr: expr.into(),
            lookup: Box::new(lookup),
        }
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }
}

impl std::fmt::Debug for Deferred<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("expr", &self.expr)
            .finish_non_exhaustive()
    }
}

/// What to generate assertions for.
#[derive(Debug)]
pub enum Subject<'a> {
    /// A concrete value and the expression that re-obtains it in the test
    Value {
        value: &'a Value,
        expr: Option<String>,
    },
    /// A value resolved lazily from its expression
    Deferred(Deferred<'a>),
}

impl<'a> Subject<'a> {
    pub fn value(value: &'a Value, expr: impl Into<String>) -> Self {
        Subject::Value {
            value,
            expr: Some(expr.into()),
        }
    }

    pub fn deferred<F>(expr: impl Into<String>, lookup: F) -> Self
    where
        F: FnOnce(&str) -> anyhow::Result<Value> + 'a,
    {
        Subject::Deferred(Deferred::new(expr, lookup))
    }
}

/// Walks values and writes one assertion per leaf to its sink.
#[derive(Debug)]
pub struct Generator<S: AssertSink> {
    options: Options,
    sink: S,
}

impl<S: AssertSink> Generator<S> {
    pub fn new(options: Options, sink: S) -> Self {
        Self { options, sink }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Consumes the generator, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Generates assertions for a subject.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::InvalidInvocation`] if a value comes without a
    ///   (non-blank) expression
    /// - [`GenerateError::UsageContext`] if a deferred subject is used while
    ///   `test_context` is off
    /// - [`GenerateError::Evaluate`] if the deferred lookup fails
    /// - [`GenerateError::DepthExceeded`] / [`GenerateError::Io`] during traversal
    pub fn run(&mut self, subject: Subject<'_>) -> Result<()> {
        match subject {
            Subject::Value { value, expr } => {
                let expr = expr
                    .filter(|e| !e.trim().is_empty())
                    .ok_or(GenerateError::InvalidInvocation)?;
                self.generate(value, &AccessPath::root(expr))
            }
            Subject::Deferred(deferred) => {
                if !self.options.test_context {
                    return Err(GenerateError::UsageContext);
                }
                if deferred.expr.trim().is_empty() {
                    return Err(GenerateError::InvalidInvocation);
                }
                let Deferred { expr, lookup } = deferred;
                debug!(expr = %expr, "resolving deferred value");
                let value = lookup(&expr)?;
                self.generate(&value, &AccessPath::root(expr))
            }
        }
    }

    /// Generates assertions for `value`, re-obtained in the test by `path`.
    pub fn generate(&mut self, value: &Value, path: &AccessPath) -> Result<()> {
        match value.shape() {
            Shape::Mapping(map) => {
                self.enter(value, path)?;
                for (key, child) in map {
                    self.item(child, path.child(PathSegment::Key(key.clone())))?;
                }
            }
            Shape::Record(record) => {
                self.enter(value, path)?;
                for (name, child) in record.fields() {
                    self.item(child, path.child(PathSegment::Field(name.clone())))?;
                }
            }
            Shape::Range { first, last } => {
                self.enter(value, path)?;
                self.item(first, path.child(PathSegment::First))?;
                self.item(last, path.child(PathSegment::Last))?;
            }
            Shape::Sequence(items) => {
                self.enter(value, path)?;
                let count = Value::Integer(items.len() as i128);
                self.item(&count, path.child(PathSegment::Count))?;
                for (idx, child) in items.iter().enumerate() {
                    self.item(child, path.child(PathSegment::Index(idx)))?;
                }
            }
            Shape::Scalar(scalar) => {
                let line = leaf::assertion(scalar, &path.to_string(), &self.options);
                self.out(&line)?;
            }
        }
        Ok(())
    }

    /// Visits a child: containers recurse, everything else is a leaf.
    fn item(&mut self, value: &Value, path: AccessPath) -> Result<()> {
        if value.is_drillable() {
            return self.generate(value, &path);
        }
        if let Shape::Scalar(scalar) = value.shape() {
            let line = leaf::assertion(scalar, &path.to_string(), &self.options);
            self.out(&line)?;
        }
        Ok(())
    }

    fn enter(&self, value: &Value, path: &AccessPath) -> Result<()> {
        if path.depth() > self.options.max_depth {
            return Err(GenerateError::DepthExceeded {
                path: path.to_string(),
                limit: self.options.max_depth,
            });
        }
        debug!(path = %path, kind = value.kind_name(), "drilling into container");
        Ok(())
    }

    fn out(&mut self, line: &str) -> Result<()> {
        trace!(line = %line, "emit");
        self.sink.emit(line)?;
        Ok(())
    }
}

/// Generates assertions for a subject and prints them to stdout.
///
/// # Example
///
/// ```no_run
/// use assertgen::generator::{generate_asserts, options::Options, Subject};
/// use assertgen::value::node::Value;
///
/// let result = Value::Sequence(vec![Value::Integer(1), Value::Integer(2)]);
/// generate_asserts(Subject::value(&result, "result"), &Options::default()).unwrap();
/// // assert_equal 2, result.count
/// // assert_equal 1, result[0]
/// // assert_equal 2, result[1]
/// ```
pub fn generate_asserts(subject: Subject<'_>, options: &Options) -> Result<()> {
    Generator::new(options.clone(), WriterSink::stdout()).run(subject)
}

/// Generates assertions for `value` and returns them as lines.
pub fn record_asserts(value: &Value, expr: &str, options: &Options) -> Result<Vec<String>> {
    let mut generator = Generator::new(options.clone(), Vec::new());
    generator.run(Subject::value(value, expr))?;
    Ok(generator.into_sink())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_expression_is_invalid() {
        let value = Value::Integer(1);
        let mut generator = Generator::new(Options::default(), Vec::new());
        let err = generator
            .run(Subject::Value {
                value: &value,
                expr: Some("   ".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, GenerateError::InvalidInvocation));
        assert!(generator.into_sink().is_empty());
    }

    #[test]
    fn test_deferred_keeps_its_expression() {
        let deferred = Deferred::new("@hash", |_| Ok(Value::Null));
        assert_eq!(deferred.expr(), "@hash");
        assert_eq!(format!("{:?}", deferred), "Deferred { expr: \"@hash\", .. }");
    }

    #[test]
    fn test_deferred_guard_is_checked_before_lookup() {
        let mut called = false;
        let mut generator = Generator::new(Options::default(), Vec::new());
        let err = generator
            .run(Subject::deferred("@hash", |_| {
                called = true;
                Ok(Value::Null)
            }))
            .unwrap_err();
        assert!(matches!(err, GenerateError::UsageContext));
        assert!(!called);
    }

    #[test]
    fn test_depth_guard_keeps_earlier_lines() {
        let nested = Value::Sequence(vec![
            Value::Integer(1),
            Value::Sequence(vec![Value::Sequence(vec![Value::Integer(2)])]),
        ]);
        let options = Options {
            max_depth: 1,
            ..Options::default()
        };
        let mut generator = Generator::new(options, Vec::new());
        let err = generator
            .run(Subject::value(&nested, "deep"))
            .unwrap_err();
        match err {
            GenerateError::DepthExceeded { path, limit } => {
                assert_eq!(path, "deep[1][0]");
                assert_eq!(limit, 1);
            }
            other => panic!("expected depth error, got {:?}", other),
        }
        assert_eq!(
            generator.into_sink(),
            vec![
                "assert_equal 2, deep.count",
                "assert_equal 1, deep[0]",
                "assert_equal 1, deep[1].count",
            ]
        );
    }
}
