//! Access-path expressions for generated assertions.

use super::literal;
use crate::value::node::Key;
use std::fmt;

/// A segment in an access-path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// The caller-supplied root expression, emitted verbatim
    Root(String),
    /// Keyed lookup (`[:name]`, `['name']`, `[3]`)
    Key(Key),
    /// Member access (`.name`, or `.public_send(:"two words")` for names
    /// that are not plain method names)
    Field(String),
    /// Positional index (`[0]`)
    Index(usize),
    /// Element count (`.count`)
    Count,
    /// Lower bound of a range (`.first`)
    First,
    /// Upper bound of a range (`.last`)
    Last,
}

/// A complete access-path expression.
///
/// Paths are never mutated: [`AccessPath::child`] returns a new path, so
/// siblings never share a partially built expression.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessPath {
    /// Segments that make up the path.
    pub segments: Vec<PathSegment>,
}

impl AccessPath {
    /// Creates a path rooted at the given expression.
    pub fn root(expr: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Root(expr.into())],
        }
    }

    /// Returns a new path extended by one segment.
    ///
    /// # Example
    ///
    /// ```
    /// use assertgen::generator::accessor::{AccessPath, PathSegment};
    /// use assertgen::value::node::Key;
    ///
    /// let root = AccessPath::root("mixed");
    /// let path = root
    ///     .child(PathSegment::Key(Key::symbol("a")))
    ///     .child(PathSegment::Index(2));
    /// assert_eq!(path.to_string(), "mixed[:a][2]");
    /// assert_eq!(root.to_string(), "mixed");
    /// ```
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Root(expr) => f.write_str(expr),
            PathSegment::Key(key) => write!(f, "[{}]", key_literal(key)),
            PathSegment::Field(name) if literal::is_method_name(name) => write!(f, ".{}", name),
            PathSegment::Field(name) => write!(f, ".public_send({})", literal::symbol(name)),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
            PathSegment::Count => f.write_str(".count"),
            PathSegment::First => f.write_str(".first"),
            PathSegment::Last => f.write_str(".last"),
        }
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Renders a mapping key the way it appears inside `[...]`.
pub fn key_literal(key: &Key) -> String {
    match key {
        Key::Symbol(name) => literal::symbol(name),
        Key::String(s) if s.chars().any(char::is_control) => literal::string(s),
        Key::String(s) => single_quoted(s),
        Key::Integer(i) => i.to_string(),
    }
}

fn single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}
