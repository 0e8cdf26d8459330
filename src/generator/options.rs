//! Per-invocation generator settings.

use chrono::NaiveDate;

/// Decimal places used for approximate float assertions unless overridden.
pub const DEFAULT_PRECISION: u32 = 2;

/// Containers nested deeper than this abort generation unless overridden.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Anchor for expressing dates relative to "today".
///
/// `expr` is the source text written into assertions (e.g. `Date.today`);
/// `today` is the date that text evaluates to when the test runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDates {
    pub expr: String,
    pub today: NaiveDate,
}

impl RelativeDates {
    pub fn new(expr: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            expr: expr.into(),
            today,
        }
    }
}

/// Settings shared unchanged by every node of one traversal.
///
/// # Example
///
/// ```
/// use assertgen::generator::options::{Options, DEFAULT_PRECISION};
///
/// let options = Options::default();
/// assert_eq!(options.precision, Some(DEFAULT_PRECISION));
/// assert!(options.relative_dates.is_none());
/// assert!(!options.test_context);
///
/// // Exact equality for floats and decimals
/// let exact = Options { precision: None, ..Options::default() };
/// assert!(exact.precision.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Express dates relative to an anchor instead of as absolute literals
    pub relative_dates: Option<RelativeDates>,
    /// Rounding precision for floats and decimals; `None` asserts exact equality
    pub precision: Option<u32>,
    /// Sanctions the deferred-lookup form. Off unless the host opts in.
    pub test_context: bool,
    /// Maximum container nesting below the root
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            relative_dates: None,
            precision: Some(DEFAULT_PRECISION),
            test_context: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    /// Options for use inside a test suite, where deferred lookups are allowed.
    pub fn for_tests() -> Self {
        Self {
            test_context: true,
            ..Self::default()
        }
    }
}
