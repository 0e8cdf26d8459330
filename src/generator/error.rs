//! Error types for assertion generation.

use thiserror::Error;

/// Errors that can occur while generating assertions.
///
/// Assertions emitted before the error stay emitted.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Neither a root expression nor a deferred lookup was given.
    #[error("generate_asserts wants a source expression or a deferred lookup")]
    InvalidInvocation,

    /// A deferred lookup was used without the test-context guard.
    #[error("deferred lookups must only be used in the test context")]
    UsageContext,

    /// Containers nested deeper than the configured limit.
    #[error("nesting at `{path}` exceeds the maximum depth of {limit}")]
    DepthExceeded { path: String, limit: usize },

    /// The deferred lookup itself failed; its error is passed through as-is.
    #[error(transparent)]
    Evaluate(#[from] anyhow::Error),

    /// The output sink failed.
    #[error("failed to write assertion: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            GenerateError::InvalidInvocation.to_string(),
            "generate_asserts wants a source expression or a deferred lookup"
        );
        let err = GenerateError::DepthExceeded {
            path: "a[0][0]".to_string(),
            limit: 1,
        };
        assert_eq!(
            err.to_string(),
            "nesting at `a[0][0]` exceeds the maximum depth of 1"
        );
    }

    #[test]
    fn test_evaluate_is_transparent() {
        let err = GenerateError::from(anyhow::anyhow!("no such fixture: users"));
        assert_eq!(err.to_string(), "no such fixture: users");
    }
}
