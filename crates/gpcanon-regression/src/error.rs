//! Errors raised while reducing regression trees.

use thiserror::Error;

/// Errors that can occur during reduction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegressionError {
    /// The tree mentions a variable other than the regression variable.
    #[error("variable `{name}` is not the regression variable `{expected}`")]
    ForeignVariable {
        /// Name of the offending variable.
        name: String,
        /// Name of the regression variable.
        expected: String,
    },

    /// A node other than a sum, difference or term reached term isolation.
    #[error("cannot isolate terms from a `{0}` node; lift the tree first")]
    NotLifted(&'static str),
}
