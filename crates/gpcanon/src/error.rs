//! Unified error type.

use gpcanon_boolean::BddError;
use gpcanon_core::ParseError;
use gpcanon_regression::RegressionError;
use thiserror::Error;

/// Any error raised by the canonicalization engines.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed s-expression input.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Regression reduction failed.
    #[error(transparent)]
    Regression(#[from] RegressionError),

    /// BDD translation failed.
    #[error(transparent)]
    Boolean(#[from] BddError),
}

/// Result alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
