//! Errors raised by BDD sessions.

use gpcanon_core::SymbolId;
use thiserror::Error;

/// Errors that can occur while translating between trees and BDDs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BddError {
    /// More variables were declared than the session supports.
    #[error("{count} variables declared, at most {max} are supported")]
    TooManyVariables {
        /// Number of declared variables.
        count: usize,
        /// Supported maximum.
        max: usize,
    },

    /// A variable was declared twice.
    #[error("variable {0} declared more than once")]
    DuplicateVariable(SymbolId),

    /// A tree refers to a variable the session was not opened with.
    #[error("variable `{name}` was not declared for this session")]
    UndeclaredVariable {
        /// Name of the variable.
        name: String,
    },

    /// A constant function has no variable to rebuild a tree from.
    #[error("cannot rebuild a tree for the constant {0}")]
    ConstantBehaviour(bool),

    /// A representation was handed to a session other than its own.
    #[error("representation belongs to a different session")]
    ForeignRepresentation,
}
