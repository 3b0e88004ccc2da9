//! # gpcanon
//!
//! Semantic canonicalization for genetic-programming trees.
//!
//! Two tree families are supported:
//!
//! - **Regression** trees over a single variable are reduced to ordered sums
//!   of coefficient-power terms ([`regression`]).
//! - **Boolean** trees are translated to reduced ordered binary decision
//!   diagrams ([`boolean`]).
//!
//! In both cases, equal canonical forms mean equal semantics, which lets a
//! search engine detect redundant or neutral mutations without sampling.
//!
//! ## Quick Start
//!
//! ```
//! use gpcanon::prelude::*;
//!
//! let mut arena = RealArena::new();
//! let x = arena.intern_symbol("X");
//! let a = arena.parse("(* (+ 1 1) X)").unwrap();
//! let b = arena.parse("(+ X X)").unwrap();
//!
//! assert!(gpcanon::regression_equivalent(&mut arena, a, b, x).unwrap());
//!
//! let simplified = gpcanon::simplify_regression(&mut arena, a, x).unwrap();
//! assert_eq!(arena.display(simplified).to_string(), "(* 2 X)");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod equivalence;
pub mod error;

#[cfg(test)]
mod proptests;

pub use gpcanon_boolean as boolean;
pub use gpcanon_core as core;
pub use gpcanon_regression as regression;

pub use equivalence::{
    boolean_equivalent, regression_equivalent, simplify_boolean, simplify_regression,
};
pub use error::{Error, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use gpcanon_boolean::{BddConfig, BddSession, BooleanRepresentation};
    pub use gpcanon_core::{BoolArena, BoolNode, ExprArena, ExprHandle, RealArena, RealNode};
    pub use gpcanon_regression::{
        expand, CvpTerm, Reducer, ReducerConfig, RegressionRepresentation,
    };
}
