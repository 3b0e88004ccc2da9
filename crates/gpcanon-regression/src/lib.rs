//! # gpcanon-regression
//!
//! Canonical forms for symbolic-regression trees over a single variable.
//!
//! A tree built from `+`, `-`, `*`, protected `/`, literals and the variable
//! `X` is reduced to a sum of coefficient-power terms `c * X^p`. Once the sum
//! is simplified (like powers merged, zero terms dropped) and ordered by
//! power, two trees computing the same polynomial reduce to equal sums.
//!
//! ## Pipeline
//!
//! 1. Remove multiplications by a zero literal
//! 2. Remove identity divisions and divisions involving a zero literal
//! 3. Fold constant subtrees
//! 4. Repeat steps 1-2 ([`ReducerConfig::cleanup_rounds`])
//! 5. Lift every product and quotient to a sum of terms
//! 6. Flatten sums and differences into one term list
//!
//! [`expand`] goes the other way, from a sum of terms back to an executable
//! tree.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cvp;
pub mod error;
pub mod expand;
pub mod reduce;
pub mod representation;

#[cfg(test)]
mod proptests;

pub use cvp::CvpTerm;
pub use error::RegressionError;
pub use expand::{expand, expand_term};
pub use reduce::{Reducer, ReducerConfig};
pub use representation::RegressionRepresentation;
