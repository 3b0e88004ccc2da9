//! # gpcanon-core
//!
//! Expression trees for genetic-programming individuals.
//!
//! This crate provides:
//! - A hash-consing arena generic over the node language
//! - The regression language (`RealNode`) and the boolean language (`BoolNode`)
//! - Evaluation with protected division
//! - Structural navigation and functional child replacement
//! - An s-expression reader and printer
//!
//! ## Design Principles
//!
//! - **Hash-Consing**: structurally equal subtrees share one handle, so
//!   structural equality is handle equality
//! - **Immutable Nodes**: rewrites build new nodes bottom-up; nothing is
//!   mutated in place, and sharing subtrees between parents is legal
//! - **Closed Languages**: each node language is an enum, so every rewrite
//!   is an exhaustive `match`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod eval;
pub mod expr;
pub mod handle;
pub mod intern;
pub mod parse;

#[cfg(test)]
mod proptests;

pub use arena::{BoolArena, ExprArena, RealArena};
pub use eval::{monomial, protected_div};
pub use expr::{BoolNode, Children, Node, RealNode, SymbolId};
pub use handle::ExprHandle;
pub use parse::ParseError;
