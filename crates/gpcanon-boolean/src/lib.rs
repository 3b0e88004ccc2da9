//! # gpcanon-boolean
//!
//! Canonical forms for boolean trees via reduced ordered binary decision
//! diagrams (ROBDDs).
//!
//! With a fixed variable order every boolean function has exactly one ROBDD,
//! so two trees are semantically equivalent iff their diagrams share a root.
//!
//! ## Sessions
//!
//! Diagrams live in a [`BddManager`] owned by a [`BddSession`]. A session is
//! opened over the declared variables, whose declaration order fixes the
//! variable order, and released when dropped. Representations borrow their
//! session and cannot outlive it.
//!
//! ```
//! use gpcanon_boolean::{BddConfig, BddSession};
//! use gpcanon_core::BoolArena;
//!
//! let mut arena = BoolArena::new();
//! let session = BddSession::start_named(&mut arena, &["A", "B"], &BddConfig::default()).unwrap();
//!
//! let absorbed = arena.parse("(and A (or A B))").unwrap();
//! let a = arena.parse("A").unwrap();
//!
//! let lhs = session.code_to_behaviour(&arena, absorbed).unwrap();
//! let rhs = session.code_to_behaviour(&arena, a).unwrap();
//! assert_eq!(lhs, rhs);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bdd;
pub mod error;
pub mod representation;
pub mod session;

#[cfg(test)]
mod proptests;

pub use bdd::{BddConfig, BddManager, BddRef};
pub use error::BddError;
pub use representation::BooleanRepresentation;
pub use session::BddSession;
