//! Semantic equivalence and simplification.
//!
//! These are the checks a search engine runs when accepting a mutation:
//! whether the offspring computes the same function as its parent, and the
//! smallest tree computing what a candidate computes.

use gpcanon_boolean::{BddConfig, BddSession};
use gpcanon_core::{BoolArena, ExprHandle, RealArena, SymbolId};
use gpcanon_regression::{expand, Reducer};
use log::debug;

use crate::error::Result;

/// Whether two regression trees compute the same function of `variable`.
///
/// # Errors
///
/// Fails if either tree mentions a variable other than `variable`.
pub fn regression_equivalent(
    arena: &mut RealArena,
    a: ExprHandle,
    b: ExprHandle,
    variable: SymbolId,
) -> Result<bool> {
    let reducer = Reducer::new();
    let ra = reducer.reduce(arena, a, variable)?;
    let rb = reducer.reduce(arena, b, variable)?;
    Ok(ra == rb)
}

/// Whether two boolean trees compute the same function of `variables`.
///
/// Opens a session of its own and releases it before returning.
///
/// # Errors
///
/// Fails if the variables cannot be declared, or if either tree uses a
/// variable outside `variables`.
pub fn boolean_equivalent(
    arena: &BoolArena,
    variables: &[SymbolId],
    a: ExprHandle,
    b: ExprHandle,
) -> Result<bool> {
    let session = BddSession::start(variables, &BddConfig::default())?;
    let ra = session.code_to_behaviour(arena, a)?;
    let rb = session.code_to_behaviour(arena, b)?;
    Ok(ra == rb)
}

/// Reduces a regression tree to its canonical sum and expands it back.
///
/// # Errors
///
/// Fails if the tree mentions a variable other than `variable`.
pub fn simplify_regression(
    arena: &mut RealArena,
    tree: ExprHandle,
    variable: SymbolId,
) -> Result<ExprHandle> {
    let repr = Reducer::new().reduce(arena, tree, variable)?;
    let simplified = expand(arena, &repr, variable);
    debug!(
        "simplified regression tree: {} -> {} nodes",
        arena.size(tree),
        arena.size(simplified)
    );
    Ok(simplified)
}

/// Rebuilds a boolean tree from its diagram.
///
/// Returns `None` when the tree is a tautology or a contradiction, since no
/// variable is left to build a tree from.
///
/// # Errors
///
/// Fails if the variables cannot be declared, or if the tree uses a variable
/// outside `variables`.
pub fn simplify_boolean(
    arena: &mut BoolArena,
    variables: &[SymbolId],
    tree: ExprHandle,
) -> Result<Option<ExprHandle>> {
    let session = BddSession::start(variables, &BddConfig::default())?;
    let repr = session.code_to_behaviour(arena, tree)?;
    if repr.is_constant() {
        debug!("boolean tree is constant {:?}", repr.as_constant());
        return Ok(None);
    }
    let simplified = session.behaviour_to_code(arena, &repr)?;
    Ok(Some(simplified))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use gpcanon_boolean::BddError;

    #[test]
    fn test_regression_equivalent() {
        let mut arena = RealArena::new();
        let x = arena.intern_symbol("X");
        let a = arena.parse("(- (* X X) 1)").unwrap();
        let b = arena.parse("(+ (* X (+ X 0)) -1)").unwrap();
        let c = arena.parse("(* X X)").unwrap();

        assert!(regression_equivalent(&mut arena, a, b, x).unwrap());
        assert!(!regression_equivalent(&mut arena, a, c, x).unwrap());
    }

    #[test]
    fn test_regression_foreign_variable() {
        let mut arena = RealArena::new();
        let x = arena.intern_symbol("X");
        let a = arena.parse("(+ X Y)").unwrap();
        let b = arena.parse("X").unwrap();

        let err = regression_equivalent(&mut arena, a, b, x).unwrap_err();
        assert!(matches!(err, Error::Regression(_)));

        // Identical handles are still reduced, not assumed equal
        let err = regression_equivalent(&mut arena, a, a, x).unwrap_err();
        assert!(matches!(err, Error::Regression(_)));
    }

    #[test]
    fn test_simplify_regression_zero() {
        let mut arena = RealArena::new();
        let x = arena.intern_symbol("X");
        let tree = arena.parse("(- (* 3 X) (+ X (* 2 X)))").unwrap();

        let simplified = simplify_regression(&mut arena, tree, x).unwrap();
        assert_eq!(arena.display(simplified).to_string(), "0");
    }

    #[test]
    fn test_boolean_equivalent() {
        let mut arena = BoolArena::new();
        let a = arena.parse("(not (or A B))").unwrap();
        let b = arena.parse("(and (not A) (not B))").unwrap();
        let c = arena.parse("(not (and A B))").unwrap();
        let vars = [arena.symbol_id("A").unwrap(), arena.symbol_id("B").unwrap()];

        assert!(boolean_equivalent(&arena, &vars, a, b).unwrap());
        assert!(!boolean_equivalent(&arena, &vars, a, c).unwrap());
    }

    #[test]
    fn test_simplify_boolean() {
        let mut arena = BoolArena::new();
        let tree = arena.parse("(and A (or A B))").unwrap();
        let tautology = arena.parse("(or B (not B))").unwrap();
        let vars = [arena.symbol_id("A").unwrap(), arena.symbol_id("B").unwrap()];

        let simplified = simplify_boolean(&mut arena, &vars, tree).unwrap().unwrap();
        assert_eq!(arena.display(simplified).to_string(), "A");
        assert_eq!(simplify_boolean(&mut arena, &vars, tautology).unwrap(), None);
    }

    #[test]
    fn test_boolean_undeclared() {
        let mut arena = BoolArena::new();
        let tree = arena.parse("(and A C)").unwrap();
        let vars = [arena.symbol_id("A").unwrap()];

        assert_eq!(
            simplify_boolean(&mut arena, &vars, tree),
            Err(Error::Boolean(BddError::UndeclaredVariable {
                name: "C".to_string()
            }))
        );
    }
}
