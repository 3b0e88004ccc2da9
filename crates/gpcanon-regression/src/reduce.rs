//! Reduction of regression trees to sums of coefficient-power terms.

use gpcanon_core::{protected_div, ExprHandle, RealArena, RealNode, SymbolId};
use log::{debug, trace};

use crate::cvp::CvpTerm;
use crate::error::RegressionError;
use crate::representation::RegressionRepresentation;

/// Configuration for the reducer.
#[derive(Clone, Debug)]
pub struct ReducerConfig {
    /// How many extra rounds of zero-multiplication and identity-division
    /// removal run after constant folding.
    pub cleanup_rounds: usize,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self { cleanup_rounds: 1 }
    }
}

/// Reduces regression trees to canonical sums of terms.
#[derive(Clone, Debug, Default)]
pub struct Reducer {
    config: ReducerConfig,
}

impl Reducer {
    /// Creates a reducer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reducer with a custom configuration.
    #[must_use]
    pub fn with_config(config: ReducerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// Reduces `tree` to its canonical representation (simplified and
    /// ordered).
    ///
    /// The intermediate lifted trees are interned into `arena`, which never
    /// frees nodes. Long-running searches should reduce into one arena per
    /// evaluation batch and drop it afterwards, the way a
    /// `BddSession` is scoped to one comparison context.
    ///
    /// # Errors
    ///
    /// Returns [`RegressionError::ForeignVariable`] if a variable other than
    /// `variable` survives the cleanup passes.
    pub fn reduce(
        &self,
        arena: &mut RealArena,
        tree: ExprHandle,
        variable: SymbolId,
    ) -> Result<RegressionRepresentation, RegressionError> {
        let mut repr = self.reduce_terms(arena, tree, variable)?;
        repr.canonicalize();
        debug!(
            "reduced tree of {} nodes to {} terms: {repr}",
            arena.size(tree),
            repr.len()
        );
        Ok(repr)
    }

    /// Reduces `tree` to the raw term list produced by lifting and
    /// isolation, before simplification and ordering.
    ///
    /// # Errors
    ///
    /// See [`Reducer::reduce`].
    pub fn reduce_terms(
        &self,
        arena: &mut RealArena,
        tree: ExprHandle,
        variable: SymbolId,
    ) -> Result<RegressionRepresentation, RegressionError> {
        let cleaned = self.clean(arena, tree);
        let lifted = lift_to_cvp(arena, cleaned, variable)?;
        trace!("lifted: {}", arena.display(lifted));
        Ok(RegressionRepresentation::from_terms(isolate_cvps(
            arena, lifted,
        )?))
    }

    /// Runs the structural cleanup passes: zero multiplications, identity
    /// divisions, constant folding, then the first two again.
    pub fn clean(&self, arena: &mut RealArena, tree: ExprHandle) -> ExprHandle {
        let mut current = remove_multiply_by_zeros(arena, tree);
        current = remove_identity_divisions(arena, current);
        current = fold_constants(arena, current);
        for _ in 0..self.config.cleanup_rounds {
            current = remove_multiply_by_zeros(arena, current);
            current = remove_identity_divisions(arena, current);
        }
        trace!("cleaned: {}", arena.display(current));
        current
    }
}

/// Replaces every product with a zero-literal operand by the literal `0`.
pub fn remove_multiply_by_zeros(arena: &mut RealArena, tree: ExprHandle) -> ExprHandle {
    arena.rewrite_bottom_up(tree, &mut |arena, node| match node {
        RealNode::Mul(l, r) if arena.get(l).is_zero() || arena.get(r).is_zero() => {
            arena.literal(0.0)
        }
        other => arena.intern(other),
    })
}

/// Simplifies protected divisions: a zero-literal dividend or divisor gives
/// `0`, and a division of a subtree by itself gives `1`.
///
/// The zero checks come first so that `0 / 0` agrees with protected
/// division.
pub fn remove_identity_divisions(arena: &mut RealArena, tree: ExprHandle) -> ExprHandle {
    arena.rewrite_bottom_up(tree, &mut |arena, node| match node {
        RealNode::Div(l, r) if arena.get(l).is_zero() || arena.get(r).is_zero() => {
            arena.literal(0.0)
        }
        RealNode::Div(l, r) if l == r => arena.literal(1.0),
        other => arena.intern(other),
    })
}

/// Replaces every variable-free subtree by the literal it evaluates to.
pub fn fold_constants(arena: &mut RealArena, tree: ExprHandle) -> ExprHandle {
    arena.rewrite_bottom_up(tree, &mut |arena, node| {
        let folded = match node {
            RealNode::Add(l, r) => literals(arena, l, r).map(|(a, b)| a + b),
            RealNode::Sub(l, r) => literals(arena, l, r).map(|(a, b)| a - b),
            RealNode::Mul(l, r) => literals(arena, l, r).map(|(a, b)| a * b),
            RealNode::Div(l, r) => literals(arena, l, r).map(|(a, b)| protected_div(a, b)),
            RealNode::Literal(_) | RealNode::Variable(_) | RealNode::Term { .. } => None,
        };
        match folded {
            Some(value) => arena.literal(value),
            None => arena.intern(node),
        }
    })
}

fn literals(arena: &RealArena, l: ExprHandle, r: ExprHandle) -> Option<(f64, f64)> {
    Some((arena.get(l).as_literal()?, arena.get(r).as_literal()?))
}

/// Rewrites a cleaned tree so that its only leaves are term nodes and its
/// only inner nodes are sums and differences.
///
/// Products and quotients are distributed over the term lists of their
/// operands, merged, and re-wrapped as a chain of sums.
///
/// # Errors
///
/// Returns [`RegressionError::ForeignVariable`] for any variable other than
/// `variable`.
pub fn lift_to_cvp(
    arena: &mut RealArena,
    tree: ExprHandle,
    variable: SymbolId,
) -> Result<ExprHandle, RegressionError> {
    let node = arena.get(tree).clone();
    match node {
        RealNode::Literal(c) => Ok(arena.term(c.0, variable, 0.0)),
        RealNode::Variable(id) => {
            check_variable(arena, id, variable)?;
            Ok(arena.term(1.0, variable, 1.0))
        }
        RealNode::Term { variable: id, .. } => {
            check_variable(arena, id, variable)?;
            Ok(tree)
        }
        RealNode::Add(l, r) => {
            let l = lift_to_cvp(arena, l, variable)?;
            let r = lift_to_cvp(arena, r, variable)?;
            Ok(arena.add(l, r))
        }
        RealNode::Sub(l, r) => {
            let l = lift_to_cvp(arena, l, variable)?;
            let r = lift_to_cvp(arena, r, variable)?;
            Ok(arena.sub(l, r))
        }
        RealNode::Mul(l, r) => lift_cross(arena, l, r, variable, CvpTerm::product),
        RealNode::Div(l, r) => lift_cross(arena, l, r, variable, CvpTerm::quotient),
    }
}

fn lift_cross(
    arena: &mut RealArena,
    left: ExprHandle,
    right: ExprHandle,
    variable: SymbolId,
    combine: fn(&CvpTerm, &CvpTerm) -> CvpTerm,
) -> Result<ExprHandle, RegressionError> {
    let left = lift_to_cvp(arena, left, variable)?;
    let left = merged_terms(arena, left)?;
    let right = lift_to_cvp(arena, right, variable)?;
    let right = merged_terms(arena, right)?;

    let mut cross: RegressionRepresentation = left
        .terms()
        .iter()
        .flat_map(|a| right.terms().iter().map(move |b| combine(a, b)))
        .collect();
    cross.simplify();
    Ok(wrap_terms(arena, cross.terms(), variable))
}

// Operand terms with like powers merged. Quotients are taken term by term,
// so a divisor must be a single term here for the result to be exact.
fn merged_terms(
    arena: &RealArena,
    lifted: ExprHandle,
) -> Result<RegressionRepresentation, RegressionError> {
    let mut terms = RegressionRepresentation::from_terms(isolate_cvps(arena, lifted)?);
    terms.simplify();
    Ok(terms)
}

fn check_variable(
    arena: &RealArena,
    found: SymbolId,
    expected: SymbolId,
) -> Result<(), RegressionError> {
    if found == expected {
        return Ok(());
    }
    let name = |id| {
        arena
            .symbol_name(id)
            .map_or_else(|| format!("${id}"), str::to_string)
    };
    Err(RegressionError::ForeignVariable {
        name: name(found),
        expected: name(expected),
    })
}

/// Builds a left-leaning chain of sums whose leaves are term nodes.
fn wrap_terms(arena: &mut RealArena, terms: &[CvpTerm], variable: SymbolId) -> ExprHandle {
    let mut leaves = terms
        .iter()
        .map(|t| arena.term(t.coefficient(), variable, t.power()))
        .collect::<Vec<_>>()
        .into_iter();
    let first = leaves
        .next()
        .unwrap_or_else(|| arena.term(0.0, variable, 0.0));
    leaves.fold(first, |acc, leaf| arena.add(acc, leaf))
}

/// Flattens a lifted tree into its list of terms, left to right. The right
/// operand of a difference contributes negated terms.
///
/// # Errors
///
/// Returns [`RegressionError::NotLifted`] if the tree contains anything
/// other than sums, differences and term leaves.
pub fn isolate_cvps(arena: &RealArena, tree: ExprHandle) -> Result<Vec<CvpTerm>, RegressionError> {
    let mut out = Vec::new();
    collect_terms(arena, tree, false, &mut out)?;
    Ok(out)
}

fn collect_terms(
    arena: &RealArena,
    tree: ExprHandle,
    negate: bool,
    out: &mut Vec<CvpTerm>,
) -> Result<(), RegressionError> {
    match arena.get(tree) {
        RealNode::Term {
            coefficient, power, ..
        } => {
            let term = CvpTerm::new(coefficient.0, power.0);
            out.push(if negate { term.negated() } else { term });
            Ok(())
        }
        RealNode::Add(l, r) => {
            collect_terms(arena, *l, negate, out)?;
            collect_terms(arena, *r, negate, out)
        }
        RealNode::Sub(l, r) => {
            collect_terms(arena, *l, negate, out)?;
            collect_terms(arena, *r, !negate, out)
        }
        RealNode::Literal(_) => Err(RegressionError::NotLifted("literal")),
        RealNode::Variable(_) => Err(RegressionError::NotLifted("variable")),
        RealNode::Mul(..) => Err(RegressionError::NotLifted("*")),
        RealNode::Div(..) => Err(RegressionError::NotLifted("/")),
    }
}
