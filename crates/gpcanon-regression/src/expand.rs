//! Expansion of term sums back into executable trees.

use gpcanon_core::{ExprHandle, RealArena, RealNode, SymbolId};

use crate::cvp::CvpTerm;
use crate::representation::RegressionRepresentation;

/// Integral powers beyond this magnitude are emitted as a single term leaf
/// instead of an unrolled product.
pub const MAX_UNROLLED_POWER: f64 = 64.0;

/// Builds a tree computing the sum in `repr`.
///
/// Terms are chained left to right. A term with a negative coefficient is
/// subtracted with its sign flipped, so every literal after the first term
/// is non-negative. An empty sum expands to the literal `0`.
pub fn expand(
    arena: &mut RealArena,
    repr: &RegressionRepresentation,
    variable: SymbolId,
) -> ExprHandle {
    let mut terms = repr.terms().iter();
    let Some(first) = terms.next() else {
        return arena.literal(0.0);
    };

    let mut tree = expand_term(arena, first, variable);
    for term in terms {
        tree = if term.coefficient() < 0.0 {
            let leaf = expand_term(arena, &term.negated(), variable);
            arena.sub(tree, leaf)
        } else {
            let leaf = expand_term(arena, term, variable);
            arena.add(tree, leaf)
        };
    }
    tree
}

/// Builds a tree computing a single term from literals, the variable,
/// products and quotients.
///
/// Non-integral powers, powers strictly between -1 and 1, and powers beyond
/// [`MAX_UNROLLED_POWER`] are emitted as a term leaf.
pub fn expand_term(arena: &mut RealArena, term: &CvpTerm, variable: SymbolId) -> ExprHandle {
    let c = term.coefficient();
    let p = term.power();

    if c == 0.0 {
        return arena.literal(0.0);
    }
    if p == 0.0 {
        return arena.literal(c);
    }

    let x = arena.intern(RealNode::Variable(variable));
    if p == 1.0 {
        if c == 1.0 {
            return x;
        }
        let c = arena.literal(c);
        return arena.mul(c, x);
    }
    if p == -1.0 {
        let c = arena.literal(c);
        return arena.div(c, x);
    }
    if p.fract() != 0.0 || p.abs() < 1.0 || p.abs() > MAX_UNROLLED_POWER {
        return arena.term(c, variable, p);
    }

    if p < -1.0 {
        let denominator = expand_term(arena, &CvpTerm::new(1.0, -p), variable);
        let c = arena.literal(c);
        arena.div(c, denominator)
    } else if c == 1.0 {
        let rest = expand_term(arena, &CvpTerm::new(1.0, p - 1.0), variable);
        arena.mul(x, rest)
    } else {
        let power = expand_term(arena, &CvpTerm::new(1.0, p), variable);
        let c = arena.literal(c);
        arena.mul(c, power)
    }
}
