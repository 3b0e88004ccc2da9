//! Tree evaluation.
//!
//! Variables are bound by a slice indexed by [`SymbolId`]: `env[id]` is the
//! value of the variable with that id in the arena's symbol table.
//!
//! [`SymbolId`]: crate::expr::SymbolId

use crate::arena::ExprArena;
use crate::expr::{BoolNode, RealNode};
use crate::handle::ExprHandle;

/// Division that yields `0` when the divisor is zero.
#[must_use]
pub fn protected_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Value of `coefficient * x^power`.
///
/// Integral powers use repeated multiplication so that results agree with
/// trees built from explicit products.
#[must_use]
pub fn monomial(coefficient: f64, x: f64, power: f64) -> f64 {
    if coefficient == 0.0 {
        return 0.0;
    }
    if power.fract() == 0.0 && power.abs() <= f64::from(i32::MAX) {
        #[allow(clippy::cast_possible_truncation)]
        let n = power as i32;
        let magnitude = x.powi(n.abs());
        if n < 0 {
            coefficient * protected_div(1.0, magnitude)
        } else {
            coefficient * magnitude
        }
    } else {
        coefficient * x.powf(power)
    }
}

impl ExprArena<RealNode> {
    /// Evaluates the tree at `root`.
    ///
    /// # Panics
    ///
    /// Panics if a variable id is out of range for `env`.
    #[must_use]
    pub fn evaluate(&self, root: ExprHandle, env: &[f64]) -> f64 {
        match self.get(root) {
            RealNode::Literal(v) => v.0,
            RealNode::Variable(id) => env[*id as usize],
            RealNode::Add(l, r) => self.evaluate(*l, env) + self.evaluate(*r, env),
            RealNode::Sub(l, r) => self.evaluate(*l, env) - self.evaluate(*r, env),
            RealNode::Mul(l, r) => self.evaluate(*l, env) * self.evaluate(*r, env),
            RealNode::Div(l, r) => protected_div(self.evaluate(*l, env), self.evaluate(*r, env)),
            RealNode::Term {
                coefficient,
                variable,
                power,
            } => monomial(coefficient.0, env[*variable as usize], power.0),
        }
    }
}

impl ExprArena<BoolNode> {
    /// Evaluates the tree at `root`.
    ///
    /// # Panics
    ///
    /// Panics if a variable id is out of range for `env`.
    #[must_use]
    pub fn evaluate(&self, root: ExprHandle, env: &[bool]) -> bool {
        match self.get(root) {
            BoolNode::Variable(id) => env[*id as usize],
            BoolNode::And(a, b) => self.evaluate(*a, env) && self.evaluate(*b, env),
            BoolNode::Or(a, b) => self.evaluate(*a, env) || self.evaluate(*b, env),
            BoolNode::Not(a) => !self.evaluate(*a, env),
            BoolNode::If(c, t, e) => {
                if self.evaluate(*c, env) {
                    self.evaluate(*t, env)
                } else {
                    self.evaluate(*e, env)
                }
            }
        }
    }
}
