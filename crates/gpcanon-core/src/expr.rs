//! Node languages.
//!
//! Two closed languages are defined here: [`RealNode`] for symbolic
//! regression and [`BoolNode`] for boolean problems. Both implement [`Node`],
//! which is all the arena needs to navigate and rebuild trees generically.

use std::fmt::Debug;
use std::hash::Hash;

use ordered_float::OrderedFloat;
use smallvec::{smallvec, SmallVec};

use crate::handle::ExprHandle;

/// Unique identifier for a variable name within one arena.
pub type SymbolId = u32;

/// Inline child list. No node in either language has more than three children.
pub type Children = SmallVec<[ExprHandle; 3]>;

/// Behaviour shared by every node language stored in an [`ExprArena`].
///
/// [`ExprArena`]: crate::arena::ExprArena
pub trait Node: Clone + Eq + Hash + Debug {
    /// Returns the children of this node, left to right.
    fn children(&self) -> Children;

    /// Returns a copy of this node with its children replaced.
    ///
    /// # Panics
    ///
    /// Panics if `children.len()` differs from the node's arity.
    #[must_use]
    fn with_children(&self, children: &[ExprHandle]) -> Self;

    /// Returns the variable this node refers to, if it is a variable leaf.
    fn variable(&self) -> Option<SymbolId>;

    /// Number of children.
    fn arity(&self) -> usize {
        self.children().len()
    }

    /// Returns true for nodes without children.
    fn is_leaf(&self) -> bool {
        self.arity() == 0
    }
}

fn check_arity(expected: usize, children: &[ExprHandle]) {
    assert_eq!(
        children.len(),
        expected,
        "arity mismatch: expected {expected} children, got {}",
        children.len()
    );
}

/// A node of a symbolic-regression tree.
///
/// Division is protected: dividing by zero yields zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RealNode {
    /// A numeric constant.
    Literal(OrderedFloat<f64>),

    /// An input variable.
    Variable(SymbolId),

    /// `left + right`.
    Add(ExprHandle, ExprHandle),

    /// `left - right`.
    Sub(ExprHandle, ExprHandle),

    /// `left * right`.
    Mul(ExprHandle, ExprHandle),

    /// Protected `left / right`.
    Div(ExprHandle, ExprHandle),

    /// A coefficient-power leaf: `coefficient * variable^power`.
    Term {
        /// The multiplier.
        coefficient: OrderedFloat<f64>,
        /// The variable raised to `power`.
        variable: SymbolId,
        /// The exponent.
        power: OrderedFloat<f64>,
    },
}

impl RealNode {
    /// Creates a literal node.
    #[must_use]
    pub fn literal(value: f64) -> Self {
        RealNode::Literal(OrderedFloat(value))
    }

    /// Returns the literal value if this node is a literal.
    #[must_use]
    pub fn as_literal(&self) -> Option<f64> {
        match self {
            RealNode::Literal(v) => Some(v.0),
            _ => None,
        }
    }

    /// Returns true if this node is a literal.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, RealNode::Literal(_))
    }

    /// Returns true for the literal zero, either sign.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, RealNode::Literal(v) if v.0 == 0.0)
    }

    /// Returns the s-expression operator name for compound nodes.
    #[must_use]
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            RealNode::Add(..) => Some("+"),
            RealNode::Sub(..) => Some("-"),
            RealNode::Mul(..) => Some("*"),
            RealNode::Div(..) => Some("/"),
            RealNode::Term { .. } => Some("term"),
            RealNode::Literal(_) | RealNode::Variable(_) => None,
        }
    }
}

impl Node for RealNode {
    fn children(&self) -> Children {
        match self {
            RealNode::Literal(_) | RealNode::Variable(_) | RealNode::Term { .. } => Children::new(),
            RealNode::Add(l, r) | RealNode::Sub(l, r) | RealNode::Mul(l, r) | RealNode::Div(l, r) => {
                smallvec![*l, *r]
            }
        }
    }

    fn with_children(&self, children: &[ExprHandle]) -> Self {
        match self {
            RealNode::Literal(_) | RealNode::Variable(_) | RealNode::Term { .. } => {
                check_arity(0, children);
                self.clone()
            }
            RealNode::Add(..) => {
                check_arity(2, children);
                RealNode::Add(children[0], children[1])
            }
            RealNode::Sub(..) => {
                check_arity(2, children);
                RealNode::Sub(children[0], children[1])
            }
            RealNode::Mul(..) => {
                check_arity(2, children);
                RealNode::Mul(children[0], children[1])
            }
            RealNode::Div(..) => {
                check_arity(2, children);
                RealNode::Div(children[0], children[1])
            }
        }
    }

    fn variable(&self) -> Option<SymbolId> {
        match self {
            RealNode::Variable(id) | RealNode::Term { variable: id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// A node of a boolean tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoolNode {
    /// An input variable.
    Variable(SymbolId),

    /// Conjunction.
    And(ExprHandle, ExprHandle),

    /// Disjunction.
    Or(ExprHandle, ExprHandle),

    /// Negation.
    Not(ExprHandle),

    /// `if cond then a else b`.
    If(ExprHandle, ExprHandle, ExprHandle),
}

impl BoolNode {
    /// Returns the s-expression operator name for compound nodes.
    #[must_use]
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            BoolNode::Variable(_) => None,
            BoolNode::And(..) => Some("and"),
            BoolNode::Or(..) => Some("or"),
            BoolNode::Not(_) => Some("not"),
            BoolNode::If(..) => Some("if"),
        }
    }
}

impl Node for BoolNode {
    fn children(&self) -> Children {
        match self {
            BoolNode::Variable(_) => Children::new(),
            BoolNode::And(a, b) | BoolNode::Or(a, b) => smallvec![*a, *b],
            BoolNode::Not(a) => smallvec![*a],
            BoolNode::If(c, t, e) => smallvec![*c, *t, *e],
        }
    }

    fn with_children(&self, children: &[ExprHandle]) -> Self {
        match self {
            BoolNode::Variable(_) => {
                check_arity(0, children);
                self.clone()
            }
            BoolNode::And(..) => {
                check_arity(2, children);
                BoolNode::And(children[0], children[1])
            }
            BoolNode::Or(..) => {
                check_arity(2, children);
                BoolNode::Or(children[0], children[1])
            }
            BoolNode::Not(_) => {
                check_arity(1, children);
                BoolNode::Not(children[0])
            }
            BoolNode::If(..) => {
                check_arity(3, children);
                BoolNode::If(children[0], children[1], children[2])
            }
        }
    }

    fn variable(&self) -> Option<SymbolId> {
        match self {
            BoolNode::Variable(id) => Some(*id),
            _ => None,
        }
    }
}
