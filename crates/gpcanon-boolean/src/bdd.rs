//! Reduced ordered binary decision diagrams.
//!
//! # Representation
//!
//! - Node 0 is the FALSE terminal and node 1 the TRUE terminal
//! - Every other node tests the variable at its `level`, following `low`
//!   when the variable is false and `high` when it is true
//! - Levels increase strictly along every path; terminals sit below all
//!   variables at level `num_vars`
//! - The unique table guarantees no two nodes share `(level, low, high)`, and
//!   [`BddManager::mk_node`] never creates a node with `low == high`
//!
//! Together these make the diagram canonical: equal functions have equal
//! roots.
//!
//! All operations are built on a memoized `ite` (if-then-else).

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;

/// Largest number of variables a manager supports. Satisfying-assignment
/// counts are exact `u128`s, so `2^127` is the largest count.
pub const MAX_VARIABLES: usize = 127;

/// Configuration for BDD managers.
#[derive(Clone, Debug)]
pub struct BddConfig {
    /// Node slots reserved per declared variable.
    pub nodes_per_variable: usize,
    /// Largest number of variables a session accepts. Values above
    /// [`MAX_VARIABLES`] are clamped.
    pub max_variables: usize,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            nodes_per_variable: 1024,
            max_variables: MAX_VARIABLES,
        }
    }
}

impl BddConfig {
    /// Node capacity to reserve for `num_vars` variables.
    #[must_use]
    pub fn capacity_for(&self, num_vars: usize) -> usize {
        2 + num_vars.saturating_mul(self.nodes_per_variable)
    }

    /// The effective variable limit.
    #[must_use]
    pub fn variable_limit(&self) -> usize {
        self.max_variables.min(MAX_VARIABLES)
    }
}

/// A reference to a node in a [`BddManager`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BddRef(u32);

impl BddRef {
    /// The constant false function.
    pub const FALSE: BddRef = BddRef(0);
    /// The constant true function.
    pub const TRUE: BddRef = BddRef(1);

    /// Returns true for the two terminals.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.0 <= 1
    }

    /// The terminal for `value`.
    #[must_use]
    pub fn constant(value: bool) -> Self {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// The constant value of a terminal.
    #[must_use]
    pub fn as_constant(self) -> Option<bool> {
        match self {
            Self::FALSE => Some(false),
            Self::TRUE => Some(true),
            _ => None,
        }
    }

    /// Raw node index.
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for BddRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_constant() {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "@{}", self.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct BddNode {
    level: u32,
    low: BddRef,
    high: BddRef,
}

/// Owner of a shared pool of BDD nodes.
///
/// Operations take `&self`; node storage and caches use interior
/// mutability, so a manager is not `Sync` and must stay on one thread.
pub struct BddManager {
    num_vars: u32,
    nodes: RefCell<Vec<BddNode>>,
    unique_table: RefCell<FxHashMap<BddNode, BddRef>>,
    ite_cache: RefCell<FxHashMap<(BddRef, BddRef, BddRef), BddRef>>,
}

impl BddManager {
    /// Creates a manager over `num_vars` variables with room for `capacity`
    /// nodes.
    ///
    /// # Panics
    ///
    /// Panics if `num_vars` exceeds [`MAX_VARIABLES`].
    #[must_use]
    pub fn with_capacity(num_vars: usize, capacity: usize) -> Self {
        assert!(
            num_vars <= MAX_VARIABLES,
            "at most {MAX_VARIABLES} variables are supported"
        );
        #[allow(clippy::cast_possible_truncation)]
        let num_vars = num_vars as u32;

        let terminal = |value: bool| BddNode {
            level: num_vars,
            low: BddRef::constant(value),
            high: BddRef::constant(value),
        };
        let mut nodes = Vec::with_capacity(capacity.max(2));
        nodes.push(terminal(false));
        nodes.push(terminal(true));

        Self {
            num_vars,
            nodes: RefCell::new(nodes),
            unique_table: RefCell::new(FxHashMap::default()),
            ite_cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Creates a manager over `num_vars` variables sized by `config`.
    #[must_use]
    pub fn new(num_vars: usize, config: &BddConfig) -> Self {
        Self::with_capacity(num_vars, config.capacity_for(num_vars))
    }

    /// Number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars as usize
    }

    /// Number of nodes allocated, terminals included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.borrow().len()
    }

    fn node(&self, r: BddRef) -> BddNode {
        self.nodes.borrow()[r.0 as usize]
    }

    /// Variable level tested by `r`; terminals report `num_vars`.
    #[must_use]
    pub fn level(&self, r: BddRef) -> u32 {
        self.node(r).level
    }

    /// Child followed when the tested variable is false.
    #[must_use]
    pub fn low(&self, r: BddRef) -> BddRef {
        self.node(r).low
    }

    /// Child followed when the tested variable is true.
    #[must_use]
    pub fn high(&self, r: BddRef) -> BddRef {
        self.node(r).high
    }

    /// Finds or creates the node `(level, low, high)`, applying the
    /// redundant-test reduction.
    ///
    /// # Panics
    ///
    /// Panics if `level` is not above both children, or on node index
    /// overflow.
    pub fn mk_node(&self, level: u32, low: BddRef, high: BddRef) -> BddRef {
        if low == high {
            return low;
        }
        assert!(
            level < self.level(low) && level < self.level(high),
            "variable order violated at level {level}"
        );

        let node = BddNode { level, low, high };
        if let Some(&r) = self.unique_table.borrow().get(&node) {
            return r;
        }

        let mut nodes = self.nodes.borrow_mut();
        let r = BddRef(u32::try_from(nodes.len()).expect("BDD node capacity exceeded"));
        nodes.push(node);
        self.unique_table.borrow_mut().insert(node, r);
        r
    }

    /// The function that is true iff the variable at `level` is true.
    ///
    /// # Panics
    ///
    /// Panics if `level` is out of range.
    pub fn mk_var(&self, level: u32) -> BddRef {
        assert!(level < self.num_vars, "variable level {level} out of range");
        self.mk_node(level, BddRef::FALSE, BddRef::TRUE)
    }

    fn cofactors(&self, r: BddRef, level: u32) -> (BddRef, BddRef) {
        let node = self.node(r);
        if node.level == level {
            (node.low, node.high)
        } else {
            (r, r)
        }
    }

    /// `if f then g else h`.
    pub fn ite(&self, f: BddRef, g: BddRef, h: BddRef) -> BddRef {
        match f.as_constant() {
            Some(true) => return g,
            Some(false) => return h,
            None => {}
        }
        if g == h {
            return g;
        }
        if g == BddRef::TRUE && h == BddRef::FALSE {
            return f;
        }

        let key = (f, g, h);
        if let Some(&r) = self.ite_cache.borrow().get(&key) {
            return r;
        }

        let top = self.level(f).min(self.level(g)).min(self.level(h));
        let (f0, f1) = self.cofactors(f, top);
        let (g0, g1) = self.cofactors(g, top);
        let (h0, h1) = self.cofactors(h, top);

        let high = self.ite(f1, g1, h1);
        let low = self.ite(f0, g0, h0);
        let r = self.mk_node(top, low, high);

        self.ite_cache.borrow_mut().insert(key, r);
        r
    }

    /// Negation.
    pub fn not(&self, f: BddRef) -> BddRef {
        self.ite(f, BddRef::FALSE, BddRef::TRUE)
    }

    /// Conjunction.
    pub fn and(&self, f: BddRef, g: BddRef) -> BddRef {
        self.ite(f, g, BddRef::FALSE)
    }

    /// Disjunction.
    pub fn or(&self, f: BddRef, g: BddRef) -> BddRef {
        self.ite(f, BddRef::TRUE, g)
    }

    /// Exclusive or.
    pub fn xor(&self, f: BddRef, g: BddRef) -> BddRef {
        let not_g = self.not(g);
        self.ite(f, not_g, g)
    }

    /// Value of `r` under `assignment`, indexed by level.
    ///
    /// # Panics
    ///
    /// Panics if `assignment` is shorter than the tested levels.
    #[must_use]
    pub fn evaluate(&self, r: BddRef, assignment: &[bool]) -> bool {
        let mut current = r;
        loop {
            if let Some(value) = current.as_constant() {
                return value;
            }
            let node = self.node(current);
            current = if assignment[node.level as usize] {
                node.high
            } else {
                node.low
            };
        }
    }

    /// Number of assignments to all `num_vars` variables that satisfy `r`.
    #[must_use]
    pub fn sat_count(&self, r: BddRef) -> u128 {
        let mut memo = FxHashMap::default();
        self.sat_count_below(r, &mut memo) << self.level(r)
    }

    // Satisfying assignments to the variables at levels level(r)..num_vars.
    fn sat_count_below(&self, r: BddRef, memo: &mut FxHashMap<BddRef, u128>) -> u128 {
        if let Some(value) = r.as_constant() {
            return u128::from(value);
        }
        if let Some(&count) = memo.get(&r) {
            return count;
        }

        let node = self.node(r);
        let low = self.sat_count_below(node.low, memo) << (self.level(node.low) - node.level - 1);
        let high =
            self.sat_count_below(node.high, memo) << (self.level(node.high) - node.level - 1);
        let count = low + high;
        memo.insert(r, count);
        count
    }

    /// Number of distinct nodes reachable from `r`, terminals included.
    #[must_use]
    pub fn size(&self, r: BddRef) -> usize {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut stack = vec![r];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) || current.is_terminal() {
                continue;
            }
            let node = self.node(current);
            stack.push(node.low);
            stack.push(node.high);
        }
        seen.len()
    }
}

impl fmt::Debug for BddManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BddManager")
            .field("num_vars", &self.num_vars)
            .field("nodes", &self.node_count())
            .field("cached", &self.ite_cache.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(num_vars: usize) -> BddManager {
        BddManager::new(num_vars, &BddConfig::default())
    }

    #[test]
    fn test_var() {
        let bdd = manager(2);
        let x = bdd.mk_var(0);
        assert_eq!(bdd.low(x), BddRef::FALSE);
        assert_eq!(bdd.high(x), BddRef::TRUE);
        assert_eq!(bdd.mk_var(0), x);
        assert_eq!(bdd.node_count(), 3);
    }

    #[test]
    fn test_terminals() {
        let bdd = manager(1);
        let x = bdd.mk_var(0);
        assert_eq!(bdd.and(x, bdd.not(x)), BddRef::FALSE);
        assert_eq!(bdd.or(x, bdd.not(x)), BddRef::TRUE);
        assert_eq!(bdd.level(BddRef::TRUE), 1);
    }

    #[test]
    fn test_de_morgan() {
        let bdd = manager(2);
        let x = bdd.mk_var(0);
        let y = bdd.mk_var(1);

        let lhs = bdd.not(bdd.and(x, y));
        let rhs = bdd.or(bdd.not(x), bdd.not(y));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_double_negation() {
        let bdd = manager(1);
        let x = bdd.mk_var(0);
        assert_eq!(bdd.not(bdd.not(x)), x);
    }

    #[test]
    fn test_xor_itself() {
        let bdd = manager(2);
        let x = bdd.mk_var(0);
        let y = bdd.mk_var(1);
        let f = bdd.xor(x, y);
        assert_eq!(bdd.xor(f, f), BddRef::FALSE);
    }

    #[test]
    fn test_ite_matches_definition() {
        let bdd = manager(3);
        let x = bdd.mk_var(0);
        let y = bdd.mk_var(1);
        let z = bdd.mk_var(2);

        let ite = bdd.ite(x, y, z);
        let expanded = bdd.or(bdd.and(x, y), bdd.and(bdd.not(x), z));
        assert_eq!(ite, expanded);
    }

    #[test]
    fn test_sat_count() {
        let bdd = manager(3);
        let x = bdd.mk_var(0);
        let z = bdd.mk_var(2);

        assert_eq!(bdd.sat_count(BddRef::FALSE), 0);
        assert_eq!(bdd.sat_count(BddRef::TRUE), 8);
        assert_eq!(bdd.sat_count(x), 4);
        assert_eq!(bdd.sat_count(z), 4);
        assert_eq!(bdd.sat_count(bdd.and(x, z)), 2);
        assert_eq!(bdd.sat_count(bdd.or(x, z)), 6);
    }

    #[test]
    fn test_sat_count_wide() {
        let bdd = manager(MAX_VARIABLES);
        assert_eq!(bdd.sat_count(BddRef::TRUE), 1u128 << 127);
        let last = bdd.mk_var(126);
        assert_eq!(bdd.sat_count(last), 1u128 << 126);
    }

    #[test]
    fn test_evaluate() {
        let bdd = manager(2);
        let x = bdd.mk_var(0);
        let y = bdd.mk_var(1);
        let f = bdd.and(x, bdd.not(y));

        assert!(bdd.evaluate(f, &[true, false]));
        assert!(!bdd.evaluate(f, &[true, true]));
        assert!(!bdd.evaluate(f, &[false, false]));
    }

    #[test]
    fn test_size() {
        let bdd = manager(2);
        let x = bdd.mk_var(0);
        let y = bdd.mk_var(1);
        assert_eq!(bdd.size(BddRef::TRUE), 1);
        assert_eq!(bdd.size(x), 3);
        assert_eq!(bdd.size(bdd.and(x, y)), 4);
    }

    #[test]
    fn test_capacity_for() {
        let config = BddConfig {
            nodes_per_variable: 10,
            max_variables: 500,
        };
        assert_eq!(config.capacity_for(3), 32);
        assert_eq!(config.variable_limit(), MAX_VARIABLES);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_var_out_of_range() {
        let bdd = manager(2);
        bdd.mk_var(2);
    }
}
