//! Arena storage for expression trees.
//!
//! Nodes live contiguously in a `Vec` and are hash-consed: interning a node
//! that already exists returns the existing handle. Trees are therefore DAGs
//! with maximal sharing, and "structurally equal" means "same handle".

use hashbrown::HashMap;

use crate::expr::{BoolNode, Children, Node, RealNode, SymbolId};
use crate::handle::ExprHandle;
use crate::intern::SymbolTable;

/// A hash-consing arena over the node language `N`.
#[derive(Debug, Clone)]
pub struct ExprArena<N> {
    /// Storage for all nodes.
    nodes: Vec<N>,
    /// Interning table: maps node content to its handle.
    intern_map: HashMap<N, ExprHandle>,
    /// Variable names used by the trees in this arena.
    symbols: SymbolTable,
}

/// Arena for symbolic-regression trees.
pub type RealArena = ExprArena<RealNode>;

/// Arena for boolean trees.
pub type BoolArena = ExprArena<BoolNode>;

impl<N: Node> Default for ExprArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> ExprArena<N> {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            intern_map: HashMap::new(),
            symbols: SymbolTable::new(),
        }
    }

    /// Creates an arena with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            intern_map: HashMap::with_capacity(capacity),
            symbols: SymbolTable::new(),
        }
    }

    /// Interns a node, returning its handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` nodes, or if the node
    /// refers to a child handle that was not allocated by this arena.
    pub fn intern(&mut self, node: N) -> ExprHandle {
        if let Some(&handle) = self.intern_map.get(&node) {
            return handle;
        }

        let index = u32::try_from(self.nodes.len()).expect("arena capacity exceeded");
        assert!(index < u32::MAX, "arena capacity exceeded");
        for child in node.children() {
            assert!(child.index() < index, "dangling child handle {child}");
        }

        let handle = ExprHandle::new(index);
        self.nodes.push(node.clone());
        self.intern_map.insert(node, handle);
        handle
    }

    /// Gets the node behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this arena.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &N {
        &self.nodes[handle.slot()]
    }

    /// Number of distinct nodes stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Symbols ===

    /// Interns a variable name.
    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        self.symbols.intern(name)
    }

    /// Looks up a previously interned variable name.
    #[must_use]
    pub fn symbol_id(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name)
    }

    /// Returns the name of a variable.
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> Option<&str> {
        self.symbols.name(id)
    }

    /// The symbol table of this arena.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    // === Navigation ===

    /// Children of the node at `handle`.
    #[must_use]
    pub fn children(&self, handle: ExprHandle) -> Children {
        self.get(handle).children()
    }

    /// Number of children of the node at `handle`.
    #[must_use]
    pub fn arity(&self, handle: ExprHandle) -> usize {
        self.get(handle).arity()
    }

    /// The `index`-th child of the node at `handle`.
    #[must_use]
    pub fn child(&self, handle: ExprHandle, index: usize) -> Option<ExprHandle> {
        self.children(handle).get(index).copied()
    }

    /// Returns a tree equal to `handle` except that child `index` is
    /// `replacement`. The original tree is untouched.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the node.
    pub fn replace_child(
        &mut self,
        handle: ExprHandle,
        index: usize,
        replacement: ExprHandle,
    ) -> ExprHandle {
        let node = self.get(handle).clone();
        let mut children = node.children();
        assert!(
            index < children.len(),
            "child index {index} out of range for arity {}",
            children.len()
        );
        children[index] = replacement;
        self.intern(node.with_children(&children))
    }

    /// Rebuilds `handle` bottom-up, passing every freshly rebuilt node to
    /// `rewrite` before interning the result.
    ///
    /// `rewrite` sees nodes whose children have already been rewritten.
    pub fn rewrite_bottom_up<F>(&mut self, handle: ExprHandle, rewrite: &mut F) -> ExprHandle
    where
        F: FnMut(&mut Self, N) -> ExprHandle,
    {
        let node = self.get(handle).clone();
        if node.is_leaf() {
            return rewrite(self, node);
        }

        let children: Children = node
            .children()
            .into_iter()
            .map(|child| self.rewrite_bottom_up(child, rewrite))
            .collect();
        let rebuilt = node.with_children(&children);
        rewrite(self, rebuilt)
    }

    /// Number of nodes in the tree rooted at `handle`, counting shared
    /// subtrees once per occurrence.
    #[must_use]
    pub fn size(&self, handle: ExprHandle) -> usize {
        1 + self
            .children(handle)
            .into_iter()
            .map(|child| self.size(child))
            .sum::<usize>()
    }

    /// Depth of the tree rooted at `handle`; a leaf has depth 0.
    #[must_use]
    pub fn depth(&self, handle: ExprHandle) -> usize {
        self.children(handle)
            .into_iter()
            .map(|child| 1 + self.depth(child))
            .max()
            .unwrap_or(0)
    }

    /// Handles of every subtree in pre-order, one entry per occurrence.
    ///
    /// Index `i` of the result is the `i`-th node a pre-order walk visits,
    /// which is the numbering crossover and mutation points use.
    #[must_use]
    pub fn subtrees(&self, handle: ExprHandle) -> Vec<ExprHandle> {
        let mut out = Vec::new();
        let mut stack = vec![handle];
        while let Some(h) = stack.pop() {
            out.push(h);
            stack.extend(self.children(h).into_iter().rev());
        }
        out
    }

    /// Returns true if any leaf below `handle` refers to a variable.
    #[must_use]
    pub fn contains_variable(&self, handle: ExprHandle) -> bool {
        let node = self.get(handle);
        node.variable().is_some()
            || node
                .children()
                .into_iter()
                .any(|child| self.contains_variable(child))
    }
}

// === Regression constructors ===

impl ExprArena<RealNode> {
    /// Creates a literal.
    pub fn literal(&mut self, value: f64) -> ExprHandle {
        self.intern(RealNode::literal(value))
    }

    /// Creates a variable reference, interning the name.
    pub fn variable(&mut self, name: &str) -> ExprHandle {
        let id = self.intern_symbol(name);
        self.intern(RealNode::Variable(id))
    }

    /// Creates `left + right`.
    pub fn add(&mut self, left: ExprHandle, right: ExprHandle) -> ExprHandle {
        self.intern(RealNode::Add(left, right))
    }

    /// Creates `left - right`.
    pub fn sub(&mut self, left: ExprHandle, right: ExprHandle) -> ExprHandle {
        self.intern(RealNode::Sub(left, right))
    }

    /// Creates `left * right`.
    pub fn mul(&mut self, left: ExprHandle, right: ExprHandle) -> ExprHandle {
        self.intern(RealNode::Mul(left, right))
    }

    /// Creates the protected division `left / right`.
    pub fn div(&mut self, left: ExprHandle, right: ExprHandle) -> ExprHandle {
        self.intern(RealNode::Div(left, right))
    }

    /// Creates the leaf `coefficient * variable^power`.
    pub fn term(&mut self, coefficient: f64, variable: SymbolId, power: f64) -> ExprHandle {
        self.intern(RealNode::Term {
            coefficient: coefficient.into(),
            variable,
            power: power.into(),
        })
    }
}

// === Boolean constructors ===

impl ExprArena<BoolNode> {
    /// Creates a variable reference, interning the name.
    pub fn variable(&mut self, name: &str) -> ExprHandle {
        let id = self.intern_symbol(name);
        self.intern(BoolNode::Variable(id))
    }

    /// Creates `a AND b`.
    pub fn and(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        self.intern(BoolNode::And(a, b))
    }

    /// Creates `a OR b`.
    pub fn or(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        self.intern(BoolNode::Or(a, b))
    }

    /// Creates `NOT a`.
    pub fn not(&mut self, a: ExprHandle) -> ExprHandle {
        self.intern(BoolNode::Not(a))
    }

    /// Creates `IF cond THEN then ELSE otherwise`.
    pub fn ite(&mut self, cond: ExprHandle, then: ExprHandle, otherwise: ExprHandle) -> ExprHandle {
        self.intern(BoolNode::If(cond, then, otherwise))
    }
}
