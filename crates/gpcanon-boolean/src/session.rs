//! Scoped BDD sessions.
//!
//! A [`BddSession`] owns the BDD manager for one comparison context. It is
//! acquired with [`BddSession::start`] and released when dropped, so the
//! manager is freed on every exit path, including early returns through `?`.

use gpcanon_core::{BoolArena, BoolNode, ExprHandle, SymbolId};
use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::bdd::{BddConfig, BddManager, BddRef};
use crate::error::BddError;
use crate::representation::BooleanRepresentation;

/// A BDD manager plus the fixed variable order it was opened with.
pub struct BddSession {
    manager: BddManager,
    /// Declared variables; position is the BDD level.
    variables: Vec<SymbolId>,
    levels: FxHashMap<SymbolId, u32>,
}

impl BddSession {
    /// Opens a session over `variables`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`BddError::TooManyVariables`] if more variables are declared
    /// than `config` allows, and [`BddError::DuplicateVariable`] if a
    /// variable is declared twice.
    pub fn start(variables: &[SymbolId], config: &BddConfig) -> Result<Self, BddError> {
        let max = config.variable_limit();
        if variables.len() > max {
            return Err(BddError::TooManyVariables {
                count: variables.len(),
                max,
            });
        }

        let mut levels = FxHashMap::default();
        for (level, &symbol) in (0u32..).zip(variables) {
            if levels.insert(symbol, level).is_some() {
                return Err(BddError::DuplicateVariable(symbol));
            }
        }

        let manager = BddManager::new(variables.len(), config);
        for level in (0u32..).take(variables.len()) {
            manager.mk_var(level);
        }
        debug!(
            "started BDD session over {} variables, {} node slots reserved",
            variables.len(),
            config.capacity_for(variables.len())
        );

        Ok(Self {
            manager,
            variables: variables.to_vec(),
            levels,
        })
    }

    /// Opens a session over variables given by name, interning them into
    /// `arena`.
    ///
    /// # Errors
    ///
    /// See [`BddSession::start`].
    pub fn start_named(
        arena: &mut BoolArena,
        names: &[&str],
        config: &BddConfig,
    ) -> Result<Self, BddError> {
        let variables: Vec<_> = names.iter().map(|name| arena.intern_symbol(name)).collect();
        Self::start(&variables, config)
    }

    /// Releases the session. Dropping it has the same effect.
    pub fn stop(self) {}

    /// Declared variables in order.
    #[must_use]
    pub fn variables(&self) -> &[SymbolId] {
        &self.variables
    }

    /// The underlying manager.
    #[must_use]
    pub fn manager(&self) -> &BddManager {
        &self.manager
    }

    /// Representation of a constant function.
    #[must_use]
    pub fn constant(&self, value: bool) -> BooleanRepresentation<'_> {
        BooleanRepresentation::new(self, BddRef::constant(value))
    }

    /// Representation of a single declared variable.
    ///
    /// # Errors
    ///
    /// Returns [`BddError::UndeclaredVariable`] if `symbol` is not declared.
    pub fn variable(
        &self,
        arena: &BoolArena,
        symbol: SymbolId,
    ) -> Result<BooleanRepresentation<'_>, BddError> {
        let level = self.level_of(arena, symbol)?;
        Ok(BooleanRepresentation::new(self, self.manager.mk_var(level)))
    }

    fn level_of(&self, arena: &BoolArena, symbol: SymbolId) -> Result<u32, BddError> {
        self.levels
            .get(&symbol)
            .copied()
            .ok_or_else(|| BddError::UndeclaredVariable {
                name: arena
                    .symbol_name(symbol)
                    .map_or_else(|| format!("${symbol}"), str::to_string),
            })
    }

    /// Translates a tree into its canonical behaviour.
    ///
    /// # Errors
    ///
    /// Returns [`BddError::UndeclaredVariable`] if the tree uses a variable
    /// the session was not opened with.
    pub fn code_to_behaviour(
        &self,
        arena: &BoolArena,
        tree: ExprHandle,
    ) -> Result<BooleanRepresentation<'_>, BddError> {
        let mut memo = FxHashMap::default();
        let root = self.translate(arena, tree, &mut memo)?;
        trace!(
            "{} -> BDD of {} nodes",
            arena.display(tree),
            self.manager.size(root)
        );
        Ok(BooleanRepresentation::new(self, root))
    }

    fn translate(
        &self,
        arena: &BoolArena,
        tree: ExprHandle,
        memo: &mut FxHashMap<ExprHandle, BddRef>,
    ) -> Result<BddRef, BddError> {
        if let Some(&r) = memo.get(&tree) {
            return Ok(r);
        }

        let bdd = &self.manager;
        let r = match *arena.get(tree) {
            BoolNode::Variable(symbol) => bdd.mk_var(self.level_of(arena, symbol)?),
            BoolNode::And(a, b) => {
                let a = self.translate(arena, a, memo)?;
                let b = self.translate(arena, b, memo)?;
                bdd.and(a, b)
            }
            BoolNode::Or(a, b) => {
                let a = self.translate(arena, a, memo)?;
                let b = self.translate(arena, b, memo)?;
                bdd.or(a, b)
            }
            BoolNode::Not(a) => {
                let a = self.translate(arena, a, memo)?;
                bdd.not(a)
            }
            BoolNode::If(c, t, e) => {
                let c = self.translate(arena, c, memo)?;
                let t = self.translate(arena, t, memo)?;
                let e = self.translate(arena, e, memo)?;
                bdd.ite(c, t, e)
            }
        };
        memo.insert(tree, r);
        Ok(r)
    }

    /// Rebuilds a tree computing `repr`.
    ///
    /// Each diagram node becomes the smallest tree shape its children allow:
    ///
    /// | high  | low   | tree                 |
    /// |-------|-------|----------------------|
    /// | true  | false | `v`                  |
    /// | false | true  | `(not v)`            |
    /// | h     | false | `(and v h)`          |
    /// | false | l     | `(and (not v) l)`    |
    /// | true  | l     | `(or v l)`           |
    /// | h     | true  | `(or (not v) h)`     |
    /// | h     | l     | `(if v h l)`         |
    ///
    /// # Errors
    ///
    /// Returns [`BddError::ConstantBehaviour`] for a constant function and
    /// [`BddError::ForeignRepresentation`] if `repr` came from another
    /// session.
    pub fn behaviour_to_code(
        &self,
        arena: &mut BoolArena,
        repr: &BooleanRepresentation<'_>,
    ) -> Result<ExprHandle, BddError> {
        if !std::ptr::eq(repr.session(), self) {
            return Err(BddError::ForeignRepresentation);
        }
        if let Some(value) = repr.as_constant() {
            return Err(BddError::ConstantBehaviour(value));
        }

        let mut memo = FxHashMap::default();
        Ok(self.rebuild(arena, repr.root(), &mut memo))
    }

    fn rebuild(
        &self,
        arena: &mut BoolArena,
        r: BddRef,
        memo: &mut FxHashMap<BddRef, ExprHandle>,
    ) -> ExprHandle {
        if let Some(&tree) = memo.get(&r) {
            return tree;
        }

        let bdd = &self.manager;
        let var = arena.intern(BoolNode::Variable(
            self.variables[bdd.level(r) as usize],
        ));
        let (high, low) = (bdd.high(r), bdd.low(r));

        let tree = match (high.as_constant(), low.as_constant()) {
            (Some(true), Some(false)) => var,
            (Some(false), Some(true)) => arena.not(var),
            (_, Some(false)) => {
                let h = self.rebuild(arena, high, memo);
                arena.and(var, h)
            }
            (Some(false), _) => {
                let not_var = arena.not(var);
                let l = self.rebuild(arena, low, memo);
                arena.and(not_var, l)
            }
            (Some(true), _) => {
                let l = self.rebuild(arena, low, memo);
                arena.or(var, l)
            }
            (_, Some(true)) => {
                let not_var = arena.not(var);
                let h = self.rebuild(arena, high, memo);
                arena.or(not_var, h)
            }
            (None, None) => {
                let h = self.rebuild(arena, high, memo);
                let l = self.rebuild(arena, low, memo);
                arena.ite(var, h, l)
            }
        };
        memo.insert(r, tree);
        tree
    }
}

impl Drop for BddSession {
    fn drop(&mut self) {
        debug!(
            "released BDD session over {} variables ({} nodes)",
            self.variables.len(),
            self.manager.node_count()
        );
    }
}

impl std::fmt::Debug for BddSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BddSession")
            .field("variables", &self.variables)
            .field("manager", &self.manager)
            .finish()
    }
}
