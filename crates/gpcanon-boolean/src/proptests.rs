//! Property-based tests for BDD canonicity.

#[cfg(test)]
mod tests {
    use gpcanon_core::BoolArena;
    use proptest::prelude::*;

    use crate::bdd::BddConfig;
    use crate::session::BddSession;

    const VARIABLES: [&str; 4] = ["A", "B", "C", "D"];

    fn bool_tree() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            Just("A".to_string()),
            Just("B".to_string()),
            Just("C".to_string()),
            Just("D".to_string()),
        ];
        leaf.prop_recursive(5, 32, 3, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("(and {a} {b})")),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("(or {a} {b})")),
                inner.clone().prop_map(|a| format!("(not {a})")),
                (inner.clone(), inner.clone(), inner)
                    .prop_map(|(c, t, e)| format!("(if {c} {t} {e})")),
            ]
        })
    }

    fn assignments() -> impl Iterator<Item = [bool; 4]> {
        (0u8..16).map(|bits| std::array::from_fn(|i| bits & (1 << i) != 0))
    }

    fn truth_table(arena: &BoolArena, tree: gpcanon_core::ExprHandle) -> Vec<bool> {
        // The arena indexes by symbol id, which follows first interning.
        let ids: Vec<_> = VARIABLES
            .iter()
            .map(|name| arena.symbol_id(name).unwrap() as usize)
            .collect();
        assignments()
            .map(|bits| {
                let mut env = vec![false; ids.len()];
                for (&id, &bit) in ids.iter().zip(&bits) {
                    env[id] = bit;
                }
                arena.evaluate(tree, &env)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn same_function_iff_same_root(a in bool_tree(), b in bool_tree()) {
            let mut arena = BoolArena::new();
            let session = BddSession::start_named(&mut arena, &VARIABLES, &BddConfig::default()).unwrap();
            let ta = arena.parse(&a).unwrap();
            let tb = arena.parse(&b).unwrap();

            let ra = session.code_to_behaviour(&arena, ta).unwrap();
            let rb = session.code_to_behaviour(&arena, tb).unwrap();
            prop_assert_eq!(ra == rb, truth_table(&arena, ta) == truth_table(&arena, tb));
        }

        #[test]
        fn representation_agrees_with_tree(src in bool_tree()) {
            let mut arena = BoolArena::new();
            let session = BddSession::start_named(&mut arena, &VARIABLES, &BddConfig::default()).unwrap();
            let tree = arena.parse(&src).unwrap();
            let repr = session.code_to_behaviour(&arena, tree).unwrap();

            let table = truth_table(&arena, tree);
            for (bits, expected) in assignments().zip(&table) {
                prop_assert_eq!(repr.evaluate(&bits), *expected);
            }
            let count = table.iter().filter(|&&v| v).count() as u128;
            prop_assert_eq!(repr.sat_count(), count);
        }

        #[test]
        fn rebuilt_tree_has_same_behaviour(src in bool_tree()) {
            let mut arena = BoolArena::new();
            let session = BddSession::start_named(&mut arena, &VARIABLES, &BddConfig::default()).unwrap();
            let tree = arena.parse(&src).unwrap();
            let repr = session.code_to_behaviour(&arena, tree).unwrap();
            prop_assume!(!repr.is_constant());

            let rebuilt = session.behaviour_to_code(&mut arena, &repr).unwrap();
            prop_assert_eq!(session.code_to_behaviour(&arena, rebuilt).unwrap(), repr);
            prop_assert_eq!(truth_table(&arena, rebuilt), truth_table(&arena, tree));
        }
    }
}
