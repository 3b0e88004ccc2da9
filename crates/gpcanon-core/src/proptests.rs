//! Property-based tests for tree storage, printing and evaluation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::arena::{BoolArena, RealArena};

    // Regression trees over X with small integer literals, as s-expressions
    fn real_tree() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            Just("X".to_string()),
            (-5i32..=5).prop_map(|n| n.to_string()),
        ];
        leaf.prop_recursive(4, 24, 2, |inner| {
            (
                prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")],
                inner.clone(),
                inner,
            )
                .prop_map(|(op, l, r)| format!("({op} {l} {r})"))
        })
    }

    fn bool_tree() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![Just("A".to_string()), Just("B".to_string()), Just("C".to_string())];
        leaf.prop_recursive(4, 24, 3, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("(and {a} {b})")),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("(or {a} {b})")),
                inner.clone().prop_map(|a| format!("(not {a})")),
                (inner.clone(), inner.clone(), inner).prop_map(|(c, t, e)| format!("(if {c} {t} {e})")),
            ]
        })
    }

    proptest! {
        #[test]
        fn real_print_parse_round_trip(src in real_tree()) {
            let mut arena = RealArena::new();
            let tree = arena.parse(&src).unwrap();
            let printed = arena.display(tree).to_string();
            prop_assert_eq!(&printed, &src);
            prop_assert_eq!(arena.parse(&printed).unwrap(), tree);
        }

        #[test]
        fn bool_print_parse_round_trip(src in bool_tree()) {
            let mut arena = BoolArena::new();
            let tree = arena.parse(&src).unwrap();
            prop_assert_eq!(arena.display(tree).to_string(), src);
        }

        #[test]
        fn subtrees_count_matches_size(src in real_tree()) {
            let mut arena = RealArena::new();
            let tree = arena.parse(&src).unwrap();
            prop_assert_eq!(arena.subtrees(tree).len(), arena.size(tree));
        }

        #[test]
        fn replacing_a_child_with_itself_is_identity(src in bool_tree()) {
            let mut arena = BoolArena::new();
            let tree = arena.parse(&src).unwrap();
            for i in 0..arena.arity(tree) {
                let child = arena.child(tree, i).unwrap();
                prop_assert_eq!(arena.replace_child(tree, i, child), tree);
            }
        }

        #[test]
        fn real_evaluation_is_finite(src in real_tree(), x in -10i32..=10) {
            let mut arena = RealArena::new();
            let tree = arena.parse(&src).unwrap();
            let value = arena.evaluate(tree, &[f64::from(x)]);
            prop_assert!(value.is_finite());
        }
    }
}
