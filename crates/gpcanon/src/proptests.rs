//! Property-based tests for the equivalence helpers.

#[cfg(test)]
mod tests {
    use gpcanon_core::{BoolArena, RealArena};
    use proptest::prelude::*;

    use crate::equivalence::{
        boolean_equivalent, regression_equivalent, simplify_boolean, simplify_regression,
    };

    fn regression_tree() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            2 => Just("X".to_string()),
            1 => (-5i32..=5).prop_map(|n| n.to_string()),
        ];
        leaf.prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                (prop_oneof![Just("+"), Just("-"), Just("*")], inner.clone(), inner.clone())
                    .prop_map(|(op, l, r)| format!("({op} {l} {r})")),
                inner.clone().prop_map(|t| format!("(/ {t} X)")),
                inner.prop_map(|t| format!("(/ {t} (+ X X))")),
            ]
        })
    }

    fn boolean_tree() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![Just("A".to_string()), Just("B".to_string()), Just("C".to_string())];
        leaf.prop_recursive(4, 24, 3, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("(and {a} {b})")),
                (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("(or {a} {b})")),
                inner.clone().prop_map(|a| format!("(not {a})")),
                (inner.clone(), inner.clone(), inner)
                    .prop_map(|(c, t, e)| format!("(if {c} {t} {e})")),
            ]
        })
    }

    proptest! {
        #[test]
        fn simplified_regression_tree_is_equivalent(src in regression_tree()) {
            let mut arena = RealArena::new();
            let x = arena.intern_symbol("X");
            let tree = arena.parse(&src).unwrap();

            let simplified = simplify_regression(&mut arena, tree, x).unwrap();
            prop_assert!(regression_equivalent(&mut arena, tree, simplified, x).unwrap());

            let again = simplify_regression(&mut arena, simplified, x).unwrap();
            prop_assert_eq!(again, simplified);
        }

        #[test]
        fn simplified_boolean_tree_is_equivalent(src in boolean_tree()) {
            let mut arena = BoolArena::new();
            let vars = ["A", "B", "C"].map(|name| arena.intern_symbol(name));
            let tree = arena.parse(&src).unwrap();

            match simplify_boolean(&mut arena, &vars, tree).unwrap() {
                Some(simplified) => {
                    prop_assert!(boolean_equivalent(&arena, &vars, tree, simplified).unwrap());
                }
                None => {
                    let a = arena.parse("A").unwrap();
                    let tautology = arena.parse("(or A (not A))").unwrap();
                    let contradiction = arena.parse("(and A (not A))").unwrap();
                    prop_assert!(
                        boolean_equivalent(&arena, &vars, tree, tautology).unwrap()
                            || boolean_equivalent(&arena, &vars, tree, contradiction).unwrap()
                    );
                    prop_assert!(!boolean_equivalent(&arena, &vars, tree, a).unwrap());
                }
            }
        }
    }
}
