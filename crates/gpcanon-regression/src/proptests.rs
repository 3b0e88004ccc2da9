//! Property-based tests for regression reduction and expansion.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use gpcanon_core::RealArena;
    use proptest::prelude::*;

    use crate::cvp::CvpTerm;
    use crate::expand::expand;
    use crate::reduce::Reducer;
    use crate::representation::RegressionRepresentation;

    fn leaf() -> impl Strategy<Value = String> {
        prop_oneof![
            2 => Just("X".to_string()),
            1 => (-5i32..=5).prop_map(|n| n.to_string()),
        ]
    }

    // Trees over +, -, * and division by X or 2X, whose semantics are
    // Laurent polynomials. Evaluation points are powers of two so division
    // is exact.
    fn polynomial_tree() -> impl Strategy<Value = String> {
        leaf().prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                (prop_oneof![Just("+"), Just("-"), Just("*")], inner.clone(), inner.clone())
                    .prop_map(|(op, l, r)| format!("({op} {l} {r})")),
                inner.clone().prop_map(|t| format!("(/ {t} X)")),
                inner.prop_map(|t| format!("(/ {t} (+ X X))")),
            ]
        })
    }

    // Pairs of trees that are equal as functions of X, built by applying
    // commutativity, distributivity and the definitions of - and /, with
    // divisors that are single terms written as sums
    fn equivalent_pair() -> impl Strategy<Value = (String, String)> {
        leaf().prop_map(|s| (s.clone(), s)).prop_recursive(4, 32, 3, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|((a1, a2), (b1, b2))| {
                    (format!("(+ {a1} {b1})"), format!("(+ {b2} {a2})"))
                }),
                (inner.clone(), inner.clone()).prop_map(|((a1, a2), (b1, b2))| {
                    (format!("(* {a1} {b1})"), format!("(* {b2} {a2})"))
                }),
                (inner.clone(), inner.clone()).prop_map(|((a1, a2), (b1, b2))| {
                    (format!("(- {a1} {b1})"), format!("(+ {a2} (* -1 {b2}))"))
                }),
                (inner.clone(), inner.clone(), inner.clone()).prop_map(
                    |((l1, l2), (a1, a2), (b1, b2))| {
                        (
                            format!("(* {l1} (+ {a1} {b1}))"),
                            format!("(+ (* {l2} {a2}) (* {b2} {l2}))"),
                        )
                    }
                ),
                inner.clone().prop_map(|(a1, a2)| (format!("(/ {a1} X)"), format!("(* {a2} (/ 1 X))"))),
                inner.clone().prop_map(|(a1, a2)| {
                    (format!("(/ {a1} (+ X X))"), format!("(* 0.5 (/ {a2} X))"))
                }),
                inner.clone().prop_map(|(a1, a2)| {
                    (format!("(/ {a1} (- (* 2 X) X))"), format!("(/ {a2} X)"))
                }),
                inner.prop_map(|(a1, a2)| (format!("(/ {a1} (+ 1 1))"), format!("(* 0.5 {a2})"))),
            ]
        })
    }

    // Canonical sums with distinct small integer powers
    fn canonical_repr() -> impl Strategy<Value = RegressionRepresentation> {
        let coefficient = prop_oneof![-9i32..=-1, 1i32..=9];
        proptest::collection::btree_map(-4i32..=4, coefficient, 1..=5).prop_map(
            |terms: BTreeMap<i32, i32>| {
                terms
                    .into_iter()
                    .map(|(p, c)| CvpTerm::new(f64::from(c), f64::from(p)))
                    .collect()
            },
        )
    }

    fn reduce(arena: &mut RealArena, src: &str) -> RegressionRepresentation {
        let x = arena.intern_symbol("X");
        let tree = arena.parse(src).unwrap();
        Reducer::new().reduce(arena, tree, x).unwrap()
    }

    proptest! {
        #[test]
        fn reduction_is_idempotent(src in polynomial_tree()) {
            let mut arena = RealArena::new();
            let repr = reduce(&mut arena, &src);

            let mut again = repr.clone();
            again.simplify();
            again.order();
            prop_assert_eq!(again, repr);
        }

        #[test]
        fn expand_then_reduce_round_trips(repr in canonical_repr()) {
            let mut arena = RealArena::new();
            let x = arena.intern_symbol("X");
            let tree = expand(&mut arena, &repr, x);
            let again = Reducer::new().reduce(&mut arena, tree, x).unwrap();
            prop_assert_eq!(again, repr);
        }

        #[test]
        fn equivalent_trees_share_canonical_form((a, b) in equivalent_pair()) {
            let mut arena = RealArena::new();
            let ra = reduce(&mut arena, &a);
            let rb = reduce(&mut arena, &b);
            prop_assert_eq!(ra, rb);
        }

        #[test]
        fn canonical_form_has_distinct_ascending_powers(src in polynomial_tree()) {
            let mut arena = RealArena::new();
            let repr = reduce(&mut arena, &src);

            let powers: Vec<f64> = repr.terms().iter().map(CvpTerm::power).collect();
            prop_assert!(powers.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(repr.len() == 1 || repr.terms().iter().all(|t| !t.is_zero()));
        }

        #[test]
        fn representation_agrees_with_tree(
            src in polynomial_tree(),
            x in prop_oneof![Just(1i32), Just(2), Just(4)],
        ) {
            let mut arena = RealArena::new();
            let repr = reduce(&mut arena, &src);
            let tree = arena.parse(&src).unwrap();

            let x = f64::from(x);
            let expected = arena.evaluate(tree, &[x]);
            let actual = repr.evaluate(x);
            prop_assert!(
                (expected - actual).abs() <= 1e-6 * expected.abs().max(1.0),
                "{} at {}: tree {} vs repr {}", src, x, expected, actual
            );
        }
    }
}
