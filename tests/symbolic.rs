use liveplot_expr::expr::terms::{break_apart_terms, find_powers_and_coefficients};
use liveplot_expr::{ExpressionTree, SolverConfig};
use proptest::prelude::*;

fn simplify(expr: &str) -> String {
    ExpressionTree::symbolic()
        .solve_symbolic(expr)
        .unwrap_or_else(|e| panic!("'{expr}' failed: {e}"))
}

#[test]
fn combines_like_terms() {
    assert_eq!(simplify("s*s + 2*s"), "s^2 + 2*s");
    assert_eq!(simplify("s - s"), "0");
    assert_eq!(simplify("3*s + 2 - s + 4"), "2*s + 6");
    assert_eq!(simplify("2*(s^2 + 3*s) - s*(s - 1)"), "s^2 + 7*s");
}

#[test]
fn canonical_formatting() {
    assert_eq!(simplify("-s^3 + s - 1"), "-s^3 + s - 1");
    assert_eq!(simplify("0.1*s + 0.2*s"), "0.3*s");
    assert_eq!(simplify("5"), "5");
    assert_eq!(simplify("s/4"), "0.25*s");
    assert_eq!(simplify("2*s^-1 + s^-1"), "3*s^-1");
}

#[test]
fn coefficients_are_rounded_before_rendering() {
    assert_eq!(simplify("0.7*s + 0.2*s + 0.1*s"), "s");
    assert_eq!(simplify("0.7*s^2 + 0.2*s^2 + 0.1*s^2 + s"), "s^2 + s");
    assert_eq!(simplify("s*0.3*3 + s*0.1"), "s");
    assert_eq!(simplify("0.1*s + 0.2*s - 0.3*s"), "0");
    assert_eq!(simplify("0.1*s + 0.2*s - 0.3*s + 2"), "2");
    let once = simplify("0.7*s + 0.2*s + 0.1*s");
    assert_eq!(simplify(&once), once);
}

#[test]
fn long_products_stay_collected() {
    let product = vec!["(s+1)"; 30].join("*");
    assert_eq!(simplify(&product), simplify("(s+1)^30"));
    assert!(simplify(&product).starts_with("s^30 + 30*s^29 + 435*s^28"));
}

#[test]
fn negative_powers_of_collapsing_sums() {
    assert_eq!(simplify("(s+s)^-1"), "0.5*s^-1");
    assert_eq!(simplify("(s^2-s^2+s)^-2"), "s^-2");
    assert_eq!(
        ExpressionTree::symbolic().solve_symbolic("(s+1)^-1").unwrap_err(),
        "Unsupported symbolic operation: negative power of a sum"
    );
}

#[test]
fn transfer_function_products() {
    assert_eq!(simplify("(s + 1)*(s + 2)"), "s^2 + 3*s + 2");
    assert_eq!(simplify("(s+1)^3"), "s^3 + 3*s^2 + 3*s + 1");
    assert_eq!(simplify("(s^2)^2 * 10"), "10*s^4");
}

#[test]
fn canonicalization_is_idempotent() {
    for expr in ["s*s + 2*s", "(s-1)^2", "-s^3 + s/2 - 1", "s - s", "7 - 2*s^-2"] {
        let once = simplify(expr);
        assert_eq!(simplify(&once), once, "not idempotent for {expr}");
    }
}

#[test]
fn unsupported_operations_report_errors() {
    let tree = ExpressionTree::symbolic();
    assert_eq!(
        tree.solve_symbolic("1/s").unwrap_err(),
        "Unsupported symbolic operation: division by a symbolic value"
    );
    assert_eq!(
        tree.solve_symbolic("2^s").unwrap_err(),
        "Unsupported symbolic operation: exponentiation by a symbolic value"
    );
    assert_eq!(
        tree.solve_symbolic("s^1.5").unwrap_err(),
        "Unsupported symbolic operation: non-integer exponent"
    );
    assert_eq!(tree.solve_symbolic("(s+1").unwrap_err(), "Unbalanced parentheses");
}

#[test]
fn configurable_variable_and_precision() {
    let cfg = SolverConfig {
        variable: 'z',
        precision: 3,
        ..Default::default()
    };
    let tree = ExpressionTree::symbolic().with_config(cfg).unwrap();
    assert_eq!(tree.solve_symbolic("z*z/3").unwrap(), "0.333*z^2");
    assert!(tree.solve_symbolic("s*s").is_err());
}

#[test]
fn term_helpers() {
    let terms = break_apart_terms("s^2 - 4*s + 4");
    assert_eq!(terms, vec!["s^2", "-4*s", "4"]);
    let monomials = find_powers_and_coefficients(&terms, 's').unwrap();
    assert_eq!(monomials, vec![(2, 1.0), (1, -4.0), (0, 4.0)]);
}

proptest! {
    #[test]
    fn rendered_polynomials_are_fixed_points(
        coeffs in proptest::collection::vec(-20i32..20, 1..5)
    ) {
        let expr = coeffs
            .iter()
            .enumerate()
            .map(|(p, c)| format!("({c})*s^{p}"))
            .collect::<Vec<_>>()
            .join(" + ");
        let once = simplify(&expr);
        prop_assert_eq!(simplify(&once), once);
    }
}
