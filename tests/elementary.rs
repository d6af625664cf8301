use approx::assert_relative_eq;
use dscomp::{compiler, DerivativeStructure, DsError};

fn assert_close(actual: &DerivativeStructure<f64>, expected: &[f64]) {
    assert_eq!(actual.data().len(), expected.len());
    for (a, e) in actual.data().iter().zip(expected) {
        assert_relative_eq!(*a, *e, epsilon = 1e-10, max_relative = 1e-10);
    }
}

fn assert_same(a: &DerivativeStructure<f64>, b: &DerivativeStructure<f64>) {
    assert_close(a, b.data());
}

/// A generic point in 2 parameters with non-trivial higher derivatives.
fn bivariate(order: usize) -> DerivativeStructure<f64> {
    let x = DerivativeStructure::variable(2, order, 0, 0.3).unwrap();
    let y = DerivativeStructure::variable(2, order, 1, 0.2).unwrap();
    &(&x * &y) + &x.scale(&0.5).sin()
}

// ══════════════════════════════════════════════
//  1. Univariate chain rule
// ══════════════════════════════════════════════

#[test]
fn sine_first_order() {
    let x0 = 0.7_f64;
    let x = DerivativeStructure::variable(1, 1, 0, x0).unwrap();
    assert_close(&x.sin(), &[x0.sin(), x0.cos()]);
}

#[test]
fn sine_at_zero_to_fourth_order() {
    let x = DerivativeStructure::variable(1, 4, 0, 0.0).unwrap();
    assert_close(&x.sin(), &[0.0, 1.0, 0.0, -1.0, 0.0]);
}

#[test]
fn chain_rule_through_inner_function() {
    // d/dx sin(x²) = 2x cos(x²), d²/dx² = 2cos(x²) − 4x² sin(x²)
    let x0 = 0.8_f64;
    let x = DerivativeStructure::variable(1, 2, 0, x0).unwrap();
    let u = x0 * x0;
    assert_close(
        &(&x * &x).sin(),
        &[u.sin(), 2.0 * x0 * u.cos(), 2.0 * u.cos() - 4.0 * u * u.sin()],
    );
}

#[test]
fn exp_then_ln_round_trips() {
    let x = DerivativeStructure::from_derivatives(1, 2, vec![0.4, 1.3, -0.7]).unwrap();
    assert_same(&x.exp().ln(), &x);
    let positive = DerivativeStructure::from_derivatives(1, 2, vec![2.5, 0.3, 0.9]).unwrap();
    assert_same(&positive.ln().exp(), &positive);
}

// ══════════════════════════════════════════════
//  2. Multivariate identities
// ══════════════════════════════════════════════

#[test]
fn pythagorean_identity() {
    let z = bivariate(4);
    let s = z.sin();
    let c = z.cos();
    let one = &(&s * &s) + &(&c * &c);
    assert_same(&one, &DerivativeStructure::one(2, 4));

    let ch = z.cosh();
    let sh = z.sinh();
    assert_same(&(&(&ch * &ch) - &(&sh * &sh)), &DerivativeStructure::one(2, 4));
}

#[test]
fn tangents_are_ratios() {
    let z = bivariate(3);
    assert_same(&z.tan(), &(&z.sin() / &z.cos()));
    assert_same(&z.tanh(), &(&z.sinh() / &z.cosh()));
}

#[test]
fn inverse_functions_undo_their_originals() {
    let z = bivariate(4);
    assert_same(&z.sin().asin(), &z);
    assert_same(&z.cos().acos(), &z);
    assert_same(&z.tan().atan(), &z);
    assert_same(&z.sinh().asinh(), &z);
    assert_same(&z.cosh().acosh(), &z);
    assert_same(&z.tanh().atanh(), &z);
}

#[test]
fn powers_agree() {
    let z = bivariate(3).add_scalar(1.0);
    assert_same(&z.sqrt().pown(2), &z);
    assert_same(&z.powf(&3.0), &z.pown(3));
    assert_same(&z.powf(&-2.0), &z.powi(-2));
    assert_same(&z.powi(-1), &z.recip());
    assert_same(&z.powi(0), &DerivativeStructure::one(2, 3));

    let y = DerivativeStructure::variable(2, 3, 1, 1.7).unwrap();
    assert_same(&z.checked_pow(&y).unwrap(), &(&y * &z.ln()).exp());
}

#[test]
fn mixed_partial_of_exponential_product() {
    // f = exp(x·y): ∂x∂y f = (1 + xy) exp(xy)
    let (xv, yv) = (0.6_f64, -1.1_f64);
    let x = DerivativeStructure::variable(2, 2, 0, xv).unwrap();
    let y = DerivativeStructure::variable(2, 2, 1, yv).unwrap();
    let f = (&x * &y).exp();
    let e = (xv * yv).exp();
    assert_relative_eq!(f.partial_derivative(&[1, 1]).unwrap(), (1.0 + xv * yv) * e, epsilon = 1e-12);
    assert_relative_eq!(f.partial_derivative(&[2, 0]).unwrap(), yv * yv * e, epsilon = 1e-12);
    assert_relative_eq!(f.partial_derivative(&[0, 2]).unwrap(), xv * xv * e, epsilon = 1e-12);
}

// ══════════════════════════════════════════════
//  3. Raw buffer interface
// ══════════════════════════════════════════════

#[test]
fn compose_with_explicit_derivative_vector() {
    // f(u) = u³ via [u³, 3u², 6u, 6] at u = 2, applied to x + y at (1, 1)
    let c = compiler(2, 2);
    let mut operand = vec![0.0; c.size()];
    operand[0] = 2.0;
    operand[c.to_index(&[1, 0]).unwrap()] = 1.0;
    operand[c.to_index(&[0, 1]).unwrap()] = 1.0;
    let f = [8.0, 12.0, 12.0, 6.0];
    let mut result = vec![0.0; c.size()];
    assert_eq!(
        c.compose(&operand, &f, &mut result),
        Err(DsError::DimensionMismatch {
            expected: 3,
            actual: 4
        })
    );
    c.compose(&operand, &f[..3], &mut result).unwrap();
    // every second derivative of (x + y)³ is 6(x + y) = 12
    for i in 0..c.size() {
        let total: usize = c.to_orders(i).unwrap().iter().sum();
        let expected = [8.0, 12.0, 12.0][total];
        assert_eq!(result[i], expected);
    }
}

#[test]
fn raw_elementary_functions_check_lengths() {
    let c = compiler(1, 2);
    let mut result = [0.0; 3];
    assert!(c.exp(&[1.0, 1.0], &mut result).is_err());
    assert!(c.ln(&[1.0, 1.0, 0.0], &mut result[..2]).is_err());
    c.exp(&[0.0, 1.0, 0.0], &mut result).unwrap();
    assert_eq!(result, [1.0, 1.0, 1.0]);
}

#[test]
fn out_of_domain_follows_float_semantics() {
    let x: DerivativeStructure<f64> = DerivativeStructure::variable(1, 2, 0, -1.0).unwrap();
    assert!(x.ln().value().is_nan());
    assert!(x.sqrt().value().is_nan());
}
