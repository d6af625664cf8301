//! Derivative vectors of univariate elementary functions.
//!
//! Convention: each function returns `[f(x), f'(x), f''(x), …, f^(n)(x)]`
//! (plain derivatives, *not* divided by `k!`), of length `order + 1`.
//! These vectors are the `f` argument of
//! [`DsCompiler::compose`](crate::DsCompiler::compose).
//!
//! Only the operand's scalar value is used. Functions whose derivatives are
//! rational in `x` (or in `tan x`, `tanh x`) keep the numerator polynomial in
//! a single buffer: consecutive polynomials have opposite parity, so the
//! update for degree `n` overwrites exactly the coefficients of degree `n−1`
//! that it no longer needs while Horner-evaluating in `x²`.

use crate::algebra::{
    ExponentialOps, Field, HyperbolicOps, PowerOps, Ring, TrigonometricOps,
};

#[inline]
fn int<T: Ring>(n: i64) -> T {
    T::from_int(n)
}

#[inline]
fn half<T: Field>() -> T {
    T::one() / (T::one() + T::one())
}

/// `x^k` by repeated squaring.
fn pow_u32<T: Ring>(x: T, k: u32) -> T {
    let mut result = T::one();
    let mut base = x;
    let mut k = k;
    while k > 0 {
        if k & 1 == 1 {
            result = result * base.clone();
        }
        k >>= 1;
        if k > 0 {
            base = base.clone() * base;
        }
    }
    result
}

// ══════════════════════════════════════════════
//  Powers and roots
// ══════════════════════════════════════════════

/// `x^n` for `n ≥ 0`; derivatives beyond order `n` are exactly zero.
pub fn pow_nonnegative<T: Ring>(x: T, n: u32, order: usize) -> Vec<T> {
    let mut f = vec![T::zero(); order + 1];
    if n == 0 {
        f[0] = T::one();
        return f;
    }

    // [x^n, x^(n−1), …, x^(n−m)] with m = min(order, n)
    let m = order.min(n as usize);
    let mut xk = pow_u32(x.clone(), n - m as u32);
    for i in (1..=m).rev() {
        f[i] = xk.clone();
        xk = xk * x.clone();
    }
    f[0] = xk;

    // falling factorial n (n−1) … (n−i+1)
    let mut coefficient: T = int(n as i64);
    for (i, fi) in f.iter_mut().enumerate().take(m + 1).skip(1) {
        *fi = fi.clone() * coefficient.clone();
        coefficient = coefficient * int(n as i64 - i as i64);
    }
    f
}

/// `x^n` for any integer `n`.
pub fn powi<T: Field>(x: T, n: i32, order: usize) -> Vec<T> {
    if n >= 0 {
        return pow_nonnegative(x, n.unsigned_abs(), order);
    }

    // [x^n, x^(n−1), …]
    let mut f = Vec::with_capacity(order + 1);
    let inv = T::one() / x;
    let mut xk = pow_u32(inv.clone(), n.unsigned_abs());
    for _ in 0..=order {
        f.push(xk.clone());
        xk = xk * inv.clone();
    }

    let mut coefficient: T = int(i64::from(n));
    for (i, fi) in f.iter_mut().enumerate().skip(1) {
        *fi = fi.clone() * coefficient.clone();
        coefficient = coefficient * int(i64::from(n) - i as i64);
    }
    f
}

/// `x^p` for a real exponent `p`.
pub fn powf<T: PowerOps>(x: T, p: T, order: usize) -> Vec<T> {
    let mut f = vec![T::zero(); order + 1];
    let mut xk = x.clone().powf(p.clone() - int(order as i64));
    for i in (1..=order).rev() {
        f[i] = xk.clone();
        xk = xk * x.clone();
    }
    f[0] = xk;

    let mut coefficient = p.clone();
    for (i, fi) in f.iter_mut().enumerate().skip(1) {
        *fi = fi.clone() * coefficient.clone();
        coefficient = coefficient * (p.clone() - int(i as i64));
    }
    f
}

/// `√x`.
pub fn sqrt<T: PowerOps>(x: T, order: usize) -> Vec<T> {
    let mut f = Vec::with_capacity(order + 1);
    let root = x.clone().sqrt();
    let half: T = half();
    let mut xk = half.clone() / root.clone();
    let reciprocal = T::one() / x;
    f.push(root);
    for i in 1..=order {
        f.push(xk.clone());
        xk = xk * reciprocal.clone() * (half.clone() - int(i as i64));
    }
    f
}

// ══════════════════════════════════════════════
//  Exponential and logarithm
// ══════════════════════════════════════════════

/// `eˣ`: every derivative equals the value.
pub fn exp<T: ExponentialOps>(x: T, order: usize) -> Vec<T> {
    vec![x.exp(); order + 1]
}

/// `ln x`: `f^(k) = (−1)^(k−1) (k−1)! / x^k`.
pub fn ln<T: ExponentialOps>(x: T, order: usize) -> Vec<T> {
    let mut f = Vec::with_capacity(order + 1);
    f.push(x.clone().ln());
    let inv = T::one() / x;
    let mut xk = inv.clone();
    for i in 1..=order {
        f.push(xk.clone());
        xk = xk * (-(int::<T>(i as i64) * inv.clone()));
    }
    f
}

// ══════════════════════════════════════════════
//  Circular functions
// ══════════════════════════════════════════════

/// `sin x`: derivatives cycle through `cos, −sin, −cos, sin`.
pub fn sin<T: TrigonometricOps>(x: T, order: usize) -> Vec<T> {
    let mut f = Vec::with_capacity(order + 1);
    f.push(x.clone().sin());
    if order > 0 {
        f.push(x.cos());
        for i in 2..=order {
            let previous = -f[i - 2].clone();
            f.push(previous);
        }
    }
    f
}

/// `cos x`: derivatives cycle through `−sin, −cos, sin, cos`.
pub fn cos<T: TrigonometricOps>(x: T, order: usize) -> Vec<T> {
    let mut f = Vec::with_capacity(order + 1);
    f.push(x.clone().cos());
    if order > 0 {
        f.push(-x.sin());
        for i in 2..=order {
            let previous = -f[i - 2].clone();
            f.push(previous);
        }
    }
    f
}

/// `tan x`: `f^(n) = P_n(tan x)` with `P_0(t) = t` and
/// `P_n(t) = (1 + t²) P_(n−1)'(t)`, a polynomial of degree `n+1` with the
/// parity of `n+1`.
pub fn tan<T: TrigonometricOps>(x: T, order: usize) -> Vec<T> {
    let t = x.tan();
    tangent_like(t, order, 1)
}

/// Shared recurrence for `tan` (`sign = 1`) and `tanh` (`sign = −1`):
/// `P_n(t) = (1 + sign·t²) P_(n−1)'(t)`.
fn tangent_like<T: Ring>(t: T, order: usize, sign: i64) -> Vec<T> {
    let mut f = Vec::with_capacity(order + 1);
    f.push(t.clone());
    if order == 0 {
        return f;
    }

    let mut p = vec![T::zero(); order + 2];
    p[1] = T::one();
    let t2 = t.clone() * t.clone();
    for n in 1..=order {
        let mut v = T::zero();
        p[n + 1] = int::<T>(sign * n as i64) * p[n].clone();
        let mut k = n as i64 + 1;
        while k >= 0 {
            let ku = k as usize;
            v = v * t2.clone() + p[ku].clone();
            if k > 2 {
                p[ku - 2] = int::<T>(k - 1) * p[ku - 1].clone()
                    + int::<T>(sign * (k - 3)) * p[ku - 3].clone();
            } else if k == 2 {
                p[0] = p[1].clone();
            }
            k -= 2;
        }
        if n % 2 == 0 {
            v = v * t.clone();
        }
        f.push(v);
    }
    f
}

/// Numerator recurrence shared by the inverse functions, whose derivatives
/// have the form `P_n(x) · c_n` with `c_n = c_1 · f^(n−1)`.
///
/// `leading(n)` scales the top coefficient of `P_(n−1)` into the top one of
/// `P_n`. `inner(k, n)` gives the factors of the in-place update
/// `p[k−2] = a·p[k−1] + b·p[k−3]`. `flip_constant` negates the refreshed
/// constant term.
struct InverseRecurrence {
    first: i64,
    leading: fn(i64) -> i64,
    inner: fn(i64, i64) -> (i64, i64),
    flip_constant: bool,
}

fn inverse_like<T: Field>(
    value: T,
    x: T,
    f_factor: T,
    first_coefficient: T,
    order: usize,
    recurrence: &InverseRecurrence,
) -> Vec<T> {
    let mut f = Vec::with_capacity(order + 1);
    f.push(value);
    if order == 0 {
        return f;
    }

    let mut p = vec![T::zero(); order];
    p[0] = int(recurrence.first);
    let x2 = x.clone() * x.clone();
    let mut coeff = first_coefficient;
    f.push(coeff.clone() * p[0].clone());

    for n in 2..=order {
        let mut v = T::zero();
        p[n - 1] = int::<T>((recurrence.leading)(n as i64)) * p[n - 2].clone();
        let mut k = n as i64 - 1;
        while k >= 0 {
            let ku = k as usize;
            v = v * x2.clone() + p[ku].clone();
            if k > 2 {
                let (a, b) = (recurrence.inner)(k, n as i64);
                p[ku - 2] = int::<T>(a) * p[ku - 1].clone() + int::<T>(b) * p[ku - 3].clone();
            } else if k == 2 {
                p[0] = if recurrence.flip_constant {
                    -p[1].clone()
                } else {
                    p[1].clone()
                };
            }
            k -= 2;
        }
        if n % 2 == 0 {
            v = v * x.clone();
        }
        coeff = coeff * f_factor.clone();
        f.push(coeff.clone() * v);
    }
    f
}

// P_n(x) = (1 − x²) P_(n−1)'(x) + (2n − 3) x P_(n−1)(x)
const ARC_SINE: InverseRecurrence = InverseRecurrence {
    first: 1,
    leading: |n| n - 1,
    inner: |k, n| (k - 1, 2 * n - k),
    flip_constant: false,
};

/// `asin x`: `f^(n) = P_n(x) / (1 − x²)^((2n−1)/2)`, with `P_1 = 1`.
pub fn asin<T: TrigonometricOps + PowerOps>(x: T, order: usize) -> Vec<T> {
    let f = T::one() / (T::one() - x.clone() * x.clone());
    let first = f.clone().sqrt();
    inverse_like(x.clone().asin(), x, f, first, order, &ARC_SINE)
}

/// `acos x`: the derivatives of `asin x`, negated (`P_1 = −1`).
pub fn acos<T: TrigonometricOps + PowerOps>(x: T, order: usize) -> Vec<T> {
    let f = T::one() / (T::one() - x.clone() * x.clone());
    let first = f.clone().sqrt();
    let recurrence = InverseRecurrence {
        first: -1,
        ..ARC_SINE
    };
    inverse_like(x.clone().acos(), x, f, first, order, &recurrence)
}

/// `atan x`: `f^(n) = Q_n(x) / (1 + x²)^n` with `Q_1 = 1` and
/// `Q_n(x) = (1 + x²) Q_(n−1)'(x) − 2(n−1) x Q_(n−1)(x)`.
pub fn atan<T: TrigonometricOps>(x: T, order: usize) -> Vec<T> {
    let f = T::one() / (T::one() + x.clone() * x.clone());
    let recurrence = InverseRecurrence {
        first: 1,
        leading: |n| -n,
        inner: |k, n| (k - 1, k - 1 - 2 * n),
        flip_constant: false,
    };
    inverse_like(x.clone().atan(), x, f.clone(), f, order, &recurrence)
}

// ══════════════════════════════════════════════
//  Hyperbolic functions
// ══════════════════════════════════════════════

/// `sinh x`: derivatives alternate `cosh, sinh`.
pub fn sinh<T: HyperbolicOps>(x: T, order: usize) -> Vec<T> {
    let mut f = Vec::with_capacity(order + 1);
    f.push(x.clone().sinh());
    if order > 0 {
        f.push(x.cosh());
        for i in 2..=order {
            let previous = f[i - 2].clone();
            f.push(previous);
        }
    }
    f
}

/// `cosh x`: derivatives alternate `sinh, cosh`.
pub fn cosh<T: HyperbolicOps>(x: T, order: usize) -> Vec<T> {
    let mut f = Vec::with_capacity(order + 1);
    f.push(x.clone().cosh());
    if order > 0 {
        f.push(x.sinh());
        for i in 2..=order {
            let previous = f[i - 2].clone();
            f.push(previous);
        }
    }
    f
}

/// `tanh x`: `f^(n) = P_n(tanh x)` with `P_n(t) = (1 − t²) P_(n−1)'(t)`.
pub fn tanh<T: HyperbolicOps>(x: T, order: usize) -> Vec<T> {
    let t = x.tanh();
    tangent_like(t, order, -1)
}

/// `asinh x`: `f^(n) = P_n(x) / (x² + 1)^((2n−1)/2)` with `P_1 = 1` and
/// `P_n(x) = (x² + 1) P_(n−1)'(x) − (2n − 3) x P_(n−1)(x)`.
pub fn asinh<T: HyperbolicOps + PowerOps>(x: T, order: usize) -> Vec<T> {
    let f = T::one() / (T::one() + x.clone() * x.clone());
    let first = f.clone().sqrt();
    let recurrence = InverseRecurrence {
        first: 1,
        leading: |n| 1 - n,
        inner: |k, n| (k - 1, k - 2 * n),
        flip_constant: false,
    };
    inverse_like(x.clone().asinh(), x, f, first, order, &recurrence)
}

/// `acosh x`: `f^(n) = P_n(x) / (x² − 1)^((2n−1)/2)` with `P_1 = 1` and
/// `P_n(x) = (x² − 1) P_(n−1)'(x) − (2n − 3) x P_(n−1)(x)`.
pub fn acosh<T: HyperbolicOps + PowerOps>(x: T, order: usize) -> Vec<T> {
    let f = T::one() / (x.clone() * x.clone() - T::one());
    let first = f.clone().sqrt();
    let recurrence = InverseRecurrence {
        first: 1,
        leading: |n| 1 - n,
        inner: |k, n| (1 - k, k - 2 * n),
        flip_constant: true,
    };
    inverse_like(x.clone().acosh(), x, f, first, order, &recurrence)
}

/// `atanh x`: `f^(n) = Q_n(x) / (1 − x²)^n` with `Q_1 = 1` and
/// `Q_n(x) = (1 − x²) Q_(n−1)'(x) + 2(n−1) x Q_(n−1)(x)`.
pub fn atanh<T: HyperbolicOps>(x: T, order: usize) -> Vec<T> {
    let f = T::one() / (T::one() - x.clone() * x.clone());
    let recurrence = InverseRecurrence {
        first: 1,
        leading: |n| n,
        inner: |k, n| (k - 1, 2 * n - k + 1),
        flip_constant: false,
    };
    inverse_like(x.clone().atanh(), x, f.clone(), f, order, &recurrence)
}
