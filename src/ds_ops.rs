//! Table-driven arithmetic on raw derivative-structure buffers.
//!
//! Every operation takes its inputs as `&[T]` and writes into a separate
//! `&mut [T]`, so the borrow checker rules out aliasing between result and
//! operands. Place several structures in one array and pass sub-slices to
//! work at an offset. All lengths are checked before anything is written.

use crate::algebra::{
    AdditiveGroup, ExponentialOps, Field, HyperbolicOps, PowerOps, Ring, TrigonometricOps,
};
use crate::compiler::DsCompiler;
use crate::error::DsError;
use crate::univariate;

impl DsCompiler {
    #[inline]
    fn check_binary<T>(&self, lhs: &[T], rhs: &[T], result: &[T]) -> Result<(), DsError> {
        self.check_len(lhs.len())?;
        self.check_len(rhs.len())?;
        self.check_len(result.len())
    }

    // ══════════════════════════════════════════════
    //  Linear operations
    // ══════════════════════════════════════════════

    /// `result = lhs + rhs`.
    pub fn add<T: AdditiveGroup>(&self, lhs: &[T], rhs: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.check_binary(lhs, rhs, result)?;
        for ((r, a), b) in result.iter_mut().zip(lhs).zip(rhs) {
            *r = a.clone() + b.clone();
        }
        Ok(())
    }

    /// `result = lhs − rhs`.
    pub fn subtract<T: AdditiveGroup>(
        &self,
        lhs: &[T],
        rhs: &[T],
        result: &mut [T],
    ) -> Result<(), DsError> {
        self.check_binary(lhs, rhs, result)?;
        for ((r, a), b) in result.iter_mut().zip(lhs).zip(rhs) {
            *r = a.clone() - b.clone();
        }
        Ok(())
    }

    /// `result = −operand`.
    pub fn negate<T: AdditiveGroup>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.check_len(operand.len())?;
        self.check_len(result.len())?;
        for (r, a) in result.iter_mut().zip(operand) {
            *r = -a.clone();
        }
        Ok(())
    }

    /// `result = factor · operand`.
    pub fn scale<T: Ring>(&self, operand: &[T], factor: &T, result: &mut [T]) -> Result<(), DsError> {
        self.check_len(operand.len())?;
        self.check_len(result.len())?;
        for (r, a) in result.iter_mut().zip(operand) {
            *r = a.clone() * factor.clone();
        }
        Ok(())
    }

    // ══════════════════════════════════════════════
    //  Products and composition
    // ══════════════════════════════════════════════

    /// `result = lhs · rhs`, truncated at the compiled order.
    pub fn multiply<T: Ring>(&self, lhs: &[T], rhs: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.check_binary(lhs, rhs, result)?;
        for (r, row) in result.iter_mut().zip(self.multiplication_rows()) {
            let mut acc = T::zero();
            for term in row {
                let product = lhs[term.lhs].clone() * rhs[term.rhs].clone();
                acc = acc + product.times(term.coefficient);
            }
            *r = acc;
        }
        Ok(())
    }

    /// `result = lhs / rhs`, computed as `lhs · rhs⁻¹`.
    pub fn divide<T: Field>(&self, lhs: &[T], rhs: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.check_binary(lhs, rhs, result)?;
        let mut reciprocal = vec![T::zero(); self.size()];
        self.powi(rhs, -1, &mut reciprocal)?;
        self.multiply(lhs, &reciprocal, result)
    }

    /// `result = f ∘ operand`, where `f[k]` is the `k`-th derivative of a
    /// univariate function at `operand[0]`.
    ///
    /// `f` must hold exactly `order + 1` entries.
    pub fn compose<T: Ring>(&self, operand: &[T], f: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.check_len(operand.len())?;
        self.check_len(result.len())?;
        if f.len() != self.order() + 1 {
            return Err(DsError::DimensionMismatch {
                expected: self.order() + 1,
                actual: f.len(),
            });
        }
        for (r, row) in result.iter_mut().zip(self.composition_rows()) {
            let mut acc = T::zero();
            for term in row {
                let mut product = f[term.f_index].clone();
                for &j in &term.operands {
                    product = product * operand[j].clone();
                }
                acc = acc + product.times(term.coefficient);
            }
            *r = acc;
        }
        Ok(())
    }

    /// Validate, generate the derivative vector at `operand[0]`, compose.
    fn apply<T: Ring>(
        &self,
        operand: &[T],
        result: &mut [T],
        derivatives: impl FnOnce(T, usize) -> Vec<T>,
    ) -> Result<(), DsError> {
        self.check_len(operand.len())?;
        self.check_len(result.len())?;
        let f = derivatives(operand[0].clone(), self.order());
        self.compose(operand, &f, result)
    }

    // ══════════════════════════════════════════════
    //  Powers
    // ══════════════════════════════════════════════

    /// `result = operandⁿ` for `n ≥ 0`; needs only a ring.
    pub fn pown<T: Ring>(&self, operand: &[T], n: u32, result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, |x, order| {
            univariate::pow_nonnegative(x, n, order)
        })
    }

    /// `result = operandⁿ` for any integer `n`. `n = 0` yields the constant 1.
    pub fn powi<T: Field>(&self, operand: &[T], n: i32, result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, |x, order| univariate::powi(x, n, order))
    }

    /// `result = operand^p` for a scalar exponent `p`.
    pub fn powf<T: PowerOps>(&self, operand: &[T], p: &T, result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, |x, order| {
            univariate::powf(x, p.clone(), order)
        })
    }

    /// `result = x^y = exp(y · ln x)` for two structures.
    ///
    /// Intermediates live in scratch buffers; `result` is only written once
    /// both inputs have been validated.
    pub fn pow<T: ExponentialOps>(&self, x: &[T], y: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.check_binary(x, y, result)?;
        let mut ln_x = vec![T::zero(); self.size()];
        self.ln(x, &mut ln_x)?;
        let mut y_ln_x = vec![T::zero(); self.size()];
        self.multiply(&ln_x, y, &mut y_ln_x)?;
        self.exp(&y_ln_x, result)
    }

    /// `result = √operand`.
    pub fn sqrt<T: PowerOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::sqrt)
    }

    // ══════════════════════════════════════════════
    //  Exponential and logarithm
    // ══════════════════════════════════════════════

    pub fn exp<T: ExponentialOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::exp)
    }

    pub fn ln<T: ExponentialOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::ln)
    }

    // ══════════════════════════════════════════════
    //  Circular functions
    // ══════════════════════════════════════════════

    pub fn sin<T: TrigonometricOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::sin)
    }

    pub fn cos<T: TrigonometricOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::cos)
    }

    pub fn tan<T: TrigonometricOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::tan)
    }

    pub fn asin<T: TrigonometricOps + PowerOps>(
        &self,
        operand: &[T],
        result: &mut [T],
    ) -> Result<(), DsError> {
        self.apply(operand, result, univariate::asin)
    }

    pub fn acos<T: TrigonometricOps + PowerOps>(
        &self,
        operand: &[T],
        result: &mut [T],
    ) -> Result<(), DsError> {
        self.apply(operand, result, univariate::acos)
    }

    pub fn atan<T: TrigonometricOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::atan)
    }

    // ══════════════════════════════════════════════
    //  Hyperbolic functions
    // ══════════════════════════════════════════════

    pub fn sinh<T: HyperbolicOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::sinh)
    }

    pub fn cosh<T: HyperbolicOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::cosh)
    }

    pub fn tanh<T: HyperbolicOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::tanh)
    }

    pub fn asinh<T: HyperbolicOps + PowerOps>(
        &self,
        operand: &[T],
        result: &mut [T],
    ) -> Result<(), DsError> {
        self.apply(operand, result, univariate::asinh)
    }

    pub fn acosh<T: HyperbolicOps + PowerOps>(
        &self,
        operand: &[T],
        result: &mut [T],
    ) -> Result<(), DsError> {
        self.apply(operand, result, univariate::acosh)
    }

    pub fn atanh<T: HyperbolicOps>(&self, operand: &[T], result: &mut [T]) -> Result<(), DsError> {
        self.apply(operand, result, univariate::atanh)
    }
}
