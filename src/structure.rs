use std::fmt::{self, Display};
use std::sync::Arc;

use crate::algebra::{
    AdditiveGroup, ExponentialOps, Field, HyperbolicOps, PowerOps, Ring, TrigonometricOps,
};
use crate::cache::compiler;
use crate::compiler::DsCompiler;
use crate::error::DsError;

/// A function value together with all of its partial derivatives up to a
/// fixed order, with respect to a fixed number of free parameters.
///
/// The buffer layout is owned by the shared [`DsCompiler`]; entry 0 is
/// always the value. Two structures combine only when they were built for
/// the same `(free_parameters, order)`.
#[derive(Clone, Debug)]
pub struct DerivativeStructure<T> {
    compiler: Arc<DsCompiler>,
    data: Vec<T>,
}

impl<T: AdditiveGroup> DerivativeStructure<T> {
    /// A constant: every derivative is zero.
    pub fn constant(parameters: usize, order: usize, value: T) -> Self {
        Self::constant_with(compiler(parameters, order), value)
    }

    /// A constant laid out by an already resolved compiler.
    pub(crate) fn constant_with(compiler: Arc<DsCompiler>, value: T) -> Self {
        let mut data = vec![T::zero(); compiler.size()];
        data[0] = value;
        DerivativeStructure { compiler, data }
    }

    /// The constant 0.
    pub fn zero(parameters: usize, order: usize) -> Self {
        Self::constant(parameters, order, T::zero())
    }

    /// Wrap an existing buffer laid out as [`DsCompiler::to_orders`]
    /// describes.
    pub fn from_derivatives(parameters: usize, order: usize, data: Vec<T>) -> Result<Self, DsError> {
        Self::with_compiler(compiler(parameters, order), data)
    }

    /// Wrap `data` for an already resolved compiler.
    pub fn with_compiler(compiler: Arc<DsCompiler>, data: Vec<T>) -> Result<Self, DsError> {
        compiler.check_len(data.len())?;
        Ok(DerivativeStructure { compiler, data })
    }

    /// Compiler that owns this structure's layout.
    #[inline]
    pub fn compiler(&self) -> &Arc<DsCompiler> {
        &self.compiler
    }

    #[inline]
    pub fn free_parameters(&self) -> usize {
        self.compiler.free_parameters()
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.compiler.order()
    }

    /// The function value (entry 0).
    #[inline]
    pub fn value(&self) -> &T {
        &self.data[0]
    }

    /// All entries in compiler layout.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Partial derivative with the given per-parameter orders.
    pub fn partial_derivative(&self, orders: &[usize]) -> Result<T, DsError> {
        let index = self.compiler.to_index(orders)?;
        Ok(self.data[index].clone())
    }

    /// Same layout, fresh zeroed buffer.
    fn blank(&self) -> Vec<T> {
        vec![T::zero(); self.data.len()]
    }

    /// Run a unary buffer operation whose lengths are fixed by construction.
    fn map(
        &self,
        op: impl FnOnce(&DsCompiler, &[T], &mut [T]) -> Result<(), DsError>,
    ) -> Self {
        let mut data = self.blank();
        let outcome = op(&self.compiler, &self.data, &mut data);
        debug_assert!(outcome.is_ok(), "{outcome:?}");
        DerivativeStructure {
            compiler: Arc::clone(&self.compiler),
            data,
        }
    }

    /// Run a binary buffer operation after checking that both sides share a
    /// layout.
    fn zip(
        &self,
        rhs: &Self,
        op: impl FnOnce(&DsCompiler, &[T], &[T], &mut [T]) -> Result<(), DsError>,
    ) -> Result<Self, DsError> {
        self.compiler.check_compatibility(&rhs.compiler)?;
        let mut data = self.blank();
        op(&self.compiler, &self.data, &rhs.data, &mut data)?;
        Ok(DerivativeStructure {
            compiler: Arc::clone(&self.compiler),
            data,
        })
    }

    /// `self + c`: only the value moves.
    pub fn add_scalar(&self, c: T) -> Self {
        let mut data = self.data.clone();
        data[0] = data[0].clone() + c;
        DerivativeStructure {
            compiler: Arc::clone(&self.compiler),
            data,
        }
    }

    pub fn checked_add(&self, rhs: &Self) -> Result<Self, DsError> {
        self.zip(rhs, DsCompiler::add)
    }

    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, DsError> {
        self.zip(rhs, DsCompiler::subtract)
    }

    pub fn negate(&self) -> Self {
        self.map(DsCompiler::negate)
    }
}

impl<T: Ring> DerivativeStructure<T> {
    /// The constant 1.
    pub fn one(parameters: usize, order: usize) -> Self {
        Self::constant(parameters, order, T::one())
    }

    /// The free parameter `index`, evaluated at `value`: its first
    /// derivative with respect to itself is 1, every other derivative is 0.
    pub fn variable(parameters: usize, order: usize, index: usize, value: T) -> Result<Self, DsError> {
        if index >= parameters {
            return Err(DsError::ParameterOutOfRange { index, parameters });
        }
        Self::variable_with(compiler(parameters, order), index, value)
    }

    /// Like [`variable`](Self::variable), for an already resolved compiler.
    pub(crate) fn variable_with(
        compiler: Arc<DsCompiler>,
        index: usize,
        value: T,
    ) -> Result<Self, DsError> {
        let (parameters, order) = (compiler.free_parameters(), compiler.order());
        if index >= parameters {
            return Err(DsError::ParameterOutOfRange { index, parameters });
        }
        let mut ds = Self::constant_with(compiler, value);
        if order > 0 {
            let mut orders = vec![0; parameters];
            orders[index] = 1;
            let position = ds.compiler.to_index(&orders)?;
            ds.data[position] = T::one();
        }
        Ok(ds)
    }

    /// Every entry multiplied by `factor`.
    pub fn scale(&self, factor: &T) -> Self {
        self.map(|c, operand, result| c.scale(operand, factor, result))
    }

    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, DsError> {
        self.zip(rhs, DsCompiler::multiply)
    }

    /// Apply `f` given its derivative vector `[f(x), f'(x), …]` at the value.
    pub fn compose(&self, f: &[T]) -> Result<Self, DsError> {
        let mut data = self.blank();
        self.compiler.compose(&self.data, f, &mut data)?;
        Ok(DerivativeStructure {
            compiler: Arc::clone(&self.compiler),
            data,
        })
    }

    /// `selfⁿ` for `n ≥ 0`.
    pub fn pown(&self, n: u32) -> Self {
        self.map(|c, operand, result| c.pown(operand, n, result))
    }
}

impl<T: Field> DerivativeStructure<T> {
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, DsError> {
        self.zip(rhs, DsCompiler::divide)
    }

    pub fn powi(&self, n: i32) -> Self {
        self.map(|c, operand, result| c.powi(operand, n, result))
    }

    pub fn recip(&self) -> Self {
        self.powi(-1)
    }
}

impl<T: PowerOps> DerivativeStructure<T> {
    pub fn sqrt(&self) -> Self {
        self.map(DsCompiler::sqrt)
    }

    pub fn powf(&self, p: &T) -> Self {
        self.map(|c, operand, result| c.powf(operand, p, result))
    }
}

impl<T: ExponentialOps> DerivativeStructure<T> {
    pub fn exp(&self) -> Self {
        self.map(DsCompiler::exp)
    }

    pub fn ln(&self) -> Self {
        self.map(DsCompiler::ln)
    }

    /// `self^exponent` with both sides differentiated.
    pub fn checked_pow(&self, exponent: &Self) -> Result<Self, DsError> {
        self.zip(exponent, DsCompiler::pow)
    }
}

impl<T: TrigonometricOps> DerivativeStructure<T> {
    pub fn sin(&self) -> Self {
        self.map(DsCompiler::sin)
    }

    pub fn cos(&self) -> Self {
        self.map(DsCompiler::cos)
    }

    pub fn tan(&self) -> Self {
        self.map(DsCompiler::tan)
    }

    pub fn atan(&self) -> Self {
        self.map(DsCompiler::atan)
    }
}

impl<T: TrigonometricOps + PowerOps> DerivativeStructure<T> {
    pub fn asin(&self) -> Self {
        self.map(DsCompiler::asin)
    }

    pub fn acos(&self) -> Self {
        self.map(DsCompiler::acos)
    }
}

impl<T: HyperbolicOps> DerivativeStructure<T> {
    pub fn sinh(&self) -> Self {
        self.map(DsCompiler::sinh)
    }

    pub fn cosh(&self) -> Self {
        self.map(DsCompiler::cosh)
    }

    pub fn tanh(&self) -> Self {
        self.map(DsCompiler::tanh)
    }

    pub fn atanh(&self) -> Self {
        self.map(DsCompiler::atanh)
    }
}

impl<T: HyperbolicOps + PowerOps> DerivativeStructure<T> {
    pub fn asinh(&self) -> Self {
        self.map(DsCompiler::asinh)
    }

    pub fn acosh(&self) -> Self {
        self.map(DsCompiler::acosh)
    }
}

/// Equal when built for the same `(free_parameters, order)` with equal
/// entries.
impl<T: PartialEq> PartialEq for DerivativeStructure<T> {
    fn eq(&self, other: &Self) -> bool {
        self.compiler.free_parameters() == other.compiler.free_parameters()
            && self.compiler.order() == other.compiler.order()
            && self.data == other.data
    }
}

impl<T: Display> Display for DerivativeStructure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DS({}, {})[",
            self.compiler.free_parameters(),
            self.compiler.order()
        )?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}
