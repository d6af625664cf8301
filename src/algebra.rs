//! Capability traits for the operand type stored inside derivative structures.
//!
//! Each operation asks for the weakest capability it needs: `add`/`subtract`
//! only need an [`AdditiveGroup`], `multiply` and `compose` need a [`Ring`],
//! `divide` and negative powers need a [`Field`], and the elementary functions
//! additionally need whichever of [`PowerOps`], [`ExponentialOps`],
//! [`TrigonometricOps`] or [`HyperbolicOps`] they evaluate.
//!
//! The algebraic traits are blanket-implemented from `std::ops` and
//! `num_traits`; the transcendental ones are implemented for every
//! `num_traits::Float`. Out-of-domain arguments behave exactly like the
//! underlying type (NaN for `f32`/`f64`).

use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{One, Zero};

/// Values closed under `+`, `-` and negation, with a zero.
pub trait AdditiveGroup:
    Clone + Zero + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self>
{
    /// `n · self` by repeated doubling, so that integer table coefficients
    /// never require a numeric conversion.
    fn times(self, n: u64) -> Self {
        match n {
            0 => Self::zero(),
            1 => self,
            _ => {
                let mut acc = Self::zero();
                let mut base = self;
                let mut k = n;
                loop {
                    if k & 1 == 1 {
                        acc = acc + base.clone();
                    }
                    k >>= 1;
                    if k == 0 {
                        break acc;
                    }
                    base = base.clone() + base;
                }
            }
        }
    }
}

impl<T> AdditiveGroup for T where
    T: Clone + Zero + Add<Output = T> + Sub<Output = T> + Neg<Output = T>
{
}

/// An [`AdditiveGroup`] with multiplication and a unit.
pub trait Ring: AdditiveGroup + One + Mul<Output = Self> {
    /// Embed a signed integer.
    fn from_int(n: i64) -> Self {
        let magnitude = Self::one().times(n.unsigned_abs());
        if n < 0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl<T> Ring for T where T: AdditiveGroup + One + Mul<Output = T> {}

/// A [`Ring`] with division.
pub trait Field: Ring + Div<Output = Self> {}

impl<T> Field for T where T: Ring + Div<Output = T> {}

/// Square root and real powers.
pub trait PowerOps: Field {
    fn sqrt(self) -> Self;
    fn powf(self, p: Self) -> Self;
}

/// Natural exponential and logarithm.
pub trait ExponentialOps: Field {
    fn exp(self) -> Self;
    fn ln(self) -> Self;
}

/// Circular functions and their inverses.
pub trait TrigonometricOps: Field {
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
}

/// Hyperbolic functions and their inverses.
pub trait HyperbolicOps: Field {
    fn sinh(self) -> Self;
    fn cosh(self) -> Self;
    fn tanh(self) -> Self;
    fn asinh(self) -> Self;
    fn acosh(self) -> Self;
    fn atanh(self) -> Self;
}

/// Everything the full elementary-function library needs.
pub trait ElementaryField:
    PowerOps + ExponentialOps + TrigonometricOps + HyperbolicOps
{
}

impl<T> ElementaryField for T where
    T: PowerOps + ExponentialOps + TrigonometricOps + HyperbolicOps
{
}

impl<F: num_traits::Float> PowerOps for F {
    #[inline]
    fn sqrt(self) -> Self {
        num_traits::Float::sqrt(self)
    }

    #[inline]
    fn powf(self, p: Self) -> Self {
        num_traits::Float::powf(self, p)
    }
}

impl<F: num_traits::Float> ExponentialOps for F {
    #[inline]
    fn exp(self) -> Self {
        num_traits::Float::exp(self)
    }

    #[inline]
    fn ln(self) -> Self {
        num_traits::Float::ln(self)
    }
}

impl<F: num_traits::Float> TrigonometricOps for F {
    #[inline]
    fn sin(self) -> Self {
        num_traits::Float::sin(self)
    }

    #[inline]
    fn cos(self) -> Self {
        num_traits::Float::cos(self)
    }

    #[inline]
    fn tan(self) -> Self {
        num_traits::Float::tan(self)
    }

    #[inline]
    fn asin(self) -> Self {
        num_traits::Float::asin(self)
    }

    #[inline]
    fn acos(self) -> Self {
        num_traits::Float::acos(self)
    }

    #[inline]
    fn atan(self) -> Self {
        num_traits::Float::atan(self)
    }
}

impl<F: num_traits::Float> HyperbolicOps for F {
    #[inline]
    fn sinh(self) -> Self {
        num_traits::Float::sinh(self)
    }

    #[inline]
    fn cosh(self) -> Self {
        num_traits::Float::cosh(self)
    }

    #[inline]
    fn tanh(self) -> Self {
        num_traits::Float::tanh(self)
    }

    #[inline]
    fn asinh(self) -> Self {
        num_traits::Float::asinh(self)
    }

    #[inline]
    fn acosh(self) -> Self {
        num_traits::Float::acosh(self)
    }

    #[inline]
    fn atanh(self) -> Self {
        num_traits::Float::atanh(self)
    }
}
