//! `std::ops` implementations for [`DerivativeStructure<T>`].
//!
//! Binary operators panic when the two sides were built for different
//! `(free_parameters, order)`; use the `checked_*` methods to get the
//! [`DsError`](crate::DsError) instead.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::algebra::{AdditiveGroup, Field, Ring};
use crate::structure::DerivativeStructure;

// ══════════════════════════════════════════════
//  DerivativeStructure<T> ↔ DerivativeStructure<T>
// ══════════════════════════════════════════════

impl<T: AdditiveGroup> Add for &DerivativeStructure<T> {
    type Output = DerivativeStructure<T>;
    #[inline]
    fn add(self, rhs: Self) -> DerivativeStructure<T> {
        self.checked_add(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T: AdditiveGroup> Sub for &DerivativeStructure<T> {
    type Output = DerivativeStructure<T>;
    #[inline]
    fn sub(self, rhs: Self) -> DerivativeStructure<T> {
        self.checked_sub(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T: Ring> Mul for &DerivativeStructure<T> {
    type Output = DerivativeStructure<T>;
    #[inline]
    fn mul(self, rhs: Self) -> DerivativeStructure<T> {
        self.checked_mul(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T: Field> Div for &DerivativeStructure<T> {
    type Output = DerivativeStructure<T>;
    #[inline]
    fn div(self, rhs: Self) -> DerivativeStructure<T> {
        self.checked_div(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T: AdditiveGroup> Neg for &DerivativeStructure<T> {
    type Output = DerivativeStructure<T>;
    #[inline]
    fn neg(self) -> DerivativeStructure<T> {
        self.negate()
    }
}

impl<T: AdditiveGroup> Add for DerivativeStructure<T> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl<T: AdditiveGroup> Sub for DerivativeStructure<T> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl<T: Ring> Mul for DerivativeStructure<T> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: Field> Div for DerivativeStructure<T> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        &self / &rhs
    }
}

impl<T: AdditiveGroup> Neg for DerivativeStructure<T> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl<T: AdditiveGroup> AddAssign<&DerivativeStructure<T>> for DerivativeStructure<T> {
    #[inline]
    fn add_assign(&mut self, rhs: &DerivativeStructure<T>) {
        *self = &*self + rhs;
    }
}

impl<T: AdditiveGroup> SubAssign<&DerivativeStructure<T>> for DerivativeStructure<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: &DerivativeStructure<T>) {
        *self = &*self - rhs;
    }
}

impl<T: Ring> MulAssign<&DerivativeStructure<T>> for DerivativeStructure<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: &DerivativeStructure<T>) {
        *self = &*self * rhs;
    }
}

impl<T: Field> DivAssign<&DerivativeStructure<T>> for DerivativeStructure<T> {
    #[inline]
    fn div_assign(&mut self, rhs: &DerivativeStructure<T>) {
        *self = &*self / rhs;
    }
}

// Mixed ops: DerivativeStructure<F> with primitive floats.
macro_rules! impl_structure_scalar_ops {
    ($f:ty) => {
        impl Add<$f> for DerivativeStructure<$f> {
            type Output = DerivativeStructure<$f>;
            #[inline]
            fn add(self, rhs: $f) -> DerivativeStructure<$f> {
                self.add_scalar(rhs)
            }
        }

        impl Add<DerivativeStructure<$f>> for $f {
            type Output = DerivativeStructure<$f>;
            #[inline]
            fn add(self, rhs: DerivativeStructure<$f>) -> DerivativeStructure<$f> {
                rhs.add_scalar(self)
            }
        }

        impl Sub<$f> for DerivativeStructure<$f> {
            type Output = DerivativeStructure<$f>;
            #[inline]
            fn sub(self, rhs: $f) -> DerivativeStructure<$f> {
                self.add_scalar(-rhs)
            }
        }

        impl Sub<DerivativeStructure<$f>> for $f {
            type Output = DerivativeStructure<$f>;
            #[inline]
            fn sub(self, rhs: DerivativeStructure<$f>) -> DerivativeStructure<$f> {
                rhs.negate().add_scalar(self)
            }
        }

        impl Mul<$f> for DerivativeStructure<$f> {
            type Output = DerivativeStructure<$f>;
            #[inline]
            fn mul(self, rhs: $f) -> DerivativeStructure<$f> {
                self.scale(&rhs)
            }
        }

        impl Mul<DerivativeStructure<$f>> for $f {
            type Output = DerivativeStructure<$f>;
            #[inline]
            fn mul(self, rhs: DerivativeStructure<$f>) -> DerivativeStructure<$f> {
                rhs.scale(&self)
            }
        }

        impl Div<$f> for DerivativeStructure<$f> {
            type Output = DerivativeStructure<$f>;
            #[inline]
            fn div(self, rhs: $f) -> DerivativeStructure<$f> {
                self.scale(&(1.0 / rhs))
            }
        }

        impl Div<DerivativeStructure<$f>> for $f {
            type Output = DerivativeStructure<$f>;
            #[inline]
            fn div(self, rhs: DerivativeStructure<$f>) -> DerivativeStructure<$f> {
                rhs.recip().scale(&self)
            }
        }
    };
}

impl_structure_scalar_ops!(f32);
impl_structure_scalar_ops!(f64);
