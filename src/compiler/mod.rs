//! Compiled index tables for one `(parameters, order)` pair.
//!
//! A [`DsCompiler`] unrolls the doubly recursive structure described by
//! Kalman ("Doubly Recursive Multivariate Automatic Differentiation",
//! Mathematics Magazine 75(3), 2002) into flat indirection tables:
//!
//! - `sizes`: structure sizes for every `(p, o)` with `p ≤ P`, `o ≤ N`.
//! - `derivatives_indirection`: flat index → multi-index.
//! - `lower_indirection`: where the order-`N−1` substructure lives.
//! - `mult_indirection`: truncated Leibniz product rows.
//! - `composition_indirection`: Faà di Bruno chain-rule rows.
//!
//! Every table for `(P, N)` is derived from the tables of the value compiler
//! `(P−1, N)` and the derivative compiler `(P, N−1)`. The compiler never owns
//! value buffers: the same instance drives arithmetic on any number of them,
//! for any operand type (see `ds_ops`).
//!
//! Layout: a structure for `(P, N)` stores the `(P−1, N)` structure (all
//! entries whose last parameter has order 0) first, followed by the
//! `(P, N−1)` structure of the derivative with respect to the last parameter.

mod composition;
mod indexing;
mod lower;
mod multiplication;
mod sizes;

pub use composition::CompositionTerm;
pub use multiplication::MultiplicationTerm;
#[cfg(feature = "serde")]
pub(crate) use sizes::structure_size;

use crate::error::DsError;

/// Immutable compiled rules for derivative structures with a fixed number of
/// free parameters and a fixed truncation order.
///
/// Obtain shared instances through [`compiler`](crate::compiler()); the cache
/// guarantees that each `(parameters, order)` pair is compiled once.
#[derive(Clone, Debug)]
pub struct DsCompiler {
    parameters: usize,
    order: usize,
    sizes: Vec<Vec<usize>>,
    derivatives_indirection: Vec<Vec<usize>>,
    lower_indirection: Vec<usize>,
    mult_indirection: Vec<Vec<MultiplicationTerm>>,
    composition_indirection: Vec<Vec<CompositionTerm>>,
}

impl DsCompiler {
    /// Build the compiler for `(parameters, order)` from its two
    /// sub-compilers.
    ///
    /// `value` must be the `(parameters − 1, order)` compiler and is present
    /// iff `parameters > 0`; `derivative` must be the `(parameters, order − 1)`
    /// compiler and is present iff `order > 0`.
    pub(crate) fn build(
        parameters: usize,
        order: usize,
        value: Option<&DsCompiler>,
        derivative: Option<&DsCompiler>,
    ) -> Self {
        debug_assert_eq!(value.is_some(), parameters > 0);
        debug_assert_eq!(derivative.is_some(), order > 0);

        let sizes = sizes::compile_sizes(parameters, order, value);
        debug_assert_eq!(
            sizes::structure_size(parameters, order),
            Some(sizes[parameters][order])
        );
        let derivatives_indirection =
            indexing::compile_derivatives_indirection(parameters, value, derivative);
        let lower_indirection = lower::compile_lower_indirection(order, value, derivative);
        let mult_indirection =
            multiplication::compile_multiplication_indirection(value, derivative, &lower_indirection);
        let composition_indirection = composition::compile_composition_indirection(
            parameters, order, value, derivative, &sizes,
        );

        DsCompiler {
            parameters,
            order,
            sizes,
            derivatives_indirection,
            lower_indirection,
            mult_indirection,
            composition_indirection,
        }
    }

    /// Number of free parameters.
    #[inline]
    pub fn free_parameters(&self) -> usize {
        self.parameters
    }

    /// Truncation order.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of elements of a derivative structure, value included.
    #[inline]
    pub fn size(&self) -> usize {
        self.sizes[self.parameters][self.order]
    }

    /// The full size table: `sizes()[p][o]` counts the multi-indices with `p`
    /// parameters and total order at most `o`.
    pub fn sizes(&self) -> &[Vec<usize>] {
        &self.sizes
    }

    /// Flat index of the partial derivative with the given per-parameter
    /// orders.
    ///
    /// All-zero orders map to index 0 (the value). With a single parameter,
    /// `[k]` maps to `k`; with order 1, the unit vector `e_i` maps to `i + 1`.
    /// Other layouts are fixed per compiler but otherwise unspecified.
    pub fn to_index(&self, orders: &[usize]) -> Result<usize, DsError> {
        if orders.len() != self.parameters {
            return Err(DsError::DimensionMismatch {
                expected: self.parameters,
                actual: orders.len(),
            });
        }
        // saturates instead of wrapping, so huge entries still exceed the order
        let requested = orders.iter().fold(0usize, |acc, &o| acc.saturating_add(o));
        if requested > self.order {
            return Err(DsError::OrderTooLarge {
                requested,
                order: self.order,
            });
        }
        Ok(indexing::partial_derivative_index(
            &self.sizes,
            self.order,
            orders,
        ))
    }

    /// Per-parameter derivation orders stored at flat `index`.
    ///
    /// Inverse of [`to_index`](Self::to_index).
    pub fn to_orders(&self, index: usize) -> Result<&[usize], DsError> {
        self.derivatives_indirection
            .get(index)
            .map(Vec::as_slice)
            .ok_or(DsError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Indices of the order-`N−1` substructure inside this structure.
    pub fn lower_indirection(&self) -> &[usize] {
        &self.lower_indirection
    }

    /// Product rows: `result[i] = Σ c · lhs[l] · rhs[r]` over row `i`.
    pub fn multiplication_rows(&self) -> &[Vec<MultiplicationTerm>] {
        &self.mult_indirection
    }

    /// Composition rows: `result[i] = Σ c · f[k] · Π operand[j]` over row `i`.
    pub fn composition_rows(&self) -> &[Vec<CompositionTerm>] {
        &self.composition_indirection
    }

    /// Fail unless `other` was compiled for the same `(parameters, order)`.
    pub fn check_compatibility(&self, other: &DsCompiler) -> Result<(), DsError> {
        if self.parameters != other.parameters || self.order != other.order {
            return Err(DsError::IncompatibleStructures {
                left: (self.parameters, self.order),
                right: (other.parameters, other.order),
            });
        }
        Ok(())
    }

    /// Fail unless `len` equals the structure size.
    #[inline]
    pub(crate) fn check_len(&self, len: usize) -> Result<(), DsError> {
        if len != self.size() {
            return Err(DsError::DimensionMismatch {
                expected: self.size(),
                actual: len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build `(p, o)` by plain recursion, for tests that must not touch the
    /// shared cache.
    pub(crate) fn build_uncached(p: usize, o: usize) -> DsCompiler {
        let value = (p > 0).then(|| build_uncached(p - 1, o));
        let derivative = (o > 0).then(|| build_uncached(p, o - 1));
        DsCompiler::build(p, o, value.as_ref(), derivative.as_ref())
    }

    #[test]
    fn base_case_has_single_element() {
        let c = build_uncached(0, 3);
        assert_eq!(c.size(), 1);
        assert_eq!(c.to_index(&[]), Ok(0));
        let c = build_uncached(3, 0);
        assert_eq!(c.size(), 1);
        assert_eq!(c.to_orders(0).unwrap(), &[0, 0, 0]);
    }

    #[test]
    fn two_parameters_order_two_layout() {
        // f, df/dx, d2f/dx2, df/dy, d2f/dxdy, d2f/dy2
        let c = build_uncached(2, 2);
        assert_eq!(c.size(), 6);
        assert_eq!(c.to_index(&[0, 1]), Ok(3));
        let expected: [&[usize]; 6] = [&[0, 0], &[1, 0], &[2, 0], &[0, 1], &[1, 1], &[0, 2]];
        for (i, orders) in expected.iter().enumerate() {
            assert_eq!(c.to_orders(i).unwrap(), *orders);
        }
    }

    #[test]
    fn errors_are_reported() {
        let c = build_uncached(2, 2);
        assert_eq!(
            c.to_index(&[1]),
            Err(DsError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            c.to_index(&[2, 1]),
            Err(DsError::OrderTooLarge {
                requested: 3,
                order: 2
            })
        );
        assert_eq!(
            c.to_index(&[usize::MAX, 1]),
            Err(DsError::OrderTooLarge {
                requested: usize::MAX,
                order: 2
            })
        );
        assert_eq!(
            c.to_orders(6),
            Err(DsError::IndexOutOfRange { index: 6, size: 6 })
        );
        let other = build_uncached(2, 1);
        assert!(c.check_compatibility(&other).is_err());
        assert!(c.check_compatibility(&c).is_ok());
    }
}
