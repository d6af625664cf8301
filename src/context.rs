//! Named free parameters for derivative structures.
//!
//! A [`DsContext`] fixes the truncation order and an ordered list of
//! `name = value` bindings. The `i`-th binding is free parameter `i`, so a
//! context with `k` bindings hands out structures over `k` parameters.

use std::sync::Arc;

use crate::algebra::Ring;
use crate::cache::compiler;
use crate::compiler::DsCompiler;
use crate::error::DsError;
use crate::structure::DerivativeStructure;

/// Differentiation context: bindings plus order.
#[derive(Clone, Debug)]
pub struct DsContext<T> {
    order: usize,
    bindings: Vec<(String, T)>,
    compiler: Arc<DsCompiler>,
}

impl<T: Ring> DsContext<T> {
    /// Create a context for derivatives up to `order`.
    ///
    /// Binding order defines the parameter index. A repeated name keeps its
    /// first position and takes the last value.
    pub fn new<I, S>(order: usize, bindings: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        let mut unique: Vec<(String, T)> = Vec::new();
        for (name, value) in bindings {
            let name = name.into();
            match unique.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => unique.push((name, value)),
            }
        }
        DsContext {
            order,
            compiler: compiler(unique.len(), order),
            bindings: unique,
        }
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of bound names.
    #[inline]
    pub fn free_parameters(&self) -> usize {
        self.bindings.len()
    }

    pub fn compiler(&self) -> &Arc<DsCompiler> {
        &self.compiler
    }

    /// Bound names, in parameter order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.bindings.iter().map(|(name, _)| name.as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.bindings.iter().position(|(n, _)| n == name)
    }

    /// The structure for free parameter `index`.
    pub fn variable(&self, index: usize) -> Result<DerivativeStructure<T>, DsError> {
        let (_, value) = self
            .bindings
            .get(index)
            .ok_or(DsError::ParameterOutOfRange {
                index,
                parameters: self.bindings.len(),
            })?;
        DerivativeStructure::variable_with(Arc::clone(&self.compiler), index, value.clone())
    }

    /// The structure for the parameter bound to `name`.
    pub fn bind(&self, name: &str) -> Result<DerivativeStructure<T>, DsError> {
        let index = self
            .position(name)
            .ok_or_else(|| DsError::UnknownVariable(name.to_owned()))?;
        self.variable(index)
    }

    /// Like [`bind`](Self::bind), returning `None` for unknown names.
    pub fn bind_or_none(&self, name: &str) -> Option<DerivativeStructure<T>> {
        self.bind(name).ok()
    }

    /// A constant over this context's parameters.
    pub fn constant(&self, value: T) -> DerivativeStructure<T> {
        DerivativeStructure::constant_with(Arc::clone(&self.compiler), value)
    }

    pub fn zero(&self) -> DerivativeStructure<T> {
        self.constant(T::zero())
    }

    pub fn one(&self) -> DerivativeStructure<T> {
        self.constant(T::one())
    }

    /// Mixed partial derivative of `ds` with respect to `names`.
    ///
    /// Each occurrence of a name adds one to its order, so `["x", "x", "y"]`
    /// reads `∂³/∂x²∂y`. An empty list returns the value.
    pub fn derivative(&self, ds: &DerivativeStructure<T>, names: &[&str]) -> Result<T, DsError> {
        if names.len() > self.order {
            return Err(DsError::OrderTooLarge {
                requested: names.len(),
                order: self.order,
            });
        }
        let mut orders = vec![0; self.bindings.len()];
        for name in names {
            let index = self
                .position(name)
                .ok_or_else(|| DsError::UnknownVariable((*name).to_owned()))?;
            orders[index] += 1;
        }
        ds.partial_derivative(&orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_order_defines_parameters() {
        let ctx = DsContext::new(1, [("y", 2.0), ("x", 3.0)]);
        assert_eq!(ctx.names().collect::<Vec<_>>(), ["y", "x"]);
        let x = ctx.bind("x").unwrap();
        assert_eq!(x.data(), &[3.0, 0.0, 1.0]);
        assert!(ctx.bind_or_none("z").is_none());
        assert_eq!(
            ctx.bind("z").unwrap_err(),
            DsError::UnknownVariable("z".to_owned())
        );
    }

    #[test]
    fn repeated_names_keep_last_value() {
        let ctx = DsContext::new(2, [("x", 1.0), ("x", 4.0)]);
        assert_eq!(ctx.free_parameters(), 1);
        assert_eq!(*ctx.bind("x").unwrap().value(), 4.0);
    }

    #[test]
    fn derivative_requests_are_validated() {
        let ctx = DsContext::new(1, [("x", 1.0)]);
        let x = ctx.bind("x").unwrap();
        assert_eq!(ctx.derivative(&x, &["x"]), Ok(1.0));
        assert_eq!(ctx.derivative(&x, &[]), Ok(1.0));
        assert_eq!(
            ctx.derivative(&x, &["x", "x"]),
            Err(DsError::OrderTooLarge {
                requested: 2,
                order: 1
            })
        );
        assert!(ctx.variable(1).is_err());
    }

    #[test]
    fn structures_share_the_context_compiler() {
        let ctx = DsContext::new(2, [("x", 1.0), ("y", 2.0)]);
        let x = ctx.bind("x").unwrap();
        let c = ctx.constant(3.0);
        assert!(Arc::ptr_eq(x.compiler(), ctx.compiler()));
        assert!(Arc::ptr_eq(c.compiler(), ctx.compiler()));
        assert!(Arc::ptr_eq(ctx.one().compiler(), ctx.compiler()));
        assert_eq!(x, DerivativeStructure::variable(2, 2, 0, 1.0).unwrap());
        assert_eq!(c, DerivativeStructure::constant(2, 2, 3.0));
    }
}
