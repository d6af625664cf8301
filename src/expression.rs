//! Differentiable expressions over named variables.

use crate::algebra::Ring;
use crate::context::DsContext;
use crate::error::DsError;
use crate::structure::DerivativeStructure;

/// A function of named variables, written once against a [`DsContext`] and
/// then evaluated or differentiated at arbitrary bindings.
///
/// ```
/// use dscomp::DsExpression;
///
/// let f = DsExpression::new(|ctx: &dscomp::DsContext<f64>| {
///     let x = ctx.bind("x")?;
///     let y = ctx.bind("y")?;
///     Ok(&(&x * &x) * &y)
/// });
/// let at = [("x", 3.0), ("y", 2.0)];
/// assert_eq!(f.evaluate(&at).unwrap(), 18.0);
/// assert_eq!(f.derivative(&["x", "y"], &at).unwrap(), 6.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DsExpression<F> {
    function: F,
}

impl<F> DsExpression<F> {
    pub fn new<T>(function: F) -> Self
    where
        T: Ring,
        F: Fn(&DsContext<T>) -> Result<DerivativeStructure<T>, DsError>,
    {
        DsExpression { function }
    }

    /// Value of the expression at `bindings`.
    pub fn evaluate<T>(&self, bindings: &[(&str, T)]) -> Result<T, DsError>
    where
        T: Ring,
        F: Fn(&DsContext<T>) -> Result<DerivativeStructure<T>, DsError>,
    {
        let ctx = DsContext::new(0, bindings.iter().cloned());
        let ds = (self.function)(&ctx)?;
        Ok(ds.value().clone())
    }

    /// Mixed partial derivative with respect to `names` at `bindings`.
    ///
    /// The expression is evaluated with order `names.len()`.
    pub fn derivative<T>(&self, names: &[&str], bindings: &[(&str, T)]) -> Result<T, DsError>
    where
        T: Ring,
        F: Fn(&DsContext<T>) -> Result<DerivativeStructure<T>, DsError>,
    {
        let ctx = DsContext::new(names.len(), bindings.iter().cloned());
        let ds = (self.function)(&ctx)?;
        ctx.derivative(&ds, names)
    }
}
