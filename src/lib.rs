//! Table-driven multivariate derivative structures.
//!
//! A derivative structure stores a function value together with every
//! partial derivative up to order `N` with respect to `P` free parameters,
//! in one flat buffer. All index bookkeeping is precomputed once per
//! `(P, N)` by a [`DsCompiler`] and shared through [`compiler`]; arithmetic
//! and elementary functions then run as plain table-driven loops.
//!
//! ```
//! use dscomp::DerivativeStructure;
//!
//! // f(x, y) = x·y at (2, 3), second order
//! let x = DerivativeStructure::variable(2, 2, 0, 2.0).unwrap();
//! let y = DerivativeStructure::variable(2, 2, 1, 3.0).unwrap();
//! let f = &x * &y;
//! assert_eq!(*f.value(), 6.0);
//! assert_eq!(f.partial_derivative(&[1, 1]).unwrap(), 1.0);
//! ```

pub mod algebra;
mod cache;
pub mod compiler;
mod context;
mod ds_ops;
mod error;
mod expression;
mod structure;
mod traits;
pub mod univariate;

#[cfg(feature = "serde")]
mod serde_support;

pub use algebra::{
    AdditiveGroup, ElementaryField, ExponentialOps, Field, HyperbolicOps, PowerOps, Ring,
    TrigonometricOps,
};
pub use cache::{compiler, CompilerCache};
pub use compiler::{CompositionTerm, DsCompiler, MultiplicationTerm};
pub use context::DsContext;
pub use error::DsError;
pub use expression::DsExpression;
pub use structure::DerivativeStructure;

/// Derivative structure over `f64`.
pub type DerivativeStructure64 = DerivativeStructure<f64>;
/// Derivative structure over `f32`.
pub type DerivativeStructure32 = DerivativeStructure<f32>;
