//! Error type shared by every fallible derivative-structure operation.

use std::fmt;

/// Usage errors detected while building, indexing or combining derivative
/// structures.
///
/// All of these are programmer errors: they are reported eagerly, before any
/// result buffer has been written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DsError {
    /// A multi-index or buffer does not have the expected length.
    DimensionMismatch {
        /// Length required by the compiler.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
    /// Two structures built for different `(parameters, order)` were combined.
    IncompatibleStructures {
        /// `(parameters, order)` of the left operand.
        left: (usize, usize),
        /// `(parameters, order)` of the right operand.
        right: (usize, usize),
    },
    /// The total derivation order of a multi-index exceeds the compiled order.
    OrderTooLarge {
        /// Sum of the requested orders.
        requested: usize,
        /// Compiled truncation order.
        order: usize,
    },
    /// A free-parameter index is not below the number of parameters.
    ParameterOutOfRange {
        /// Requested parameter.
        index: usize,
        /// Number of free parameters.
        parameters: usize,
    },
    /// A flat index is not below the structure size.
    IndexOutOfRange {
        /// Requested flat index.
        index: usize,
        /// Structure size.
        size: usize,
    },
    /// A variable name is not bound in the differentiation context.
    UnknownVariable(String),
}

impl fmt::Display for DsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DsError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected length {expected}, got {actual}")
            }
            DsError::IncompatibleStructures { left, right } => write!(
                f,
                "incompatible derivative structures: ({} parameters, order {}) and ({} parameters, order {})",
                left.0, left.1, right.0, right.1
            ),
            DsError::OrderTooLarge { requested, order } => {
                write!(f, "derivation order is too large: {requested} > {order}")
            }
            DsError::ParameterOutOfRange { index, parameters } => {
                write!(f, "free parameter index is too large: {index} >= {parameters}")
            }
            DsError::IndexOutOfRange { index, size } => {
                write!(f, "derivative index is too large: {index} >= {size}")
            }
            DsError::UnknownVariable(name) => {
                write!(f, "variable '{name}' is not bound in this context")
            }
        }
    }
}

impl std::error::Error for DsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_names_both_lengths() {
        let err = DsError::DimensionMismatch {
            expected: 6,
            actual: 5,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected length 6, got 5");
    }
}
