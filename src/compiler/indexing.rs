use super::DsCompiler;

/// Flat index of a multi-index, without validation.
///
/// Walks the parameters from last to first. Each unit of derivation with
/// respect to parameter `i` skips the value part of the current substructure
/// (`sizes[i][m]` elements) and descends into its derivative part, whose
/// order budget `m` is one lower.
///
/// Callers guarantee `orders.len() == sizes.len() - 1` and
/// `orders.iter().sum() <= order`.
pub(super) fn partial_derivative_index(sizes: &[Vec<usize>], order: usize, orders: &[usize]) -> usize {
    let mut index = 0;
    let mut m = order;
    for (i, &derivative_order) in orders.iter().enumerate().rev() {
        for _ in 0..derivative_order {
            index += sizes[i][m];
            m -= 1;
        }
    }
    index
}

/// Index of an entry of a lower-order structure inside a structure with the
/// same number of parameters and order `order`.
pub(super) fn convert_index(
    index: usize,
    source: &DsCompiler,
    sizes: &[Vec<usize>],
    order: usize,
) -> usize {
    partial_derivative_index(sizes, order, &source.derivatives_indirection[index])
}

/// Inverse table: flat index → per-parameter orders.
///
/// Value-part entries are the value compiler's multi-indices with a trailing
/// zero; derivative-part entries are the derivative compiler's multi-indices
/// with the last order incremented.
pub(super) fn compile_derivatives_indirection(
    parameters: usize,
    value: Option<&DsCompiler>,
    derivative: Option<&DsCompiler>,
) -> Vec<Vec<usize>> {
    let (Some(value), Some(derivative)) = (value, derivative) else {
        return vec![vec![0; parameters]];
    };

    let mut indirection = Vec::with_capacity(
        value.derivatives_indirection.len() + derivative.derivatives_indirection.len(),
    );

    for orders in &value.derivatives_indirection {
        let mut row = Vec::with_capacity(parameters);
        row.extend_from_slice(orders);
        row.push(0);
        indirection.push(row);
    }

    for orders in &derivative.derivatives_indirection {
        let mut row = orders.clone();
        row[parameters - 1] += 1;
        indirection.push(row);
    }

    indirection
}
