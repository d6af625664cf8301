use std::collections::HashMap;

use super::indexing::{convert_index, partial_derivative_index};
use super::DsCompiler;

/// One term of a composition row:
/// `coefficient · f[f_index] · Π operand[operands[j]]`.
///
/// `operands` is kept sorted so that equal products compare equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositionTerm {
    /// Number of merged Faà di Bruno terms with this shape.
    pub coefficient: u64,
    /// Derivative order of the outer function, i.e. the index into `f`.
    pub f_index: usize,
    /// Flat indices into the operand, one per factor of the product.
    pub operands: Vec<usize>,
}

/// Faà di Bruno rows for `(parameters, order)`.
///
/// Value rows are inherited verbatim. Each derivative row is obtained by
/// differentiating the matching row of the derivative compiler once with
/// respect to the last parameter. A term `p · f_k(g) · g_l1 · … · g_lm`
/// yields
/// - `p · f_(k+1)(g) · g_l1 · … · g_lm · ∂g`, and
/// - for every factor `g_lj`, the same term with that factor differentiated.
pub(super) fn compile_composition_indirection(
    parameters: usize,
    order: usize,
    value: Option<&DsCompiler>,
    derivative: Option<&DsCompiler>,
    sizes: &[Vec<usize>],
) -> Vec<Vec<CompositionTerm>> {
    let (Some(value), Some(derivative)) = (value, derivative) else {
        return vec![vec![CompositionTerm {
            coefficient: 1,
            f_index: 0,
            operands: Vec::new(),
        }]];
    };

    let mut rows = Vec::with_capacity(
        value.composition_indirection.len() + derivative.composition_indirection.len(),
    );
    rows.extend(value.composition_indirection.iter().cloned());

    // ∂g with respect to the new parameter
    let mut unit = vec![0; parameters];
    unit[parameters - 1] = 1;
    let first_derivative = partial_derivative_index(sizes, order, &unit);

    for derivative_row in &derivative.composition_indirection {
        let mut row = Vec::new();
        for term in derivative_row {
            // indices of the order N−1 layout, re-expressed in the order N one
            let converted: Vec<usize> = term
                .operands
                .iter()
                .map(|&j| convert_index(j, derivative, sizes, order))
                .collect();

            let mut operands = Vec::with_capacity(converted.len() + 1);
            operands.extend_from_slice(&converted);
            operands.push(first_derivative);
            operands.sort_unstable();
            row.push(CompositionTerm {
                coefficient: term.coefficient,
                f_index: term.f_index + 1,
                operands,
            });

            for (l, &j) in term.operands.iter().enumerate() {
                let mut orders = derivative.derivatives_indirection[j].clone();
                orders[parameters - 1] += 1;
                let mut operands = converted.clone();
                operands[l] = partial_derivative_index(sizes, order, &orders);
                operands.sort_unstable();
                row.push(CompositionTerm {
                    coefficient: term.coefficient,
                    f_index: term.f_index,
                    operands,
                });
            }
        }
        rows.push(combine(row));
    }

    rows
}

/// Merge terms with the same `(f_index, operands)` signature, keeping
/// first-seen order.
fn combine(row: Vec<CompositionTerm>) -> Vec<CompositionTerm> {
    let mut combined: Vec<CompositionTerm> = Vec::with_capacity(row.len());
    let mut seen: HashMap<(usize, Vec<usize>), usize> = HashMap::with_capacity(row.len());
    for term in row {
        let key = (term.f_index, term.operands.clone());
        if let Some(&position) = seen.get(&key) {
            combined[position].coefficient += term.coefficient;
        } else {
            seen.insert(key, combined.len());
            combined.push(term);
        }
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::super::tests::build_uncached;
    use super::*;

    fn term(coefficient: u64, f_index: usize, operands: &[usize]) -> CompositionTerm {
        CompositionTerm {
            coefficient,
            f_index,
            operands: operands.to_vec(),
        }
    }

    #[test]
    fn univariate_third_order() {
        // (f∘g)''' = f'''·g'^3 + 3·f''·g'·g'' + f'·g'''
        let c = build_uncached(1, 3);
        let rows = c.composition_rows();
        assert_eq!(rows[0], vec![term(1, 0, &[])]);
        assert_eq!(rows[1], vec![term(1, 1, &[1])]);
        assert_eq!(rows[2], vec![term(1, 2, &[1, 1]), term(1, 1, &[2])]);
        let mut third = rows[3].clone();
        third.sort_by_key(|t| t.f_index);
        assert_eq!(
            third,
            vec![term(1, 1, &[3]), term(3, 2, &[1, 2]), term(1, 3, &[1, 1, 1])]
        );
    }

    #[test]
    fn univariate_coefficients_sum_to_bell_numbers() {
        let bell = [1u64, 1, 2, 5, 15, 52, 203];
        let c = build_uncached(1, 6);
        for (k, row) in c.composition_rows().iter().enumerate() {
            let sum: u64 = row.iter().map(|t| t.coefficient).sum();
            assert_eq!(sum, bell[k], "order {k}");
        }
    }

    #[test]
    fn operand_orders_add_up() {
        // each term's operand multi-indices sum to the row's multi-index,
        // and f_index counts the operand factors
        let c = build_uncached(3, 3);
        for (i, row) in c.composition_rows().iter().enumerate() {
            let target = c.to_orders(i).unwrap();
            for t in row {
                assert_eq!(t.f_index, t.operands.len());
                let mut total = vec![0; 3];
                for &j in &t.operands {
                    assert_ne!(j, 0);
                    for (acc, o) in total.iter_mut().zip(c.to_orders(j).unwrap()) {
                        *acc += o;
                    }
                }
                assert_eq!(total, target);
            }
        }
    }
}
