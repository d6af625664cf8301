use super::DsCompiler;

/// One term of a product row: `coefficient · lhs[lhs] · rhs[rhs]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiplicationTerm {
    /// Number of merged Leibniz terms with this index pair.
    pub coefficient: u64,
    /// Flat index into the left operand.
    pub lhs: usize,
    /// Flat index into the right operand.
    pub rhs: usize,
}

/// Product rows (definition 3 in Kalman's paper).
///
/// Value rows are inherited. Each derivative row applies the product rule
/// once to every term of the derivative compiler's row: `∂(fg) = ∂f·g + f·∂g`,
/// where the undifferentiated factor is remapped through `lower` and the
/// differentiated one is shifted into the derivative part.
pub(super) fn compile_multiplication_indirection(
    value: Option<&DsCompiler>,
    derivative: Option<&DsCompiler>,
    lower: &[usize],
) -> Vec<Vec<MultiplicationTerm>> {
    let (Some(value), Some(derivative)) = (value, derivative) else {
        return vec![vec![MultiplicationTerm {
            coefficient: 1,
            lhs: 0,
            rhs: 0,
        }]];
    };

    let offset = value.mult_indirection.len();
    let mut rows = Vec::with_capacity(offset + derivative.mult_indirection.len());
    rows.extend(value.mult_indirection.iter().cloned());

    for derivative_row in &derivative.mult_indirection {
        let mut row = Vec::with_capacity(2 * derivative_row.len());
        for term in derivative_row {
            row.push(MultiplicationTerm {
                coefficient: term.coefficient,
                lhs: lower[term.lhs],
                rhs: offset + term.rhs,
            });
            row.push(MultiplicationTerm {
                coefficient: term.coefficient,
                lhs: offset + term.lhs,
                rhs: lower[term.rhs],
            });
        }
        rows.push(combine(row));
    }

    rows
}

/// Merge terms reading the same `(lhs, rhs)` pair, keeping first-seen order.
fn combine(mut row: Vec<MultiplicationTerm>) -> Vec<MultiplicationTerm> {
    let mut combined = Vec::with_capacity(row.len());
    for j in 0..row.len() {
        if row[j].coefficient == 0 {
            continue;
        }
        for k in j + 1..row.len() {
            if row[k].lhs == row[j].lhs && row[k].rhs == row[j].rhs {
                row[j].coefficient += row[k].coefficient;
                row[k].coefficient = 0;
            }
        }
        combined.push(row[j]);
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::super::tests::build_uncached;
    use super::*;

    fn term(coefficient: u64, lhs: usize, rhs: usize) -> MultiplicationTerm {
        MultiplicationTerm {
            coefficient,
            lhs,
            rhs,
        }
    }

    #[test]
    fn second_order_leibniz() {
        let c = build_uncached(1, 2);
        let rows = c.multiplication_rows();
        assert_eq!(rows[0], vec![term(1, 0, 0)]);
        assert_eq!(rows[1], vec![term(1, 0, 1), term(1, 1, 0)]);
        assert_eq!(rows[2], vec![term(1, 0, 2), term(2, 1, 1), term(1, 2, 0)]);
    }

    #[test]
    fn rows_pair_matching_orders() {
        // every term must split the output multi-index into two halves
        let c = build_uncached(3, 3);
        for (i, row) in c.multiplication_rows().iter().enumerate() {
            let target = c.to_orders(i).unwrap();
            for t in row {
                let l = c.to_orders(t.lhs).unwrap();
                let r = c.to_orders(t.rhs).unwrap();
                for p in 0..3 {
                    assert_eq!(l[p] + r[p], target[p]);
                }
            }
        }
    }

    #[test]
    fn coefficients_are_multinomial() {
        // Σ coefficients in row i is 2^|orders|
        let c = build_uncached(2, 4);
        for (i, row) in c.multiplication_rows().iter().enumerate() {
            let total: usize = c.to_orders(i).unwrap().iter().sum();
            let sum: u64 = row.iter().map(|t| t.coefficient).sum();
            assert_eq!(sum, 1 << total);
        }
    }
}
