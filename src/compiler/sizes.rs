use super::DsCompiler;

/// Size table for `(parameters, order)`.
///
/// `sizes[p][o] = sizes[p][o−1] + sizes[p−1][o]`: a structure is its value
/// part (one fewer parameter) followed by its derivative part (one lower
/// order). Rows `0..parameters` are copied from the value compiler.
pub(super) fn compile_sizes(
    parameters: usize,
    order: usize,
    value: Option<&DsCompiler>,
) -> Vec<Vec<usize>> {
    let Some(value) = value else {
        return vec![vec![1; order + 1]];
    };

    let mut sizes = Vec::with_capacity(parameters + 1);
    sizes.extend(value.sizes.iter().take(parameters).cloned());

    let previous = &sizes[parameters - 1];
    let mut row = Vec::with_capacity(order + 1);
    row.push(1);
    for o in 1..=order {
        row.push(row[o - 1] + previous[o]);
    }
    sizes.push(row);
    sizes
}

/// Structure size `C(parameters + order, parameters)` without building any
/// table, or `None` if it does not fit in `usize`.
pub(crate) fn structure_size(parameters: usize, order: usize) -> Option<usize> {
    let n = parameters.checked_add(order)?;
    let k = parameters.min(order);
    // after step i the accumulator is C(n, i + 1), so every division is exact
    (0..k).try_fold(1usize, |acc, i| Some(acc.checked_mul(n - i)? / (i + 1)))
}

#[cfg(test)]
mod tests {
    use super::super::tests::build_uncached;
    use super::structure_size;

    fn binomial(n: usize, k: usize) -> usize {
        (1..=k).fold(1, |acc, i| acc * (n + 1 - i) / i)
    }

    #[test]
    fn recurrence_holds() {
        let c = build_uncached(4, 5);
        let sizes = c.sizes();
        assert_eq!(sizes.len(), 5);
        for row in sizes {
            assert_eq!(row.len(), 6);
        }
        for o in 0..=5 {
            assert_eq!(sizes[0][o], 1);
        }
        for p in 1..=4 {
            assert_eq!(sizes[p][0], 1);
            for o in 1..=5 {
                assert_eq!(sizes[p][o], sizes[p][o - 1] + sizes[p - 1][o]);
            }
        }
    }

    #[test]
    fn sizes_are_binomial() {
        // multi-indices of p parameters with total order <= o: C(p + o, p)
        let c = build_uncached(3, 4);
        for p in 0..=3 {
            for o in 0..=4 {
                assert_eq!(c.sizes()[p][o], binomial(p + o, p), "p={p} o={o}");
            }
        }
    }

    #[test]
    fn closed_form_matches_tables() {
        for p in 0..=4 {
            for o in 0..=4 {
                assert_eq!(structure_size(p, o), Some(build_uncached(p, o).size()));
            }
        }
        assert_eq!(structure_size(7, 9), Some(11440));
        assert_eq!(structure_size(50, 50), None);
        assert_eq!(structure_size(usize::MAX, 1), None);
        assert_eq!(structure_size(usize::MAX, 0), Some(1));
    }

    #[test]
    fn zero_parameters_is_all_ones() {
        let c = build_uncached(0, 6);
        assert_eq!(c.sizes(), &[vec![1; 7]]);
    }
}
