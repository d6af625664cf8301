use super::DsCompiler;

/// Positions of the order-`N−1` substructure inside the order-`N` structure
/// (definition 6 in Kalman's paper).
///
/// The value compiler's table is reused as-is, the derivative compiler's
/// entries are shifted past the value part.
pub(super) fn compile_lower_indirection(
    order: usize,
    value: Option<&DsCompiler>,
    derivative: Option<&DsCompiler>,
) -> Vec<usize> {
    match (value, derivative) {
        (Some(value), Some(derivative)) if order > 1 => {
            let offset = value.size();
            let mut lower = Vec::with_capacity(
                value.lower_indirection.len() + derivative.lower_indirection.len(),
            );
            lower.extend_from_slice(&value.lower_indirection);
            lower.extend(derivative.lower_indirection.iter().map(|&i| offset + i));
            lower
        }
        _ => vec![0],
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::build_uncached;

    #[test]
    fn lower_indirection_selects_lower_orders() {
        for p in 1..=3 {
            for o in 1..=4 {
                let c = build_uncached(p, o);
                let lower = build_uncached(p, o - 1);
                assert_eq!(c.lower_indirection().len(), lower.size());
                for (i, &j) in c.lower_indirection().iter().enumerate() {
                    assert_eq!(lower.to_orders(i).unwrap(), c.to_orders(j).unwrap());
                }
            }
        }
    }

    #[test]
    fn base_cases() {
        assert_eq!(build_uncached(0, 3).lower_indirection(), &[0]);
        assert_eq!(build_uncached(3, 1).lower_indirection(), &[0]);
    }
}
