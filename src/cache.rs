//! Compute-once registry of [`DsCompiler`] instances.
//!
//! Compilers form a 2-D arena indexed by `(parameters, order)`. Building
//! `(P, N)` needs `(P−1, N)` and `(P, N−1)`, so missing cells are filled in
//! increasing diagonal order `p + o`: every dependency exists before use and
//! no compiler is ever built twice.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use log::{debug, trace};

use crate::compiler::DsCompiler;

/// Rectangular arena of compilers: `grid[p][o]` for every `p ≤ P`, `o ≤ N`
/// requested so far.
#[derive(Debug, Default)]
pub struct CompilerCache {
    grid: Vec<Vec<Arc<DsCompiler>>>,
}

impl CompilerCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        CompilerCache { grid: Vec::new() }
    }

    /// Largest `(parameters, order)` rectangle built so far, if any.
    pub fn extent(&self) -> Option<(usize, usize)> {
        let columns = self.grid.first()?.len();
        Some((self.grid.len() - 1, columns - 1))
    }

    /// Return the compiler for `(parameters, order)`, building it and all of
    /// its missing dependencies on first request.
    pub fn get_or_build(&mut self, parameters: usize, order: usize) -> Arc<DsCompiler> {
        if let Some(compiler) = self.grid.get(parameters).and_then(|row| row.get(order)) {
            return Arc::clone(compiler);
        }

        let (old_parameters, old_order) = self.extent().unwrap_or((0, 0));
        let max_parameters = parameters.max(old_parameters);
        let max_order = order.max(old_order);
        debug!(
            "growing derivative compiler cache to {} parameters, order {}",
            max_parameters, max_order
        );

        for diagonal in 0..=max_parameters + max_order {
            for o in diagonal.saturating_sub(max_parameters)..=max_order.min(diagonal) {
                let p = diagonal - o;
                if p == self.grid.len() {
                    self.grid.push(Vec::with_capacity(max_order + 1));
                }
                // (p, o − 1) sits on the previous diagonal, so row p is
                // either complete up to o or already holds (p, o)
                if o < self.grid[p].len() {
                    continue;
                }

                let value = (p > 0).then(|| Arc::clone(&self.grid[p - 1][o]));
                let derivative = (o > 0).then(|| Arc::clone(&self.grid[p][o - 1]));
                let compiler = DsCompiler::build(p, o, value.as_deref(), derivative.as_deref());
                trace!(
                    "compiled ({}, {}): size {}, {} product terms, {} composition terms",
                    p,
                    o,
                    compiler.size(),
                    compiler.multiplication_rows().iter().map(Vec::len).sum::<usize>(),
                    compiler.composition_rows().iter().map(Vec::len).sum::<usize>(),
                );
                self.grid[p].push(Arc::new(compiler));
            }
        }

        Arc::clone(&self.grid[parameters][order])
    }
}

static CACHE: OnceLock<Mutex<CompilerCache>> = OnceLock::new();

/// Shared compiler for `parameters` free parameters and truncation `order`.
///
/// Compilers are built at most once per process and shared read-only; the
/// returned handle is cheap to clone and safe to send across threads.
///
/// ```
/// let c = dscomp::compiler(2, 1);
/// assert_eq!(c.size(), 3);
/// assert_eq!(c.to_index(&[0, 1]).unwrap(), 2);
/// ```
pub fn compiler(parameters: usize, order: usize) -> Arc<DsCompiler> {
    let cache = CACHE.get_or_init(|| Mutex::new(CompilerCache::new()));
    // building never leaves the grid half-updated, so a poisoned lock is usable
    let mut guard = cache.lock().unwrap_or_else(PoisonError::into_inner);
    guard.get_or_build(parameters, order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_each_pair_once() {
        let mut cache = CompilerCache::new();
        let a = cache.get_or_build(2, 3);
        let b = cache.get_or_build(2, 3);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.extent(), Some((2, 3)));

        // dependencies are already there
        let value = cache.get_or_build(1, 3);
        let again = cache.get_or_build(1, 3);
        assert!(Arc::ptr_eq(&value, &again));
        assert_eq!(cache.extent(), Some((2, 3)));
    }

    #[test]
    fn grows_in_both_directions() {
        let mut cache = CompilerCache::new();
        let small = cache.get_or_build(1, 1);
        let tall = cache.get_or_build(4, 0);
        let wide = cache.get_or_build(0, 5);
        assert_eq!(cache.extent(), Some((4, 5)));
        assert!(Arc::ptr_eq(&small, &cache.get_or_build(1, 1)));
        assert_eq!(tall.size(), 1);
        assert_eq!(wide.size(), 1);
        assert_eq!(cache.get_or_build(4, 5).size(), 126);
    }

    #[test]
    fn global_cache_shares_instances() {
        let a = compiler(3, 2);
        let b = compiler(3, 2);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.free_parameters(), 3);
        assert_eq!(a.order(), 2);
        assert_eq!(a.size(), 10);
    }

    #[test]
    fn concurrent_requests_agree() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| compiler(4, 3)))
            .collect();
        let compilers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for c in &compilers[1..] {
            assert!(Arc::ptr_eq(&compilers[0], c));
        }
    }
}
