//! Cache invalidation shared by topology structures.

/// Anything that caches derived topology (evaluation order, reachability, …)
/// should implement this.
pub trait InvalidateCache {
    /// Invalidate *all* internal caches so future queries recompute correctly.
    fn invalidate_cache(&mut self);
}
