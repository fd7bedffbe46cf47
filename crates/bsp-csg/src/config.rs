//! Static limits and policies for clipping.

/// Recursion ceiling for `clip_polygons` and `clip_to`.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Inputs larger than this are clipped in chunks of this size.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Node budget for the explicit-stack part of `clip_to`.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Where coplanar fragments go while clipping against a node's plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoplanarPolicy {
    /// Fragments facing the plane's normal are exterior (front);
    /// fragments facing away are sent to the back side.
    #[default]
    ByOrientation,
    /// Every coplanar fragment is treated as exterior (front).
    Exterior,
}

/// Configuration shared by all clip and boolean operations.
///
/// All values are fixed for the lifetime of a [`CsgService`](crate::CsgService);
/// nothing here is adjusted while an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsgConfig {
    /// Depth past which clipping stops recursing and passes polygons through.
    pub max_depth: usize,
    /// Chunk threshold (and chunk size) for `clip_polygons`.
    pub chunk_size: usize,
    /// Maximum number of nodes visited by the iterative `clip_to` fallback.
    pub max_iterations: usize,
    /// Coplanar fragment routing during clipping.
    ///
    /// [`CoplanarPolicy::Exterior`] merges both coplanar buckets into the
    /// front list; it keeps faces shared by both operands, so
    /// `subtract(a, a)` is not empty under it.
    pub coplanar: CoplanarPolicy,
}

impl Default for CsgConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            coplanar: CoplanarPolicy::default(),
        }
    }
}

impl CsgConfig {
    /// Sets the recursion ceiling.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the chunk threshold. Zero is treated as one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Sets the iteration budget of the explicit-stack `clip_to` traversal.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the coplanar routing policy.
    pub fn with_coplanar(mut self, coplanar: CoplanarPolicy) -> Self {
        self.coplanar = coplanar;
        self
    }

    /// Depth at which `clip_to` switches from recursion to an explicit stack.
    #[inline]
    pub fn iterative_threshold(&self) -> usize {
        self.max_depth / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_limits() {
        let config = CsgConfig::default();
        assert_eq!(config.max_depth, 50);
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.coplanar, CoplanarPolicy::ByOrientation);
        assert_eq!(config.iterative_threshold(), 25);
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let config = CsgConfig::default().with_chunk_size(0);
        assert_eq!(config.chunk_size, 1);
    }
}
