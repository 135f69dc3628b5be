/// Resource limits to prevent abuse and enable predictable memory usage
///
/// The parser enforces the source limits itself. Proof search is never bounded by the
/// engine; the query limits are applied by callers through `SearchBudget`.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum statement size in bytes
    /// Real usage: ~100 bytes, Limit: 64KB
    pub max_source_bytes: usize,

    /// Maximum nesting depth of 「」 groups
    /// Real usage: ~2 levels, Limit: 64
    pub max_group_depth: usize,

    /// Maximum number of search steps spent on one query
    pub max_query_steps: u64,

    /// Maximum wall-clock time spent on one query in milliseconds
    pub max_query_time_ms: u64,

    /// Maximum number of solutions reported for one query by batch front ends
    pub max_solutions: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_source_bytes: 64 * 1024, // 64 KB
            max_group_depth: 64,
            max_query_steps: 1_000_000,
            max_query_time_ms: 1000, // 1 second
            max_solutions: 100,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
