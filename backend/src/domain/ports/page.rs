//! Bounded window over a listing query.

/// Limit/offset pair applied to every listing operation.
///
/// Limits are clamped to `MAX_LIMIT` so a single request can never drag an
/// unbounded result set through the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of rows to return.
    pub limit: i64,
    /// Number of rows to skip.
    pub offset: i64,
}

impl Page {
    /// Rows returned when the caller does not ask for a limit.
    pub const DEFAULT_LIMIT: i64 = 50;
    /// Upper bound on any requested limit.
    pub const MAX_LIMIT: i64 = 200;

    /// Build a page from optional caller-supplied values, clamping both to
    /// sane bounds.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);
        Self { limit, offset }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
