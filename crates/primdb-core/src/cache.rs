//! Select result cache.
//!
//! Memoizes filtered row lists per table under a fingerprint built from the
//! row-collection size and the filter text. There is no eviction, capacity
//! bound or expiry; entries live as long as the cache does.

use crate::query::FilterClause;
use crate::row::Row;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Fingerprint text used when a select has no filter.
pub const NO_FILTER: &str = "no_where";

/// How the cache reacts to writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Drop a table's entries after every successful write to it.
    #[default]
    InvalidateOnWrite,
    /// Never drop entries. An update keeps the row count unchanged, so a
    /// repeated select returns the pre-update rows: read-your-writes is not
    /// guaranteed under this policy.
    Unchecked,
}

/// Cache key for one select.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Builds `select_<rows>_rows_<filter>`.
    pub fn new(row_count: usize, filter: Option<&FilterClause>) -> Self {
        let filter = filter.map_or_else(|| NO_FILTER.to_string(), ToString::to_string);
        Fingerprint(format!("select_{}_rows_{}", row_count, filter))
    }

    /// The textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cache statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that ran the scan
    pub misses: u64,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Per-table memo of select results.
#[derive(Debug, Default)]
pub struct ResultCache {
    policy: CachePolicy,
    tables: HashMap<String, HashMap<Fingerprint, Vec<Row>>>,
    stats: CacheStats,
}

impl ResultCache {
    /// Creates an empty cache with the given policy.
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Returns the cached rows for `fingerprint`, or runs `compute`, stores
    /// and returns its result.
    pub fn get<F>(&mut self, table: &str, fingerprint: Fingerprint, compute: F) -> Vec<Row>
    where
        F: FnOnce() -> Vec<Row>,
    {
        if let Some(rows) = self.tables.get(table).and_then(|t| t.get(&fingerprint)) {
            self.stats.hits += 1;
            debug!(table, key = %fingerprint, "cache hit");
            return rows.clone();
        }

        self.stats.misses += 1;
        debug!(table, key = %fingerprint, "cache miss");
        let rows = compute();
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(fingerprint, rows.clone());
        rows
    }

    /// Write hook: drops the table's entries unless the policy is
    /// [`CachePolicy::Unchecked`].
    pub fn on_write(&mut self, table: &str) {
        if self.policy == CachePolicy::InvalidateOnWrite {
            self.invalidate(table);
        }
    }

    /// Drops every entry for `table` regardless of policy.
    pub fn invalidate(&mut self, table: &str) {
        if self.tables.remove(table).is_some() {
            debug!(table, "cache invalidated");
        }
    }

    /// Number of cached results across all tables.
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The active policy.
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Hit and miss counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
