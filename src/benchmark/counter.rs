use super::scope::CounterScope;
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::trace;

/// Op name -> count for a single scheme.
pub type SchemeCounts = BTreeMap<String, u64>;
/// Scheme name -> op counts, e.g. `{"CKKS": {"add": 5, "mul": 2}}`.
pub type OpCounts = BTreeMap<String, SchemeCounts>;

static GLOBAL: OnceLock<OpCounter> = OnceLock::new();

/// Shared handle to an operation count table.
///
/// Clones point at the same table, so a ciphertext and all of its copies
/// report into the counter they were built with. Independent counters
/// (`OpCounter::new`) never see each other's operations.
#[derive(Debug, Clone, Default)]
pub struct OpCounter {
    inner: Arc<Mutex<OpCounts>>,
}

impl OpCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide counter, created on first use.
    pub fn global() -> &'static OpCounter {
        GLOBAL.get_or_init(OpCounter::new)
    }

    // A panic while holding the lock can't leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, OpCounts> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Increments the count of `op` for `scheme`.
    ///
    /// In-place and copying forms of an operation count as the same op:
    /// `add_`, `add_assign` and `add` are all recorded as `add`.
    pub fn record(&self, scheme: &str, op: &str) {
        let op = normalize_op_name(op);
        let mut counts = self.lock();
        let count = counts
            .entry(scheme.to_owned())
            .or_default()
            .entry(op.to_owned())
            .or_insert(0);
        *count += 1;
        trace!(scheme, op, count = *count, "recorded operation");
    }

    pub fn count(&self, scheme: &str, op: &str) -> u64 {
        self.lock()
            .get(scheme)
            .and_then(|ops| ops.get(normalize_op_name(op)))
            .copied()
            .unwrap_or(0)
    }

    /// Snapshot of the current counts.
    pub fn counts(&self) -> OpCounts {
        self.lock().clone()
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Installs `counts` as the current table and returns the previous one.
    pub(crate) fn replace(&self, counts: OpCounts) -> OpCounts {
        std::mem::replace(&mut *self.lock(), counts)
    }

    /// Starts a counting session, see [`CounterScope`].
    pub fn scope(&self) -> CounterScope<'_> {
        CounterScope::new(self)
    }

    /// Renders the per-scheme report of the current counts.
    pub fn report(&self) -> String {
        render_report(&self.lock())
    }

    pub fn ptr_eq(&self, other: &OpCounter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for OpCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}

pub fn normalize_op_name(op: &str) -> &str {
    op.strip_suffix("_assign").unwrap_or(op).trim_end_matches('_')
}

pub(crate) fn render_report(counts: &OpCounts) -> String {
    let mut out = String::new();
    for (scheme, ops) in counts.iter().filter(|(_, ops)| !ops.is_empty()) {
        // writing into a String can't fail
        let _ = writeln!(out, "========= {scheme} =========");
        for (op, count) in ops {
            let _ = writeln!(out, "{op}: {count}");
        }
    }
    out
}
