//! Operation counting for comparing algorithms by cost.
//!
//! Every in-place ciphertext operation reports `(scheme, op)` into the
//! [`OpCounter`] the ciphertext was built with. Counters are explicit
//! handles; the process-wide one from [`OpCounter::global`] is what
//! ciphertexts use when no counter is given.

pub mod counter;
pub mod scope;

pub use counter::{OpCounter, OpCounts, SchemeCounts, normalize_op_name};
pub use scope::CounterScope;

/// Clears the process-wide counter.
pub fn reset_counters() {
    OpCounter::global().reset();
}

/// Starts a counting session on the process-wide counter.
pub fn scoped_counter() -> CounterScope<'static> {
    OpCounter::global().scope()
}
