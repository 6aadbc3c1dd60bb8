use super::counter::{OpCounter, OpCounts};
use tracing::debug;

/// Counting session over an [`OpCounter`].
///
/// Creating the scope stashes the counter's current totals and starts it
/// from zero. When the scope ends the report of everything counted inside it
/// is printed to stdout and the stashed totals are put back, so sessions
/// never leak into each other. Nested scopes over the same counter work like
/// a stack.
///
/// ```
/// use he_sim::{Ciphertext, CkksCiphertext, OpCounter};
///
/// let counter = OpCounter::new();
/// {
///     let _scope = counter.scope();
///     let ct = CkksCiphertext::builder()
///         .counter(counter.clone())
///         .build(&[1.0, 2.0, 3.0])
///         .unwrap();
///     ct.rotate(1);
/// } // prints "========= CKKS =========\nrotate: 1\n"
/// assert_eq!(counter.count("CKKS", "rotate"), 0);
/// ```
#[must_use = "the session ends as soon as the scope is dropped"]
pub struct CounterScope<'a> {
    counter: &'a OpCounter,
    saved: Option<OpCounts>,
}

impl<'a> CounterScope<'a> {
    pub(crate) fn new(counter: &'a OpCounter) -> Self {
        let saved = counter.replace(OpCounts::new());
        debug!(saved_schemes = saved.len(), "entering counter scope");
        Self {
            counter,
            saved: Some(saved),
        }
    }

    pub fn counter(&self) -> &OpCounter {
        self.counter
    }

    /// Report of the operations counted so far in this session.
    pub fn report(&self) -> String {
        self.counter.report()
    }

    /// Ends the session without printing and returns its report.
    pub fn finish(mut self) -> String {
        let report = self.report();
        self.restore();
        report
    }

    fn restore(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.counter.replace(saved);
            debug!("restored counts after counter scope");
        }
    }
}

impl Drop for CounterScope<'_> {
    fn drop(&mut self) {
        if self.saved.is_some() {
            print!("{}", self.report());
            self.restore();
        }
    }
}
