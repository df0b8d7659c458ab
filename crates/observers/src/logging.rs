use std::fmt::Debug;

use log::Level;
use recalc_core::Observer;

/// Logs every event it observes and never acts.
///
/// Events are written at the configured [`Level`] under the given target, so
/// a long integration can be silenced or routed independently of other logs.
#[derive(Debug, Clone)]
pub struct LogObserver {
    target: &'static str,
    level: Level,
}

impl LogObserver {
    /// Creates an observer that logs at `level` under `target`.
    #[must_use]
    pub fn new(target: &'static str, level: Level) -> Self {
        Self { target, level }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new("recalc::solver", Level::Trace)
    }
}

impl<E: Debug, A> Observer<E, A> for LogObserver {
    fn observe(&mut self, event: &E) -> Option<A> {
        log::log!(target: self.target, self.level, "{event:?}");
        None
    }
}
