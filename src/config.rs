//! The small configuration surface carried regardless of the Non-goal that
//! excludes CLI parsing and build configuration (SPEC_FULL.md §10.3).

use std::time::Duration;

/// Run-scoped settings for [`crate::engine::Engine`].
///
/// Built with `RunConfig::default()` plus `with_*` calls, mirroring the
/// builder style the teacher crate uses for `BfsChecker::with_threads`.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// How often a spawned [`crate::report::StatsReporter`] polls and prints
    /// `get_stats()` while a run is in progress (spec §5: "order: one
    /// second").
    pub report_interval: Duration,

    /// An optional hard ceiling on Seen-Set size. `None` (the default) means
    /// unbounded, the behavior spec.md describes; a defensive backstop for
    /// callers that want one without relying solely on `satisfy_constraint`.
    pub max_states: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            report_interval: Duration::from_secs(1),
            max_states: None,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = Some(max_states);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_unbounded_with_one_second_cadence() {
        let config = RunConfig::default();
        assert_eq!(config.report_interval, Duration::from_secs(1));
        assert_eq!(config.max_states, None);
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = RunConfig::new()
            .with_report_interval(Duration::from_millis(250))
            .with_max_states(10);
        assert_eq!(config.report_interval, Duration::from_millis(250));
        assert_eq!(config.max_states, Some(10));
    }
}
