//! Simulator: owns the configuration and the hierarchy it was built from.
//!
//! Events are applied one at a time; each read or write runs to completion,
//! including any nested requests to lower levels, before the next one starts.

use tracing::{debug, info};

use crate::common::{ConfigError, TraceError};
use crate::config::Config;
use crate::core::CacheHierarchy;
use crate::sim::trace::TraceEvent;
use crate::stats::SimStats;

/// Trace-driven cache hierarchy simulator.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    hierarchy: CacheHierarchy,
    events: u64,
}

impl Simulator {
    /// Validates `config` and builds its hierarchy.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] describing the first inconsistency found.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let hierarchy = CacheHierarchy::new(&config)?;
        debug!(
            levels = hierarchy.levels().count(),
            terminal = hierarchy.terminal().level(),
            "hierarchy built"
        );
        Ok(Self {
            config,
            hierarchy,
            events: 0,
        })
    }

    /// Applies a single event.
    pub fn step(&mut self, event: TraceEvent) {
        self.hierarchy.access(event.kind, event.address);
        self.events += 1;
    }

    /// Applies every event in order.
    pub fn run(&mut self, events: impl IntoIterator<Item = TraceEvent>) {
        for event in events {
            self.step(event);
        }
        info!(events = self.events, "trace replayed");
    }

    /// Applies events from a fallible source, stopping at the first error.
    ///
    /// Events before the failing one have already been applied.
    ///
    /// # Errors
    ///
    /// Returns the first [`TraceError`] yielded by `events`.
    pub fn try_run(
        &mut self,
        events: impl IntoIterator<Item = Result<TraceEvent, TraceError>>,
    ) -> Result<(), TraceError> {
        for event in events {
            self.step(event?);
        }
        info!(events = self.events, "trace replayed");
        Ok(())
    }

    /// Configuration the hierarchy was built from.
    #[inline]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The simulated hierarchy.
    #[inline]
    pub const fn hierarchy(&self) -> &CacheHierarchy {
        &self.hierarchy
    }

    /// Number of events applied so far.
    #[inline]
    pub const fn events(&self) -> u64 {
        self.events
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> SimStats {
        SimStats::collect(&self.hierarchy)
    }
}
