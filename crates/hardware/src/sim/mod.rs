//! Trace replay and reporting.
//!
//! Everything the driver needs around the core:
//! 1. **Trace:** Reading `<r|w> <hex address>` request lines.
//! 2. **Simulator:** Building the hierarchy and replaying events strictly in order.
//! 3. **Report:** Rendering the configuration banner, cache contents, and measurements.

/// Final report rendering.
pub mod report;

/// Trace-driven simulator.
pub mod simulator;

/// Memory reference trace parsing.
pub mod trace;

pub use report::Report;
pub use simulator::Simulator;
pub use trace::{TraceEvent, TraceReader, read_trace};
