//! Simulation utilities: program loading, the top-level simulator, and the
//! per-cycle status display.

/// Program file loading.
pub mod loader;
/// Top-level simulator.
pub mod simulator;
/// Status table rendering.
pub mod status;

pub use simulator::Simulator;
