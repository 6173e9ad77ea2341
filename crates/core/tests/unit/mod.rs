//! Test modules.

/// Boundary behavior: faults, structural starvation, tiny configurations.
pub mod boundaries;
/// Per-cycle invariant sweeps and determinism.
pub mod invariants;
/// Program file loading.
pub mod loader;
/// End-to-end scenarios with exact timestamp expectations.
pub mod scenarios;
