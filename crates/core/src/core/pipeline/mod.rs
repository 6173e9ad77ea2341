//! Pipeline structures: ROB, reservation stations, alias table, execution
//! tracker, CDB queue, and the engine that orchestrates them.

/// Common data bus queue.
pub mod cdb;
/// Per-cycle stage orchestration.
pub mod engine;
/// Execution countdown tracker.
pub mod exec;
/// Register alias table.
pub mod rat;
/// Reorder buffer.
pub mod rob;
/// Reservation stations.
pub mod station;
