//! Tomasulo out-of-order simulator library.
//!
//! This crate implements a cycle-accurate simulator of Tomasulo's scheduling
//! algorithm extended with a reorder buffer for in-order commit. It models:
//! 1. **Renaming:** Destination registers are renamed to ROB slots through a
//!    register alias table; consumers wait on ROB tags, not register names.
//! 2. **Reservation stations:** Four pools (ADD/SUB, MUL/DIV, LOAD, STORE)
//!    capture operand values or pending tags at issue.
//! 3. **Dynamic dispatch:** Ready stations execute with per-operation
//!    latency; any number may be in flight at once.
//! 4. **Single-writer CDB:** One completed instruction per cycle broadcasts
//!    its `(tag, value)` pair to every waiting station.
//! 5. **In-order commit:** Architectural registers and memory are only
//!    mutated when an instruction retires from the ROB head.

/// Common types (machine word, faults, parse errors).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// Simulator core (architectural state, pipeline structures, engine).
pub mod core;
/// Instruction set (operations, instruction records, text parser).
pub mod isa;
/// Program loading, top-level simulator, and status display.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
