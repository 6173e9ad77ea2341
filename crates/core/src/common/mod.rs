//! Common types shared across the simulator.
//!
//! This module collects the handful of definitions every other module needs:
//! 1. **Machine word:** The integer type architectural values are held in.
//! 2. **Errors:** Runtime faults and parse errors (see [`error`]).

/// Fault and parse-error definitions.
pub mod error;

pub use error::{Fault, ParseError};

/// The machine word: every register and memory cell holds one of these.
pub type Word = i64;
