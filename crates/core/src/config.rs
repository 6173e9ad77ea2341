//! Configuration system for the Tomasulo simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (station pools, ROB size,
//!    latencies, architectural state).
//! 2. **Structures:** Hierarchical config for general, pipeline, latency, and
//!    architectural settings.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or use
//! `Config::default()`.

use serde::Deserialize;

use crate::common::Word;
use crate::isa::Op;

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of ADD/SUB reservation stations.
    pub const ADD_SUB_STATIONS: usize = 3;

    /// Number of MUL/DIV reservation stations.
    pub const MUL_DIV_STATIONS: usize = 2;

    /// Number of LOAD reservation stations.
    pub const LOAD_STATIONS: usize = 3;

    /// Number of STORE reservation stations.
    pub const STORE_STATIONS: usize = 3;

    /// Reorder buffer capacity in entries.
    pub const ROB_ENTRIES: usize = 16;

    /// ADD/SUB execution latency in cycles.
    pub const ADD_SUB_LATENCY: u64 = 2;

    /// MUL execution latency in cycles.
    pub const MUL_LATENCY: u64 = 10;

    /// DIV execution latency in cycles.
    pub const DIV_LATENCY: u64 = 40;

    /// LOAD execution latency in cycles.
    pub const LOAD_LATENCY: u64 = 2;

    /// STORE execution latency in cycles.
    pub const STORE_LATENCY: u64 = 2;

    /// Number of pre-populated architectural registers (`F0`..`F31`).
    pub const REGISTER_COUNT: usize = 32;

    /// Initial value of every pre-populated register.
    pub const REGISTER_INIT: i64 = 10;

    /// Data memory size in machine words. Memory is initialized so that
    /// `MEM[i] = i`.
    pub const MEMORY_WORDS: usize = 1024;
}

/// Root configuration structure containing all simulator settings.
///
/// Every section and field is optional in the JSON form; omitted fields take
/// the built-in defaults.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use tomasulo_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.pipeline.rob_entries, 16);
/// assert_eq!(config.latency.div, 40);
/// ```
///
/// Deserializing from JSON (typical `--config` usage):
///
/// ```
/// use tomasulo_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace": true },
///     "pipeline": {
///         "rob_entries": 8,
///         "add_sub_stations": 1,
///         "mul_div_stations": 2,
///         "load_stations": 2,
///         "store_stations": 2
///     },
///     "latency": { "mul": 4 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.pipeline.rob_entries, 8);
/// assert_eq!(config.latency.mul, 4);
/// assert_eq!(config.latency.div, 40);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Station pool and reorder buffer sizing.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Per-operation execution latencies.
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Architectural register file and memory sizing.
    #[serde(default)]
    pub arch: ArchConfig,
}

impl Config {
    /// Parses a configuration from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Enable per-stage trace output to stderr.
    #[serde(default)]
    pub trace: bool,
}

/// Station pool and reorder buffer sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Number of ADD/SUB reservation stations.
    #[serde(default = "PipelineConfig::default_add_sub")]
    pub add_sub_stations: usize,

    /// Number of MUL/DIV reservation stations.
    #[serde(default = "PipelineConfig::default_mul_div")]
    pub mul_div_stations: usize,

    /// Number of LOAD reservation stations.
    #[serde(default = "PipelineConfig::default_load")]
    pub load_stations: usize,

    /// Number of STORE reservation stations.
    #[serde(default = "PipelineConfig::default_store")]
    pub store_stations: usize,

    /// Reorder buffer capacity in entries.
    #[serde(default = "PipelineConfig::default_rob")]
    pub rob_entries: usize,
}

impl PipelineConfig {
    fn default_add_sub() -> usize {
        defaults::ADD_SUB_STATIONS
    }

    fn default_mul_div() -> usize {
        defaults::MUL_DIV_STATIONS
    }

    fn default_load() -> usize {
        defaults::LOAD_STATIONS
    }

    fn default_store() -> usize {
        defaults::STORE_STATIONS
    }

    fn default_rob() -> usize {
        defaults::ROB_ENTRIES
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            add_sub_stations: defaults::ADD_SUB_STATIONS,
            mul_div_stations: defaults::MUL_DIV_STATIONS,
            load_stations: defaults::LOAD_STATIONS,
            store_stations: defaults::STORE_STATIONS,
            rob_entries: defaults::ROB_ENTRIES,
        }
    }
}

/// Per-operation execution latencies in cycles.
#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    /// ADD and SUB latency.
    #[serde(default = "LatencyConfig::default_add_sub")]
    pub add_sub: u64,

    /// MUL latency.
    #[serde(default = "LatencyConfig::default_mul")]
    pub mul: u64,

    /// DIV latency.
    #[serde(default = "LatencyConfig::default_div")]
    pub div: u64,

    /// LOAD latency.
    #[serde(default = "LatencyConfig::default_load")]
    pub load: u64,

    /// STORE latency.
    #[serde(default = "LatencyConfig::default_store")]
    pub store: u64,
}

impl LatencyConfig {
    fn default_add_sub() -> u64 {
        defaults::ADD_SUB_LATENCY
    }

    fn default_mul() -> u64 {
        defaults::MUL_LATENCY
    }

    fn default_div() -> u64 {
        defaults::DIV_LATENCY
    }

    fn default_load() -> u64 {
        defaults::LOAD_LATENCY
    }

    fn default_store() -> u64 {
        defaults::STORE_LATENCY
    }

    /// Returns the execution latency for an operation, clamped to at least
    /// one cycle.
    pub fn for_op(&self, op: Op) -> u64 {
        let cycles = match op {
            Op::Add | Op::Sub => self.add_sub,
            Op::Mul => self.mul,
            Op::Div => self.div,
            Op::Load => self.load,
            Op::Store => self.store,
        };
        cycles.max(1)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            add_sub: defaults::ADD_SUB_LATENCY,
            mul: defaults::MUL_LATENCY,
            div: defaults::DIV_LATENCY,
            load: defaults::LOAD_LATENCY,
            store: defaults::STORE_LATENCY,
        }
    }
}

/// Architectural register file and memory sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchConfig {
    /// Number of pre-populated registers, named `F0`..`F{n-1}`.
    #[serde(default = "ArchConfig::default_registers")]
    pub registers: usize,

    /// Initial value of every pre-populated register.
    #[serde(default = "ArchConfig::default_register_init")]
    pub register_init: Word,

    /// Data memory size in machine words.
    #[serde(default = "ArchConfig::default_memory_words")]
    pub memory_words: usize,
}

impl ArchConfig {
    fn default_registers() -> usize {
        defaults::REGISTER_COUNT
    }

    fn default_register_init() -> Word {
        defaults::REGISTER_INIT
    }

    fn default_memory_words() -> usize {
        defaults::MEMORY_WORDS
    }
}

impl Default for ArchConfig {
    fn default() -> Self {
        Self {
            registers: defaults::REGISTER_COUNT,
            register_init: defaults::REGISTER_INIT,
            memory_words: defaults::MEMORY_WORDS,
        }
    }
}
