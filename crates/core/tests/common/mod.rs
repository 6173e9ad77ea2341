//! Shared test infrastructure.
//!
//! Helpers for constructing simulators from instruction source text, driving
//! them to completion with a runaway guard, and asserting the structural
//! invariants that must hold at every cycle boundary.

use tomasulo_core::config::Config;
use tomasulo_core::core::pipeline::rob::RobState;
use tomasulo_core::sim::loader::parse_program;
use tomasulo_core::Simulator;

/// Builds a simulator from source text with the default configuration.
pub fn sim_from_source(source: &str) -> Simulator {
    sim_with_config(source, &Config::default())
}

/// Builds a simulator from source text with a custom configuration.
pub fn sim_with_config(source: &str, config: &Config) -> Simulator {
    Simulator::new(parse_program(source), config)
}

/// Runs the simulator until done and returns the final cycle count. Panics
/// if the pipeline fails to drain within a generous cycle limit.
pub fn run_to_completion(sim: &mut Simulator) -> u64 {
    let mut guard = 0;
    while !sim.done() {
        sim.step();
        guard += 1;
        assert!(guard < 100_000, "pipeline did not drain");
    }
    sim.cycle()
}

/// Returns the four timestamps of an instruction, all of which must be set.
pub fn timestamps(sim: &Simulator, idx: usize) -> (u64, u64, u64, u64) {
    let inst = &sim.program.insts[idx];
    (
        inst.issue.expect("issue timestamp"),
        inst.exec_comp.expect("exec_comp timestamp"),
        inst.write_result.expect("write_result timestamp"),
        inst.commit.expect("commit timestamp"),
    )
}

/// Asserts the structural invariants that hold at every cycle boundary:
///
/// 1. Every busy station's pending tags point at busy ROB entries.
/// 2. ROB entries are busy exactly when their state is not `Empty`, and free
///    slots plus busy entries equal the capacity.
/// 3. Every pending alias table entry points at a busy ROB entry.
pub fn check_invariants(sim: &Simulator) {
    let rob = &sim.engine.rob;

    for (kind, idx, st) in sim.engine.stations.iter() {
        if !st.busy {
            continue;
        }
        if let Some(tag) = st.qj {
            assert!(
                rob.get(tag).busy,
                "{} station {} qj tag {} points at a free ROB entry",
                kind, idx, tag
            );
        }
        if let Some(tag) = st.qk {
            assert!(
                rob.get(tag).busy,
                "{} station {} qk tag {} points at a free ROB entry",
                kind, idx, tag
            );
        }
    }

    let mut busy = 0;
    for entry in rob.slots() {
        assert_eq!(entry.busy, entry.state != RobState::Empty);
        if entry.busy {
            busy += 1;
        }
    }
    assert_eq!(rob.available() + busy, rob.capacity());

    for (reg, producer) in sim.engine.rat.pending() {
        assert!(
            rob.get(producer).busy,
            "pending register {} points at free ROB entry {}",
            reg, producer
        );
    }
}
