//! Boundary behavior: faults, structural starvation, tiny configurations.

use crate::common::{run_to_completion, sim_from_source, sim_with_config, timestamps};
use tomasulo_core::config::Config;

#[test]
fn test_divide_by_zero_does_not_halt() {
    let mut sim = sim_from_source(
        "SUB F3, F3, F3
         DIV F1, F2, F3",
    );
    run_to_completion(&mut sim);

    assert_eq!(sim.arch.regs.read("F3"), 0);
    assert_eq!(sim.arch.regs.read("F1"), 0);
    assert_eq!(sim.stats.faults_div_zero, 1);
    assert!(sim.program.insts[1].commit.is_some());
}

#[test]
fn test_rob_full_mul_chain_stalls_without_deadlock() {
    let config = Config::from_json(r#"{ "pipeline": { "rob_entries": 4 } }"#).unwrap();
    let source: String = (0..10)
        .map(|_| "MUL F1, F2, F3\n")
        .collect();
    let mut sim = sim_with_config(&source, &config);
    run_to_completion(&mut sim);

    assert!(sim.stats.stalls_rob_full > 0);
    assert_eq!(sim.stats.instructions_retired, 10);
    for idx in 0..10 {
        assert!(sim.program.insts[idx].commit.is_some());
    }
}

#[test]
fn test_single_add_station_serializes() {
    let config = Config::from_json(r#"{ "pipeline": { "add_sub_stations": 1 } }"#).unwrap();
    let mut sim = sim_with_config(
        "ADD F1, F2, F3
         ADD F4, F5, F6
         ADD F7, F8, F9",
        &config,
    );
    run_to_completion(&mut sim);

    let first = timestamps(&sim, 0);
    let second = timestamps(&sim, 1);
    let third = timestamps(&sim, 2);

    // Each ADD can only issue once the previous one's write-back frees the
    // lone station.
    assert_eq!(second.0, first.2);
    assert_eq!(third.0, second.2);
    assert!(sim.stats.stalls_station_busy > 0);
}

#[test]
fn test_store_out_of_range_retires_without_memory_write() {
    let config = Config::from_json(r#"{ "arch": { "memory_words": 16 } }"#).unwrap();
    let mut sim = sim_with_config("STORE F2, 50(F0)", &config);
    run_to_completion(&mut sim);

    // Effective address 60 is outside the 16-word memory.
    assert_eq!(sim.stats.faults_memory, 1);
    assert!(sim.program.insts[0].commit.is_some());
    for addr in 0..16 {
        assert_eq!(sim.arch.mem.load(addr).unwrap(), addr);
    }
}

#[test]
fn test_load_out_of_range_yields_zero() {
    let mut sim = sim_from_source("LOAD F1, 2000(F0)");
    run_to_completion(&mut sim);

    assert_eq!(sim.arch.regs.read("F1"), 0);
    assert_eq!(sim.stats.faults_memory, 1);
}

#[test]
fn test_unlisted_register_name_is_created() {
    let mut sim = sim_from_source("ADD G1, F2, F3");
    run_to_completion(&mut sim);

    assert_eq!(sim.arch.regs.read("G1"), 20);
}

#[test]
fn test_store_with_pending_data_commits_after_producer() {
    let mut sim = sim_from_source(
        "DIV F1, F2, F3
         STORE F1, 50(F0)",
    );
    run_to_completion(&mut sim);

    let div = timestamps(&sim, 0);
    let store = timestamps(&sim, 1);

    // The store's address is computed long before the DIV produces its
    // datum; its commit must wait for the data.
    assert!(store.2 < div.2);
    assert!(store.3 > div.3);
    assert_eq!(sim.arch.mem.load(60).unwrap(), 1);
}
