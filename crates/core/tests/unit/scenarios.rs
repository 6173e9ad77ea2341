//! End-to-end scenarios with exact timestamp expectations.
//!
//! All scenarios assume the default machine: 3/2/3/3 stations, ROB 16,
//! latencies 2/10/40/2/2, registers `F0..F31 = 10`, `MEM[i] = i`.

use crate::common::{run_to_completion, sim_from_source, timestamps};

#[test]
fn test_single_add() {
    let mut sim = sim_from_source("ADD F1, F2, F3");
    run_to_completion(&mut sim);

    assert_eq!(timestamps(&sim, 0), (0, 2, 3, 4));
    assert_eq!(sim.arch.regs.read("F1"), 20);
}

#[test]
fn test_mul_feeding_add() {
    let mut sim = sim_from_source(
        "MUL F1, F2, F3
         ADD F4, F1, F5",
    );
    run_to_completion(&mut sim);

    let mul = timestamps(&sim, 0);
    let add = timestamps(&sim, 1);
    assert_eq!(mul, (0, 10, 11, 12));
    assert_eq!(add, (1, 13, 14, 15));

    // The dependent ADD cannot finish execution until a full latency after
    // the MUL's broadcast.
    assert!(add.1 >= mul.2 + 2);

    assert_eq!(sim.arch.regs.read("F1"), 100);
    assert_eq!(sim.arch.regs.read("F4"), 110);
}

#[test]
fn test_load_effective_address() {
    let mut sim = sim_from_source("LOAD F1, 100(F0)");
    run_to_completion(&mut sim);

    // F0 = 10, so the effective address is 110 and MEM[110] = 110.
    assert_eq!(timestamps(&sim, 0), (0, 2, 3, 4));
    assert_eq!(sim.arch.regs.read("F1"), 110);
}

#[test]
fn test_store_overwrites_memory() {
    let mut sim = sim_from_source("STORE F2, 50(F0)");
    assert_eq!(sim.arch.mem.load(60).unwrap(), 60);
    run_to_completion(&mut sim);

    assert_eq!(timestamps(&sim, 0), (0, 2, 3, 4));
    assert_eq!(sim.arch.mem.load(60).unwrap(), 10);
}

#[test]
fn test_long_latency_div_feeding_add() {
    let mut sim = sim_from_source(
        "DIV F1, F2, F3
         ADD F4, F1, F5",
    );
    run_to_completion(&mut sim);

    let div = timestamps(&sim, 0);
    let add = timestamps(&sim, 1);
    assert_eq!(div, (0, 40, 41, 42));
    // Issue of the ADD is not delayed by the DIV's latency, only its
    // execution is.
    assert_eq!(add.0, 1);
    assert_eq!(add, (1, 43, 44, 45));

    assert_eq!(sim.arch.regs.read("F1"), 1);
    assert_eq!(sim.arch.regs.read("F4"), 11);
}

#[test]
fn test_mul_station_starvation() {
    let mut sim = sim_from_source(
        "MUL F1, F5, F6
         MUL F2, F5, F6
         MUL F3, F5, F6
         MUL F4, F5, F6",
    );
    run_to_completion(&mut sim);

    let first = timestamps(&sim, 0);
    let second = timestamps(&sim, 1);
    let third = timestamps(&sim, 2);
    let fourth = timestamps(&sim, 3);

    assert_eq!(first, (0, 10, 11, 12));
    assert_eq!(second, (1, 11, 12, 13));

    // With only two MUL/DIV stations, the third and fourth MULs issue in the
    // very cycle an earlier MUL's write-back frees a station.
    assert_eq!(third.0, first.2);
    assert_eq!(fourth.0, second.2);
    assert_eq!(third, (11, 21, 22, 23));
    assert_eq!(fourth, (12, 22, 23, 24));

    assert!(sim.stats.stalls_station_busy > 0);
    for reg in ["F1", "F2", "F3", "F4"] {
        assert_eq!(sim.arch.regs.read(reg), 100);
    }
}
