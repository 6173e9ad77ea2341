//! Status table rendering.
//!
//! Renders the per-cycle view of the machine: the instruction timestamp
//! table, the four reservation station pools, the reorder buffer, and the
//! pending alias table entries. The table shapes are stable; tests and the
//! determinism check compare rendered output directly.

use std::fmt::Write as _;

use crate::common::Word;
use crate::core::pipeline::rob::RobIndex;
use crate::core::pipeline::station::PoolKind;
use crate::sim::simulator::Simulator;

/// Renders the full per-cycle status block.
pub fn render_status(sim: &Simulator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n==== Cycle {} ====", sim.cycle());

    render_instructions(sim, &mut out);
    for kind in PoolKind::ALL {
        render_pool(sim, kind, &mut out);
    }
    render_rob(sim, &mut out);
    render_rat(sim, &mut out);

    out
}

/// Prints the full per-cycle status block to stdout.
pub fn print_status(sim: &Simulator) {
    print!("{}", render_status(sim));
}

/// Renders the final register dump.
pub fn render_registers(sim: &Simulator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nFinal register values:");
    let _ = writeln!(out, "---------------------------------");
    for (name, value) in sim.arch.regs.iter() {
        let _ = writeln!(out, "{} = {}", name, value);
    }
    let _ = writeln!(out, "---------------------------------");
    out
}

/// Prints the final register dump to stdout.
pub fn print_registers(sim: &Simulator) {
    print!("{}", render_registers(sim));
}

fn render_instructions(sim: &Simulator, out: &mut String) {
    let rule = "-".repeat(73);
    let _ = writeln!(out, "\nInstructions:");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "| {:>3} | {:<24} | {:>6} | {:>8} | {:>11} | {:>6} |",
        "#", "Instruction", "Issue", "ExecComp", "WriteResult", "Commit"
    );
    let _ = writeln!(out, "{}", rule);
    for (i, inst) in sim.program.insts.iter().enumerate() {
        let _ = writeln!(
            out,
            "| {:>3} | {:<24} | {:>6} | {:>8} | {:>11} | {:>6} |",
            i,
            inst.to_string(),
            cycle_cell(inst.issue),
            cycle_cell(inst.exec_comp),
            cycle_cell(inst.write_result),
            cycle_cell(inst.commit)
        );
    }
    let _ = writeln!(out, "{}", rule);
}

fn render_pool(sim: &Simulator, kind: PoolKind, out: &mut String) {
    let rule = "-".repeat(84);
    let _ = writeln!(out, "\nReservation Stations {}:", kind);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "| {:>1} | {:<4} | {:<5} | {:>6} | {:>6} | {:<5} | {:<5} | {:<5} | {:>6} | {:>7} |",
        "#", "Busy", "Op", "Vj", "Vk", "Qj", "Qk", "Dest", "A", "InstIdx"
    );
    let _ = writeln!(out, "{}", rule);
    for (i, st) in sim.engine.stations.pool(kind).iter().enumerate() {
        let busy = st.busy;
        let _ = writeln!(
            out,
            "| {:>1} | {:<4} | {:<5} | {:>6} | {:>6} | {:<5} | {:<5} | {:<5} | {:>6} | {:>7} |",
            i,
            if busy { "Yes" } else { "No" },
            if busy { st.op.to_string() } else { "-".to_string() },
            value_cell(busy && st.qj.is_none(), st.vj),
            value_cell(busy && st.qk.is_none(), st.vk),
            tag_cell(busy, st.qj),
            tag_cell(busy, st.qk),
            if busy { st.owner.to_string() } else { "-".to_string() },
            value_cell(busy, st.a),
            if busy { st.inst_idx.to_string() } else { "-".to_string() }
        );
    }
    let _ = writeln!(out, "{}", rule);
}

fn render_rob(sim: &Simulator, out: &mut String) {
    let rule = "-".repeat(94);
    let _ = writeln!(out, "\nReorder Buffer:");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "| {:>3} | {:<4} | {:>7} | {:<5} | {:<11} | {:<7} | {:<10} | {:>6} | {:>7} |",
        "#", "Busy", "InstIdx", "Type", "State", "DestReg", "ValueReady", "Value", "Address"
    );
    let _ = writeln!(out, "{}", rule);
    for (i, entry) in sim.engine.rob.slots().enumerate() {
        let busy = entry.busy;
        let _ = writeln!(
            out,
            "| {:>3} | {:<4} | {:>7} | {:<5} | {:<11} | {:<7} | {:<10} | {:>6} | {:>7} |",
            i,
            if busy { "Yes" } else { "No" },
            if busy { entry.inst_idx.to_string() } else { "-".to_string() },
            if busy { entry.op.to_string() } else { "-".to_string() },
            entry.state.to_string(),
            if busy && !entry.dest_reg.is_empty() {
                entry.dest_reg.clone()
            } else {
                "-".to_string()
            },
            if busy { entry.value_ready.to_string() } else { "-".to_string() },
            value_cell(busy && entry.value_ready, entry.value),
            value_cell(busy, entry.address)
        );
    }
    let _ = writeln!(out, "{}", rule);
}

fn render_rat(sim: &Simulator, out: &mut String) {
    let _ = writeln!(out, "\nRegister Alias Table (pending):");
    if sim.engine.rat.is_empty() {
        let _ = writeln!(out, "  (none)");
        return;
    }
    for (reg, producer) in sim.engine.rat.pending() {
        let _ = writeln!(out, "  {} -> {}", reg, producer);
    }
}

fn cycle_cell(cycle: Option<u64>) -> String {
    match cycle {
        Some(c) => c.to_string(),
        None => "-".to_string(),
    }
}

fn value_cell(show: bool, value: Word) -> String {
    if show {
        value.to_string()
    } else {
        "-".to_string()
    }
}

fn tag_cell(busy: bool, tag: Option<RobIndex>) -> String {
    match tag {
        Some(t) if busy => t.to_string(),
        _ => "-".to_string(),
    }
}
