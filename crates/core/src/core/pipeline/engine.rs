//! The pipeline engine: per-cycle stage orchestration.
//!
//! `step()` advances one cycle, running the stages strictly in this order:
//! 1. **Commit** — retire the ROB head if eligible (at most one per cycle).
//! 2. **Write-Result** — one CDB broadcast (the bus is single-writer).
//! 3. **Issue** — at most one new instruction into ROB + station.
//! 4. **Execute-Start** — dispatch ready stations to functional units.
//! 5. **Execute-Advance** — count down in-flight operations.
//!
//! The order is a contract: a station freed by Write-Result is reusable by
//! Issue in the same cycle, a ROB slot freed by Commit likewise, and an
//! instruction issued this cycle cannot produce a result this cycle.

use crate::common::{Fault, Word};
use crate::config::{Config, LatencyConfig};
use crate::core::arch::{ArchState, RegisterFile};
use crate::core::pipeline::cdb::CdbQueue;
use crate::core::pipeline::exec::{ExecRecord, ExecTracker};
use crate::core::pipeline::rat::AliasTable;
use crate::core::pipeline::rob::{Rob, RobIndex, RobState};
use crate::core::pipeline::station::{PoolKind, Station, StationFile};
use crate::isa::{Op, Program};
use crate::stats::SimStats;

/// The out-of-order engine: reservation stations, ROB, alias table,
/// execution tracker, and CDB queue, plus the stage logic that moves
/// instructions between them.
pub struct PipelineEngine {
    /// Reorder buffer.
    pub rob: Rob,
    /// Reservation station pools.
    pub stations: StationFile,
    /// Register alias table.
    pub rat: AliasTable,
    /// In-flight execution countdowns.
    pub exec: ExecTracker,
    /// Completed instructions awaiting the bus.
    pub cdb: CdbQueue,
    latency: LatencyConfig,
    next_issue: usize,
    cycle: u64,
    trace: bool,
}

impl PipelineEngine {
    /// Creates an engine from config.
    pub fn new(config: &Config) -> Self {
        Self {
            rob: Rob::new(config.pipeline.rob_entries),
            stations: StationFile::new(&config.pipeline),
            rat: AliasTable::new(),
            exec: ExecTracker::new(),
            cdb: CdbQueue::new(),
            latency: config.latency.clone(),
            next_issue: 0,
            cycle: 0,
            trace: config.general.trace,
        }
    }

    /// Returns the current cycle number.
    #[inline]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Returns the program index of the next instruction to issue.
    #[inline]
    pub fn next_issue(&self) -> usize {
        self.next_issue
    }

    /// Returns true when every instruction has committed and nothing is in
    /// flight anywhere in the pipeline.
    pub fn done(&self, program: &Program) -> bool {
        self.next_issue >= program.len()
            && self.rob.is_empty()
            && self.exec.is_empty()
            && self.cdb.is_empty()
    }

    /// Advances the pipeline by one cycle.
    pub fn step(&mut self, arch: &mut ArchState, program: &mut Program, stats: &mut SimStats) {
        self.commit_stage(arch, program, stats);
        self.write_result_stage(arch, program, stats);
        self.issue_stage(arch, program, stats);
        self.execute_start_stage();
        self.execute_advance_stage(program);

        debug_assert_eq!(
            self.rob.available() + self.rob.slots().filter(|e| e.busy).count(),
            self.rob.capacity()
        );

        stats.cycles += 1;
        self.cycle += 1;
    }

    /// Commit: retire the ROB head if it has written back. A STORE whose
    /// data is still pending blocks here, and with it every younger
    /// instruction.
    fn commit_stage(&mut self, arch: &mut ArchState, program: &mut Program, stats: &mut SimStats) {
        let head_idx = self.rob.head_index();
        let (op, value_ready, inst_idx) = match self.rob.peek_head() {
            Some(head) if head.busy && head.state == RobState::WriteResult => {
                (head.op, head.value_ready, head.inst_idx)
            }
            _ => return,
        };

        if op == Op::Store && !value_ready {
            stats.stalls_store_data += 1;
            if self.trace {
                eprintln!("CM  #{} blocked: store data pending", inst_idx);
            }
            return;
        }

        let Some(entry) = self.rob.retire_head() else {
            return;
        };

        if entry.op == Op::Store {
            if let Err(fault) = arch.mem.store(entry.address, entry.value) {
                eprintln!("[!] {}", fault);
                stats.faults_memory += 1;
            }
            if self.trace {
                eprintln!("CM  #{} MEM[{}] <- {}", entry.inst_idx, entry.address, entry.value);
            }
        } else {
            arch.regs.write(&entry.dest_reg, entry.value);
            self.rat.clear_if(&entry.dest_reg, head_idx);
            if self.trace {
                eprintln!("CM  #{} {} <- {}", entry.inst_idx, entry.dest_reg, entry.value);
            }
        }

        program.insts[entry.inst_idx].commit = Some(self.cycle);
        stats.instructions_retired += 1;
        match entry.op {
            Op::Add | Op::Sub => stats.inst_add_sub += 1,
            Op::Mul | Op::Div => stats.inst_mul_div += 1,
            Op::Load => stats.inst_load += 1,
            Op::Store => stats.inst_store += 1,
        }
    }

    /// Write-Result: one completed instruction computes its result, publishes
    /// it to its ROB entry, wakes dependents, and frees its station.
    fn write_result_stage(
        &mut self,
        arch: &mut ArchState,
        program: &mut Program,
        stats: &mut SimStats,
    ) {
        let Some(inst_idx) = self.cdb.pop() else {
            return;
        };

        let Some((kind, rs_idx)) = self.stations.find_by_inst(inst_idx) else {
            let fault = Fault::StationMissing(inst_idx);
            eprintln!("[!] {}", fault);
            stats.faults_internal += 1;
            return;
        };
        let st = self.stations.pool(kind)[rs_idx];
        let owner = st.owner;

        let mut address: Word = 0;
        let result = match st.op {
            Op::Add => st.vj.wrapping_add(st.vk),
            Op::Sub => st.vj.wrapping_sub(st.vk),
            Op::Mul => st.vj.wrapping_mul(st.vk),
            Op::Div => {
                if st.vk == 0 {
                    let fault = Fault::DivideByZero(inst_idx);
                    eprintln!("[!] {}", fault);
                    stats.faults_div_zero += 1;
                    0
                } else {
                    st.vj.wrapping_div(st.vk)
                }
            }
            Op::Load => {
                address = st.a.wrapping_add(st.vk);
                match arch.mem.load(address) {
                    Ok(value) => value,
                    Err(fault) => {
                        eprintln!("[!] {}", fault);
                        stats.faults_memory += 1;
                        0
                    }
                }
            }
            Op::Store => {
                address = st.a.wrapping_add(st.vk);
                st.vj
            }
        };

        let entry = self.rob.get_mut(owner);
        entry.state = RobState::WriteResult;
        match st.op {
            Op::Load => {
                entry.address = address;
                entry.value = result;
                entry.value_ready = true;
            }
            Op::Store => {
                // Address is published now; the datum only if it has arrived.
                entry.address = address;
                if st.qj.is_none() {
                    entry.value = st.vj;
                    entry.value_ready = true;
                }
            }
            _ => {
                entry.value = result;
                entry.value_ready = true;
            }
        }

        program.insts[inst_idx].write_result = Some(self.cycle);
        stats.cdb_broadcasts += 1;
        if self.trace {
            eprintln!("WR  #{} {} value={}", inst_idx, owner, result);
        }

        if st.op.writes_register() {
            self.broadcast(owner, result);
        }

        // A STORE still waiting on its datum keeps its station so the
        // pending tag stays visible to future broadcasts.
        if !(st.op == Op::Store && st.qj.is_some()) {
            self.stations.pool_mut(kind)[rs_idx].clear();
        }
    }

    /// Delivers a `(tag, value)` pair to every waiting station. Waking a
    /// STORE's data operand also fills the store's ROB entry, and releases
    /// the station if the store has already written back.
    fn broadcast(&mut self, tag: RobIndex, value: Word) {
        let mut woken_stores: Vec<(PoolKind, usize, RobIndex)> = Vec::new();

        for (kind, idx, st) in self.stations.iter_mut() {
            if !st.busy {
                continue;
            }
            if st.qj == Some(tag) {
                st.vj = value;
                st.qj = None;
                if kind == PoolKind::Store {
                    woken_stores.push((kind, idx, st.owner));
                }
            }
            if st.qk == Some(tag) {
                st.vk = value;
                st.qk = None;
            }
        }

        for (kind, idx, owner) in woken_stores {
            let entry = self.rob.get_mut(owner);
            entry.value = value;
            entry.value_ready = true;
            if entry.state == RobState::WriteResult {
                self.stations.pool_mut(kind)[idx].clear();
            }
        }
    }

    /// Issue: move the next program instruction into a ROB slot and a
    /// station, renaming its destination. Stalls (no state change) if either
    /// resource is exhausted.
    fn issue_stage(&mut self, arch: &mut ArchState, program: &mut Program, stats: &mut SimStats) {
        if self.next_issue >= program.len() {
            return;
        }

        let inst = program.insts[self.next_issue].clone();
        let kind = PoolKind::for_op(inst.op);

        if !self.rob.has_space() {
            stats.stalls_rob_full += 1;
            return;
        }
        let Some(rs_idx) = self.stations.find_free(kind) else {
            stats.stalls_station_busy += 1;
            return;
        };

        let dest_reg = if inst.op.writes_register() {
            inst.dest.clone()
        } else {
            String::new()
        };
        let Some(owner) = self.rob.allocate(self.next_issue, inst.op, dest_reg) else {
            return;
        };

        let mut station = Station {
            busy: true,
            op: inst.op,
            owner,
            inst_idx: self.next_issue,
            ..Station::default()
        };

        match inst.op {
            Op::Load => {
                // Offset is an immediate; the j operand slot is unused.
                station.a = inst.offset;
                (station.qk, station.vk) =
                    capture_operand(&self.rat, &self.rob, &arch.regs, &inst.src2);
            }
            Op::Store => {
                station.a = inst.offset;
                (station.qj, station.vj) =
                    capture_operand(&self.rat, &self.rob, &arch.regs, &inst.src1);
                (station.qk, station.vk) =
                    capture_operand(&self.rat, &self.rob, &arch.regs, &inst.src2);
                // Data already known: mirror it into the ROB entry so the
                // store can commit as soon as its address is computed.
                if station.qj.is_none() {
                    let entry = self.rob.get_mut(owner);
                    entry.value = station.vj;
                    entry.value_ready = true;
                }
            }
            _ => {
                (station.qj, station.vj) =
                    capture_operand(&self.rat, &self.rob, &arch.regs, &inst.src1);
                (station.qk, station.vk) =
                    capture_operand(&self.rat, &self.rob, &arch.regs, &inst.src2);
            }
        }

        self.stations.pool_mut(kind)[rs_idx] = station;

        if inst.op.writes_register() {
            self.rat.rename(&inst.dest, owner);
        }

        program.insts[self.next_issue].issue = Some(self.cycle);
        if self.trace {
            eprintln!("IS  #{} {} -> {}", self.next_issue, inst, owner);
        }
        self.next_issue += 1;
    }

    /// Execute-Start: dispatch every station whose operands are fulfilled.
    /// A STORE dispatches on its address operand alone; its datum gates
    /// commit, not execution.
    fn execute_start_stage(&mut self) {
        let mut starts: Vec<(PoolKind, usize, Station)> = Vec::new();

        for (kind, idx, st) in self.stations.iter() {
            if !st.busy {
                continue;
            }
            // Only Issue-state entries dispatch; anything later is either
            // executing, waiting for the bus, or a store held for its datum.
            if self.rob.get(st.owner).state != RobState::Issue {
                continue;
            }
            let ready = match kind {
                PoolKind::Store => st.qk.is_none(),
                _ => st.qj.is_none() && st.qk.is_none(),
            };
            if ready {
                starts.push((kind, idx, *st));
            }
        }

        for (kind, idx, st) in starts {
            self.exec.start(ExecRecord {
                pool: kind,
                rs_index: idx,
                inst_idx: st.inst_idx,
                remaining: self.latency.for_op(st.op),
                started_at: self.cycle,
            });

            let entry = self.rob.get_mut(st.owner);
            entry.state = RobState::Execute;
            if st.op == Op::Store && st.qj.is_none() && !entry.value_ready {
                entry.value = st.vj;
                entry.value_ready = true;
            }

            if self.trace {
                eprintln!(
                    "EX  #{} start ({} cycles)",
                    st.inst_idx,
                    self.latency.for_op(st.op)
                );
            }
        }
    }

    /// Execute-Advance: count down in-flight operations; finished ones
    /// record their completion cycle and line up for the bus.
    fn execute_advance_stage(&mut self, program: &mut Program) {
        for inst_idx in self.exec.advance(self.cycle) {
            program.insts[inst_idx].exec_comp = Some(self.cycle);
            self.cdb.push(inst_idx);
            if self.trace {
                eprintln!("EX  #{} complete", inst_idx);
            }
        }
    }
}

/// Captures one source operand at issue time.
///
/// Returns `(None, value)` when the operand is available, either from a
/// written-back ROB entry (issue-time forwarding) or from the architectural
/// register, and `(Some(tag), 0)` when it must wait for a broadcast.
fn capture_operand(
    rat: &AliasTable,
    rob: &Rob,
    regs: &RegisterFile,
    reg: &str,
) -> (Option<RobIndex>, Word) {
    match rat.producer(reg) {
        Some(tag) => {
            let entry = rob.get(tag);
            if entry.state == RobState::WriteResult && entry.value_ready {
                (None, entry.value)
            } else {
                (Some(tag), 0)
            }
        }
        None => (None, regs.read(reg)),
    }
}
