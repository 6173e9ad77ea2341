//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, derived IPC.
//! 2. **Instruction mix:** Retired counts by operation class.
//! 3. **Stalls:** Structural (ROB-full, station-busy) and store-data commit
//!    stalls.
//! 4. **Faults:** Divide-by-zero, memory range, and internal-inconsistency
//!    counts.

use std::time::Instant;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Count of ADD/SUB instructions retired.
    pub inst_add_sub: u64,
    /// Count of MUL/DIV instructions retired.
    pub inst_mul_div: u64,
    /// Count of LOAD instructions retired.
    pub inst_load: u64,
    /// Count of STORE instructions retired.
    pub inst_store: u64,

    /// Results broadcast on the common data bus.
    pub cdb_broadcasts: u64,
    /// Issue stalls because the reorder buffer was full.
    pub stalls_rob_full: u64,
    /// Issue stalls because no reservation station of the required pool was
    /// free.
    pub stalls_station_busy: u64,
    /// Commit stalls on a STORE whose data was not yet resolved.
    pub stalls_store_data: u64,

    /// Divide-by-zero faults (result substituted with zero).
    pub faults_div_zero: u64,
    /// Out-of-range memory accesses (load result zero / store dropped).
    pub faults_memory: u64,
    /// Internal inconsistencies (step skipped).
    pub faults_internal: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_add_sub: 0,
            inst_mul_div: 0,
            inst_load: 0,
            inst_store: 0,
            cdb_broadcasts: 0,
            stalls_rob_full: 0,
            stalls_station_busy: 0,
            stalls_store_data: 0,
            faults_div_zero: 0,
            faults_memory: 0,
            faults_internal: 0,
        }
    }
}

impl SimStats {
    /// Prints the full statistics report to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let instr = if self.instructions_retired == 0 {
            1
        } else {
            self.instructions_retired
        };
        let total_inst = instr as f64;

        println!("\n==========================================================");
        println!("TOMASULO SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!(
            "sim_ipc                  {:.4}",
            self.instructions_retired as f64 / cyc as f64
        );
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        println!(
            "  op.add_sub             {} ({:.2}%)",
            self.inst_add_sub,
            (self.inst_add_sub as f64 / total_inst) * 100.0
        );
        println!(
            "  op.mul_div             {} ({:.2}%)",
            self.inst_mul_div,
            (self.inst_mul_div as f64 / total_inst) * 100.0
        );
        println!(
            "  op.load                {} ({:.2}%)",
            self.inst_load,
            (self.inst_load as f64 / total_inst) * 100.0
        );
        println!(
            "  op.store               {} ({:.2}%)",
            self.inst_store,
            (self.inst_store as f64 / total_inst) * 100.0
        );
        println!("----------------------------------------------------------");
        println!("PIPELINE");
        println!("  cdb.broadcasts         {}", self.cdb_broadcasts);
        println!("  stalls.rob_full        {}", self.stalls_rob_full);
        println!("  stalls.station_busy    {}", self.stalls_station_busy);
        println!("  stalls.store_data      {}", self.stalls_store_data);
        println!("----------------------------------------------------------");
        println!("FAULTS");
        println!("  fault.div_zero         {}", self.faults_div_zero);
        println!("  fault.memory           {}", self.faults_memory);
        println!("  fault.internal         {}", self.faults_internal);
        println!("==========================================================");
    }
}
