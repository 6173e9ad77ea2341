//! Tomasulo simulator CLI.
//!
//! This binary is the driver for the simulator. It performs:
//! 1. **Program loading:** Parse an instruction source file.
//! 2. **Simulation loop:** Print per-cycle status and advance until every
//!    instruction has committed.
//! 3. **Step mode:** Optionally wait for ENTER between cycles.
//! 4. **Reporting:** Final status, register dump, and statistics.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::{fs, process};

use tomasulo_core::config::Config;
use tomasulo_core::sim::{loader, status};
use tomasulo_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    author,
    version,
    about = "Tomasulo + reorder buffer pipeline simulator",
    long_about = "Run an instruction file through the out-of-order pipeline, \
printing per-cycle reservation station, reorder buffer, and alias table state.\n\n\
Examples:\n  tomasim run program.asm\n  tomasim run program.asm --step\n  tomasim run program.asm --config machine.json --quiet"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an instruction file to completion.
    Run {
        /// Instruction source file.
        file: String,

        /// Machine configuration (JSON).
        #[arg(long)]
        config: Option<String>,

        /// Wait for ENTER between cycles.
        #[arg(long)]
        step: bool,

        /// Suppress per-cycle status tables (final report only).
        #[arg(long)]
        quiet: bool,

        /// Abort after this many cycles (0 = no limit).
        #[arg(long, default_value_t = 1_000_000)]
        max_cycles: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            file,
            config,
            step,
            quiet,
            max_cycles,
        }) => cmd_run(&file, config, step, quiet, max_cycles),
        None => {
            eprintln!("Tomasulo simulator — pass a subcommand");
            eprintln!();
            eprintln!("  tomasim run <file>           Run an instruction file");
            eprintln!("  tomasim run <file> --step    Advance one cycle per ENTER");
            eprintln!();
            eprintln!("  tomasim --help  for full options");
            process::exit(1);
        }
    }
}

/// Runs the simulator: loads the program, then loops on `step` until done.
fn cmd_run(file: &str, config_path: Option<String>, step: bool, quiet: bool, max_cycles: u64) {
    let config = load_config(config_path);
    let program = loader::load_program(file);

    println!("[*] Loaded {} instructions from {}", program.len(), file);

    let mut sim = Simulator::new(program, &config);

    while !sim.done() {
        if !quiet {
            status::print_status(&sim);
        }
        if step {
            wait_for_enter();
        }
        sim.step();

        if max_cycles > 0 && sim.cycle() >= max_cycles {
            eprintln!("\n[!] Cycle limit ({}) reached; aborting", max_cycles);
            process::exit(1);
        }
    }

    println!("\n=== Simulation complete ===");
    status::print_status(&sim);
    status::print_registers(&sim);
    sim.stats.print();
    io::stdout().flush().ok();
}

/// Loads the JSON configuration, or the defaults when no path is given.
/// Exits the process on an unreadable or malformed file.
fn load_config(path: Option<String>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };

    let text = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not read config '{}': {}", path, e);
        process::exit(1);
    });
    Config::from_json(&text).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Bad config '{}': {}", path, e);
        process::exit(1);
    })
}

/// Blocks until the user presses ENTER.
fn wait_for_enter() {
    print!("\nAdvance [ENTER]");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok();
}
