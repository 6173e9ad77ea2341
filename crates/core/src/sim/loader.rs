//! Program loading.
//!
//! This module turns instruction source text into a [`Program`]. It performs:
//! 1. **File loading:** Reads a source file, exiting the process if the file
//!    cannot be opened (the only fatal condition in the simulator).
//! 2. **Line filtering:** Blank lines and `#` comments are skipped.
//! 3. **Error reporting:** Rejected lines are logged to stderr with their
//!    line number and skipped; loading continues.

use std::fs;
use std::process;

use crate::isa::parser::parse_line;
use crate::isa::Program;

/// Parses program source text. Rejected lines are logged and skipped.
pub fn parse_program(source: &str) -> Program {
    let mut insts = Vec::new();

    for (number, line) in source.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(inst)) => insts.push(inst),
            Ok(None) => {}
            Err(err) => {
                eprintln!("[!] line {}: {}", number + 1, err);
            }
        }
    }

    Program::new(insts)
}

/// Loads a program from a source file.
///
/// Exits the process with an error message if the file cannot be read.
///
/// # Arguments
///
/// * `path` - Path to the instruction source file.
pub fn load_program(path: &str) -> Program {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not read file '{}': {}", path, e);
        process::exit(1);
    });
    parse_program(&source)
}
