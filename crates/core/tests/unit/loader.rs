//! Program file loading.

use std::io::Write;

use tempfile::NamedTempFile;
use tomasulo_core::sim::loader::load_program;

#[test]
fn test_load_program_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# demo").unwrap();
    writeln!(file, "ADD F1, F2, F3").unwrap();
    writeln!(file, "LOAD F4, 100(F0)").unwrap();
    file.flush().unwrap();

    let program = load_program(file.path().to_str().unwrap());
    assert_eq!(program.len(), 2);
    assert_eq!(program.insts[0].to_string(), "ADD F1, F2, F3");
    assert_eq!(program.insts[1].to_string(), "LOAD F4, 100(F0)");
}

#[test]
fn test_bad_lines_skipped_when_loading() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ADD F1, F2, F3").unwrap();
    writeln!(file, "FMA F1, F2, F3").unwrap();
    writeln!(file, "STORE F1, 4(F0)").unwrap();
    file.flush().unwrap();

    let program = load_program(file.path().to_str().unwrap());
    assert_eq!(program.len(), 2);
}
