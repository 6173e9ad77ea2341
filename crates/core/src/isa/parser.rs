//! Line-oriented assembly text parser.
//!
//! Accepted forms (whitespace-separated, trailing commas on tokens ignored):
//!
//! ```text
//! ADD|SUB|MUL|DIV Rd, Rs1, Rs2
//! LOAD|L.D  Rd, imm(Rbase)
//! STORE|S.D Rs, imm(Rbase)
//! ```
//!
//! Blank lines and lines starting with `#` are comments and yield `Ok(None)`.
//! A rejected line yields a [`ParseError`]; the caller decides whether to
//! skip it (the loader does).

use crate::common::{ParseError, Word};
use crate::isa::instruction::{Instruction, Op};

/// Parses one source line.
///
/// Returns `Ok(None)` for blank and comment lines, `Ok(Some(_))` for an
/// instruction, and `Err(_)` for a malformed line.
pub fn parse_line(line: &str) -> Result<Option<Instruction>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let tokens: Vec<&str> = trimmed
        .split_whitespace()
        .map(|t| t.trim_end_matches(','))
        .filter(|t| !t.is_empty())
        .collect();

    let Some(&mnemonic) = tokens.first() else {
        return Ok(None);
    };
    let inst = match mnemonic {
        "ADD" => arith(Op::Add, mnemonic, &tokens)?,
        "SUB" => arith(Op::Sub, mnemonic, &tokens)?,
        "MUL" => arith(Op::Mul, mnemonic, &tokens)?,
        "DIV" => arith(Op::Div, mnemonic, &tokens)?,
        "LOAD" | "L.D" => {
            let (dest, mem) = two_operands(mnemonic, &tokens)?;
            let (offset, base) = mem_operand(mem)?;
            Instruction::load(dest, offset, &base)
        }
        "STORE" | "S.D" => {
            let (src, mem) = two_operands(mnemonic, &tokens)?;
            let (offset, base) = mem_operand(mem)?;
            Instruction::store(src, offset, &base)
        }
        other => return Err(ParseError::UnknownMnemonic(other.to_string())),
    };

    Ok(Some(inst))
}

/// Builds a three-register arithmetic instruction from `OP Rd, Rs1, Rs2`.
fn arith(op: Op, mnemonic: &str, tokens: &[&str]) -> Result<Instruction, ParseError> {
    if tokens.len() < 4 {
        return Err(ParseError::MissingOperand(mnemonic.to_string()));
    }
    Ok(Instruction::arith(op, tokens[1], tokens[2], tokens[3]))
}

/// Extracts the two operand tokens of a LOAD/STORE line.
fn two_operands<'a>(
    mnemonic: &str,
    tokens: &[&'a str],
) -> Result<(&'a str, &'a str), ParseError> {
    if tokens.len() < 3 {
        return Err(ParseError::MissingOperand(mnemonic.to_string()));
    }
    Ok((tokens[1], tokens[2]))
}

/// Splits an `imm(Rbase)` token into its offset and base register.
fn mem_operand(token: &str) -> Result<(Word, String), ParseError> {
    let malformed = || ParseError::MalformedMemOperand(token.to_string());

    let open = token.find('(').ok_or_else(malformed)?;
    if !token.ends_with(')') {
        return Err(malformed());
    }

    let offset: Word = token[..open].parse().map_err(|_| malformed())?;
    let base = &token[open + 1..token.len() - 1];
    if base.is_empty() {
        return Err(malformed());
    }

    Ok((offset, base.to_string()))
}
