//! Hack assembler — assembly text to 16-bit machine words.
//!
//! Two passes over the source:
//!
//! 1. Every `(LABEL)` is bound to the ROM address of the instruction that
//!    follows it.
//! 2. Every A- and C-instruction is encoded. Symbols that are neither
//!    predefined nor labels become variables, allocated from RAM 16 in
//!    order of first use.
//!
//! # Usage
//!
//! ```
//! use hackvm_assembler::assemble;
//!
//! let code = assemble("@2\nD=A\n@3\nD=D+A\n@0\nM=D\n").unwrap();
//! assert_eq!(code.words[1], 0b1110110000010000);
//! ```

pub mod encoding;
pub mod error;
pub mod symbol_table;

mod lexer;

pub use error::{AsmError, Field};
pub use symbol_table::SymbolTable;

use hackvm_common::symbols::{MAX_ADDRESS, ROM_SIZE};
use hackvm_common::MachineCode;
use lexer::{classify_line, Address, Line};
use log::debug;

/// Assemble text into machine code.
///
/// Returns the first error encountered. A program must fit in the
/// 32768-word ROM.
pub fn assemble(text: &str) -> Result<MachineCode, AsmError> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(line) = classify_line(raw, idx + 1)? {
            lines.push((idx + 1, line));
        }
    }

    let mut symbols = SymbolTable::new();
    let mut rom_address: u16 = 0;
    for (line_num, line) in &lines {
        match line {
            Line::L(label) => {
                if !symbols.insert_label(label, rom_address) {
                    return Err(AsmError::DuplicateLabel {
                        line: *line_num,
                        label: label.clone(),
                    });
                }
            }
            _ => {
                if usize::from(rom_address) == ROM_SIZE {
                    return Err(AsmError::ProgramTooLarge { line: *line_num });
                }
                rom_address += 1;
            }
        }
    }

    let mut words = Vec::with_capacity(rom_address as usize);
    for (line_num, line) in &lines {
        match line {
            Line::A(Address::Constant(value)) => words.push(*value),
            Line::A(Address::Symbol(symbol)) => {
                let addr = symbols.resolve_variable(symbol).ok_or_else(|| {
                    AsmError::OutOfVariableSpace {
                        line: *line_num,
                        symbol: symbol.clone(),
                    }
                })?;
                // Only a label after the last word of a full ROM lands here.
                if addr > MAX_ADDRESS {
                    return Err(AsmError::AddressOutOfRange {
                        line: *line_num,
                        token: symbol.clone(),
                    });
                }
                words.push(addr);
            }
            Line::C { dest, comp, jump } => {
                words.push(encode_c(dest.as_deref(), comp, jump.as_deref(), *line_num)?)
            }
            Line::L(_) => {}
        }
    }

    debug!("assembled {} words", words.len());
    Ok(MachineCode::new(words))
}

/// `111` + comp(7) + dest(3) + jump(3).
fn encode_c(dest: Option<&str>, comp: &str, jump: Option<&str>, line: usize) -> Result<u16, AsmError> {
    let unresolved = |field, mnemonic: &str| AsmError::UnresolvedEncoding {
        line,
        field,
        mnemonic: mnemonic.to_string(),
    };

    let comp_bits = encoding::comp_bits(comp).ok_or_else(|| unresolved(Field::Comp, comp))?;
    let dest_bits = match dest {
        Some(d) => encoding::dest_bits(d).ok_or_else(|| unresolved(Field::Dest, d))?,
        None => 0,
    };
    let jump_bits = match jump {
        Some(j) => encoding::jump_bits(j).ok_or_else(|| unresolved(Field::Jump, j))?,
        None => 0,
    };

    Ok(0b111 << 13 | comp_bits << 6 | dest_bits << 3 | jump_bits)
}
