//! Error types for the Hack assembler.

use std::fmt;

use thiserror::Error;

/// The three fields of a C-instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Comp,
    Dest,
    Jump,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Comp => "comp",
            Field::Dest => "dest",
            Field::Jump => "jump",
        })
    }
}

/// Errors produced while assembling text to machine code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// A comp, dest or jump mnemonic has no bit encoding.
    #[error("line {line}: no {field} encoding for '{mnemonic}'")]
    UnresolvedEncoding {
        line: usize,
        field: Field,
        mnemonic: String,
    },

    /// A label or A-instruction symbol contains illegal characters.
    #[error("line {line}: invalid symbol '{token}'")]
    InvalidSymbol { line: usize, token: String },

    /// A numeric A-instruction does not fit in 15 bits.
    #[error("line {line}: address '{token}' out of range (max 32767)")]
    AddressOutOfRange { line: usize, token: String },

    /// The same label was declared twice, or shadows a predefined symbol.
    #[error("line {line}: label '{label}' already defined")]
    DuplicateLabel { line: usize, label: String },

    /// The instruction at `line` would not fit in the 32K-word ROM.
    #[error("line {line}: program exceeds {} ROM words", hackvm_common::symbols::ROM_SIZE)]
    ProgramTooLarge { line: usize },

    /// Every RAM cell from 16 up has already been given to a variable.
    #[error("line {line}: no RAM left for variable '{symbol}'")]
    OutOfVariableSpace { line: usize, symbol: String },
}
