//! Hack VM translator — stack VM code to Hack assembly.
//!
//! The translator is a single-pass, symbol-free code generator. Each VM
//! line is parsed into a [`Command`](hackvm_common::Command) and expanded
//! into a fixed assembly sequence. No optimization is attempted.
//!
//! # Usage
//!
//! ```
//! use hackvm_translator::{translate, SourceUnit, TranslateConfig};
//!
//! let unit = SourceUnit::new("Main", "push constant 7\npush constant 8\nadd\n");
//! let asm = translate(&[unit], &TranslateConfig::default()).unwrap();
//! assert_eq!(asm.lines()[0], "// push constant 7");
//! ```
//!
//! # Labels
//!
//! VM labels are scoped as `<function>$<label>`, or `<unit>$<label>` for
//! code that precedes the first `function` of a unit, so identical label
//! text in two functions never collides. VM names may not contain `$`.
//! Internal labels (comparison branches, return addresses, local init
//! loops, the halt loop) embed an id from a counter that runs across the
//! whole translation. Return addresses and init loops are written
//! `<function>$$...`, which no scoped user label can spell.

pub mod error;

mod driver;
mod emitter;
mod output;
mod parser;

pub use driver::{translate, SourceUnit, TranslateConfig, Translator};
pub use emitter::{emit, Context};
pub use error::{CommandError, TranslateError};
pub use output::AsmProgram;
pub use parser::parse_line;
