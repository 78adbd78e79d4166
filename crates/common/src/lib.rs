//! Hack VM common types and machine model.
//!
//! This crate provides the data shared by the translator, the assembler
//! and the CPU emulator:
//!
//! - [`Command`] and [`ArithmeticOp`]: classified VM commands
//! - [`Segment`]: the eight VM memory segments and their bases
//! - [`symbols`]: fixed RAM addresses and predefined assembler symbols
//! - [`MachineCode`]: an assembled program with `.hack` text encoding
//! - [`DecodeError`]: errors from reading `.hack` text
//!
//! # Dependencies
//!
//! This crate uses `thiserror` for its error type
//! and has no other dependencies.

pub mod command;
pub mod error;
pub mod machine_code;
pub mod segment;
pub mod symbols;

// Re-export commonly used types at the crate root.
pub use command::{ArithmeticOp, Command};
pub use error::DecodeError;
pub use machine_code::MachineCode;
pub use segment::{Segment, SegmentBase};
