//! Hack CPU emulator — executes assembled machine code.
//!
//! The machine has:
//! - A read-only instruction memory (ROM) holding the program
//! - 32K words of data memory (RAM)
//! - The A, D and PC registers
//!
//! There is no halt instruction. A program stops when it reaches the
//! `(L) @L 0;JMP` self loop, which [`Cpu::run`] detects.
//!
//! # Usage
//!
//! ```
//! use hackvm_common::MachineCode;
//! use hackvm_cpu::run;
//!
//! // @7; D=A; @0; M=D; (END) @4; 0;JMP
//! let code = MachineCode::new(vec![
//!     7, 0b1110110000010000, 0, 0b1110001100001000, 4, 0b1110101010000111,
//! ]);
//! let cpu = run(&code, 100).unwrap();
//! assert_eq!(cpu.ram(0), 7);
//! ```

pub mod error;
pub mod execute;
pub mod machine;

pub use error::CpuError;
pub use execute::Status;
pub use machine::Cpu;

use hackvm_common::MachineCode;

/// Run `code` from a fresh machine and return the halted machine.
///
/// # Errors
///
/// Returns [`CpuError`] if execution leaves ROM, touches memory beyond RAM,
/// or does not halt within `max_cycles` instructions.
pub fn run(code: &MachineCode, max_cycles: u64) -> Result<Cpu, CpuError> {
    let mut cpu = Cpu::new(code);
    cpu.run(max_cycles)?;
    Ok(cpu)
}
