//! Runtime errors for the Hack CPU emulator.

use thiserror::Error;

/// Errors that stop execution before the program halts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpuError {
    /// The program counter left the loaded ROM.
    #[error("program counter {pc} is outside ROM")]
    PcOutOfRange { pc: u16 },

    /// An M access targeted an address beyond RAM.
    #[error("memory access at {address} out of range at pc {pc}")]
    AddressOutOfRange { address: u16, pc: u16 },

    /// The program did not halt within the cycle budget.
    #[error("no halt within {limit} cycles")]
    CycleLimit { limit: u64 },
}
