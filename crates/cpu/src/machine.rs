//! CPU state: ROM, RAM and the A, D and PC registers.

use hackvm_common::symbols::RAM_SIZE;
use hackvm_common::MachineCode;

use crate::error::CpuError;

/// The Hack computer.
#[derive(Debug, Clone)]
pub struct Cpu {
    pub(crate) rom: Vec<u16>,
    pub(crate) ram: Vec<u16>,
    pub(crate) a: u16,
    pub(crate) d: u16,
    pub(crate) pc: u16,
    pub(crate) cycles: u64,
}

impl Cpu {
    /// Load `code` into ROM with zeroed RAM and registers.
    pub fn new(code: &MachineCode) -> Self {
        Self {
            rom: code.words.clone(),
            ram: vec![0; RAM_SIZE],
            a: 0,
            d: 0,
            pc: 0,
            cycles: 0,
        }
    }

    pub fn a(&self) -> u16 {
        self.a
    }

    pub fn d(&self) -> u16 {
        self.d
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Instructions executed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Read a RAM word. Addresses past the end read as 0.
    pub fn ram(&self, address: u16) -> u16 {
        self.ram.get(address as usize).copied().unwrap_or(0)
    }

    /// Read a RAM word as a two's-complement value.
    pub fn ram_signed(&self, address: u16) -> i16 {
        self.ram(address) as i16
    }

    /// Write a RAM word. Writes past the end are ignored.
    pub fn set_ram(&mut self, address: u16, value: u16) {
        if let Some(cell) = self.ram.get_mut(address as usize) {
            *cell = value;
        }
    }

    /// A contiguous view of RAM, clamped to its size.
    pub fn ram_slice(&self, start: u16, end: u16) -> &[u16] {
        let end = (end as usize).min(self.ram.len());
        let start = (start as usize).min(end);
        &self.ram[start..end]
    }

    pub(crate) fn fetch(&self) -> Result<u16, CpuError> {
        self.rom
            .get(self.pc as usize)
            .copied()
            .ok_or(CpuError::PcOutOfRange { pc: self.pc })
    }

    pub(crate) fn load(&self, address: u16) -> Result<u16, CpuError> {
        self.ram
            .get(address as usize)
            .copied()
            .ok_or(CpuError::AddressOutOfRange {
                address,
                pc: self.pc,
            })
    }

    pub(crate) fn store(&mut self, address: u16, value: u16) -> Result<(), CpuError> {
        let pc = self.pc;
        match self.ram.get_mut(address as usize) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(CpuError::AddressOutOfRange { address, pc }),
        }
    }
}
