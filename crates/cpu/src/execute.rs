//! Instruction decode, the ALU, and the run loop.

use crate::error::CpuError;
use crate::machine::Cpu;

/// Outcome of one [`Cpu::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// The instruction just executed was the jump of an `(L) @L 0;JMP`
    /// self loop.
    Halted,
}

// C-instruction bit positions.
const A_BIT: u16 = 1 << 12;
const DEST_A: u16 = 1 << 5;
const DEST_D: u16 = 1 << 4;
const DEST_M: u16 = 1 << 3;
const JUMP_LT: u16 = 1 << 2;
const JUMP_EQ: u16 = 1 << 1;
const JUMP_GT: u16 = 1;
const JUMP_MASK: u16 = 0b111;
const DEST_MASK: u16 = 0b111 << 3;

/// The Hack ALU. `control` holds `zx nx zy ny f no`, most significant first.
pub fn alu(x: u16, y: u16, control: u16) -> u16 {
    let bit = |n: u16| control & (1 << n) != 0;

    let mut x = if bit(5) { 0 } else { x };
    if bit(4) {
        x = !x;
    }
    let mut y = if bit(3) { 0 } else { y };
    if bit(2) {
        y = !y;
    }
    let out = if bit(1) { x.wrapping_add(y) } else { x & y };
    if bit(0) {
        !out
    } else {
        out
    }
}

impl Cpu {
    /// Execute one instruction.
    pub fn step(&mut self) -> Result<Status, CpuError> {
        let instr = self.fetch()?;
        let pc = self.pc;
        self.cycles += 1;

        if instr & 0x8000 == 0 {
            self.a = instr;
            self.pc = pc.wrapping_add(1);
            return Ok(Status::Running);
        }

        let address = self.a;
        let y = if instr & A_BIT != 0 {
            self.load(address)?
        } else {
            self.a
        };
        let out = alu(self.d, y, (instr >> 6) & 0b111111);

        if instr & DEST_M != 0 {
            self.store(address, out)?;
        }
        if instr & DEST_A != 0 {
            self.a = out;
        }
        if instr & DEST_D != 0 {
            self.d = out;
        }

        let negative = out & 0x8000 != 0;
        let jump = (instr & JUMP_LT != 0 && negative)
            || (instr & JUMP_EQ != 0 && out == 0)
            || (instr & JUMP_GT != 0 && !negative && out != 0);

        if !jump {
            self.pc = pc.wrapping_add(1);
            return Ok(Status::Running);
        }

        self.pc = address;
        if self.is_self_loop(instr, pc, address) {
            Ok(Status::Halted)
        } else {
            Ok(Status::Running)
        }
    }

    /// Run until the program halts, returning the total cycle count.
    pub fn run(&mut self, max_cycles: u64) -> Result<u64, CpuError> {
        let start = self.cycles;
        loop {
            if self.cycles - start >= max_cycles {
                return Err(CpuError::CycleLimit { limit: max_cycles });
            }
            if self.step()? == Status::Halted {
                return Ok(self.cycles);
            }
        }
    }

    /// An unconditional, side-effect-free jump back to the A-instruction
    /// that loaded its own address.
    fn is_self_loop(&self, instr: u16, pc: u16, target: u16) -> bool {
        instr & JUMP_MASK == JUMP_MASK
            && instr & DEST_MASK == 0
            && pc > 0
            && target == pc - 1
            && self.rom.get(target as usize) == Some(&target)
    }
}
