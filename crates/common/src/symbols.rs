//! Fixed memory layout of the Hack machine.
//!
//! These addresses are the contract between the translator, the assembler
//! and the CPU emulator. Nothing here is mutable.

/// Stack pointer register.
pub const SP: u16 = 0;
/// Base of the `local` segment.
pub const LCL: u16 = 1;
/// Base of the `argument` segment.
pub const ARG: u16 = 2;
/// Base of the `this` segment.
pub const THIS: u16 = 3;
/// Base of the `that` segment.
pub const THAT: u16 = 4;

/// `pointer 0` aliases THIS, `pointer 1` aliases THAT.
pub const POINTER_BASE: u16 = 3;
/// `temp 0..7` lives in R5..R12.
pub const TEMP_BASE: u16 = 5;
/// First scratch register available to generated code.
pub const SCRATCH_0: &str = "R13";
/// Second scratch register available to generated code.
pub const SCRATCH_1: &str = "R14";

/// First RAM address handed out to assembler variables.
pub const VARIABLE_BASE: u16 = 16;
/// Initial stack pointer set by the bootstrap sequence.
pub const STACK_BASE: u16 = 256;
/// Memory-mapped screen.
pub const SCREEN: u16 = 16384;
/// Memory-mapped keyboard.
pub const KBD: u16 = 24576;

/// Number of addressable RAM words.
pub const RAM_SIZE: usize = 32768;
/// Number of instruction words the ROM holds.
pub const ROM_SIZE: usize = 32768;
/// Largest value an A-instruction can load.
pub const MAX_ADDRESS: u16 = 32767;

/// Symbols every assembly program starts with.
pub const PREDEFINED_SYMBOLS: [(&str, u16); 23] = [
    ("SP", SP),
    ("LCL", LCL),
    ("ARG", ARG),
    ("THIS", THIS),
    ("THAT", THAT),
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", SCREEN),
    ("KBD", KBD),
];

/// Look up a predefined symbol.
pub fn predefined(name: &str) -> Option<u16> {
    PREDEFINED_SYMBOLS
        .iter()
        .find(|(sym, _)| *sym == name)
        .map(|&(_, addr)| addr)
}

/// Whether `name` is usable as an assembler symbol.
///
/// Symbols are letters, digits, `_`, `.`, `$` and `:`, and may not begin
/// with a digit.
pub fn is_valid_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => false,
        Some(c) if is_symbol_char(c) => chars.all(is_symbol_char),
        _ => false,
    }
}

/// Whether `name` is usable as a VM label, function or unit name.
///
/// Same as [`is_valid_symbol`] without `$`, which the translator reserves
/// for the symbols it builds from these names.
pub fn is_valid_vm_name(name: &str) -> bool {
    is_valid_symbol(name) && !name.contains('$')
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':')
}
