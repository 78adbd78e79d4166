//! Bit-pattern tables for C-instruction fields.
//!
//! A C-instruction is `111a cccc ccdd djjj`: the a-bit and six comp bits
//! (7 bits together), three dest bits and three jump bits.

/// comp mnemonic → `a c1..c6`.
pub const COMP_TABLE: [(&str, u16); 28] = [
    ("0", 0b0101010),
    ("1", 0b0111111),
    ("-1", 0b0111010),
    ("D", 0b0001100),
    ("A", 0b0110000),
    ("!D", 0b0001101),
    ("!A", 0b0110001),
    ("-D", 0b0001111),
    ("-A", 0b0110011),
    ("D+1", 0b0011111),
    ("A+1", 0b0110111),
    ("D-1", 0b0001110),
    ("A-1", 0b0110010),
    ("D+A", 0b0000010),
    ("D-A", 0b0010011),
    ("A-D", 0b0000111),
    ("D&A", 0b0000000),
    ("D|A", 0b0010101),
    ("M", 0b1110000),
    ("!M", 0b1110001),
    ("-M", 0b1110011),
    ("M+1", 0b1110111),
    ("M-1", 0b1110010),
    ("D+M", 0b1000010),
    ("D-M", 0b1010011),
    ("M-D", 0b1000111),
    ("D&M", 0b1000000),
    ("D|M", 0b1010101),
];

/// jump mnemonic → `j1 j2 j3` (lt, eq, gt).
pub const JUMP_TABLE: [(&str, u16); 7] = [
    ("JGT", 0b001),
    ("JEQ", 0b010),
    ("JGE", 0b011),
    ("JLT", 0b100),
    ("JNE", 0b101),
    ("JLE", 0b110),
    ("JMP", 0b111),
];

pub fn comp_bits(mnemonic: &str) -> Option<u16> {
    lookup(&COMP_TABLE, mnemonic)
}

pub fn jump_bits(mnemonic: &str) -> Option<u16> {
    lookup(&JUMP_TABLE, mnemonic)
}

/// dest is a set of distinct registers from `A`, `D`, `M` in any order.
/// Repeated letters (`MM`) are rejected.
pub fn dest_bits(mnemonic: &str) -> Option<u16> {
    if mnemonic.is_empty() {
        return None;
    }
    let mut bits = 0u16;
    for c in mnemonic.chars() {
        let bit = match c {
            'A' => 0b100,
            'D' => 0b010,
            'M' => 0b001,
            _ => return None,
        };
        if bits & bit != 0 {
            return None;
        }
        bits |= bit;
    }
    Some(bits)
}

fn lookup(table: &[(&str, u16)], mnemonic: &str) -> Option<u16> {
    table
        .iter()
        .find(|(m, _)| *m == mnemonic)
        .map(|&(_, bits)| bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_dest_set() {
        assert_eq!(dest_bits("M"), Some(0b001));
        assert_eq!(dest_bits("D"), Some(0b010));
        assert_eq!(dest_bits("MD"), Some(0b011));
        assert_eq!(dest_bits("A"), Some(0b100));
        assert_eq!(dest_bits("AM"), Some(0b101));
        assert_eq!(dest_bits("AD"), Some(0b110));
        assert_eq!(dest_bits("AMD"), Some(0b111));
    }

    #[test]
    fn dest_letter_order_is_free() {
        assert_eq!(dest_bits("DM"), dest_bits("MD"));
        assert_eq!(dest_bits("MA"), dest_bits("AM"));
        assert_eq!(dest_bits("DMA"), dest_bits("AMD"));
    }

    #[test]
    fn dest_rejects_repeats_and_junk() {
        assert_eq!(dest_bits("MM"), None);
        assert_eq!(dest_bits("ADA"), None);
        assert_eq!(dest_bits("X"), None);
        assert_eq!(dest_bits(""), None);
    }

    #[test]
    fn comp_a_bit_selects_memory() {
        for (mnemonic, bits) in COMP_TABLE {
            let uses_m = mnemonic.contains('M');
            assert_eq!(bits & 0b1000000 != 0, uses_m, "{mnemonic}");
        }
        assert_eq!(comp_bits("M+D"), None);
    }

    #[test]
    fn jumps() {
        assert_eq!(jump_bits("JMP"), Some(0b111));
        assert_eq!(jump_bits("JLE"), Some(0b110));
        assert_eq!(jump_bits("jmp"), None);
    }
}
