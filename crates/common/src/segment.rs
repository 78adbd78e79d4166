//! Virtual memory segments addressed by `push` and `pop`.

use std::fmt;

use crate::symbols::{MAX_ADDRESS, POINTER_BASE, TEMP_BASE};

/// A named region of VM memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Function arguments, based at ARG.
    Argument,
    /// Function locals, based at LCL.
    Local,
    /// Object fields, based at THIS.
    This,
    /// Array elements, based at THAT.
    That,
    /// Pseudo-segment whose "contents" are the index itself.
    Constant,
    /// Per-unit globals, synthesized as `<unit>.<index>` assembler variables.
    Static,
    /// Eight shared cells at R5..R12.
    Temp,
    /// Two cells aliasing THIS and THAT.
    Pointer,
}

/// How a segment resolves to a physical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentBase {
    /// Indirect through a base register holding the segment address.
    Register(&'static str),
    /// Directly at `base + index`.
    Fixed(u16),
    /// A synthesized per-unit symbol.
    Static,
    /// No memory backing.
    Constant,
}

/// All segments, in declaration order.
pub const ALL_SEGMENTS: [Segment; 8] = [
    Segment::Argument,
    Segment::Local,
    Segment::This,
    Segment::That,
    Segment::Constant,
    Segment::Static,
    Segment::Temp,
    Segment::Pointer,
];

impl Segment {
    /// Look up a segment by its VM keyword.
    pub fn from_name(name: &str) -> Option<Segment> {
        ALL_SEGMENTS.iter().find(|seg| seg.name() == name).copied()
    }

    /// The VM keyword for this segment.
    pub fn name(self) -> &'static str {
        match self {
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Constant => "constant",
            Segment::Static => "static",
            Segment::Temp => "temp",
            Segment::Pointer => "pointer",
        }
    }

    pub fn base(self) -> SegmentBase {
        match self {
            Segment::Argument => SegmentBase::Register("ARG"),
            Segment::Local => SegmentBase::Register("LCL"),
            Segment::This => SegmentBase::Register("THIS"),
            Segment::That => SegmentBase::Register("THAT"),
            Segment::Temp => SegmentBase::Fixed(TEMP_BASE),
            Segment::Pointer => SegmentBase::Fixed(POINTER_BASE),
            Segment::Static => SegmentBase::Static,
            Segment::Constant => SegmentBase::Constant,
        }
    }

    /// The base register symbol for `local`, `argument`, `this` and `that`.
    pub fn base_symbol(self) -> Option<&'static str> {
        match self.base() {
            SegmentBase::Register(sym) => Some(sym),
            _ => None,
        }
    }

    /// Largest valid index. Fixed segments stop at their last cell, the
    /// rest at the largest A-instruction operand.
    pub fn max_index(self) -> u16 {
        match self {
            Segment::Pointer => 1,
            Segment::Temp => 7,
            _ => MAX_ADDRESS,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_segments() {
        assert_eq!(Segment::Local.base_symbol(), Some("LCL"));
        assert_eq!(Segment::Argument.base_symbol(), Some("ARG"));
        assert_eq!(Segment::This.base_symbol(), Some("THIS"));
        assert_eq!(Segment::That.base_symbol(), Some("THAT"));
        assert_eq!(Segment::Temp.base_symbol(), None);
        assert_eq!(Segment::Static.base_symbol(), None);
    }

    #[test]
    fn fixed_segments() {
        assert_eq!(Segment::Temp.base(), SegmentBase::Fixed(5));
        assert_eq!(Segment::Pointer.base(), SegmentBase::Fixed(3));
    }

    #[test]
    fn unknown_name() {
        assert_eq!(Segment::from_name("heap"), None);
        assert_eq!(Segment::from_name("Local"), None);
    }

    #[test]
    fn index_bounds() {
        for seg in ALL_SEGMENTS {
            let expected = match seg {
                Segment::Pointer => 1,
                Segment::Temp => 7,
                _ => 32767,
            };
            assert_eq!(seg.max_index(), expected, "{seg}");
        }
    }

    #[test]
    fn fixed_segments_stay_below_scratch() {
        assert_eq!(TEMP_BASE + Segment::Temp.max_index(), 12);
        assert_eq!(POINTER_BASE + Segment::Pointer.max_index(), 4);
    }
}
