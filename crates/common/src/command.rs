//! VM commands: the classified form of one line of VM source.

use std::fmt;

use crate::segment::Segment;

/// The nine stack arithmetic and logic commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    /// Pop y, pop x, push x + y.
    Add,
    /// Pop y, pop x, push x - y.
    Sub,
    /// Negate the top of stack.
    Neg,
    /// Pop y, pop x, push true if x == y.
    Eq,
    /// Pop y, pop x, push true if x > y.
    Gt,
    /// Pop y, pop x, push true if x < y.
    Lt,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise not of the top of stack.
    Not,
}

/// All arithmetic ops, in declaration order.
pub const ALL_ARITHMETIC_OPS: [ArithmeticOp; 9] = [
    ArithmeticOp::Add,
    ArithmeticOp::Sub,
    ArithmeticOp::Neg,
    ArithmeticOp::Eq,
    ArithmeticOp::Gt,
    ArithmeticOp::Lt,
    ArithmeticOp::And,
    ArithmeticOp::Or,
    ArithmeticOp::Not,
];

impl ArithmeticOp {
    pub fn from_mnemonic(mnemonic: &str) -> Option<ArithmeticOp> {
        ALL_ARITHMETIC_OPS
            .iter()
            .find(|op| op.mnemonic() == mnemonic)
            .copied()
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Lt => "lt",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or => "or",
            ArithmeticOp::Not => "not",
        }
    }

    /// `neg` and `not` rewrite the top of stack in place.
    pub fn is_unary(self) -> bool {
        matches!(self, ArithmeticOp::Neg | ArithmeticOp::Not)
    }

    /// `eq`, `gt` and `lt` push a boolean.
    pub fn is_comparison(self) -> bool {
        matches!(self, ArithmeticOp::Eq | ArithmeticOp::Gt | ArithmeticOp::Lt)
    }

    /// Net change in stack height.
    pub fn stack_effect(self) -> i8 {
        if self.is_unary() {
            0
        } else {
            -1
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A single VM command with its typed operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Arithmetic(ArithmeticOp),
    Push(Segment, u16),
    Pop(Segment, u16),
    Label(String),
    Goto(String),
    IfGoto(String),
    /// Function entry; `locals` words are zero-initialized.
    Function { name: String, locals: u16 },
    /// Call site; `args` values have already been pushed.
    Call { name: String, args: u16 },
    Return,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Arithmetic(op) => write!(f, "{op}"),
            Command::Push(seg, index) => write!(f, "push {seg} {index}"),
            Command::Pop(seg, index) => write!(f, "pop {seg} {index}"),
            Command::Label(label) => write!(f, "label {label}"),
            Command::Goto(label) => write!(f, "goto {label}"),
            Command::IfGoto(label) => write!(f, "if-goto {label}"),
            Command::Function { name, locals } => write!(f, "function {name} {locals}"),
            Command::Call { name, args } => write!(f, "call {name} {args}"),
            Command::Return => f.write_str("return"),
        }
    }
}
