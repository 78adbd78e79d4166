//! Code emitter: one Hack assembly sequence per VM command.
//!
//! All generated code keeps one invariant: `SP` points at the first free
//! stack slot, so the top of stack is always at `RAM[SP - 1]`.
//!
//! Frame layout built by `call` and consumed by `return`, relative to the
//! callee's `LCL`:
//!
//! ```text
//! LCL - 5   return address
//! LCL - 4   caller LCL
//! LCL - 3   caller ARG
//! LCL - 2   caller THIS
//! LCL - 1   caller THAT
//! LCL + 0   first local
//! ```
//!
//! VM names never contain `$`, so a scoped user label has exactly one.
//! Internal labels tied to a function use `$$` and cannot collide with one.

use crate::error::CommandError;
use crate::output::AsmProgram;
use crate::parser::check_operands;
use hackvm_common::symbols::{SCRATCH_0, SCRATCH_1};
use hackvm_common::{ArithmeticOp, Command, Segment, SegmentBase};

/// Per-run translation state threaded through every emit call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    unit: String,
    function: Option<String>,
    next_id: u32,
}

impl Context {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            function: None,
            next_id: 0,
        }
    }

    /// Switch to a new source unit. The counter keeps running.
    pub fn enter_unit(&mut self, unit: impl Into<String>) {
        self.unit = unit.into();
        self.function = None;
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// The function whose body is currently being emitted, if any.
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Draw a fresh id. Ids are never reused within a run.
    pub fn fresh_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Assembler symbol for a VM label: `<function>$<label>` inside a
    /// function, `<unit>$<label>` before the unit's first function.
    pub fn scoped_label(&self, label: &str) -> String {
        let scope = self.function.as_deref().unwrap_or(&self.unit);
        format!("{scope}${label}")
    }

    fn static_symbol(&self, index: u16) -> String {
        format!("{}.{index}", self.unit)
    }
}

/// Emit the assembly for `command`, preceded by a `// <command>` comment.
pub fn emit(command: &Command, ctx: &mut Context, out: &mut AsmProgram) -> Result<(), CommandError> {
    check_operands(command)?;
    out.push(format!("// {command}"));

    match command {
        Command::Arithmetic(op) => emit_arithmetic(*op, ctx, out),
        Command::Push(seg, index) => emit_push(*seg, *index, ctx, out),
        Command::Pop(seg, index) => emit_pop(*seg, *index, ctx, out),
        Command::Label(label) => out.push(format!("({})", ctx.scoped_label(label))),
        Command::Goto(label) => {
            out.push(format!("@{}", ctx.scoped_label(label)));
            out.push("0;JMP");
        }
        Command::IfGoto(label) => {
            pop_d(out);
            out.push(format!("@{}", ctx.scoped_label(label)));
            out.push("D;JNE");
        }
        Command::Function { name, locals } => emit_function(name, *locals, ctx, out),
        Command::Call { name, args } => emit_call(name, *args, ctx, out),
        Command::Return => emit_return(out),
    }

    Ok(())
}

/// Set `SP` to its initial value and call `entry` with no arguments.
pub fn emit_bootstrap(entry: &str, ctx: &mut Context, out: &mut AsmProgram) -> Result<(), CommandError> {
    out.push("// bootstrap");
    out.extend([
        format!("@{}", hackvm_common::symbols::STACK_BASE),
        "D=A".into(),
        "@SP".into(),
        "M=D".into(),
    ]);
    emit(
        &Command::Call {
            name: entry.to_string(),
            args: 0,
        },
        ctx,
        out,
    )
}

/// Park the CPU in a two-instruction self loop.
pub fn emit_halt(ctx: &mut Context, out: &mut AsmProgram) {
    let label = format!("END_{}", ctx.fresh_id());
    out.push("// halt");
    out.extend([format!("({label})"), format!("@{label}"), "0;JMP".into()]);
}

// ---- Shared sequences ----

/// `*SP = D; SP++`
fn push_d(out: &mut AsmProgram) {
    out.extend(["@SP", "A=M", "M=D", "@SP", "M=M+1"]);
}

/// `SP--; D = *SP`, leaving A at the popped slot.
fn pop_d(out: &mut AsmProgram) {
    out.extend(["@SP", "AM=M-1", "D=M"]);
}

// ---- Arithmetic ----

fn emit_arithmetic(op: ArithmeticOp, ctx: &mut Context, out: &mut AsmProgram) {
    match op {
        ArithmeticOp::Neg => out.extend(["@SP", "A=M-1", "M=-M"]),
        ArithmeticOp::Not => out.extend(["@SP", "A=M-1", "M=!M"]),
        ArithmeticOp::Add => binary(out, "M=D+M"),
        ArithmeticOp::Sub => binary(out, "M=M-D"),
        ArithmeticOp::And => binary(out, "M=D&M"),
        ArithmeticOp::Or => binary(out, "M=D|M"),
        ArithmeticOp::Eq | ArithmeticOp::Gt | ArithmeticOp::Lt => compare(op, ctx, out),
    }
}

/// y in D, then combine into x's slot, which becomes the new top.
fn binary(out: &mut AsmProgram, combine: &str) {
    pop_d(out);
    out.push("A=A-1");
    out.push(combine);
}

/// Branch on `x - y` and overwrite x's slot with -1 or 0.
fn compare(op: ArithmeticOp, ctx: &mut Context, out: &mut AsmProgram) {
    let mnemonic = op.mnemonic().to_uppercase();
    let prefix = format!("{mnemonic}_{}", ctx.fresh_id());

    pop_d(out);
    out.extend(["A=A-1", "D=M-D"]);
    out.push(format!("@{prefix}_TRUE"));
    out.push(format!("D;J{mnemonic}"));
    out.extend(["@SP", "A=M-1", "M=0"]);
    out.push(format!("@{prefix}_END"));
    out.push("0;JMP");
    out.push(format!("({prefix}_TRUE)"));
    out.extend(["@SP", "A=M-1", "M=-1"]);
    out.push(format!("({prefix}_END)"));
}

// ---- Push / pop ----

fn emit_push(seg: Segment, index: u16, ctx: &Context, out: &mut AsmProgram) {
    match seg.base() {
        SegmentBase::Constant => {
            out.push(format!("@{index}"));
            out.push("D=A");
        }
        SegmentBase::Register(base) => {
            out.push(format!("@{base}"));
            out.push("D=M");
            out.push(format!("@{index}"));
            out.extend(["A=D+A", "D=M"]);
        }
        SegmentBase::Fixed(base) => {
            out.push(format!("@{}", base + index));
            out.push("D=M");
        }
        SegmentBase::Static => {
            out.push(format!("@{}", ctx.static_symbol(index)));
            out.push("D=M");
        }
    }
    push_d(out);
}

fn emit_pop(seg: Segment, index: u16, ctx: &Context, out: &mut AsmProgram) {
    match seg.base() {
        SegmentBase::Register(base) => {
            // The target address has to be parked before D is needed
            // for the popped value.
            out.push(format!("@{base}"));
            out.push("D=M");
            out.push(format!("@{index}"));
            out.push("D=D+A");
            out.push(format!("@{SCRATCH_0}"));
            out.push("M=D");
            pop_d(out);
            out.push(format!("@{SCRATCH_0}"));
            out.extend(["A=M", "M=D"]);
        }
        SegmentBase::Fixed(base) => {
            pop_d(out);
            out.push(format!("@{}", base + index));
            out.push("M=D");
        }
        SegmentBase::Static => {
            pop_d(out);
            out.push(format!("@{}", ctx.static_symbol(index)));
            out.push("M=D");
        }
        // Rejected by check_operands.
        SegmentBase::Constant => {}
    }
}

// ---- Functions ----

fn emit_function(name: &str, locals: u16, ctx: &mut Context, out: &mut AsmProgram) {
    ctx.function = Some(name.to_string());
    let id = ctx.fresh_id();
    let init_loop = format!("{name}$$INIT_LOOP.{id}");
    let init_end = format!("{name}$$INIT_END.{id}");

    out.push(format!("({name})"));
    out.push(format!("@{locals}"));
    out.push("D=A");
    out.push(format!("@{init_end}"));
    out.push("D;JLE");
    out.push(format!("@{SCRATCH_0}"));
    out.push("M=D");
    out.push(format!("({init_loop})"));
    out.extend(["@SP", "A=M", "M=0", "@SP", "M=M+1"]);
    out.push(format!("@{SCRATCH_0}"));
    out.push("MD=M-1");
    out.push(format!("@{init_loop}"));
    out.push("D;JGT");
    out.push(format!("({init_end})"));
}

fn emit_call(name: &str, args: u16, ctx: &mut Context, out: &mut AsmProgram) {
    let return_label = format!("{name}$$ret.{}", ctx.fresh_id());

    out.push(format!("@{return_label}"));
    out.push("D=A");
    push_d(out);
    for saved in ["LCL", "ARG", "THIS", "THAT"] {
        out.push(format!("@{saved}"));
        out.push("D=M");
        push_d(out);
    }

    // ARG = SP - 5 - args
    out.extend(["@SP", "D=M", "@5", "D=D-A"]);
    out.push(format!("@{args}"));
    out.extend(["D=D-A", "@ARG", "M=D"]);
    // LCL = SP
    out.extend(["@SP", "D=M", "@LCL", "M=D"]);

    out.push(format!("@{name}"));
    out.push("0;JMP");
    out.push(format!("({return_label})"));
}

fn emit_return(out: &mut AsmProgram) {
    let frame = format!("@{SCRATCH_0}");
    let ret = format!("@{SCRATCH_1}");

    // frame = LCL
    out.extend(["@LCL".to_string(), "D=M".into(), frame.clone(), "M=D".into()]);
    // ret = *(frame - 5), read before the return value can overwrite it
    // when the callee took no arguments
    out.extend(["@5", "A=D-A", "D=M"]);
    out.extend([ret.clone(), "M=D".into()]);
    // *ARG = pop()
    pop_d(out);
    out.extend(["@ARG", "A=M", "M=D"]);
    // SP = ARG + 1
    out.extend(["@ARG", "D=M+1", "@SP", "M=D"]);
    // THAT, THIS, ARG, LCL = *(frame - 1) .. *(frame - 4)
    for restored in ["THAT", "THIS", "ARG", "LCL"] {
        out.extend([frame.clone(), "AM=M-1".into(), "D=M".into()]);
        out.push(format!("@{restored}"));
        out.push("M=D");
    }
    out.extend([ret, "A=M".into(), "0;JMP".into()]);
}
