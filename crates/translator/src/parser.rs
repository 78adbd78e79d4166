//! Parser for single VM lines → [`Command`].
//!
//! Stateless: each line is classified on its own, with no lookahead.

use crate::error::CommandError;
use hackvm_common::symbols::{is_valid_vm_name, MAX_ADDRESS};
use hackvm_common::{ArithmeticOp, Command, Segment};

/// Parse one comment-stripped, trimmed, non-empty line of VM code.
pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let Some((&keyword, args)) = fields.split_first() else {
        return Err(CommandError::malformed(line, "empty command"));
    };

    if let Some(op) = ArithmeticOp::from_mnemonic(keyword) {
        expect_arity(line, args, 0)?;
        return Ok(Command::Arithmetic(op));
    }

    let command = match keyword {
        "push" | "pop" => {
            expect_arity(line, args, 2)?;
            let segment = Segment::from_name(args[0]).ok_or_else(|| {
                CommandError::malformed(line, format!("unknown segment '{}'", args[0]))
            })?;
            let index = parse_number(line, args[1], "index")?;
            if keyword == "push" {
                Command::Push(segment, index)
            } else {
                Command::Pop(segment, index)
            }
        }

        "label" | "goto" | "if-goto" => {
            expect_arity(line, args, 1)?;
            let label = parse_symbol(line, args[0])?;
            match keyword {
                "label" => Command::Label(label),
                "goto" => Command::Goto(label),
                _ => Command::IfGoto(label),
            }
        }

        "function" | "call" => {
            expect_arity(line, args, 2)?;
            let name = parse_symbol(line, args[0])?;
            let count = parse_number(line, args[1], "count")?;
            if keyword == "function" {
                Command::Function {
                    name,
                    locals: count,
                }
            } else {
                Command::Call { name, args: count }
            }
        }

        "return" => {
            expect_arity(line, args, 0)?;
            Command::Return
        }

        other => {
            return Err(CommandError::UnknownCommand {
                token: other.to_string(),
            })
        }
    };

    check_operands(&command)?;
    Ok(command)
}

/// Reject commands whose operands are well-formed text but have no
/// meaning on the target machine.
pub fn check_operands(command: &Command) -> Result<(), CommandError> {
    match command {
        Command::Pop(Segment::Constant, _) => Err(CommandError::malformed(
            &command.to_string(),
            "cannot pop into the constant segment",
        )),
        Command::Push(Segment::Constant, value) if *value > MAX_ADDRESS => {
            Err(CommandError::malformed(
                &command.to_string(),
                format!("constant {value} exceeds {MAX_ADDRESS}"),
            ))
        }
        Command::Push(seg, index) | Command::Pop(seg, index) if *index > seg.max_index() => {
            Err(CommandError::malformed(
                &command.to_string(),
                format!("{seg} index must be at most {}", seg.max_index()),
            ))
        }
        Command::Push(..) | Command::Pop(..) => Ok(()),
        Command::Function { name, locals: count } | Command::Call { name, args: count } => {
            check_name(command, name)?;
            if *count > MAX_ADDRESS {
                Err(CommandError::malformed(
                    &command.to_string(),
                    format!("count {count} exceeds {MAX_ADDRESS}"),
                ))
            } else {
                Ok(())
            }
        }
        Command::Label(name) | Command::Goto(name) | Command::IfGoto(name) => {
            check_name(command, name)
        }
        Command::Arithmetic(_) | Command::Return => Ok(()),
    }
}

fn check_name(command: &Command, name: &str) -> Result<(), CommandError> {
    if is_valid_vm_name(name) {
        Ok(())
    } else {
        Err(CommandError::malformed(
            &command.to_string(),
            format!("'{name}' is not a valid name"),
        ))
    }
}

fn expect_arity(line: &str, args: &[&str], expected: usize) -> Result<(), CommandError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CommandError::malformed(
            line,
            format!("expected {expected} operand(s), found {}", args.len()),
        ))
    }
}

/// Base-10, digits only, must fit in a word.
fn parse_number(line: &str, field: &str, what: &str) -> Result<u16, CommandError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::malformed(
            line,
            format!("{what} must be a non-negative integer"),
        ));
    }
    field
        .parse()
        .map_err(|_| CommandError::malformed(line, format!("{what} {field} is out of range")))
}

fn parse_symbol(line: &str, field: &str) -> Result<String, CommandError> {
    if is_valid_vm_name(field) {
        Ok(field.to_string())
    } else {
        Err(CommandError::malformed(
            line,
            format!("'{field}' is not a valid name"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(line: &str) -> bool {
        matches!(
            parse_line(line),
            Err(CommandError::MalformedCommand { .. })
        )
    }

    #[test]
    fn arithmetic() {
        assert_eq!(parse_line("add"), Ok(Command::Arithmetic(ArithmeticOp::Add)));
        assert_eq!(parse_line("not"), Ok(Command::Arithmetic(ArithmeticOp::Not)));
        assert_eq!(parse_line("lt"), Ok(Command::Arithmetic(ArithmeticOp::Lt)));
    }

    #[test]
    fn push_and_pop() {
        assert_eq!(
            parse_line("push constant 7"),
            Ok(Command::Push(Segment::Constant, 7))
        );
        assert_eq!(
            parse_line("pop   local\t2"),
            Ok(Command::Pop(Segment::Local, 2))
        );
        assert_eq!(
            parse_line("push static 12"),
            Ok(Command::Push(Segment::Static, 12))
        );
    }

    #[test]
    fn branching_labels_are_verbatim() {
        assert_eq!(
            parse_line("label LOOP_START"),
            Ok(Command::Label("LOOP_START".into()))
        );
        assert_eq!(parse_line("goto END"), Ok(Command::Goto("END".into())));
        assert_eq!(
            parse_line("if-goto Main.x:y"),
            Ok(Command::IfGoto("Main.x:y".into()))
        );
    }

    #[test]
    fn function_call_return() {
        assert_eq!(
            parse_line("function Main.fib 2"),
            Ok(Command::Function {
                name: "Main.fib".into(),
                locals: 2
            })
        );
        assert_eq!(
            parse_line("call Main.fib 1"),
            Ok(Command::Call {
                name: "Main.fib".into(),
                args: 1
            })
        );
        assert_eq!(parse_line("return"), Ok(Command::Return));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_line("mul"),
            Err(CommandError::UnknownCommand {
                token: "mul".into()
            })
        );
        assert_eq!(
            parse_line("Push constant 1"),
            Err(CommandError::UnknownCommand {
                token: "Push".into()
            })
        );
    }

    #[test]
    fn bad_index() {
        assert!(malformed("push local x"));
        assert!(malformed("push local -1"));
        assert!(malformed("push local +1"));
        assert!(malformed("push local 70000"));
    }

    #[test]
    fn bad_count() {
        assert!(malformed("function f"));
        assert!(malformed("function f two"));
        assert!(malformed("call f -3"));
    }

    #[test]
    fn unknown_segment() {
        assert_eq!(
            parse_line("push heap 0"),
            Err(CommandError::MalformedCommand {
                command: "push heap 0".into(),
                reason: "unknown segment 'heap'".into()
            })
        );
    }

    #[test]
    fn wrong_operand_count() {
        assert!(malformed("push local"));
        assert!(malformed("push local 1 2"));
        assert!(malformed("add 1"));
        assert!(malformed("return 0"));
        assert!(malformed("label"));
    }

    #[test]
    fn pointer_index_bounds() {
        assert!(parse_line("pop pointer 1").is_ok());
        assert_eq!(
            parse_line("push pointer 2"),
            Err(CommandError::MalformedCommand {
                command: "push pointer 2".into(),
                reason: "pointer index must be at most 1".into()
            })
        );
    }

    #[test]
    fn temp_index_bounds() {
        assert_eq!(parse_line("push temp 7"), Ok(Command::Push(Segment::Temp, 7)));
        assert_eq!(
            parse_line("pop temp 8"),
            Err(CommandError::MalformedCommand {
                command: "pop temp 8".into(),
                reason: "temp index must be at most 7".into()
            })
        );
        assert!(malformed("push temp 65535"));
    }

    #[test]
    fn indices_fit_an_a_instruction() {
        assert!(parse_line("push local 32767").is_ok());
        assert!(parse_line("pop static 32767").is_ok());
        assert_eq!(
            parse_line("push local 40000"),
            Err(CommandError::MalformedCommand {
                command: "push local 40000".into(),
                reason: "local index must be at most 32767".into()
            })
        );
        assert!(malformed("pop that 32768"));
    }

    #[test]
    fn counts_fit_an_a_instruction() {
        assert!(parse_line("function f 32767").is_ok());
        assert_eq!(
            parse_line("function f 40000"),
            Err(CommandError::MalformedCommand {
                command: "function f 40000".into(),
                reason: "count 40000 exceeds 32767".into()
            })
        );
        assert!(malformed("call f 32768"));
    }

    #[test]
    fn constant_rules() {
        assert!(malformed("pop constant 0"));
        assert!(parse_line("push constant 32767").is_ok());
        assert!(malformed("push constant 32768"));
    }

    #[test]
    fn invalid_label_text() {
        assert!(malformed("label 1st"));
        assert!(malformed("goto a-b"));
    }

    #[test]
    fn dollar_is_reserved() {
        assert!(malformed("label ret$0"));
        assert!(malformed("function Main.f$ret.0 0"));
        assert!(malformed("call A$B 0"));
    }

    #[test]
    fn built_commands_are_checked_too() {
        let bad = Command::Call {
            name: "Sys$init".into(),
            args: 0,
        };
        assert_eq!(
            check_operands(&bad),
            Err(CommandError::MalformedCommand {
                command: "call Sys$init 0".into(),
                reason: "'Sys$init' is not a valid name".into()
            })
        );
    }
}
