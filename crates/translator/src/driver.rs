//! Translation driver: feeds source units through the parser and emitter.

use std::fs;
use std::io;
use std::path::Path;

use hackvm_common::symbols::is_valid_vm_name;
use log::{debug, trace};

use crate::emitter::{emit, emit_bootstrap, emit_halt, Context};
use crate::error::{CommandError, TranslateError};
use crate::output::AsmProgram;
use crate::parser::parse_line;

/// One file's worth of VM code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Unit name, used to scope `static` cells and top-level labels.
    pub name: String,
    pub text: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a unit from disk, naming it after the file stem.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "file name is not UTF-8"))?;
        Ok(Self::new(name, text))
    }
}

/// Run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateConfig {
    /// Emit stack initialization and a call to `entry` before any unit.
    /// When false, a halt loop is appended after the last unit instead.
    pub bootstrap: bool,
    pub entry: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            bootstrap: false,
            entry: "Sys.init".to_string(),
        }
    }
}

/// Owns the state of one translation run.
///
/// Create one per run; never share a `Translator` between programs.
#[derive(Debug)]
pub struct Translator {
    ctx: Context,
    out: AsmProgram,
    bootstrap: bool,
    commands: usize,
}

impl Translator {
    /// Start a run. The bootstrap sequence, if enabled, is emitted here.
    pub fn new(config: &TranslateConfig) -> Result<Self, TranslateError> {
        let mut translator = Self {
            ctx: Context::default(),
            out: AsmProgram::new(),
            bootstrap: config.bootstrap,
            commands: 0,
        };

        if config.bootstrap {
            debug!("emitting bootstrap, entry {}", config.entry);
            emit_bootstrap(&config.entry, &mut translator.ctx, &mut translator.out).map_err(
                |source: CommandError| TranslateError {
                    unit: String::new(),
                    line: 0,
                    source,
                },
            )?;
        }

        Ok(translator)
    }

    /// Translate every command in `unit`, in file order.
    pub fn translate_unit(&mut self, unit: &SourceUnit) -> Result<(), TranslateError> {
        debug!("translating unit {}", unit.name);
        if !is_valid_vm_name(&unit.name) {
            return Err(TranslateError {
                unit: unit.name.clone(),
                line: 0,
                source: CommandError::InvalidUnitName {
                    name: unit.name.clone(),
                },
            });
        }
        self.ctx.enter_unit(unit.name.as_str());

        for (idx, raw) in unit.text.lines().enumerate() {
            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }

            let located = |source: CommandError| TranslateError {
                unit: unit.name.clone(),
                line: idx + 1,
                source,
            };
            let command = parse_line(line).map_err(located)?;
            trace!("{}:{}: {command}", unit.name, idx + 1);
            emit(&command, &mut self.ctx, &mut self.out).map_err(located)?;
            self.commands += 1;
        }

        Ok(())
    }

    /// Number of VM commands translated so far.
    pub fn command_count(&self) -> usize {
        self.commands
    }

    /// Close the run, appending the halt loop when not bootstrapping.
    pub fn finish(mut self) -> AsmProgram {
        if !self.bootstrap {
            emit_halt(&mut self.ctx, &mut self.out);
        }
        self.out
    }
}

/// Translate `units` in the given order into one assembly program.
pub fn translate(units: &[SourceUnit], config: &TranslateConfig) -> Result<AsmProgram, TranslateError> {
    let mut translator = Translator::new(config)?;
    for unit in units {
        translator.translate_unit(unit)?;
    }
    Ok(translator.finish())
}

/// Trim a line and drop any `//` comment.
fn strip_comment(raw: &str) -> &str {
    let line = raw.trim();
    match line.find("//") {
        Some(pos) => line[..pos].trim_end(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comment_variants() {
        assert_eq!(strip_comment("   "), "");
        assert_eq!(strip_comment("// whole line"), "");
        assert_eq!(strip_comment("  push constant 1 // trailing"), "push constant 1");
        assert_eq!(strip_comment("\tadd\r"), "add");
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let unit = SourceUnit::new("Main", "// header\n\npush constant 1\n   \n// done\n");
        let mut translator = Translator::new(&TranslateConfig::default()).unwrap();
        translator.translate_unit(&unit).unwrap();
        assert_eq!(translator.command_count(), 1);
    }

    #[test]
    fn halt_appended_once_without_bootstrap() {
        let units = [
            SourceUnit::new("A", "push constant 1\n"),
            SourceUnit::new("B", "push constant 2\n"),
        ];
        let asm = translate(&units, &TranslateConfig::default()).unwrap();
        let halts = asm.lines().iter().filter(|l| *l == "// halt").count();
        assert_eq!(halts, 1);
        assert_eq!(asm.lines().last().unwrap(), "0;JMP");
    }

    #[test]
    fn bootstrap_emitted_once_before_units() {
        let config = TranslateConfig {
            bootstrap: true,
            entry: "Sys.init".into(),
        };
        let units = [
            SourceUnit::new("Sys", "function Sys.init 0\n"),
            SourceUnit::new("Main", "function Main.main 0\n"),
        ];
        let asm = translate(&units, &config).unwrap();
        let lines = asm.lines();
        assert_eq!(lines[0], "// bootstrap");
        assert_eq!(lines.iter().filter(|l| *l == "// bootstrap").count(), 1);
        assert!(!lines.iter().any(|l| l == "// halt"));
    }

    #[test]
    fn custom_entry_point() {
        let config = TranslateConfig {
            bootstrap: true,
            entry: "Main.main".into(),
        };
        let asm = translate(&[], &config).unwrap();
        assert!(asm.lines().contains(&"// call Main.main 0".to_string()));
    }

    #[test]
    fn error_carries_unit_and_line() {
        let units = [
            SourceUnit::new("Good", "push constant 1\n"),
            SourceUnit::new("Bad", "push constant 1\n\nfrobnicate\n"),
        ];
        let err = translate(&units, &TranslateConfig::default()).unwrap_err();
        assert_eq!(
            err,
            TranslateError {
                unit: "Bad".into(),
                line: 3,
                source: CommandError::UnknownCommand {
                    token: "frobnicate".into()
                },
            }
        );
    }

    #[test]
    fn unit_name_must_be_a_vm_name() {
        for name in ["my-prog", "2048", "Main$1"] {
            let unit = SourceUnit::new(name, "push static 0\n");
            let mut translator = Translator::new(&TranslateConfig::default()).unwrap();
            let err = translator.translate_unit(&unit).unwrap_err();
            assert_eq!(
                err,
                TranslateError {
                    unit: name.into(),
                    line: 0,
                    source: CommandError::InvalidUnitName { name: name.into() },
                }
            );
            assert_eq!(translator.command_count(), 0);
        }
    }

    #[test]
    fn first_error_aborts_the_run() {
        let unit = SourceUnit::new("Main", "pop constant 0\nfoo\n");
        let err = translate(&[unit], &TranslateConfig::default()).unwrap_err();
        assert_eq!(err.line, 1);
        assert!(matches!(err.source, CommandError::MalformedCommand { .. }));
    }

    #[test]
    fn counter_spans_units() {
        let units = [
            SourceUnit::new("A", "eq\n"),
            SourceUnit::new("B", "eq\n"),
        ];
        let asm = translate(&units, &TranslateConfig::default()).unwrap();
        let lines = asm.lines();
        assert!(lines.contains(&"(EQ_0_TRUE)".to_string()));
        assert!(lines.contains(&"(EQ_1_TRUE)".to_string()));
    }
}
