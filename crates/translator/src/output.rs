//! Append-only accumulator for emitted assembly.

use std::io::{self, Write};

/// Hack assembly produced by a translation run, one entry per line.
///
/// Lines are only ever appended; once emitted they are never rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsmProgram {
    lines: Vec<String>,
}

impl AsmProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append several lines in order.
    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines that become ROM words: everything except comments and labels.
    pub fn instruction_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| !l.starts_with("//") && !l.starts_with('('))
            .count()
    }

    /// The program as newline-terminated text.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Stream the program to a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }
}
