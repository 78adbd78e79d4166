//! Assembled Hack programs.
//!
//! A program is a sequence of 16-bit words. The `.hack` text form writes
//! each word as sixteen `0`/`1` characters on its own line, most
//! significant bit first.

use crate::error::DecodeError;

/// An assembled Hack program, loaded into ROM from address 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineCode {
    /// The instruction words.
    pub words: Vec<u16>,
}

impl MachineCode {
    pub fn new(words: Vec<u16>) -> Self {
        Self { words }
    }

    /// Render as `.hack` text, one newline-terminated line per word.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.words.len() * 17);
        for word in &self.words {
            text.push_str(&format!("{word:016b}\n"));
        }
        text
    }

    /// Parse `.hack` text. Blank lines are skipped; surrounding
    /// whitespace on a line is ignored.
    pub fn from_text(text: &str) -> Result<Self, DecodeError> {
        let mut words = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_num = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let width = line.chars().count();
            if width != 16 {
                return Err(DecodeError::InvalidWidth {
                    line: line_num,
                    width,
                });
            }

            let mut word = 0u16;
            for c in line.chars() {
                let bit = match c {
                    '0' => 0,
                    '1' => 1,
                    other => {
                        return Err(DecodeError::InvalidDigit {
                            line: line_num,
                            digit: other,
                        })
                    }
                };
                word = (word << 1) | bit;
            }
            words.push(word);
        }

        Ok(Self { words })
    }

    /// Number of words in the program.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the program has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_program() {
        let code = MachineCode::default();
        assert!(code.is_empty());
        assert_eq!(code.to_text(), "");
    }

    #[test]
    fn text_is_msb_first() {
        let code = MachineCode::new(vec![2, 0xEC10]);
        assert_eq!(code.to_text(), "0000000000000010\n1110110000010000\n");
    }

    #[test]
    fn from_text_skips_blank_lines() {
        let code = MachineCode::from_text("\n0000000000000111\n\n  1110101010000111  \n").unwrap();
        assert_eq!(code.words, vec![7, 0xEA87]);
    }

    #[test]
    fn from_text_rejects_short_line() {
        assert_eq!(
            MachineCode::from_text("0000000000000000\n010\n"),
            Err(DecodeError::InvalidWidth { line: 2, width: 3 })
        );
    }

    #[test]
    fn from_text_rejects_bad_digit() {
        assert_eq!(
            MachineCode::from_text("000000000000000x\n"),
            Err(DecodeError::InvalidDigit {
                line: 1,
                digit: 'x'
            })
        );
    }
}
