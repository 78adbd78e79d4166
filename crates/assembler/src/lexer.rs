//! Line classifier for Hack assembly text.

use crate::error::AsmError;
use hackvm_common::symbols::{is_valid_symbol, MAX_ADDRESS};

/// Operand of an A-instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Address {
    Constant(u16),
    Symbol(String),
}

/// A single classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    /// `@value` or `@symbol`.
    A(Address),
    /// `dest=comp;jump`, with dest and jump optional.
    C {
        dest: Option<String>,
        comp: String,
        jump: Option<String>,
    },
    /// `(LABEL)` pseudo-instruction.
    L(String),
}

/// Classify one line of assembly.
///
/// Returns `Ok(None)` for blank lines and comment-only lines. Comments
/// start with `//` and extend to end of line.
pub(crate) fn classify_line(raw: &str, line_num: usize) -> Result<Option<Line>, AsmError> {
    let line = match raw.find("//") {
        Some(pos) => &raw[..pos],
        None => raw,
    }
    .trim();

    if line.is_empty() {
        return Ok(None);
    }

    if let Some(operand) = line.strip_prefix('@') {
        return classify_address(operand, line_num).map(|a| Some(Line::A(a)));
    }

    if let Some(rest) = line.strip_prefix('(') {
        let label = rest.strip_suffix(')').unwrap_or("");
        if !is_valid_symbol(label) {
            return Err(AsmError::InvalidSymbol {
                line: line_num,
                token: line.to_string(),
            });
        }
        return Ok(Some(Line::L(label.to_string())));
    }

    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let (head, jump) = match compact.split_once(';') {
        Some((head, jump)) => (head, Some(jump.to_string())),
        None => (compact.as_str(), None),
    };
    let (dest, comp) = match head.split_once('=') {
        Some((dest, comp)) => (Some(dest.to_string()), comp),
        None => (None, head),
    };

    Ok(Some(Line::C {
        dest,
        comp: comp.to_string(),
        jump,
    }))
}

fn classify_address(operand: &str, line_num: usize) -> Result<Address, AsmError> {
    if operand.as_bytes().first().is_some_and(|b| b.is_ascii_digit()) {
        if !operand.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AsmError::InvalidSymbol {
                line: line_num,
                token: operand.to_string(),
            });
        }
        return match operand.parse::<u16>() {
            Ok(value) if value <= MAX_ADDRESS => Ok(Address::Constant(value)),
            _ => Err(AsmError::AddressOutOfRange {
                line: line_num,
                token: operand.to_string(),
            }),
        };
    }

    if is_valid_symbol(operand) {
        Ok(Address::Symbol(operand.to_string()))
    } else {
        Err(AsmError::InvalidSymbol {
            line: line_num,
            token: operand.to_string(),
        })
    }
}
