//! Symbol table: predefined symbols, labels, and allocated variables.

use std::collections::HashMap;

use log::debug;

use hackvm_common::symbols::{MAX_ADDRESS, PREDEFINED_SYMBOLS, VARIABLE_BASE};

/// Maps symbols to ROM addresses (labels) or RAM addresses (everything else).
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, u16>,
    next_variable: u16,
}

impl SymbolTable {
    /// A table seeded with SP, LCL, ARG, THIS, THAT, R0..R15, SCREEN, KBD.
    pub fn new() -> Self {
        let symbols = PREDEFINED_SYMBOLS
            .iter()
            .map(|&(name, addr)| (name.to_string(), addr))
            .collect();
        Self {
            symbols,
            next_variable: VARIABLE_BASE,
        }
    }

    pub fn get(&self, symbol: &str) -> Option<u16> {
        self.symbols.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    /// Bind a label to a ROM address. Returns false if the symbol was
    /// already bound, leaving the old binding in place.
    pub fn insert_label(&mut self, label: &str, rom_address: u16) -> bool {
        if self.contains(label) {
            return false;
        }
        debug!("label {label} = {rom_address}");
        self.symbols.insert(label.to_string(), rom_address);
        true
    }

    /// Address of `symbol`, allocating the next free variable cell on
    /// first sight. `None` once RAM up to 32767 has been handed out.
    pub fn resolve_variable(&mut self, symbol: &str) -> Option<u16> {
        if let Some(addr) = self.get(symbol) {
            return Some(addr);
        }
        let addr = self.next_variable;
        if addr > MAX_ADDRESS {
            return None;
        }
        self.next_variable += 1;
        debug!("variable {symbol} = {addr}");
        self.symbols.insert(symbol.to_string(), addr);
        Some(addr)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_machine_locations() {
        let table = SymbolTable::new();
        assert_eq!(table.get("SP"), Some(0));
        assert_eq!(table.get("THAT"), Some(4));
        assert_eq!(table.get("R15"), Some(15));
        assert_eq!(table.get("SCREEN"), Some(16384));
        assert_eq!(table.get("KBD"), Some(24576));
        assert_eq!(table.get("LOOP"), None);
    }

    #[test]
    fn variables_allocate_from_16() {
        let mut table = SymbolTable::new();
        assert_eq!(table.resolve_variable("i"), Some(16));
        assert_eq!(table.resolve_variable("sum"), Some(17));
        assert_eq!(table.resolve_variable("i"), Some(16));
        assert_eq!(table.resolve_variable("R2"), Some(2));
    }

    #[test]
    fn labels_do_not_consume_variable_cells() {
        let mut table = SymbolTable::new();
        assert!(table.insert_label("LOOP", 10));
        assert_eq!(table.resolve_variable("LOOP"), Some(10));
        assert_eq!(table.resolve_variable("x"), Some(16));
    }

    #[test]
    fn variables_stop_at_top_of_ram() {
        let mut table = SymbolTable::new();
        table.next_variable = MAX_ADDRESS;
        assert_eq!(table.resolve_variable("last"), Some(32767));
        assert_eq!(table.resolve_variable("over"), None);
        assert_eq!(table.resolve_variable("last"), Some(32767));
        assert!(!table.contains("over"));
    }

    #[test]
    fn duplicate_label_rejected() {
        let mut table = SymbolTable::new();
        assert!(table.insert_label("LOOP", 3));
        assert!(!table.insert_label("LOOP", 9));
        assert_eq!(table.get("LOOP"), Some(3));
        assert!(!table.insert_label("SP", 1));
    }
}
