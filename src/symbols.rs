use std::collections::HashMap;

use crate::error::AsmError;

/// Label name to byte offset, filled during pass 1.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    labels: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` at `offset`. A second definition is rejected and the
    /// first one is kept.
    pub fn define(&mut self, name: &str, offset: u32) -> Result<(), AsmError> {
        if self.labels.contains_key(name) {
            return Err(AsmError::DuplicateLabel(name.to_string()));
        }
        self.labels.insert(name.to_string(), offset);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Labels ordered by offset, then name.
    pub fn by_offset(&self) -> Vec<(&str, u32)> {
        let mut all: Vec<_> = self.iter().collect();
        all.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_definition_wins() {
        let mut syms = SymbolTable::new();
        syms.define("loop", 4).unwrap();
        let err = syms.define("loop", 8).unwrap_err();
        assert_eq!(err, AsmError::DuplicateLabel("loop".into()));
        assert_eq!(syms.get("loop"), Some(4));
        assert_eq!(syms.len(), 1);
    }

    #[test]
    fn ordered_by_offset() {
        let mut syms = SymbolTable::new();
        assert!(syms.is_empty());
        syms.define("end", 0x10).unwrap();
        syms.define("start", 0).unwrap();
        syms.define("alias", 0x10).unwrap();
        assert!(!syms.is_empty());
        assert_eq!(syms.by_offset(), vec![("start", 0), ("alias", 0x10), ("end", 0x10)]);
    }
}
