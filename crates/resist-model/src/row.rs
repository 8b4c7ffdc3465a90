#![deny(unsafe_code)]

use std::collections::BTreeMap;

/// One decoded relation or reference row: field name to raw value.
///
/// Absence of a field is meaningful and distinct from an empty value — the
/// HIV rule in the joiner keys on a `Disease_ID` field being absent, not
/// empty. Callers must therefore never insert placeholder empty strings for
/// fields the source row did not carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRow {
    fields: BTreeMap<String, String>,
}

impl DecodedRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl FromIterator<(String, String)> for DecodedRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_not_empty() {
        let mut row = DecodedRow::new();
        row.insert("Disease_ID", "");

        assert!(row.contains("Disease_ID"));
        assert_eq!(row.get("Disease_ID"), Some(""));
        assert!(!row.contains("Drug_ID"));
        assert_eq!(row.get("Drug_ID"), None);
    }
}
