// src/settings/model.rs
//! Which columns of which tables hold ciphertext
//!
//! Encryption is opt-in: a column absent from its table's set is plain.
//! Table and column names are matched exactly (case-sensitive).

use std::collections::{HashMap, HashSet};

/// Encrypted columns of a single table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedTableSettings {
    table_name: String,
    encrypted_columns: HashSet<String>,
}

impl EncryptedTableSettings {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            encrypted_columns: HashSet::new(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn encrypted_columns(&self) -> &HashSet<String> {
        &self.encrypted_columns
    }

    /// Returns `false` if the column was already marked
    pub fn mark_column_encrypted(&mut self, column: impl Into<String>) -> bool {
        self.encrypted_columns.insert(column.into())
    }

    /// Returns `false` if the column was not marked
    pub fn mark_column_unencrypted(&mut self, column: &str) -> bool {
        self.encrypted_columns.remove(column)
    }

    pub fn is_encrypted(&self, column: &str) -> bool {
        self.encrypted_columns.contains(column)
    }
}

/// Table name → encrypted columns. Built once, then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptionSettings {
    tables: HashMap<String, EncryptedTableSettings>,
}

impl EncryptionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience builder: mark `columns` of `table` encrypted
    pub fn with_table<I, S>(mut self, table: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut settings = self
            .tables
            .remove(table)
            .unwrap_or_else(|| EncryptedTableSettings::new(table));
        for column in columns {
            settings.mark_column_encrypted(column);
        }
        self.insert_table(settings);
        self
    }

    /// Adds or replaces the entry for `table.table_name()`
    pub fn insert_table(
        &mut self,
        table: EncryptedTableSettings,
    ) -> Option<EncryptedTableSettings> {
        self.tables.insert(table.table_name.clone(), table)
    }

    pub fn table(&self, name: &str) -> Option<&EncryptedTableSettings> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &EncryptedTableSettings> {
        self.tables.values()
    }

    pub fn is_column_encrypted(&self, table: &str, column: &str) -> bool {
        self.table(table).is_some_and(|t| t.is_encrypted(column))
    }

    /// Encrypted column names for `table`, sorted; empty if the table is unknown
    pub fn encrypted_columns(&self, table: &str) -> Vec<&str> {
        let mut columns: Vec<&str> = self
            .table(table)
            .map(|t| t.encrypted_columns.iter().map(String::as_str).collect())
            .unwrap_or_default();
        columns.sort_unstable();
        columns
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<EncryptedTableSettings> for EncryptionSettings {
    fn from_iter<T: IntoIterator<Item = EncryptedTableSettings>>(iter: T) -> Self {
        let mut settings = Self::new();
        for table in iter {
            settings.insert_table(table);
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_unmark() {
        let mut t = EncryptedTableSettings::new("users");
        assert!(t.mark_column_encrypted("ssn"));
        assert!(!t.mark_column_encrypted("ssn"));
        assert!(t.is_encrypted("ssn"));
        assert!(t.mark_column_unencrypted("ssn"));
        assert!(!t.is_encrypted("ssn"));
        assert!(!t.mark_column_unencrypted("ssn"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let s = EncryptionSettings::new().with_table("Users", ["SSN"]);
        assert!(s.is_column_encrypted("Users", "SSN"));
        assert!(!s.is_column_encrypted("users", "SSN"));
        assert!(!s.is_column_encrypted("Users", "ssn"));
    }

    #[test]
    fn with_table_merges_columns() {
        let s = EncryptionSettings::new()
            .with_table("t", ["b"])
            .with_table("t", ["a"]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.encrypted_columns("t"), vec!["a", "b"]);
        assert!(s.encrypted_columns("missing").is_empty());
    }
}
