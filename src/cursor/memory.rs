// src/cursor/memory.rs
//! Materialized result set that behaves like a SQLite cursor

use crate::cursor::RowSource;
use crate::error::{CoreError, Result};
use crate::row::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    position: Option<usize>,
}

impl MemoryRows {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            position: None,
        }
    }

    /// Append a row; it must have exactly one value per column
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(CoreError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn with_row(mut self, row: Vec<Value>) -> Result<Self> {
        self.push_row(row)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    fn value(&self, index: usize) -> Result<&Value> {
        let row = self
            .position
            .and_then(|p| self.rows.get(p))
            .ok_or(CoreError::NoCurrentRow)?;
        row.get(index).ok_or(CoreError::IndexOutOfBounds {
            index,
            count: self.columns.len(),
        })
    }
}

// Text that does not parse as a number reads as 0
fn text_to_f64(s: &str) -> f64 {
    s.trim().parse().unwrap_or(0.0)
}

fn text_to_i64(s: &str) -> i64 {
    let s = s.trim();
    s.parse()
        .unwrap_or_else(|_| s.parse::<f64>().map_or(0, |f| f as i64))
}

impl RowSource for MemoryRows {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    fn move_to_next(&mut self) -> Result<bool> {
        let next = self.position.map_or(0, |p| p.saturating_add(1));
        self.position = Some(next.min(self.rows.len()));
        Ok(next < self.rows.len())
    }

    fn is_null(&self, index: usize) -> Result<bool> {
        Ok(self.value(index)?.is_null())
    }

    fn get_text(&self, index: usize) -> Result<Option<String>> {
        match self.value(index)? {
            Value::Blob(_) => Err(CoreError::TypeMismatch {
                column: index,
                expected: "text",
            }),
            other => Ok(other.as_text().map(|t| t.into_owned())),
        }
    }

    fn get_blob(&self, index: usize) -> Result<Option<Vec<u8>>> {
        match self.value(index)? {
            Value::Null => Ok(None),
            Value::Blob(b) => Ok(Some(b.clone())),
            Value::Text(s) => Ok(Some(s.as_bytes().to_vec())),
            Value::Integer(_) | Value::Real(_) => Err(CoreError::TypeMismatch {
                column: index,
                expected: "blob",
            }),
        }
    }

    fn get_i64(&self, index: usize) -> Result<i64> {
        match self.value(index)? {
            Value::Null => Ok(0),
            Value::Integer(i) => Ok(*i),
            Value::Real(f) => Ok(*f as i64),
            Value::Text(s) => Ok(text_to_i64(s)),
            Value::Blob(_) => Err(CoreError::TypeMismatch {
                column: index,
                expected: "integer",
            }),
        }
    }

    fn get_f64(&self, index: usize) -> Result<f64> {
        match self.value(index)? {
            Value::Null => Ok(0.0),
            Value::Integer(i) => Ok(*i as f64),
            Value::Real(f) => Ok(*f),
            Value::Text(s) => Ok(text_to_f64(s)),
            Value::Blob(_) => Err(CoreError::TypeMismatch {
                column: index,
                expected: "real",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> MemoryRows {
        MemoryRows::new(["id", "name"])
            .with_row(vec![Value::Integer(1), Value::from("ann")])
            .unwrap()
            .with_row(vec![Value::Integer(2), Value::Null])
            .unwrap()
    }

    #[test]
    fn forward_only_iteration() {
        let mut r = rows();
        assert!(matches!(r.get_i64(0), Err(CoreError::NoCurrentRow)));
        assert!(r.move_to_next().unwrap());
        assert_eq!(r.get_text(1).unwrap().as_deref(), Some("ann"));
        assert!(r.move_to_next().unwrap());
        assert!(r.is_null(1).unwrap());
        assert!(!r.move_to_next().unwrap());
        assert!(!r.move_to_next().unwrap());
        assert!(matches!(r.get_i64(0), Err(CoreError::NoCurrentRow)));
    }

    #[test]
    fn row_width_is_checked() {
        let mut r = MemoryRows::new(["a"]);
        assert!(matches!(
            r.push_row(vec![]),
            Err(CoreError::RowWidth {
                expected: 1,
                found: 0
            })
        ));
    }

    #[test]
    fn sqlite_style_coercions() {
        let mut r = MemoryRows::new(["t", "n", "f"])
            .with_row(vec![Value::from(" 12 "), Value::Null, Value::Real(2.9)])
            .unwrap();
        r.move_to_next().unwrap();
        assert_eq!(r.get_i64(0).unwrap(), 12);
        assert_eq!(r.get_i32(1).unwrap(), 0);
        assert_eq!(r.get_i64(2).unwrap(), 2);
        assert_eq!(r.get_text(2).unwrap().as_deref(), Some("2.9"));
        assert_eq!(r.column_index("f"), Some(2));
        assert_eq!(r.column_index("F"), None);
    }
}
