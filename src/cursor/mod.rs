// src/cursor/mod.rs
//! Read side: the row-accessor capability, an in-memory row set, and the
//! decrypting decorator that sits in front of either.
mod decrypting;
mod memory;

pub use decrypting::DecryptingCursor;
pub use memory::MemoryRows;

use crate::error::Result;

/// Minimal forward-only cursor with random access to the current row's columns.
///
/// Numeric getters follow SQLite conventions: null reads as zero, and the
/// narrower integer/float getters truncate the 64-bit value.
pub trait RowSource {
    fn column_count(&self) -> usize;

    fn column_name(&self, index: usize) -> Option<&str>;

    fn column_index(&self, name: &str) -> Option<usize> {
        (0..self.column_count()).find(|&i| self.column_name(i) == Some(name))
    }

    /// Advance to the next row; `false` once the rows are exhausted
    fn move_to_next(&mut self) -> Result<bool>;

    fn is_null(&self, index: usize) -> Result<bool>;

    fn get_text(&self, index: usize) -> Result<Option<String>>;

    fn get_blob(&self, index: usize) -> Result<Option<Vec<u8>>>;

    /// Fill `buffer` with the column text; null leaves it empty
    fn copy_text_to_buffer(&self, index: usize, buffer: &mut String) -> Result<()> {
        buffer.clear();
        if let Some(text) = self.get_text(index)? {
            buffer.push_str(&text);
        }
        Ok(())
    }

    fn get_i64(&self, index: usize) -> Result<i64>;

    fn get_f64(&self, index: usize) -> Result<f64>;

    fn get_i16(&self, index: usize) -> Result<i16> {
        Ok(self.get_i64(index)? as i16)
    }

    fn get_i32(&self, index: usize) -> Result<i32> {
        Ok(self.get_i64(index)? as i32)
    }

    fn get_f32(&self, index: usize) -> Result<f32> {
        Ok(self.get_f64(index)? as f32)
    }
}
