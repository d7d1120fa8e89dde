// src/cursor/decrypting.rs
//! Decrypting cursor decorator
//!
//! Wraps any [`RowSource`] bound to a table and is itself a [`RowSource`],
//! so it can stand in wherever a plain cursor is expected. On the first
//! column access it works out which column indices are encrypted for that
//! table and keeps the answer for the cursor's lifetime; the column shape
//! does not change between rows. The decrypting session is created lazily
//! and reused.
//!
//! Text access on an encrypted column returns plaintext, numeric access
//! parses that plaintext, and blob or buffer access is refused. Plain
//! columns pass straight through to the wrapped cursor.

use std::cell::RefCell;
use std::str::FromStr;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::context::EncryptionContext;
use crate::crypto::{decrypt_text, DecryptSession};
use crate::cursor::RowSource;
use crate::error::{CipherError, CoreError, Result};

pub struct DecryptingCursor<'ctx, C: RowSource> {
    ctx: &'ctx EncryptionContext,
    inner: C,
    table: Option<String>,
    encrypted_columns: OnceCell<Vec<bool>>,
    session: RefCell<Option<DecryptSession>>,
}

impl<'ctx, C: RowSource> DecryptingCursor<'ctx, C> {
    /// `table` is the table the rows come from; `None` means no column is
    /// treated as encrypted.
    pub fn new(ctx: &'ctx EncryptionContext, inner: C, table: Option<&str>) -> Self {
        Self {
            ctx,
            inner,
            table: table.map(str::to_string),
            encrypted_columns: OnceCell::new(),
            session: RefCell::new(None),
        }
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    pub fn column_index_or_err(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| CoreError::UnknownColumn(name.to_string()))
    }

    pub fn get_text_by_name(&self, name: &str) -> Result<Option<String>> {
        let index = self.column_index_or_err(name)?;
        self.get_text(index)
    }

    /// Whether column `index` holds ciphertext
    pub fn is_column_encrypted(&self, index: usize) -> Result<bool> {
        self.check_column_index(index)?;
        let flags = self
            .encrypted_columns
            .get_or_try_init(|| self.build_encrypted_columns())?;
        Ok(flags.get(index).copied().unwrap_or(false))
    }

    fn check_column_index(&self, index: usize) -> Result<()> {
        let count = self.inner.column_count();
        if index >= count {
            return Err(CoreError::IndexOutOfBounds { index, count });
        }
        Ok(())
    }

    fn build_encrypted_columns(&self) -> Result<Vec<bool>> {
        let count = self.inner.column_count();
        let flags = match &self.table {
            None => vec![false; count],
            Some(table) => {
                let settings = self.ctx.settings()?;
                let table_settings = settings.table(table);
                (0..count)
                    .map(|i| match (table_settings, self.inner.column_name(i)) {
                        (Some(t), Some(name)) => t.is_encrypted(name),
                        _ => false,
                    })
                    .collect()
            }
        };
        debug!(
            table = self.table.as_deref().unwrap_or("<none>"),
            columns = count,
            encrypted = flags.iter().filter(|f| **f).count(),
            "encrypted column map built"
        );
        Ok(flags)
    }

    fn decrypt_column(&self, index: usize) -> Result<Option<String>> {
        let stored = self.inner.get_text(index)?;
        let mut slot = self.session.borrow_mut();
        if slot.is_none() {
            *slot = Some(self.ctx.init_for_decrypt()?);
        }
        let session = slot
            .as_mut()
            .ok_or(CoreError::Cipher(CipherError::MissingKey))?;
        decrypt_text(session, stored.as_deref()).map_err(CoreError::CursorDecryption)
    }

    // Empty plaintext reads as zero; anything else must parse. Float
    // getters tolerate surrounding whitespace, integer getters do not.
    fn decrypted_number<T: FromStr + Default>(
        &self,
        index: usize,
        target: &'static str,
        trim_whitespace: bool,
    ) -> Result<T> {
        let Some(text) = self.decrypt_column(index)? else {
            return Ok(T::default());
        };
        let text = if trim_whitespace { text.trim() } else { text.as_str() };
        if text.is_empty() {
            return Ok(T::default());
        }
        text.parse().map_err(|_| CoreError::NumericParse {
            column: index,
            target,
        })
    }
}

impl<C: RowSource> RowSource for DecryptingCursor<'_, C> {
    fn column_count(&self) -> usize {
        self.inner.column_count()
    }

    fn column_name(&self, index: usize) -> Option<&str> {
        self.inner.column_name(index)
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.inner.column_index(name)
    }

    fn move_to_next(&mut self) -> Result<bool> {
        self.inner.move_to_next()
    }

    fn is_null(&self, index: usize) -> Result<bool> {
        self.check_column_index(index)?;
        self.inner.is_null(index)
    }

    /// Column text, decrypted if the column is encrypted
    fn get_text(&self, index: usize) -> Result<Option<String>> {
        if self.is_column_encrypted(index)? {
            return self.decrypt_column(index);
        }
        self.inner.get_text(index)
    }

    /// Raw bytes; refused for encrypted columns
    fn get_blob(&self, index: usize) -> Result<Option<Vec<u8>>> {
        if self.is_column_encrypted(index)? {
            return Err(CoreError::Unsupported(
                "blob encryption is not supported; use get_text instead",
            ));
        }
        self.inner.get_blob(index)
    }

    /// Buffer fill; refused for encrypted columns
    fn copy_text_to_buffer(&self, index: usize, buffer: &mut String) -> Result<()> {
        if self.is_column_encrypted(index)? {
            return Err(CoreError::Unsupported(
                "copy_text_to_buffer is not supported for encrypted data; use get_text instead",
            ));
        }
        self.inner.copy_text_to_buffer(index, buffer)
    }

    fn get_i16(&self, index: usize) -> Result<i16> {
        if self.is_column_encrypted(index)? {
            return self.decrypted_number(index, "i16", false);
        }
        self.inner.get_i16(index)
    }

    fn get_i32(&self, index: usize) -> Result<i32> {
        if self.is_column_encrypted(index)? {
            return self.decrypted_number(index, "i32", false);
        }
        self.inner.get_i32(index)
    }

    fn get_i64(&self, index: usize) -> Result<i64> {
        if self.is_column_encrypted(index)? {
            return self.decrypted_number(index, "i64", false);
        }
        self.inner.get_i64(index)
    }

    fn get_f32(&self, index: usize) -> Result<f32> {
        if self.is_column_encrypted(index)? {
            return self.decrypted_number(index, "f32", true);
        }
        self.inner.get_f32(index)
    }

    fn get_f64(&self, index: usize) -> Result<f64> {
        if self.is_column_encrypted(index)? {
            return self.decrypted_number(index, "f64", true);
        }
        self.inner.get_f64(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::MemoryRows;
    use crate::row::Value;
    use crate::settings::EncryptionSettings;

    fn context() -> EncryptionContext {
        let mut ctx = EncryptionContext::new();
        ctx.set_password("unit-test").unwrap();
        ctx.set_settings_provider(EncryptionSettings::new().with_table("t", ["secret"]));
        ctx
    }

    #[test]
    fn index_is_checked_before_settings_are_consulted() {
        // No provider installed: a settings lookup would fail with NoProvider
        let ctx = EncryptionContext::new();
        let rows = MemoryRows::new(["a"]).with_row(vec![Value::from("x")]).unwrap();
        let mut cursor = DecryptingCursor::new(&ctx, rows, Some("t"));
        cursor.move_to_next().unwrap();
        assert!(matches!(
            cursor.get_text(1),
            Err(CoreError::IndexOutOfBounds { index: 1, count: 1 })
        ));
        assert!(matches!(
            cursor.get_text(0),
            Err(CoreError::Configuration(_))
        ));
    }

    #[test]
    fn unbound_table_passes_everything_through() {
        let ctx = context();
        let rows = MemoryRows::new(["secret"])
            .with_row(vec![Value::from("not ciphertext")])
            .unwrap();
        let mut cursor = ctx.decrypting_cursor(rows, None);
        cursor.move_to_next().unwrap();
        assert_eq!(
            cursor.get_text(0).unwrap().as_deref(),
            Some("not ciphertext")
        );
    }

    #[test]
    fn garbage_in_encrypted_column_is_fatal() {
        let ctx = context();
        let rows = MemoryRows::new(["secret"])
            .with_row(vec![Value::from("AAAA")])
            .unwrap();
        let mut cursor = ctx.decrypting_cursor(rows, Some("t"));
        cursor.move_to_next().unwrap();
        let err = cursor.get_text(0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CursorDecryption(CipherError::Corrupt(3))
        ));
        assert!(err.is_data_integrity());
    }
}
