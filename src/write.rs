// src/write.rs
//! Write-path encryption: rewrite encrypted columns of a row before it is stored

use tracing::trace;

use crate::context::EncryptionContext;
use crate::crypto::{encrypt_text, EncryptSession};
use crate::error::{CoreError, Result};
use crate::row::{RowBuffer, Value};

/// Encrypt `columns` of `row` in place.
///
/// Columns missing from the row, null, or empty are left untouched. An empty
/// row or column list is a no-op. The row is only modified once every
/// column has been encrypted successfully.
pub fn encrypt_row<S: AsRef<str>>(
    session: &mut EncryptSession,
    row: &mut RowBuffer,
    columns: &[S],
) -> Result<()> {
    if columns.is_empty() || row.is_empty() {
        return Ok(());
    }

    let mut replacements = Vec::with_capacity(columns.len());
    for column in columns {
        let column: &str = column.as_ref();
        let Some(value) = row.get(column) else {
            continue;
        };
        if let Value::Blob(bytes) = value {
            if bytes.is_empty() {
                continue;
            }
            return Err(CoreError::Unsupported(
                "blob encryption is not supported; store the value as text",
            ));
        }
        let Some(text) = value.as_text() else {
            continue;
        };
        if let Some(ciphertext) = encrypt_text(session, &text)? {
            replacements.push((column, ciphertext));
        }
    }

    trace!(columns = replacements.len(), "row columns encrypted");
    for (column, ciphertext) in replacements {
        row.put(column, Value::Text(ciphertext));
    }
    Ok(())
}

/// Encrypt whatever columns the settings mark encrypted for `table`
pub fn encrypt_row_for_table(
    ctx: &EncryptionContext,
    session: &mut EncryptSession,
    row: &mut RowBuffer,
    table: &str,
) -> Result<()> {
    let settings = ctx.settings()?;
    let columns = settings.encrypted_columns(table);
    encrypt_row(session, row, columns.as_slice())
}
