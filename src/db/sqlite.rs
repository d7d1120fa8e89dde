// src/db/sqlite.rs
//! rusqlite adapter
//!
//! Reads come back as a [`DecryptingCursor`] over the materialized result,
//! so callers iterate rows exactly as they would a plain cursor. TEXT cells
//! that are not valid UTF-8 fail the query instead of being rewritten. Writes run
//! the row through write-path encryption before the statement executes.

use rusqlite::types::{FromSqlError, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, Params};
use tracing::trace;

use crate::context::EncryptionContext;
use crate::cursor::{DecryptingCursor, MemoryRows};
use crate::error::Result;
use crate::row::{RowBuffer, Value};

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Borrowed(match self {
            Value::Null => ValueRef::Null,
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Real(f) => ValueRef::Real(*f),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Blob(b) => ValueRef::Blob(b),
        }))
    }
}

/// TEXT that is not valid UTF-8 is an error rather than a lossy rewrite
impl TryFrom<ValueRef<'_>> for Value {
    type Error = FromSqlError;

    fn try_from(v: ValueRef<'_>) -> std::result::Result<Self, Self::Error> {
        Ok(match v {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(f) => Value::Real(f),
            ValueRef::Text(_) => Value::Text(v.as_str()?.to_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        })
    }
}

/// Quote an identifier for use in generated SQL
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Run `sql` and materialize every row.
///
/// The whole result set is held in memory; page large queries with
/// `LIMIT`/`OFFSET` or a keyset `WHERE` clause.
pub fn query_rows<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<MemoryRows> {
    let mut stmt = conn.prepare(sql)?;
    let column_count = stmt.column_count();
    let mut result = MemoryRows::new(stmt.column_names());

    let mut rows = stmt.query(params)?;
    while let Some(row) = rows.next()? {
        let values = (0..column_count)
            .map(|i| {
                let cell = row.get_ref(i)?;
                Value::try_from(cell).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(i, cell.data_type(), Box::new(e))
                })
            })
            .collect::<rusqlite::Result<Vec<_>>>()?;
        result.push_row(values)?;
    }
    trace!(rows = result.len(), "query materialized");
    Ok(result)
}

/// Run `sql` against `table` and hand back a cursor that decrypts on access.
///
/// Rows are materialized by [`query_rows`] before the cursor is returned, so
/// memory grows with the size of the result set. Only the decryption is
/// deferred to column access.
pub fn query_decrypting<'ctx, P: Params>(
    conn: &Connection,
    ctx: &'ctx EncryptionContext,
    table: &str,
    sql: &str,
    params: P,
) -> Result<DecryptingCursor<'ctx, MemoryRows>> {
    let rows = query_rows(conn, sql, params)?;
    Ok(ctx.decrypting_cursor(rows, Some(table)))
}

/// Encrypt `row` for `table` and insert it. Returns the new rowid.
///
/// `row` is left holding the values as stored.
pub fn insert_encrypted(
    conn: &Connection,
    ctx: &EncryptionContext,
    table: &str,
    row: &mut RowBuffer,
) -> Result<i64> {
    let mut session = ctx.init_for_encrypt()?;
    ctx.encrypt_row(&mut session, row, table)?;

    let sql = if row.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(table))
    } else {
        let columns: Vec<String> = row.columns().map(quote_identifier).collect();
        let placeholders = vec!["?"; row.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(table),
            columns.join(", "),
            placeholders
        )
    };
    conn.execute(&sql, params_from_iter(row.values()))?;
    Ok(conn.last_insert_rowid())
}

/// Encrypt `row` for `table` and apply it to the rows matching `where_clause`.
///
/// `where_clause` uses `?` placeholders bound to `where_params` after the
/// row's values. Returns the number of rows changed.
pub fn update_encrypted(
    conn: &Connection,
    ctx: &EncryptionContext,
    table: &str,
    row: &mut RowBuffer,
    where_clause: &str,
    where_params: &[&dyn ToSql],
) -> Result<usize> {
    if row.is_empty() {
        return Ok(0);
    }
    let mut session = ctx.init_for_encrypt()?;
    ctx.encrypt_row(&mut session, row, table)?;

    let assignments: Vec<String> = row
        .columns()
        .map(|c| format!("{} = ?", quote_identifier(c)))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {}",
        quote_identifier(table),
        assignments.join(", "),
        where_clause
    );

    let mut params: Vec<&dyn ToSql> = row.values().map(|v| v as &dyn ToSql).collect();
    params.extend_from_slice(where_params);
    Ok(conn.execute(&sql, params.as_slice())?)
}
