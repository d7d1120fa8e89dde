// src/db/mod.rs
//! Storage engine integration (SQLite via rusqlite)
pub mod sqlite;

pub use sqlite::{insert_encrypted, query_decrypting, query_rows, update_encrypted};
