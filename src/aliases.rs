// src/aliases.rs
//! Secret types built on secure-gate
//!
//! Both zeroize on drop and never print their contents.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(SecretKey16, 16); // AES-128 column key derived from the passphrase

// Dynamic secrets
dynamic_alias!(Passphrase, String); // user-supplied passphrase, never persisted
