// src/config/mod.rs
//! Configuration system for column-crypt
//!
//! TOML file + env overrides. Nothing here is global: the loaded `Config`
//! is handed to `EncryptionContext::from_config`.

pub use app::{from_env, load, Config, SettingsConfig};

mod app;
mod defaults;
