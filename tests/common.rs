// tests/common.rs
//! Shared test utilities: logging setup and fixtures
#![allow(dead_code)] // each test binary uses a different subset

use column_crypt::{EncryptionContext, EncryptionSettings};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const PASSWORD: &str = "keyPassword";

/// PBKDF2-HMAC-SHA1("keyPassword", "salt0123456789yo", 1000 iterations, 16 bytes)
pub const PASSWORD_KEY_HEX: &str = "14edfbb087c63ac46f9742ed4b248261";

/// AES-128-ECB/PKCS7 ciphertexts under `PASSWORD_KEY_HEX`, Base64
pub const CIPHERTEXT_X: &str = "6eCbv9fOlIbeGr+Y8Bsx+g==";
pub const CIPHERTEXT_42: &str = "EsfJQkOUpPFT0A3qSlF+4g==";

/// Initialize test-friendly logging. Idempotent.
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// `users.secret` and `users.age` encrypted; `users.plain` is not
pub fn users_settings() -> EncryptionSettings {
    EncryptionSettings::new().with_table("users", ["secret", "age"])
}

/// Context keyed with `PASSWORD` and `users_settings()` installed
pub fn context() -> EncryptionContext {
    setup();
    let mut ctx = EncryptionContext::new();
    ctx.set_password(PASSWORD).expect("derive key");
    ctx.set_settings_provider(users_settings());
    ctx
}
