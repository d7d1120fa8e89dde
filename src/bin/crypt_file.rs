// src/bin/crypt_file.rs
//! Encrypt or decrypt a single file with a passphrase
//!
//! Usage: crypt_file <encrypt|decrypt> <INPUT> <OUTPUT>
//!
//! The passphrase comes from the env var named in the config
//! (`COLUMN_CRYPT_PASSPHRASE` by default) or is prompted for.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use column_crypt::{config, file_ops, EncryptionContext};
use rpassword::prompt_password;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crypt_file")]
#[command(about = "Encrypt or decrypt a single file with a passphrase", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a plaintext file
    Encrypt {
        /// Plaintext to read
        input: PathBuf,
        /// Ciphertext to write (replaced if present)
        output: PathBuf,
    },

    /// Decrypt a file written by `encrypt`
    Decrypt {
        /// Ciphertext to read
        input: PathBuf,
        /// Plaintext to write (replaced if present)
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let conf = config::from_env().context("failed to load configuration")?;
    let mut ctx = EncryptionContext::from_config(&conf).context("invalid configuration")?;

    if !ctx.has_key() {
        let passphrase = prompt_password("Passphrase: ").context("failed to read passphrase")?;
        ctx.set_password(&passphrase)
            .context("failed to derive key from passphrase")?;
    }

    match cli.command {
        Commands::Encrypt { input, output } => {
            let plaintext = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let mut session = ctx.init_for_encrypt()?;
            file_ops::write(&mut session, &output, &plaintext)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(bytes = plaintext.len(), "encrypted {} → {}", input.display(), output.display());
        }
        Commands::Decrypt { input, output } => {
            let mut session = ctx.init_for_decrypt()?;
            let plaintext = file_ops::read(&mut session, &input)
                .with_context(|| format!("failed to decrypt {}", input.display()))?;
            std::fs::write(&output, &plaintext)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(bytes = plaintext.len(), "decrypted {} → {}", input.display(), output.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["crypt_file", "encrypt", "in.txt", "out.bin"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Encrypt { ref input, ref output }
                if input == &PathBuf::from("in.txt") && output == &PathBuf::from("out.bin")
        ));

        let cli = Cli::try_parse_from(["crypt_file", "decrypt", "out.bin", "back.txt"]).unwrap();
        assert!(matches!(cli.command, Commands::Decrypt { .. }));
    }

    #[test]
    fn rejects_unknown_mode_and_missing_paths() {
        assert!(Cli::try_parse_from(["crypt_file", "shred", "a", "b"]).is_err());
        assert!(Cli::try_parse_from(["crypt_file", "encrypt", "only-input"]).is_err());
        assert!(Cli::try_parse_from(["crypt_file"]).is_err());
    }
}
