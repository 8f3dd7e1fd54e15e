//! Operating-account keystore bootstrap.
//!
//! The keystore directory holds at most one encrypted key file. An empty
//! directory gets a fresh account; a single file is decrypted; anything else
//! is refused so the tool never guesses which key to spend from.

use alloy::signers::local::PrivateKeySigner;
use std::fs;
use std::path::{Path, PathBuf};

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// How the operating account was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeystoreOrigin {
    Created(PathBuf),
    Loaded(PathBuf),
}

/// Load the single account in `dir`, creating the directory and a new
/// account when it is empty.
pub fn load_or_create(
    dir: &Path,
    password: &str,
) -> BlockchainResult<(PrivateKeySigner, KeystoreOrigin)> {
    fs::create_dir_all(dir).map_err(|e| {
        BlockchainError::Wallet(format!("Cannot create keystore dir {}: {}", dir.display(), e))
    })?;

    let files = key_files(dir)?;
    match files.as_slice() {
        [] => {
            let (signer, name) =
                PrivateKeySigner::new_keystore(dir, &mut rand::thread_rng(), password, None)
                    .map_err(|e| BlockchainError::Wallet(format!("Keystore creation failed: {}", e)))?;
            let path = dir.join(name);
            tracing::info!(address = %signer.address(), path = %path.display(), "Created operating account");
            Ok((signer, KeystoreOrigin::Created(path)))
        }
        [path] => {
            let signer = PrivateKeySigner::decrypt_keystore(path, password)
                .map_err(|e| BlockchainError::Wallet(format!("Keystore decryption failed: {}", e)))?;
            tracing::info!(address = %signer.address(), path = %path.display(), "Loaded operating account");
            Ok((signer, KeystoreOrigin::Loaded(path.clone())))
        }
        _ => Err(BlockchainError::Wallet(format!(
            "expected zero or one keystore file in {}, found {}",
            dir.display(),
            files.len()
        ))),
    }
}

fn key_files(dir: &Path) -> BlockchainResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        BlockchainError::Wallet(format!("Cannot read keystore dir {}: {}", dir.display(), e))
    })?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BlockchainError::Wallet(e.to_string()))?;
        let path = entry.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if path.is_file() && !hidden {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
