// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Password vault — age (scrypt) passphrase encryption for stored
// passwords.  Each seal/unseal call is stateless; the passphrase lives
// only as long as the `PasswordVault` value, inside a `SecretString` that
// zeroises on drop.

use std::io::{Read, Write};

use age::secrecy::SecretString;
use tapfill_core::error::{Result, TapfillError};
use tracing::{debug, instrument};

/// Passphrase-based sealing of credential passwords.
pub struct PasswordVault {
    passphrase: SecretString,
}

impl PasswordVault {
    /// Create a vault handle with the given passphrase.
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: SecretString::from(passphrase.into()),
        }
    }

    /// Seal a password, returning a complete age ciphertext suitable for
    /// storing as a database blob.
    #[instrument(skip_all)]
    pub fn seal(&self, password: &str) -> Result<Vec<u8>> {
        let encryptor = age::Encryptor::with_user_passphrase(self.passphrase.clone());
        let mut sealed = Vec::new();

        let mut writer = encryptor
            .wrap_output(&mut sealed)
            .map_err(|e| TapfillError::Seal(e.to_string()))?;

        writer
            .write_all(password.as_bytes())
            .map_err(|e| TapfillError::Seal(e.to_string()))?;

        writer
            .finish()
            .map_err(|e| TapfillError::Seal(e.to_string()))?;

        debug!(sealed_len = sealed.len(), "password sealed");
        Ok(sealed)
    }

    /// Unseal a previously sealed password back to cleartext.
    #[instrument(skip_all)]
    pub fn unseal(&self, sealed: &[u8]) -> Result<String> {
        let decryptor =
            age::Decryptor::new(sealed).map_err(|e| TapfillError::Unseal(e.to_string()))?;

        let identity = age::scrypt::Identity::new(self.passphrase.clone());

        let mut reader = decryptor
            .decrypt(std::iter::once(&identity as &dyn age::Identity))
            .map_err(|e| TapfillError::Unseal(e.to_string()))?;

        let mut cleartext = Vec::new();
        reader
            .read_to_end(&mut cleartext)
            .map_err(|e| TapfillError::Unseal(e.to_string()))?;

        String::from_utf8(cleartext).map_err(|e| TapfillError::Unseal(e.to_string()))
    }
}
