// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Saved credential store backed by SQLite.
//
// The store keeps one row per saved login.  Passwords are stored as age
// ciphertext blobs (see `vault.rs`); everything else is cleartext so the
// sheet can be populated without unsealing anything.  Rows for an origin
// come back in save order (rowid) — that order is the presentation order
// of the selection sheet.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use tracing::{debug, info, instrument};

use tapfill_core::FillConfig;
use tapfill_core::error::{Result, TapfillError};
use tapfill_core::types::Credential;

use crate::vault::PasswordVault;

/// SQLite schema for the credentials table.
const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS credentials (
        id              TEXT PRIMARY KEY,
        origin          TEXT NOT NULL,
        username        TEXT NOT NULL,
        sealed_password BLOB NOT NULL,
        app_origin      TEXT,
        created_at      TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_credentials_origin ON credentials(origin);
"#;

/// Unique identifier for a saved credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialId(pub uuid::Uuid);

impl CredentialId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A saved login as listed by the store.  Never carries the password —
/// displayable credentials are built separately via
/// [`CredentialStore::displayable_for_origin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub id: CredentialId,
    /// Site origin the login was saved for, pre-formatted for display.
    pub origin: String,
    pub username: String,
    /// Set when the login came from a linked mobile app; holds the app's
    /// own origin (e.g. `android://com.example`).
    pub app_origin: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Persistent credential store backed by a SQLite database.
///
/// All methods are synchronous; the selection flow runs on a single
/// UI-owning thread and the store is queried before the sheet is shown.
pub struct CredentialStore {
    conn: Connection,
}

impl CredentialStore {
    /// Open (or create) the credential database at the given path.
    ///
    /// Applies WAL journal mode and creates the `credentials` table if it
    /// does not exist.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| TapfillError::Database(format!("open: {e}")))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| TapfillError::Database(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| TapfillError::Database(format!("create table: {e}")))?;

        info!("credential store opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| TapfillError::Database(format!("open in-memory: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| TapfillError::Database(format!("create table: {e}")))?;

        debug!("in-memory credential store opened");
        Ok(Self { conn })
    }

    /// Save a login for `origin`, sealing the password through `vault`.
    ///
    /// `app_origin` marks an app-linked login and carries the app's own
    /// origin for per-row display.
    #[instrument(skip(self, vault, password), fields(%origin, %username))]
    pub fn save(
        &self,
        vault: &PasswordVault,
        origin: &str,
        username: &str,
        password: &str,
        app_origin: Option<&str>,
    ) -> Result<CredentialId> {
        let id = CredentialId::new();
        let sealed = vault.seal(password)?;
        let created_at = Utc::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO credentials (id, origin, username, sealed_password, app_origin, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id.to_string(), origin, username, sealed, app_origin, created_at],
            )
            .map_err(|e| TapfillError::Database(format!("insert credential: {e}")))?;

        info!(credential_id = %id, "credential saved");
        Ok(id)
    }

    /// All logins saved for `origin`, in save order.
    #[instrument(skip(self), fields(%origin))]
    pub fn for_origin(&self, origin: &str) -> Result<Vec<StoredCredential>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, origin, username, app_origin, created_at
                 FROM credentials WHERE origin = ?1 ORDER BY rowid ASC",
            )
            .map_err(|e| TapfillError::Database(format!("prepare for_origin: {e}")))?;

        let rows = stmt
            .query_map(params![origin], row_to_stored_credential)
            .map_err(|e| TapfillError::Database(format!("query for_origin: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TapfillError::Database(format!("collect rows: {e}")))?;

        debug!(count = rows.len(), "retrieved credentials for origin");
        Ok(rows)
    }

    /// Build the displayable credential list for `origin`, ready to hand
    /// to `SelectionMediator::show_credentials`.
    ///
    /// Passwords are replaced with the bullet mask when
    /// `config.mask_passwords` is set; otherwise each one is unsealed
    /// through `vault`.  Order matches [`CredentialStore::for_origin`].
    #[instrument(skip(self, vault, config), fields(%origin))]
    pub fn displayable_for_origin(
        &self,
        origin: &str,
        vault: &PasswordVault,
        config: &FillConfig,
    ) -> Result<Vec<Credential>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT username, sealed_password, app_origin
                 FROM credentials WHERE origin = ?1 ORDER BY rowid ASC",
            )
            .map_err(|e| TapfillError::Database(format!("prepare displayable: {e}")))?;

        let rows = stmt
            .query_map(params![origin], |row| {
                let username: String = row.get(0)?;
                let sealed: Vec<u8> = row.get(1)?;
                let app_origin: Option<String> = row.get(2)?;
                Ok((username, sealed, app_origin))
            })
            .map_err(|e| TapfillError::Database(format!("query displayable: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TapfillError::Database(format!("collect rows: {e}")))?;

        let mut credentials = Vec::with_capacity(rows.len());
        for (username, sealed, app_origin) in rows {
            let display_password = if config.mask_passwords {
                tapfill_core::types::PASSWORD_MASK.to_owned()
            } else {
                vault.unseal(&sealed)?
            };
            let is_app_credential = app_origin.is_some();
            credentials.push(Credential::new(
                username,
                display_password,
                app_origin,
                is_app_credential,
            ));
        }

        debug!(count = credentials.len(), "built displayable credentials");
        Ok(credentials)
    }

    /// Unseal the password of a single credential (fill-time lookup after
    /// the user picked a masked row).
    #[instrument(skip(self, vault), fields(credential_id = %id))]
    pub fn password_for(&self, id: &CredentialId, vault: &PasswordVault) -> Result<String> {
        let sealed: Vec<u8> = self
            .conn
            .query_row(
                "SELECT sealed_password FROM credentials WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .map_err(|e| TapfillError::Database(format!("credential {id} not found: {e}")))?;

        vault.unseal(&sealed)
    }

    /// Delete a credential.  Returns `Ok(())` even if it did not exist
    /// (idempotent).
    #[instrument(skip(self), fields(credential_id = %id))]
    pub fn delete(&self, id: &CredentialId) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM credentials WHERE id = ?1",
                params![id.to_string()],
            )
            .map_err(|e| TapfillError::Database(format!("delete credential: {e}")))?;

        info!(credential_id = %id, "credential deleted");
        Ok(())
    }

    /// Total number of saved credentials.
    pub fn count(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM credentials", [], |row| row.get(0))
            .map_err(|e| TapfillError::Database(format!("count: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// Map a SQLite row to a `StoredCredential`.
///
/// Column indices must match the SELECT order used in `for_origin`.
fn row_to_stored_credential(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredCredential> {
    let id_str: String = row.get(0)?;
    let origin: String = row.get(1)?;
    let username: String = row.get(2)?;
    let app_origin: Option<String> = row.get(3)?;
    let created_at_str: String = row.get(4)?;

    let uuid = uuid::Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(StoredCredential {
        id: CredentialId(uuid),
        origin,
        username,
        app_origin,
        created_at,
    })
}
