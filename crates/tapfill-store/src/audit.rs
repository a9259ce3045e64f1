// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Selection audit — append-only SQLite log of how selection sessions end.
//
// Origins are never stored in clear; every entry is keyed by a SHA-256
// fingerprint of the origin so the log can answer "how often is the sheet
// dismissed on this site" without doubling as a browsing history.
//
// Schema:
//   selection_audit(
//     id             INTEGER PRIMARY KEY AUTOINCREMENT,
//     timestamp      TEXT    NOT NULL,   -- RFC 3339
//     action         TEXT    NOT NULL,   -- "shown" | "selected" | "dismissed"
//     origin_digest  TEXT    NOT NULL,   -- SHA-256 hex of the origin
//     detail         TEXT                -- optional free-form context
//   )

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use tapfill_core::FillConfig;
use tapfill_core::error::TapfillError;
use tapfill_core::types::SelectionOutcome;

/// Convert a `rusqlite::Error` into a `TapfillError::Database`.
fn db_err(e: rusqlite::Error) -> TapfillError {
    TapfillError::Database(e.to_string())
}

/// SHA-256 fingerprint of an origin, as lowercase hex.
///
/// This is what the audit log stores instead of the origin itself.
pub fn origin_fingerprint(origin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(origin.as_bytes());
    hex::encode(hasher.finalize())
}

/// A single entry in the selection audit log, used for queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: String,
    pub action: String,
    pub origin_digest: String,
    pub detail: Option<String>,
}

/// Append-only log of selection sheet activity.
pub struct SelectionAudit {
    conn: Connection,
}

impl SelectionAudit {
    /// Open (or create) the audit database at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TapfillError> {
        let conn = Connection::open(path).map_err(db_err)?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("selection audit opened");
        Ok(Self { conn })
    }

    /// Open an in-memory audit database (useful for tests).
    pub fn open_in_memory() -> Result<Self, TapfillError> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        conn.execute_batch(CREATE_TABLE_SQL).map_err(db_err)?;

        debug!("in-memory selection audit opened");
        Ok(Self { conn })
    }

    /// Record that the sheet was shown for `origin` with `count` rows.
    ///
    /// A no-op when `config.audit_enabled` is off.
    #[instrument(skip(self, config), fields(%origin, count))]
    pub fn record_shown(
        &self,
        config: &FillConfig,
        origin: &str,
        count: usize,
    ) -> Result<(), TapfillError> {
        if !config.audit_enabled {
            return Ok(());
        }
        self.record("shown", origin, Some(&format!("{count} credentials")))
    }

    /// Record how the session for `origin` ended.
    ///
    /// A no-op when `config.audit_enabled` is off.
    #[instrument(skip(self, config), fields(%origin, ?outcome))]
    pub fn record_outcome(
        &self,
        config: &FillConfig,
        origin: &str,
        outcome: SelectionOutcome,
    ) -> Result<(), TapfillError> {
        if !config.audit_enabled {
            return Ok(());
        }
        self.record(outcome.as_action(), origin, None)
    }

    fn record(&self, action: &str, origin: &str, detail: Option<&str>) -> Result<(), TapfillError> {
        let timestamp = Utc::now().to_rfc3339();
        let digest = origin_fingerprint(origin);

        self.conn
            .execute(
                "INSERT INTO selection_audit (timestamp, action, origin_digest, detail)
                 VALUES (?1, ?2, ?3, ?4)",
                params![timestamp, action, digest, detail],
            )
            .map_err(db_err)?;

        debug!(action, "audit entry recorded");
        Ok(())
    }

    /// All entries for `origin`, oldest first.
    pub fn entries_for_origin(&self, origin: &str) -> Result<Vec<AuditEntry>, TapfillError> {
        let digest = origin_fingerprint(origin);
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, action, origin_digest, detail
                 FROM selection_audit
                 WHERE origin_digest = ?1
                 ORDER BY id ASC",
            )
            .map_err(db_err)?;

        let rows = stmt
            .query_map(params![digest], row_to_entry)
            .map_err(db_err)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(db_err)?);
        }
        Ok(entries)
    }

    /// The most recent `limit` entries, newest first.  Pass
    /// `FillConfig::max_recent_audit_entries` for the configured default.
    pub fn recent_entries(&self, limit: u32) -> Result<Vec<AuditEntry>, TapfillError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, action, origin_digest, detail
                 FROM selection_audit
                 ORDER BY id DESC
                 LIMIT ?1",
            )
            .map_err(db_err)?;

        let rows = stmt.query_map(params![limit], row_to_entry).map_err(db_err)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(db_err)?);
        }
        Ok(entries)
    }

    /// Total number of entries.
    pub fn count(&self) -> Result<u64, TapfillError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM selection_audit", [], |row| row.get(0))
            .map_err(db_err)
    }
}

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS selection_audit (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp      TEXT    NOT NULL,
    action         TEXT    NOT NULL,
    origin_digest  TEXT    NOT NULL,
    detail         TEXT
);";

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<AuditEntry> {
    Ok(AuditEntry {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        action: row.get(2)?,
        origin_digest: row.get(3)?,
        detail: row.get(4)?,
    })
}
