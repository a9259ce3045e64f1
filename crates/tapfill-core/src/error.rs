// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Tapfill.

use thiserror::Error;

/// Top-level error type for all Tapfill operations.
#[derive(Debug, Error)]
pub enum TapfillError {
    // -- Selection contract violations --
    /// `show_credentials` was called with zero credentials.  An empty sheet
    /// is never presented, so the call is rejected up front.
    #[error("refusing to present an empty credential list")]
    EmptyCredentialList,

    /// `select_at` received an index the current credential list does not
    /// have.  Indicates a desync between the presentation surface and the
    /// model.
    #[error("selection index {index} out of range for {len} credentials")]
    IndexOutOfRange { index: usize, len: usize },

    /// `select_at` or `dismiss` was called with no selection session active.
    #[error("no active selection session")]
    NoActiveSession,

    // -- Origin handling --
    #[error("cannot format origin for display: {0}")]
    InvalidOrigin(String),

    // -- Vault --
    #[error("sealing password failed: {0}")]
    Seal(String),

    #[error("unsealing password failed: {0}")]
    Unseal(String),

    // -- Storage / persistence --
    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TapfillError>;
