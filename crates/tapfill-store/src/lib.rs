// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! tapfill-store — the credential source behind the selection sheet.
//!
//! This crate persists saved logins and feeds them to `tapfill-select` in
//! save order.  Passwords never touch the database in clear: they are
//! sealed through the [`PasswordVault`] on the way in and only unsealed
//! (or masked) when a displayable credential list is built.  Session
//! outcomes land in the [`SelectionAudit`], keyed by an origin
//! fingerprint rather than the origin itself.

pub mod audit;
pub mod store;
pub mod vault;

pub use audit::{AuditEntry, SelectionAudit, origin_fingerprint};
pub use store::{CredentialId, CredentialStore, StoredCredential};
pub use vault::PasswordVault;
