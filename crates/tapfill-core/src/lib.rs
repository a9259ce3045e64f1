// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tapfill — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod origin;
pub mod types;

pub use config::FillConfig;
pub use error::TapfillError;
pub use types::*;
