// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Component configuration.

use serde::{Deserialize, Serialize};

/// Settings for the credential selection component.
///
/// The mediator itself is configuration-free; these knobs are consumed by
/// the store layer when preparing credentials for display and recording
/// outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillConfig {
    /// Replace stored passwords with the bullet mask before handing them
    /// to the presentation layer.
    pub mask_passwords: bool,
    /// Record session outcomes in the selection audit log.
    pub audit_enabled: bool,
    /// How many audit entries "recent" queries return by default.
    pub max_recent_audit_entries: u32,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            mask_passwords: true,
            audit_enabled: true,
            max_recent_audit_entries: 100,
        }
    }
}
