// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Tapfill credential selector.

use serde::{Deserialize, Serialize};

/// Bullet string shown in place of a real password.
pub const PASSWORD_MASK: &str = "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}";

/// A single saved login offered for user selection.
///
/// Credentials are immutable values with structural equality — two
/// credentials with the same fields are the same credential as far as the
/// selection model is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Account name, shown as the primary label.
    pub username: String,
    /// Password as presented to the user — usually the mask, but a caller
    /// may supply the cleartext for reveal-on-demand surfaces.
    pub display_password: String,
    /// Origin the credential was saved for, pre-formatted for display.
    /// `None` when it matches the current site (the sheet then shows no
    /// per-row origin).
    pub origin_url: Option<String>,
    /// True for credentials saved from a linked mobile app rather than a
    /// web form.
    pub is_app_credential: bool,
}

impl Credential {
    pub fn new(
        username: impl Into<String>,
        display_password: impl Into<String>,
        origin_url: Option<String>,
        is_app_credential: bool,
    ) -> Self {
        Self {
            username: username.into(),
            display_password: display_password.into(),
            origin_url,
            is_app_credential,
        }
    }

    /// Copy of this credential with the password replaced by the bullet
    /// mask.  The store hands credentials to the selection layer through
    /// this when `FillConfig::mask_passwords` is on.
    pub fn with_masked_password(&self) -> Self {
        Self {
            display_password: PASSWORD_MASK.to_owned(),
            ..self.clone()
        }
    }
}

/// How a selection session ended.  Recorded by the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    /// The user picked a credential.
    Selected,
    /// The sheet was dismissed without a choice.
    Dismissed,
}

impl SelectionOutcome {
    /// Short verb used as the audit log action column.
    pub fn as_action(&self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Dismissed => "dismissed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_copy_keeps_everything_but_the_password() {
        let cred = Credential::new("ana", "S3cr3t", Some("example.org".into()), false);
        let masked = cred.with_masked_password();

        assert_eq!(masked.username, "ana");
        assert_eq!(masked.display_password, PASSWORD_MASK);
        assert_eq!(masked.origin_url.as_deref(), Some("example.org"));
        assert!(!masked.is_app_credential);
    }

    #[test]
    fn structural_equality() {
        let a = Credential::new("bob", PASSWORD_MASK, None, true);
        let b = Credential::new("bob", PASSWORD_MASK, None, true);
        assert_eq!(a, b);
    }
}
