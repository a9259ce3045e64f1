// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Selection model — the state a presentation surface renders.

use serde::{Deserialize, Serialize};
use tapfill_core::Credential;

/// Observable state of the selection sheet.
///
/// Owned and mutated exclusively by the [`SelectionMediator`]; surfaces
/// only ever see `&SelectionModel`.  Invariants upheld by the mediator:
/// `visible` is true exactly while a session is active and unresolved, and
/// `credentials` is non-empty whenever `visible` is true.
///
/// [`SelectionMediator`]: crate::mediator::SelectionMediator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionModel {
    pub(crate) formatted_url: Option<String>,
    pub(crate) credentials: Vec<Credential>,
    pub(crate) visible: bool,
}

impl SelectionModel {
    /// Site the current (or last) session was begun for.  `None` before
    /// any session.
    pub fn formatted_url(&self) -> Option<&str> {
        self.formatted_url.as_deref()
    }

    /// Credentials in presentation order.  Replaced wholesale on each new
    /// session — never merged.
    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    /// Whether the sheet is currently being presented.
    pub fn visible(&self) -> bool {
        self.visible
    }
}
