// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator traits — the seams between the mediator and everything it
// does not own.

use crate::model::SelectionModel;

/// Embedder-side observer of session endings that were not selections.
///
/// The delegate is told about dismissals so it can e.g. refocus the form
/// field the sheet was covering.  It is *not* told about selections —
/// those go through the per-session callback instead.
pub trait SelectionDelegate {
    /// The active session ended without a credential being chosen.
    fn on_dismissed(&mut self);
}

/// A thing that can draw the selection sheet.
///
/// Receives the full model after every state change and is expected to
/// translate user input back into `select_at`/`dismiss` calls on the
/// mediator.  Calling back into the mediator *from within* `render` is a
/// contract violation (see the crate-level non-reentrancy note).
pub trait SelectionSurface {
    fn render(&mut self, model: &SelectionModel);
}
