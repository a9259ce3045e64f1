// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tapfill-select — the credential selection sheet's brain.
//
// One mediator, one model, one session at a time.  The mediator owns all
// mutable state; the presentation surface renders the model and reports
// taps back as `select_at`/`dismiss` calls.  Everything runs on the one
// UI-owning thread — there is no locking, and re-entering the mediator
// from inside its own callbacks is a contract violation, not something
// this crate defends against.

pub mod mediator;
pub mod model;
pub mod traits;

pub use mediator::SelectionMediator;
pub use model::SelectionModel;
pub use traits::{SelectionDelegate, SelectionSurface};
