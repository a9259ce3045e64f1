// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Selection mediator — single-session state machine for the credential
// sheet.
//
// States are Idle and Active.  `show_credentials` moves Idle → Active,
// `select_at` and `dismiss` move Active → Idle.  Calling `select_at` or
// `dismiss` while Idle is rejected with `NoActiveSession`; this policy is
// applied consistently (never a panic, never a silent no-op) so that a
// desynced surface shows up in logs and tests rather than crashing the
// embedder.

use tracing::{debug, warn};

use tapfill_core::Credential;
use tapfill_core::error::{Result, TapfillError};

use crate::model::SelectionModel;
use crate::traits::{SelectionDelegate, SelectionSurface};

/// Callback resolving one session.  Consumed on selection.
type OnSelected = Box<dyn FnOnce(Credential)>;

/// Mediates one credential selection session at a time.
///
/// Owns the [`SelectionModel`], the per-session selection callback, and
/// references to its two collaborators: the delegate (told about
/// dismissals) and an optional surface (re-rendered after every state
/// change).
///
/// Not reentrant: operations must not be invoked from within the
/// `on_selected` callback, the delegate's `on_dismissed`, or a surface's
/// `render`.  All operations belong on the single UI-owning thread.
pub struct SelectionMediator {
    model: SelectionModel,
    delegate: Box<dyn SelectionDelegate>,
    surface: Option<Box<dyn SelectionSurface>>,
    on_selected: Option<OnSelected>,
}

impl SelectionMediator {
    /// Create an idle mediator with the given dismissal delegate.
    pub fn new(delegate: Box<dyn SelectionDelegate>) -> Self {
        Self {
            model: SelectionModel::default(),
            delegate,
            surface: None,
            on_selected: None,
        }
    }

    /// Attach the presentation surface.  It is rendered immediately so a
    /// late-attached surface starts from the current state.
    pub fn attach_surface(&mut self, mut surface: Box<dyn SelectionSurface>) {
        surface.render(&self.model);
        self.surface = Some(surface);
    }

    /// Read access to the observable state.
    pub fn model(&self) -> &SelectionModel {
        &self.model
    }

    /// Begin a selection session for `formatted_url`.
    ///
    /// Replaces any prior session unconditionally — a pending unresolved
    /// session is dropped (its callback is never invoked) with a warning.
    /// Rejects an empty credential list; an empty sheet is never shown and
    /// the prior state is left untouched in that case.
    pub fn show_credentials(
        &mut self,
        formatted_url: impl Into<String>,
        credentials: Vec<Credential>,
        on_selected: impl FnOnce(Credential) + 'static,
    ) -> Result<()> {
        if credentials.is_empty() {
            return Err(TapfillError::EmptyCredentialList);
        }

        if self.model.visible {
            // The previous caller is still waiting on a callback that will
            // now never fire.  Known sharp edge of the show API.
            warn!(
                url = ?self.model.formatted_url,
                "replacing an unresolved selection session"
            );
        }

        let formatted_url = formatted_url.into();
        debug!(url = %formatted_url, count = credentials.len(), "presenting credentials");

        self.model.formatted_url = Some(formatted_url);
        self.model.credentials = credentials;
        self.model.visible = true;
        self.on_selected = Some(Box::new(on_selected));
        self.render();
        Ok(())
    }

    /// Resolve the active session by picking the credential at `index`.
    ///
    /// The callback is invoked synchronously, exactly once, and *before*
    /// the sheet is hidden, so anything it observes still sees an active
    /// session.  An out-of-range index indicates a surface/model desync
    /// and leaves the session active and resolvable.
    pub fn select_at(&mut self, index: usize) -> Result<()> {
        if !self.model.visible {
            return Err(TapfillError::NoActiveSession);
        }
        let len = self.model.credentials.len();
        if index >= len {
            return Err(TapfillError::IndexOutOfRange { index, len });
        }

        let chosen = self.model.credentials[index].clone();
        debug!(username = %chosen.username, index, "credential selected");

        if let Some(callback) = self.on_selected.take() {
            callback(chosen);
        }
        self.model.visible = false;
        self.render();
        Ok(())
    }

    /// Resolve the active session without a selection.
    ///
    /// Notifies the delegate's `on_dismissed` and hides the sheet.  The
    /// selection callback is dropped uninvoked.  Rejected while Idle, so a
    /// double dismissal errors instead of notifying the delegate twice.
    pub fn dismiss(&mut self) -> Result<()> {
        if !self.model.visible {
            return Err(TapfillError::NoActiveSession);
        }

        debug!(url = ?self.model.formatted_url, "selection dismissed");
        self.delegate.on_dismissed();
        self.on_selected = None;
        self.model.visible = false;
        self.render();
        Ok(())
    }

    fn render(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.render(&self.model);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TEST_URL: &str = "www.example.xyz";

    fn ana() -> Credential {
        Credential::new("Ana", "S3cr3t", None, false)
    }

    fn bob() -> Credential {
        Credential::new("Bob", "*****", Some(TEST_URL.into()), true)
    }

    fn carl() -> Credential {
        Credential::new("Carl", "G3h3!m", Some(String::new()), false)
    }

    /// Delegate that counts dismissal notifications.
    struct CountingDelegate {
        dismissals: Rc<RefCell<u32>>,
    }

    impl SelectionDelegate for CountingDelegate {
        fn on_dismissed(&mut self) {
            *self.dismissals.borrow_mut() += 1;
        }
    }

    /// Surface that records the visibility of every render it receives.
    struct RecordingSurface {
        seen: Rc<RefCell<Vec<bool>>>,
    }

    impl SelectionSurface for RecordingSurface {
        fn render(&mut self, model: &SelectionModel) {
            self.seen.borrow_mut().push(model.visible());
        }
    }

    fn mediator() -> (SelectionMediator, Rc<RefCell<u32>>) {
        let dismissals = Rc::new(RefCell::new(0));
        let delegate = CountingDelegate {
            dismissals: Rc::clone(&dismissals),
        };
        (SelectionMediator::new(Box::new(delegate)), dismissals)
    }

    #[test]
    fn starts_with_a_valid_idle_model() {
        let (mediator, _) = mediator();
        assert!(!mediator.model().visible());
        assert!(mediator.model().formatted_url().is_none());
        assert!(mediator.model().credentials().is_empty());
    }

    #[test]
    fn show_sets_formatted_url() {
        let (mut mediator, _) = mediator();
        mediator
            .show_credentials(TEST_URL, vec![ana(), carl(), bob()], |_| {})
            .unwrap();
        assert_eq!(mediator.model().formatted_url(), Some(TEST_URL));
    }

    #[test]
    fn show_sets_credential_list_in_order() {
        let (mut mediator, _) = mediator();
        mediator
            .show_credentials(TEST_URL, vec![ana(), carl(), bob()], |_| {})
            .unwrap();

        let creds = mediator.model().credentials();
        assert_eq!(creds.len(), 3);
        assert_eq!(creds[0], ana());
        assert_eq!(creds[1], carl());
        assert_eq!(creds[2], bob());
    }

    #[test]
    fn show_sets_visible() {
        let (mut mediator, _) = mediator();
        mediator
            .show_credentials(TEST_URL, vec![ana(), carl(), bob()], |_| {})
            .unwrap();
        assert!(mediator.model().visible());
    }

    #[test]
    fn showing_again_replaces_the_list() {
        let (mut mediator, _) = mediator();
        mediator.show_credentials(TEST_URL, vec![ana()], |_| {}).unwrap();
        assert_eq!(mediator.model().credentials(), &[ana()]);

        // A second session fully replaces the list — no merge.
        mediator.show_credentials(TEST_URL, vec![bob()], |_| {}).unwrap();
        assert_eq!(mediator.model().credentials(), &[bob()]);
    }

    #[test]
    fn select_invokes_callback_and_hides() {
        let (mut mediator, _) = mediator();
        let selected: Rc<RefCell<Option<Credential>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&selected);

        mediator
            .show_credentials(TEST_URL, vec![ana(), carl()], move |cred| {
                *sink.borrow_mut() = Some(cred);
            })
            .unwrap();
        mediator.select_at(1).unwrap();

        assert_eq!(selected.borrow().as_ref(), Some(&carl()));
        assert!(!mediator.model().visible());
    }

    #[test]
    fn dismiss_notifies_delegate_and_hides() {
        let (mut mediator, dismissals) = mediator();
        let selected: Rc<RefCell<Option<Credential>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&selected);

        mediator
            .show_credentials(TEST_URL, vec![ana(), carl()], move |cred| {
                *sink.borrow_mut() = Some(cred);
            })
            .unwrap();
        mediator.dismiss().unwrap();

        assert_eq!(*dismissals.borrow(), 1);
        assert!(!mediator.model().visible());
        assert!(selected.borrow().is_none());
    }

    #[test]
    fn empty_list_is_rejected_and_state_untouched() {
        let (mut mediator, _) = mediator();
        let result = mediator.show_credentials(TEST_URL, Vec::new(), |_| {});

        assert!(matches!(result, Err(TapfillError::EmptyCredentialList)));
        assert!(!mediator.model().visible());
        assert!(mediator.model().formatted_url().is_none());
    }

    #[test]
    fn select_while_idle_is_rejected_consistently() {
        let (mut mediator, _) = mediator();
        for _ in 0..3 {
            assert!(matches!(
                mediator.select_at(0),
                Err(TapfillError::NoActiveSession)
            ));
        }
    }

    #[test]
    fn dismiss_while_idle_never_reaches_the_delegate() {
        let (mut mediator, dismissals) = mediator();
        assert!(matches!(mediator.dismiss(), Err(TapfillError::NoActiveSession)));
        assert_eq!(*dismissals.borrow(), 0);
    }

    #[test]
    fn double_dismiss_notifies_once() {
        let (mut mediator, dismissals) = mediator();
        mediator.show_credentials(TEST_URL, vec![ana()], |_| {}).unwrap();

        mediator.dismiss().unwrap();
        assert!(matches!(mediator.dismiss(), Err(TapfillError::NoActiveSession)));
        assert_eq!(*dismissals.borrow(), 1);
    }

    #[test]
    fn out_of_range_index_leaves_session_resolvable() {
        let (mut mediator, _) = mediator();
        let selected: Rc<RefCell<Option<Credential>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&selected);

        mediator
            .show_credentials(TEST_URL, vec![ana(), carl()], move |cred| {
                *sink.borrow_mut() = Some(cred);
            })
            .unwrap();

        assert!(matches!(
            mediator.select_at(2),
            Err(TapfillError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(mediator.model().visible());
        assert!(selected.borrow().is_none());

        // The session is still live and a valid index still resolves it.
        mediator.select_at(0).unwrap();
        assert_eq!(selected.borrow().as_ref(), Some(&ana()));
    }

    #[test]
    fn selection_resolves_only_once() {
        let (mut mediator, _) = mediator();
        mediator.show_credentials(TEST_URL, vec![ana()], |_| {}).unwrap();
        mediator.select_at(0).unwrap();

        assert!(matches!(
            mediator.select_at(0),
            Err(TapfillError::NoActiveSession)
        ));
    }

    #[test]
    fn show_select_show_is_a_fresh_session() {
        let (mut mediator, _) = mediator();
        let selected: Rc<RefCell<Vec<Credential>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&selected);
        mediator
            .show_credentials(TEST_URL, vec![ana()], move |cred| sink.borrow_mut().push(cred))
            .unwrap();
        mediator.select_at(0).unwrap();

        let sink = Rc::clone(&selected);
        mediator
            .show_credentials("other.example", vec![bob(), carl()], move |cred| {
                sink.borrow_mut().push(cred)
            })
            .unwrap();

        assert!(mediator.model().visible());
        assert_eq!(mediator.model().formatted_url(), Some("other.example"));
        assert_eq!(mediator.model().credentials().len(), 2);

        mediator.select_at(0).unwrap();
        assert_eq!(*selected.borrow(), vec![ana(), bob()]);
    }

    #[test]
    fn replacing_an_unresolved_session_drops_its_callback() {
        let (mut mediator, _) = mediator();
        let first: Rc<RefCell<Option<Credential>>> = Rc::new(RefCell::new(None));
        let second: Rc<RefCell<Option<Credential>>> = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&first);
        mediator
            .show_credentials(TEST_URL, vec![ana()], move |cred| {
                *sink.borrow_mut() = Some(cred)
            })
            .unwrap();

        let sink = Rc::clone(&second);
        mediator
            .show_credentials(TEST_URL, vec![bob()], move |cred| {
                *sink.borrow_mut() = Some(cred)
            })
            .unwrap();

        mediator.select_at(0).unwrap();
        assert!(first.borrow().is_none());
        assert_eq!(second.borrow().as_ref(), Some(&bob()));
    }

    #[test]
    fn surface_is_rendered_on_every_transition() {
        let (mut mediator, _) = mediator();
        let seen = Rc::new(RefCell::new(Vec::new()));
        mediator.attach_surface(Box::new(RecordingSurface {
            seen: Rc::clone(&seen),
        }));

        mediator.show_credentials(TEST_URL, vec![ana()], |_| {}).unwrap();
        mediator.select_at(0).unwrap();

        // Initial attach render, show, select.
        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }
}
