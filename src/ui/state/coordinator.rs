//! # Modal Coordinator Module
//!
//! This module ties [`ModalState`](super::modal_state::ModalState) to the
//! lifetime of one UI session and exposes it to consumers.
//!
//! ## Key Types:
//! - `ModalSession` - owns the state and the host-channel subscription for
//!   one session; dropping it is session teardown
//! - `ModalCoordinator` - cheap cloneable handle the dialogs and controls
//!   hold; single source of truth for "is modal X open"
//! - `UsageError` - returned when a handle is used outside an active session
//!
//! ## Lifecycle:
//! `ModalSession::start` creates fresh state (all modals hidden) and
//! subscribes exactly once to the flashcard channel on the host event bus.
//! The subscription guard lives inside the session, so teardown releases it
//! exactly once no matter how the session ends. Handles hold a weak
//! reference: they cannot exist before a session starts, and after teardown
//! every access reports `UsageError` instead of silently handing out
//! defaults.

use log::{debug, error};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::modal_state::ModalState;
use crate::host::{HostEventBus, Subscription};

/// Host channel carrying flashcard-modal requests: the payload is the note
/// to create flashcards from, and the empty string means "close".
pub const CREATE_FLASHCARD_CHANNEL: &str = "create-flashcard-file";

/// The modal coordinator was accessed outside an active UI session.
///
/// This is a programming error at the call site, not a runtime fault:
/// nothing inside the coordinator recovers from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("modal coordinator accessed outside an active UI session")]
pub struct UsageError;

/// Owns the modal state for one UI session.
///
/// There is no global instance: whoever runs the session constructs one of
/// these and hands out coordinator handles to the subtrees that need them.
/// Tests can run any number of independent sessions side by side.
pub struct ModalSession {
    state: Rc<RefCell<ModalState>>,
    _flashcard_events: Subscription,
}

impl ModalSession {
    /// Start a session: fresh state with every modal hidden, plus one
    /// subscription to [`CREATE_FLASHCARD_CHANNEL`] that lasts until the
    /// session is dropped. The subscription is never re-established on
    /// state changes.
    pub fn start(bus: &HostEventBus) -> Self {
        let state = Rc::new(RefCell::new(ModalState::new()));

        let state_for_events = Rc::downgrade(&state);
        let subscription = bus.subscribe(CREATE_FLASHCARD_CHANNEL, move |note_name| {
            match state_for_events.upgrade() {
                Some(state) => {
                    debug!("Host flashcard request for '{}'", note_name);
                    // Flag and creation target change under one borrow, so
                    // no consumer can observe one without the other.
                    state.borrow_mut().apply_flashcard_event(note_name);
                }
                // The guard drops with the session, so a delivery without
                // live state is a teardown bug, not a condition to handle.
                None => error!("Flashcard event delivered after session teardown"),
            }
        });

        Self {
            state,
            _flashcard_events: subscription,
        }
    }

    /// Handle for consumers. Any number of handles may be taken and cloned;
    /// they all see the same state and all expire with the session.
    pub fn coordinator(&self) -> ModalCoordinator {
        ModalCoordinator {
            state: Rc::downgrade(&self.state),
        }
    }
}

/// Consumer handle onto the session's modal state.
///
/// Getters and setters fail with [`UsageError`] once the owning
/// [`ModalSession`] is gone. Setters are unconditional assignments - no
/// validation, no side effects beyond the state change and the revision
/// bump consumers use to notice it.
#[derive(Clone)]
pub struct ModalCoordinator {
    state: Weak<RefCell<ModalState>>,
}

impl ModalCoordinator {
    fn read<R>(&self, f: impl FnOnce(&ModalState) -> R) -> Result<R, UsageError> {
        let state = self.state.upgrade().ok_or(UsageError)?;
        let value = f(&state.borrow());
        Ok(value)
    }

    fn write(&self, f: impl FnOnce(&mut ModalState)) -> Result<(), UsageError> {
        let state = self.state.upgrade().ok_or(UsageError)?;
        let mut state = state.borrow_mut();
        f(&mut state);
        state.bump_revision();
        Ok(())
    }

    /// Number of transitions applied so far; changes exactly once per
    /// setter call or host event.
    pub fn revision(&self) -> Result<u64, UsageError> {
        self.read(ModalState::revision)
    }

    pub fn is_new_note_modal_open(&self) -> Result<bool, UsageError> {
        self.read(|s| s.new_note_modal_open)
    }

    pub fn set_new_note_modal_open(&self, open: bool) -> Result<(), UsageError> {
        self.write(|s| s.new_note_modal_open = open)
    }

    pub fn is_new_directory_modal_open(&self) -> Result<bool, UsageError> {
        self.read(|s| s.new_directory_modal_open)
    }

    pub fn set_new_directory_modal_open(&self, open: bool) -> Result<(), UsageError> {
        self.write(|s| s.new_directory_modal_open = open)
    }

    pub fn is_settings_modal_open(&self) -> Result<bool, UsageError> {
        self.read(|s| s.settings_modal_open)
    }

    pub fn set_settings_modal_open(&self, open: bool) -> Result<(), UsageError> {
        self.write(|s| s.settings_modal_open = open)
    }

    pub fn is_flashcard_mode_open(&self) -> Result<bool, UsageError> {
        self.read(|s| s.flashcard_mode_open)
    }

    /// Note: closing the flashcard modal here does NOT clear the creation
    /// target; only the host-event path writes the two together. See the
    /// tests pinning that behavior.
    pub fn set_flashcard_mode_open(&self, open: bool) -> Result<(), UsageError> {
        self.write(|s| s.flashcard_mode_open = open)
    }

    pub fn initial_file_to_create_flashcard(&self) -> Result<String, UsageError> {
        self.read(|s| s.initial_file_to_create_flashcard.clone())
    }

    pub fn set_initial_file_to_create_flashcard(
        &self,
        file: impl Into<String>,
    ) -> Result<(), UsageError> {
        let file = file.into();
        self.write(|s| s.initial_file_to_create_flashcard = file)
    }

    pub fn initial_file_to_review_flashcard(&self) -> Result<String, UsageError> {
        self.read(|s| s.initial_file_to_review_flashcard.clone())
    }

    pub fn set_initial_file_to_review_flashcard(
        &self,
        file: impl Into<String>,
    ) -> Result<(), UsageError> {
        let file = file.into();
        self.write(|s| s.initial_file_to_review_flashcard = file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (HostEventBus, ModalSession) {
        let bus = HostEventBus::new();
        let session = ModalSession::start(&bus);
        (bus, session)
    }

    #[test]
    fn read_after_write_holds_for_every_field() {
        let (_bus, session) = session();
        let modals = session.coordinator();

        modals.set_new_note_modal_open(true).unwrap();
        assert!(modals.is_new_note_modal_open().unwrap());

        modals.set_new_directory_modal_open(true).unwrap();
        assert!(modals.is_new_directory_modal_open().unwrap());

        modals.set_settings_modal_open(true).unwrap();
        assert!(modals.is_settings_modal_open().unwrap());

        modals.set_flashcard_mode_open(true).unwrap();
        assert!(modals.is_flashcard_mode_open().unwrap());

        modals.set_initial_file_to_create_flashcard("a.md").unwrap();
        assert_eq!(modals.initial_file_to_create_flashcard().unwrap(), "a.md");

        modals.set_initial_file_to_review_flashcard("b.md").unwrap();
        assert_eq!(modals.initial_file_to_review_flashcard().unwrap(), "b.md");
    }

    #[test]
    fn every_accessor_errors_after_teardown() {
        let (_bus, session) = session();
        let modals = session.coordinator();
        drop(session);

        assert_eq!(modals.is_new_note_modal_open(), Err(UsageError));
        assert_eq!(modals.is_new_directory_modal_open(), Err(UsageError));
        assert_eq!(modals.is_settings_modal_open(), Err(UsageError));
        assert_eq!(modals.is_flashcard_mode_open(), Err(UsageError));
        assert_eq!(modals.initial_file_to_create_flashcard(), Err(UsageError));
        assert_eq!(modals.initial_file_to_review_flashcard(), Err(UsageError));

        assert_eq!(modals.set_new_note_modal_open(true), Err(UsageError));
        assert_eq!(modals.set_new_directory_modal_open(true), Err(UsageError));
        assert_eq!(modals.set_settings_modal_open(true), Err(UsageError));
        assert_eq!(modals.set_flashcard_mode_open(true), Err(UsageError));
        assert_eq!(
            modals.set_initial_file_to_create_flashcard("a.md"),
            Err(UsageError)
        );
        assert_eq!(
            modals.set_initial_file_to_review_flashcard("b.md"),
            Err(UsageError)
        );
        assert_eq!(modals.revision(), Err(UsageError));
    }

    #[test]
    fn flashcard_event_sets_flag_and_target_atomically() {
        let (bus, session) = session();
        let modals = session.coordinator();
        let before = modals.revision().unwrap();

        bus.sender().send(CREATE_FLASHCARD_CHANNEL, "note.md");
        bus.pump();

        assert!(modals.is_flashcard_mode_open().unwrap());
        assert_eq!(modals.initial_file_to_create_flashcard().unwrap(), "note.md");
        // Exactly one transition: the two fields were never observable apart.
        assert_eq!(modals.revision().unwrap(), before + 1);
    }

    #[test]
    fn empty_payload_closes_the_flashcard_modal() {
        let (bus, session) = session();
        let modals = session.coordinator();

        bus.sender().send(CREATE_FLASHCARD_CHANNEL, "note.md");
        bus.sender().send(CREATE_FLASHCARD_CHANNEL, "");
        bus.pump();

        assert!(!modals.is_flashcard_mode_open().unwrap());
        assert_eq!(modals.initial_file_to_create_flashcard().unwrap(), "");
    }

    #[test]
    fn duplicate_payloads_yield_the_same_state() {
        let (bus, session) = session();
        let modals = session.coordinator();

        bus.sender().send(CREATE_FLASHCARD_CHANNEL, "note.md");
        bus.sender().send(CREATE_FLASHCARD_CHANNEL, "note.md");
        bus.pump();

        assert!(modals.is_flashcard_mode_open().unwrap());
        assert_eq!(modals.initial_file_to_create_flashcard().unwrap(), "note.md");
    }

    #[test]
    fn teardown_releases_the_subscription_exactly_once() {
        let bus = HostEventBus::new();

        for _ in 0..3 {
            let session = ModalSession::start(&bus);
            assert_eq!(bus.handler_count(CREATE_FLASHCARD_CHANNEL), 1);
            drop(session);
            assert_eq!(bus.handler_count(CREATE_FLASHCARD_CHANNEL), 0);
        }

        // Events sent after teardown reach nobody.
        bus.sender().send(CREATE_FLASHCARD_CHANNEL, "late.md");
        assert_eq!(bus.pump(), 0);
    }

    #[test]
    fn no_mutual_exclusion_between_modals() {
        let (_bus, session) = session();
        let modals = session.coordinator();

        modals.set_settings_modal_open(true).unwrap();
        modals.set_new_note_modal_open(true).unwrap();

        assert!(modals.is_settings_modal_open().unwrap());
        assert!(modals.is_new_note_modal_open().unwrap());
    }

    #[test]
    fn closing_flashcard_modal_keeps_creation_target() {
        // Known gap, preserved on purpose: only the host-event path writes
        // flag and creation target together. A plain close leaves the old
        // target behind.
        let (bus, session) = session();
        let modals = session.coordinator();

        bus.sender().send(CREATE_FLASHCARD_CHANNEL, "note.md");
        bus.pump();
        modals.set_flashcard_mode_open(false).unwrap();

        assert!(!modals.is_flashcard_mode_open().unwrap());
        assert_eq!(modals.initial_file_to_create_flashcard().unwrap(), "note.md");
    }

    #[test]
    fn handles_are_cloneable_and_share_state() {
        let (_bus, session) = session();
        let first = session.coordinator();
        let second = first.clone();

        first.set_settings_modal_open(true).unwrap();
        assert!(second.is_settings_modal_open().unwrap());
    }

    #[test]
    fn sessions_are_independent() {
        let bus_a = HostEventBus::new();
        let bus_b = HostEventBus::new();
        let session_a = ModalSession::start(&bus_a);
        let session_b = ModalSession::start(&bus_b);

        session_a
            .coordinator()
            .set_new_note_modal_open(true)
            .unwrap();

        assert!(!session_b.coordinator().is_new_note_modal_open().unwrap());
    }

    #[test]
    fn events_are_interleaved_with_setters_in_order() {
        let (bus, session) = session();
        let modals = session.coordinator();

        bus.sender().send(CREATE_FLASHCARD_CHANNEL, "note.md");
        bus.pump();
        modals.set_flashcard_mode_open(false).unwrap();
        bus.sender().send(CREATE_FLASHCARD_CHANNEL, "other.md");
        bus.pump();

        // The later event wins over the earlier direct close.
        assert!(modals.is_flashcard_mode_open().unwrap());
        assert_eq!(modals.initial_file_to_create_flashcard().unwrap(), "other.md");
    }
}
