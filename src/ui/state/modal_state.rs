//! # Modal State Module
//!
//! This module contains all state related to modal dialogs and their
//! visibility.
//!
//! ## Responsibilities:
//! - Modal visibility flags (new note, new directory, settings, flashcards)
//! - Initialization context for the flashcard modal
//! - A revision counter so consumers can tell when anything changed
//!
//! ## Purpose:
//! This centralizes all modal-related state in one record, making it easy
//! to coordinate modal behavior across the app. The flags are deliberately
//! independent: nothing here enforces mutual exclusion, callers decide
//! which modals may be open at the same time.

/// Modal visibility flags and the flashcard initialization context.
///
/// `revision` increases by exactly one per logical transition, whether
/// that transition touched one field (a plain setter call) or two (a host
/// flashcard event, which writes the flag and the creation target
/// together).
#[derive(Debug)]
pub struct ModalState {
    /// Whether the "create new note" modal is visible
    pub new_note_modal_open: bool,

    /// Whether the "create new directory" modal is visible
    pub new_directory_modal_open: bool,

    /// Whether the settings modal is visible
    pub settings_modal_open: bool,

    /// Whether the flashcard session modal is visible
    pub flashcard_mode_open: bool,

    /// File the flashcard-creation modal should start from
    pub initial_file_to_create_flashcard: String,

    /// File the flashcard-review modal should start from
    pub initial_file_to_review_flashcard: String,

    revision: u64,
}

impl ModalState {
    /// Create new modal state with all modals hidden
    pub fn new() -> Self {
        Self {
            new_note_modal_open: false,
            new_directory_modal_open: false,
            settings_modal_open: false,
            flashcard_mode_open: false,
            initial_file_to_create_flashcard: String::new(),
            initial_file_to_review_flashcard: String::new(),
            revision: 0,
        }
    }

    /// Number of transitions applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record that one logical transition happened.
    pub(crate) fn bump_revision(&mut self) {
        self.revision += 1;
    }

    /// Fold one payload from the host flashcard channel into the state.
    ///
    /// A non-empty note name opens the flashcard modal for that file; the
    /// empty string closes it. Flag and creation target change together in
    /// this single transition - this is the only path that keeps the two
    /// consistent. Closing the modal through the plain flag setter leaves
    /// the creation target in place.
    pub fn apply_flashcard_event(&mut self, note_name: &str) {
        self.flashcard_mode_open = !note_name.is_empty();
        self.initial_file_to_create_flashcard = note_name.to_string();
        self.revision += 1;
    }
}

impl Default for ModalState {
    fn default() -> Self {
        Self::new()
    }
}
