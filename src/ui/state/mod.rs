//! # State Modules
//!
//! Session-scoped UI state, split by concern:
//! - `modal_state` - the record of modal visibility flags and flashcard context
//! - `coordinator` - session lifecycle and the consumer handle onto that record

pub mod coordinator;
pub mod modal_state;

pub use coordinator::{ModalCoordinator, ModalSession, UsageError, CREATE_FLASHCARD_CHANNEL};
pub use modal_state::ModalState;
