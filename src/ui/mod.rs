//! # UI Module
//!
//! Frontend-side state management for Notewell. The actual dialog
//! components live outside this crate; they hold a `ModalCoordinator`
//! handle and read/write modal state through it.

pub mod state;

pub use state::*;
