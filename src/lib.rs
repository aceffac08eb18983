//! # Notewell egui frontend
//!
//! Modal coordination core for the Notewell note-taking app: a
//! session-scoped store of modal visibility state, fed both by direct UI
//! calls and by events from the host process.
//!
//! ## Module Organization:
//! - `host` - event bus bridging the host process into the UI loop
//! - `ui::state` - modal state record, session lifecycle, coordinator handle
//! - `app` - eframe application shell wiring the two together

pub mod app;
pub mod host;
pub mod ui;
