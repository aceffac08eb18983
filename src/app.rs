//! # App Module
//!
//! This module contains the eframe application shell for the Notewell
//! frontend: it owns the host event bus and the modal session, and drives
//! both from the update loop.
//!
//! ## Application Flow:
//! 1. Pump queued host events (folds them into modal state, on the UI thread)
//! 2. Request a repaint if anything arrived
//! 3. Render the workspace panel
//!
//! Dialog components are external: they take a `ModalCoordinator` handle
//! and render themselves based on its flags. This shell only guarantees
//! that host events are applied before anything reads the state each frame.

use eframe::egui;
use log::{debug, info};

use crate::host::{HostEventBus, HostEventSender};
use crate::ui::state::ModalSession;

/// Main application struct for the egui Notewell frontend
pub struct NotewellApp {
    bus: HostEventBus,
    session: ModalSession,
    last_seen_revision: u64,
}

impl NotewellApp {
    /// Create the app: one event bus and one modal session, both living
    /// for the whole run. Dropping the app tears the session down and
    /// releases the host subscription.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, anyhow::Error> {
        info!("Initializing Notewell frontend");

        let bus = HostEventBus::new();
        let session = ModalSession::start(&bus);

        Ok(Self {
            bus,
            session,
            last_seen_revision: 0,
        })
    }

    /// Sending half of the event bus, for the IPC layer that bridges the
    /// host process.
    pub fn host_sender(&self) -> HostEventSender {
        self.bus.sender()
    }
}

impl eframe::App for NotewellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Host events first, so every read this frame sees them applied.
        if self.bus.pump() > 0 {
            ctx.request_repaint();
        }

        let modals = self.session.coordinator();
        if let Ok(revision) = modals.revision() {
            if revision != self.last_seen_revision {
                self.last_seen_revision = revision;
                debug!("Modal state changed (revision {})", revision);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Notewell");
            ui.label("Modal dialogs are rendered by their own components.");
        });
    }
}
