//! # Host Event Bus
//!
//! This module is the in-process side of the event channel from the Notewell
//! host process. The host sends named events carrying a single string payload
//! (e.g. "open the flashcard modal for this note"); the UI folds them into
//! its own state.
//!
//! ## Responsibilities:
//! - Queue events coming from the host bridge thread
//! - Dispatch queued events to registered handlers on the UI thread
//! - Scope handler registrations to an RAII guard
//!
//! ## Delivery model:
//! Events cross threads through an mpsc queue, but handlers only ever run
//! inside `pump()`, which the app calls once per frame on the UI thread.
//! Dispatch is therefore cooperative and strictly in delivery order, and
//! handlers can mutate single-threaded UI state without locking.

use log::debug;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::mpsc::{channel, Receiver, Sender};

/// One event received from the host process.
#[derive(Debug, Clone)]
pub struct HostEvent {
    /// Name of the channel the event was sent on.
    pub channel: String,
    /// Payload; the empty string is a valid payload.
    pub payload: String,
}

type Handler = Rc<dyn Fn(&str)>;
type HandlerMap = RefCell<HashMap<String, Vec<(u64, Handler)>>>;

/// Receives host events and dispatches them to subscribed handlers.
pub struct HostEventBus {
    events: Receiver<HostEvent>,
    sender: Sender<HostEvent>,
    handlers: Rc<HandlerMap>,
    next_id: Cell<u64>,
}

/// Sending half of the bus, handed to the IPC layer that talks to the host
/// process. Cheap to clone and safe to move to another thread.
#[derive(Clone)]
pub struct HostEventSender {
    sender: Sender<HostEvent>,
}

impl HostEventSender {
    /// Queue an event for the next `pump()` on the UI thread.
    pub fn send(&self, channel: impl Into<String>, payload: impl Into<String>) {
        // A closed receiver means the UI is gone; nothing left to notify.
        let _ = self.sender.send(HostEvent {
            channel: channel.into(),
            payload: payload.into(),
        });
    }
}

/// Guard for one handler registration. Dropping it removes the handler;
/// the removal happens exactly once, and is a no-op if the bus itself has
/// already been dropped.
pub struct Subscription {
    handlers: Weak<HandlerMap>,
    channel: String,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(handlers) = self.handlers.upgrade() else {
            return;
        };
        let mut map = handlers.borrow_mut();
        if let Some(list) = map.get_mut(&self.channel) {
            list.retain(|(id, _)| *id != self.id);
            if list.is_empty() {
                map.remove(&self.channel);
            }
        }
        debug!("Unsubscribed handler {} from host channel '{}'", self.id, self.channel);
    }
}

impl HostEventBus {
    /// Create a bus with an empty queue and no handlers.
    pub fn new() -> Self {
        let (sender, events) = channel();
        Self {
            events,
            sender,
            handlers: Rc::new(RefCell::new(HashMap::new())),
            next_id: Cell::new(0),
        }
    }

    /// Sending half for the host bridge.
    pub fn sender(&self) -> HostEventSender {
        HostEventSender {
            sender: self.sender.clone(),
        }
    }

    /// Register a handler for one channel. The handler runs during `pump()`
    /// for every event delivered on that channel, until the returned guard
    /// is dropped.
    pub fn subscribe(&self, channel: &str, handler: impl Fn(&str) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers
            .borrow_mut()
            .entry(channel.to_string())
            .or_default()
            .push((id, Rc::new(handler)));
        debug!("Subscribed handler {} to host channel '{}'", id, channel);
        Subscription {
            handlers: Rc::downgrade(&self.handlers),
            channel: channel.to_string(),
            id,
        }
    }

    /// Dispatch every queued event to its channel's handlers, in delivery
    /// order, without blocking. Returns the number of events that reached
    /// at least one handler.
    pub fn pump(&self) -> usize {
        let mut dispatched = 0;
        while let Ok(event) = self.events.try_recv() {
            // Handlers are cloned out before the calls so a handler may
            // subscribe or unsubscribe without re-entering the registry.
            let handlers: Vec<Handler> = self
                .handlers
                .borrow()
                .get(&event.channel)
                .map(|list| list.iter().map(|(_, h)| Rc::clone(h)).collect())
                .unwrap_or_default();

            if handlers.is_empty() {
                debug!("No handler for host channel '{}', dropping event", event.channel);
                continue;
            }
            for handler in &handlers {
                handler(&event.payload);
            }
            dispatched += 1;
        }
        dispatched
    }

    #[cfg(test)]
    pub(crate) fn handler_count(&self, channel: &str) -> usize {
        self.handlers.borrow().get(channel).map_or(0, Vec::len)
    }
}

impl Default for HostEventBus {
    fn default() -> Self {
        Self::new()
    }
}
