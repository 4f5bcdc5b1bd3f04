//! Page events used to decouple features.
//!
//! Events are fire-and-forget: subscribers present at emission time are
//! called, later subscribers are not. The background-images event is the
//! exception; the bus remembers it fired and hands it to late subscribers of
//! [`EventBus::on_background_images_loaded`] immediately.

use crate::page_layout::Layout;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Notification broadcast on the page.
pub enum PageEvent {
    /// The page switched to a new layout.
    LayoutChanged(Layout),
    /// Every preloaded image has settled (loaded or failed).
    BackgroundImagesLoaded,
}

impl PageEvent {
    #[must_use]
    /// Kind of the event, used to match subscriptions.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::LayoutChanged(_) => EventKind::LayoutChanged,
            Self::BackgroundImagesLoaded => EventKind::BackgroundImagesLoaded,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Event discriminant for subscriptions.
pub enum EventKind {
    /// See [`PageEvent::LayoutChanged`].
    LayoutChanged,
    /// See [`PageEvent::BackgroundImagesLoaded`].
    BackgroundImagesLoaded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Handle for removing a subscription.
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&PageEvent)>;

#[derive(Default)]
/// Single-threaded event dispatcher for one page.
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, EventKind, Handler)>,
    on_loaded: Vec<Box<dyn FnOnce()>>,
    background_loaded: bool,
}

impl EventBus {
    #[must_use]
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `handler` for every future event of `kind`.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&PageEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, kind, Box::new(handler)));
        id
    }

    /// Removes a subscription; returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Runs `callback` once the background images have loaded, immediately
    /// if that already happened.
    pub fn on_background_images_loaded(&mut self, callback: impl FnOnce() + 'static) {
        if self.background_loaded {
            callback();
        } else {
            self.on_loaded.push(Box::new(callback));
        }
    }

    #[must_use]
    /// Whether the background-images event has fired.
    pub fn background_images_loaded(&self) -> bool {
        self.background_loaded
    }

    /// Delivers `event` to current subscribers.
    pub fn emit(&mut self, event: PageEvent) {
        tracing::debug!(?event, "page event");
        if event == PageEvent::BackgroundImagesLoaded {
            self.background_loaded = true;
            for callback in self.on_loaded.drain(..) {
                callback();
            }
        }
        let kind = event.kind();
        for (_, sub_kind, handler) in &mut self.subscribers {
            if *sub_kind == kind {
                handler(&event);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/events.rs"]
mod tests;
