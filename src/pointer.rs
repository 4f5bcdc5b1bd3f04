//! Page-level pointer listeners.
//!
//! Interactive drags register move and release listeners for their duration
//! and must remove them when the drag ends. The registry only records who is
//! listening; the controller routes each pointer event to the targets
//! returned by [`PointerListeners::targets`].

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Handle returned when registering a listener.
pub struct ListenerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Pointer event phase a listener subscribes to.
pub enum PointerPhase {
    /// Pointer moved while a button is held.
    Move,
    /// Button released.
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Component that handles a routed pointer event.
pub enum PointerTarget {
    /// The sidebar's drag-resize session.
    SidebarResize,
}

#[derive(Debug, Default)]
/// Registry of active pointer listeners.
pub struct PointerListeners {
    next_id: u64,
    entries: Vec<(ListenerId, PointerPhase, PointerTarget)>,
}

impl PointerListeners {
    #[must_use]
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `target` for `phase` events.
    pub fn add(&mut self, phase: PointerPhase, target: PointerTarget) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, phase, target));
        id
    }

    /// Unregisters a listener; returns whether it was registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    #[must_use]
    /// Targets listening for `phase`, in registration order.
    pub fn targets(&self, phase: PointerPhase) -> Vec<PointerTarget> {
        self.entries
            .iter()
            .filter(|(_, p, _)| *p == phase)
            .map(|(_, _, target)| *target)
            .collect()
    }

    #[must_use]
    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{PointerListeners, PointerPhase, PointerTarget};

    #[test]
    fn test_targets_filter_by_phase() {
        let mut listeners = PointerListeners::new();
        let moving = listeners.add(PointerPhase::Move, PointerTarget::SidebarResize);
        listeners.add(PointerPhase::Release, PointerTarget::SidebarResize);

        assert_eq!(listeners.targets(PointerPhase::Move), vec![PointerTarget::SidebarResize]);
        assert!(listeners.remove(moving));
        assert!(!listeners.remove(moving));
        assert!(listeners.targets(PointerPhase::Move).is_empty());
        assert_eq!(listeners.len(), 1);
    }
}
