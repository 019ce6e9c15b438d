//! Handle-based panel state listener registry
//!
//! Registration returns a [`ListenerId`]; removal goes through the handle
//! rather than callback identity, so closures never need to be kept around
//! just to unregister them. Listeners run synchronously, in registration
//! order, on the thread that committed the offset change.

use crate::state::PanelState;

/// Opaque handle identifying one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type StateCallback = Box<dyn FnMut(PanelState)>;

/// Ordered set of state-change observers for one side panel
#[derive(Default)]
pub struct StateListeners {
    next_id: u64,
    entries: Vec<(ListenerId, StateCallback)>,
}

impl StateListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; returns the handle used for removal
    pub fn register(&mut self, callback: impl FnMut(PanelState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a listener by handle; returns whether it was registered
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Invoke every listener with the new state, in registration order
    ///
    /// Panics from a listener propagate to the caller; the registry does
    /// not guard observer code.
    pub fn notify(&mut self, state: PanelState) {
        for (_, callback) in &mut self.entries {
            callback(state);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for StateListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateListeners")
            .field("len", &self.entries.len())
            .finish()
    }
}
