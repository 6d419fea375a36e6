//! Display panel seam.
//!
//! The panel is the poller's only output: an externally-owned list whose
//! contents are fully replaced on every successful cycle. Strings pass
//! through verbatim (text-only, never interpreted as markup), so whatever
//! the panel implementation renders is exactly what the server sent.

use std::sync::RwLock;

/// An ordered list display owned by the caller.
///
/// Implementations must treat `replace` as a full swap: after the call the
/// panel shows exactly the given events, in order, and nothing else.
pub trait EventPanel: Send + Sync {
    /// Replaces the entire displayed list with `events`.
    fn replace(&self, events: &[String]);
}

/// In-process panel backed by a `Vec<String>`.
///
/// The default panel for tests and for callers that render the snapshot
/// themselves.
#[derive(Debug, Default)]
pub struct MemoryPanel {
    items: RwLock<Vec<String>>,
}

impl MemoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the currently displayed list.
    pub fn snapshot(&self) -> Vec<String> {
        self.items.read().expect("panel lock poisoned").clone()
    }

    /// Number of currently displayed items.
    pub fn len(&self) -> usize {
        self.items.read().expect("panel lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventPanel for MemoryPanel {
    fn replace(&self, events: &[String]) {
        let mut items = self.items.write().expect("panel lock poisoned");
        items.clear();
        items.extend_from_slice(events);
    }
}
