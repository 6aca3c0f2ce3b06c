//! Shared rendering store.
//!
//! Holds exactly one [`Rendering`] at a time. The refresh loop is the
//! only writer; axum handlers are the readers. `publish` swaps the whole
//! `Arc`, so a reader holds either the previous pair or the new one —
//! never a full page from one cycle with a table body from another.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::render::Rendering;

/// Single-slot store for the current rendering.
pub struct RenderingStore {
    current: RwLock<Arc<Rendering>>,
}

impl RenderingStore {
    /// Create a store seeded with an initial placeholder, so `get` has
    /// something to return before the first cycle completes.
    pub fn new(initial: Rendering) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Return the last published rendering. Never blocks beyond the
    /// read-lock acquisition, never fails.
    pub fn get(&self) -> Arc<Rendering> {
        self.current.read().clone()
    }

    /// Replace the current rendering in one indivisible swap.
    pub fn publish(&self, rendering: Rendering) {
        *self.current.write() = Arc::new(rendering);
    }
}
