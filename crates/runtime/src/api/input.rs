//! Drag-and-drop input adapter.
//!
//! Presentation layers report raw gestures here: which picture was picked up
//! and on which label it was released. The adapter turns a completed gesture
//! into a single [`SessionHandle::attempt_match`] call.
use match_core::{ItemId, MatchOutcome};

use super::errors::Result;
use super::handle::SessionHandle;

/// Tracks the picture currently being dragged.
#[derive(Clone)]
pub struct DragDropInput {
    handle: SessionHandle,
    dragging: Option<ItemId>,
}

impl DragDropInput {
    pub fn new(handle: SessionHandle) -> Self {
        Self {
            handle,
            dragging: None,
        }
    }

    /// A picture was picked up. Replaces any unfinished drag.
    pub fn on_drag_start(&mut self, item: ItemId) {
        self.dragging = Some(item);
    }

    /// The drag ended outside any label.
    pub fn on_drag_cancel(&mut self) {
        self.dragging = None;
    }

    pub fn dragging(&self) -> Option<ItemId> {
        self.dragging
    }

    /// The dragged picture was released on `label`.
    ///
    /// Returns `Ok(None)` when no drag was in progress.
    pub async fn on_drop(&mut self, label: &str) -> Result<Option<MatchOutcome>> {
        let Some(item) = self.dragging.take() else {
            return Ok(None);
        };
        self.handle.attempt_match(item, label).await.map(Some)
    }
}
