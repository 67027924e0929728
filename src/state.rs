use egui::Vec2;

use crate::tile::TileId;

/// Where the session is in the drag cycle, derived from [`InteractionState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    /// Nothing grabbed
    Idle,
    /// A tile follows the pointer
    Dragging,
    /// The pointer was released; the next render decides whether the tile snaps
    Resolving,
}

/// Mutable state shared by the pointer handlers and the render pass
#[derive(Debug, Clone)]
pub struct InteractionState {
    /// Pointer position relative to the grabbed tile's corner
    pub drag_offset: Vec2,
    pub dragging: bool,
    pub selection: Option<TileId>,
    /// A render is owed
    pub dirty: bool,
    /// Set on release, cleared once the following render has resolved the snap
    pub snap_pending: bool,
    pub shuffled: bool,
    /// Clock reading of the last shuffle, `None` once solved
    pub shuffle_started: Option<f64>,
    /// Message waiting to be shown to the user
    pub completion_notice: Option<String>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            drag_offset: Vec2::ZERO,
            dragging: false,
            selection: None,
            // the first tick always draws
            dirty: true,
            snap_pending: false,
            shuffled: false,
            shuffle_started: None,
            completion_notice: None,
        }
    }
}

impl InteractionState {
    pub fn phase(&self) -> InteractionPhase {
        if self.dragging {
            InteractionPhase::Dragging
        } else if self.snap_pending {
            InteractionPhase::Resolving
        } else {
            InteractionPhase::Idle
        }
    }

    pub fn begin_drag(&mut self, tile: TileId, offset: Vec2) {
        self.drag_offset = offset;
        self.dragging = true;
        self.selection = Some(tile);
        self.dirty = true;
    }

    pub fn release(&mut self) {
        self.dragging = false;
        self.snap_pending = true;
        self.dirty = true;
    }

    /// Ends the resolving window opened by [`Self::release`]
    pub fn finish_release(&mut self) {
        self.snap_pending = false;
        self.selection = None;
    }

    pub fn start_shuffle(&mut self, now: f64) {
        self.shuffled = true;
        self.shuffle_started = Some(now);
        self.dirty = true;
    }

    /// Clears the shuffle and returns the seconds it took, if one was running
    pub fn finish_shuffle(&mut self, now: f64) -> Option<f64> {
        let started = self.shuffle_started.take()?;
        self.shuffled = false;
        Some((now - started).max(0.0))
    }
}
