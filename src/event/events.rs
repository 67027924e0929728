/// Names under which handlers subscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Fired once per render pass, after every tile has been drawn
    RenderComplete,
    /// Fired at the end of a render pass in which every tile is in place
    PuzzleCompleted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PuzzleEvent {
    RenderComplete {
        /// Number of render passes run so far, this one included
        frame: u64,
    },
    PuzzleCompleted {
        /// Clock reading, in seconds, when completion was detected
        at: f64,
    },
}

impl PuzzleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RenderComplete { .. } => EventKind::RenderComplete,
            Self::PuzzleCompleted { .. } => EventKind::PuzzleCompleted,
        }
    }
}
