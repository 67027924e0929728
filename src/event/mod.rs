mod bus;
mod events;

pub use bus::{EventBus, Handler};
pub use events::{EventKind, PuzzleEvent};
