#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod puzzle;
pub mod source_image;
pub mod state;
pub mod surface;
pub mod tile;
pub mod util;

pub use app::PuzzleApp;
pub use config::{ConfigOverrides, PuzzleConfig};
pub use error::{PuzzleError, PuzzleResult};
pub use event::{EventBus, EventKind, PuzzleEvent};
pub use input::{InputHandler, PointerEvent};
pub use puzzle::{DrawOrder, PuzzleEngine};
pub use source_image::SourceImage;
pub use state::{InteractionPhase, InteractionState};
pub use surface::{DisplayList, DrawCommand, Surface};
pub use tile::{Tile, TileId};
