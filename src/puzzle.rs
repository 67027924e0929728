use std::collections::VecDeque;
use std::time::Duration;

use egui::{Pos2, Rect, Vec2};
use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::PuzzleConfig;
use crate::error::{PuzzleError, PuzzleResult};
use crate::event::{EventBus, EventKind, PuzzleEvent};
use crate::input::PointerEvent;
use crate::state::InteractionState;
use crate::surface::Surface;
use crate::tile::{Tile, TileId};
use crate::util::time;

/// How often the host should give the engine a chance to redraw
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Source of the current time, in seconds
pub type Clock = Box<dyn Fn() -> f64>;

/// Z-order produced by one render pass.
///
/// Holds indices into the tile list as it was at the start of the pass;
/// front of the queue is drawn first (bottom), back is drawn last (top).
#[derive(Debug, Clone, Default)]
pub struct DrawOrder {
    order: VecDeque<usize>,
}

impl DrawOrder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Record that the item at `index` was drawn, on top of everything so
    /// far or, with `to_back`, beneath everything so far
    pub fn record(&mut self, index: usize, to_back: bool) {
        if to_back {
            self.order.push_front(index);
        } else {
            self.order.push_back(index);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Reorder `items` to match the recorded order.
    ///
    /// Items that were never recorded keep their relative order and end up on top.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
        let mut ordered: Vec<T> = self
            .order
            .iter()
            .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
            .collect();
        ordered.extend(slots.into_iter().flatten());
        ordered
    }
}

/// The selected tile's draw, postponed until every other tile is drawn
#[derive(Debug, Clone, Copy)]
struct DeferredDraw {
    index: usize,
    to_back: bool,
}

/// Owns the tiles and the interaction state of one puzzle session
pub struct PuzzleEngine {
    config: PuzzleConfig,
    image_size: Vec2,
    tile_size: Vec2,
    /// Tiles in draw order, the last one is on top
    tiles: Vec<Tile>,
    state: InteractionState,
    events: EventBus<InteractionState>,
    rng: StdRng,
    clock: Clock,
    frame: u64,
}

impl std::fmt::Debug for PuzzleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PuzzleEngine")
            .field("config", &self.config)
            .field("image_size", &self.image_size)
            .field("tile_size", &self.tile_size)
            .field("tiles", &self.tiles.len())
            .field("state", &self.state)
            .field("events", &self.events)
            .field("frame", &self.frame)
            .finish()
    }
}

impl PuzzleEngine {
    /// Cut an image of `image_size` pixels into the grid described by `config`
    pub fn new(image_size: [usize; 2], config: PuzzleConfig) -> PuzzleResult<Self> {
        config.validate()?;
        let (tile_size, tiles) = build_grid(image_size, &config)?;

        Ok(Self {
            config,
            image_size: Vec2::new(image_size[0] as f32, image_size[1] as f32),
            tile_size,
            tiles,
            state: InteractionState::default(),
            events: EventBus::new(),
            rng: StdRng::from_os_rng(),
            clock: Box::new(time::current_time_secs),
            frame: 0,
        })
    }

    /// Use a fixed seed for shuffling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_clock(mut self, clock: impl Fn() -> f64 + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Tiles in their current draw order, bottom first
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id() == id)
    }

    fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|tile| tile.id() == id)
    }

    /// Tile ids in draw order, bottom first
    pub fn tile_order(&self) -> Vec<TileId> {
        self.tiles.iter().map(Tile::id).collect()
    }

    pub fn image_size(&self) -> Vec2 {
        self.image_size
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    /// The image plus a margin on every side
    pub fn surface_size(&self) -> Vec2 {
        self.image_size + Vec2::splat(2.0 * self.config.margin)
    }

    /// Number of render passes run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn mark_dirty(&mut self) {
        self.state.dirty = true;
    }

    /// Move a tile without going through the pointer handlers
    pub fn set_tile_position(&mut self, id: TileId, position: Pos2) {
        if let Some(tile) = self.tile_mut(id) {
            tile.set_position(position);
            self.state.dirty = true;
        }
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&PuzzleEvent, &mut InteractionState) + 'static,
    {
        self.events.subscribe(kind, handler);
    }

    pub fn subscribe_once<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&PuzzleEvent, &mut InteractionState) + 'static,
    {
        self.events.subscribe_once(kind, handler);
    }

    /// The completion message produced since the last call, if any
    pub fn take_completion_notice(&mut self) -> Option<String> {
        self.state.completion_notice.take()
    }

    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(Tile::is_in_place)
    }

    /// Scatter every tile uniformly over the surface and start the clock
    pub fn shuffle(&mut self) {
        let surface = self.surface_size();
        for tile in &mut self.tiles {
            let room = surface - tile.size();
            let x = self.rng.random::<f32>() * room.x;
            let y = self.rng.random::<f32>() * room.y;
            tile.set_position(Pos2::new(x, y));
        }

        let now = (self.clock)();
        self.state.start_shuffle(now);
        info!("Shuffled {} tiles", self.tiles.len());

        let config = self.config.clone();
        self.events
            .subscribe_once(EventKind::PuzzleCompleted, move |event, state| {
                let PuzzleEvent::PuzzleCompleted { at } = event else {
                    return;
                };
                // an earlier shuffle's handler already reported this solve
                let Some(elapsed) = state.finish_shuffle(*at) else {
                    return;
                };
                let message = config.completion_message(elapsed);
                info!("{message}");
                state.completion_notice = Some(message);
            });
    }

    fn accepts_pointer(&self) -> bool {
        self.state.shuffled || !self.config.move_after_shuffle
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(pos),
            PointerEvent::Move(pos) => self.pointer_move(pos),
            PointerEvent::Up(pos) => self.pointer_up(pos),
        }
    }

    /// Grab the top-most tile under `pos`, or drop the selection if there is none
    pub fn pointer_down(&mut self, pos: Pos2) {
        if !self.accepts_pointer() {
            return;
        }

        if let Some(tile) = self.tiles.iter().rev().find(|tile| tile.hit_test(pos)) {
            let id = tile.id();
            let offset = pos - tile.position();
            debug!("Grabbed {id} at {pos:?}");
            self.state.begin_drag(id, offset);
            return;
        }

        if let Some(id) = self.state.selection.take() {
            debug!("Released selection of {id}");
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        if !self.accepts_pointer() || !self.state.dragging {
            return;
        }

        let Some(id) = self.state.selection else {
            return;
        };
        let target = pos - self.state.drag_offset;
        if let Some(tile) = self.tile_mut(id) {
            tile.set_position(target);
            self.state.dirty = true;
        }
    }

    /// Stop dragging; the next render decides whether the tile snaps home.
    ///
    /// A drag that is in progress always gets its release, even if the
    /// shuffle gate has closed since the press.
    pub fn pointer_up(&mut self, _pos: Pos2) {
        if !self.accepts_pointer() && !self.state.dragging {
            return;
        }

        self.state.release();
        self.events
            .subscribe_once(EventKind::RenderComplete, |_, state| state.finish_release());
    }

    /// Redraw the surface if anything changed since the last pass.
    ///
    /// Grid outlines are drawn first, then every unselected tile in the
    /// current draw order, then the selected tile. The selected tile ends on
    /// top unless it snapped home during this pass, in which case it moves
    /// to the bottom. Completion is only checked when no tile is held.
    /// Returns whether a pass ran.
    pub fn render(&mut self, surface: &mut dyn Surface) -> bool {
        if !self.state.dirty {
            return false;
        }

        surface.clear(Rect::from_min_size(Pos2::ZERO, self.surface_size()));
        for tile in &self.tiles {
            tile.draw_grid(surface, &self.config);
        }

        let mut order = DrawOrder::with_capacity(self.tiles.len());
        let mut deferred = None;
        for (index, tile) in self.tiles.iter_mut().enumerate() {
            if self.state.selection == Some(tile.id()) {
                let snapped =
                    self.state.snap_pending && tile.snap_distance(self.config.snap_offset);
                if snapped {
                    tile.snap_home();
                    debug!("{} snapped home", tile.id());
                }
                deferred = Some(DeferredDraw {
                    index,
                    to_back: snapped,
                });
            } else {
                tile.draw(surface, &self.config);
                order.record(index, false);
            }
        }
        self.state.dirty = false;

        if let Some(DeferredDraw { index, to_back }) = deferred {
            if let Some(tile) = self.tiles.get(index) {
                tile.draw(surface, &self.config);
            }
            order.record(index, to_back);
            // keep redrawing while a tile is held
            self.state.dirty = true;
        }

        self.frame += 1;
        let frame = self.frame;
        self.events
            .emit(&PuzzleEvent::RenderComplete { frame }, &mut self.state);

        let tiles = std::mem::take(&mut self.tiles);
        self.tiles = order.apply(tiles);

        // a held tile resting on its home is not a solve until it is released
        if !self.state.dragging && self.is_complete() {
            let at = (self.clock)();
            self.events
                .emit(&PuzzleEvent::PuzzleCompleted { at }, &mut self.state);
        }
        true
    }
}

/// Partition the image into `rows x cols` tiles, row by row, offset by the margin.
///
/// Tile sizes are floor-divided; leftover pixels on the right and bottom
/// edges of the image are not part of any tile.
fn build_grid(image_size: [usize; 2], config: &PuzzleConfig) -> PuzzleResult<(Vec2, Vec<Tile>)> {
    let [width, height] = image_size;
    let (rows, cols) = (config.rows, config.cols);
    let tile_width = width / cols;
    let tile_height = height / rows;
    if tile_width == 0 || tile_height == 0 {
        return Err(PuzzleError::ImageTooSmall {
            width,
            height,
            rows,
            cols,
        });
    }

    let size = Vec2::new(tile_width as f32, tile_height as f32);
    info!("puzzle: slot size {tile_width}x{tile_height}, {rows}x{cols} grid");

    let margin = Vec2::splat(config.margin);
    let tiles = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .enumerate()
        .map(|(index, (row, col))| {
            let source = Pos2::new((col * tile_width) as f32, (row * tile_height) as f32);
            Tile::new(TileId(index), source + margin, size, source)
        })
        .collect();
    Ok((size, tiles))
}
