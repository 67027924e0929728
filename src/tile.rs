use egui::{Pos2, Rect, Vec2};

use crate::config::PuzzleConfig;
use crate::surface::Surface;

/// Row-major index of a tile in the grid it was cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tile #{}", self.0)
    }
}

/// One rectangular cell of the puzzle image.
///
/// `home`, `size` and `source` are fixed when the grid is built; only the
/// current position and the in-place flag change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    id: TileId,
    home: Pos2,
    size: Vec2,
    source: Pos2,
    position: Pos2,
    in_place: bool,
}

impl Tile {
    /// Create a tile resting at `home`, showing the image region at `source`
    pub fn new(id: TileId, home: Pos2, size: Vec2, source: Pos2) -> Self {
        Self {
            id,
            home,
            size,
            source,
            position: home,
            in_place: true,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn home(&self) -> Pos2 {
        self.home
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn is_in_place(&self) -> bool {
        self.in_place
    }

    /// Where the tile currently sits on the surface
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Where the tile belongs on the surface
    pub fn home_rect(&self) -> Rect {
        Rect::from_min_size(self.home, self.size)
    }

    /// The region of the source image this tile shows
    pub fn source_rect(&self) -> Rect {
        Rect::from_min_size(self.source, self.size)
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
        self.in_place = position == self.home;
    }

    /// Put the tile exactly back home
    pub fn snap_home(&mut self) {
        self.set_position(self.home);
    }

    /// True when both axes are strictly closer than `snap_offset` to home
    pub fn snap_distance(&self, snap_offset: f32) -> bool {
        (self.position.x - self.home.x).abs() < snap_offset
            && (self.position.y - self.home.y).abs() < snap_offset
    }

    /// Whether the tile covers `pos`.
    ///
    /// Inclusive on both x edges, exclusive on both y edges.
    pub fn hit_test(&self, pos: Pos2) -> bool {
        let rect = self.rect();
        pos.x >= rect.min.x && pos.x <= rect.max.x && pos.y > rect.min.y && pos.y < rect.max.y
    }

    /// Outline the home slot
    pub fn draw_grid(&self, surface: &mut dyn Surface, config: &PuzzleConfig) {
        surface.stroke_rect(self.home_rect(), config.grid_color);
    }

    /// Copy the tile's image region to its current position and border it
    pub fn draw(&self, surface: &mut dyn Surface, config: &PuzzleConfig) {
        let border = if self.snap_distance(config.snap_offset) {
            config.snap_color
        } else {
            config.slot_color
        };
        surface.blit(self.source_rect(), self.rect());
        surface.stroke_rect(self.rect(), border);
    }
}
