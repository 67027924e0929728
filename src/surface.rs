use egui::{Color32, Painter, Pos2, Rect, TextureId, Vec2};

/// Border width used for grid outlines and tile borders
pub const STROKE_WIDTH: f32 = 1.0;

/// The 2D drawing primitives the puzzle needs, in surface coordinates
pub trait Surface {
    /// Erase everything inside `area`
    fn clear(&mut self, area: Rect);

    /// Outline `rect` with a one pixel border
    fn stroke_rect(&mut self, rect: Rect, color: Color32);

    /// Copy the `source` region of the puzzle image into `target`
    fn blit(&mut self, source: Rect, target: Rect);
}

/// A single recorded drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    StrokeRect { rect: Rect, color: Color32 },
    Blit { source: Rect, target: Rect },
}

/// A retained surface.
///
/// egui repaints every frame while the puzzle only redraws when something
/// changed, so the last render is kept here and replayed onto a painter.
#[derive(Debug, Clone)]
pub struct DisplayList {
    area: Rect,
    commands: Vec<DrawCommand>,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self {
            area: Rect::ZERO,
            commands: Vec::new(),
        }
    }
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Targets of every blit, in drawing order
    pub fn blit_targets(&self) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Blit { target, .. } => Some(*target),
            DrawCommand::StrokeRect { .. } => None,
        })
    }

    /// Replay the recorded commands with the surface origin at `origin`.
    ///
    /// `image_size` is the pixel size of `texture`, used to turn blit
    /// sources into UV coordinates.
    pub fn paint(&self, painter: &Painter, origin: Pos2, texture: TextureId, image_size: Vec2) {
        let offset = origin.to_vec2();
        for command in &self.commands {
            match *command {
                DrawCommand::StrokeRect { rect, color } => {
                    painter.rect_stroke(
                        rect.translate(offset),
                        0.0,
                        egui::Stroke::new(STROKE_WIDTH, color),
                    );
                }
                DrawCommand::Blit { source, target } => {
                    let uv = Rect::from_min_max(
                        Pos2::new(source.min.x / image_size.x, source.min.y / image_size.y),
                        Pos2::new(source.max.x / image_size.x, source.max.y / image_size.y),
                    );
                    painter.image(texture, target.translate(offset), uv, Color32::WHITE);
                }
            }
        }
    }
}

impl Surface for DisplayList {
    fn clear(&mut self, area: Rect) {
        self.area = area;
        self.commands.clear();
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color32) {
        self.commands.push(DrawCommand::StrokeRect { rect, color });
    }

    fn blit(&mut self, source: Rect, target: Rect) {
        self.commands.push(DrawCommand::Blit { source, target });
    }
}
