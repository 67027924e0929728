use egui::{Color32, TextureHandle, TextureOptions};

use crate::config::PuzzleConfig;
use crate::error::PuzzleResult;
use crate::input::InputHandler;
use crate::puzzle::{PuzzleEngine, TICK_INTERVAL};
use crate::source_image::SourceImage;
use crate::surface::DisplayList;

/// The eframe host: mounts the puzzle surface and drives its redraw tick
pub struct PuzzleApp {
    engine: PuzzleEngine,
    image: SourceImage,
    texture: TextureHandle,
    display: DisplayList,
    input: InputHandler,
    // Completion message currently shown in the modal
    notice: Option<String>,
}

impl PuzzleApp {
    /// Called once before the first frame.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        image: SourceImage,
        config: PuzzleConfig,
        seed: Option<u64>,
    ) -> PuzzleResult<Self> {
        let mut engine = PuzzleEngine::new(image.size(), config)?;
        if let Some(seed) = seed {
            engine = engine.with_seed(seed);
        }

        let texture = cc.egui_ctx.load_texture(
            "puzzle_image",
            image.to_color_image(),
            TextureOptions::LINEAR,
        );

        Ok(Self {
            engine,
            image,
            texture,
            display: DisplayList::new(),
            input: InputHandler::new(egui::Rect::NOTHING),
            notice: None,
        })
    }

    pub fn engine(&self) -> &PuzzleEngine {
        &self.engine
    }

    /// Allocate the surface, feed it pointer input, redraw if owed and paint
    fn surface_ui(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(self.engine.surface_size(), egui::Sense::drag());
        let rect = response.rect;

        self.input.set_surface_rect(rect);
        for event in self.input.process_input(ui.ctx(), &response) {
            self.engine.handle_pointer(event);
        }
        self.engine.render(&mut self.display);

        painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::BLACK));
        self.display
            .paint(&painter, rect.min, self.texture.id(), self.image.size_vec2());
    }

    fn status_text(&self) -> String {
        let placed = self.engine.tiles().iter().filter(|tile| tile.is_in_place()).count();
        format!("{placed}/{} tiles in place", self.engine.tiles().len())
    }
}

impl eframe::App for PuzzleApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Shuffle").clicked() {
                    self.engine.shuffle();
                }
                ui.label(self.status_text());
                if self.engine.config().move_after_shuffle && !self.engine.state().shuffled {
                    ui.weak("Shuffle to start playing");
                }
            });
        });

        if !self.engine.config().hide_original {
            egui::SidePanel::right("original").show(ctx, |ui| {
                ui.heading("Original");
                let size = self.image.size_vec2();
                ui.add(
                    egui::Image::new(egui::load::SizedTexture::new(self.texture.id(), size))
                        .max_width(ui.available_width()),
                );
            });
        }

        match self.engine.config().render_to.clone() {
            Some(title) => {
                egui::CentralPanel::default().show(ctx, |_ui| {});
                egui::Window::new(title)
                    .collapsible(false)
                    .resizable(false)
                    .show(ctx, |ui| self.surface_ui(ui));
            }
            None => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    egui::ScrollArea::both().show(ui, |ui| self.surface_ui(ui));
                });
            }
        }

        if let Some(notice) = self.engine.take_completion_notice() {
            self.notice = Some(notice);
        }

        // Show the completion modal until dismissed
        if let Some(notice) = self.notice.clone() {
            egui::Window::new("Puzzle completed")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(notice);
                    if ui.button("Close").clicked() {
                        self.notice = None;
                    }
                });
        }

        ctx.request_repaint_after(TICK_INTERVAL);
    }
}
