use std::path::Path;

use egui::{ColorImage, Vec2};
use log::debug;

use crate::error::PuzzleResult;

/// The decoded picture a puzzle is cut from, as straight RGBA8
#[derive(Clone)]
pub struct SourceImage {
    size: [usize; 2],
    rgba: Vec<u8>,
}

// Custom Debug so the pixel buffer isn't dumped
impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("size", &self.size)
            .field("data_len", &self.rgba.len())
            .finish()
    }
}

impl SourceImage {
    /// Decode an image file
    pub fn open(path: &Path) -> PuzzleResult<Self> {
        let bytes = std::fs::read(path)?;
        log::info!("Loading image from path: {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(&bytes)
    }

    /// Decode an in-memory image in any format the image crate understands
    pub fn from_bytes(bytes: &[u8]) -> PuzzleResult<Self> {
        let img = image::load_from_memory(bytes)?;
        debug!("Successfully decoded image: {}x{}", img.width(), img.height());

        let rgba = img.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        Ok(Self {
            size,
            rgba: rgba.into_raw(),
        })
    }

    /// Natural pixel dimensions, `[width, height]`
    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    pub fn size_vec2(&self) -> Vec2 {
        Vec2::new(self.size[0] as f32, self.size[1] as f32)
    }

    pub fn data(&self) -> &[u8] {
        &self.rgba
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(self.size, &self.rgba)
    }
}
