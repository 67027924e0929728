#![warn(clippy::all, rust_2018_idioms)]

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
use eframe_puzzle::{ConfigOverrides, PuzzleApp, PuzzleConfig, SourceImage};

/// Cut an image into tiles, scatter them and drag them back into place
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image to cut into tiles
    image: PathBuf,

    /// JSON file with option overrides
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    cols: Option<usize>,

    /// Padding around the grid, in pixels
    #[arg(long)]
    margin: Option<f32>,

    /// Per-axis distance under which a released tile snaps home
    #[arg(long)]
    snap_offset: Option<f32>,

    /// Allow dragging tiles before the first shuffle
    #[arg(long)]
    free_move: bool,

    /// Don't show the original image next to the puzzle
    #[arg(long)]
    hide_original: bool,

    /// Show the puzzle in a floating window with this title
    #[arg(long)]
    render_to: Option<String>,

    /// Seed for shuffling
    #[arg(long)]
    seed: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            move_after_shuffle: self.free_move.then_some(false),
            hide_original: self.hide_original.then_some(true),
            render_to: self.render_to.clone(),
            rows: self.rows,
            cols: self.cols,
            margin: self.margin,
            snap_offset: self.snap_offset,
            ..Default::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let file_overrides = match &args.config {
        Some(path) => ConfigOverrides::load(path)?,
        None => ConfigOverrides::default(),
    };
    let config = PuzzleConfig::default().merge(file_overrides.and(args.overrides()))?;
    let image = SourceImage::open(&args.image)?;

    let [width, height] = image.size();
    let margin = config.margin;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Puzzle")
            .with_inner_size([
                width as f32 + 2.0 * margin + 320.0,
                height as f32 + 2.0 * margin + 80.0,
            ]),
        ..Default::default()
    };

    let seed = args.seed;
    eframe::run_native(
        "eframe_puzzle",
        native_options,
        Box::new(move |cc| Ok(Box::new(PuzzleApp::new(cc, image, config, seed)?))),
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // On the web the host page constructs `PuzzleApp` itself.
}
