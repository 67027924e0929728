use std::path::Path;

use egui::Color32;
use serde::Deserialize;

use crate::error::{PuzzleError, PuzzleResult};

/// Placeholder in [`PuzzleConfig::puzzle_completed_text`] replaced by the elapsed seconds.
pub const TIME_PLACEHOLDER: &str = "%TIME";

/// Options for one puzzle session.
///
/// Built once from [`PuzzleConfig::default`] plus any [`ConfigOverrides`]
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleConfig {
    /// Ignore pointer input until the puzzle has been shuffled
    pub move_after_shuffle: bool,
    /// Do not show the untouched source image next to the surface
    pub hide_original: bool,
    /// Title of the window the surface is mounted in; `None` uses the central panel
    pub render_to: Option<String>,
    pub rows: usize,
    pub cols: usize,
    /// Padding around the grid on each side of the surface
    pub margin: f32,
    /// Per-axis distance (exclusive) under which a released tile snaps home
    pub snap_offset: f32,
    pub snap_color: Color32,
    pub grid_color: Color32,
    pub slot_color: Color32,
    /// Completion message, `%TIME` is replaced by the elapsed seconds
    pub puzzle_completed_text: String,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            move_after_shuffle: true,
            hide_original: false,
            render_to: None,
            rows: 5,
            cols: 5,
            margin: 100.0,
            snap_offset: 50.0,
            snap_color: Color32::from_rgb(0x00, 0xff, 0x00),
            grid_color: Color32::from_rgb(0x00, 0x00, 0xff),
            slot_color: Color32::from_gray(0x66),
            puzzle_completed_text: format!("puzzle completed in {TIME_PLACEHOLDER} s!"),
        }
    }
}

/// A partial set of options, as read from a JSON file or the command line.
///
/// Every field left as `None` keeps the value it overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub move_after_shuffle: Option<bool>,
    pub hide_original: Option<bool>,
    pub render_to: Option<String>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub margin: Option<f32>,
    pub snap_offset: Option<f32>,
    pub snap_color: Option<String>,
    pub grid_color: Option<String>,
    pub slot_color: Option<String>,
    pub puzzle_completed_text: Option<String>,
}

impl ConfigOverrides {
    /// Parse overrides from a JSON object
    pub fn from_json(json: &str) -> PuzzleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read overrides from a JSON file
    pub fn load(path: &Path) -> PuzzleResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Layer `other` on top of `self`, fields set in `other` win
    pub fn and(self, other: Self) -> Self {
        Self {
            move_after_shuffle: other.move_after_shuffle.or(self.move_after_shuffle),
            hide_original: other.hide_original.or(self.hide_original),
            render_to: other.render_to.or(self.render_to),
            rows: other.rows.or(self.rows),
            cols: other.cols.or(self.cols),
            margin: other.margin.or(self.margin),
            snap_offset: other.snap_offset.or(self.snap_offset),
            snap_color: other.snap_color.or(self.snap_color),
            grid_color: other.grid_color.or(self.grid_color),
            slot_color: other.slot_color.or(self.slot_color),
            puzzle_completed_text: other.puzzle_completed_text.or(self.puzzle_completed_text),
        }
    }
}

impl PuzzleConfig {
    /// Apply the given overrides and validate the result
    pub fn merge(mut self, overrides: ConfigOverrides) -> PuzzleResult<Self> {
        if let Some(value) = overrides.move_after_shuffle {
            self.move_after_shuffle = value;
        }
        if let Some(value) = overrides.hide_original {
            self.hide_original = value;
        }
        if overrides.render_to.is_some() {
            self.render_to = overrides.render_to;
        }
        if let Some(value) = overrides.rows {
            self.rows = value;
        }
        if let Some(value) = overrides.cols {
            self.cols = value;
        }
        if let Some(value) = overrides.margin {
            self.margin = value;
        }
        if let Some(value) = overrides.snap_offset {
            self.snap_offset = value;
        }
        if let Some(hex) = &overrides.snap_color {
            self.snap_color = parse_hex_color(hex)?;
        }
        if let Some(hex) = &overrides.grid_color {
            self.grid_color = parse_hex_color(hex)?;
        }
        if let Some(hex) = &overrides.slot_color {
            self.slot_color = parse_hex_color(hex)?;
        }
        if let Some(text) = overrides.puzzle_completed_text {
            self.puzzle_completed_text = text;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the options that would otherwise produce a degenerate puzzle
    pub fn validate(&self) -> PuzzleResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(PuzzleError::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(PuzzleError::InvalidMargin(self.margin));
        }
        if !self.snap_offset.is_finite() || self.snap_offset < 0.0 {
            return Err(PuzzleError::InvalidSnapOffset(self.snap_offset));
        }
        Ok(())
    }

    /// The completion text with `%TIME` replaced by `elapsed_secs`
    pub fn completion_message(&self, elapsed_secs: f64) -> String {
        let rounded = (elapsed_secs * 100.0).round() / 100.0;
        self.puzzle_completed_text
            .replace(TIME_PLACEHOLDER, &rounded.to_string())
    }
}

/// Parse a CSS-style `#rgb` or `#rrggbb` literal
pub fn parse_hex_color(literal: &str) -> PuzzleResult<Color32> {
    let invalid = || PuzzleError::InvalidColor(literal.to_owned());
    let digits = literal.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(digits.chars()) {
                // "#6" expands to "#66"
                *slot = channel(&c.to_string())? * 0x11;
            }
            Ok(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        6 => Ok(Color32::from_rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => Err(invalid()),
    }
}
