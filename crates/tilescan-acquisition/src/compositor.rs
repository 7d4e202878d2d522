//! Combining captured tiles into one image.

use crate::capture::TileGrid;
use crate::device::Frame;
use crate::error::{AcquisitionError, AcquisitionResult};
use image::imageops::{self, FilterType};
use std::path::Path;
use tracing::info;

/// Turns a grid of tiles into a single image
pub trait Compositor {
    fn compose(&self, tiles: &TileGrid) -> AcquisitionResult<Frame>;
}

/// Places tiles edge to edge, ignoring any overlap between them.
///
/// Gives a seamless result only when the path was planned with zero overlap.
#[derive(Debug, Clone, Copy)]
pub struct NaiveTiler {
    scale: f32,
}

impl Default for NaiveTiler {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl NaiveTiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Downscale the final image by `scale`, which must lie in (0, 1]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

impl Compositor for NaiveTiler {
    fn compose(&self, tiles: &TileGrid) -> AcquisitionResult<Frame> {
        if !(self.scale > 0.0 && self.scale <= 1.0) {
            return Err(AcquisitionError::Composite(format!(
                "scale must be in (0, 1], got {}",
                self.scale
            )));
        }
        if tiles.is_empty() {
            return Err(AcquisitionError::Composite("no tiles to compose".to_string()));
        }

        let mut row_heights = Vec::with_capacity(tiles.num_rows());
        let mut total_width: Option<u32> = None;
        for (row_idx, row) in tiles.rows().iter().enumerate() {
            let height = row.first().map(Frame::height).unwrap_or(0);
            if row.iter().any(|tile| tile.height() != height) {
                return Err(AcquisitionError::Composite(format!(
                    "tiles in row {} differ in height",
                    row_idx
                )));
            }
            let width: u32 = row.iter().map(Frame::width).sum();
            match total_width {
                None => total_width = Some(width),
                Some(w) if w != width => {
                    return Err(AcquisitionError::Composite(format!(
                        "row {} is {} px wide, expected {} px",
                        row_idx, width, w
                    )));
                }
                Some(_) => {}
            }
            row_heights.push(height);
        }

        let width = total_width.unwrap_or(0);
        let height: u32 = row_heights.iter().sum();
        let mut canvas = Frame::new(width, height);

        let mut y = 0i64;
        for (row, row_height) in tiles.rows().iter().zip(&row_heights) {
            let mut x = 0i64;
            for tile in row {
                imageops::replace(&mut canvas, tile, x, y);
                x += i64::from(tile.width());
            }
            y += i64::from(*row_height);
        }

        if self.scale < 1.0 {
            let scaled_w = ((width as f32) * self.scale).round().max(1.0) as u32;
            let scaled_h = ((height as f32) * self.scale).round().max(1.0) as u32;
            canvas = imageops::resize(&canvas, scaled_w, scaled_h, FilterType::CatmullRom);
        }

        info!(
            "Naively tiled {} rows into a {}x{} image",
            tiles.num_rows(),
            canvas.width(),
            canvas.height()
        );
        Ok(canvas)
    }
}

/// Write a frame as PNG
pub fn save_png(frame: &Frame, path: &Path) -> AcquisitionResult<()> {
    frame.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
