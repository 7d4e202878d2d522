//! Snake-order tile capture.
//!
//! Walks a [`MotionPath`] row by row, moving the stage to each target and
//! grabbing one frame there. Frames come back in travel order, so odd rows
//! are reversed before they are handed to a compositor.

use crate::device::{Camera, Frame, Stage};
use crate::error::{AcquisitionError, AcquisitionResult};
use std::path::{Path, PathBuf};
use tilescan_planner::MotionPath;
use tracing::{debug, info};

/// File name of the tile at a physical grid position
pub fn tile_file_name(row: usize, column: usize) -> String {
    format!("tile_{}_{}.png", row, column)
}

/// Captured frames in physical order (rows top to bottom, columns left to right)
#[derive(Debug, Clone, Default)]
pub struct TileGrid {
    rows: Vec<Vec<Frame>>,
}

impl TileGrid {
    /// Build a grid from rows already in physical order
    pub fn from_rows(rows: Vec<Vec<Frame>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Frame>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn num_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Tile at a physical grid position
    pub fn get(&self, row: usize, column: usize) -> Option<&Frame> {
        self.rows.get(row)?.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }
}

/// Runs a motion path against a stage and camera
pub struct TileCapture<S, C> {
    stage: S,
    camera: C,
    save_folder: Option<PathBuf>,
    home_first: bool,
}

impl<S: Stage, C: Camera> TileCapture<S, C> {
    /// Create a capture session that keeps frames in memory only
    pub fn new(stage: S, camera: C) -> Self {
        Self {
            stage,
            camera,
            save_folder: None,
            home_first: false,
        }
    }

    /// Also write every tile as PNG into `folder` (created if missing)
    pub fn with_save_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.save_folder = Some(folder.into());
        self
    }

    /// Home the stage before the first move
    pub fn with_homing(mut self, home_first: bool) -> Self {
        self.home_first = home_first;
        self
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Give back the devices
    pub fn into_parts(self) -> (S, C) {
        (self.stage, self.camera)
    }

    /// Visit every point of `path` and capture one frame at each.
    ///
    /// Stops at the first motion or capture failure; no partial grid is
    /// returned.
    pub fn run(&mut self, path: &MotionPath) -> AcquisitionResult<TileGrid> {
        if let Some(folder) = &self.save_folder {
            std::fs::create_dir_all(folder)?;
        }

        if self.home_first {
            info!("Homing stage");
            self.stage.home()?;
        }

        info!(
            "Capturing {} tiles ({} rows x {} columns) of {}x{} px",
            path.len(),
            path.num_rows(),
            path.num_columns(),
            self.camera.frame_width(),
            self.camera.frame_height()
        );

        let mut rows = Vec::with_capacity(path.num_rows());
        for (row_idx, grid_row) in path.rows().iter().enumerate() {
            let mut tiles = Vec::with_capacity(grid_row.len());
            for (travel_idx, point) in grid_row.iter().enumerate() {
                let column = path.column_index(row_idx, travel_idx).unwrap_or(travel_idx);
                debug!("Tile ({}, {}): moving to {}", row_idx, column, point);

                self.stage.move_absolute(*point)?;
                let frame = self
                    .camera
                    .grab_frame()
                    .map_err(|e| AcquisitionError::CaptureFailed {
                        row: row_idx,
                        column,
                        reason: e.to_string(),
                    })?;

                if let Some(folder) = &self.save_folder {
                    save_tile(folder, row_idx, column, &frame)?;
                }
                tiles.push(frame);
            }

            if row_idx % 2 == 1 {
                tiles.reverse();
            }
            rows.push(tiles);
        }

        info!("Capture complete");
        Ok(TileGrid::from_rows(rows))
    }
}

fn save_tile(folder: &Path, row: usize, column: usize, frame: &Frame) -> AcquisitionResult<()> {
    let file = folder.join(tile_file_name(row, column));
    frame.save(&file)?;
    debug!("Saved {}", file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_file_name() {
        assert_eq!(tile_file_name(0, 0), "tile_0_0.png");
        assert_eq!(tile_file_name(3, 12), "tile_3_12.png");
    }

    #[test]
    fn test_tile_grid_accessors() {
        let grid = TileGrid::from_rows(vec![
            vec![Frame::new(2, 2), Frame::new(2, 2)],
            vec![Frame::new(2, 2), Frame::new(2, 2)],
        ]);
        assert_eq!(grid.num_rows(), 2);
        assert_eq!(grid.num_columns(), 2);
        assert!(grid.get(1, 1).is_some());
        assert!(grid.get(2, 0).is_none());
        assert!(!grid.is_empty());
        assert!(TileGrid::default().is_empty());
    }
}
