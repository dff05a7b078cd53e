//! Shared pixel canvas
//!
//! A 16×16 grid everyone paints on. Painting a cell and announcing it happen
//! under one lock, so every client ends up with the same last color per cell.

use crate::protocol::PixelPayload;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Cells per side
pub const CANVAS_SIDE: usize = 16;

/// Total number of cells
pub const CANVAS_CELLS: usize = CANVAS_SIDE * CANVAS_SIDE;

/// Color of an unpainted cell
pub const BLANK_COLOR: &str = "#FFFFFF";

/// One cell of the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelCell {
    pub color: String,
    /// Who painted it last; empty when unpainted
    pub user: String,
}

impl Default for PixelCell {
    fn default() -> Self {
        Self {
            color: BLANK_COLOR.to_string(),
            user: String::new(),
        }
    }
}

/// Error painting a cell
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("pixel index {idx} is outside the {len}-cell grid")]
    OutOfRange { idx: usize, len: usize },
}

/// Pixel canvas shared by every connection
#[derive(Debug)]
pub struct PixelCanvas {
    cells: Mutex<Vec<PixelCell>>,
}

impl PixelCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Mutex::new(vec![PixelCell::default(); CANVAS_CELLS]),
        }
    }

    /// Copy of the whole grid, row-major
    pub fn snapshot(&self) -> Vec<PixelCell> {
        self.cells.lock().clone()
    }

    pub fn cell(&self, idx: usize) -> Option<PixelCell> {
        self.cells.lock().get(idx).cloned()
    }

    /// Replace one cell and announce it through `publish`
    ///
    /// `publish` runs while the grid is locked; it must not block.
    pub fn paint<F>(&self, pixel: &PixelPayload, publish: F) -> Result<(), CanvasError>
    where
        F: FnOnce(&PixelPayload),
    {
        let mut cells = self.cells.lock();
        let len = cells.len();
        let cell = cells.get_mut(pixel.idx).ok_or(CanvasError::OutOfRange {
            idx: pixel.idx,
            len,
        })?;

        *cell = PixelCell {
            color: pixel.color.clone(),
            user: pixel.user.clone(),
        };
        publish(pixel);

        Ok(())
    }
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new()
    }
}
