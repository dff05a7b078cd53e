//! Shared widgets
//!
//! Room-wide state objects that ride on the same fan-out as chat.

mod canvas;
mod document;

pub use canvas::{CanvasError, PixelCanvas, PixelCell, BLANK_COLOR, CANVAS_CELLS, CANVAS_SIDE};
pub use document::SharedDocument;
