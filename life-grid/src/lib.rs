#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod color;
mod config;
mod engine;
mod error;
mod grid;
mod random;
mod render;
mod world;

pub use color::{alpha_blend_with_background, Palette};
pub use config::LifeConfig;
pub use engine::GridEngine;
pub use error::{CanvasError, GridError};
pub use grid::{CellState, Grid, Loc, Neighborhood};
pub use random::Random;
pub use render::{Canvas, FrameCanvas, RenderAdapter, RenderStats};
pub use world::LifeWorld;

/// What a host loop needs from a simulation: advance it, paint it, report on it.
pub trait World {
    /// Width of the drawing surface in pixels.
    fn pixel_width(&self) -> u32;
    /// Height of the drawing surface in pixels.
    fn pixel_height(&self) -> u32;
    fn num_cells(&self) -> usize;
    fn generation(&self) -> u64;
    fn living_cell_count(&self) -> usize;
    fn update(&mut self);
    /// Paints the current generation; the canvas is assumed to keep what was
    /// painted by the previous call.
    fn draw<C: Canvas>(&mut self, canvas: &mut C) -> Result<RenderStats, C::Error>;
    /// Forgets what the canvas shows, so the next `draw` paints every cell.
    fn invalidate(&mut self);
}
