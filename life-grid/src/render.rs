use crate::color::Palette;
use crate::config::check_cell_pixel_size;
use crate::error::{CanvasError, GridError};
use crate::grid::Grid;

/// A surface that can be painted with solid rectangles.
pub trait Canvas {
    type Error;

    fn fill_rect(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: [u8; 4],
    ) -> Result<(), Self::Error>;
}

/// RGBA8 pixels in row-major order, e.g. a `pixels` frame.
pub struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Result<Self, CanvasError> {
        if frame.len() != 4 * width as usize * height as usize {
            return Err(CanvasError::FrameSize {
                len: frame.len(),
                width,
                height,
            });
        }
        Ok(Self {
            frame,
            width,
            height,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = 4 * (y as usize * self.width as usize + x as usize);
        let mut pixel = [0; 4];
        pixel.copy_from_slice(&self.frame[start..start + 4]);
        Some(pixel)
    }
}

impl Canvas for FrameCanvas<'_> {
    type Error = CanvasError;

    fn fill_rect(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: [u8; 4],
    ) -> Result<(), CanvasError> {
        let fits = |start: u32, extent: u32, max: u32| {
            start.checked_add(extent).is_some_and(|end| end <= max)
        };
        if !fits(x, width, self.width) || !fits(y, height, self.height) {
            return Err(CanvasError::OutOfFrame {
                x,
                y,
                width,
                height,
            });
        }

        let row_len = 4 * self.width as usize;
        let rows = self.frame.chunks_exact_mut(row_len);
        for row in rows.skip(y as usize).take(height as usize) {
            let span = &mut row[4 * x as usize..4 * (x + width) as usize];
            for pixel in span.chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub living_cell_count: usize,
    /// Cells actually painted; lower than the total when only changes were drawn.
    pub cells_drawn: usize,
}

/// Paints each cell as a `cell_pixel_size` square colored by its state.
#[derive(Clone, Copy, Debug)]
pub struct RenderAdapter {
    cell_pixel_size: u32,
    palette: Palette,
}

impl RenderAdapter {
    pub fn new(cell_pixel_size: u32, palette: Palette) -> Result<Self, GridError> {
        check_cell_pixel_size(cell_pixel_size)?;
        Ok(Self {
            cell_pixel_size,
            palette,
        })
    }

    /// Draws `grid`. With `previous`, only cells whose state differs from it are
    /// painted; a `previous` of other dimensions is ignored.
    pub fn render<C: Canvas>(
        &self,
        grid: &Grid,
        previous: Option<&Grid>,
        canvas: &mut C,
    ) -> Result<RenderStats, C::Error> {
        let previous = previous.filter(|previous| previous.same_dimensions(grid));
        let mut previous_cells = previous.map(|previous| previous.cells_iter());
        let mut stats = RenderStats::default();

        for (loc, state) in grid.locs_iter() {
            let alive = state.is_alive();
            if alive {
                stats.living_cell_count += 1;
            }
            let changed = match previous_cells.as_mut().and_then(Iterator::next) {
                Some(&previous_state) => previous_state != state,
                None => true,
            };
            if changed {
                canvas.fill_rect(
                    loc.x * self.cell_pixel_size,
                    loc.y * self.cell_pixel_size,
                    self.cell_pixel_size,
                    self.cell_pixel_size,
                    self.palette.color_rgba(alive),
                )?;
                stats.cells_drawn += 1;
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;

    const DEAD: [u8; 4] = [0, 0, 0, 0xff];
    const ALIVE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

    /// Records every rectangle instead of painting it.
    #[derive(Default)]
    struct RecordingCanvas {
        rects: Vec<(u32, u32, u32, u32, [u8; 4])>,
    }

    impl Canvas for RecordingCanvas {
        type Error = std::convert::Infallible;

        fn fill_rect(
            &mut self,
            x: u32,
            y: u32,
            width: u32,
            height: u32,
            color: [u8; 4],
        ) -> Result<(), Self::Error> {
            self.rects.push((x, y, width, height, color));
            Ok(())
        }
    }

    struct BrokenCanvas;

    impl Canvas for BrokenCanvas {
        type Error = &'static str;

        fn fill_rect(
            &mut self,
            _x: u32,
            _y: u32,
            _width: u32,
            _height: u32,
            _color: [u8; 4],
        ) -> Result<(), Self::Error> {
            Err("surface lost")
        }
    }

    fn adapter(cell_pixel_size: u32) -> RenderAdapter {
        RenderAdapter::new(cell_pixel_size, Palette::new(DEAD, ALIVE)).unwrap()
    }

    #[test]
    fn rejects_zero_pixel_size() {
        assert!(matches!(
            RenderAdapter::new(0, Palette::default()),
            Err(GridError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn full_render_places_scaled_squares() {
        let grid = Grid::from_rows(&["#.", ".."]).unwrap();
        let mut canvas = RecordingCanvas::default();
        let stats = adapter(3).render(&grid, None, &mut canvas).unwrap();

        assert_eq!(stats.living_cell_count, 1);
        assert_eq!(stats.cells_drawn, 4);
        assert_eq!(
            canvas.rects,
            vec![
                (0, 0, 3, 3, ALIVE),
                (3, 0, 3, 3, DEAD),
                (0, 3, 3, 3, DEAD),
                (3, 3, 3, 3, DEAD),
            ]
        );
    }

    #[test]
    fn change_only_render_paints_differences() {
        let before = Grid::from_rows(&["#.", ".."]).unwrap();
        let mut after = before.clone();
        after.set(1, 1, CellState::Alive).unwrap();
        after.set(0, 0, CellState::Dead).unwrap();

        let mut canvas = RecordingCanvas::default();
        let stats = adapter(1).render(&after, Some(&before), &mut canvas).unwrap();

        assert_eq!(stats.living_cell_count, 1);
        assert_eq!(stats.cells_drawn, 2);
        assert_eq!(canvas.rects, vec![(0, 0, 1, 1, DEAD), (1, 1, 1, 1, ALIVE)]);
    }

    #[test]
    fn mismatched_previous_means_full_render() {
        let grid = Grid::from_rows(&["#.", ".."]).unwrap();
        let other = Grid::new(3, 3).unwrap();
        let mut canvas = RecordingCanvas::default();
        let stats = adapter(1).render(&grid, Some(&other), &mut canvas).unwrap();
        assert_eq!(stats.cells_drawn, 4);
    }

    #[test]
    fn canvas_failure_propagates() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            adapter(1).render(&grid, None, &mut BrokenCanvas),
            Err("surface lost")
        );
    }

    #[test]
    fn frame_canvas_checks_sizes() {
        let mut frame = vec![0; 4 * 6];
        assert!(matches!(
            FrameCanvas::new(&mut frame, 4, 2),
            Err(CanvasError::FrameSize { len: 24, .. })
        ));

        let mut canvas = FrameCanvas::new(&mut frame, 3, 2).unwrap();
        assert!(canvas.fill_rect(2, 0, 2, 1, ALIVE).is_err());
        assert!(canvas.fill_rect(0, 1, 1, 2, ALIVE).is_err());
        assert!(canvas.fill_rect(u32::MAX, 0, 2, 1, ALIVE).is_err());
    }

    #[test]
    fn frame_canvas_fills_only_the_rectangle() {
        let mut frame = vec![0; 4 * 4 * 3];
        let mut canvas = FrameCanvas::new(&mut frame, 4, 3).unwrap();
        canvas.fill_rect(1, 1, 2, 2, ALIVE).unwrap();

        for y in 0..3 {
            for x in 0..4 {
                let expected = if (1..3).contains(&x) && (1..3).contains(&y) {
                    ALIVE
                } else {
                    [0; 4]
                };
                assert_eq!(canvas.pixel(x, y), Some(expected), "({x}, {y})");
            }
        }
        assert_eq!(canvas.pixel(4, 0), None);
    }
}
