use crate::config::check_live_probability;
use crate::error::GridError;
use crate::grid::{CellState, Grid, Loc, Neighborhood};
use crate::random::Random;
use rayon::prelude::*;
use std::mem;

/// Owns the live grid and a second buffer of the same size, and advances
/// them a generation at a time by reading one and writing the other.
#[derive(Clone, Debug)]
pub struct GridEngine {
    cells: Grid,
    next_cells: Grid,
    generation: u64,
}

impl GridEngine {
    /// A freshly seeded grid: each cell is alive when a uniform draw in `[0, 1)`
    /// is at least `1 - live_probability`.
    pub fn initialize(
        width: u32,
        height: u32,
        live_probability: f64,
        rand: &mut Random,
    ) -> Result<Grid, GridError> {
        check_live_probability(live_probability)?;
        let mut grid = Grid::new(width, height)?;
        let threshold = 1.0 - live_probability;
        for cell in grid.cells_mut() {
            *cell = CellState::from(rand.next_fraction() >= threshold);
        }
        Ok(grid)
    }

    pub fn new(initial: Grid) -> Self {
        let next_cells = initial.clone();
        Self {
            cells: initial,
            next_cells,
            generation: 0,
        }
    }

    pub fn current(&self) -> &Grid {
        &self.cells
    }

    /// The grid the last `advance` started from.
    pub fn previous(&self) -> Option<&Grid> {
        (self.generation > 0).then_some(&self.next_cells)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The next generation of `current`, in a new grid.
    pub fn step(current: &Grid) -> Grid {
        let mut next = current.clone();
        Self::step_into(current, &mut next);
        next
    }

    /// Writes the next generation of `current` into `next`, overwriting every cell.
    pub fn step_into(current: &Grid, next: &mut Grid) {
        assert!(
            current.same_dimensions(next),
            "step target is {}x{}, source is {}x{}",
            next.width(),
            next.height(),
            current.width(),
            current.height()
        );
        let width = current.width() as usize;
        for (index, next_cell) in next.cells_mut().iter_mut().enumerate() {
            let loc = Loc::new((index % width) as u32, (index / width) as u32);
            *next_cell = next_state(current, loc);
        }
    }

    /// Same result as `step`, with rows computed on the rayon pool.
    pub fn step_parallel(current: &Grid) -> Grid {
        let mut next = current.clone();
        Self::step_into_parallel(current, &mut next);
        next
    }

    pub fn step_into_parallel(current: &Grid, next: &mut Grid) {
        assert!(current.same_dimensions(next));
        let width = current.width() as usize;
        next.cells_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, next_cell) in row.iter_mut().enumerate() {
                    *next_cell = next_state(current, Loc::new(x as u32, y as u32));
                }
            });
    }

    pub fn advance(&mut self) -> &Grid {
        Self::step_into(&self.cells, &mut self.next_cells);
        self.swap()
    }

    pub fn advance_parallel(&mut self) -> &Grid {
        Self::step_into_parallel(&self.cells, &mut self.next_cells);
        self.swap()
    }

    fn swap(&mut self) -> &Grid {
        mem::swap(&mut self.next_cells, &mut self.cells);
        self.generation += 1;
        log::trace!(
            "generation {}: {} alive",
            self.generation,
            self.cells.live_count()
        );
        &self.cells
    }
}

fn next_state(current: &Grid, loc: Loc) -> CellState {
    let neighbors = Neighborhood::new(current, loc).num_live_neighbors();
    current[loc].next(neighbors)
}
