use crate::error::GridError;
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// B3/S23: born with exactly three live neighbors, survives with two or three.
    pub fn next(self, live_neighbors: u32) -> CellState {
        match (self, live_neighbors) {
            (CellState::Dead, 3) => CellState::Alive,
            (CellState::Alive, 2..=3) => CellState::Alive,
            _ => CellState::Dead,
        }
    }

    fn as_char(self) -> char {
        match self {
            CellState::Dead => '.',
            CellState::Alive => '#',
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// Row-major rectangle of cells with fixed dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellState>,
    width: u32,
    height: u32,
}

impl Grid {
    /// An all-dead grid.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        Ok(Self {
            cells: vec![CellState::Dead; width as usize * height as usize],
            width,
            height,
        })
    }

    /// Builds a grid from equal-length rows, `#` or `O` for alive and `.` for dead.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GridError> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as u32;
        let mut grid = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(GridError::InvalidConfiguration(format!(
                    "row {y} is not {width} cells wide"
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let state = match ch {
                    '#' | 'O' => CellState::Alive,
                    '.' => CellState::Dead,
                    _ => {
                        return Err(GridError::InvalidConfiguration(format!(
                            "unexpected {ch:?} at ({x}, {y})"
                        )));
                    }
                };
                grid[Loc::new(x as u32, y as u32)] = state;
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn get(&self, x: u32, y: u32) -> Result<CellState, GridError> {
        self.index_of(x, y).map(|index| self.cells[index])
    }

    pub fn set(&mut self, x: u32, y: u32, state: CellState) -> Result<(), GridError> {
        let index = self.index_of(x, y)?;
        self.cells[index] = state;
        Ok(())
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &CellState> + Clone {
        self.cells.iter()
    }

    /// Cells paired with their location, in row-major order.
    pub fn locs_iter(&self) -> impl Iterator<Item = (Loc, CellState)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().map(move |(index, &state)| {
            let loc = Loc::new((index % width) as u32, (index / width) as u32);
            (loc, state)
        })
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    fn index_of(&self, x: u32, y: u32) -> Result<usize, GridError> {
        Loc::new(x, y)
            .grid_index(self.width, self.height)
            .ok_or(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
    }
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidConfiguration(format!(
            "grid must be at least 1x1, got {width}x{height}"
        )));
    }
    Ok(())
}

impl Index<Loc> for Grid {
    type Output = CellState;

    fn index(&self, loc: Loc) -> &Self::Output {
        let index = loc
            .grid_index(self.width, self.height)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.x, loc.y));
        &self.cells[index]
    }
}

impl IndexMut<Loc> for Grid {
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        let index = loc
            .grid_index(self.width, self.height)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.x, loc.y));
        &mut self.cells[index]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            let line: String = row.iter().map(|cell| cell.as_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Loc {
    pub x: u32,
    pub y: u32,
}

impl Loc {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn grid_index(&self, width: u32, height: u32) -> Option<usize> {
        if self.x < width && self.y < height {
            Some(self.y as usize * width as usize + self.x as usize)
        } else {
            None
        }
    }
}

/// The 3x3 block around a cell, with coordinates wrapped around the torus.
pub struct Neighborhood<'a> {
    grid: &'a Grid,
    cols: [u32; 3],
    rows: [u32; 3],
}

impl<'a> Neighborhood<'a> {
    pub fn new(grid: &'a Grid, center: Loc) -> Self {
        let (col_left, col_right) = Self::adjacent_indexes(center.x, grid.width());
        let (row_above, row_below) = Self::adjacent_indexes(center.y, grid.height());
        Self {
            grid,
            cols: [col_left, center.x, col_right],
            rows: [row_above, center.y, row_below],
        }
    }

    /// `dx` and `dy` are in 0..=2, with (1, 1) the center.
    pub fn cell(&self, dx: usize, dy: usize) -> CellState {
        self.grid[Loc::new(self.cols[dx], self.rows[dy])]
    }

    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(CellState),
    {
        for dy in 0..3 {
            for dx in 0..3 {
                if dx != 1 || dy != 1 {
                    f(self.cell(dx, dy));
                }
            }
        }
    }

    pub fn num_live_neighbors(&self) -> u32 {
        let mut result = 0;
        self.for_neighbor_cells(|neighbor| {
            if neighbor.is_alive() {
                result += 1;
            }
        });
        result
    }

    /// `(coord + offset + extent) % extent` for offsets -1 and +1.
    fn adjacent_indexes(coord: u32, extent: u32) -> (u32, u32) {
        let (coord, extent) = (coord as i64, extent as i64);
        let wrap = |offset: i64| ((coord + offset + extent) % extent) as u32;
        (wrap(-1), wrap(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_dimensions() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(GridError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Grid::new(5, 0),
            Err(GridError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn get_is_bounds_checked() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.get(3, 2), Ok(CellState::Dead));
        assert_eq!(
            grid.get(4, 0),
            Err(GridError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(grid.get(0, 3).is_err());
    }

    #[test]
    fn set_then_get() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(1, 2, CellState::Alive).unwrap();
        assert_eq!(grid.get(1, 2), Ok(CellState::Alive));
        assert_eq!(grid.live_count(), 1);
        assert!(grid.set(9, 9, CellState::Alive).is_err());
    }

    #[test]
    fn from_rows_reads_pattern() {
        let grid = Grid::from_rows(&[".#.", "..#", "###"]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.live_count(), 5);
        assert_eq!(grid.get(1, 0), Ok(CellState::Alive));
        assert_eq!(grid.get(0, 1), Ok(CellState::Dead));
        assert_eq!(grid.to_string(), ".#.\n..#\n###\n");
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        assert!(Grid::from_rows(&["..", "..."]).is_err());
        assert!(Grid::from_rows(&["x."]).is_err());
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn neighborhood_wraps_corners() {
        let grid = Grid::from_rows(&["...#", "....", "#..#"]).unwrap();
        let neighborhood = Neighborhood::new(&grid, Loc::new(0, 0));
        assert_eq!(neighborhood.num_live_neighbors(), 3);
        assert_eq!(neighborhood.cell(0, 0), CellState::Alive);
        assert_eq!(neighborhood.cell(2, 0), CellState::Dead);
    }

    #[test]
    fn neighborhood_wraps_far_edges() {
        let grid = Grid::from_rows(&["#...", "....", "...."]).unwrap();
        let neighborhood = Neighborhood::new(&grid, Loc::new(3, 2));
        assert_eq!(neighborhood.cell(2, 2), CellState::Alive);
        assert_eq!(neighborhood.num_live_neighbors(), 1);
    }

    #[test]
    fn single_cell_is_its_own_eight_neighbors() {
        let grid = Grid::from_rows(&["#"]).unwrap();
        let neighborhood = Neighborhood::new(&grid, Loc::new(0, 0));
        assert_eq!(neighborhood.num_live_neighbors(), 8);
    }

    #[test]
    fn transition_rule() {
        for count in 0..=8 {
            let born = CellState::Dead.next(count);
            let survives = CellState::Alive.next(count);
            assert_eq!(born.is_alive(), count == 3, "dead with {count}");
            assert_eq!(
                survives.is_alive(),
                count == 2 || count == 3,
                "alive with {count}"
            );
        }
    }

    #[test]
    fn locs_iter_is_row_major() {
        let grid = Grid::from_rows(&["..", "#."]).unwrap();
        let alive: Vec<Loc> = grid
            .locs_iter()
            .filter(|(_, state)| state.is_alive())
            .map(|(loc, _)| loc)
            .collect();
        assert_eq!(alive, vec![Loc::new(0, 1)]);
    }
}
