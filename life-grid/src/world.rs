use crate::config::LifeConfig;
use crate::engine::GridEngine;
use crate::error::GridError;
use crate::grid::Grid;
use crate::random::Random;
use crate::render::{Canvas, RenderAdapter, RenderStats};
use crate::World;

/// Everything one run of the automaton needs, owned by the host.
#[derive(Debug)]
pub struct LifeWorld {
    config: LifeConfig,
    engine: GridEngine,
    adapter: RenderAdapter,
    last_drawn_generation: Option<u64>,
}

impl LifeWorld {
    pub fn new(config: LifeConfig, rand: &mut Random) -> Result<Self, GridError> {
        config.validate()?;
        let grid = GridEngine::initialize(
            config.width,
            config.height,
            config.live_probability,
            rand,
        )?;
        Self::with_grid(config, grid)
    }

    /// Starts from a given grid; its dimensions replace the configured ones.
    pub fn with_grid(config: LifeConfig, grid: Grid) -> Result<Self, GridError> {
        let config = LifeConfig {
            width: grid.width(),
            height: grid.height(),
            ..config
        };
        config.validate()?;
        let adapter = RenderAdapter::new(config.cell_pixel_size, config.palette())?;
        log::debug!(
            "world {}x{} at {}px per cell, {} alive",
            config.width,
            config.height,
            config.cell_pixel_size,
            grid.live_count()
        );
        Ok(Self {
            config,
            engine: GridEngine::new(grid),
            adapter,
            last_drawn_generation: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        self.engine.current()
    }

    /// Grid the change-only redraw can diff against: the previous generation,
    /// but only if that is exactly what the canvas shows.
    fn drawn_grid(&self) -> Option<&Grid> {
        let drawn = self.last_drawn_generation?;
        if drawn + 1 == self.engine.generation() {
            self.engine.previous()
        } else {
            None
        }
    }
}

impl World for LifeWorld {
    fn pixel_width(&self) -> u32 {
        self.config.pixel_width()
    }

    fn pixel_height(&self) -> u32 {
        self.config.pixel_height()
    }

    fn num_cells(&self) -> usize {
        self.engine.current().num_cells()
    }

    fn generation(&self) -> u64 {
        self.engine.generation()
    }

    fn living_cell_count(&self) -> usize {
        self.engine.current().live_count()
    }

    fn update(&mut self) {
        self.engine.advance();
    }

    fn draw<C: Canvas>(&mut self, canvas: &mut C) -> Result<RenderStats, C::Error> {
        let generation = self.engine.generation();
        let stats = if self.last_drawn_generation == Some(generation) {
            // Canvas already shows this generation; an empty diff keeps the count honest.
            let current = self.engine.current();
            self.adapter.render(current, Some(current), canvas)?
        } else {
            self.adapter.render(self.engine.current(), self.drawn_grid(), canvas)?
        };
        self.last_drawn_generation = Some(generation);
        Ok(stats)
    }

    fn invalidate(&mut self) {
        self.last_drawn_generation = None;
    }
}
