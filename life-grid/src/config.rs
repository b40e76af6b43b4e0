use crate::color::Palette;
use crate::error::GridError;
use crate::grid::check_dimensions;

pub const DEFAULT_WIDTH: u32 = 100;
pub const DEFAULT_HEIGHT: u32 = 100;
pub const DEFAULT_CELL_PIXEL_SIZE: u32 = 2;
pub const DEFAULT_LIVE_PROBABILITY: f64 = 0.10;

/// Initial parameters of a run. Fixed once the world is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifeConfig {
    pub width: u32,
    pub height: u32,
    pub cell_pixel_size: u32,
    pub live_probability: f64,
    pub dead_color: [u8; 4],
    pub alive_color: [u8; 4],
}

impl LifeConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.dead_color, self.alive_color)
    }

    pub fn pixel_width(&self) -> u32 {
        self.width * self.cell_pixel_size
    }

    pub fn pixel_height(&self) -> u32 {
        self.height * self.cell_pixel_size
    }

    pub fn validate(&self) -> Result<(), GridError> {
        check_dimensions(self.width, self.height)?;
        check_cell_pixel_size(self.cell_pixel_size)?;
        check_live_probability(self.live_probability)?;
        if self
            .width
            .checked_mul(self.cell_pixel_size)
            .zip(self.height.checked_mul(self.cell_pixel_size))
            .is_none()
        {
            return Err(GridError::InvalidConfiguration(format!(
                "{}x{} cells at {} pixels each does not fit a frame",
                self.width, self.height, self.cell_pixel_size
            )));
        }
        Ok(())
    }
}

impl Default for LifeConfig {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_pixel_size: DEFAULT_CELL_PIXEL_SIZE,
            live_probability: DEFAULT_LIVE_PROBABILITY,
            dead_color: palette.dead,
            alive_color: palette.alive,
        }
    }
}

pub(crate) fn check_cell_pixel_size(cell_pixel_size: u32) -> Result<(), GridError> {
    if cell_pixel_size == 0 {
        return Err(GridError::InvalidConfiguration(
            "cell pixel size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn check_live_probability(live_probability: f64) -> Result<(), GridError> {
    if !(0.0..=1.0).contains(&live_probability) {
        return Err(GridError::InvalidConfiguration(format!(
            "live probability must be within [0, 1], got {live_probability}"
        )));
    }
    Ok(())
}
