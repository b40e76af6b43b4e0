/// Background of the board.
const GROUND_COLOR: [u8; 4] = [0x5b, 0x5b, 0x5b, 0xff];
/// Translucent red, composited onto the ground before it reaches the frame.
const CELL_COLOR: [u8; 4] = [213, 71, 75, 186];

/// Colors for the two cell states, both opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub dead: [u8; 4],
    pub alive: [u8; 4],
}

impl Palette {
    pub fn new(dead: [u8; 4], alive: [u8; 4]) -> Self {
        Self { dead, alive }
    }

    pub fn color_rgba(&self, alive: bool) -> [u8; 4] {
        if alive {
            self.alive
        } else {
            self.dead
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            GROUND_COLOR,
            alpha_blend_with_background(CELL_COLOR, GROUND_COLOR),
        )
    }
}

// From https://en.wikipedia.org/wiki/Alpha_compositing, with below_alpha set to 1.0
pub fn alpha_blend_with_background(above: [u8; 4], below: [u8; 4]) -> [u8; 4] {
    if above[3] == 0xff {
        return above;
    }
    if above[3] == 0x00 {
        return [below[0], below[1], below[2], 0xff];
    }

    let above = color_as_fractions(above);
    let below = color_as_fractions(below);

    let above_alpha = above[3];

    let mut result: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    for (channel, (a, b)) in result.iter_mut().zip(above.iter().zip(below.iter())).take(3) {
        *channel = a * above_alpha + b * (1.0 - above_alpha);
    }
    color_as_bytes(result)
}

fn color_as_fractions(color: [u8; 4]) -> [f32; 4] {
    color.map(|channel| channel as f32 / 0xff as f32)
}

fn color_as_bytes(color: [f32; 4]) -> [u8; 4] {
    color.map(|channel| (channel * 0xff as f32).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_and_transparent_extremes() {
        let below = [10, 20, 30, 0xff];
        assert_eq!(alpha_blend_with_background([1, 2, 3, 0xff], below), [1, 2, 3, 0xff]);
        assert_eq!(alpha_blend_with_background([1, 2, 3, 0x00], below), below);
    }

    #[test]
    fn half_alpha_is_midpoint() {
        let blended = alpha_blend_with_background([0xff, 0, 0, 0x80], [0, 0, 0xff, 0xff]);
        assert_eq!(blended[3], 0xff);
        assert!((127..=129).contains(&blended[0]));
        assert!((126..=128).contains(&blended[2]));
    }

    #[test]
    fn default_palette_is_opaque_and_distinct() {
        let palette = Palette::default();
        assert_eq!(palette.dead, [0x5b, 0x5b, 0x5b, 0xff]);
        assert_eq!(palette.alive[3], 0xff);
        assert_ne!(palette.alive, palette.dead);
        assert_eq!(palette.color_rgba(true), palette.alive);
    }
}
