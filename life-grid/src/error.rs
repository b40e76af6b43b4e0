#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    #[error("frame of {len} bytes does not hold {width}x{height} RGBA pixels")]
    FrameSize { len: usize, width: u32, height: u32 },
    #[error("rectangle at ({x}, {y}) sized {width}x{height} leaves the frame")]
    OutOfFrame {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}
