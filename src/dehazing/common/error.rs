use thiserror::Error;

#[derive(Error, Debug)]
pub enum DehazeError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Channel {channel} is {found:?}, expected {expected:?} (width, height)")]
    MismatchedChannels {
        channel: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Buffer holds {found} samples, expected {expected}")]
    BufferLength {
        expected: usize,
        found: usize,
    },

    #[error("Invalid window size {size} for a {width}x{height} image: must be odd, non-zero and fit the image")]
    InvalidWindowSize {
        size: usize,
        width: usize,
        height: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DehazeError>;
