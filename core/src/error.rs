use thiserror::Error;

use crate::types::DimensionError;

pub type Result<T> = std::result::Result<T, FieldError>;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("unsupported image source: {0}")]
    UnsupportedSource(String),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("resize error: {0}")]
    Resize(#[from] fast_image_resize::ResizeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open image viewer: {0}")]
    Viewer(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("blocking fetch called from inside an async runtime")]
    NestedRuntime,
}

#[derive(Error, Debug)]
pub enum LimitError {
    #[error("invalid dimension: {0}")]
    Dimension(#[from] DimensionError),

    #[error("limit out of range: {0}")]
    OutOfRange(u64),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
