pub(crate) mod config;
pub use config::{Config, ImageLimits, TextLimits};

pub(crate) mod limit;
pub use limit::{Dimension, DimensionError, Extent, Limit, UNBOUNDED};
