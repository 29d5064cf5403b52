pub mod error;
pub mod field;
pub mod types;

pub use error::{ConfigError, FetchError, FieldError, LimitError};
pub use field::Field;
pub use field::image::{FetchOptions, ImageField, ImageOrigin, ImageSource};
pub use field::text::{TextField, UID_MAX_LENGTH, UidField};
pub use types::{Config, Dimension, ImageLimits, Limit, TextLimits};
