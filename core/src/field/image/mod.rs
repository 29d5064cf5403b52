//! Image fields: resolve a source into a decoded image, then fit it into
//! `max_width` x `max_height` by cropping or scaling.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use fast_image_resize::{FilterType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument};
use url::Url;

use crate::error::FieldError;
use crate::field::Field;
use crate::types::{Dimension, ImageLimits, Limit};

mod fetch;
pub use fetch::FetchOptions;

/// Where an image field's pixels come from.
pub enum ImageSource {
    Url(Url),
    Path(PathBuf),
    Image(DynamicImage),
}

impl ImageSource {
    /// Classifies a string: an `http`/`https` URL first, then an existing
    /// filesystem path. Anything else is rejected.
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        if let Ok(url) = Url::parse(value)
            && is_http(&url)
        {
            return Ok(ImageSource::Url(url));
        }

        let path = Path::new(value);
        if path.exists() {
            return Ok(ImageSource::Path(path.to_path_buf()));
        }

        Err(FieldError::UnsupportedSource(value.to_string()))
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

impl FromStr for ImageSource {
    type Err = FieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl From<DynamicImage> for ImageSource {
    fn from(image: DynamicImage) -> Self {
        ImageSource::Image(image)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<Url> for ImageSource {
    fn from(url: Url) -> Self {
        ImageSource::Url(url)
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Url(url) => f.debug_tuple("Url").field(&url.as_str()).finish(),
            ImageSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ImageSource::Image(image) => f
                .debug_struct("Image")
                .field("width", &image.width())
                .field("height", &image.height())
                .finish(),
        }
    }
}

/// The raw value an [`ImageField`] was built from. In-memory images are
/// owned by the field itself and reachable through [`ImageField::image`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOrigin {
    Url(Url),
    Path(PathBuf),
    Decoded,
}

pub struct ImageField {
    origin: ImageOrigin,
    image: DynamicImage,
    limits: ImageLimits,
}

/// Construction.
impl ImageField {
    /// Resolves `source`, blocking the calling thread on any network fetch.
    pub fn open(source: ImageSource) -> Result<Self, FieldError> {
        Self::open_with(source, &FetchOptions::default())
    }

    pub fn open_with(source: ImageSource, options: &FetchOptions) -> Result<Self, FieldError> {
        match source {
            ImageSource::Url(url) => {
                let bytes = fetch::block_on(fetch::fetch_bytes(&url, options))??;
                Self::decode_fetched(url, &bytes)
            }
            ImageSource::Path(path) => Self::from_path(path),
            ImageSource::Image(image) => Ok(Self::from_image(image)),
        }
    }

    /// Resolves `source` from inside an async runtime.
    pub async fn open_async(source: ImageSource, options: &FetchOptions) -> Result<Self, FieldError> {
        match source {
            ImageSource::Url(url) => {
                let bytes = fetch::fetch_bytes(&url, options).await?;
                Self::decode_fetched(url, &bytes)
            }
            ImageSource::Path(path) => Self::from_path(path),
            ImageSource::Image(image) => Ok(Self::from_image(image)),
        }
    }

    /// Fetches an `http`/`https` URL, blocking until the body is decoded.
    pub fn from_url(url: &str) -> Result<Self, FieldError> {
        let parsed = Url::parse(url)
            .ok()
            .filter(is_http)
            .ok_or_else(|| FieldError::UnsupportedSource(url.to_string()))?;
        Self::open(ImageSource::Url(parsed))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FieldError> {
        let path = std::path::absolute(path.as_ref())?;
        let image = image::open(&path)?;
        debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded image");
        Ok(Self {
            origin: ImageOrigin::Path(path),
            image,
            limits: ImageLimits::default(),
        })
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            origin: ImageOrigin::Decoded,
            image,
            limits: ImageLimits::default(),
        }
    }

    fn decode_fetched(url: Url, bytes: &[u8]) -> Result<Self, FieldError> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self {
            origin: ImageOrigin::Url(url),
            image,
            limits: ImageLimits::default(),
        })
    }

    pub fn with_limits(mut self, limits: ImageLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_max_size(self, max_width: Limit<Dimension>, max_height: Limit<Dimension>) -> Self {
        self.with_limits(ImageLimits::new(max_width, max_height))
    }
}

/// Accessors.
impl ImageField {
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn limits(&self) -> ImageLimits {
        self.limits
    }
}

/// Normalization.
impl ImageField {
    /// Fits the image into the configured bounds.
    ///
    /// The image is returned borrowed when no change is needed. When it
    /// exceeds both bounds it is cropped from the top-left corner, or scaled
    /// to exactly the bounds if `resize` is set. Otherwise it is scaled with
    /// its aspect ratio kept so one axis meets its bound, then cropped.
    /// Regions past the scaled image are left as zeroed pixels.
    #[instrument(skip(self), fields(width = self.image.width(), height = self.image.height()))]
    pub fn adjust_with(&self, resize: bool) -> Result<Cow<'_, DynamicImage>, FieldError> {
        if self.limits.is_unbounded() {
            return Ok(Cow::Borrowed(&self.image));
        }

        let (width, height) = (self.image.width(), self.image.height());
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyImage { width, height });
        }

        let max_width = self.limits.max_width.resolve(width);
        let max_height = self.limits.max_height.resolve(height);

        if width == max_width && height == max_height {
            return Ok(Cow::Borrowed(&self.image));
        }

        if resize {
            debug!(max_width, max_height, "scaling to bounds");
            return Ok(Cow::Owned(scale(&self.image, max_width, max_height)?));
        }

        if width > max_width && height > max_height {
            debug!(max_width, max_height, "cropping to bounds");
            return Ok(Cow::Owned(crop_top_left(&self.image, max_width, max_height)));
        }

        let (scaled_width, scaled_height) = if width < max_width {
            (max_width, scaled_extent(max_width, width, height))
        } else {
            (scaled_extent(max_height, height, width), max_height)
        };
        debug!(scaled_width, scaled_height, "scaling with aspect ratio kept");
        let scaled = scale_top_left(
            &self.image,
            (scaled_width, scaled_height),
            (max_width, max_height),
        )?;
        Ok(Cow::Owned(crop_top_left(&scaled, max_width, max_height)))
    }

    /// Writes the adjusted image to a temporary PNG and opens it in the
    /// system image viewer. The file is left in place for the viewer.
    pub fn display(&self) -> Result<PathBuf, FieldError> {
        let path = self.write_preview()?;
        open::that(&path).map_err(FieldError::Viewer)?;
        Ok(path)
    }

    fn write_preview(&self) -> Result<PathBuf, FieldError> {
        let adjusted = self.adjust()?;
        let file = tempfile::Builder::new()
            .prefix("stylefield-")
            .suffix(".png")
            .tempfile()?;
        let (_, path) = file.keep().map_err(|e| e.error)?;

        adjusted.save_with_format(&path, ImageFormat::Png)?;
        debug!(path = %path.display(), "wrote preview");
        Ok(path)
    }

    /// Saves the adjusted image; the format follows `destination`'s extension.
    pub fn persist(&self, destination: impl AsRef<Path>) -> Result<(), FieldError> {
        let destination = destination.as_ref();
        self.adjust()?.save(destination)?;
        debug!(path = %destination.display(), "persisted image");
        Ok(())
    }
}

impl Field for ImageField {
    type Raw = ImageOrigin;
    type Output<'a> = Result<Cow<'a, DynamicImage>, FieldError>;

    fn raw(&self) -> &ImageOrigin {
        &self.origin
    }

    fn adjust(&self) -> Result<Cow<'_, DynamicImage>, FieldError> {
        self.adjust_with(false)
    }
}

impl fmt::Debug for ImageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageField")
            .field("origin", &self.origin)
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("limits", &self.limits)
            .finish()
    }
}

/// `other * target / from`, rounded, never below one pixel.
fn scaled_extent(target: u32, from: u32, other: u32) -> u32 {
    let scaled = (f64::from(target) / f64::from(from) * f64::from(other)).round();
    (scaled as u32).max(1)
}

fn resize_options() -> ResizeOptions {
    ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::CatmullRom))
}

fn scale(src: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage, FieldError> {
    let mut dst = DynamicImage::new(width, height, src.color());
    let mut resizer = Resizer::new();
    resizer.resize(src, &mut dst, Some(&resize_options()))?;
    Ok(dst)
}

/// Top-left `bounds` region of `src` scaled to `scaled`, without building
/// the full scaled image. The result may be smaller than `bounds` when the
/// scaled image is.
fn scale_top_left(
    src: &DynamicImage,
    (scaled_width, scaled_height): (u32, u32),
    (max_width, max_height): (u32, u32),
) -> Result<DynamicImage, FieldError> {
    let out_width = scaled_width.min(max_width);
    let out_height = scaled_height.min(max_height);
    let crop_width = f64::from(out_width) * f64::from(src.width()) / f64::from(scaled_width);
    let crop_height = f64::from(out_height) * f64::from(src.height()) / f64::from(scaled_height);

    let mut dst = DynamicImage::new(out_width, out_height, src.color());
    let mut resizer = Resizer::new();
    resizer.resize(
        src,
        &mut dst,
        Some(&resize_options().crop(0.0, 0.0, crop_width, crop_height)),
    )?;
    Ok(dst)
}

fn crop_top_left(src: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if src.width() >= width && src.height() >= height {
        return src.crop_imm(0, 0, width, height);
    }

    let mut canvas = DynamicImage::new(width, height, src.color());
    image::imageops::replace(&mut canvas, src, 0, 0);
    canvas
}
