// Imports
use core::fmt::Debug;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;
use tracing::debug;

/// The memory format of image pixel data.
#[non_exhaustive]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMemoryFormat {
    /// 8-bit rgba channels, premultiplied alpha.
    #[serde(rename = "r8g8b8a8_premultiplied")]
    R8g8b8a8Premultiplied,
    /// 8-bit rgb channels, no alpha.
    #[serde(rename = "r8g8b8")]
    R8g8b8,
}

impl Default for ImageMemoryFormat {
    fn default() -> Self {
        Self::R8g8b8a8Premultiplied
    }
}

impl From<ImageMemoryFormat> for piet::ImageFormat {
    fn from(value: ImageMemoryFormat) -> Self {
        match value {
            ImageMemoryFormat::R8g8b8a8Premultiplied => piet::ImageFormat::RgbaPremul,
            ImageMemoryFormat::R8g8b8 => piet::ImageFormat::Rgb,
        }
    }
}

impl ImageMemoryFormat {
    /// Bytes per pixel of the format.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::R8g8b8a8Premultiplied => 4,
            Self::R8g8b8 => 3,
        }
    }
}

/// A bitmap image.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename = "image")]
pub struct Image {
    /// The image data.
    ///
    /// Is (de)serialized with base64 encoding. Shared, clones alias the same buffer.
    #[serde(rename = "data", with = "crate::serialize::arc_vecu8_base64")]
    pub data: Arc<Vec<u8>>,
    /// Width of the image data.
    #[serde(rename = "pixel_width")]
    pub pixel_width: u32,
    /// Height of the image data.
    #[serde(rename = "pixel_height")]
    pub pixel_height: u32,
    /// Memory format.
    #[serde(rename = "memory_format")]
    pub memory_format: ImageMemoryFormat,
}

impl Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("data", &String::from("- no debug impl -"))
            .field("pixel_width", &self.pixel_width)
            .field("pixel_height", &self.pixel_height)
            .field("memory_format", &self.memory_format)
            .finish()
    }
}

impl Default for Image {
    fn default() -> Self {
        Self {
            data: Arc::new(Vec::new()),
            pixel_width: 0,
            pixel_height: 0,
            memory_format: ImageMemoryFormat::default(),
        }
    }
}

impl From<image::DynamicImage> for Image {
    fn from(dynamic_image: image::DynamicImage) -> Self {
        let pixel_width = dynamic_image.width();
        let pixel_height = dynamic_image.height();

        if dynamic_image.color().has_alpha() {
            let mut data = dynamic_image.into_rgba8().into_raw();
            // piet consumes rgba with premultiplied alpha
            for pixel in data.chunks_exact_mut(4) {
                let alpha = u16::from(pixel[3]);
                pixel[0] = ((u16::from(pixel[0]) * alpha) / 255) as u8;
                pixel[1] = ((u16::from(pixel[1]) * alpha) / 255) as u8;
                pixel[2] = ((u16::from(pixel[2]) * alpha) / 255) as u8;
            }

            Self {
                data: Arc::new(data),
                pixel_width,
                pixel_height,
                memory_format: ImageMemoryFormat::R8g8b8a8Premultiplied,
            }
        } else {
            Self {
                data: Arc::new(dynamic_image.into_rgb8().into_raw()),
                pixel_width,
                pixel_height,
                memory_format: ImageMemoryFormat::R8g8b8,
            }
        }
    }
}

impl Image {
    /// Construct from a raw pixel buffer.
    pub fn from_raw(
        data: Vec<u8>,
        pixel_width: u32,
        pixel_height: u32,
        memory_format: ImageMemoryFormat,
    ) -> Self {
        Self {
            data: Arc::new(data),
            pixel_width,
            pixel_height,
            memory_format,
        }
    }

    /// Decode from encoded bytes (png, jpeg, ..).
    ///
    /// An alpha-capable memory format is chosen when the source reports transparency,
    /// a channel-less rgb format otherwise.
    pub fn try_from_encoded_bytes(bytes: &[u8]) -> Result<Self, anyhow::Error> {
        let reader = image::ImageReader::new(io::Cursor::new(bytes)).with_guessed_format()?;
        Ok(Image::from(reader.decode()?))
    }

    /// Asserts that the pixel buffer matches the declared dimensions and format.
    pub fn assert_valid(&self) -> anyhow::Result<()> {
        let expected = self.pixel_width as usize
            * self.pixel_height as usize
            * self.memory_format.bytes_per_pixel();

        if self.data.len() != expected {
            return Err(anyhow::anyhow!(
                "Image data length '{}' does not match the dimensions {}x{} with format {:?}.",
                self.data.len(),
                self.pixel_width,
                self.pixel_height,
                self.memory_format
            ));
        }
        Ok(())
    }
}

/// The source of image content.
///
/// A raw pixel buffer is aliased directly, encoded bytes get decoded once on first
/// render and the result is cached by the drawable that owns the source.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A raw pixel buffer, used as-is.
    Bitmap(Image),
    /// Encoded image bytes (png, jpeg, ..), decoded on first use.
    Encoded(Arc<Vec<u8>>),
}

impl From<Image> for ImageSource {
    fn from(image: Image) -> Self {
        Self::Bitmap(image)
    }
}

impl ImageSource {
    /// An encoded source from bytes.
    pub fn from_encoded_bytes(bytes: Vec<u8>) -> Self {
        Self::Encoded(Arc::new(bytes))
    }

    /// Materialize into a raw pixel buffer.
    ///
    /// A bitmap source is aliased without copying the pixel data.
    pub(crate) fn materialize(&self) -> anyhow::Result<Image> {
        match self {
            Self::Bitmap(image) => {
                image.assert_valid()?;
                Ok(image.clone())
            }
            Self::Encoded(bytes) => {
                let image = Image::try_from_encoded_bytes(bytes)?;
                debug!(
                    pixel_width = image.pixel_width,
                    pixel_height = image.pixel_height,
                    memory_format = ?image.memory_format,
                    "materialized encoded image content"
                );
                Ok(image)
            }
        }
    }
}
