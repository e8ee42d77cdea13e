use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::consts::QOI_MAGIC_BYTES;
use crate::decode::{is_qoi, Decoder};
use crate::error::{Error, Result};
use crate::image::{ComponentType, ImageData, PixelFormat};
use crate::types::Channels;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
const JPEG_SIGNATURE: [u8; 3] = [0xff, 0xd8, 0xff];

/// Source file formats understood by the loaders.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ImageFormat {
    Qoi,
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Identifies the format from the leading bytes of a file.
    pub fn from_signature(data: impl AsRef<[u8]>) -> Option<Self> {
        let data = data.as_ref();
        if is_qoi(data) {
            Some(Self::Qoi)
        } else if data.starts_with(&PNG_SIGNATURE) {
            Some(Self::Png)
        } else if data.starts_with(&JPEG_SIGNATURE) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    /// Guesses the format from a file extension (case-insensitive).
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "qoi" => Some(Self::Qoi),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Qoi => "qoi",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    /// The loader for this format.
    ///
    /// Formats whose cargo feature is disabled get a loader that always fails
    /// with [`Error::UnsupportedFormat`].
    pub fn loader(self) -> Box<dyn ImageLoader> {
        match self {
            Self::Qoi => Box::new(QoiLoader),
            #[cfg(feature = "png")]
            Self::Png => Box::new(crate::png::PngLoader),
            #[cfg(feature = "jpeg")]
            Self::Jpeg => Box::new(crate::jpeg::JpegLoader),
            #[allow(unreachable_patterns)]
            format => Box::new(DisabledLoader(format)),
        }
    }
}

/// Common interface of the per-format loaders.
pub trait ImageLoader {
    fn format(&self) -> ImageFormat;

    fn load_from_memory(&self, data: &[u8]) -> Result<ImageData>;
}

/// Loader for QOI images; produces 8-bit RGB or RGBA data.
#[derive(Copy, Clone, Debug, Default)]
pub struct QoiLoader;

impl ImageLoader for QoiLoader {
    fn format(&self) -> ImageFormat {
        ImageFormat::Qoi
    }

    fn load_from_memory(&self, data: &[u8]) -> Result<ImageData> {
        let decoder = Decoder::new(data)?;
        let header = *decoder.header();
        let pixels = decoder.decode_to_vec()?;
        let format = match header.channels {
            Channels::Rgb => PixelFormat::Rgb,
            Channels::Rgba => PixelFormat::Rgba,
        };
        Ok(ImageData::new(header.width, header.height, format, ComponentType::U8, pixels))
    }
}

struct DisabledLoader(ImageFormat);

impl ImageLoader for DisabledLoader {
    fn format(&self) -> ImageFormat {
        self.0
    }

    fn load_from_memory(&self, _data: &[u8]) -> Result<ImageData> {
        Err(Error::UnsupportedFormat {
            format: self.0.name(),
            reason: "support for this format was not compiled in".into(),
        })
    }
}

fn load_as(format: ImageFormat, data: &[u8]) -> Result<ImageData> {
    let image = format.loader().load_from_memory(data).map_err(|err| {
        tracing::warn!(format = format.name(), error = %err, "failed to load image");
        err
    })?;
    tracing::debug!(
        format = format.name(),
        width = image.width(),
        height = image.height(),
        pixel_format = ?image.format,
        n_bytes = image.total_size(),
        "loaded image"
    );
    Ok(image)
}

/// Loads an image from memory, picking the loader by file signature.
pub fn load_from_memory(data: impl AsRef<[u8]>) -> Result<ImageData> {
    let data = data.as_ref();
    let format = ImageFormat::from_signature(data).ok_or(Error::UnknownFormat)?;
    load_as(format, data)
}

/// Loads an image file.
///
/// The loader is picked by file signature, falling back to the extension when
/// the signature is not recognized.
pub fn load(path: impl AsRef<Path>) -> Result<ImageData> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let format = ImageFormat::from_signature(&data)
        .or_else(|| ImageFormat::from_extension(path))
        .ok_or(Error::UnknownFormat)?;
    tracing::debug!(path = %path.display(), format = format.name(), "loading image");
    load_as(format, &data)
}

/// Checks whether a file starts with the QOI magic, reading only its first 4 bytes.
pub fn is_qoi_file(path: impl AsRef<Path>) -> Result<bool> {
    let mut magic = Vec::with_capacity(QOI_MAGIC_BYTES.len());
    File::open(path)?.take(QOI_MAGIC_BYTES.len() as u64).read_to_end(&mut magic)?;
    Ok(is_qoi(&magic))
}
