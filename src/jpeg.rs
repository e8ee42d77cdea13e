use jpeg_decoder::PixelFormat as JpegPixelFormat;

use crate::error::{Error, Result};
use crate::image::{ComponentType, ImageData, PixelFormat};
use crate::loader::{ImageFormat, ImageLoader};

/// Loader for baseline and progressive JPEG images, backed by `jpeg-decoder`.
///
/// Only 8-bit grayscale and RGB output is accepted.
#[derive(Copy, Clone, Debug, Default)]
pub struct JpegLoader;

impl ImageLoader for JpegLoader {
    fn format(&self) -> ImageFormat {
        ImageFormat::Jpeg
    }

    fn load_from_memory(&self, data: &[u8]) -> Result<ImageData> {
        let mut decoder = jpeg_decoder::Decoder::new(data);
        let pixels = decoder.decode()?;
        let info = decoder.info().ok_or_else(|| Error::UnsupportedFormat {
            format: "jpeg",
            reason: "missing frame header".into(),
        })?;
        let format = match info.pixel_format {
            JpegPixelFormat::L8 => PixelFormat::R,
            JpegPixelFormat::RGB24 => PixelFormat::Rgb,
            other => {
                return Err(Error::UnsupportedFormat {
                    format: "jpeg",
                    reason: format!("pixel format {:?}", other),
                });
            }
        };
        tracing::trace!(coding_process = ?info.coding_process, "jpeg frame");
        let (width, height) = (u32::from(info.width), u32::from(info.height));
        Ok(ImageData::new(width, height, format, ComponentType::U8, pixels))
    }
}
