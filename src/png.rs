use std::io::Cursor;

use png::{BitDepth, ColorType, Transformations};

use crate::error::{Error, Result};
use crate::image::{ComponentType, ImageData, PixelFormat};
use crate::loader::{ImageFormat, ImageLoader};

/// Loader for PNG images, backed by the `png` crate.
///
/// Palettes are expanded to RGB, sub-byte grayscale to 8 bits and `tRNS`
/// transparency to a full alpha channel. 16-bit images keep their depth, with
/// samples converted to native byte order.
#[derive(Copy, Clone, Debug, Default)]
pub struct PngLoader;

fn unsupported(reason: String) -> Error {
    Error::UnsupportedFormat { format: "png", reason }
}

impl ImageLoader for PngLoader {
    fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    fn load_from_memory(&self, data: &[u8]) -> Result<ImageData> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(Transformations::EXPAND);
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let (color_type, bit_depth) = reader.output_color_type();
        let format = match color_type {
            ColorType::Grayscale => PixelFormat::R,
            ColorType::GrayscaleAlpha => PixelFormat::Rg,
            ColorType::Rgb => PixelFormat::Rgb,
            ColorType::Rgba => PixelFormat::Rgba,
            ColorType::Indexed => {
                return Err(unsupported("palette was not expanded".into()));
            }
        };
        let component = match bit_depth {
            BitDepth::Eight => ComponentType::U8,
            BitDepth::Sixteen => {
                for sample in buf.chunks_exact_mut(2) {
                    let v = u16::from_be_bytes([sample[0], sample[1]]);
                    sample.copy_from_slice(&v.to_ne_bytes());
                }
                ComponentType::U16
            }
            other => return Err(unsupported(format!("bit depth {:?} after expansion", other))),
        };

        tracing::trace!(
            ?color_type,
            ?bit_depth,
            interlaced = reader.info().interlaced,
            "png frame"
        );
        Ok(ImageData::new(info.width, info.height, format, component, buf))
    }
}
