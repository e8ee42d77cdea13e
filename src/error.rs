use core::fmt::{self, Display};

use crate::consts::{QOI_MAGIC, QOI_PIXELS_MAX};

#[derive(Debug)]
pub enum Error {
    InvalidMagic {
        magic: u32,
    },
    UnsupportedChannelCount {
        channels: u8,
    },
    InvalidColorSpace {
        colorspace: u8,
    },
    EmptyImage {
        width: u32,
        height: u32,
    },
    ImageTooLarge {
        width: u32,
        height: u32,
    },
    /// Input ended at `offset` while `required` more bytes were needed
    /// and only `available` were left.
    TruncatedInput {
        offset: usize,
        required: usize,
        available: usize,
    },
    MalformedStream {
        offset: usize,
        reason: &'static str,
    },
    OutputBufferTooSmall {
        size: usize,
        required: usize,
    },
    UnknownFormat,
    UnsupportedFormat {
        format: &'static str,
        reason: String,
    },
    #[cfg(feature = "png")]
    Png(png::DecodingError),
    #[cfg(feature = "jpeg")]
    Jpeg(jpeg_decoder::Error),
    IoError(std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Byte offset into the QOI stream at which decoding failed, if the
    /// error was produced by the QOI decoder.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            Self::InvalidMagic { .. } => Some(0),
            Self::EmptyImage { .. } | Self::ImageTooLarge { .. } => Some(4),
            Self::UnsupportedChannelCount { .. } => Some(12),
            Self::InvalidColorSpace { .. } => Some(13),
            Self::TruncatedInput { offset, .. } | Self::MalformedStream { offset, .. } => {
                Some(offset)
            }
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::InvalidMagic { magic } => {
                write!(f, "invalid magic: expected {:#010x}, got {:#010x}", QOI_MAGIC, magic)
            }
            Self::UnsupportedChannelCount { channels } => {
                write!(f, "unsupported number of channels: {} (expected 3 or 4)", channels)
            }
            Self::InvalidColorSpace { colorspace } => {
                write!(f, "invalid color space: {} (expected 0 or 1)", colorspace)
            }
            Self::EmptyImage { width, height } => {
                write!(f, "image contains no pixels: {}x{}", width, height)
            }
            Self::ImageTooLarge { width, height } => {
                let mp = QOI_PIXELS_MAX / 1_000_000;
                write!(f, "image is too large: {}x{} (max={}Mp)", width, height, mp)
            }
            Self::TruncatedInput { offset, required, available } => {
                write!(
                    f,
                    "truncated input at byte {}: {} bytes required, {} available",
                    offset, required, available
                )
            }
            Self::MalformedStream { offset, reason } => {
                write!(f, "malformed stream at byte {}: {}", offset, reason)
            }
            Self::OutputBufferTooSmall { size, required } => {
                write!(f, "output buffer size too small: {} (minimum required: {})", size, required)
            }
            Self::UnknownFormat => {
                write!(f, "unrecognized image format")
            }
            Self::UnsupportedFormat { format, ref reason } => {
                write!(f, "unsupported {} image: {}", format, reason)
            }
            #[cfg(feature = "png")]
            Self::Png(ref err) => {
                write!(f, "png: {}", err)
            }
            #[cfg(feature = "jpeg")]
            Self::Jpeg(ref err) => {
                write!(f, "jpeg: {}", err)
            }
            Self::IoError(ref err) => {
                write!(f, "i/o error: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            #[cfg(feature = "png")]
            Self::Png(ref err) => Some(err),
            #[cfg(feature = "jpeg")]
            Self::Jpeg(ref err) => Some(err),
            Self::IoError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}

#[cfg(feature = "png")]
impl From<png::DecodingError> for Error {
    fn from(err: png::DecodingError) -> Self {
        Self::Png(err)
    }
}

#[cfg(feature = "jpeg")]
impl From<jpeg_decoder::Error> for Error {
    fn from(err: jpeg_decoder::Error) -> Self {
        Self::Jpeg(err)
    }
}
