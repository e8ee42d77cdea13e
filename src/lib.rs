//! Texture-ready image loading.
//!
//! Images are decoded into [`ImageData`]: dimensions, channel layout and
//! tightly packed pixel bytes, ready to be uploaded as a 2D texture. QOI is
//! decoded in this crate; PNG and JPEG are handed to the `png` and
//! `jpeg-decoder` crates behind the same [`ImageLoader`] interface.
//!
//! ### Examples
//!
//! ```no_run
//! let image = texload::load("assets/brick.qoi")?;
//! println!("{}x{} {:?}", image.width(), image.height(), image.format);
//! # Ok::<(), texload::Error>(())
//! ```
//!
//! Decoding a QOI stream held in memory:
//!
//! ```no_run
//! # let data: Vec<u8> = vec![];
//! let (header, pixels) = texload::decode_to_vec(&data)?;
//! assert_eq!(pixels.len(), header.n_bytes());
//! # Ok::<(), texload::Error>(())
//! ```
#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::inline_always,
    clippy::similar_names,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::cargo_common_metadata,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

mod decode;
mod error;
mod header;
mod image;
#[cfg(feature = "jpeg")]
mod jpeg;
mod loader;
mod op;
mod pixel;
#[cfg(feature = "png")]
mod png;
mod types;
mod utils;

#[doc(hidden)]
pub mod consts;

pub use crate::decode::{
    decode_header, decode_to_buf, decode_to_vec, is_qoi, Decoder, PixelStream,
};
pub use crate::error::{Error, Result};
pub use crate::header::Header;
pub use crate::image::{ComponentType, ImageData, InternalFormat, MipLevel, PixelFormat, TextureTarget};
#[cfg(feature = "jpeg")]
pub use crate::jpeg::JpegLoader;
pub use crate::loader::{is_qoi_file, load, load_from_memory, ImageFormat, ImageLoader, QoiLoader};
pub use crate::op::Op;
pub use crate::pixel::{hash_index, ColorCache, Pixel};
#[cfg(feature = "png")]
pub use crate::png::PngLoader;
pub use crate::types::{Channels, ColorSpace};
