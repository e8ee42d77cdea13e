use crate::consts::{QOI_HEADER_SIZE, QOI_MAGIC_BYTES, QOI_MIN_SIZE};
use crate::error::{Error, Result};
use crate::header::Header;
use crate::op::{luma_rb, Op};
use crate::pixel::{ColorCache, Pixel};
use crate::types::Channels;
use crate::utils::{cold, unlikely, Bytes, BytesMut};

/// Stateful walker over the opcode stream that follows a QOI header.
///
/// Each call to [`next_chunk`](Self::next_chunk) consumes exactly one opcode
/// and reports the pixel it produced together with how many times it repeats.
/// The cache and the previous pixel live here and are never shared between
/// streams.
#[derive(Clone)]
pub struct PixelStream<'a> {
    bytes: Bytes<'a>,
    cache: ColorCache,
    px: Pixel,
    n_pixels: usize,
    n_emitted: usize,
}

impl<'a> PixelStream<'a> {
    /// Creates a stream over a complete QOI buffer described by `header`.
    ///
    /// Reading starts right after the header; all reported offsets are
    /// relative to the start of `data`.
    pub fn new(header: &Header, data: &'a [u8]) -> Self {
        let mut bytes = Bytes::new(data);
        bytes.skip(QOI_HEADER_SIZE);
        Self {
            bytes,
            cache: ColorCache::new(),
            px: Pixel::opaque_black(),
            n_pixels: header.n_pixels(),
            n_emitted: 0,
        }
    }

    /// Offset of the next opcode byte.
    #[inline]
    pub const fn position(&self) -> usize {
        self.bytes.position()
    }

    #[inline]
    pub const fn pixels_emitted(&self) -> usize {
        self.n_emitted
    }

    #[inline]
    pub const fn is_finished(&self) -> bool {
        self.n_emitted == self.n_pixels
    }

    /// The most recently produced pixel.
    #[inline]
    pub const fn previous(&self) -> Pixel {
        self.px
    }

    #[inline]
    pub const fn cache(&self) -> &ColorCache {
        &self.cache
    }

    #[inline]
    fn truncated(&self, offset: usize, op: Op) -> Error {
        cold();
        let available = self.bytes.remaining();
        Error::TruncatedInput { offset, required: op.extra_bytes(), available }
    }

    /// Decodes one opcode.
    ///
    /// Returns `Ok(None)` once every pixel of the image has been produced;
    /// anything after that point is left unread.
    pub fn next_chunk(&mut self) -> Result<Option<(Pixel, usize)>> {
        if self.is_finished() {
            return Ok(None);
        }
        let offset = self.bytes.position();
        let Some(b1) = self.bytes.read_one() else {
            cold();
            return Err(Error::MalformedStream {
                offset,
                reason: "stream ended before all pixels were decoded",
            });
        };

        let op = Op::from_byte(b1);
        let px = match op {
            Op::Rgb => {
                let [r, g, b] =
                    self.bytes.read_array::<3>().ok_or_else(|| self.truncated(offset, op))?;
                self.px.with_rgb(r, g, b)
            }
            Op::Rgba => {
                let rgba =
                    self.bytes.read_array::<4>().ok_or_else(|| self.truncated(offset, op))?;
                Pixel::from(rgba)
            }
            Op::Index(index) => self.cache.get(index),
            Op::Diff { dr, dg, db } => self.px.rgb_add(dr, dg, db),
            Op::Luma { dg } => {
                let b2 = self.bytes.read_one().ok_or_else(|| self.truncated(offset, op))?;
                let (dr_dg, db_dg) = luma_rb(b2);
                self.px.rgb_add(dg + dr_dg, dg, dg + db_dg)
            }
            Op::Run(run) => {
                let run = usize::from(run);
                if unlikely(run > self.n_pixels - self.n_emitted) {
                    return Err(Error::MalformedStream {
                        offset,
                        reason: "run extends past the last pixel",
                    });
                }
                self.n_emitted += run;
                return Ok(Some((self.px, run)));
            }
        };

        self.cache.insert(px);
        self.px = px;
        self.n_emitted += 1;
        Ok(Some((px, 1)))
    }
}

fn decode_impl<const N: usize>(mut stream: PixelStream<'_>, out: &mut [u8]) -> Result<usize> {
    let size = out.len();
    let mut out = BytesMut::new(out);
    while let Some((px, count)) = stream.next_chunk()? {
        let bytes = &px.as_bytes()[..N];
        for _ in 0..count {
            out = out.write_many(bytes);
        }
    }
    Ok(size - out.len())
}

/// Decode the image header from a slice of bytes.
#[inline]
pub fn decode_header(data: impl AsRef<[u8]>) -> Result<Header> {
    Header::decode(data)
}

/// Reports whether `data` starts with the QOI magic, without decoding anything else.
#[inline]
pub fn is_qoi(data: impl AsRef<[u8]>) -> bool {
    data.as_ref().starts_with(&QOI_MAGIC_BYTES)
}

/// Decode the image into a newly allocated vector.
#[inline]
pub fn decode_to_vec(data: impl AsRef<[u8]>) -> Result<(Header, Vec<u8>)> {
    let decoder = Decoder::new(data.as_ref())?;
    let out = decoder.decode_to_vec()?;
    Ok((*decoder.header(), out))
}

/// Decode the image into a pre-allocated buffer.
///
/// Returns the number of bytes written.
#[inline]
pub fn decode_to_buf(buf: impl AsMut<[u8]>, data: impl AsRef<[u8]>) -> Result<usize> {
    Decoder::new(data.as_ref())?.decode_to_buf(buf)
}

/// QOI decoder over an in-memory byte buffer.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    header: Header,
}

impl<'a> Decoder<'a> {
    /// Creates a new decoder and parses the header.
    ///
    /// The input must hold at least the header and one opcode. Header errors
    /// are reported before the length check, so a bare header with a bad
    /// field fails on that field.
    #[inline]
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let header = Header::decode(data)?;
        if unlikely(data.len() < QOI_MIN_SIZE) {
            return Err(Error::TruncatedInput {
                offset: 0,
                required: QOI_MIN_SIZE,
                available: data.len(),
            });
        }
        Ok(Self { data, header })
    }

    /// Returns the decoded image header.
    #[inline]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Exact size of the decoded pixel buffer in bytes.
    #[inline]
    pub const fn required_buf_len(&self) -> usize {
        self.header.n_bytes()
    }

    /// A fresh opcode walker positioned right after the header.
    #[inline]
    pub fn stream(&self) -> PixelStream<'a> {
        PixelStream::new(&self.header, self.data)
    }

    /// Decodes the image into a pre-allocated buffer.
    ///
    /// Returns the number of bytes written. Bytes past that are left untouched.
    ///
    /// If the stream turns out to be malformed, the first
    /// [`required_buf_len`](Self::required_buf_len) bytes of `buf` are zeroed
    /// before the error is returned, so no partially decoded image is left behind.
    pub fn decode_to_buf(&self, mut buf: impl AsMut<[u8]>) -> Result<usize> {
        let buf = buf.as_mut();
        let required = self.required_buf_len();
        if unlikely(buf.len() < required) {
            return Err(Error::OutputBufferTooSmall { size: buf.len(), required });
        }
        let out = &mut buf[..required];
        let result = match self.header.channels {
            Channels::Rgb => decode_impl::<3>(self.stream(), out),
            Channels::Rgba => decode_impl::<4>(self.stream(), out),
        };
        let n_written = match result {
            Ok(n_written) => n_written,
            Err(err) => {
                out.fill(0);
                return Err(err);
            }
        };
        tracing::debug!(
            width = self.header.width,
            height = self.header.height,
            channels = self.header.channels.as_u8(),
            n_bytes = n_written,
            "decoded qoi image"
        );
        Ok(n_written)
    }

    /// Decodes the image into a newly allocated vector.
    #[inline]
    pub fn decode_to_vec(&self) -> Result<Vec<u8>> {
        let mut out = vec![0; self.required_buf_len()];
        self.decode_to_buf(&mut out)?;
        Ok(out)
    }
}
