use bytemuck::{Pod, Zeroable};

use crate::consts::QOI_CACHE_SIZE;

/// Color cache slot for an RGBA value: `(r * 3 + g * 5 + b * 7 + a * 11) % 64`.
///
/// Arithmetic wraps at 256, which leaves the result unchanged since 64 divides 256.
#[inline]
pub const fn hash_index(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let r = r.wrapping_mul(3);
    let g = g.wrapping_mul(5);
    let b = b.wrapping_mul(7);
    let a = a.wrapping_mul(11);
    r.wrapping_add(g).wrapping_add(b).wrapping_add(a) % QOI_CACHE_SIZE as u8
}

/// A single RGBA pixel.
///
/// Alpha is tracked for three-channel images as well so that cache hashing
/// is identical in both cases; it is dropped when the pixel is written out.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Pixel([u8; 4]);

impl Pixel {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// All channels zero, the initial value of every cache slot.
    #[inline]
    pub const fn zero() -> Self {
        Self([0; 4])
    }

    /// Opaque black, the value of the previous pixel before decoding starts.
    #[inline]
    pub const fn opaque_black() -> Self {
        Self([0, 0, 0, 0xff])
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0[3]
    }

    #[inline]
    pub const fn with_rgb(mut self, r: u8, g: u8, b: u8) -> Self {
        self.0[0] = r;
        self.0[1] = g;
        self.0[2] = b;
        self
    }

    #[inline]
    pub const fn hash_index(self) -> u8 {
        hash_index(self.r(), self.g(), self.b(), self.a())
    }

    /// Adds signed deltas to the color channels, wrapping modulo 256.
    #[inline]
    pub const fn rgb_add(mut self, dr: i8, dg: i8, db: i8) -> Self {
        self.0[0] = self.0[0].wrapping_add_signed(dr);
        self.0[1] = self.0[1].wrapping_add_signed(dg);
        self.0[2] = self.0[2].wrapping_add_signed(db);
        self
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        self.0
    }

    /// The channel bytes as laid out in an interleaved RGBA buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl From<[u8; 4]> for Pixel {
    #[inline(always)]
    fn from(arr: [u8; 4]) -> Self {
        Self(arr)
    }
}

impl From<Pixel> for [u8; 4] {
    #[inline(always)]
    fn from(px: Pixel) -> Self {
        px.0
    }
}

/// The 64-entry table of recently seen pixels that INDEX opcodes refer to.
///
/// Every slot starts out as all zeros (including alpha).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ColorCache([Pixel; QOI_CACHE_SIZE]);

impl Default for ColorCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ColorCache {
    #[inline]
    pub const fn new() -> Self {
        Self([Pixel::zero(); QOI_CACHE_SIZE])
    }

    /// Looks up a slot; only the low 6 bits of `index` are used.
    #[inline]
    pub const fn get(&self, index: u8) -> Pixel {
        self.0[(index & 0x3f) as usize]
    }

    /// Stores `px` in the slot given by its hash.
    #[inline]
    pub fn insert(&mut self, px: Pixel) {
        self.0[px.hash_index() as usize] = px;
    }

    /// Copy of the whole table as raw RGBA values.
    pub fn snapshot(&self) -> [[u8; 4]; QOI_CACHE_SIZE] {
        bytemuck::cast(self.0)
    }
}
