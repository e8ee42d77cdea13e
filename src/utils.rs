#[inline(always)]
#[cold]
pub const fn cold() {}

#[inline(always)]
pub const fn unlikely(b: bool) -> bool {
    if b {
        cold();
    }
    b
}

/// Read cursor over an in-memory byte stream.
///
/// Every read checks the remaining length first and hands back `None`
/// instead of touching memory past the end of the slice.
#[derive(Clone)]
pub struct Bytes<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Bytes<'a> {
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Advances by `n` bytes, stopping at the end of the data.
    #[inline]
    pub fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    #[inline]
    pub fn read_one(&mut self) -> Option<u8> {
        let v = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let end = self.pos.checked_add(N)?;
        let chunk = self.data.get(self.pos..end)?;
        let mut out = [0; N];
        out.copy_from_slice(chunk);
        self.pos = end;
        Some(out)
    }
}

/// Write cursor over an output pixel buffer.
pub struct BytesMut<'a>(&'a mut [u8]);

impl<'a> BytesMut<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self(buf)
    }

    /// Copies `v` to the front of the buffer; the caller guarantees that it fits.
    #[inline]
    pub fn write_many(self, v: &[u8]) -> Self {
        let (head, tail) = self.0.split_at_mut(v.len());
        head.copy_from_slice(v);
        Self(tail)
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.len()
    }
}
