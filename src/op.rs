use crate::consts::{QOI_MASK_2, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA};

/// A decoded opcode tag, classified from the first byte of a chunk.
///
/// Deltas are already un-biased. `Luma` carries only the green delta, the red
/// and blue differences live in the byte that follows the tag.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Op {
    /// `0xfe`, followed by r, g, b
    Rgb,
    /// `0xff`, followed by r, g, b, a
    Rgba,
    /// Cache slot 0..=63
    Index(u8),
    /// Per-channel deltas, each in -2..=1
    Diff { dr: i8, dg: i8, db: i8 },
    /// Green delta in -32..=31
    Luma { dg: i8 },
    /// Repeat the previous pixel 1..=62 times
    Run(u8),
}

impl Op {
    /// Classifies an opcode byte.
    ///
    /// The 8-bit literal tags are matched before the 2-bit tags, so `0xfe` and
    /// `0xff` never decode as runs.
    #[inline]
    pub const fn from_byte(b1: u8) -> Self {
        match b1 {
            QOI_OP_RGB => Self::Rgb,
            QOI_OP_RGBA => Self::Rgba,
            _ => match b1 & QOI_MASK_2 {
                QOI_OP_INDEX => Self::Index(b1 & 0x3f),
                QOI_OP_DIFF => Self::Diff {
                    dr: ((b1 >> 4) & 0x03) as i8 - 2,
                    dg: ((b1 >> 2) & 0x03) as i8 - 2,
                    db: (b1 & 0x03) as i8 - 2,
                },
                QOI_OP_LUMA => Self::Luma { dg: (b1 & 0x3f) as i8 - 32 },
                _ => Self::Run((b1 & 0x3f) + 1),
            },
        }
    }

    /// Number of bytes that follow the tag byte.
    #[inline]
    pub const fn extra_bytes(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
            Self::Luma { .. } => 1,
            Self::Index(_) | Self::Diff { .. } | Self::Run(_) => 0,
        }
    }
}

/// Splits the second LUMA byte into the red and blue differences
/// relative to the green delta, each in -8..=7.
#[inline]
pub const fn luma_rb(b2: u8) -> (i8, i8) {
    ((b2 >> 4) as i8 - 8, (b2 & 0x0f) as i8 - 8)
}
