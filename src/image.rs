//! Texture-ready image container shared by every loader.
//!
//! The enums carry the matching OpenGL enumerants so a renderer can pass them
//! straight to `glTexImage2D` and friends.

/// Texture binding target.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum TextureTarget {
    #[default]
    Texture2D,
}

impl TextureTarget {
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Texture2D => 0x0de1, // GL_TEXTURE_2D
        }
    }
}

/// Channel layout of the pixel data (the "format" argument of a texture upload).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PixelFormat {
    R,
    Rg,
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub const fn channels(self) -> usize {
        match self {
            Self::R => 1,
            Self::Rg => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::R => 0x1903,    // GL_RED
            Self::Rg => 0x8227,   // GL_RG
            Self::Rgb => 0x1907,  // GL_RGB
            Self::Rgba => 0x1908, // GL_RGBA
        }
    }
}

/// Storage type of a single channel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ComponentType {
    /// 8 bits per channel
    U8,
    /// 16 bits per channel, native byte order
    U16,
}

impl ComponentType {
    pub const fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }

    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::U8 => 0x1401,  // GL_UNSIGNED_BYTE
            Self::U16 => 0x1403, // GL_UNSIGNED_SHORT
        }
    }
}

/// Sized internal format, derived from the layout and the component type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum InternalFormat {
    R8,
    Rg8,
    Rgb8,
    Rgba8,
    R16,
    Rg16,
    Rgb16,
    Rgba16,
}

impl InternalFormat {
    pub const fn new(format: PixelFormat, component: ComponentType) -> Self {
        match (format, component) {
            (PixelFormat::R, ComponentType::U8) => Self::R8,
            (PixelFormat::Rg, ComponentType::U8) => Self::Rg8,
            (PixelFormat::Rgb, ComponentType::U8) => Self::Rgb8,
            (PixelFormat::Rgba, ComponentType::U8) => Self::Rgba8,
            (PixelFormat::R, ComponentType::U16) => Self::R16,
            (PixelFormat::Rg, ComponentType::U16) => Self::Rg16,
            (PixelFormat::Rgb, ComponentType::U16) => Self::Rgb16,
            (PixelFormat::Rgba, ComponentType::U16) => Self::Rgba16,
        }
    }

    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::R8 => 0x8229,
            Self::Rg8 => 0x822b,
            Self::Rgb8 => 0x8051,
            Self::Rgba8 => 0x8058,
            Self::R16 => 0x822a,
            Self::Rg16 => 0x822c,
            Self::Rgb16 => 0x8054,
            Self::Rgba16 => 0x805b,
        }
    }
}

/// One level of the mip chain.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    /// Tightly packed rows, top to bottom
    pub data: Vec<u8>,
}

/// A decoded image, laid out for texture upload.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ImageData {
    pub target: TextureTarget,
    pub format: PixelFormat,
    pub component: ComponentType,
    /// Base level first; loaders only ever produce the base level.
    pub mips: Vec<MipLevel>,
}

impl ImageData {
    /// Wraps a single base level.
    pub fn new(
        width: u32, height: u32, format: PixelFormat, component: ComponentType, data: Vec<u8>,
    ) -> Self {
        Self {
            target: TextureTarget::Texture2D,
            format,
            component,
            mips: vec![MipLevel { width, height, data }],
        }
    }

    #[inline]
    pub const fn internal_format(&self) -> InternalFormat {
        InternalFormat::new(self.format, self.component)
    }

    #[inline]
    pub fn base(&self) -> Option<&MipLevel> {
        self.mips.first()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.base().map_or(0, |mip| mip.width)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.base().map_or(0, |mip| mip.height)
    }

    /// Bytes per pixel.
    #[inline]
    pub const fn pixel_size(&self) -> usize {
        self.format.channels() * self.component.size()
    }

    /// Sum of the data sizes of all mip levels.
    pub fn total_size(&self) -> usize {
        self.mips.iter().map(|mip| mip.data.len()).sum()
    }
}
