mod common;

use std::path::PathBuf;

use anyhow::Result;

use texload::{
    consts::{QOI_OP_RGB, QOI_OP_RUN},
    is_qoi_file, load, load_from_memory, ComponentType, Error, ImageFormat, ImageLoader,
    InternalFormat, PixelFormat, QoiLoader, TextureTarget,
};

use self::common::{qoi_image, END_MARKER};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("texload-{}-{}", std::process::id(), name))
}

#[cfg(feature = "png")]
fn encode_png(
    width: u32, height: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8],
    palette: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if let Some(palette) = palette {
            encoder.set_palette(palette.to_vec());
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
    }
    Ok(out)
}

#[cfg(feature = "jpeg")]
fn encode_jpeg(width: u16, height: u16, color: jpeg_encoder::ColorType, data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    jpeg_encoder::Encoder::new(&mut out, 90).encode(data, width, height, color)?;
    Ok(out)
}

#[test]
fn test_format_from_signature() {
    assert_eq!(ImageFormat::from_signature(b"qoif\0\0\0\x01"), Some(ImageFormat::Qoi));
    assert_eq!(ImageFormat::from_signature(b"\x89PNG\r\n\x1a\n\0\0"), Some(ImageFormat::Png));
    assert_eq!(ImageFormat::from_signature([0xff, 0xd8, 0xff, 0xe0]), Some(ImageFormat::Jpeg));
    assert_eq!(ImageFormat::from_signature(b"GIF89a"), None);
    assert_eq!(ImageFormat::from_signature(b""), None);
}

#[test]
fn test_format_from_extension() {
    assert_eq!(ImageFormat::from_extension("a/b/c.qoi"), Some(ImageFormat::Qoi));
    assert_eq!(ImageFormat::from_extension("c.PNG"), Some(ImageFormat::Png));
    assert_eq!(ImageFormat::from_extension("c.jpg"), Some(ImageFormat::Jpeg));
    assert_eq!(ImageFormat::from_extension("c.JPEG"), Some(ImageFormat::Jpeg));
    assert_eq!(ImageFormat::from_extension("c.bmp"), None);
    assert_eq!(ImageFormat::from_extension("qoi"), None);
}

#[test]
fn test_qoi_loader() -> Result<()> {
    let mut data = qoi_image(2, 2, 3, &[QOI_OP_RGB, 1, 2, 3, QOI_OP_RUN | 2]);
    data.extend(END_MARKER);

    let image = QoiLoader.load_from_memory(&data)?;
    assert_eq!(QoiLoader.format(), ImageFormat::Qoi);
    assert_eq!(image.target, TextureTarget::Texture2D);
    assert_eq!(image.format, PixelFormat::Rgb);
    assert_eq!(image.component, ComponentType::U8);
    assert_eq!(image.internal_format(), InternalFormat::Rgb8);
    assert_eq!((image.width(), image.height()), (2, 2));
    assert_eq!(image.mips.len(), 1);
    assert_eq!(image.total_size(), 12);
    assert_eq!(image.pixel_size(), 3);
    assert_eq!(image.mips[0].data, [1_u8, 2, 3].repeat(4));

    assert_eq!(load_from_memory(&data)?, image);
    Ok(())
}

#[test]
fn test_gl_enums() {
    assert_eq!(TextureTarget::Texture2D.gl_enum(), 0x0de1);
    assert_eq!(PixelFormat::Rgba.gl_enum(), 0x1908);
    assert_eq!(ComponentType::U8.gl_enum(), 0x1401);
    assert_eq!(InternalFormat::new(PixelFormat::Rgba, ComponentType::U8).gl_enum(), 0x8058);
    assert_eq!(InternalFormat::new(PixelFormat::R, ComponentType::U16), InternalFormat::R16);
}

#[test]
fn test_unknown_format() {
    let err = load_from_memory(b"BM\0\0\0\0").unwrap_err();
    assert!(matches!(err, Error::UnknownFormat));
}

#[test]
fn test_qoi_error_surfaces_through_loader() {
    let data = qoi_image(1, 1, 5, &[QOI_OP_RUN]);
    let err = load_from_memory(&data).unwrap_err();
    assert!(matches!(err, Error::UnsupportedChannelCount { channels: 5 }));
}

#[test]
fn test_load_file() -> Result<()> {
    let path = temp_path("image.bin");
    let data = qoi_image(1, 1, 4, &[QOI_OP_RUN]);
    std::fs::write(&path, &data)?;

    assert!(is_qoi_file(&path)?);
    let image = load(&path)?;
    assert_eq!(image.format, PixelFormat::Rgba);
    assert_eq!(image.mips[0].data, [0, 0, 0, 255]);

    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_load_by_extension() -> Result<()> {
    // not a recognizable signature, so the extension decides
    let path = temp_path("broken.qoi");
    std::fs::write(&path, b"garbage bytes")?;
    let err = load(&path).unwrap_err();
    assert!(matches!(err, Error::TruncatedInput { .. }), "{:?}", err);

    let path_unknown = temp_path("broken.dat");
    std::fs::write(&path_unknown, b"garbage bytes")?;
    assert!(matches!(load(&path_unknown).unwrap_err(), Error::UnknownFormat));
    assert!(!is_qoi_file(&path_unknown)?);

    std::fs::remove_file(&path)?;
    std::fs::remove_file(&path_unknown)?;
    Ok(())
}

#[test]
fn test_missing_file() {
    let path = temp_path("does-not-exist.qoi");
    assert!(matches!(load(&path).unwrap_err(), Error::IoError(_)));
    assert!(matches!(is_qoi_file(&path).unwrap_err(), Error::IoError(_)));
}

#[cfg(feature = "png")]
#[test]
fn test_png_rgba() -> Result<()> {
    let pixels = [255, 0, 0, 255, 0, 255, 0, 128, 0, 0, 255, 0, 9, 9, 9, 9];
    let data = encode_png(2, 2, png::ColorType::Rgba, png::BitDepth::Eight, &pixels, None)?;

    let image = load_from_memory(&data)?;
    assert_eq!(image.format, PixelFormat::Rgba);
    assert_eq!(image.internal_format(), InternalFormat::Rgba8);
    assert_eq!((image.width(), image.height()), (2, 2));
    assert_eq!(image.mips[0].data, pixels);
    Ok(())
}

#[cfg(feature = "png")]
#[test]
fn test_png_palette_is_expanded() -> Result<()> {
    let palette = [10, 20, 30, 40, 50, 60];
    let indices = [1, 0, 1];
    let data = encode_png(
        3,
        1,
        png::ColorType::Indexed,
        png::BitDepth::Eight,
        &indices,
        Some(&palette[..]),
    )?;

    let image = texload::PngLoader.load_from_memory(&data)?;
    assert_eq!(image.format, PixelFormat::Rgb);
    assert_eq!(image.mips[0].data, [40, 50, 60, 10, 20, 30, 40, 50, 60]);
    Ok(())
}

#[cfg(feature = "png")]
#[test]
fn test_png_low_bit_gray_is_expanded() -> Result<()> {
    // 1-bit grayscale, 8 pixels packed into one byte
    let data =
        encode_png(8, 1, png::ColorType::Grayscale, png::BitDepth::One, &[0b1010_0000], None)?;

    let image = load_from_memory(&data)?;
    assert_eq!(image.format, PixelFormat::R);
    assert_eq!(image.component, ComponentType::U8);
    assert_eq!(image.mips[0].data, [255, 0, 255, 0, 0, 0, 0, 0]);
    Ok(())
}

#[cfg(feature = "png")]
#[test]
fn test_png_16_bit_native_order() -> Result<()> {
    let samples = [0x12, 0x34, 0xab, 0xcd];
    let data =
        encode_png(2, 1, png::ColorType::Grayscale, png::BitDepth::Sixteen, &samples, None)?;

    let image = load_from_memory(&data)?;
    assert_eq!(image.format, PixelFormat::R);
    assert_eq!(image.component, ComponentType::U16);
    assert_eq!(image.internal_format(), InternalFormat::R16);
    let mut expected = 0x1234_u16.to_ne_bytes().to_vec();
    expected.extend(0xabcd_u16.to_ne_bytes());
    assert_eq!(image.mips[0].data, expected);
    Ok(())
}

#[cfg(feature = "png")]
#[test]
fn test_png_corrupt() {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.extend([0; 16]);
    assert!(matches!(load_from_memory(&data).unwrap_err(), Error::Png(_)));
}

#[cfg(feature = "jpeg")]
#[test]
fn test_jpeg_corrupt() {
    let data = [0xff, 0xd8, 0xff, 0xd9];
    let err = texload::JpegLoader.load_from_memory(&data).unwrap_err();
    assert!(matches!(err, Error::Jpeg(_)), "{:?}", err);
    assert_eq!(err.offset(), None);
}

#[cfg(feature = "jpeg")]
#[test]
fn test_jpeg_rgb() -> Result<()> {
    let pixels = [40_u8, 120, 200].repeat(8 * 8);
    let data = encode_jpeg(8, 8, jpeg_encoder::ColorType::Rgb, &pixels)?;

    let image = load_from_memory(&data)?;
    assert_eq!(image.format, PixelFormat::Rgb);
    assert_eq!(image.component, ComponentType::U8);
    assert_eq!(image.internal_format(), InternalFormat::Rgb8);
    assert_eq!((image.width(), image.height()), (8, 8));
    assert_eq!(image.mips[0].data.len(), 8 * 8 * 3);
    Ok(())
}

#[cfg(feature = "jpeg")]
#[test]
fn test_jpeg_grayscale() -> Result<()> {
    let pixels = [128_u8; 16 * 8];
    let data = encode_jpeg(16, 8, jpeg_encoder::ColorType::Luma, &pixels)?;

    let image = texload::JpegLoader.load_from_memory(&data)?;
    assert_eq!(image.format, PixelFormat::R);
    assert_eq!(image.internal_format(), InternalFormat::R8);
    assert_eq!((image.width(), image.height()), (16, 8));
    assert_eq!(image.mips[0].data.len(), 16 * 8);
    // a flat image survives lossy coding almost exactly
    assert!(image.mips[0].data.iter().all(|&v| v.abs_diff(128) <= 2));
    Ok(())
}

#[cfg(feature = "jpeg")]
#[test]
fn test_jpeg_cmyk_is_rejected() -> Result<()> {
    let pixels = [10_u8, 20, 30, 40].repeat(8 * 8);
    let data = encode_jpeg(8, 8, jpeg_encoder::ColorType::Cmyk, &pixels)?;

    let err = load_from_memory(&data).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { format: "jpeg", .. }), "{:?}", err);
    Ok(())
}
