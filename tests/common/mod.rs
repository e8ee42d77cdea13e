#![allow(unused)]

pub const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

/// Raw 14-byte header; fields are written as-is so invalid values can be produced.
pub fn header_bytes(width: u32, height: u32, channels: u8, colorspace: u8) -> Vec<u8> {
    let mut out = b"qoif".to_vec();
    out.extend(width.to_be_bytes());
    out.extend(height.to_be_bytes());
    out.push(channels);
    out.push(colorspace);
    out
}

/// Header followed by the given opcode bytes.
pub fn qoi_image(width: u32, height: u32, channels: u8, ops: &[u8]) -> Vec<u8> {
    let mut out = header_bytes(width, height, channels, 0);
    out.extend_from_slice(ops);
    out
}

pub fn hash(px: [u8; 4]) -> u8 {
    let [r, g, b, a] = px.map(u32::from);
    ((r * 3 + g * 5 + b * 7 + a * 11) % 64) as u8
}
