use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use pixel_transform::PixelBuffer;

use crate::error::PipelineError;

/// Decode an image file (PNG, JPEG, BMP, GIF, TIFF, WebP) into RGB pixels.
///
/// Alpha is dropped; animated formats yield their first frame.
pub fn decode_file(path: &Path) -> Result<PixelBuffer, PipelineError> {
    let img = image::open(path).map_err(|source| PipelineError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    to_pixel_buffer(img)
}

/// Decode in-memory image data, format sniffed from the content.
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer, PipelineError> {
    let img = image::load_from_memory(bytes).map_err(|source| PipelineError::Decode {
        path: "<memory>".into(),
        source,
    })?;
    to_pixel_buffer(img)
}

fn to_pixel_buffer(img: image::DynamicImage) -> Result<PixelBuffer, PipelineError> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(PixelBuffer::from_rgb_bytes(
        width as usize,
        height as usize,
        rgb.as_raw(),
    )?)
}

/// Write `image` to `path`; the format follows the extension (PNG when
/// there is none). Returns the number of bytes written.
pub fn write_file(path: &Path, image: &PixelBuffer, optimize: bool) -> Result<u64, PipelineError> {
    let is_png = path
        .extension()
        .map_or(true, |ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        let bytes = encode_png(image, optimize)?;
        std::fs::write(path, &bytes)?;
        return Ok(bytes.len() as u64);
    }

    let rgb = image::RgbImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.to_rgb_bytes(),
    )
    .ok_or_else(|| PipelineError::Encode("pixel buffer does not match its dimensions".into()))?;
    let format = image::ImageFormat::from_path(path)
        .map_err(|e| PipelineError::Encode(e.to_string()))?;
    rgb.save_with_format(path, format)
        .map_err(|e| PipelineError::Encode(e.to_string()))?;
    Ok(std::fs::metadata(path)?.len())
}

/// Encode as PNG.
///
/// Images with at most 256 colors (the usual result of color reduction)
/// are written as indexed PNG at the smallest bit depth that fits the
/// palette; anything else is written as 8-bit RGB.
pub fn encode_png(image: &PixelBuffer, optimize: bool) -> Result<Vec<u8>, PipelineError> {
    let width = image.width() as u32;
    let height = image.height() as u32;

    let (color_type, bit_depth, plte, data) = match palette_indices(image) {
        Some((palette, indices)) => {
            let (depth, bits) = match palette.len() {
                0..=2 => (png::BitDepth::One, 1),
                3..=4 => (png::BitDepth::Two, 2),
                5..=16 => (png::BitDepth::Four, 4),
                _ => (png::BitDepth::Eight, 8),
            };
            let plte: Vec<u8> = palette.iter().flatten().copied().collect();
            let packed = if bits == 8 {
                indices
            } else {
                pack_nbits(&indices, width, bits)
            };
            (png::ColorType::Indexed, depth, Some(plte), packed)
        }
        None => (
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            None,
            image.to_rgb_bytes(),
        ),
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    // Re-compress with oxipng (zopfli + adaptive filter selection)
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => Ok(optimized),
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, keeping unoptimized PNG");
            Ok(png_bytes)
        }
    }
}

/// Palette in first-seen order plus one index per pixel, or `None` when
/// the image has more than 256 colors.
fn palette_indices(image: &PixelBuffer) -> Option<(Vec<[u8; 3]>, Vec<u8>)> {
    let mut lookup: HashMap<[u8; 3], u8> = HashMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::with_capacity(image.len());

    for &px in image.pixels() {
        let idx = match lookup.get(&px) {
            Some(&idx) => idx,
            None => {
                if palette.len() == 256 {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push(px);
                lookup.insert(px, idx);
                idx
            }
        };
        indices.push(idx);
    }
    Some((palette, indices))
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone(width: usize, height: usize) -> PixelBuffer {
        let pixels = (0..width * height)
            .map(|i| if i % 3 == 0 { [255, 0, 0] } else { [0, 0, 255] })
            .collect();
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_pack_nbits_one_bit() {
        let packed = pack_nbits(&[1, 0, 1, 1, 0, 0, 0, 0, 1], 9, 1);
        assert_eq!(packed, vec![0b1011_0000, 0b1000_0000]);
    }

    #[test]
    fn test_pack_nbits_two_bits_per_row() {
        // Two rows of three pixels; each row is padded to a whole byte.
        let packed = pack_nbits(&[3, 2, 1, 0, 1, 2], 3, 2);
        assert_eq!(packed, vec![0b1110_0100, 0b0001_1000]);
    }

    #[test]
    fn test_palette_indices_first_seen_order() {
        let image = two_tone(3, 1);
        let (palette, indices) = palette_indices(&image).unwrap();
        assert_eq!(palette, vec![[255, 0, 0], [0, 0, 255]]);
        assert_eq!(indices, vec![0, 1, 1]);
    }

    #[test]
    fn test_palette_indices_overflow() {
        let pixels = (0..300u32).map(|i| [(i % 256) as u8, (i / 256) as u8, 0]).collect();
        let image = PixelBuffer::new(300, 1, pixels).unwrap();
        assert!(palette_indices(&image).is_none());
    }

    #[test]
    fn test_indexed_png_roundtrip() {
        let image = two_tone(7, 5);
        let bytes = encode_png(&image, false).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(decode_bytes(&bytes).unwrap(), image);
    }

    #[test]
    fn test_rgb_png_roundtrip() {
        let pixels = (0..400u32)
            .map(|i| [(i % 256) as u8, (i * 7 % 256) as u8, (i / 2) as u8])
            .collect();
        let image = PixelBuffer::new(20, 20, pixels).unwrap();
        let bytes = encode_png(&image, false).unwrap();
        assert_eq!(decode_bytes(&bytes).unwrap(), image);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }
}
