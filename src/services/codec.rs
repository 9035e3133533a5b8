//! PNG decoding and encoding for RGBA rasters.

use pixel_art::RgbaImage;
use std::io::Cursor;
use std::path::Path;

use crate::error::CodecError;

/// Decode a PNG into 8-bit RGBA.
///
/// Palette, greyscale and RGB images are expanded (using `tRNS` for
/// transparency when present); 16-bit samples are reduced to 8 bits.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, CodecError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| CodecError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| CodecError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(CodecError::PngDecode(format!(
            "unexpected bit depth after expansion: {:?}",
            info.bit_depth
        )));
    }

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(CodecError::PngDecode(
                "indexed data was not expanded".to_string(),
            ))
        }
    };

    Ok(RgbaImage::new(
        info.width as usize,
        info.height as usize,
        rgba,
    )?)
}

/// Encode an RGBA raster as a PNG.
///
/// Uses fast compression; run [`optimize_png`] on the result for a
/// smaller file.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CodecError> {
    let unsupported = || CodecError::UnsupportedDimensions {
        width: image.width(),
        height: image.height(),
    };
    let width = u32::try_from(image.width()).map_err(|_| unsupported())?;
    let height = u32::try_from(image.height()).map_err(|_| unsupported())?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(image.data())
            .map_err(|e| CodecError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Losslessly re-compress PNG bytes with oxipng.
///
/// Returns the input unchanged if optimization fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping original encoding");
            png_bytes
        }
    }
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<RgbaImage, CodecError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}

/// Encode `image` and write it to `path`, optionally re-compressing.
///
/// Returns the number of bytes written.
pub fn write_png(path: &Path, image: &RgbaImage, optimize: bool) -> Result<usize, CodecError> {
    let mut png_bytes = encode_png(image)?;
    if optimize {
        png_bytes = optimize_png(png_bytes);
    }
    std::fs::write(path, &png_bytes)?;
    Ok(png_bytes.len())
}
