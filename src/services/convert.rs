//! File-level conversion: PNG in, pixel art PNG out.

use pixel_art::{ConvertOptions, Message, ProcessRequest};
use std::path::Path;

use crate::error::AppError;
use crate::services::codec;
use crate::services::worker::PixelArtWorker;

/// How the output raster size is derived from the source size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSize {
    /// Same size as the source
    #[default]
    Source,
    /// Source size multiplied by an integer factor
    Scale(usize),
    /// Fixed width; height follows the source aspect ratio
    Width(usize),
    /// Fixed height; width follows the source aspect ratio
    Height(usize),
    /// Fixed width and height
    Exact { width: usize, height: usize },
}

impl OutputSize {
    /// Output dimensions for a `src_width x src_height` source.
    ///
    /// Aspect-derived sides are rounded and never below 1.
    pub fn resolve(self, src_width: usize, src_height: usize) -> (usize, usize) {
        let follow = |fixed: usize, num: usize, den: usize| {
            ((fixed as f64 * num as f64 / den.max(1) as f64).round() as usize).max(1)
        };
        match self {
            OutputSize::Source => (src_width, src_height),
            OutputSize::Scale(factor) => (src_width * factor, src_height * factor),
            OutputSize::Width(width) => (width, follow(width, src_height, src_width)),
            OutputSize::Height(height) => (follow(height, src_width, src_height), height),
            OutputSize::Exact { width, height } => (width, height),
        }
    }
}

/// Summary of a finished file conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub width: usize,
    pub height: usize,
    pub bytes: usize,
}

/// Convert the PNG at `input` and write the result to `output`.
pub async fn convert_file(
    worker: &mut PixelArtWorker,
    input: &Path,
    output: &Path,
    options: ConvertOptions,
    size: OutputSize,
    optimize: bool,
) -> Result<ConvertReport, AppError> {
    let source = codec::read_png(input)?;
    let (width, height) = size.resolve(source.width(), source.height());
    tracing::debug!(
        src_width = source.width(),
        src_height = source.height(),
        width,
        height,
        "Converting image"
    );

    let request = ProcessRequest::new(source, options).output_size(width, height);
    let image = worker.process(request).await?.into_image()?;
    let bytes = codec::write_png(output, &image, optimize)?;

    Ok(ConvertReport {
        width,
        height,
        bytes,
    })
}

/// Run a JSON `PROCESS_PIXEL_ART` message and write the JSON
/// `PROCESS_PIXEL_ART_DONE` reply.
pub async fn process_message_file(
    worker: &mut PixelArtWorker,
    request_path: &Path,
    response_path: &Path,
) -> Result<(usize, usize), AppError> {
    let content = std::fs::read_to_string(request_path)?;
    let Message::ProcessPixelArt(request) = serde_json::from_str::<Message>(&content)? else {
        return Err(AppError::UnexpectedMessage("PROCESS_PIXEL_ART"));
    };

    let response = worker.process(request).await?;
    let size = (response.out_width, response.out_height);
    let json = serde_json::to_vec(&Message::ProcessPixelArtDone(response))?;
    std::fs::write(response_path, json)?;

    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_size() {
        assert_eq!(OutputSize::Source.resolve(40, 30), (40, 30));
    }

    #[test]
    fn test_scale() {
        assert_eq!(OutputSize::Scale(4).resolve(40, 30), (160, 120));
    }

    #[test]
    fn test_width_keeps_aspect() {
        assert_eq!(OutputSize::Width(100).resolve(40, 30), (100, 75));
    }

    #[test]
    fn test_height_keeps_aspect() {
        assert_eq!(OutputSize::Height(60).resolve(40, 30), (80, 60));
    }

    #[test]
    fn test_aspect_side_never_zero() {
        assert_eq!(OutputSize::Width(1).resolve(1000, 1), (1, 1));
    }

    #[test]
    fn test_exact() {
        assert_eq!(
            OutputSize::Exact {
                width: 7,
                height: 3
            }
            .resolve(40, 30),
            (7, 3)
        );
    }
}
