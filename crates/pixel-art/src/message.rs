//! Request and response messages exchanged with a conversion worker.
//!
//! Messages are internally tagged by a `type` field and use camelCase
//! field names:
//!
//! ```json
//! { "type": "PROCESS_PIXEL_ART", "srcWidth": 1, "srcHeight": 1,
//!   "srcBuffer": [255, 0, 0, 255], "outWidth": 4, "outHeight": 4,
//!   "gridMax": 100, "paletteSize": 4, "palettePreset": "auto", ... }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{ConvertError, ConvertOptions, PixelArtConverter};
use crate::raster::RgbaImage;

/// A message crossing the worker boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Caller to worker
    #[serde(rename = "PROCESS_PIXEL_ART")]
    ProcessPixelArt(ProcessRequest),
    /// Worker to caller
    #[serde(rename = "PROCESS_PIXEL_ART_DONE")]
    ProcessPixelArtDone(ProcessResponse),
}

/// One conversion job. The source buffer moves into the worker with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub src_width: usize,
    pub src_height: usize,
    /// RGBA bytes, `src_width * src_height * 4` long
    pub src_buffer: Vec<u8>,
    pub out_width: usize,
    pub out_height: usize,
    #[serde(flatten)]
    pub options: ConvertOptions,
}

impl ProcessRequest {
    /// Build a request for `image` at its own size.
    pub fn new(image: RgbaImage, options: ConvertOptions) -> Self {
        let (width, height) = (image.width(), image.height());
        Self {
            src_width: width,
            src_height: height,
            src_buffer: image.into_data(),
            out_width: width,
            out_height: height,
            options,
        }
    }

    /// Set the output raster size.
    pub fn output_size(mut self, width: usize, height: usize) -> Self {
        self.out_width = width;
        self.out_height = height;
        self
    }
}

/// A finished conversion. Owns the output buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub out_width: usize,
    pub out_height: usize,
    /// RGBA bytes, `out_width * out_height * 4` long
    pub out_buffer: Vec<u8>,
}

impl ProcessResponse {
    /// View the output buffer as an image.
    pub fn into_image(self) -> Result<RgbaImage, ConvertError> {
        RgbaImage::new(self.out_width, self.out_height, self.out_buffer)
    }
}

/// Run one request to completion.
///
/// # Errors
///
/// Returns [`ConvertError`] when the source buffer does not match its
/// declared size or an output side is zero. Out-of-range options are
/// clamped, not rejected.
pub fn process_request(request: ProcessRequest) -> Result<ProcessResponse, ConvertError> {
    let ProcessRequest {
        src_width,
        src_height,
        src_buffer,
        out_width,
        out_height,
        options,
    } = request;

    debug!(src_width, src_height, out_width, out_height, "Processing request");
    let src = RgbaImage::new(src_width, src_height, src_buffer)?;
    let out = PixelArtConverter::with_options(options).convert(&src, out_width, out_height)?;

    Ok(ProcessResponse {
        out_width,
        out_height,
        out_buffer: out.into_data(),
    })
}
