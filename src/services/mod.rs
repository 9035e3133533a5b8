pub mod codec;
pub mod convert;
pub mod worker;

pub use codec::{decode_png, encode_png, optimize_png, read_png, write_png};
pub use convert::{convert_file, process_message_file, ConvertReport, OutputSize};
pub use worker::PixelArtWorker;
