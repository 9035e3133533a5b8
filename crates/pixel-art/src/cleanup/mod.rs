//! Cleanup passes around quantization.
//!
//! [`edge_aware_prefilter`] smooths the working raster before a palette is
//! built. The other passes rewrite the quantized index grid. Each one reads
//! only its input grid and returns a new one, so a pass never sees its own
//! edits, and none of them touch the border rows or columns.

mod islands;
mod outline;
mod prefilter;
mod smooth;

pub use islands::cleanup_tiny_islands;
pub use outline::{apply_outlines, apply_selective_outlines};
pub use prefilter::edge_aware_prefilter;
pub use smooth::conservative_smooth;
