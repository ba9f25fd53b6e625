//! Core library for one-dimensional bin packing with First-Fit-Decreasing (FFD).
//!
//! - Algorithm: sort item sizes non-increasing, place each into the first bin (creation order)
//!   with enough room, open a new bin only when none fits
//! - Pipeline: `pack` / `pack_items` validate input and return a [`Packing`]
//! - Data model is serde-serializable; text and JSON reports live in [`report`].
//!
//! Quick example:
//! ```
//! use ffd_packer_core::{pack, report};
//! # fn main() -> ffd_packer_core::Result<()> {
//! let packing = pack(&[4, 4, 4, 4], 8)?;
//! assert_eq!(packing.bin_count(), 2);
//! print!("{}", report::to_text(&packing));
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod report;

pub use config::*;
pub use error::*;
pub use model::*;
pub use packer::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `ffd_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{PackerConfig, PackerConfigBuilder, ReportFormat};
    pub use crate::error::PackError;
    pub use crate::model::{Bin, PackStats, Packing};
    pub use crate::packer::{Packer, first_fit::FirstFitPacker, lower_bound};
    pub use crate::{pack, pack_items, sorted_desc};
}
