use crate::config::PackerConfig;
use crate::error::Result;
use crate::model::Packing;
use crate::packer::{Packer, first_fit::FirstFitPacker, lower_bound};
use std::time::Instant;
use tracing::{debug, instrument};

/// Packs `items` into bins of `capacity` with First-Fit-Decreasing.
///
/// Shorthand for [`pack_items`] with default options.
pub fn pack(items: &[u32], capacity: u32) -> Result<Packing> {
    let cfg = PackerConfig {
        capacity,
        ..Default::default()
    };
    pack_items(items, cfg)
}

#[instrument(skip_all, fields(items = items.len(), capacity = cfg.capacity))]
/// Packs `items` into fixed-capacity bins using First-Fit-Decreasing.
///
/// Notes:
/// - Validation runs once up front: zero capacity, zero-sized and oversized items are rejected
///   before any bin exists.
/// - `items` is never reordered; a private copy is sorted (stable, non-increasing).
/// - Bin `i` in the result always has id `i`; the bin count is `bins.len()`.
pub fn pack_items(items: &[u32], cfg: PackerConfig) -> Result<Packing> {
    cfg.validate()?;
    cfg.validate_items(items)?;

    let start = Instant::now();
    let min_bins = lower_bound(items, cfg.capacity);
    debug!(lower_bound = min_bins, "volume lower bound");

    let mut packer = if cfg.seed_lower_bound {
        FirstFitPacker::seeded(cfg.capacity, min_bins)
    } else {
        FirstFitPacker::new(cfg.capacity)
    };

    for item in sorted_desc(items) {
        packer.pack(item);
    }

    let bins = packer.into_bins();
    debug!(
        bins = bins.len(),
        extra = bins.len().saturating_sub(min_bins),
        elapsed_us = start.elapsed().as_micros() as u64,
        "packing finished"
    );
    Ok(Packing {
        capacity: cfg.capacity,
        lower_bound: min_bins,
        bins,
    })
}

/// Returns a copy of `items` in non-increasing order; equal sizes keep input order.
pub fn sorted_desc(items: &[u32]) -> Vec<u32> {
    let mut work = items.to_vec();
    work.sort_by(|a, b| b.cmp(a));
    work
}
