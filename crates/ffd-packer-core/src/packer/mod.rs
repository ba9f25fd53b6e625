use crate::model::Bin;

pub mod first_fit;

/// A packer places items into bins.
///
/// Implementations must never let a bin's load exceed its capacity.
/// `can_pack` answers whether an item could be placed at all; `pack` places it and
/// returns the index of the receiving bin.
pub trait Packer {
    fn can_pack(&self, item: u32) -> bool;
    fn pack(&mut self, item: u32) -> usize;
    fn bins(&self) -> &[Bin];
    fn into_bins(self) -> Vec<Bin>;
}

/// Minimum number of bins implied by total volume alone: `ceil(sum(items) / capacity)`.
///
/// Exact integer arithmetic; `capacity` must be non-zero.
pub fn lower_bound(items: &[u32], capacity: u32) -> usize {
    debug_assert!(capacity > 0);
    let sum: u64 = items.iter().map(|&s| s as u64).sum();
    sum.div_ceil(capacity as u64) as usize
}
