use super::Packer;
use crate::model::Bin;
use tracing::{debug, trace};

/// First-fit placement over bins kept in creation order.
///
/// Items are placed into the lowest-indexed bin with enough room; a new bin is
/// appended only after a full scan found none. Feeding items in non-increasing
/// order yields First-Fit-Decreasing.
pub struct FirstFitPacker {
    capacity: u32,
    bins: Vec<Bin>,
}

impl FirstFitPacker {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            bins: Vec::new(),
        }
    }

    /// Starts with `count` empty bins, ids `0..count`.
    pub fn seeded(capacity: u32, count: usize) -> Self {
        let bins = (0..count).map(|id| Bin::new(id, capacity)).collect();
        Self { capacity, bins }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    fn open_bin(&mut self) -> usize {
        // id == index keeps the count and the list from drifting apart
        let id = self.bins.len();
        self.bins.push(Bin::new(id, self.capacity));
        debug!(bin = id, "opened bin on demand");
        id
    }
}

impl Packer for FirstFitPacker {
    fn can_pack(&self, item: u32) -> bool {
        item <= self.capacity
    }

    fn pack(&mut self, item: u32) -> usize {
        debug_assert!(self.can_pack(item));
        let idx = match self.bins.iter().position(|b| b.can_fit(item)) {
            Some(idx) => idx,
            None => self.open_bin(),
        };
        self.bins[idx].add(item);
        trace!(item, bin = idx, remaining = self.bins[idx].remaining(), "placed");
        idx
    }

    fn bins(&self) -> &[Bin] {
        &self.bins
    }

    fn into_bins(self) -> Vec<Bin> {
        self.bins
    }
}
