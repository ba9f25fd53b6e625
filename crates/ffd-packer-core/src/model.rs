use crate::error::PackError;
use serde::{Deserialize, Serialize};

/// A fixed-capacity container. `id` is the bin's creation order within a packing run.
///
/// Bins are append-only: items can be added but never removed.
/// Deserialization re-checks `remaining == capacity - sum(contents)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "BinRecord")]
pub struct Bin {
    id: usize,
    capacity: u32,
    remaining: u32,
    contents: Vec<u32>,
}

impl Bin {
    pub fn new(id: usize, capacity: u32) -> Self {
        Self {
            id,
            capacity,
            remaining: capacity,
            contents: Vec::new(),
        }
    }

    /// Returns true if `item` fits into the remaining space.
    pub fn can_fit(&self, item: u32) -> bool {
        self.remaining >= item
    }

    /// Appends `item` and shrinks the remaining space by its size.
    ///
    /// Callers must check [`Bin::can_fit`] first.
    pub fn add(&mut self, item: u32) {
        debug_assert!(
            self.can_fit(item),
            "item {item} does not fit into bin {} (remaining {})",
            self.id,
            self.remaining
        );
        self.contents.push(item);
        self.remaining -= item;
    }

    pub fn id(&self) -> usize {
        self.id
    }
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
    /// Items in assignment order.
    pub fn contents(&self) -> &[u32] {
        &self.contents
    }
    /// Occupied space (`capacity - remaining`).
    pub fn load(&self) -> u32 {
        self.capacity - self.remaining
    }
    pub fn len(&self) -> usize {
        self.contents.len()
    }
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Unchecked wire form of a [`Bin`].
#[derive(Deserialize)]
struct BinRecord {
    id: usize,
    capacity: u32,
    remaining: u32,
    contents: Vec<u32>,
}

impl TryFrom<BinRecord> for Bin {
    type Error = PackError;

    fn try_from(r: BinRecord) -> Result<Self, Self::Error> {
        let sum: u64 = r.contents.iter().map(|&s| s as u64).sum();
        if sum > r.capacity as u64 || r.remaining as u64 != r.capacity as u64 - sum {
            return Err(PackError::InvalidInput(format!(
                "bin {}: remaining {} does not match capacity {} minus contents sum {}",
                r.id, r.remaining, r.capacity, sum
            )));
        }
        Ok(Self {
            id: r.id,
            capacity: r.capacity,
            remaining: r.remaining,
            contents: r.contents,
        })
    }
}

/// Result of one packing run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Packing {
    /// Capacity shared by every bin.
    pub capacity: u32,
    /// Volume lower bound `ceil(sum / capacity)` computed before placement.
    pub lower_bound: usize,
    /// Bins in creation order; `bins[i].id() == i`.
    pub bins: Vec<Bin>,
}

/// Statistics about packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Total number of bins used.
    pub num_bins: usize,
    /// Total number of items placed.
    pub num_items: usize,
    /// Volume lower bound for this input.
    pub lower_bound: usize,
    /// Sum of all bin capacities.
    pub total_capacity: u64,
    /// Sum of all item sizes.
    pub used_volume: u64,
    /// Occupancy ratio: used_volume / total_capacity (0.0 to 1.0).
    pub occupancy: f64,
    /// Smallest remaining space over all bins (0 when some bin is full).
    pub min_remaining: u32,
    /// Largest remaining space over all bins.
    pub max_remaining: u32,
}

impl Packing {
    /// Number of bins; always derived from the bin list.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Total size of all packed items.
    pub fn packed_volume(&self) -> u64 {
        self.bins.iter().map(|b| b.load() as u64).sum()
    }

    /// True when the heuristic reached the volume lower bound, which proves the result optimal.
    pub fn is_optimal_by_bound(&self) -> bool {
        self.bin_count() == self.lower_bound
    }

    /// Computes packing statistics for this result.
    pub fn stats(&self) -> PackStats {
        let num_bins = self.bins.len();
        let num_items = self.bins.iter().map(Bin::len).sum();
        let total_capacity = self.capacity as u64 * num_bins as u64;
        let used_volume = self.packed_volume();

        let occupancy = if total_capacity > 0 {
            used_volume as f64 / total_capacity as f64
        } else {
            0.0
        };

        let min_remaining = self.bins.iter().map(Bin::remaining).min().unwrap_or(0);
        let max_remaining = self.bins.iter().map(Bin::remaining).max().unwrap_or(0);

        PackStats {
            num_bins,
            num_items,
            lower_bound: self.lower_bound,
            total_capacity,
            used_volume,
            occupancy,
            min_remaining,
            max_remaining,
        }
    }
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Bins: {} (lower bound {}), Items: {}, Occupancy: {:.2}%, Capacity: {}, Used: {}, Wasted: {}",
            self.num_bins,
            self.lower_bound,
            self.num_items,
            self.occupancy * 100.0,
            self.total_capacity,
            self.used_volume,
            self.wasted_volume(),
        )
    }

    /// Returns unused space summed over all bins.
    pub fn wasted_volume(&self) -> u64 {
        self.total_capacity.saturating_sub(self.used_volume)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.total_capacity > 0 {
            (self.wasted_volume() as f64 / self.total_capacity as f64) * 100.0
        } else {
            0.0
        }
    }
}
