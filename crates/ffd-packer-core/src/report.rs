use crate::error::{PackError, Result};
use crate::model::Packing;
use serde_json::{Value, json};
use std::fmt::Write as _;

/// Plain-text report: total bin count, then one line per bin with its index and items.
///
/// ```text
/// 2 bins in total are required.
/// Bin 0 contains the item(s): {4, 4} (remaining 0)
/// Bin 1 contains the item(s): {4, 4} (remaining 0)
/// ```
pub fn to_text(packing: &Packing) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} bins in total are required.", packing.bin_count());
    for bin in &packing.bins {
        let items = bin
            .contents()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "Bin {} contains the item(s): {{{}}} (remaining {})",
            bin.id(),
            items,
            bin.remaining()
        );
    }
    out
}

/// Serialize the packing as `{ capacity, lowerBound, binCount, bins: [{ id, items, load, remaining }] }`.
/// Also used as the context for template rendering.
pub fn to_json(packing: &Packing) -> Value {
    let bins: Vec<Value> = packing
        .bins
        .iter()
        .map(|b| {
            json!({
                "id": b.id(),
                "items": b.contents(),
                "load": b.load(),
                "remaining": b.remaining(),
            })
        })
        .collect();
    json!({
        "capacity": packing.capacity,
        "lowerBound": packing.lower_bound,
        "binCount": packing.bin_count(),
        "bins": bins,
    })
}

/// Pretty-printed [`to_json`].
pub fn to_json_string(packing: &Packing) -> Result<String> {
    serde_json::to_string_pretty(&to_json(packing)).map_err(|e| PackError::Encode(e.to_string()))
}
