use ffd_packer_core::prelude::*;

#[test]
fn test_pack_stats_basic() {
    let packing = pack(&[6, 6, 6], 10).expect("packing should succeed");
    let stats = packing.stats();

    assert_eq!(stats.num_bins, 3);
    assert_eq!(stats.num_items, 3);
    assert_eq!(stats.lower_bound, 2);
    assert_eq!(stats.total_capacity, 30);
    assert_eq!(stats.used_volume, 18);
    assert!((stats.occupancy - 0.6).abs() < 1e-9);
    assert_eq!(stats.wasted_volume(), 12);
    assert!((stats.waste_percentage() - 40.0).abs() < 1e-9);
    assert_eq!(stats.min_remaining, 4);
    assert_eq!(stats.max_remaining, 4);
}

#[test]
fn test_pack_stats_full_bins() {
    let stats = pack(&[4, 4, 4, 4], 8).unwrap().stats();
    assert_eq!(stats.occupancy, 1.0);
    assert_eq!(stats.wasted_volume(), 0);
    assert_eq!(stats.min_remaining, 0);
}

#[test]
fn test_pack_stats_empty() {
    let stats = pack(&[], 5).unwrap().stats();
    assert_eq!(stats.num_bins, 0);
    assert_eq!(stats.occupancy, 0.0);
    assert_eq!(stats.waste_percentage(), 0.0);
    assert_eq!(stats.max_remaining, 0);
}

#[test]
fn test_pack_stats_summary() {
    let summary = pack(&[6, 6, 6], 10).unwrap().stats().summary();
    assert!(summary.contains("Bins: 3"));
    assert!(summary.contains("lower bound 2"));
    assert!(summary.contains("60.00%"));
}
