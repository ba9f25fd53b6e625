use ffd_packer_core::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_case(rng: &mut StdRng) -> (Vec<u32>, u32) {
    let capacity = rng.gen_range(1..=200);
    let count = rng.gen_range(0..=120);
    let items = (0..count).map(|_| rng.gen_range(1..=capacity)).collect();
    (items, capacity)
}

fn sorted(mut v: Vec<u32>) -> Vec<u32> {
    v.sort_unstable();
    v
}

#[test]
fn random_inputs_keep_all_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..300 {
        let (items, capacity) = random_case(&mut rng);
        let original = items.clone();
        let packing = pack(&items, capacity).expect("valid random input");

        // input untouched
        assert_eq!(items, original);

        assert_eq!(packing.lower_bound, lower_bound(&items, capacity));
        assert!(packing.bin_count() >= packing.lower_bound);

        let mut placed = Vec::new();
        for (i, bin) in packing.bins.iter().enumerate() {
            assert_eq!(bin.id(), i);
            assert_eq!(bin.capacity(), capacity);
            let sum: u64 = bin.contents().iter().map(|&s| s as u64).sum();
            assert!(sum <= capacity as u64);
            assert_eq!(bin.remaining() as u64, capacity as u64 - sum);
            assert!(!bin.is_empty());
            placed.extend_from_slice(bin.contents());
        }
        assert_eq!(sorted(placed), sorted(items));
    }
}

#[test]
fn working_order_is_non_increasing() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let (items, _) = random_case(&mut rng);
        let work = sorted_desc(&items);
        assert!(work.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn first_fit_property_holds() {
    // an item in bin j did not fit any earlier bin at the moment it was placed;
    // replay the non-increasing order to check it
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let (items, capacity) = random_case(&mut rng);
        let packing = pack(&items, capacity).unwrap();
        let mut replay: Vec<Bin> = Vec::new();
        for item in sorted_desc(&items) {
            let idx = match replay.iter().position(|b| b.can_fit(item)) {
                Some(i) => i,
                None => {
                    replay.push(Bin::new(replay.len(), capacity));
                    replay.len() - 1
                }
            };
            replay[idx].add(item);
        }
        assert_eq!(replay, packing.bins);
    }
}

#[test]
fn unseeded_run_matches_seeded_run() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let (items, capacity) = random_case(&mut rng);
        let seeded = pack_items(&items, PackerConfig::builder().capacity(capacity).build()).unwrap();
        let lazy = pack_items(
            &items,
            PackerConfig::builder()
                .capacity(capacity)
                .seed_lower_bound(false)
                .build(),
        )
        .unwrap();
        assert_eq!(seeded, lazy);
    }
}
