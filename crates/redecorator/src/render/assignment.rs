//! Pack-to-instance assignment
//!
//! Every call reshuffles the pack order, then deals packs to the live
//! instances round-robin. Within one call the packs are used as evenly as
//! possible; across calls the order differs.

use rand::Rng;

use crate::assets::PackEntry;

/// Fisher–Yates shuffle in place
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A uniformly random permutation of `0..count`
pub fn shuffled_order<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    shuffle(&mut order, rng);
    order
}

/// Pair each instance with a pack
///
/// The pack order is reshuffled, then instance `k` gets pack
/// `order[k % packs.len()]`. Returns nothing when `packs` is empty.
pub fn assign_round_robin<'p, T: Clone, R: Rng + ?Sized>(
    instances: &[T],
    packs: &'p [PackEntry],
    rng: &mut R,
) -> Vec<(T, &'p PackEntry)> {
    if packs.is_empty() {
        return Vec::new();
    }

    let order = shuffled_order(packs.len(), rng);
    instances
        .iter()
        .enumerate()
        .map(|(pack_index, instance)| (instance.clone(), &packs[order[pack_index % order.len()]]))
        .collect()
}
