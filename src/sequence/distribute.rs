//! Even distribution of priority entries across a sequence.
//!
//! # Algorithm
//!
//! 1. Split the sequence into priority entries and the rest, both in
//!    original relative order.
//! 2. Target positions are `floor(i * n / k)` for `i in 0..k`, where `n` is
//!    the sequence length and `k` the number of priority entries.
//! 3. Walk `0..n`: a target position takes the next priority entry while
//!    any remain, every other position takes the next remaining entry.
//!
//! Entries left over when the walk ends are dropped. Since priority
//! entries come from the sequence itself, `n / k >= 1` and targets are
//! distinct, so in practice nothing is lost.
//!
//! # Complexity
//! O(n) with hashed membership tests.

use std::collections::HashSet;

use crate::models::AssetId;

/// Spreads entries whose id is in `priority` evenly over the sequence.
///
/// Returns the sequence unchanged when `priority` is empty or none of its
/// ids occur.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use signage_schedule::sequence::distribute_evenly;
///
/// let seq = vec![1, 1, 1, 9, 9, 9, 9, 9, 9];
/// let priority: HashSet<i64> = [1].into_iter().collect();
/// assert_eq!(
///     distribute_evenly(&seq, &priority),
///     vec![1, 9, 9, 1, 9, 9, 1, 9, 9],
/// );
/// ```
pub fn distribute_evenly(sequence: &[AssetId], priority: &HashSet<AssetId>) -> Vec<AssetId> {
    if priority.is_empty() {
        return sequence.to_vec();
    }

    let (priority_items, other_items): (Vec<AssetId>, Vec<AssetId>) =
        sequence.iter().partition(|&&id| priority.contains(&id));

    if priority_items.is_empty() {
        return sequence.to_vec();
    }

    let step = sequence.len() as f64 / priority_items.len() as f64;
    let targets: HashSet<usize> = (0..priority_items.len())
        .map(|i| (i as f64 * step).floor() as usize)
        .collect();

    let mut result = Vec::with_capacity(sequence.len());
    let mut priority_iter = priority_items.into_iter();
    let mut other_iter = other_items.into_iter();
    let mut priority_left = true;

    for position in 0..sequence.len() {
        if priority_left && targets.contains(&position) {
            match priority_iter.next() {
                Some(id) => {
                    result.push(id);
                    continue;
                }
                None => priority_left = false,
            }
        }
        if let Some(id) = other_iter.next() {
            result.push(id);
        }
    }

    let dropped = other_iter.count();
    if dropped > 0 {
        tracing::debug!(dropped, "Distribution dropped trailing entries");
    }

    result
}
