//! Fill strategies.
//!
//! A fill strategy turns an [`AssetSelection`] into a raw play sequence
//! that covers the time budget. Two strategies exist:
//!
//! - [`ContractBackedFill`]: contract obligations first, then fillers in
//!   priority order cycled until the remaining budget is used up, then
//!   even distribution of the contract entries.
//! - [`PureFillerShuffle`]: no contracts; the whole budget is filled with
//!   randomly ordered fillers, never repeating the previous pick when an
//!   alternative exists.
//!
//! [`FillPolicy`] picks between them based on whether contracts exist.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt::Debug;

use super::distribute::distribute_evenly;
use crate::models::{Asset, AssetId};
use crate::selection::AssetSelection;

/// Budget and safety bound for one fill run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillLimits {
    /// Target playback time (s).
    pub budget_secs: f64,
    /// Upper bound on sequence entries (and loop iterations).
    pub max_entries: usize,
}

impl Default for FillLimits {
    fn default() -> Self {
        Self {
            budget_secs: crate::HOUR_SECS,
            max_entries: crate::DEFAULT_MAX_ENTRIES,
        }
    }
}

/// A strategy that builds a play sequence from selected assets.
pub trait FillStrategy: Debug {
    /// Strategy name for logs.
    fn name(&self) -> &'static str;

    /// Builds the sequence.
    ///
    /// Implementations never fail: an empty selection yields an empty
    /// sequence, and hitting `max_entries` returns what was built so far.
    fn fill<R: Rng>(
        &self,
        selection: &AssetSelection,
        limits: &FillLimits,
        rng: &mut R,
    ) -> Vec<AssetId>;
}

/// Contract block, cyclic filler padding, even distribution.
///
/// # Algorithm
/// 1. Emit every contract id `play_count` times, catalogue order.
/// 2. `used = Σ duration × play_count`; remaining = `max(0, budget - used)`.
/// 3. Cycle over the fillers in selection order, appending each and
///    subtracting its duration until remaining ≤ 0 or the sequence holds
///    `max_entries` entries. Fillers without positive duration are
///    skipped and the cycle keeps going past them; only a full lap
///    without a usable filler stops the loop. A skip after the first lap
///    does not end padding early, so `[10 (100 s), 11 (0 s)]` over 300 s
///    yields `[10, 10, 10]`.
/// 4. Spread the contract entries evenly over the result.
///
/// Contracts without a duration are still emitted but consume no budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractBackedFill;

impl FillStrategy for ContractBackedFill {
    fn name(&self) -> &'static str {
        "contract-backed"
    }

    fn fill<R: Rng>(
        &self,
        selection: &AssetSelection,
        limits: &FillLimits,
        _rng: &mut R,
    ) -> Vec<AssetId> {
        let mut sequence = Vec::new();
        for contract in &selection.contracts {
            for _ in 0..contract.play_count() {
                sequence.push(contract.id);
            }
        }

        let used: f64 = selection.contracts.iter().map(Asset::hourly_load_secs).sum();
        let remaining = (limits.budget_secs - used).max(0.0);
        if used > limits.budget_secs {
            tracing::warn!(
                used_secs = used,
                budget_secs = limits.budget_secs,
                "Contract load exceeds the time budget"
            );
        }

        fill_cyclic(&mut sequence, &selection.fillers, remaining, limits.max_entries);

        let priority: HashSet<AssetId> = selection.contracts.iter().map(|a| a.id).collect();
        distribute_evenly(&sequence, &priority)
    }
}

/// Appends fillers round-robin until `remaining` is used up.
fn fill_cyclic(sequence: &mut Vec<AssetId>, fillers: &[Asset], mut remaining: f64, cap: usize) {
    let mut cursor = 0usize;
    let mut skipped_in_a_row = 0usize;

    while remaining > 0.0 && !fillers.is_empty() && sequence.len() < cap {
        let filler = &fillers[cursor % fillers.len()];
        cursor += 1;

        let duration = filler.duration_secs();
        if duration <= 0.0 {
            skipped_in_a_row += 1;
            if skipped_in_a_row >= fillers.len() {
                break;
            }
            continue;
        }

        skipped_in_a_row = 0;
        sequence.push(filler.id);
        remaining -= duration;
    }
}

/// Random filler rotation for tariffs without contracts.
///
/// # Algorithm
/// Candidates are the fillers with positive duration, one per id. The
/// candidate pool is shuffled and consumed in order; when exhausted it is
/// reshuffled, and if the new head equals the previous pick it is swapped
/// with a random other slot. Stops once the budget is covered or after
/// `max_entries` picks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PureFillerShuffle;

impl FillStrategy for PureFillerShuffle {
    fn name(&self) -> &'static str {
        "pure-filler-shuffle"
    }

    fn fill<R: Rng>(
        &self,
        selection: &AssetSelection,
        limits: &FillLimits,
        rng: &mut R,
    ) -> Vec<AssetId> {
        let mut seen = HashSet::new();
        let mut pool: Vec<&Asset> = selection
            .fillers
            .iter()
            .filter(|a| a.duration_secs() > 0.0 && seen.insert(a.id))
            .collect();

        let mut sequence = Vec::new();
        if pool.is_empty() {
            return sequence;
        }

        let mut remaining = limits.budget_secs;
        let mut cursor = pool.len();
        let mut previous: Option<AssetId> = None;
        let mut iterations = 0usize;

        while remaining > 0.0 && iterations < limits.max_entries {
            iterations += 1;

            if cursor == pool.len() {
                pool.shuffle(rng);
                cursor = 0;
                if pool.len() > 1 && previous == Some(pool[0].id) {
                    let other = rng.random_range(1..pool.len());
                    pool.swap(0, other);
                }
            }

            let pick = pool[cursor];
            cursor += 1;
            sequence.push(pick.id);
            remaining -= pick.duration_secs();
            previous = Some(pick.id);
        }

        sequence
    }
}

/// Strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPolicy {
    /// [`ContractBackedFill`].
    ContractBacked,
    /// [`PureFillerShuffle`].
    PureFillerShuffle,
}

impl FillPolicy {
    /// Picks the policy for a selection: contract-backed iff contracts exist.
    pub fn for_selection(selection: &AssetSelection) -> Self {
        if selection.has_contracts() {
            FillPolicy::ContractBacked
        } else {
            FillPolicy::PureFillerShuffle
        }
    }
}

impl FillStrategy for FillPolicy {
    fn name(&self) -> &'static str {
        match self {
            FillPolicy::ContractBacked => ContractBackedFill.name(),
            FillPolicy::PureFillerShuffle => PureFillerShuffle.name(),
        }
    }

    fn fill<R: Rng>(
        &self,
        selection: &AssetSelection,
        limits: &FillLimits,
        rng: &mut R,
    ) -> Vec<AssetId> {
        match self {
            FillPolicy::ContractBacked => ContractBackedFill.fill(selection, limits, rng),
            FillPolicy::PureFillerShuffle => PureFillerShuffle.fill(selection, limits, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn count(seq: &[AssetId], id: AssetId) -> usize {
        seq.iter().filter(|&&x| x == id).count()
    }

    fn standard_selection() -> AssetSelection {
        AssetSelection::new(
            vec![Asset::contract(1).with_duration(15.0).with_plays_per_hour(3)],
            vec![
                Asset::filler(10).with_duration(30.0),
                Asset::filler(11).with_duration(25.0),
            ],
        )
    }

    #[test]
    fn test_contract_backed_worked_example() {
        let mut rng = SmallRng::seed_from_u64(1);
        let seq = ContractBackedFill.fill(&standard_selection(), &FillLimits::default(), &mut rng);

        // 3555 s of fillers alternating 30/25: 64 pairs = 3520,
        // then 30 → 3550, then 25 → 3575
        assert_eq!(count(&seq, 1), 3);
        assert_eq!(count(&seq, 10), 65);
        assert_eq!(count(&seq, 11), 65);
        assert_eq!(seq.len(), 133);

        // n = 133, k = 3 → targets 0, 44, 88
        assert_eq!(seq[0], 1);
        assert_eq!(seq[44], 1);
        assert_eq!(seq[88], 1);
    }

    #[test]
    fn test_contract_backed_budget_overshoot_bounded() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sel = standard_selection();
        let seq = ContractBackedFill.fill(&sel, &FillLimits::default(), &mut rng);
        let total: f64 = seq
            .iter()
            .map(|&id| match id {
                1 => 15.0,
                10 => 30.0,
                _ => 25.0,
            })
            .sum();
        assert!(total >= 3600.0);
        assert!(total < 3600.0 + 30.0);
    }

    #[test]
    fn test_contract_backed_without_fillers() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sel = AssetSelection::new(
            vec![
                Asset::contract(1).with_duration(10.0).with_plays_per_hour(2),
                Asset::contract(2).with_duration(20.0),
            ],
            vec![],
        );
        let seq = ContractBackedFill.fill(&sel, &FillLimits::default(), &mut rng);
        assert_eq!(seq, vec![1, 1, 2]);
    }

    #[test]
    fn test_contract_oversubscription_keeps_all_plays() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sel = AssetSelection::new(
            vec![Asset::contract(1).with_duration(600.0).with_plays_per_hour(7)],
            vec![Asset::filler(10).with_duration(30.0)],
        );
        let seq = ContractBackedFill.fill(&sel, &FillLimits::default(), &mut rng);
        // 4200 s of contracts: no room for fillers, no plays dropped
        assert_eq!(seq, vec![1; 7]);
    }

    #[test]
    fn test_zero_duration_contract_still_emitted() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sel = AssetSelection::new(
            vec![Asset::contract(1).with_plays_per_hour(2)],
            vec![Asset::filler(10).with_duration(1200.0)],
        );
        let seq = ContractBackedFill.fill(&sel, &FillLimits::default(), &mut rng);
        // Full 3600 s still go to fillers
        assert_eq!(count(&seq, 1), 2);
        assert_eq!(count(&seq, 10), 3);
    }

    #[test]
    fn test_cyclic_skips_durationless_fillers() {
        let mut seq = Vec::new();
        let fillers = vec![
            Asset::filler(10).with_duration(100.0),
            Asset::filler(11),
            Asset::filler(12).with_duration(50.0),
        ];
        fill_cyclic(&mut seq, &fillers, 300.0, 5000);
        assert_eq!(seq, vec![10, 12, 10, 12]);
    }

    #[test]
    fn test_cyclic_keeps_cycling_past_skip_after_first_lap() {
        let mut seq = Vec::new();
        let fillers = vec![Asset::filler(10).with_duration(100.0), Asset::filler(11)];
        fill_cyclic(&mut seq, &fillers, 300.0, 5000);
        assert_eq!(seq, vec![10, 10, 10]);
    }

    #[test]
    fn test_cyclic_stops_without_usable_filler() {
        let mut seq = vec![1];
        let fillers = vec![Asset::filler(10), Asset::filler(11).with_duration(0.0)];
        fill_cyclic(&mut seq, &fillers, 3600.0, 5000);
        assert_eq!(seq, vec![1]);
    }

    #[test]
    fn test_cyclic_respects_entry_cap() {
        let mut seq = Vec::new();
        let fillers = vec![Asset::filler(10).with_duration(0.001)];
        fill_cyclic(&mut seq, &fillers, 3600.0, 5000);
        assert_eq!(seq.len(), 5000);
    }

    #[test]
    fn test_shuffle_alternates_two_fillers() {
        let mut rng = SmallRng::seed_from_u64(7);
        let sel = AssetSelection::new(
            vec![],
            vec![
                Asset::filler(10).with_duration(30.0),
                Asset::filler(11).with_duration(25.0),
            ],
        );
        let seq = PureFillerShuffle.fill(&sel, &FillLimits::default(), &mut rng);

        assert!(seq.len() >= 120 && seq.len() <= 131, "len = {}", seq.len());
        assert!(seq.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_shuffle_no_adjacent_repeats_many_fillers() {
        let fillers: Vec<Asset> = (0..5)
            .map(|i| Asset::filler(100 + i).with_duration(10.0 + i as f64))
            .collect();
        let sel = AssetSelection::new(vec![], fillers);

        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let seq = PureFillerShuffle.fill(&sel, &FillLimits::default(), &mut rng);
            assert!(seq.windows(2).all(|w| w[0] != w[1]), "seed {seed}");
        }
    }

    #[test]
    fn test_shuffle_is_deterministic_per_seed() {
        let sel = AssetSelection::new(
            vec![],
            vec![
                Asset::filler(10).with_duration(30.0),
                Asset::filler(11).with_duration(25.0),
                Asset::filler(12).with_duration(20.0),
            ],
        );
        let limits = FillLimits::default();
        let a = PureFillerShuffle.fill(&sel, &limits, &mut SmallRng::seed_from_u64(3));
        let b = PureFillerShuffle.fill(&sel, &limits, &mut SmallRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_single_filler_repeats() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sel = AssetSelection::new(vec![], vec![Asset::filler(10).with_duration(600.0)]);
        let seq = PureFillerShuffle.fill(&sel, &FillLimits::default(), &mut rng);
        assert_eq!(seq, vec![10; 6]);
    }

    #[test]
    fn test_shuffle_ignores_durationless_and_duplicates() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sel = AssetSelection::new(
            vec![],
            vec![
                Asset::filler(10).with_duration(900.0),
                Asset::filler(10).with_duration(900.0),
                Asset::filler(11),
            ],
        );
        let seq = PureFillerShuffle.fill(&sel, &FillLimits::default(), &mut rng);
        assert_eq!(seq, vec![10; 4]);
    }

    #[test]
    fn test_shuffle_empty_selection() {
        let mut rng = SmallRng::seed_from_u64(1);
        let empty = AssetSelection::default();
        let seq = PureFillerShuffle.fill(&empty, &FillLimits::default(), &mut rng);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_shuffle_iteration_cap() {
        let mut rng = SmallRng::seed_from_u64(1);
        let sel = AssetSelection::new(vec![], vec![Asset::filler(10).with_duration(1e-9)]);
        let limits = FillLimits {
            budget_secs: 3600.0,
            max_entries: 5000,
        };
        let seq = PureFillerShuffle.fill(&sel, &limits, &mut rng);
        assert_eq!(seq.len(), 5000);
    }

    #[test]
    fn test_policy_selection() {
        assert_eq!(
            FillPolicy::for_selection(&standard_selection()),
            FillPolicy::ContractBacked
        );
        assert_eq!(
            FillPolicy::for_selection(&AssetSelection::default()),
            FillPolicy::PureFillerShuffle
        );
        assert_eq!(FillPolicy::ContractBacked.name(), "contract-backed");
    }
}
