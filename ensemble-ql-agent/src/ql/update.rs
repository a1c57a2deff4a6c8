//! Targets and member selection of the ensemble Q-update.
use super::{UpdateMode, UpdateType};
use crate::table::EnsembleTable;
use rand::Rng;

/// Target of each member for a transition to `next_state`.
///
/// Terminal transitions do not bootstrap: every target equals `reward`.
pub(super) fn targets(
    q: &EnsembleTable,
    update_type: &UpdateType,
    discount_factor: f64,
    reward: f64,
    next_state: usize,
    is_terminated: bool,
) -> Vec<f64> {
    if is_terminated {
        return vec![reward; q.len()];
    }

    let maxes = q.max_per_member(next_state);
    let mean = maxes.iter().sum::<f64>() / maxes.len() as f64;
    match update_type {
        UpdateType::Mean => vec![reward + discount_factor * mean; q.len()],
        UpdateType::Distributional => maxes
            .iter()
            .map(|m| reward + discount_factor * m)
            .collect(),
        UpdateType::Weighted { mixing } => maxes
            .iter()
            .map(|m| reward + discount_factor * (mixing * m + (1.0 - mixing) * mean))
            .collect(),
    }
}

/// Indices of the members to update, in increasing order. Never empty.
pub(super) fn select_members(n: usize, update_mode: &UpdateMode, rng: &mut impl Rng) -> Vec<usize> {
    match update_mode {
        UpdateMode::Deterministic => (0..n).collect(),
        UpdateMode::Randomized { mask_prob } => {
            let selected: Vec<usize> = (0..n).filter(|_| rng.gen_bool(*mask_prob)).collect();
            match selected.is_empty() {
                true => vec![rng.gen_range(0..n)],
                false => selected,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use rand::{rngs::SmallRng, SeedableRng};

    fn ensemble() -> EnsembleTable {
        // Maxima in state 1: 2.0 and 4.0
        let mut t0 = Table::new(2, 2, 0.0);
        t0.set(1, 0, 2.0);
        let mut t1 = Table::new(2, 2, 0.0);
        t1.set(1, 1, 4.0);
        EnsembleTable::new(vec![t0, t1]).unwrap()
    }

    #[test]
    fn test_targets() {
        let q = ensemble();
        assert_eq!(targets(&q, &UpdateType::Mean, 0.5, 1.0, 1, false), vec![2.5, 2.5]);
        assert_eq!(
            targets(&q, &UpdateType::Distributional, 0.5, 1.0, 1, false),
            vec![2.0, 3.0]
        );
        assert_eq!(
            targets(&q, &UpdateType::Weighted { mixing: 0.5 }, 0.5, 1.0, 1, false),
            vec![2.25, 2.75]
        );
    }

    #[test]
    fn test_weighted_extremes() {
        let q = ensemble();
        let t0 = targets(&q, &UpdateType::Weighted { mixing: 0.0 }, 0.5, 1.0, 1, false);
        assert_eq!(t0, targets(&q, &UpdateType::Mean, 0.5, 1.0, 1, false));
        let t1 = targets(&q, &UpdateType::Weighted { mixing: 1.0 }, 0.5, 1.0, 1, false);
        assert_eq!(t1, targets(&q, &UpdateType::Distributional, 0.5, 1.0, 1, false));
    }

    #[test]
    fn test_terminal_targets() {
        let q = ensemble();
        for update_type in [UpdateType::Mean, UpdateType::Distributional] {
            assert_eq!(targets(&q, &update_type, 0.5, 3.0, 1, true), vec![3.0, 3.0]);
        }
    }

    #[test]
    fn test_select_members() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(select_members(3, &UpdateMode::Deterministic, &mut rng), vec![0, 1, 2]);
        assert_eq!(
            select_members(3, &UpdateMode::Randomized { mask_prob: 1.0 }, &mut rng),
            vec![0, 1, 2]
        );

        // An empty mask falls back to one uniformly drawn member
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            let ixs = select_members(3, &UpdateMode::Randomized { mask_prob: 0.0 }, &mut rng);
            assert_eq!(ixs.len(), 1);
            counts[ixs[0]] += 1;
        }
        assert!(counts.iter().all(|c| *c > 800), "{:?}", counts);

        for _ in 0..100 {
            let ixs = select_members(5, &UpdateMode::Randomized { mask_prob: 0.2 }, &mut rng);
            assert!(!ixs.is_empty());
        }
    }
}
