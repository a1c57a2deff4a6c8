//! Utilities shared by the policies and the update.
use rand::{seq::SliceRandom, Rng};

/// Index of the maximum value, ties broken uniformly at random.
///
/// Panics if `values` is empty.
pub(crate) fn argmax_random_tie<T>(values: &[T], rng: &mut impl Rng) -> usize
where
    T: PartialOrd + Copy,
{
    assert!(!values.is_empty(), "argmax of an empty slice");
    let mut best = values[0];
    let mut ixs = vec![0];
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > best {
            best = *v;
            ixs.clear();
            ixs.push(i);
        } else if *v == best {
            ixs.push(i);
        }
    }
    // `ixs` has at least one element
    *ixs.choose(rng).unwrap_or(&ixs[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_unique_max() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(argmax_random_tie(&[0.0, 2.0, 1.0], &mut rng), 1);
        assert_eq!(argmax_random_tie(&[3usize, 2, 1], &mut rng), 0);
    }

    #[test]
    fn test_ties_are_broken_uniformly() {
        let mut rng = SmallRng::seed_from_u64(0);
        let values = [1.0, 0.0, 1.0, 1.0];
        let mut counts = [0usize; 4];
        for _ in 0..3000 {
            counts[argmax_random_tie(&values, &mut rng)] += 1;
        }
        assert_eq!(counts[1], 0);
        for i in [0, 2, 3] {
            assert!(counts[i] > 800 && counts[i] < 1200, "{:?}", counts);
        }
    }
}
