//! Bootstrapped policy.
use crate::{table::EnsembleTable, util::argmax_random_tie};
use rand::Rng;

/// Acts greedily with respect to a single member (head) of the ensemble.
///
/// A new head is drawn uniformly at the start of every training episode and kept
/// for the whole episode.
#[derive(Debug, Clone)]
pub struct BootPolicy {
    n_heads: usize,
    head: usize,
}

impl BootPolicy {
    /// Constructs the policy with a randomly chosen initial head.
    pub fn new(n_heads: usize, rng: &mut impl Rng) -> Self {
        let n_heads = n_heads.max(1);
        Self {
            n_heads,
            head: rng.gen_range(0..n_heads),
        }
    }

    /// The head currently followed.
    pub fn head(&self) -> usize {
        self.head
    }

    pub(super) fn sample_head(&mut self, rng: &mut impl Rng) {
        self.head = rng.gen_range(0..self.n_heads);
    }

    pub(super) fn action(&mut self, q: &EnsembleTable, state: usize, rng: &mut impl Rng) -> usize {
        argmax_random_tie(q.member(self.head).row(state), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_heads_are_sampled_uniformly() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut p = BootPolicy::new(4, &mut rng);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            p.sample_head(&mut rng);
            counts[p.head()] += 1;
        }
        assert!(counts.iter().all(|c| *c > 850 && *c < 1150), "{:?}", counts);
    }

    #[test]
    fn test_follows_head() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut t0 = Table::new(1, 2, 0.0);
        t0.set(0, 0, 1.0);
        let mut t1 = Table::new(1, 2, 0.0);
        t1.set(0, 1, 1.0);
        let q = EnsembleTable::new(vec![t0, t1]).unwrap();

        let mut p = BootPolicy::new(2, &mut rng);
        for _ in 0..20 {
            p.sample_head(&mut rng);
            let head = p.head();
            assert_eq!(p.action(&q, 0, &mut rng), head);
        }
    }
}
