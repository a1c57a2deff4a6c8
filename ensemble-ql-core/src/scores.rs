//! Statistics of episode returns.
use crate::record::{Record, RecordValue};
use serde::{Deserialize, Serialize};

/// Summary of the episodes completed within a phase of an experiment.
///
/// Only complete episodes are taken into account. When no episode is completed,
/// all values are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Scores {
    /// Minimum of the undiscounted returns.
    pub min: f64,

    /// Maximum of the undiscounted returns.
    pub max: f64,

    /// Mean of the undiscounted returns.
    pub mean: f64,

    /// Standard deviation of the undiscounted returns.
    pub std: f64,

    /// Minimum of the discounted returns.
    pub disc_min: f64,

    /// Maximum of the discounted returns.
    pub disc_max: f64,

    /// Mean of the discounted returns.
    pub disc_mean: f64,

    /// Standard deviation of the discounted returns.
    pub disc_std: f64,

    /// Mean length of the episodes.
    pub mean_len: f64,

    /// The number of completed episodes.
    pub n_episodes: usize,
}

impl Scores {
    /// Converts the scores into a record, prefixing keys with `prefix`.
    pub fn to_record(&self, prefix: &str) -> Record {
        let s = |v: f64| RecordValue::Scalar(v as f32);
        Record::from_slice(&[
            (format!("{}_min_return", prefix), s(self.min)),
            (format!("{}_max_return", prefix), s(self.max)),
            (format!("{}_mean_return", prefix), s(self.mean)),
            (format!("{}_std_return", prefix), s(self.std)),
            (format!("{}_min_disc_return", prefix), s(self.disc_min)),
            (format!("{}_max_disc_return", prefix), s(self.disc_max)),
            (format!("{}_mean_disc_return", prefix), s(self.disc_mean)),
            (format!("{}_std_disc_return", prefix), s(self.disc_std)),
            (format!("{}_mean_episode_len", prefix), s(self.mean_len)),
            (format!("{}_n_episodes", prefix), s(self.n_episodes as f64)),
        ])
    }
}

/// Accumulates rewards step by step and keeps the returns of completed episodes.
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    gamma: f64,
    score: f64,
    disc_score: f64,
    episode_steps: usize,
    scores: Vec<f64>,
    disc_scores: Vec<f64>,
    lens: Vec<usize>,
}

fn min_max_mean_std(vs: &[f64]) -> (f64, f64, f64, f64) {
    let n = vs.len() as f64;
    let min = vs.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = vs.iter().sum::<f64>() / n;
    let var = vs.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (min, max, mean, var.sqrt())
}

impl EpisodeStats {
    /// Constructs an empty accumulator with discount factor `gamma`.
    pub fn new(gamma: f64) -> Self {
        Self {
            gamma,
            score: 0.0,
            disc_score: 0.0,
            episode_steps: 0,
            scores: vec![],
            disc_scores: vec![],
            lens: vec![],
        }
    }

    /// Adds the reward of a step. `is_done` closes the current episode.
    pub fn push(&mut self, reward: f64, is_done: bool) {
        self.score += reward;
        self.disc_score += reward * self.gamma.powi(self.episode_steps as i32);
        self.episode_steps += 1;

        if is_done {
            self.scores.push(self.score);
            self.disc_scores.push(self.disc_score);
            self.lens.push(self.episode_steps);
            self.score = 0.0;
            self.disc_score = 0.0;
            self.episode_steps = 0;
        }
    }

    /// The number of completed episodes.
    pub fn n_episodes(&self) -> usize {
        self.scores.len()
    }

    /// Computes the statistics of the completed episodes.
    pub fn scores(&self) -> Scores {
        if self.scores.is_empty() {
            return Scores::default();
        }

        let (min, max, mean, std) = min_max_mean_std(&self.scores);
        let (disc_min, disc_max, disc_mean, disc_std) = min_max_mean_std(&self.disc_scores);
        let mean_len = self.lens.iter().sum::<usize>() as f64 / self.lens.len() as f64;

        Scores {
            min,
            max,
            mean,
            std,
            disc_min,
            disc_max,
            disc_mean,
            disc_std,
            mean_len,
            n_episodes: self.scores.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_complete_episode() {
        let mut stats = EpisodeStats::new(0.9);
        stats.push(1.0, false);
        stats.push(1.0, false);
        assert_eq!(stats.scores(), Scores::default());
    }

    #[test]
    fn test_scores() {
        let mut stats = EpisodeStats::new(0.5);
        // Episode 1: rewards 1, 1 -> return 2, discounted 1 + 0.5
        stats.push(1.0, false);
        stats.push(1.0, true);
        // Episode 2: rewards 0, 0, 4 -> return 4, discounted 4 * 0.25
        stats.push(0.0, false);
        stats.push(0.0, false);
        stats.push(4.0, true);
        // Incomplete episode is ignored
        stats.push(100.0, false);

        let scores = stats.scores();
        assert_eq!(scores.n_episodes, 2);
        assert_eq!(scores.min, 2.0);
        assert_eq!(scores.max, 4.0);
        assert_eq!(scores.mean, 3.0);
        assert_eq!(scores.std, 1.0);
        assert_eq!(scores.disc_min, 1.0);
        assert_eq!(scores.disc_max, 1.5);
        assert_eq!(scores.disc_mean, 1.25);
        assert_eq!(scores.mean_len, 2.5);

        let record = scores.to_record("eval");
        assert_eq!(record.get_scalar("eval_mean_return").unwrap(), 3.0);
        assert_eq!(record.get_scalar("eval_n_episodes").unwrap(), 2.0);
    }
}
