#![warn(missing_docs)]
//! Core components for tabular ensemble Q-learning.
//!
//! This crate provides the environment, policy and agent abstractions together with
//! the experiment loop ([`Trainer`]) that drives an agent on a finite MDP,
//! alternating training and evaluation phases.
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Agent, Configurable, Env, Info, MdpInfo, Obs, Policy, QSnapshot, Step, StepProcessor};

mod step_proc;
pub use step_proc::{SimpleStepProcessor, SimpleStepProcessorConfig, Transition};

mod scores;
pub use scores::{EpisodeStats, Scores};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod trainer;
pub use trainer::{EpochScores, Sampler, Trainer, TrainerConfig};

#[cfg(test)]
pub(crate) mod dummy;
