//! Agent.
use super::{Env, Policy, QSnapshot};
use crate::{record::Record, Transition};

/// Represents a trainable policy on an environment.
///
/// The agent is either in training mode, where exploration is active, or in
/// evaluation mode, where it only exploits its current estimates. The mode is
/// switched by the caller, typically [`Trainer`](crate::Trainer); agents never
/// change it on their own.
pub trait Agent<E: Env>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Performs an optimization step with a single transition.
    fn opt(&mut self, transition: &Transition<E>) {
        let _ = self.opt_with_record(transition);
    }

    /// Performs an optimization step and returns some information.
    fn opt_with_record(&mut self, transition: &Transition<E>) -> Record;

    /// Returns a copy of the current action-value estimates.
    fn q_snapshot(&self) -> QSnapshot;
}
