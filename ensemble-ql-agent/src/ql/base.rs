//! Ensemble Q-learning agent.
use super::{update, EnsembleQlConfig, UpdateMode, UpdateType};
use crate::{
    parameter::ParameterTable,
    policy::EnsemblePolicy,
    table::EnsembleTable,
};
use anyhow::Result;
use ensemble_ql_core::{
    record::{Record, RecordValue},
    Act, Agent, Configurable, Env, Obs, Policy, QSnapshot, Transition,
};
use log::{info, trace};
use rand::{rngs::SmallRng, SeedableRng};
use std::marker::PhantomData;

/// Tabular Q-learning with an ensemble of action-value tables.
///
/// The ensemble is owned by the agent. The exploration policy gets a shared
/// reference to it when choosing an action, and only [`EnsembleQl::update`] mutates it.
/// All random choices are drawn from a generator seeded by the configuration.
pub struct EnsembleQl<E: Env> {
    q: EnsembleTable,
    policy: EnsemblePolicy,
    learning_rate: ParameterTable,
    update_mode: UpdateMode,
    update_type: UpdateType,
    discount_factor: f64,
    train: bool,
    n_opts: usize,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

impl<E: Env> EnsembleQl<E> {
    /// The ensemble of action-value tables.
    pub fn q(&self) -> &EnsembleTable {
        &self.q
    }

    /// The exploration policy.
    pub fn policy(&self) -> &EnsemblePolicy {
        &self.policy
    }

    /// The number of updates performed so far.
    pub fn n_opts(&self) -> usize {
        self.n_opts
    }

    /// Updates the selected members of the ensemble with a transition.
    ///
    /// The learning rate of `(state, action)` is advanced once and shared by all
    /// updated members. Panics if an index is out of range or a target is not finite.
    pub fn update(
        &mut self,
        state: usize,
        action: usize,
        reward: f64,
        next_state: usize,
        is_terminated: bool,
    ) -> Record {
        let (n_states, n_actions) = (self.q.n_states(), self.q.n_actions());
        assert!(
            state < n_states && next_state < n_states,
            "State index out of range: state = {}, next_state = {}, n_states = {}",
            state,
            next_state,
            n_states
        );
        assert!(
            action < n_actions,
            "Action index {} out of range (n_actions = {})",
            action,
            n_actions
        );

        let targets = update::targets(
            &self.q,
            &self.update_type,
            self.discount_factor,
            reward,
            next_state,
            is_terminated,
        );
        let members = update::select_members(self.q.len(), &self.update_mode, &mut self.rng);
        let lr = self.learning_rate.next(state * n_actions + action);

        let mut td_error = 0.0;
        for &i in members.iter() {
            let target = targets[i];
            assert!(
                target.is_finite(),
                "Non-finite target {} for member {} (state = {}, action = {}, reward = {})",
                target,
                i,
                state,
                action,
                reward
            );
            let table = self.q.member_mut(i);
            let q = table.get(state, action);
            table.set(state, action, q + lr * (target - q));
            td_error += (target - q).abs();
        }
        td_error /= members.len() as f64;
        self.n_opts += 1;
        trace!(
            "Updated {} members at ({}, {}), lr = {}, td_error = {}",
            members.len(),
            state,
            action,
            lr,
            td_error
        );

        Record::from_slice(&[
            ("td_error", RecordValue::Scalar(td_error as f32)),
            ("learning_rate", RecordValue::Scalar(lr as f32)),
            ("n_updated", RecordValue::Scalar(members.len() as f32)),
        ])
    }
}

impl<E: Env> Configurable for EnsembleQl<E> {
    type Config = EnsembleQlConfig;

    /// Constructs the agent.
    ///
    /// Fails if the configuration is invalid, e.g., the policy cannot be used with the
    /// algorithm.
    fn build(config: Self::Config) -> Result<Self> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let q = config.table_init().build(
            config.n_approximators,
            config.n_states,
            config.n_actions,
            &mut rng,
        )?;
        let policy = EnsemblePolicy::build(
            &config.policy,
            config.n_states,
            config.n_approximators,
            &mut rng,
        )?;
        info!(
            "Build {} agent with {} policy, {} tables of {} states x {} actions",
            config.algorithm.name(),
            config.policy.name(),
            config.n_approximators,
            config.n_states,
            config.n_actions
        );

        Ok(Self {
            q,
            policy,
            learning_rate: ParameterTable::new(
                config.learning_rate,
                config.n_states * config.n_actions,
            ),
            update_mode: config.algorithm.update_mode(),
            update_type: config.algorithm.update_type(),
            discount_factor: config.discount_factor,
            train: true,
            n_opts: 0,
            rng,
            phantom: PhantomData,
        })
    }
}

impl<E> Policy<E> for EnsembleQl<E>
where
    E: Env,
    E::Act: From<usize>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        self.policy
            .action(&self.q, obs.index(), self.train, &mut self.rng)
            .into()
    }

    fn episode_start(&mut self) {
        self.policy.episode_start(self.train, &mut self.rng);
    }
}

impl<E> Agent<E> for EnsembleQl<E>
where
    E: Env,
    E::Act: From<usize>,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn opt_with_record(&mut self, transition: &Transition<E>) -> Record {
        self.update(
            transition.state.index(),
            transition.act.index(),
            transition.reward,
            transition.next_state.index(),
            transition.is_terminated,
        )
    }

    fn q_snapshot(&self) -> QSnapshot {
        QSnapshot {
            n_states: self.q.n_states(),
            n_actions: self.q.n_actions(),
            values: self.q.iter().map(|t| t.values().to_vec()).collect(),
        }
    }
}
