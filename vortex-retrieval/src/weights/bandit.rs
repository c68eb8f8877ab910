//! Epsilon-greedy strategy selection over named weight profiles, driven by
//! accumulated feedback rewards.

use dashmap::DashMap;
use rand::Rng;
use tracing::{debug, info};

use vortex_core::models::WeightProfile;

/// Reward used for strategies that have never been tried.
const PRIOR_REWARD: f64 = 0.5;

/// The fixed strategy set the bandit chooses from.
pub(crate) fn strategies() -> Vec<WeightProfile> {
    vec![
        WeightProfile::named("admin_lookup", 0.2, 0.1, 0.1, 0.8, 40),
        WeightProfile::named("research_topics", 0.4, 0.15, 0.35, 0.1, 100),
        WeightProfile::named("entity_lookup", 0.2, 0.05, 0.05, 0.7, 30),
        WeightProfile::balanced(),
    ]
}

/// Look up one of the named strategies. Unknown names fall back to balanced.
pub(crate) fn strategy(name: &str) -> WeightProfile {
    strategies()
        .into_iter()
        .find(|s| s.name == name)
        .unwrap_or_else(WeightProfile::balanced)
}

/// Append-only per-strategy reward log, read as a running average.
/// Concurrent: feedback lands from request handlers while searches read.
#[derive(Default)]
pub struct RewardTracker {
    rewards: DashMap<String, Vec<f64>>,
}

impl RewardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reward(&self, strategy: &str, reward: f64) {
        self.rewards
            .entry(strategy.to_string())
            .or_default()
            .push(reward);
        info!(strategy, reward, "strategy reward recorded");
    }

    /// Running average; strategies without history sit at the neutral prior.
    pub fn average(&self, strategy: &str) -> f64 {
        match self.rewards.get(strategy) {
            Some(list) if !list.is_empty() => list.iter().sum::<f64>() / list.len() as f64,
            _ => PRIOR_REWARD,
        }
    }

    pub fn count(&self, strategy: &str) -> usize {
        self.rewards.get(strategy).map(|l| l.len()).unwrap_or(0)
    }
}

/// Epsilon-greedy: exploit the best running average with probability
/// `1 - ε`, explore uniformly with probability `ε`.
pub struct EpsilonGreedy {
    epsilon: f64,
    strategies: Vec<WeightProfile>,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon: epsilon.clamp(0.0, 1.0),
            strategies: strategies(),
        }
    }

    pub fn select(&self, tracker: &RewardTracker) -> WeightProfile {
        self.select_with(tracker, &mut rand::thread_rng())
    }

    /// Deterministically testable variant taking the RNG from the caller.
    pub fn select_with<R: Rng>(&self, tracker: &RewardTracker, rng: &mut R) -> WeightProfile {
        if rng.gen::<f64>() < self.epsilon {
            let pick = &self.strategies[rng.gen_range(0..self.strategies.len())];
            debug!(strategy = %pick.name, "bandit exploration");
            return pick.clone();
        }

        let best = self
            .strategies
            .iter()
            .max_by(|a, b| {
                tracker
                    .average(&a.name)
                    .partial_cmp(&tracker.average(&b.name))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .cloned()
            .unwrap_or_default();
        debug!(strategy = %best.name, avg = tracker.average(&best.name), "bandit exploitation");
        best
    }
}
