use crate::{Probability, Utility};

/// regret-based pruning (Brown & Sandholm, "Regret-Based Pruning in
/// Extensive-Form Games"; used at scale by Pluribus, Brown & Sandholm,
/// "Superhuman AI for multiplayer poker", Science 2019). Once an action's
/// accumulated regret drops below `threshold`, the traverser skips
/// recursing into it most of the time -- still exploring it with
/// probability `explore` so a pruned action can recover if the game state
/// around it shifts. Pruning only activates after `warmup` iterations, so
/// early, still-uninformative regret estimates can't prune anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prune {
    pub threshold: Utility,
    pub explore: Probability,
    pub warmup: usize,
}

impl Prune {
    /// the teacher's Pluribus-style defaults (`PRUNING_THRESHOLD`,
    /// `PRUNING_EXPLORE`, `PRUNING_WARMUP`).
    pub fn pluribus() -> Self {
        Self {
            threshold: crate::PRUNING_THRESHOLD,
            explore: crate::PRUNING_EXPLORE,
            warmup: crate::PRUNING_WARMUP,
        }
    }

    /// whether, at `epoch`, an action with `regret` accumulated so far
    /// should be skipped -- subject to the `explore` escape hatch.
    pub fn should_skip(&self, epoch: usize, regret: Utility, rng: &mut impl rand::Rng) -> bool {
        if epoch < self.warmup || regret >= self.threshold {
            return false;
        }
        !rng.random_bool(self.explore as f64)
    }
}
