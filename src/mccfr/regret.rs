use crate::cards::Street;
use crate::gameplay::Action;
use crate::{Chips, Utility};

/// one row of the process-wide info-set table: the actions available at
/// this node, their accumulated regret and strategy weight, and the static
/// context captured when the node was first created (spec.md §3, §4.7).
#[derive(Debug, Clone)]
pub struct RegretNode {
    round: Street,
    seat: usize,
    abstraction: String,
    previous_actions: String,
    pot: Chips,
    actions: Vec<Action>,
    regret_sum: Vec<Utility>,
    strategy_sum: Vec<Utility>,
    update_count: u64,
}

impl RegretNode {
    pub fn new(
        actions: Vec<Action>,
        round: Street,
        seat: usize,
        abstraction: String,
        previous_actions: String,
        pot: Chips,
    ) -> Self {
        let n = actions.len();
        Self {
            round,
            seat,
            abstraction,
            previous_actions,
            pot,
            actions,
            regret_sum: vec![0.0; n],
            strategy_sum: vec![0.0; n],
            update_count: 0,
        }
    }

    pub fn round(&self) -> Street {
        self.round
    }
    pub fn seat(&self) -> usize {
        self.seat
    }
    pub fn abstraction(&self) -> &str {
        &self.abstraction
    }
    pub fn previous_actions(&self) -> &str {
        &self.previous_actions
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// regret matching: positive regret share, uniform if nothing is
    /// positive yet (spec.md §4.7).
    pub fn current_strategy(&self) -> Vec<Utility> {
        let positive: Vec<Utility> = self.regret_sum.iter().map(|&r| r.max(0.0)).collect();
        let total: Utility = positive.iter().sum();
        if total > 0.0 {
            positive.into_iter().map(|r| r / total).collect()
        } else {
            vec![1.0 / self.actions.len() as Utility; self.actions.len()]
        }
    }

    /// the read-out strategy used for persistence and play (spec.md §4.7
    /// "average strategy").
    pub fn average_strategy(&self) -> Vec<Utility> {
        let total: Utility = self.strategy_sum.iter().sum();
        if total > 0.0 {
            self.strategy_sum.iter().map(|&s| s / total).collect()
        } else {
            vec![1.0 / self.actions.len() as Utility; self.actions.len()]
        }
    }

    pub fn add_regret(&mut self, index: usize, delta: Utility) {
        self.regret_sum[index] += delta;
    }
    pub fn add_strategy(&mut self, index: usize, delta: Utility) {
        self.strategy_sum[index] += delta;
    }

    /// scale every accumulated regret by `factor`, as a discount schedule
    /// applies before folding in the current iteration's contribution
    /// (spec.md §4.7 is vanilla CFR; `factor == 1.0` is a no-op).
    pub fn decay_regret(&mut self, factor: Utility) {
        if factor == 1.0 {
            return;
        }
        for r in self.regret_sum.iter_mut() {
            *r *= factor;
        }
    }
    /// as `decay_regret`, for the average-strategy accumulator.
    pub fn decay_strategy(&mut self, factor: Utility) {
        if factor == 1.0 {
            return;
        }
        for s in self.strategy_sum.iter_mut() {
            *s *= factor;
        }
    }
    pub fn record_update(&mut self) {
        self.update_count += 1;
    }

    pub fn regret_sum(&self) -> &[Utility] {
        &self.regret_sum
    }
    pub fn strategy_sum(&self) -> &[Utility] {
        &self.strategy_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::BetSize;

    fn node() -> RegretNode {
        RegretNode::new(
            vec![Action::Fold, Action::Call, Action::Bet(BetSize::Two)],
            Street::Pref,
            0,
            "AKs".into(),
            String::new(),
            1.5,
        )
    }

    #[test]
    fn fresh_node_has_uniform_current_and_average_strategy() {
        let node = node();
        let uniform = vec![1.0 / 3.0; 3];
        assert_eq!(node.current_strategy(), uniform);
        assert_eq!(node.average_strategy(), uniform);
    }

    #[test]
    fn regret_matching_ignores_non_positive_regret() {
        let mut node = node();
        node.add_regret(0, -5.0);
        node.add_regret(1, 3.0);
        node.add_regret(2, 1.0);
        let sigma = node.current_strategy();
        assert_eq!(sigma[0], 0.0);
        assert!((sigma[1] - 0.75).abs() < 1e-9);
        assert!((sigma[2] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn average_strategy_reflects_accumulated_weight() {
        let mut node = node();
        node.add_strategy(1, 4.0);
        node.add_strategy(2, 1.0);
        let avg = node.average_strategy();
        assert!((avg[0]).abs() < 1e-9);
        assert!((avg[1] - 0.8).abs() < 1e-9);
        assert!((avg[2] - 0.2).abs() < 1e-9);
    }

    #[test]
    fn decay_scales_accumulators_and_is_a_no_op_at_one() {
        let mut node = node();
        node.add_regret(1, 10.0);
        node.add_strategy(1, 10.0);
        node.decay_regret(0.5);
        node.decay_strategy(0.5);
        assert_eq!(node.regret_sum()[1], 5.0);
        assert_eq!(node.strategy_sum()[1], 5.0);
        node.decay_regret(1.0);
        node.decay_strategy(1.0);
        assert_eq!(node.regret_sum()[1], 5.0);
        assert_eq!(node.strategy_sum()[1], 5.0);
    }
}
