use crate::Chips;

/// rake/jackpot adjustment applied to a terminal hand's pot, separate from
/// `GameState::returns()` itself (the original source's `SpinGoGame` takes
/// `rake_per_hand`/`jackpot_fee_per_hand`/`jackpot_payout_percentage` as
/// constructor parameters and applies them only at showdown, never on an
/// early fold). Rake makes the game negative-sum: the total paid out is
/// `pot - rake_per_hand - jackpot_fee_per_hand + pot * jackpot_payout_percentage`,
/// so the sum of `apply`'s output no longer has to be zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rake {
    pub rake_per_hand: Chips,
    pub jackpot_fee_per_hand: Chips,
    pub jackpot_payout_percentage: f32,
}

impl Rake {
    /// no rake: `apply` is then the identity, preserving the zero-sum
    /// property `GameState::returns()` already guarantees.
    pub const NONE: Rake = Rake {
        rake_per_hand: 0.0,
        jackpot_fee_per_hand: 0.0,
        jackpot_payout_percentage: 0.0,
    };

    /// the original source's `RAKE_PERCENTAGE = 0.07` applied to a hand of
    /// this `pot` size, with no separate jackpot fee.
    pub fn standard(pot: Chips) -> Rake {
        Rake {
            rake_per_hand: pot * 0.07,
            jackpot_fee_per_hand: 0.0,
            jackpot_payout_percentage: 0.0,
        }
    }

    /// scale `returns` (as produced by `GameState::returns()`, summing to
    /// zero) down by the rake/jackpot adjustment on a pot of `pot` chips.
    /// the shortfall is split proportionally across whoever won money, so a
    /// losing seat's payoff is unaffected by rake on a pot it never shared
    /// in.
    pub fn apply(&self, returns: [Chips; 3], pot: Chips) -> [Chips; 3] {
        let jackpot_payout = pot * self.jackpot_payout_percentage;
        let adjustment = self.rake_per_hand + self.jackpot_fee_per_hand - jackpot_payout;
        if adjustment == 0.0 {
            return returns;
        }
        let total_won: Chips = returns.iter().filter(|&&r| r > 0.0).sum();
        if total_won <= 0.0 {
            return returns;
        }
        std::array::from_fn(|s| {
            if returns[s] > 0.0 {
                returns[s] - adjustment * (returns[s] / total_won)
            } else {
                returns[s]
            }
        })
    }
}

impl Default for Rake {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_the_identity() {
        let returns = [5.0, -2.0, -3.0];
        assert_eq!(Rake::NONE.apply(returns, 10.0), returns);
    }

    #[test]
    fn standard_reduces_the_winner_and_keeps_losers_whole() {
        let returns = [5.0, -2.0, -3.0];
        let rake = Rake::standard(10.0);
        let adjusted = rake.apply(returns, 10.0);
        assert!(adjusted[0] < returns[0]);
        assert_eq!(adjusted[1], returns[1]);
        assert_eq!(adjusted[2], returns[2]);
        assert!(adjusted.iter().sum::<Chips>() < 0.0, "rake makes the hand negative-sum");
    }

    #[test]
    fn jackpot_payout_can_offset_the_rake() {
        let returns = [5.0, -2.0, -3.0];
        let rake = Rake {
            rake_per_hand: 0.5,
            jackpot_fee_per_hand: 0.0,
            jackpot_payout_percentage: 0.05,
        };
        let adjusted = rake.apply(returns, 10.0);
        // 0.5 rake vs. 0.5 jackpot payout on a 10-chip pot nets to zero.
        assert_eq!(adjusted, returns);
    }
}
