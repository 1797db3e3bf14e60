use crate::cards::evaluator;
use crate::cards::{Card, Deck, Hand};
use crate::Probability;
use rand::Rng;

/// outcome of a single Monte-Carlo equity trial against one sampled
/// opponent hand, from hero's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trial {
    Win,
    Tie(u32),
    Loss,
}

/// Monte-Carlo equity of `hole` + `board` against `opponents` uniformly
/// random ranges, run out to a full 5-card board (spec.md §4.3). Each trial
/// deals the remaining board cards and one hand per opponent from the
/// complement deck, then scores hero's equity share of that trial (1.0 win,
/// 1/ties split, 0.0 loss).
pub fn sample(
    hole: &[Card],
    board: &[Card],
    opponents: usize,
    trials: usize,
    rng: &mut impl Rng,
) -> Vec<Probability> {
    assert!(opponents >= 1, "equity sampling needs at least one opponent");
    let dealt: Hand = Hand::from(
        hole.iter()
            .chain(board.iter())
            .copied()
            .collect::<Vec<_>>(),
    );
    let remaining_board = 5 - board.len();
    let mut samples = Vec::with_capacity(trials);
    for _ in 0..trials {
        let mut deck = Deck::complement(&dealt);
        let runout = deck.draw(remaining_board, rng);
        let mut full_board = board.to_vec();
        full_board.extend(runout);

        let hero_score = evaluator::evaluate(hole, &full_board);
        let mut best_opponent = i64::MIN;
        let mut ties = 0u32;
        for _ in 0..opponents {
            let opp_hole = deck.draw(2, rng);
            let opp_score = evaluator::evaluate(&opp_hole, &full_board);
            match opp_score.cmp(&best_opponent) {
                std::cmp::Ordering::Greater => {
                    best_opponent = opp_score;
                    ties = 1;
                }
                std::cmp::Ordering::Equal => ties += 1,
                std::cmp::Ordering::Less => {}
            }
        }
        let outcome = match hero_score.cmp(&best_opponent) {
            std::cmp::Ordering::Greater => Trial::Win,
            std::cmp::Ordering::Equal => Trial::Tie(ties + 1),
            std::cmp::Ordering::Less => Trial::Loss,
        };
        samples.push(match outcome {
            Trial::Win => 1.0,
            Trial::Tie(n) => 1.0 / n as Probability,
            Trial::Loss => 0.0,
        });
    }
    samples
}

/// run `sample` across `workers`-many independent chunks in parallel,
/// concatenating the resulting per-trial equity shares (spec.md §4.3
/// "the sampling loop is embarrassingly parallel").
#[cfg(feature = "server")]
pub fn sample_parallel(
    hole: &[Card],
    board: &[Card],
    opponents: usize,
    trials: usize,
    seed_rng: &mut impl Rng,
) -> Vec<Probability> {
    use rand::SeedableRng;
    use rayon::prelude::*;

    let workers = rayon::current_num_threads().max(1);
    let per_worker = (trials + workers - 1) / workers;
    let seeds: Vec<u64> = (0..workers).map(|_| seed_rng.random()).collect();

    seeds
        .into_par_iter()
        .flat_map(|seed| {
            let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
            sample(hole, board, opponents, per_worker, &mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn card(r: Rank, s: Suit) -> Card {
        Card::new(r, s)
    }

    #[test]
    fn equity_is_bounded_in_unit_interval() {
        let mut rng = rand::rng();
        let hole = vec![card(Rank::Ace, Suit::Spade), card(Rank::Ace, Suit::Heart)];
        let board = vec![];
        let samples = sample(&hole, &board, 2, 200, &mut rng);
        assert_eq!(samples.len(), 200);
        for s in samples {
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn premium_pair_beats_random_hands_on_average() {
        let mut rng = rand::rng();
        let hole = vec![card(Rank::Ace, Suit::Spade), card(Rank::Ace, Suit::Heart)];
        let board = vec![];
        let samples = sample(&hole, &board, 2, 500, &mut rng);
        let mean: Probability = samples.iter().sum::<Probability>() / samples.len() as Probability;
        // AA vs 2 random ranges heads-up-style should win comfortably more
        // than a coinflip-per-opponent baseline would suggest.
        assert!(mean > 0.4, "mean equity {mean} too low for pocket aces");
    }

    #[test]
    fn fewer_remaining_streets_narrows_variance_deterministically() {
        let mut rng = rand::rng();
        let hole = vec![card(Rank::King, Suit::Spade), card(Rank::King, Suit::Heart)];
        let board = vec![
            card(Rank::King, Suit::Diamond),
            card(Rank::Two, Suit::Club),
            card(Rank::Seven, Suit::Heart),
            card(Rank::Nine, Suit::Spade),
        ];
        // one card left to come (river): with trips kings already made on
        // the turn, hero's equity share should be overwhelming.
        let samples = sample(&hole, &board, 1, 200, &mut rng);
        let mean: Probability = samples.iter().sum::<Probability>() / samples.len() as Probability;
        assert!(mean > 0.8, "mean equity {mean} too low for made trips on the turn");
    }
}
