use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// sorted multiset of rank multiplicities for a hand
/// (spec.md §3 `BucketTable`), e.g. `{A:2, K:1, 7:1, 5:1}` becomes
/// `[(7,1),(13,1),(12,1),(14,2)]` sorted ascending by rank value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankPattern(pub Vec<(u8, u8)>);

/// canonical list of per-suit rank-group-index lists: a partition signature
/// of how the four suits cover the rank classes of a hand (spec.md §3/§4.5).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuitPattern(pub Vec<Vec<usize>>);

impl RankPattern {
    pub fn of(cards: &[Card]) -> Self {
        let mut counts = [0u8; 13];
        for c in cards {
            counts[c.rank().index()] += 1;
        }
        let mut pattern: Vec<(u8, u8)> = counts
            .iter()
            .enumerate()
            .filter(|(_, &n)| n > 0)
            .map(|(i, &n)| (i as u8 + 2, n))
            .collect();
        pattern.sort_unstable_by_key(|(rank, _)| *rank);
        Self(pattern)
    }
}

impl SuitPattern {
    /// rank groups are sorted by (count desc, rank desc); each suit's
    /// signature is the sorted list of group indices it covers; the overall
    /// list of signatures is then sorted for canonicity.
    pub fn of(cards: &[Card]) -> Self {
        let mut counts = [0u8; 13];
        for c in cards {
            counts[c.rank().index()] += 1;
        }
        let mut groups: Vec<u8> = (0..13u8).filter(|&r| counts[r as usize] > 0).collect();
        groups.sort_unstable_by(|a, b| {
            counts[*b as usize]
                .cmp(&counts[*a as usize])
                .then(b.cmp(a))
        });
        let group_index: std::collections::HashMap<u8, usize> =
            groups.iter().enumerate().map(|(i, &r)| (r, i)).collect();

        let mut signatures: Vec<Vec<usize>> = vec![Vec::new(); 4];
        for c in cards {
            let rank_idx = c.rank().index() as u8;
            let group = group_index[&rank_idx];
            let suit = c.suit() as usize;
            signatures[suit].push(group);
        }
        for sig in signatures.iter_mut() {
            sig.sort_unstable();
        }
        signatures.retain(|sig| !sig.is_empty());
        signatures.sort();
        Self(signatures)
    }
}

/// a resolved abstraction bucket for an information set: the preflop
/// 169-class string, a post-flop numeric bucket id, or a miss sentinel
/// (spec.md §4.5; a miss is non-fatal, see `ErrorKind::MissingBucket`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abstraction {
    Preflop(String),
    PostFlop(usize),
    Missing,
}

impl Abstraction {
    /// hole cards -> one of 169 canonical preflop classes: (higher rank,
    /// lower rank, suited?), e.g. "AKs", "72o", "TT".
    pub fn preflop(hole: [Card; 2]) -> Self {
        let (hi, lo) = if hole[0].rank().value() >= hole[1].rank().value() {
            (hole[0], hole[1])
        } else {
            (hole[1], hole[0])
        };
        let suited = hi.suit() == lo.suit();
        let label = if hi.rank() == lo.rank() {
            format!("{}{}", hi.rank(), lo.rank())
        } else if suited {
            format!("{}{}s", hi.rank(), lo.rank())
        } else {
            format!("{}{}o", hi.rank(), lo.rank())
        };
        Abstraction::Preflop(label)
    }
}

/// warn-once tracker for bucket-table misses (spec.md §7 `ErrorKind::
/// MissingBucket`): the trainer falls back to a raw pattern-key label rather
/// than aborting, but a flood of identical log lines over millions of
/// iterations would be useless, so each distinct miss is logged at most
/// once per process.
#[derive(Default)]
pub struct MissingBucketLog {
    seen: std::sync::Mutex<std::collections::HashSet<String>>,
}

impl MissingBucketLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// log a warning for `pattern_key` the first time it's seen; silent on
    /// every repeat.
    pub fn warn_once(&self, pattern_key: &str) {
        let mut seen = self.seen.lock().expect("missing-bucket log poisoned");
        if seen.insert(pattern_key.to_string()) {
            log::warn!("bucket table miss for pattern {pattern_key}, falling back to raw pattern key");
        }
    }
}

impl std::fmt::Display for Abstraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Abstraction::Preflop(s) => write!(f, "{s}"),
            Abstraction::PostFlop(id) => write!(f, "{id}"),
            Abstraction::Missing => write!(f, "MISSING"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn card(r: Rank, s: Suit) -> Card {
        Card::new(r, s)
    }

    #[test]
    fn preflop_pair_has_no_suited_suffix() {
        let hand = [card(Rank::Ten, Suit::Club), card(Rank::Ten, Suit::Diamond)];
        assert_eq!(Abstraction::preflop(hand), Abstraction::Preflop("TT".into()));
    }

    #[test]
    fn preflop_suited_and_offsuit_differ() {
        let suited = [card(Rank::Ace, Suit::Club), card(Rank::King, Suit::Club)];
        let offsuit = [card(Rank::Ace, Suit::Club), card(Rank::King, Suit::Diamond)];
        assert_eq!(Abstraction::preflop(suited), Abstraction::Preflop("AKs".into()));
        assert_eq!(Abstraction::preflop(offsuit), Abstraction::Preflop("AKo".into()));
    }

    #[test]
    fn preflop_orders_by_rank_regardless_of_input_order() {
        let a = [card(Rank::Seven, Suit::Club), card(Rank::Two, Suit::Diamond)];
        let b = [card(Rank::Two, Suit::Diamond), card(Rank::Seven, Suit::Club)];
        assert_eq!(Abstraction::preflop(a), Abstraction::preflop(b));
        assert_eq!(Abstraction::preflop(a), Abstraction::Preflop("72o".into()));
    }

    #[test]
    fn rank_pattern_sorts_ascending_by_rank() {
        let cards = vec![
            card(Rank::Ace, Suit::Club),
            card(Rank::Ace, Suit::Diamond),
            card(Rank::King, Suit::Club),
            card(Rank::Seven, Suit::Heart),
            card(Rank::Five, Suit::Spade),
        ];
        let pattern = RankPattern::of(&cards);
        assert_eq!(pattern.0, vec![(5, 1), (7, 1), (13, 1), (14, 2)]);
    }

    #[test]
    fn missing_bucket_log_warns_only_once_per_key() {
        let log = MissingBucketLog::new();
        log.warn_once("a");
        log.warn_once("a");
        log.warn_once("b");
        assert_eq!(log.seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn quad_plus_trip_matches_spec_scenario_suit_pattern() {
        // four Twos, three Threes, suit assignment "cdhs|cdh" (spec.md §8
        // scenario 5): group 0 = twos (count 4), group 1 = threes (count 3).
        let cards = vec![
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Diamond),
            card(Rank::Two, Suit::Heart),
            card(Rank::Two, Suit::Spade),
            card(Rank::Three, Suit::Club),
            card(Rank::Three, Suit::Diamond),
            card(Rank::Three, Suit::Heart),
        ];
        let pattern = SuitPattern::of(&cards);
        // suit c covers groups {0,1}, d covers {0,1}, h covers {0,1}, s
        // covers {0} -- sorted, that's three [0,1] signatures and one [0].
        assert_eq!(pattern.0, vec![vec![0], vec![0, 1], vec![0, 1], vec![0, 1]]);
    }
}
