use super::card::Card;
use super::hand::{Combinations, Hand};
use super::rank::Rank;

/// the nine standard high-card poker hand categories, ordered weakest to
/// strongest so that a numeric category comparison is itself a valid
/// strength comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// evaluate any 5..=7 card selection into a totally-ordered score: for any
/// two hands X, Y over possibly-differing board/hole splits,
/// `score(X) > score(Y)` iff X beats Y under standard high-card rules.
///
/// algorithm (spec.md §4.1): enumerate every C(n,5) five-card subset,
/// score each, and take the max.
pub fn evaluate(hole: &[Card], board: &[Card]) -> i64 {
    let mut all = Vec::with_capacity(hole.len() + board.len());
    all.extend_from_slice(hole);
    all.extend_from_slice(board);
    assert!(
        (5..=7).contains(&all.len()),
        "evaluator expects 5..=7 cards, got {}",
        all.len()
    );
    let universe = Hand::from(all);
    Combinations::of(5, universe)
        .map(|five| score_five(&Vec::<Card>::from(five)))
        .max()
        .expect("at least one five-card subset exists")
}

/// score a single 5-card hand. encoded as `category * 13^5 + tiebreak`,
/// where `tiebreak` packs the significance-ordered rank values (primary
/// group ranks then kickers) in a base-13 mixed radix -- any encoding
/// yielding the same total order is spec-conformant (spec.md §4.1 note).
fn score_five(cards: &[Card]) -> i64 {
    assert_eq!(cards.len(), 5);
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank().value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let straight_high = straight_high_card(&values);

    let mut groups: Vec<(u8, u8)> = rank_frequencies(&values); // (rank, count)
    // sort by count desc, then rank desc -- this is the canonical
    // "primary group ranks then kickers" tiebreak ordering.
    groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    let counts: Vec<u8> = groups.iter().map(|(_, c)| *c).collect();

    let category = if is_flush && straight_high.is_some() {
        Category::StraightFlush
    } else if counts == [4, 1] {
        Category::FourOfAKind
    } else if counts == [3, 2] {
        Category::FullHouse
    } else if is_flush {
        Category::Flush
    } else if straight_high.is_some() {
        Category::Straight
    } else if counts == [3, 1, 1] {
        Category::ThreeOfAKind
    } else if counts == [2, 2, 1] {
        Category::TwoPair
    } else if counts == [2, 1, 1, 1] {
        Category::Pair
    } else {
        Category::HighCard
    };

    let tiebreak: i64 = if category == Category::Straight || category == Category::StraightFlush {
        straight_high.unwrap() as i64
    } else {
        // rank values run 2..=14; fold the zero-based index (0..=12) so each
        // digit stays below the base-13 radix and a 5-digit tiebreak never
        // overflows into the next category's numeric band.
        groups
            .iter()
            .map(|(rank, _)| (*rank - 2) as i64)
            .fold(0i64, |acc, rank| acc * 13 + rank)
    };

    (category as i64) * 13i64.pow(5) + tiebreak
}

/// groups ranks by multiplicity, returned as (rank, count) pairs.
fn rank_frequencies(sorted_desc: &[u8]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = Vec::new();
    for &v in sorted_desc {
        if let Some(last) = groups.last_mut() {
            if last.0 == v {
                last.1 += 1;
                continue;
            }
        }
        groups.push((v, 1));
    }
    groups
}

/// returns the high card of a straight, if the five ranks form one.
/// the wheel (A-2-3-4-5) is a straight with high card 5 (spec.md §4.1 edge
/// case), scored below six-high but above any non-straight hand.
fn straight_high_card(sorted_desc: &[u8]) -> Option<u8> {
    let mut uniq: Vec<u8> = sorted_desc.to_vec();
    uniq.dedup();
    if uniq.len() != 5 {
        return None;
    }
    if uniq[0] - uniq[4] == 4 {
        return Some(uniq[0]);
    }
    // wheel: A,5,4,3,2 sorted desc is [14,5,4,3,2]
    if uniq == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::rank::Rank;
    use crate::cards::suit::Suit;

    fn card(r: Rank, s: Suit) -> Card {
        Card::new(r, s)
    }

    #[test]
    fn straight_flush_high_card_breaks_ties() {
        let hx = vec![
            card(Rank::Ten, Suit::Club),
            card(Rank::Jack, Suit::Club),
            card(Rank::Queen, Suit::Club),
            card(Rank::King, Suit::Club),
            card(Rank::Ace, Suit::Club),
        ];
        let hy = vec![
            card(Rank::Nine, Suit::Club),
            card(Rank::Ten, Suit::Club),
            card(Rank::Jack, Suit::Club),
            card(Rank::Queen, Suit::Club),
            card(Rank::King, Suit::Club),
        ];
        assert!(score_five(&hx) > score_five(&hy));
    }

    #[test]
    fn four_of_a_kind_beats_full_house() {
        let quads = vec![
            card(Rank::King, Suit::Club),
            card(Rank::King, Suit::Diamond),
            card(Rank::King, Suit::Heart),
            card(Rank::King, Suit::Spade),
            card(Rank::Ace, Suit::Club),
        ];
        let boat = vec![
            card(Rank::Ace, Suit::Club),
            card(Rank::Ace, Suit::Diamond),
            card(Rank::Ace, Suit::Heart),
            card(Rank::King, Suit::Club),
            card(Rank::King, Suit::Diamond),
        ];
        assert!(score_five(&quads) > score_five(&boat));
    }

    #[test]
    fn wheel_straight_scores_as_five_high() {
        let wheel = vec![
            card(Rank::Ace, Suit::Club),
            card(Rank::Two, Suit::Diamond),
            card(Rank::Three, Suit::Heart),
            card(Rank::Four, Suit::Spade),
            card(Rank::Five, Suit::Club),
        ];
        let pair = vec![
            card(Rank::Nine, Suit::Club),
            card(Rank::Nine, Suit::Diamond),
            card(Rank::Two, Suit::Heart),
            card(Rank::Four, Suit::Spade),
            card(Rank::Seven, Suit::Club),
        ];
        let six_high = vec![
            card(Rank::Two, Suit::Club),
            card(Rank::Three, Suit::Diamond),
            card(Rank::Four, Suit::Heart),
            card(Rank::Five, Suit::Spade),
            card(Rank::Six, Suit::Club),
        ];
        assert!(score_five(&wheel) > score_five(&pair));
        assert!(score_five(&six_high) > score_five(&wheel));
    }

    #[test]
    fn seven_card_eval_equals_max_of_five_card_subsets() {
        let hole = vec![card(Rank::Ace, Suit::Spade), card(Rank::King, Suit::Heart)];
        let board = vec![
            card(Rank::Queen, Suit::Diamond),
            card(Rank::Jack, Suit::Club),
            card(Rank::Ten, Suit::Diamond),
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Heart),
        ];
        let mut all = hole.clone();
        all.extend(board.clone());
        let universe = Hand::from(all);
        let expect = Combinations::of(5, universe)
            .map(|h| score_five(&Vec::<Card>::from(h)))
            .max()
            .unwrap();
        assert_eq!(evaluate(&hole, &board), expect);
    }

    #[test]
    fn pair_beats_ace_high() {
        let ace_high = vec![
            card(Rank::Ace, Suit::Club),
            card(Rank::King, Suit::Diamond),
            card(Rank::Queen, Suit::Heart),
            card(Rank::Jack, Suit::Spade),
            card(Rank::Nine, Suit::Club),
        ];
        let pair_of_twos = vec![
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Diamond),
            card(Rank::Ace, Suit::Heart),
            card(Rank::King, Suit::Spade),
            card(Rank::Queen, Suit::Club),
        ];
        assert!(score_five(&pair_of_twos) > score_five(&ace_high));
    }

    #[test]
    fn literal_scenario_straight_beats_two_pair() {
        let board = vec![
            card(Rank::Queen, Suit::Diamond),
            card(Rank::Jack, Suit::Club),
            card(Rank::Ten, Suit::Diamond),
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Heart),
        ];
        let straight_hole = vec![card(Rank::Ace, Suit::Spade), card(Rank::King, Suit::Heart)];
        let two_pair_hole = vec![card(Rank::Ace, Suit::Heart), card(Rank::Ace, Suit::Diamond)];
        let straight_score = evaluate(&straight_hole, &board);
        let two_pair_score = evaluate(&two_pair_hole, &board);
        assert!(straight_score > two_pair_score);
    }
}
