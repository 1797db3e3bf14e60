use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;
use std::collections::HashSet;

/// a suit-canonical 6- or 7-card configuration: `hole` hero hole cards and
/// `board` community cards, suits assigned by the lex-minimal representative
/// of their orbit under the S4 suit-relabeling group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub hole: Vec<Card>,
    pub board: Vec<Card>,
}

impl Configuration {
    /// the canonical string used both as the dedup key and as the
    /// persisted identity of this equivalence class.
    pub fn canonical(&self) -> String {
        let hole: String = self.hole.iter().map(|c| c.to_string()).collect();
        let board: String = self.board.iter().map(|c| c.to_string()).collect();
        format!("{hole}|{board}")
    }
}

/// lazily enumerates suit-isomorphism-reduced 6/7-card configurations
/// (spec.md §4.2). restartable: construct with the union of previously
/// emitted canonical strings and the sequence skips anything already seen.
pub struct CanonicalEnumerator {
    hole_len: usize,
    board_len: usize,
    seen: HashSet<String>,
    rank_tuples: std::vec::IntoIter<Vec<u8>>,
    pending: std::vec::IntoIter<Configuration>,
}

impl CanonicalEnumerator {
    pub fn new(hole_len: usize, board_len: usize, seen: HashSet<String>) -> Self {
        let rank_tuples = Self::valid_rank_tuples(hole_len, board_len).into_iter();
        Self {
            hole_len,
            board_len,
            seen,
            rank_tuples,
            pending: Vec::new().into_iter(),
        }
    }

    /// every (hole_ranks ++ board_ranks) combination where hole ranks are
    /// independently non-decreasing, board ranks are independently
    /// non-decreasing (spec.md §4.2 edge case: hero and villain positions
    /// must not be conflated), and no rank appears more than 4 times.
    fn valid_rank_tuples(hole_len: usize, board_len: usize) -> Vec<Vec<u8>> {
        let holes = non_decreasing_tuples(hole_len, 13);
        let boards = non_decreasing_tuples(board_len, 13);
        let mut out = Vec::new();
        for h in &holes {
            for b in &boards {
                let mut combined = h.clone();
                combined.extend_from_slice(b);
                if rank_counts_ok(&combined) {
                    out.push(combined);
                }
            }
        }
        out
    }
}

impl Iterator for CanonicalEnumerator {
    type Item = Configuration;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(config) = self.pending.next() {
                let key = config.canonical();
                if self.seen.insert(key) {
                    return Some(config);
                }
                continue;
            }
            let ranks = self.rank_tuples.next()?;
            let configs = canonical_configurations(&ranks, self.hole_len, self.board_len);
            self.pending = configs.into_iter();
        }
    }
}

/// every length-`len` non-decreasing tuple of rank indices 0..n_ranks,
/// i.e. combinations with repetition, in lexicographic order.
fn non_decreasing_tuples(len: usize, n_ranks: u8) -> Vec<Vec<u8>> {
    if len == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    let mut current = vec![0u8; len];
    loop {
        out.push(current.clone());
        let mut i = len - 1;
        loop {
            if current[i] + 1 < n_ranks {
                current[i] += 1;
                for slot in current.iter_mut().take(len).skip(i + 1) {
                    *slot = current[i];
                }
                break;
            }
            if i == 0 {
                return out;
            }
            i -= 1;
        }
    }
}

fn rank_counts_ok(ranks: &[u8]) -> bool {
    let mut counts = [0u8; 13];
    for &r in ranks {
        counts[r as usize] += 1;
        if counts[r as usize] > 4 {
            return false;
        }
    }
    true
}

const PERMUTATIONS_OF_4: [[u8; 4]; 24] = permutations_of_4();

/// the 24 permutations of {0,1,2,3}, computed at compile time.
const fn permutations_of_4() -> [[u8; 4]; 24] {
    let mut perms = [[0u8; 4]; 24];
    let base = [0u8, 1, 2, 3];
    let mut count = 0;
    let mut a = 0;
    while a < 4 {
        let mut b = 0;
        while b < 4 {
            if b != a {
                let mut c = 0;
                while c < 4 {
                    if c != a && c != b {
                        let mut d = 0;
                        while d < 4 {
                            if d != a && d != b && d != c {
                                perms[count] = [base[a], base[b], base[c], base[d]];
                                count += 1;
                            }
                            d += 1;
                        }
                    }
                    c += 1;
                }
            }
            b += 1;
        }
        a += 1;
    }
    perms
}

/// for a fixed rank tuple, enumerate every valid raw suit assignment (the
/// only constraint being no duplicate card within a rank group), map each
/// through every suit permutation, and retain -- per rank tuple -- only the
/// lexicographically-minimal string for each distinct orbit. brute-force
/// over 4! permutations, but correct regardless of how suits happen to
/// overlap across saturated rank groups (a purely positional,
/// introduction-order backtrack can under- or over-collapse those cases).
fn canonical_configurations(ranks: &[u8], hole_len: usize, board_len: usize) -> Vec<Configuration> {
    let n = ranks.len();
    let mut raw = Vec::new();
    let mut suits = vec![0u8; n];
    raw_suit_tuples(ranks, 0, &mut suits, &mut raw);

    let mut best: std::collections::HashMap<String, Configuration> = std::collections::HashMap::new();
    for tuple in &raw {
        for perm in PERMUTATIONS_OF_4.iter() {
            let permuted: Vec<u8> = tuple.iter().map(|&s| perm[s as usize]).collect();
            let config = split_sorted(ranks, &permuted, hole_len, board_len);
            let key = config.canonical();
            best.entry(key).or_insert(config);
        }
    }
    best.into_values().collect()
}

fn raw_suit_tuples(ranks: &[u8], pos: usize, current: &mut Vec<u8>, out: &mut Vec<Vec<u8>>) {
    if pos == ranks.len() {
        out.push(current.clone());
        return;
    }
    for suit in 0..4u8 {
        let rank = ranks[pos];
        let clashes = (0..pos).any(|i| ranks[i] == rank && current[i] == suit);
        if clashes {
            continue;
        }
        current[pos] = suit;
        raw_suit_tuples(ranks, pos + 1, current, out);
    }
}

/// split a (ranks, suits) assignment into hole/board, each independently
/// sorted by (rank, suit) so that position-order ambiguity within a rank
/// group never produces spurious distinct strings.
fn split_sorted(ranks: &[u8], suits: &[u8], hole_len: usize, board_len: usize) -> Configuration {
    let make = |range: std::ops::Range<usize>| -> Vec<Card> {
        let mut cards: Vec<Card> = range
            .map(|i| Card::new(Rank::from(ranks[i]), Suit::from(suits[i])))
            .collect();
        cards.sort();
        cards
    };
    Configuration {
        hole: make(0..hole_len),
        board: make(hole_len..hole_len + board_len),
    }
}
