use std::collections::HashSet;
use std::sync::OnceLock;

use super::action::Action;

/// the nine (see note below) preflop fold-range tables (spec.md §4.6). data
/// transplanted from the hardcoded source tables, normalized from the
/// source's low-rank-first + literal-"10" notation into this crate's
/// higher-rank-first, "T"-for-ten class strings (spec.md §4.5, e.g. "AKs",
/// "72o", "TT") so they can be compared directly against
/// `Abstraction::preflop`'s output. Duplicate entries (e.g. "710o" listed
/// twice in the BTN table) are silently absorbed by the backing `HashSet`
/// per spec.md §9 item 5.
///
/// note: the source actually defines twelve tables, not nine as the prose
/// count suggests (one combination, BB facing BTN=FOLD/SB=CALL, has no
/// entries at all -- it's commented out in the source, "no fold range" --
/// which may be where the miscount comes from). All present tables are
/// carried over for fidelity.
fn normalize(raw: &str) -> String {
    let (body, suit) = raw.split_at(raw.len() - 1);
    let (r1, rest) = take_rank(body);
    let r2 = rest;
    assert!(!r2.is_empty(), "malformed fold-range code '{raw}'");
    let v1 = rank_value(r1);
    let v2 = rank_value(r2);
    let (hi, lo) = if v1 >= v2 { (r1, r2) } else { (r2, r1) };
    if hi == lo {
        hi.to_string()
    } else {
        format!("{hi}{lo}{suit}")
    }
}

/// consumes one rank token from the front of `body`: "10" greedily maps to
/// "T", otherwise a single character is consumed as-is.
fn take_rank(body: &str) -> (&str, &str) {
    if body.starts_with("10") {
        ("T", &body[2..])
    } else {
        body.split_at(1)
    }
}

fn rank_value(token: &str) -> u8 {
    match token {
        "2" => 2,
        "3" => 3,
        "4" => 4,
        "5" => 5,
        "6" => 6,
        "7" => 7,
        "8" => 8,
        "9" => 9,
        "T" => 10,
        "J" => 11,
        "Q" => 12,
        "K" => 13,
        "A" => 14,
        _ => panic!("unrecognized rank token '{token}'"),
    }
}

fn build(raw: &[&str]) -> HashSet<String> {
    raw.iter().map(|s| normalize(s)).collect()
}

macro_rules! fold_table {
    ($name:ident, $cell:ident, [$($code:literal),* $(,)?]) => {
        static $cell: OnceLock<HashSet<String>> = OnceLock::new();
        fn $name() -> &'static HashSet<String> {
            $cell.get_or_init(|| build(&[$($code),*]))
        }
    };
}

fold_table!(fold_btn, FOLD_BTN, [
    "3Ao", "2Ao",
    "8Ko", "7Ko", "6Ko", "5Ko", "4Ko", "3Ko", "2Ko",
    "8Qo", "7Qo", "6Qo", "5Qo", "4Qo", "3Qo", "2Qo",
    "8Jo", "7Jo", "6Jo", "5Jo", "4Jo", "3Jo", "2Jo",
    "810o", "710o", "710o", "610o", "510o", "410o", "310o", "210o",
    "89o", "79o", "69o", "59o", "49o", "39o", "29o",
    "78o", "68o", "58o", "48o", "38o", "28o",
    "67o", "57o", "47o", "37o", "27o",
    "56o", "46o", "36o", "26o",
    "45o", "35o", "25o",
    "34o", "24o",
    "23o",
    "3Ks", "2Ks",
    "5Qs", "4Qs", "3Qs", "2Qs",
    "6Js", "5Js", "4Js", "3Js", "2Js",
    "610s", "510s", "410s", "310s", "210s",
    "69s", "59s", "49s", "39s", "29s",
    "58s", "48s", "38s", "28s",
    "57s", "47s", "37s", "27s",
    "56s", "46s", "36s", "26s",
    "45s", "35s", "25s",
    "34s", "24s",
    "23s",
]);

fold_table!(fold_sb_btn_fold, FOLD_SB_BTN_FOLD, [
    "25o", "29o", "57o", "45o", "39o", "46o", "35o", "410o", "6Jo", "3Qo", "2Jo", "23o", "59o",
    "610o", "58o", "26s", "47o", "510o", "49o", "28s", "27s", "69o", "37o", "38s", "36o", "210o",
    "34o", "24o", "5Jo", "48o", "27o", "28o", "29s", "38o", "310o", "2Qo", "26o", "24s", "37s",
    "4Jo", "3Jo", "23s", "4Qo",
]);

fold_table!(fold_sb_btn_bet_2, FOLD_SB_BTN_BET_2, [
    "59o", "3Ks", "2Js", "35s", "68s", "69o", "3Js", "5Qs", "45o", "68o", "25s", "6Ks", "7Ks",
    "29o", "5Js", "58s", "2Qo", "37s", "3Jo", "210s", "57o", "5Qo", "8Ko", "8Js", "34s", "67o",
    "37o", "59s", "5Ko", "49o", "36o", "3Ao", "610s", "67s", "8Jo", "10Qo", "8Qo", "4Ko", "78o",
    "9Ko", "2Qs", "7Ko", "48s", "910o", "4Ks", "38s", "26s", "57s", "28s", "6Jo", "23s", "24o",
    "510o", "28o", "58o", "2Ks", "410s", "4Ao", "6Qo", "410o", "39s", "4Jo", "23o", "39o", "34o",
    "79s", "25o", "7Qo", "310o", "9Jo", "5Jo", "7Qs", "27o", "49s", "35o", "9Qo", "8Qs", "210o",
    "2Ao", "2Jo", "710o", "69s", "4Qo", "45s", "810o", "46o", "7Js", "610o", "6Qs", "27s", "79o",
    "36s", "6Ko", "38o", "710s", "48o", "47s", "3Ko", "7Jo", "3Qs", "24s", "510s", "2Ko", "56o",
    "3Qo", "6Js", "29s", "47o", "4Js", "310s", "46s", "26o", "56s", "4Qs", "5Ks", "89o",
]);

fold_table!(fold_sb_btn_all_in, FOLD_SB_BTN_ALL_IN, [
    "10Qs", "810s", "8Ko", "5Ao", "6Qs", "23s", "6Qo", "210o", "810o", "37o", "47o", "4As", "9Qo",
    "9Qs", "10Ko", "4Ks", "8Ks", "37s", "58s", "2Jo", "27o", "78o", "5Ko", "610o", "78s", "47s",
    "26o", "5As", "38o", "2Qs", "3Qs", "39s", "610s", "3Ks", "79o", "410o", "29s", "8Qs", "5Qo",
    "25o", "3Js", "10Ks", "JQo", "22s", "4Ko", "35s", "25s", "510o", "5Qs", "89o", "3As", "8Js",
    "2Ao", "6Ks", "3Ko", "59o", "59s", "27s", "2Ko", "6As", "36o", "2As", "9Jo", "6Jo", "JKo",
    "26s", "56s", "2Ks", "5Ks", "5Jo", "10Js", "4Qs", "4Js", "910o", "7Ko", "68s", "710s", "68o",
    "39o", "7Ao", "35o", "46s", "9Ko", "29o", "23o", "57o", "58o", "9Ks", "57s", "6Ao", "10Jo",
    "49s", "410s", "69s", "45o", "45s", "5Js", "4Ao", "56o", "510s", "89s", "7Ks", "710o", "69o",
    "4Jo", "48s", "9Js", "10Qo", "28o", "3Ao", "48o", "46o", "34s", "28s", "67s", "4Qo", "2Qo",
    "79s", "6Js", "7Qs", "24o", "3Jo", "7Js", "67o", "38s", "24s", "36s", "7Jo", "8Jo", "2Js",
    "310o", "8Qo", "3Qo", "49o", "7Qo", "310s", "910s", "34o", "210s", "6Ko",
]);

fold_table!(fold_bb_btn_fold_sb_bet_3, FOLD_BB_BTN_FOLD_SB_BET_3, [
    "29o", "36o", "49o", "26o", "38s", "310o", "38o", "5Qo", "25o", "510o", "3Qo", "610o", "5Jo",
    "28o", "210o", "3Ko", "58o", "23o", "28s", "410o", "39o", "4Jo", "59o", "27s", "2Ko", "6Jo",
    "4Qo", "2Jo", "2Qo", "48o", "35o", "24o", "57o", "3Jo", "4Ko", "37o", "34o", "46o", "710o",
    "68o", "47o", "69o", "27o",
]);

fold_table!(fold_bb_btn_fold_sb_all_in, FOLD_BB_BTN_FOLD_SB_ALL_IN, [
    "58o", "810s", "27o", "5Ks", "4Ks", "48o", "4Qs", "4Js", "9Jo", "69s", "6Qo", "6Jo", "48s",
    "510s", "78o", "9Qo", "29s", "210o", "8Qs", "38s", "23o", "4Qo", "45o", "210s", "26o", "79s",
    "46o", "29o", "36o", "89s", "49o", "6Ko", "37s", "49s", "69o", "68s", "4Jo", "910o", "7Qs",
    "9Ko", "710o", "3Qs", "310o", "510o", "78s", "28s", "34o", "24s", "610s", "56o", "8Qo", "5Jo",
    "3Qo", "57o", "8Ko", "7Qo", "67o", "5Ko", "59o", "2Qo", "410o", "28o", "35s", "25s", "10Qo",
    "35o", "36s", "45s", "810o", "24o", "47o", "610o", "5Qo", "26s", "6Js", "310s", "2Ao", "2Qs",
    "2Ko", "8Jo", "27s", "7Ko", "3Jo", "5Qs", "38o", "3Ko", "2Jo", "37o", "710s", "39s", "58s",
    "47s", "79o", "34s", "7Jo", "5Js", "6Ks", "7Js", "410s", "59s", "46s", "8Js", "7Ks", "2Ks",
    "3Js", "25o", "39o", "67s", "3Ao", "57s", "3Ks", "23s", "89o", "4Ko", "2Js", "56s", "68o",
    "6Qs",
]);

fold_table!(fold_bb_btn_bet_2_sb_fold, FOLD_BB_BTN_BET_2_SB_FOLD, [
    "5Jo", "25o", "4Jo", "28o", "48o", "47o", "26o", "59o", "2Qo", "35o", "39o", "57o", "37o",
    "23o", "6Jo", "410o", "38o", "36o", "310o", "58o", "27o", "510o", "2Jo", "24o", "3Jo", "610o",
    "49o", "210o", "29o",
]);

fold_table!(fold_bb_btn_bet_2_sb_call, FOLD_BB_BTN_BET_2_SB_CALL, [
    "47o", "6Qo", "4Jo", "5Jo", "23o", "68o", "510o", "37o", "8Jo", "24o", "2Ko", "34o", "39o",
    "310o", "8Ko", "36o", "29o", "79o", "410o", "710o", "3Jo", "49o", "26o", "25o", "78o", "7Ko",
    "7Qo", "6Jo", "38o", "8Qo", "5Ko", "59o", "3Qo", "2Qo", "610o", "58o", "2Jo", "4Qo", "5Qo",
    "7Jo", "3Ko", "69o", "28o", "48o", "4Ko", "6Ko", "210o", "27o",
]);

fold_table!(fold_bb_btn_bet_2_sb_bet_4, FOLD_BB_BTN_BET_2_SB_BET_4, [
    "4Js", "2Qo", "6Qs", "29s", "28s", "10Ko", "9Ks", "69o", "69s", "4Ks", "44o", "49o", "3Js",
    "5Ks", "2Ko", "29o", "8Js", "49s", "5Qo", "27o", "7Js", "45s", "410s", "5Ao", "6Ko", "810o",
    "7Qs", "710s", "8Qo", "36o", "8Qs", "59o", "25o", "JKo", "4Ao", "47s", "4Ko", "5Ko", "8Jo",
    "10Qo", "56s", "7Qo", "9Qo", "5Jo", "910s", "78o", "48s", "37s", "57s", "7Ko", "2Qs", "34o",
    "7Ks", "48o", "39o", "35o", "34s", "3Ko", "22o", "8Ao", "68o", "2Js", "37o", "8Ks", "6Ks",
    "89s", "2Jo", "89o", "67s", "8Ko", "7Jo", "2Ao", "9Ao", "47o", "23o", "26s", "7Ao", "510s",
    "10Qs", "3Qs", "610s", "55o", "39s", "4Jo", "57o", "78s", "210s", "56o", "46s", "410o", "38o",
    "310s", "3Jo", "25s", "6Ao", "4Qs", "46o", "9Js", "35s", "36s", "6Qo", "10Jo", "24o", "79o",
    "59s", "6Jo", "45o", "2As", "3Ks", "5Js", "JQo", "610o", "2Ks", "810s", "24s", "58s", "3Ao",
    "510o", "9Jo", "6Js", "4Qo", "68s", "710o", "27s", "3Qo", "67o", "910o", "33o", "5Qs", "58o",
    "9Qs", "9Ko", "28o", "210o", "79s", "26o", "38s", "310o", "23s",
]);

fold_table!(fold_bb_btn_bet_2_sb_all_in, FOLD_BB_BTN_BET_2_SB_ALL_IN, [
    "4As", "9Jo", "210o", "47o", "QKo", "610o", "7As", "35s", "36o", "JKo", "57s", "510o", "26o",
    "27o", "45o", "6Qo", "8Ks", "8Js", "JQo", "410o", "45s", "37o", "10Jo", "6Ao", "6Jo", "89o",
    "710o", "7Js", "6Ko", "6Ks", "5Qs", "2Qs", "5As", "7Ks", "78s", "48s", "39o", "710s", "5Ko",
    "29o", "49s", "8Qo", "4Qs", "3As", "33o", "2Qo", "810s", "46s", "24o", "7Qs", "36s", "310s",
    "2Js", "5Ao", "5Qo", "89s", "25s", "79s", "38o", "410s", "68o", "27s", "59o", "59s", "57o",
    "9Qs", "2Ao", "69s", "6Js", "9Qo", "68s", "9Ao", "4Jo", "8Ko", "23o", "10Qo", "310o", "510s",
    "9Js", "37s", "910o", "10Ko", "79o", "58o", "210s", "9Ks", "58s", "67o", "3Ao", "2Ko", "4Ao",
    "6As", "78o", "4Js", "5Js", "56o", "3Qo", "8Qs", "910s", "25o", "28o", "39s", "46o", "3Qs",
    "610s", "26s", "10Qs", "8Jo", "2Jo", "7Qo", "4Ks", "6Qs", "8Ao", "4Ko", "22o", "24s", "7Ko",
    "2Ks", "3Js", "4Qo", "8As", "49o", "28s", "7Ao", "3Ks", "9Ko", "47s", "55o", "35o", "69o",
    "3Ko", "29s", "2As", "23s", "5Jo", "67s", "48o", "10Ks", "34o", "38s", "34s", "56s", "3Jo",
    "7Jo", "5Ks", "810o",
]);

fold_table!(fold_bb_btn_all_in_sb_fold, FOLD_BB_BTN_ALL_IN_SB_FOLD, [
    "49s", "29o", "7Js", "8Qo", "10Qo", "3Ao", "2Ks", "2Jo", "35o", "910o", "7Qo", "7Qs", "10Ko",
    "6Jo", "27o", "8Qs", "610s", "6Ks", "56s", "3Js", "67s", "8Ks", "2Qs", "9Ko", "210s", "710s",
    "9Qs", "6Ao", "34o", "3Qo", "4Jo", "6Qo", "48s", "3Ko", "89o", "23o", "38s", "4Ao", "39o",
    "22o", "9Jo", "56o", "25o", "4Js", "78s", "610o", "89s", "58o", "2Js", "2As", "310o", "79s",
    "37s", "7Ko", "5Ks", "3Qs", "510s", "210o", "4Ko", "23s", "710o", "510o", "69o", "2Qo", "8Jo",
    "48o", "10Jo", "45s", "67o", "9Js", "49o", "36o", "79o", "45o", "57o", "24s", "46o", "5Qs",
    "2Ao", "9Qo", "36s", "2Ko", "5Jo", "38o", "8Js", "69s", "3Ks", "5Qo", "6Js", "7Ks", "810o",
    "29s", "6Ko", "410s", "5Ko", "8Ko", "59o", "27s", "78o", "47o", "4Ks", "68o", "58s", "25s",
    "3Jo", "7Jo", "47s", "68s", "35s", "55o", "26o", "810s", "34s", "410o", "9Ks", "24o", "26s",
    "310s", "37o", "57s", "39s", "4Qs", "59s", "6Qs", "5Ao", "28s", "5Js", "3As", "46s", "4Qo",
    "910s", "28o",
]);

fold_table!(fold_bb_btn_all_in_sb_all_in, FOLD_BB_BTN_ALL_IN_SB_ALL_IN, [
    "310o", "3Ko", "5Jo", "8Ko", "410s", "68o", "9Qo", "510s", "610o", "5As", "9As", "69s", "6Qo",
    "69o", "5Js", "310s", "810s", "7Ao", "2Qo", "4Qo", "5Qs", "5Ko", "6Ao", "4Jo", "28o", "5Qo",
    "6Js", "58o", "46s", "36o", "9Ks", "39s", "10Ao", "8Qo", "2Ko", "24s", "9Ko", "810o", "6As",
    "JQo", "5Ao", "4Ko", "10Jo", "410o", "56s", "8Ks", "610s", "59s", "6Ko", "56o", "26s", "45o",
    "9Js", "2Js", "JKo", "25o", "8As", "3Js", "78s", "37s", "24o", "89o", "29s", "47o", "6Jo",
    "710o", "67o", "23o", "4As", "89s", "22o", "3As", "510o", "7Qs", "2As", "8Js", "7Ks", "10Qo",
    "3Jo", "46o", "33o", "49s", "2Ao", "47s", "10Ko", "39o", "36s", "38o", "58s", "6Ks", "2Ks",
    "68s", "8Jo", "5Ks", "9Jo", "7Qo", "38s", "48s", "3Ao", "4Qs", "37o", "7Ko", "910o", "210o",
    "9Ao", "2Jo", "4Js", "23s", "910s", "28s", "29o", "78o", "3Qs", "710s", "210s", "6Qs", "67s",
    "79s", "8Qs", "35s", "48o", "3Ks", "45s", "8Ao", "55o", "9Qs", "34s", "57s", "7As", "3Qo",
    "7Jo", "7Js", "49o", "27o", "59o", "34o", "4Ao", "27s", "26o", "57o", "35o", "25s", "2Qs",
    "4Ks", "79o",
]);

/// `btn` and `sb` are the preflop actions those seats took before the
/// acting seat, if any (spec.md §4.6: the nine cases are keyed by seat and
/// prior actions). seat 2 is BTN (first to act), seat 0 is SB, seat 1 is BB.
pub fn applicable_set(seat: usize, btn: Option<Action>, sb: Option<Action>) -> Option<&'static HashSet<String>> {
    match seat {
        2 => Some(fold_btn()),
        0 => match btn {
            Some(Action::Fold) => Some(fold_sb_btn_fold()),
            Some(Action::Bet(b)) if b.bb() == 2.0 => Some(fold_sb_btn_bet_2()),
            Some(Action::AllIn) => Some(fold_sb_btn_all_in()),
            _ => None,
        },
        1 => match (btn, sb) {
            (Some(Action::Fold), Some(Action::Bet(b))) if b.bb() == 3.0 => Some(fold_bb_btn_fold_sb_bet_3()),
            (Some(Action::Fold), Some(Action::AllIn)) => Some(fold_bb_btn_fold_sb_all_in()),
            (Some(Action::Bet(b)), Some(Action::Fold)) if b.bb() == 2.0 => Some(fold_bb_btn_bet_2_sb_fold()),
            (Some(Action::Bet(b)), Some(Action::Call)) if b.bb() == 2.0 => Some(fold_bb_btn_bet_2_sb_call()),
            (Some(Action::Bet(b)), Some(Action::Bet(r))) if b.bb() == 2.0 && r.bb() == 4.0 => {
                Some(fold_bb_btn_bet_2_sb_bet_4())
            }
            (Some(Action::Bet(b)), Some(Action::AllIn)) if b.bb() == 2.0 => Some(fold_bb_btn_bet_2_sb_all_in()),
            (Some(Action::AllIn), Some(Action::Fold)) => Some(fold_bb_btn_all_in_sb_fold()),
            (Some(Action::AllIn), Some(Action::AllIn)) => Some(fold_bb_btn_all_in_sb_all_in()),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_low_first_ten_literal_notation() {
        assert_eq!(normalize("3Ao"), "A3o");
        assert_eq!(normalize("210o"), "T2o");
        assert_eq!(normalize("710s"), "T7s");
        assert_eq!(normalize("JKo"), "KJo");
    }

    #[test]
    fn normalizes_pairs_without_suit_suffix() {
        assert_eq!(normalize("44o"), "44");
        assert_eq!(normalize("22o"), "22");
    }

    #[test]
    fn duplicate_entries_are_deduplicated() {
        // "710o" appears twice in the BTN table literal.
        let set = fold_btn();
        assert!(set.contains("T7o"));
    }

    #[test]
    fn btn_range_matches_spec_example() {
        let set = applicable_set(2, None, None).unwrap();
        assert!(set.contains("K2o"));
        assert!(!set.contains("AA"));
    }

    #[test]
    fn bb_range_depends_on_both_prior_actions() {
        use super::super::action::BetSize;
        let fold_then_bet3 = applicable_set(1, Some(Action::Fold), Some(Action::Bet(BetSize::Three)));
        assert!(fold_then_bet3.is_some());
        let none = applicable_set(1, Some(Action::Fold), Some(Action::Call));
        assert!(none.is_none());
    }
}
