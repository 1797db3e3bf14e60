use super::action::{Action, BetSize};
use super::foldrange;
use crate::cards::evaluator;
use crate::cards::{Card, Deck, Street};
use crate::clustering::Abstraction;
use crate::Chips;
use rand::Rng;

/// the deterministic three-seat Spin & Go state machine (spec.md §3/§4.6).
/// mutated only through `apply_action`; forked by plain `Clone` when the
/// MCCFR traverser needs to try every action from a node (spec.md §9 "a
/// plain by-value clone suffices").
#[derive(Debug, Clone)]
pub struct GameState {
    hole_cards: [Vec<Card>; 3],
    board: Vec<Card>,
    round: Street,
    active: [bool; 3],
    all_in: [bool; 3],
    stack: [Chips; 3],
    pot_round: [Chips; 3],
    pot_cumulative: [Chips; 3],
    current_bet: Chips,
    next_seat: Option<usize>,
    last_action: [Option<Action>; 3],
    round_history: [Vec<(usize, Action)>; 5],
    terminal: bool,
    deck: Deck,
}

impl GameState {
    /// blinds posted (seat 0 SB, seat 1 BB), deck shuffled and hole cards
    /// dealt, first action to seat 2 (spec.md §4.6).
    pub fn new_initial_state(rng: &mut impl Rng) -> Self {
        let mut deck = Deck::new();
        deck.shuffle(rng);
        let mut hole_cards: [Vec<Card>; 3] = Default::default();
        for seat in hole_cards.iter_mut() {
            let c1 = deck.deal().expect("fresh deck deals hole cards");
            let c2 = deck.deal().expect("fresh deck deals hole cards");
            *seat = vec![c1, c2];
        }
        let mut stack = [crate::STACK; 3];
        let mut pot_round = [0.0; 3];
        stack[0] -= crate::SMALL_BLIND;
        pot_round[0] = crate::SMALL_BLIND;
        stack[1] -= crate::BIG_BLIND;
        pot_round[1] = crate::BIG_BLIND;

        Self {
            hole_cards,
            board: Vec::new(),
            round: Street::Pref,
            active: [true; 3],
            all_in: [false; 3],
            stack,
            pot_round,
            pot_cumulative: [0.0; 3],
            current_bet: crate::BIG_BLIND,
            next_seat: Some(2),
            last_action: [None; 3],
            round_history: Default::default(),
            terminal: false,
            deck,
        }
    }

    pub fn round(&self) -> Street {
        self.round
    }
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn hole_cards(&self, seat: usize) -> &[Card] {
        &self.hole_cards[seat]
    }
    pub fn stack(&self, seat: usize) -> Chips {
        self.stack[seat]
    }
    pub fn pot_round(&self, seat: usize) -> Chips {
        self.pot_round[seat]
    }
    pub fn pot_cumulative(&self, seat: usize) -> Chips {
        self.pot_cumulative[seat]
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }
    pub fn is_active(&self, seat: usize) -> bool {
        self.active[seat]
    }

    /// `next_seat` when awaiting a choice; `None` at a chance node or
    /// terminal state (spec.md §3 "seat to act, or sentinel for
    /// chance/terminal").
    pub fn acting_seat(&self) -> Option<usize> {
        if self.terminal || self.is_chance_node() {
            None
        } else {
            self.next_seat
        }
    }

    fn is_chance_node(&self) -> bool {
        !self.terminal && self.round != Street::Showdown && self.board.len() < self.round.board_len()
    }

    /// total chips committed to the pot across all seats, this round and
    /// earlier ones combined.
    fn total_pot(&self) -> Chips {
        (0..3).map(|s| self.pot_round[s] + self.pot_cumulative[s]).sum()
    }

    pub fn commitment_ratio(&self, seat: usize) -> f32 {
        let committed = self.pot_round[seat] + self.pot_cumulative[seat];
        let denom = committed + self.stack[seat];
        if denom <= 0.0 {
            1.0
        } else {
            committed / denom
        }
    }

    /// the first preflop action taken by `seat`, used to key the fold-range
    /// tables (spec.md §4.6: "the nine cases are keyed by seat and prior
    /// actions").
    fn first_preflop_action(&self, seat: usize) -> Option<Action> {
        self.round_history[Street::Pref as usize]
            .iter()
            .find(|(s, _)| *s == seat)
            .map(|(_, a)| *a)
    }

    fn applicable_fold_range(&self, seat: usize) -> Option<&'static std::collections::HashSet<String>> {
        let btn = self.first_preflop_action(2);
        let sb = self.first_preflop_action(0);
        foldrange::applicable_set(seat, btn, sb)
    }

    /// post-flop sizes are gated by the total pot bracket in addition to
    /// stack sufficiency (spec.md §4.6): the larger sizes only open up once
    /// the pot has grown enough to justify them.
    fn bet_size_options(&self, seat: usize, facing_bet: bool) -> Vec<BetSize> {
        let candidates: &[BetSize] = if self.round == Street::Pref {
            if facing_bet {
                &[BetSize::Four]
            } else {
                &[BetSize::Two, BetSize::Three]
            }
        } else {
            let total_pot = self.total_pot();
            if total_pot < 4.0 {
                &[BetSize::OneAndHalf, BetSize::Three]
            } else if total_pot < 8.0 {
                &[BetSize::OneAndHalf, BetSize::Three, BetSize::Four]
            } else {
                &[BetSize::OneAndHalf, BetSize::Three, BetSize::Four, BetSize::Six, BetSize::Seven]
            }
        };
        candidates
            .iter()
            .copied()
            .filter(|size| {
                let target = size.bb();
                target > self.current_bet && self.stack[seat] + self.pot_round[seat] >= target
            })
            .collect()
    }

    /// legal action set for the current node (spec.md §4.6).
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.terminal {
            return Vec::new();
        }
        if self.is_chance_node() {
            return vec![Action::Deal];
        }
        let seat = self
            .next_seat
            .expect("a non-terminal, non-chance state always has an acting seat");

        let facing_bet = self.current_bet > self.pot_round[seat];
        let ratio = self.commitment_ratio(seat);
        if facing_bet && ratio >= crate::COMMITMENT_THRESHOLD {
            // overrides the fold-range restriction below: once this
            // committed, folding is never offered (spec.md §4.6).
            return vec![Action::AllIn];
        }

        if self.round == Street::Pref {
            if let Some(fold_set) = self.applicable_fold_range(seat) {
                if let Abstraction::Preflop(label) =
                    Abstraction::preflop([self.hole_cards[seat][0], self.hole_cards[seat][1]])
                {
                    if fold_set.contains(&label) {
                        return vec![Action::Fold];
                    }
                }
            }
        }

        let mut actions = Vec::new();
        if facing_bet {
            actions.push(Action::Fold);
        } else {
            actions.push(Action::Check);
        }
        let to_call = self.current_bet - self.pot_round[seat];
        if facing_bet && to_call > 0.0 && self.stack[seat] >= to_call {
            actions.push(Action::Call);
        }
        for size in self.bet_size_options(seat, facing_bet) {
            actions.push(Action::Bet(size));
        }
        if self.stack[seat] > 0.0 {
            actions.push(Action::AllIn);
        }
        actions
    }

    /// mutate in place per spec.md §4.6. `rng` is only consulted by `Deal`.
    pub fn apply_action(&mut self, action: Action, rng: &mut impl Rng) {
        assert!(!self.terminal, "apply_action called on a terminal state");
        match action {
            Action::Deal => {
                self.deal_for_round(rng);
                return;
            }
            Action::PostSmallBlind | Action::PostBigBlind => {
                panic!("blinds are posted by new_initial_state, not apply_action");
            }
            _ => {}
        }

        let seat = self
            .next_seat
            .expect("a non-deal action requires an acting seat");

        match action {
            Action::Fold => {
                self.active[seat] = false;
            }
            Action::Check => {}
            Action::Call => {
                let to_call = self.current_bet - self.pot_round[seat];
                self.stack[seat] -= to_call;
                self.pot_round[seat] += to_call;
            }
            Action::Bet(size) => {
                let target = size.bb();
                let delta = target - self.pot_round[seat];
                self.stack[seat] -= delta;
                self.pot_round[seat] = target;
                self.current_bet = target;
            }
            Action::AllIn => {
                let delta = self.stack[seat];
                self.pot_round[seat] += delta;
                self.stack[seat] = 0.0;
                self.all_in[seat] = true;
                if self.pot_round[seat] > self.current_bet {
                    self.current_bet = self.pot_round[seat];
                }
            }
            Action::Deal | Action::PostSmallBlind | Action::PostBigBlind => unreachable!(),
        }
        self.last_action[seat] = Some(action);

        if action.is_history_recorded() {
            self.round_history[self.round as usize].push((seat, action));
        }

        if !self.active[seat] && self.active_count() == 1 {
            self.resolve_single_survivor();
            return;
        }

        if self.round_complete() {
            self.advance_round(rng);
        } else {
            self.next_seat = Some(self.next_actor(seat));
        }
    }

    fn next_actor(&self, from: usize) -> usize {
        let mut seat = (from + 1) % 3;
        loop {
            if self.active[seat] && !self.all_in[seat] {
                return seat;
            }
            seat = (seat + 1) % 3;
            if seat == from {
                return from;
            }
        }
    }

    /// a round is complete once every active, non-all-in seat has matched
    /// `current_bet` and acted at least once since the last raise (spec.md
    /// §4.6 "round-complete predicate").
    fn round_complete(&self) -> bool {
        if self.active_count() <= 1 {
            return true;
        }
        self.active
            .iter()
            .enumerate()
            .filter(|(seat, &active)| active && !self.all_in[*seat])
            .all(|(seat, _)| self.pot_round[seat] == self.current_bet && self.last_action[seat].is_some())
    }

    fn deal_for_round(&mut self, rng: &mut impl Rng) {
        let n = self.round.n_revealed();
        let drawn = self.deck.draw(n, rng);
        self.board.extend(drawn);
        // a freshly-dealt round has nobody acted yet; clear stale marks so
        // round_complete does not immediately re-fire.
        self.last_action = [None; 3];
        self.next_seat = Some(self.first_active_seat());
    }

    fn first_active_seat(&self) -> usize {
        (0..3)
            .find(|&s| self.active[s] && !self.all_in[s])
            .unwrap_or(0)
    }

    /// moves `pot_round` into `pot_cumulative`, resets round state, and
    /// advances `round` -- dealing through automatically while every
    /// remaining seat is all-in (spec.md §4.6).
    fn advance_round(&mut self, rng: &mut impl Rng) {
        for seat in 0..3 {
            self.pot_cumulative[seat] += self.pot_round[seat];
            self.pot_round[seat] = 0.0;
        }
        self.current_bet = 0.0;
        self.last_action = [None; 3];

        if self.round == Street::Rive {
            self.round = Street::Showdown;
            self.resolve_showdown();
            return;
        }
        self.round = self.round.next();

        let contested = self.active.iter().enumerate().filter(|(s, &a)| a && !self.all_in[*s]).count();
        if contested <= 1 {
            // everyone left is all-in (or folded): keep dealing through to
            // showdown without offering any actions.
            self.deal_for_round(rng);
            if self.round == Street::Showdown {
                return;
            }
            self.advance_round(rng);
        } else {
            self.next_seat = None; // chance node: board not yet dealt for this round
        }
    }

    fn resolve_single_survivor(&mut self) {
        // leave `pot_round`/`pot_cumulative` as the true per-seat
        // contributions -- `returns()` derives the winner's net from them.
        // collapsing the pot into the winner here would erase the losers'
        // contributions and zero out every fold-terminal payout.
        self.terminal = true;
        self.next_seat = None;
    }

    fn resolve_showdown(&mut self) {
        self.terminal = true;
        self.next_seat = None;
    }

    /// net chip change per seat, summing to exactly zero (spec.md §4.6
    /// "payoffs"). handles the single-survivor case and, at showdown,
    /// nested side pots by ascending all-in contribution.
    pub fn returns(&self) -> [Chips; 3] {
        assert!(self.terminal, "returns() is only defined at a terminal state");
        let contributed: [Chips; 3] = std::array::from_fn(|s| self.pot_cumulative[s] + self.pot_round[s]);

        if self.active_count() == 1 {
            let winner = (0..3).find(|&s| self.active[s]).expect("one active seat remains");
            let total: Chips = contributed.iter().sum();
            return std::array::from_fn(|s| if s == winner { total - contributed[s] } else { -contributed[s] });
        }

        let scores: [i64; 3] = std::array::from_fn(|s| {
            if self.active[s] {
                evaluator::evaluate(&self.hole_cards[s], &self.board)
            } else {
                i64::MIN
            }
        });

        let mut layers: Vec<Chips> = contributed.to_vec();
        layers.retain(|&c| c > 0.0);
        layers.sort_by(|a, b| a.partial_cmp(b).unwrap());
        layers.dedup();

        let mut payouts = [0.0 as Chips; 3];
        let mut floor = 0.0;
        for &layer in &layers {
            let contributors: Vec<usize> = (0..3).filter(|&s| self.active[s] && contributed[s] >= layer).collect();
            let layer_amount: Chips = (0..3)
                .map(|s| (contributed[s].min(layer) - floor).max(0.0))
                .sum();
            if layer_amount <= 0.0 || contributors.is_empty() {
                floor = layer;
                continue;
            }
            let best = contributors.iter().map(|&s| scores[s]).max().unwrap();
            let winners: Vec<usize> = contributors.iter().copied().filter(|&s| scores[s] == best).collect();
            let share = layer_amount / winners.len() as Chips;
            for &s in &winners {
                payouts[s] += share;
            }
            floor = layer;
        }

        std::array::from_fn(|s| payouts[s] - contributed[s])
    }

    /// `round | seat | bucket_id | action_history_for_round | pot_total |
    /// current_bet | active_count` (spec.md §3).
    /// the pipe-separated `[P<seat>:<ACTION>]` trail for the current round
    /// (spec.md §6 "PreviousActions").
    pub fn history_string(&self) -> String {
        self.round_history[self.round as usize]
            .iter()
            .map(|(s, a)| format!("[P{s}:{a}]"))
            .collect::<Vec<_>>()
            .join("|")
    }

    pub fn info_key(&self, seat: usize, bucket_id: &str) -> String {
        let history = self.history_string();
        let pot_total = self.total_pot();
        format!(
            "{}|{}|{}|{}|{:.2}|{:.2}|{}",
            self.round,
            seat,
            bucket_id,
            history,
            pot_total,
            self.current_bet,
            self.active_count(),
        )
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} | pot {:.2} | current_bet {:.2}", self.round, self.total_pot(), self.current_bet)?;
        for seat in 0..3 {
            let status = if !self.active[seat] {
                "folded"
            } else if self.all_in[seat] {
                "all-in"
            } else {
                "active"
            };
            write!(
                f,
                "  P{seat} [{status}] stack {:.2} round {:.2} cumulative {:.2}",
                self.stack[seat], self.pot_round[seat], self.pot_cumulative[seat],
            )?;
            if seat != 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> rand::rngs::SmallRng {
        rand::rngs::SmallRng::seed_from_u64(7)
    }

    #[test]
    fn chip_conservation_holds_at_initial_state() {
        let state = GameState::new_initial_state(&mut rng());
        let total: Chips = (0..3).map(|s| state.stack(s) + state.pot_round(s) + state.pot_cumulative(s)).sum();
        assert!((total - 3.0 * crate::STACK).abs() < 1e-4);
    }

    #[test]
    fn preflop_action_order_starts_at_seat_two() {
        let state = GameState::new_initial_state(&mut rng());
        assert_eq!(state.acting_seat(), Some(2));
        assert_eq!(state.current_bet(), 1.0);
    }

    #[test]
    fn commitment_override_forces_all_in() {
        let mut state = GameState::new_initial_state(&mut rng());
        state.stack[2] = 0.5;
        state.pot_round[2] = 9.5;
        state.current_bet = 10.0;
        let actions = state.legal_actions();
        assert_eq!(actions, vec![Action::AllIn]);
    }

    #[test]
    fn round_advance_resets_pot_round_and_current_bet() {
        let mut state = GameState::new_initial_state(&mut rng());
        let mut r = rng();
        // seat 2 calls, seat 0 calls, seat 1 checks -> preflop complete.
        state.apply_action(Action::Call, &mut r);
        state.apply_action(Action::Call, &mut r);
        state.apply_action(Action::Check, &mut r);
        assert!(state.is_chance_node() || state.round() == Street::Flop);
        if state.is_chance_node() {
            state.apply_action(Action::Deal, &mut r);
        }
        assert_eq!(state.current_bet(), 0.0);
        for s in 0..3 {
            assert_eq!(state.pot_round(s), 0.0);
        }
    }

    #[test]
    fn chip_conservation_through_full_hand() {
        let mut state = GameState::new_initial_state(&mut rng());
        let mut r = rng();
        let mut guard = 0;
        while !state.is_terminal() {
            guard += 1;
            assert!(guard < 200, "game did not terminate");
            let actions = state.legal_actions();
            let action = actions[0];
            state.apply_action(action, &mut r);
        }
        let returns = state.returns();
        let sum: Chips = returns.iter().sum();
        assert!(sum.abs() < 1e-3, "returns did not sum to zero: {returns:?}");
    }

    #[test]
    fn display_mentions_round_and_every_seat() {
        let state = GameState::new_initial_state(&mut rng());
        let rendered = state.to_string();
        assert!(rendered.contains("preflop"));
        assert!(rendered.contains("P0"));
        assert!(rendered.contains("P1"));
        assert!(rendered.contains("P2"));
    }

    #[test]
    fn literal_scenario_two_transition() {
        let mut state = GameState::new_initial_state(&mut rng());
        let mut r = rng();
        state.apply_action(Action::Bet(BetSize::Two), &mut r); // seat 2
        state.apply_action(Action::Fold, &mut r); // seat 0
        state.apply_action(Action::Call, &mut r); // seat 1
        if state.is_chance_node() {
            state.apply_action(Action::Deal, &mut r);
        }
        assert_eq!(state.round(), Street::Flop);
        assert!((state.pot_cumulative(0) - 0.5).abs() < 1e-4);
        assert!((state.pot_cumulative(1) - 2.0).abs() < 1e-4);
        assert!((state.pot_cumulative(2) - 2.0).abs() < 1e-4);
        for s in 0..3 {
            assert_eq!(state.pot_round(s), 0.0);
        }
    }

    #[test]
    fn fold_terminal_awards_the_pot_to_the_survivor() {
        let mut state = GameState::new_initial_state(&mut rng());
        let mut r = rng();
        state.apply_action(Action::Bet(BetSize::Two), &mut r); // seat 2 bets to 2 BB
        state.apply_action(Action::Fold, &mut r); // seat 0 folds, contributed 0.5
        state.apply_action(Action::Fold, &mut r); // seat 1 folds, contributed 1.0
        assert!(state.is_terminal());
        let returns = state.returns();
        assert!((returns[2] - 1.5).abs() < 1e-4, "winner should net opponents' contributions: {returns:?}");
        assert!((returns[0] + 0.5).abs() < 1e-4);
        assert!((returns[1] + 1.0).abs() < 1e-4);
        let sum: Chips = returns.iter().sum();
        assert!(sum.abs() < 1e-4);
    }
}
