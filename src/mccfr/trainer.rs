use super::discount::Discount;
use super::prune::Prune;
use super::regret::RegretNode;
use super::table::InfoTable;
use crate::cards::{Card, Street};
use crate::clustering::{Abstraction, BucketTable, MissingBucketLog, RankPattern, SuitPattern};
use crate::gameplay::{Action, GameState};
use crate::Utility;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// the explicit dependency bundle the spec calls for instead of file-scope
/// mutable globals (spec.md §9 "Global mutable state ... specify them as
/// explicit dependencies passed into the trainer"). `discount` and `prune`
/// default to the vanilla, always-on settings (spec.md §4.7); set them via
/// `with_discount`/`with_prune` to opt into the supplemental schedules.
pub struct TrainerContext {
    pub table: InfoTable,
    pub buckets: BucketTable,
    pub discount: Discount,
    pub prune: Option<Prune>,
    pub missing_buckets: MissingBucketLog,
}

impl TrainerContext {
    pub fn new(buckets: BucketTable) -> Self {
        Self {
            table: InfoTable::new(),
            buckets,
            discount: Discount::Vanilla,
            prune: None,
            missing_buckets: MissingBucketLog::new(),
        }
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_prune(mut self, prune: Prune) -> Self {
        self.prune = Some(prune);
        self
    }
}

/// external-sampling MCCFR over the three-seat Spin & Go tree (spec.md
/// §4.7). Owns the shared context and a cooperative stop flag; holds no
/// RNG of its own, since each call site seeds its own per-iteration source
/// (spec.md §5 "PRNG: thread-local after a single mutex-protected seed").
pub struct Trainer {
    ctx: Arc<TrainerContext>,
    seed: u64,
    stop: Arc<AtomicBool>,
}

impl Trainer {
    pub fn new(buckets: BucketTable, seed: u64) -> Self {
        Self::from_context(TrainerContext::new(buckets), seed)
    }

    /// as `new`, but from a fully assembled `TrainerContext` -- the entry
    /// point for opting into `with_discount`/`with_prune` before training.
    pub fn from_context(ctx: TrainerContext, seed: u64) -> Self {
        Self {
            ctx: Arc::new(ctx),
            seed,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn context(&self) -> &TrainerContext {
        &self.ctx
    }

    /// cooperative cancellation, polled between iterations (spec.md §5).
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// single-threaded driver, used when the `server` feature (and its
    /// rayon thread pool) is unavailable.
    pub fn train_sequential(&self, iterations: usize) {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for epoch in 0..iterations {
            if self.stopped() {
                break;
            }
            run_iteration(&self.ctx, epoch, &mut rng);
        }
    }

    /// one rayon task per iteration, each with its own thread-local RNG
    /// seeded deterministically from the trainer's base seed (spec.md §5).
    #[cfg(feature = "server")]
    pub fn train_parallel(&self, iterations: usize) {
        use rayon::prelude::*;
        let base = self.seed;
        (0..iterations).into_par_iter().for_each(|epoch| {
            if self.stopped() {
                return;
            }
            let mut rng = SmallRng::seed_from_u64(base.wrapping_add(epoch as u64));
            run_iteration(&self.ctx, epoch, &mut rng);
        });
    }
}

/// one training iteration: a fresh deal, walked once per traversing seat
/// (spec.md §4.7 "for each training iteration and each traversing seat").
/// `epoch` feeds the discount/pruning schedules and is otherwise ignored
/// under their vanilla defaults.
fn run_iteration(ctx: &TrainerContext, epoch: usize, rng: &mut impl Rng) {
    for p in 0..3 {
        let state = GameState::new_initial_state(rng);
        walk(&state, p, [1.0, 1.0, 1.0], ctx, epoch, rng);
    }
}

/// the abstraction label used as the info-key's bucket component: the
/// 169-class string preflop, or the looked-up numeric cluster id
/// post-flop. A bucket-table miss is non-fatal -- it falls back to the raw
/// rank/suit pattern as its own label, so the trainer still creates a
/// (smaller-population but still valid) info set (spec.md §7
/// `ErrorKind::MissingBucket`).
fn bucket_label(
    round: Street,
    hole: &[Card],
    board: &[Card],
    buckets: &BucketTable,
    missing: &MissingBucketLog,
) -> String {
    if round == Street::Pref {
        return match Abstraction::preflop([hole[0], hole[1]]) {
            Abstraction::Preflop(label) => label,
            _ => unreachable!("Abstraction::preflop always returns Preflop"),
        };
    }
    let mut cards = hole.to_vec();
    cards.extend_from_slice(board);
    let rank_pattern = RankPattern::of(&cards);
    let suit_pattern = SuitPattern::of(&cards);
    match buckets.lookup(round, &rank_pattern, &suit_pattern) {
        Some(id) => id.to_string(),
        None => {
            let key = format!("MISS:{rank_pattern:?}|{suit_pattern:?}");
            missing.warn_once(&key);
            key
        }
    }
}

fn sample_index(weights: &[Utility], rng: &mut impl Rng) -> usize {
    let total: Utility = weights.iter().sum();
    let mut target = rng.random::<Utility>() * total;
    for (i, &w) in weights.iter().enumerate() {
        target -= w;
        if target <= 0.0 {
            return i;
        }
    }
    weights.len() - 1
}

/// recursive external-sampling walk (spec.md §4.7). `reach[i]` is seat i's
/// probability of reaching `state` under the current strategies. `epoch` is
/// the training iteration index, consulted only by `ctx.discount`/`ctx.prune`.
fn walk(
    state: &GameState,
    p: usize,
    reach: [Utility; 3],
    ctx: &TrainerContext,
    epoch: usize,
    rng: &mut impl Rng,
) -> Utility {
    if state.is_terminal() {
        return state.returns()[p] as Utility;
    }
    let Some(seat) = state.acting_seat() else {
        let mut next = state.clone();
        next.apply_action(Action::Deal, rng);
        return walk(&next, p, reach, ctx, epoch, rng);
    };

    let actions = state.legal_actions();
    let n = actions.len();
    let label = bucket_label(state.round(), state.hole_cards(seat), state.board(), &ctx.buckets, &ctx.missing_buckets);
    let key = state.info_key(seat, &label);
    let opp_reach: Utility = (0..3).filter(|&i| i != seat).map(|i| reach[i]).product();

    let make_node = {
        let actions = actions.clone();
        let round = state.round();
        let previous_actions = state.history_string();
        let label = label.clone();
        let pot = (0..3).map(|s| state.pot_round(s) + state.pot_cumulative(s)).sum();
        move || RegretNode::new(actions, round, seat, label, previous_actions, pot)
    };

    let sigma = ctx.table.with_node(&key, make_node.clone(), |node| node.current_strategy());
    let decay = ctx.discount.decay(epoch);
    let weight = ctx.discount.weight(epoch) as Utility;

    if seat == p {
        let existing_regret = ctx.table.with_node(&key, make_node.clone(), |node| node.regret_sum().to_vec());
        let mut skip = vec![false; n];
        if let Some(pr) = ctx.prune {
            for i in 0..n {
                skip[i] = pr.should_skip(epoch, existing_regret[i], rng);
            }
        }

        let mut util = vec![0.0 as Utility; n];
        for (i, &action) in actions.iter().enumerate() {
            if skip[i] {
                continue;
            }
            let mut next = state.clone();
            next.apply_action(action, rng);
            let mut next_reach = reach;
            next_reach[p] *= sigma[i];
            util[i] = walk(&next, p, next_reach, ctx, epoch, rng);
        }
        // node utility is the sigma-weighted average over the arms actually
        // explored this iteration, renormalized so pruned arms don't drag it
        // toward zero (spec.md §4.7 defines node utility over all arms; this
        // is the pruning-aware approximation, a no-op when nothing is
        // skipped).
        let active_weight: Utility = (0..n).filter(|&i| !skip[i]).map(|i| sigma[i]).sum();
        let node_util: Utility = if active_weight > 0.0 {
            (0..n).filter(|&i| !skip[i]).map(|i| sigma[i] * util[i]).sum::<Utility>() / active_weight
        } else {
            0.0
        };
        ctx.table.with_node(&key, make_node, |node| {
            node.decay_regret(decay);
            node.decay_strategy(decay);
            for i in 0..n {
                if skip[i] {
                    continue;
                }
                node.add_regret(i, opp_reach * (util[i] - node_util));
                if n > 1 {
                    node.add_strategy(i, opp_reach * sigma[i] * weight);
                }
            }
            node.record_update();
        });
        node_util
    } else {
        let index = sample_index(&sigma, rng);
        let mut next = state.clone();
        next.apply_action(actions[index], rng);
        let mut next_reach = reach;
        next_reach[seat] *= sigma[index];
        let value = walk(&next, p, next_reach, ctx, epoch, rng);
        ctx.table.with_node(&key, make_node, |node| {
            node.decay_strategy(decay);
            if n > 1 {
                node.add_strategy(index, opp_reach * sigma[index] * weight);
            }
            node.record_update();
        });
        value
    }
}
