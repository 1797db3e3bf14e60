use crate::{Probability, Utility};

/// weighting schedule applied to accumulated regret/strategy sums before
/// each iteration's contribution is added (spec.md §4.7 describes vanilla
/// CFR; this is an opt-in supplement grounded on the teacher's linear-CFR
/// policy schedule). `Vanilla` is the literal algorithm in spec.md §4.7 and
/// is the default; `Linear` down-weights early, noisier iterations the way
/// Tammelin et al.'s discounted CFR variants do.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Discount {
    #[default]
    Vanilla,
    Linear,
}

impl Discount {
    const GAMMA: f32 = 1.5;

    /// multiplier applied to the existing regret/strategy sums at the start
    /// of iteration `epoch` (0-indexed), before this iteration's sampled
    /// contribution is folded in. `1.0` for `Vanilla`: no decay, straight
    /// summation.
    pub fn decay(&self, epoch: usize) -> Utility {
        match self {
            Discount::Vanilla => 1.0,
            Discount::Linear => {
                let t = epoch as f32;
                ((t / (t + 1.0)).powf(Self::GAMMA)) as Utility
            }
        }
    }

    /// weight given to this iteration's own contribution, growing linearly
    /// with `epoch` under `Linear` so later, better-informed iterations
    /// count for more of the average strategy.
    pub fn weight(&self, epoch: usize) -> Probability {
        match self {
            Discount::Vanilla => 1.0,
            Discount::Linear => (epoch + 1) as Probability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanilla_never_decays_and_weighs_every_iteration_equally() {
        let d = Discount::Vanilla;
        for epoch in [0, 1, 100] {
            assert_eq!(d.decay(epoch), 1.0);
            assert_eq!(d.weight(epoch), 1.0);
        }
    }

    #[test]
    fn linear_decay_grows_toward_one_and_weight_grows_with_epoch() {
        let d = Discount::Linear;
        let early = d.decay(0);
        let later = d.decay(50);
        assert!(early < later);
        assert!(later <= 1.0);
        assert!(d.weight(0) < d.weight(10));
    }

    #[test]
    fn default_is_vanilla() {
        assert_eq!(Discount::default(), Discount::Vanilla);
    }
}
