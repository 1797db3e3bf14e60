/// the closed set of discrete bet sizes, expressed as the resulting
/// `current_bet` in BB (spec.md §3 "BET_k means 'make the current bet equal
/// to k BB'").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BetSize {
    One,
    OneAndHalf,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
}

impl BetSize {
    pub const fn all() -> [Self; 8] {
        [
            Self::One,
            Self::OneAndHalf,
            Self::Two,
            Self::Three,
            Self::Four,
            Self::Five,
            Self::Six,
            Self::Seven,
        ]
    }
    pub const fn bb(&self) -> f32 {
        match self {
            Self::One => 1.0,
            Self::OneAndHalf => 1.5,
            Self::Two => 2.0,
            Self::Three => 3.0,
            Self::Four => 4.0,
            Self::Five => 5.0,
            Self::Six => 6.0,
            Self::Seven => 7.0,
        }
    }
}

impl std::str::FromStr for BetSize {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_prefix("BET_").unwrap_or(s);
        Self::all()
            .into_iter()
            .find(|size| size.bb().to_string() == body || body.parse::<f32>().ok() == Some(size.bb()))
            .ok_or_else(|| anyhow::anyhow!("unrecognized bet size '{s}'"))
    }
}

impl std::fmt::Display for BetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bb = self.bb();
        if bb.fract() == 0.0 {
            write!(f, "BET_{}", bb as u32)
        } else {
            write!(f, "BET_{bb}")
        }
    }
}

/// the closed tagged union of legal poker actions (spec.md §3). a flat enum
/// + match, not a polymorphic subtype hierarchy (spec.md §9 "dynamic
/// dispatch").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(BetSize),
    AllIn,
    Deal,
    PostSmallBlind,
    PostBigBlind,
}

impl Action {
    /// whether this action appears in `round_history` (spec.md §4.6
    /// "apply_action ... append (seat, action) ... excluding blinds/deal").
    pub fn is_history_recorded(&self) -> bool {
        !matches!(self, Action::Deal | Action::PostSmallBlind | Action::PostBigBlind)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "FOLD"),
            Action::Check => write!(f, "CHECK"),
            Action::Call => write!(f, "CALL"),
            Action::Bet(size) => write!(f, "{size}"),
            Action::AllIn => write!(f, "ALL_IN"),
            Action::Deal => write!(f, "DEAL"),
            Action::PostSmallBlind => write!(f, "POST_SB"),
            Action::PostBigBlind => write!(f, "POST_BB"),
        }
    }
}

impl std::str::FromStr for Action {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOLD" => Ok(Action::Fold),
            "CHECK" => Ok(Action::Check),
            "CALL" => Ok(Action::Call),
            "ALL_IN" => Ok(Action::AllIn),
            "DEAL" => Ok(Action::Deal),
            "POST_SB" => Ok(Action::PostSmallBlind),
            "POST_BB" => Ok(Action::PostBigBlind),
            other if other.starts_with("BET_") => Ok(Action::Bet(other.parse()?)),
            other => Err(anyhow::anyhow!("unrecognized action '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bet_size_displays_without_trailing_zero() {
        assert_eq!(BetSize::Two.to_string(), "BET_2");
        assert_eq!(BetSize::OneAndHalf.to_string(), "BET_1.5");
    }

    #[test]
    fn blinds_and_deal_are_excluded_from_history() {
        assert!(!Action::PostSmallBlind.is_history_recorded());
        assert!(!Action::PostBigBlind.is_history_recorded());
        assert!(!Action::Deal.is_history_recorded());
        assert!(Action::Fold.is_history_recorded());
        assert!(Action::Bet(BetSize::Three).is_history_recorded());
    }

    #[test]
    fn action_display_round_trips_through_from_str() {
        for action in [
            Action::Fold,
            Action::Check,
            Action::Call,
            Action::AllIn,
            Action::Deal,
            Action::PostSmallBlind,
            Action::PostBigBlind,
        ] {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
        for size in BetSize::all() {
            let action = Action::Bet(size);
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn unrecognized_action_string_is_an_error() {
        assert!("SHRUG".parse::<Action>().is_err());
    }
}
