/// betting round, totally ordered `Pref < Flop < Turn < Rive < Showdown`.
/// `Showdown` is terminal-only: it is never dealt into and never has legal
/// actions besides the pot being resolved.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    Pref = 0,
    Flop = 1,
    Turn = 2,
    Rive = 3,
    Showdown = 4,
}

impl Street {
    pub const fn all() -> [Self; 5] {
        [Self::Pref, Self::Flop, Self::Turn, Self::Rive, Self::Showdown]
    }
    pub const fn next(&self) -> Self {
        match self {
            Self::Pref => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::Rive,
            Self::Rive => Self::Showdown,
            Self::Showdown => panic!("showdown is terminal"),
        }
    }
    /// number of new community cards revealed on entry to this street
    pub const fn n_revealed(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 1,
            Self::Rive => 1,
            Self::Showdown => 0,
        }
    }
    /// total community cards visible during this street
    pub const fn board_len(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive => 5,
            Self::Showdown => 5,
        }
    }
    pub const fn is_terminal_only(&self) -> bool {
        matches!(self, Self::Showdown)
    }

    /// default `K` for the bucket clusterer on this street (spec.md §4.4),
    /// `None` where clustering doesn't apply: preflop uses the 169 exact
    /// canonical classes (spec.md §4.5), not a k-means bucket table.
    pub const fn default_cluster_count(&self) -> Option<usize> {
        match self {
            Self::Pref | Self::Showdown => None,
            Self::Flop => Some(crate::KMEANS_FLOP_CLUSTER_COUNT),
            Self::Turn => Some(crate::KMEANS_TURN_CLUSTER_COUNT),
            Self::Rive => Some(crate::KMEANS_RIVER_CLUSTER_COUNT),
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pref => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::Rive => write!(f, "river"),
            Self::Showdown => write!(f, "showdown"),
        }
    }
}

impl std::str::FromStr for Street {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preflop" => Ok(Self::Pref),
            "flop" => Ok(Self::Flop),
            "turn" => Ok(Self::Turn),
            "river" => Ok(Self::Rive),
            "showdown" => Ok(Self::Showdown),
            _ => Err(anyhow::anyhow!("invalid street '{s}'")),
        }
    }
}

impl crate::Arbitrary for Street {
    fn random() -> Self {
        use rand::Rng;
        match rand::rng().random_range(0..5u8) {
            0 => Self::Pref,
            1 => Self::Flop,
            2 => Self::Turn,
            3 => Self::Rive,
            _ => Self::Showdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_totally_ordered() {
        assert!(Street::Pref < Street::Flop);
        assert!(Street::Flop < Street::Turn);
        assert!(Street::Turn < Street::Rive);
        assert!(Street::Rive < Street::Showdown);
    }

    #[test]
    fn round_trips_through_display() {
        for s in Street::all() {
            assert_eq!(s.to_string().parse::<Street>().unwrap(), s);
        }
    }

    #[test]
    fn only_postflop_streets_have_a_default_cluster_count() {
        assert_eq!(Street::Pref.default_cluster_count(), None);
        assert_eq!(Street::Showdown.default_cluster_count(), None);
        assert_eq!(Street::Flop.default_cluster_count(), Some(128));
        assert_eq!(Street::Turn.default_cluster_count(), Some(144));
        assert_eq!(Street::Rive.default_cluster_count(), Some(101));
    }
}
