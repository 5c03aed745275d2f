use crate::events::Code;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Side {
    T,
    CT,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::T => Self::CT,
            Self::CT => Self::T,
        }
    }

    /// Decodes a side marker, either the game's team number (2 = T, 3 = CT)
    /// or a symbolic name.
    pub fn from_code(code: &Code) -> Option<Self> {
        match code {
            Code::Numeric(2) => Some(Self::T),
            Code::Numeric(3) => Some(Self::CT),
            Code::Numeric(_) => None,
            Code::Named(name) => SIDE_NAMES.get(name.trim().to_ascii_uppercase().as_str()).copied(),
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::T => write!(f, "T"),
            Self::CT => write!(f, "CT"),
        }
    }
}

static SIDE_NAMES: phf::Map<&'static str, Side> = phf::phf_map! {
    "T" => Side::T,
    "TERRORIST" => Side::T,
    "CT" => Side::CT,
    "COUNTERTERRORIST" => Side::CT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EndReason {
    BombDetonated,
    BombDefused,
    CTsEliminated,
    TsEliminated,
    TimeExpired,
    Unknown,
}

impl EndReason {
    /// Guesses the cause of a round end whose reason code was not recognized.
    pub fn infer(winner: Side, bomb_planted: bool, bomb_defused: bool, kills: usize, max_kills: usize) -> Self {
        if bomb_defused {
            Self::BombDefused
        } else if bomb_planted && winner == Side::T {
            Self::BombDetonated
        } else if !bomb_planted && kills < max_kills {
            Self::TimeExpired
        } else {
            Self::eliminated_by(winner)
        }
    }

    /// The elimination reason for a round won by `winner`.
    pub fn eliminated_by(winner: Side) -> Self {
        match winner {
            Side::T => Self::CTsEliminated,
            Side::CT => Self::TsEliminated,
        }
    }
}

impl core::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::BombDetonated => "Bomb Detonated",
            Self::BombDefused => "Bomb Defused",
            Self::CTsEliminated => "CTs Eliminated",
            Self::TsEliminated => "Terrorists Eliminated",
            Self::TimeExpired => "Time Expired",
            Self::Unknown => "Unknown",
        };
        write!(f, "{}", label)
    }
}

// Elimination labels name the side that was eliminated, so they always point
// at the opposite of the winner (8 / t_killed: CT win, 9 / ct_killed: T win).
// https://github.com/markus-wa/demoinfocs-golang/blob/205b0bb25e9f3e96e1d306d154199b4a6292940e/pkg/demoinfocs/events/events.go#L53
pub static NUMERIC_REASONS: phf::Map<i32, (Side, EndReason)> = phf::phf_map! {
    1_i32 => (Side::T, EndReason::BombDetonated),
    7_i32 => (Side::CT, EndReason::BombDefused),
    8_i32 => (Side::CT, EndReason::TsEliminated),
    9_i32 => (Side::T, EndReason::CTsEliminated),
    10_i32 => (Side::CT, EndReason::TimeExpired),
};

pub static NAMED_REASONS: phf::Map<&'static str, (Side, EndReason)> = phf::phf_map! {
    "bomb_exploded" => (Side::T, EndReason::BombDetonated),
    "target_bombed" => (Side::T, EndReason::BombDetonated),
    "bomb_defused" => (Side::CT, EndReason::BombDefused),
    "t_killed" => (Side::CT, EndReason::TsEliminated),
    "ct_killed" => (Side::T, EndReason::CTsEliminated),
    "ct_win_time" => (Side::CT, EndReason::TimeExpired),
    "t_win_time" => (Side::T, EndReason::TimeExpired),
    "target_saved" => (Side::CT, EndReason::TimeExpired),
};

/// Looks up a reason code in the reason table, returning the side that wins
/// with that reason and its label.
pub fn lookup(code: &Code) -> Option<(Side, EndReason)> {
    match code {
        Code::Numeric(value) => i32::try_from(*value)
            .ok()
            .and_then(|value| NUMERIC_REASONS.get(&value))
            .copied(),
        Code::Named(name) => NAMED_REASONS
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_codes() {
        assert_eq!(Some(Side::T), Side::from_code(&Code::Numeric(2)));
        assert_eq!(Some(Side::CT), Side::from_code(&Code::Numeric(3)));
        assert_eq!(Some(Side::CT), Side::from_code(&"ct".into()));
        assert_eq!(Some(Side::T), Side::from_code(&"T".into()));
        assert_eq!(None, Side::from_code(&Code::Numeric(0)));
        assert_eq!(None, Side::from_code(&"Spectator".into()));
    }

    #[test]
    fn numeric_and_named_codes_agree() {
        let pairs: [(i64, &str); 5] = [
            (1, "bomb_exploded"),
            (7, "bomb_defused"),
            (8, "t_killed"),
            (9, "ct_killed"),
            (10, "ct_win_time"),
        ];

        for (numeric, named) in pairs {
            assert_eq!(lookup(&Code::Numeric(numeric)), lookup(&named.into()), "{} / {}", numeric, named);
        }
    }

    #[test]
    fn elimination_label_opposes_winner() {
        for (winner, reason) in NUMERIC_REASONS.values().chain(NAMED_REASONS.values()) {
            match reason {
                EndReason::CTsEliminated => assert_eq!(Side::T, *winner),
                EndReason::TsEliminated => assert_eq!(Side::CT, *winner),
                _ => {}
            }
        }
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(None, lookup(&Code::Numeric(12)));
        assert_eq!(None, lookup(&Code::Numeric(i64::MAX)));
        assert_eq!(None, lookup(&"vip_escaped".into()));
    }

    #[test]
    fn inference() {
        assert_eq!(EndReason::BombDefused, EndReason::infer(Side::CT, true, true, 4, 10));
        assert_eq!(EndReason::BombDetonated, EndReason::infer(Side::T, true, false, 3, 10));
        assert_eq!(EndReason::TimeExpired, EndReason::infer(Side::CT, false, false, 6, 10));
        assert_eq!(EndReason::CTsEliminated, EndReason::infer(Side::T, false, false, 10, 10));
        assert_eq!(EndReason::TsEliminated, EndReason::infer(Side::CT, true, false, 7, 10));
    }
}
