//! Folds reconstructed rounds into half, overtime and team scores.
//!
//! Rounds 1-12 are the first half, 13-24 the second half and everything after
//! is overtime, played in periods of 3 rounds with sides swapping between
//! periods.

use crate::reconstruct::CanonicalRound;
use crate::{Error, Side};

pub const HALF_ROUNDS: u32 = 12;
pub const REGULATION_ROUNDS: u32 = 2 * HALF_ROUNDS;
pub const OVERTIME_PERIOD_ROUNDS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    FirstHalf,
    SecondHalf,
    Overtime { period: u32 },
}

pub fn phase(round: u32) -> Phase {
    if round <= HALF_ROUNDS {
        Phase::FirstHalf
    } else if round <= REGULATION_ROUNDS {
        Phase::SecondHalf
    } else {
        Phase::Overtime {
            period: (round - REGULATION_ROUNDS - 1) / OVERTIME_PERIOD_ROUNDS,
        }
    }
}

/// The side a team that started on `starting` plays in the given round.
pub fn side_for_team(starting: Side, round: u32) -> Side {
    match phase(round) {
        Phase::FirstHalf => starting,
        Phase::SecondHalf => starting.opposite(),
        Phase::Overtime { period } if period % 2 == 0 => starting,
        Phase::Overtime { .. } => starting.opposite(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SideCount {
    pub t: usize,
    pub ct: usize,
}

impl SideCount {
    fn add(&mut self, side: Side) {
        match side {
            Side::T => self.t += 1,
            Side::CT => self.ct += 1,
        }
    }

    pub fn get(&self, side: Side) -> usize {
        match side {
            Side::T => self.t,
            Side::CT => self.ct,
        }
    }

    pub fn total(&self) -> usize {
        self.t + self.ct
    }
}

/// Round wins keyed by side rather than by team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SideScores {
    pub first_half: SideCount,
    pub second_half: SideCount,
    pub overtime: SideCount,
}

impl SideScores {
    pub fn total(&self, side: Side) -> usize {
        self.first_half.get(side) + self.second_half.get(side) + self.overtime.get(side)
    }
}

pub fn tally(rounds: &[CanonicalRound]) -> SideScores {
    let mut scores = SideScores::default();
    for round in rounds {
        let count = match phase(round.number) {
            Phase::FirstHalf => &mut scores.first_half,
            Phase::SecondHalf => &mut scores.second_half,
            Phase::Overtime { .. } => &mut scores.overtime,
        };
        count.add(round.winner);
    }
    scores
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamDeclaration {
    pub name: String,
    pub starting_side: Side,
}

impl TeamDeclaration {
    pub fn new(name: impl Into<String>, starting_side: Side) -> Self {
        Self {
            name: name.into(),
            starting_side,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamScore {
    pub name: String,
    pub starting_side: Side,
    pub total: usize,
    pub first_half: usize,
    pub second_half: usize,
    pub overtime: usize,
}

pub fn score_team(rounds: &[CanonicalRound], team: &TeamDeclaration) -> TeamScore {
    let mut score = TeamScore {
        name: team.name.clone(),
        starting_side: team.starting_side,
        total: 0,
        first_half: 0,
        second_half: 0,
        overtime: 0,
    };

    for round in rounds
        .iter()
        .filter(|r| r.winner == side_for_team(team.starting_side, r.number))
    {
        match phase(round.number) {
            Phase::FirstHalf => score.first_half += 1,
            Phase::SecondHalf => score.second_half += 1,
            Phase::Overtime { .. } => score.overtime += 1,
        };
    }
    score.total = score.first_half + score.second_half + score.overtime;

    score
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchMeta {
    pub map_name: String,
    pub tick_rate: f32,
    pub match_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchResult {
    pub meta: MatchMeta,
    pub rounds: Vec<CanonicalRound>,
    pub sides: SideScores,
    /// Only present when both teams declared their starting side.
    pub teams: Option<[TeamScore; 2]>,
}

impl MatchResult {
    pub fn is_overtime(&self) -> bool {
        self.rounds.len() > REGULATION_ROUNDS as usize
    }
}

#[tracing::instrument(skip_all, fields(rounds = rounds.len()))]
pub fn aggregate(
    meta: MatchMeta,
    rounds: Vec<CanonicalRound>,
    teams: Option<[TeamDeclaration; 2]>,
) -> Result<MatchResult, Error> {
    let sides = tally(&rounds);
    tracing::debug!(?sides, "Side tally");

    let teams = match teams {
        Some([a, b]) => {
            if a.starting_side == b.starting_side {
                return Err(Error::ConflictingSides(a.starting_side));
            }

            let scores = [score_team(&rounds, &a), score_team(&rounds, &b)];
            for score in scores.iter() {
                tracing::info!(
                    team = %score.name,
                    side = %score.starting_side,
                    total = score.total,
                    first_half = score.first_half,
                    second_half = score.second_half,
                    overtime = score.overtime,
                    "Team score"
                );
            }
            Some(scores)
        }
        None => {
            tracing::warn!("No side declarations, reporting scores by side only");
            None
        }
    };

    Ok(MatchResult {
        meta,
        rounds,
        sides,
        teams,
    })
}
