use analysis::reconstruct::CanonicalRound;
use analysis::score::{MatchResult, SideCount, TeamScore};
use analysis::{EndReason, Side};
use common::{HalfScores, MatchSummary, RoundEndReason, RoundSummary, SideScores, TeamSide, TeamSummary};

pub fn team_side(side: Side) -> TeamSide {
    match side {
        Side::T => TeamSide::T,
        Side::CT => TeamSide::CT,
    }
}

pub fn end_reason(reason: EndReason) -> RoundEndReason {
    match reason {
        EndReason::BombDetonated => RoundEndReason::BombDetonated,
        EndReason::BombDefused => RoundEndReason::BombDefused,
        EndReason::CTsEliminated => RoundEndReason::CTsEliminated,
        EndReason::TsEliminated => RoundEndReason::TerroristsEliminated,
        EndReason::TimeExpired => RoundEndReason::TimeExpired,
        EndReason::Unknown => RoundEndReason::Unknown,
    }
}

/// `75` -> `"1:15"`
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// `de_nuke` -> `Nuke`
pub fn display_map_name(map_name: &str) -> String {
    let name = map_name
        .strip_prefix("de_")
        .or_else(|| map_name.strip_prefix("cs_"))
        .unwrap_or(map_name);

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => "Unknown".to_owned(),
    }
}

fn round_summary(round: &CanonicalRound) -> RoundSummary {
    RoundSummary {
        number: round.number,
        winner_side: team_side(round.winner),
        end_reason: end_reason(round.reason),
        duration: format_duration(round.duration_seconds),
        bomb_planted: round.bomb_planted,
        total_kills: round.total_kills,
        first_kill_side: team_side(round.first_kill_side),
    }
}

fn scored_team(score: &TeamScore) -> TeamSummary {
    TeamSummary {
        name: score.name.clone(),
        score: score.total,
        side: Some(team_side(score.starting_side)),
        half_scores: HalfScores {
            first_half: score.first_half,
            second_half: score.second_half,
            overtime: score.overtime,
        },
    }
}

fn unscored_team(name: String) -> TeamSummary {
    TeamSummary {
        name,
        score: 0,
        side: None,
        half_scores: HalfScores::default(),
    }
}

fn side_halves(sides: &analysis::score::SideScores, side: Side) -> HalfScores {
    let get = |count: &SideCount| count.get(side);
    HalfScores {
        first_half: get(&sides.first_half),
        second_half: get(&sides.second_half),
        overtime: get(&sides.overtime),
    }
}

/// Builds the output record. `names` are used for the teams when the result
/// carries no team scores.
pub fn summarize(result: &MatchResult, names: [String; 2]) -> MatchSummary {
    let (team_a, team_b, side_scores) = match &result.teams {
        Some([a, b]) => (scored_team(a), scored_team(b), None),
        None => {
            let [a, b] = names;
            let sides = SideScores {
                t: side_halves(&result.sides, Side::T),
                ct: side_halves(&result.sides, Side::CT),
            };
            (unscored_team(a), unscored_team(b), Some(sides))
        }
    };

    MatchSummary {
        match_id: result.meta.match_id.clone(),
        map_name: display_map_name(&result.meta.map_name),
        team_a,
        team_b,
        rounds: result.rounds.iter().map(round_summary).collect(),
        duration: format!("{}m", result.rounds.len() * 2),
        tickrate: result.meta.tick_rate.round() as u32,
        side_scores,
    }
}
