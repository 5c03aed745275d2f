//! Wire format of a processed match, as handed to consumers of the JSON
//! output.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TeamSide {
    CT,
    T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoundEndReason {
    #[serde(rename = "Bomb Detonated")]
    BombDetonated,
    #[serde(rename = "Bomb Defused")]
    BombDefused,
    #[serde(rename = "Terrorists Eliminated")]
    TerroristsEliminated,
    #[serde(rename = "CTs Eliminated")]
    CTsEliminated,
    #[serde(rename = "Time Expired")]
    TimeExpired,
    #[serde(rename = "Unknown")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: Option<String>,
    pub map_name: String,
    pub team_a: TeamSummary,
    pub team_b: TeamSummary,
    pub rounds: Vec<RoundSummary>,
    pub duration: String,
    pub tickrate: u32,
    /// Round wins per side, present when the teams' sides are unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_scores: Option<SideScores>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub name: String,
    pub score: usize,
    pub side: Option<TeamSide>,
    pub half_scores: HalfScores,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfScores {
    pub first_half: usize,
    pub second_half: usize,
    pub overtime: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideScores {
    pub t: HalfScores,
    pub ct: HalfScores,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub number: u32,
    pub winner_side: TeamSide,
    pub end_reason: RoundEndReason,
    /// `M:SS`
    pub duration: String,
    pub bomb_planted: bool,
    pub total_kills: usize,
    pub first_kill_side: TeamSide,
}
