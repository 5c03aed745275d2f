//! Record streams as produced by the event loader.
//!
//! Field names follow the exporter's column names (`round`, `reason`,
//! `winner`, `tick`, `attacker_team`) so an export can be deserialized
//! directly with serde.

/// A side or reason code as it appears in the export: either the numeric
/// game value or a symbolic name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Code {
    Numeric(i64),
    Named(String),
}

impl From<i64> for Code {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for Code {
    fn from(value: &str) -> Self {
        Self::Named(value.to_owned())
    }
}

/// One observed round-end signal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawRoundEvent {
    /// Round number as reported by the source. May repeat, skip or be absent.
    #[serde(default)]
    pub round: Option<u32>,
    #[serde(default)]
    pub reason: Option<Code>,
    /// Absent for warmup/restart signals.
    #[serde(default)]
    pub winner: Option<Code>,
    #[serde(default)]
    pub tick: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KillEvent {
    pub tick: u32,
    #[serde(default)]
    pub round: Option<u32>,
    #[serde(default)]
    pub attacker_team: Option<Code>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BombEvent {
    pub tick: u32,
    #[serde(default)]
    pub round: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Header {
    #[serde(default)]
    pub map_name: String,
    #[serde(default)]
    pub tickrate: Option<f32>,
    #[serde(default)]
    pub match_id: Option<String>,
}

impl Header {
    pub const DEFAULT_TICK_RATE: f32 = 64.0;

    /// The declared tick rate, or 64 when the header has none (or zero).
    pub fn tick_rate(&self) -> f32 {
        self.tickrate
            .filter(|rate| *rate > 0.0)
            .unwrap_or(Self::DEFAULT_TICK_RATE)
    }
}

/// Everything the reconstructor consumes for one match.
///
/// The auxiliary streams are optional; a missing stream leaves the
/// corresponding enrichment fields at their defaults.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EventStreams {
    #[serde(default)]
    pub header: Header,
    pub round_end: Vec<RawRoundEvent>,
    #[serde(default)]
    pub player_death: Option<Vec<KillEvent>>,
    #[serde(default)]
    pub bomb_planted: Option<Vec<BombEvent>>,
    #[serde(default)]
    pub bomb_defused: Option<Vec<BombEvent>>,
}

impl EventStreams {
    pub fn new(round_end: Vec<RawRoundEvent>) -> Self {
        Self {
            round_end,
            ..Default::default()
        }
    }
}
