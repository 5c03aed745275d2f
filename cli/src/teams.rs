//! Resolves team names and starting sides from CLI flags, the sidecar config
//! file and the demo's file name, in that order of precedence.

use std::path::{Path, PathBuf};

use analysis::events::Code;
use analysis::score::TeamDeclaration;
use analysis::Side;

pub const DEFAULT_TEAM_A: &str = "Team A";
pub const DEFAULT_TEAM_B: &str = "Team B";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub name: Option<String>,
    pub side: Option<Side>,
}

impl Team {
    fn or(self, other: Team) -> Team {
        Team {
            name: self.name.or(other.name),
            side: self.side.or(other.side),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Teams {
    pub a: Team,
    pub b: Team,
}

impl Teams {
    /// Fills every field that is still unknown from `other`.
    pub fn or(self, other: Teams) -> Teams {
        Teams {
            a: self.a.or(other.a),
            b: self.b.or(other.b),
        }
    }

    pub fn names(&self) -> [String; 2] {
        [
            self.a.name.clone().unwrap_or_else(|| DEFAULT_TEAM_A.to_owned()),
            self.b.name.clone().unwrap_or_else(|| DEFAULT_TEAM_B.to_owned()),
        ]
    }

    /// The side declarations for scoring. With only one side known the other
    /// team gets the opposite one; with neither there is nothing to declare.
    pub fn declarations(&self) -> Option<[TeamDeclaration; 2]> {
        let (a_side, b_side) = match (self.a.side, self.b.side) {
            (Some(a), Some(b)) => (a, b),
            (Some(a), None) => (a, a.opposite()),
            (None, Some(b)) => (b.opposite(), b),
            (None, None) => return None,
        };

        let [a_name, b_name] = self.names();
        Some([
            TeamDeclaration::new(a_name, a_side),
            TeamDeclaration::new(b_name, b_side),
        ])
    }
}

/// `<demo>.config.json` next to the demo.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct SidecarConfig {
    #[serde(rename = "teamA", default)]
    pub team_a: Option<String>,
    #[serde(rename = "teamA_side", default)]
    pub team_a_side: Option<String>,
    #[serde(rename = "teamB", default)]
    pub team_b: Option<String>,
    #[serde(rename = "teamB_side", default)]
    pub team_b_side: Option<String>,
}

impl SidecarConfig {
    pub fn path_for(input: &Path) -> PathBuf {
        let mut path = input.as_os_str().to_owned();
        path.push(".config.json");
        PathBuf::from(path)
    }

    /// Reads the sidecar next to `input`. A missing or unreadable sidecar is
    /// not an error, the other sources still apply.
    pub fn load(input: &Path) -> Option<Self> {
        let path = Self::path_for(input);
        if !path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(?path, "Reading sidecar config: {:?}", e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => {
                tracing::info!(?path, ?config, "Loaded sidecar config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(?path, "Parsing sidecar config: {:?}", e);
                None
            }
        }
    }

    pub fn teams(&self) -> Teams {
        Teams {
            a: Team {
                name: self.team_a.clone(),
                side: self.team_a_side.as_deref().and_then(parse_side),
            },
            b: Team {
                name: self.team_b.clone(),
                side: self.team_b_side.as_deref().and_then(parse_side),
            },
        }
    }
}

pub fn parse_side(value: &str) -> Option<Side> {
    Side::from_code(&Code::from(value))
}

/// Infers teams from names like `heroic-ct-vs-furia-t-m3-nuke.dem`.
pub fn from_file_name(file_name: &str) -> Teams {
    let lower = file_name.to_lowercase();
    let mut parts = lower.split("-vs-");

    let (a_part, b_full) = match (parts.next(), parts.next()) {
        (Some(a), Some(b)) => (a.trim(), b.trim()),
        _ => return Teams::default(),
    };

    let b_part = if let Some(index) = b_full.find("-m") {
        &b_full[..index]
    } else if let Some(index) = b_full.find(".dem") {
        &b_full[..index]
    } else {
        b_full
    };

    let teams = Teams {
        a: team_from_part(a_part),
        b: team_from_part(b_part.trim()),
    };
    tracing::debug!(file_name, ?teams, "Teams from file name");

    teams
}

fn team_from_part(part: &str) -> Team {
    let (name, side) = if let Some(name) = part.strip_suffix("-ct") {
        (name, Some(Side::CT))
    } else if let Some(name) = part.strip_suffix("-t") {
        (name, Some(Side::T))
    } else {
        (part, None)
    };

    let name = title_case(&name.replace('-', " "));
    Team {
        name: Some(name).filter(|n| !n.is_empty()),
        side,
    }
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
