//! Round reconstruction and scoring for Counter-Strike round-end telemetry.
//!
//! The pipeline is [`reconstruct::reconstruct`] followed by [`score::aggregate`]:
//! raw round-end records (plus optional kill/bomb records) go in, a
//! [`score::MatchResult`] comes out.

pub mod correction;
pub mod events;
pub mod reason;
pub mod reconstruct;
pub mod score;

#[cfg(feature = "demo")]
pub mod demo;

mod error;
pub use error::Error;

pub use reason::{EndReason, Side};

/// Runs the whole pipeline for one match.
///
/// `teams` are the two teams' declared starting sides; without them the
/// result only carries side-keyed scores.
pub fn analyse(
    config: &reconstruct::Config,
    streams: &events::EventStreams,
    teams: Option<[score::TeamDeclaration; 2]>,
) -> Result<score::MatchResult, Error> {
    let rounds = reconstruct::reconstruct(config, streams)?;

    let meta = score::MatchMeta {
        map_name: streams.header.map_name.clone(),
        tick_rate: config.tick_rate,
        match_id: streams.header.match_id.clone(),
    };

    score::aggregate(meta, rounds, teams)
}
