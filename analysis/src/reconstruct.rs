//! Turns the noisy round-end stream into a clean, sequentially numbered list
//! of rounds.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::correction::Corrections;
use crate::events::{BombEvent, EventStreams, KillEvent, RawRoundEvent};
use crate::{reason, EndReason, Error, Side};

#[derive(Debug)]
pub struct Config {
    pub tick_rate: f32,
    /// Reason-less rounds shorter than this are dropped as phantom rounds.
    pub min_round_seconds: u32,
    /// How far before a round's end tick a bomb record without a round number
    /// may lie and still count for that round.
    pub bomb_lookback_ticks: u32,
    pub max_kills: usize,
    pub corrections: Corrections,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: crate::events::Header::DEFAULT_TICK_RATE,
            min_round_seconds: 10,
            bomb_lookback_ticks: 5000,
            max_kills: 10,
            corrections: Corrections::default(),
        }
    }
}

impl Config {
    pub fn without_corrections() -> Self {
        Self {
            corrections: Corrections::none(),
            ..Default::default()
        }
    }

    pub fn with_tick_rate(mut self, tick_rate: f32) -> Self {
        self.tick_rate = tick_rate;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanonicalRound {
    /// 1-based and contiguous; the only round numbering later stages use.
    pub number: u32,
    pub winner: Side,
    pub reason: EndReason,
    pub duration_seconds: u32,
    pub end_tick: u32,
    pub bomb_planted: bool,
    pub bomb_defused: bool,
    pub total_kills: usize,
    pub first_kill_side: Side,
}

#[derive(Debug)]
struct Signal {
    tick: u32,
    event: RawRoundEvent,
}

/// Round association of a record. Records without a round number are keyed
/// by their position in tick order, apart from the reported numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Key {
    Round(u32),
    Position(usize),
}

impl Key {
    fn round(self) -> Option<u32> {
        match self {
            Self::Round(round) => Some(round),
            Self::Position(_) => None,
        }
    }
}

#[derive(Debug)]
struct Group {
    key: Key,
    signals: Vec<Signal>,
}

/// The part of the match a round covers, `(start, end]` in ticks.
#[derive(Debug, Clone, Copy)]
struct Window {
    round: Option<u32>,
    start: u32,
    end: u32,
}

#[tracing::instrument(skip_all, fields(records = streams.round_end.len()))]
pub fn reconstruct(config: &Config, streams: &EventStreams) -> Result<Vec<CanonicalRound>, Error> {
    if !config.tick_rate.is_finite() || config.tick_rate <= 0.0 {
        return Err(Error::InvalidTickRate(config.tick_rate));
    }

    if let Some((position, event)) = streams
        .round_end
        .iter()
        .enumerate()
        .find(|(_, event)| event.tick.is_none())
    {
        return Err(Error::MissingTick {
            position,
            round: event.round,
        });
    }

    let competitive: Vec<RawRoundEvent> = streams
        .round_end
        .iter()
        .filter(|event| event.winner.is_some())
        .cloned()
        .collect();
    tracing::debug!(
        dropped = streams.round_end.len() - competitive.len(),
        "Dropped round-end records without a winner"
    );

    if config.corrections.is_empty() {
        tracing::debug!("Round-end corrections disabled");
    }

    let competitive = match config.corrections.apply(&competitive) {
        Some((name, corrected)) => {
            tracing::info!(
                correction = name,
                before = competitive.len(),
                after = corrected.len(),
                "Applied round-end correction"
            );
            corrected
        }
        None => competitive,
    };

    let groups = group_signals(competitive);

    let mut rounds: Vec<CanonicalRound> = Vec::with_capacity(groups.len());
    let mut previous_end = 0;
    for group in groups.iter() {
        if group.key == Key::Round(0) {
            tracing::debug!("Skipping warmup round 0");
            continue;
        }

        let signal = match select(config, group, previous_end) {
            Some(s) => s,
            None => continue,
        };

        let window = Window {
            round: group.key.round(),
            start: previous_end,
            end: signal.tick,
        };
        let round = resolve(config, streams, rounds.len() as u32 + 1, signal, window);

        tracing::trace!(?round, original = ?group.key, "Resolved round");

        previous_end = signal.tick;
        rounds.push(round);
    }

    let t_wins = rounds.iter().filter(|r| r.winner == Side::T).count();
    tracing::info!(
        rounds = rounds.len(),
        t_wins,
        ct_wins = rounds.len() - t_wins,
        "Reconstructed rounds"
    );

    Ok(rounds)
}

/// Orders the records by tick and groups them by round association. Groups
/// come out in the order their first record appears.
fn group_signals(events: Vec<RawRoundEvent>) -> Vec<Group> {
    let mut signals: Vec<Signal> = events
        .into_iter()
        .filter_map(|event| Some(Signal { tick: event.tick?, event }))
        .collect();
    signals.sort_by_key(|s| s.tick);

    let mut groups: Vec<Group> = Vec::new();
    let mut group_index = HashMap::<Key, usize>::new();
    for (position, signal) in signals.into_iter().enumerate() {
        let key = match signal.event.round {
            Some(round) => Key::Round(round),
            None => Key::Position(position + 1),
        };

        match group_index.entry(key) {
            Entry::Occupied(index) => groups[*index.get()].signals.push(signal),
            Entry::Vacant(index) => {
                index.insert(groups.len());
                groups.push(Group {
                    key,
                    signals: vec![signal],
                });
            }
        }
    }

    groups
}

/// Picks the record that stands for the whole group: the latest one with a
/// reason, else the latest one if the round it implies is long enough.
fn select<'g>(config: &Config, group: &'g Group, previous_end: u32) -> Option<&'g Signal> {
    let with_reason = group
        .signals
        .iter()
        .filter(|s| s.event.reason.is_some())
        .max_by_key(|s| s.tick);
    if with_reason.is_some() {
        return with_reason;
    }

    let latest = group.signals.iter().max_by_key(|s| s.tick)?;
    let duration = duration_seconds(previous_end, latest.tick, config.tick_rate);
    if duration < config.min_round_seconds {
        tracing::debug!(round = ?group.key, duration, "Skipping phantom round without reason");
        return None;
    }

    tracing::debug!(round = ?group.key, duration, "Keeping round without reason");
    Some(latest)
}

fn resolve(config: &Config, streams: &EventStreams, number: u32, signal: &Signal, window: Window) -> CanonicalRound {
    let table = signal.event.reason.as_ref().and_then(reason::lookup);

    let winner = signal
        .event
        .winner
        .as_ref()
        .and_then(Side::from_code)
        .or(table.map(|(side, _)| side))
        .unwrap_or(Side::T);

    if let Some((side, label)) = table.filter(|(side, _)| *side != winner) {
        tracing::warn!(number, ?winner, ?side, ?label, "Winner disagrees with the end reason");
    }

    let bomb_planted = streams
        .bomb_planted
        .as_deref()
        .map(|bombs| bombs.iter().any(|b| bomb_in_round(config, window, b)))
        .unwrap_or(false);
    let bomb_defused = streams
        .bomb_defused
        .as_deref()
        .map(|bombs| bombs.iter().any(|b| bomb_in_round(config, window, b)))
        .unwrap_or(false);

    let kills: Vec<&KillEvent> = streams
        .player_death
        .as_deref()
        .map(|kills| kills.iter().filter(|k| kill_in_round(window, k)).collect())
        .unwrap_or_default();
    let total_kills = kills.len().min(config.max_kills);
    let first_kill_side = kills
        .iter()
        .min_by_key(|k| k.tick)
        .map(|k| match k.attacker_team.as_ref().and_then(Side::from_code) {
            Some(Side::CT) => Side::CT,
            _ => Side::T,
        })
        .unwrap_or(Side::CT);

    let reason = match table {
        Some((_, label)) => label,
        None => {
            let inferred = EndReason::infer(winner, bomb_planted, bomb_defused, total_kills, config.max_kills);
            tracing::debug!(number, code = ?signal.event.reason, ?inferred, "Inferred end reason");
            inferred
        }
    };

    CanonicalRound {
        number,
        winner,
        reason,
        duration_seconds: duration_seconds(window.start, window.end, config.tick_rate),
        end_tick: window.end,
        bomb_planted,
        bomb_defused,
        total_kills,
        first_kill_side,
    }
}

fn kill_in_round(window: Window, kill: &KillEvent) -> bool {
    match (kill.round, window.round) {
        (Some(round), Some(window_round)) => round == window_round,
        _ => window.start < kill.tick && kill.tick <= window.end,
    }
}

fn bomb_in_round(config: &Config, window: Window, bomb: &BombEvent) -> bool {
    match (bomb.round, window.round) {
        (Some(round), Some(window_round)) => round == window_round,
        _ => {
            let earliest = window.end.saturating_sub(config.bomb_lookback_ticks);
            earliest <= bomb.tick && window.start < bomb.tick && bomb.tick <= window.end
        }
    }
}

fn duration_seconds(start: u32, end: u32, tick_rate: f32) -> u32 {
    (end.saturating_sub(start) as f32 / tick_rate) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_round_down() {
        assert_eq!(10, duration_seconds(0, 640, 64.0));
        assert_eq!(9, duration_seconds(0, 639, 64.0));
        assert_eq!(0, duration_seconds(700, 640, 64.0));
        assert_eq!(75, duration_seconds(1000, 1000 + 75 * 128, 128.0));
    }

    #[test]
    fn groups_follow_tick_order() {
        let event = |round: Option<u32>, tick: u32| RawRoundEvent {
            round,
            reason: None,
            winner: Some("T".into()),
            tick: Some(tick),
        };

        let groups = group_signals(vec![
            event(Some(3), 300),
            event(Some(1), 100),
            event(Some(3), 310),
            event(Some(2), 200),
        ]);

        let keys: Vec<_> = groups.iter().map(|g| (g.key, g.signals.len())).collect();
        assert_eq!(vec![(Key::Round(1), 1), (Key::Round(2), 1), (Key::Round(3), 2)], keys);
    }

    #[test]
    fn missing_round_numbers_use_position() {
        let groups = group_signals(vec![
            RawRoundEvent {
                round: None,
                reason: None,
                winner: Some("CT".into()),
                tick: Some(900),
            },
            RawRoundEvent {
                round: None,
                reason: None,
                winner: Some("T".into()),
                tick: Some(400),
            },
        ]);

        let keys: Vec<_> = groups.iter().map(|g| (g.key, g.signals[0].tick)).collect();
        assert_eq!(vec![(Key::Position(1), 400), (Key::Position(2), 900)], keys);
    }
}
