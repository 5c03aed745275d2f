//! Event loader on top of the `csdemo` replay decoder.

use crate::events::{BombEvent, Code, EventStreams, Header, KillEvent, RawRoundEvent};
use crate::{reason, Error, Side};

const ROUND_END_COUNT: &str = "CCSGameRulesProxy.CCSGameRules.m_nRoundEndCount";
const ROUND_WIN_STATUS: &str = "CCSGameRulesProxy.CCSGameRules.m_iRoundWinStatus";
const ROUND_WIN_REASON: &str = "CCSGameRulesProxy.CCSGameRules.m_eRoundWinReason";

fn side_number(side: Side) -> i64 {
    match side {
        Side::T => 2,
        Side::CT => 3,
    }
}

/// Decodes a demo into the record streams the reconstructor works on.
#[tracing::instrument(skip(buf), fields(size = buf.len()))]
pub fn load(buf: &[u8]) -> Result<EventStreams, Error> {
    let tmp = csdemo::Container::parse(buf).map_err(|e| Error::Decode(format!("{:?}", e)))?;
    let output = csdemo::parser::parse(
        csdemo::FrameIterator::parse(tmp.inner),
        csdemo::parser::EntityFilter::all(),
    )
    .map_err(|e| Error::Decode(format!("{:?}", e)))?;

    let mut round_end = Vec::new();
    let mut end_count = 0;
    let mut win_status: Option<i32> = None;
    let mut win_reason: Option<i32> = None;
    for tick in output.entity_states.ticks.iter() {
        let mut ended = false;

        for state in tick.states.iter() {
            if state.class.as_ref() != "CCSGameRulesProxy" {
                continue;
            }

            if let Some(status) = state.get_prop(ROUND_WIN_STATUS).map(|p| p.value.as_i32()).flatten() {
                win_status = Some(status);
            }
            if let Some(reason) = state.get_prop(ROUND_WIN_REASON).map(|p| p.value.as_i32()).flatten() {
                win_reason = Some(reason);
            }

            let round_end_count = state.get_prop(ROUND_END_COUNT).map(|p| p.value.as_u32()).flatten();
            if let Some(count) = round_end_count.filter(|c| *c > end_count) {
                end_count = count;
                ended = true;
            }
        }

        if !ended {
            continue;
        }

        let reason = win_reason.filter(|r| *r != 0).map(|r| Code::Numeric(r as i64));
        let winner = win_status
            .filter(|s| *s == 2 || *s == 3)
            .map(|s| s as i64)
            .or_else(|| {
                reason
                    .as_ref()
                    .and_then(reason::lookup)
                    .map(|(side, _)| side_number(side))
            })
            .map(Code::Numeric);

        tracing::trace!(round = end_count, tick = tick.tick, ?reason, ?winner, "Round end");

        round_end.push(RawRoundEvent {
            round: Some(end_count),
            reason,
            winner,
            tick: Some(tick.tick),
        });
    }

    let mut player_death = Vec::new();
    let mut bomb_planted = Vec::new();
    let mut bomb_defused = Vec::new();

    let mut current_tick = 0;
    for event in output.events.iter() {
        match event {
            csdemo::DemoEvent::Tick(tick) => {
                current_tick = tick.tick();
            }
            csdemo::DemoEvent::GameEvent(ge) => match ge.as_ref() {
                csdemo::game_event::GameEvent::BombPlanted(_) => bomb_planted.push(BombEvent {
                    tick: current_tick,
                    round: None,
                }),
                csdemo::game_event::GameEvent::BombDefused(_) => bomb_defused.push(BombEvent {
                    tick: current_tick,
                    round: None,
                }),
                csdemo::game_event::GameEvent::PlayerDeath(death) => {
                    let attacker_team = death
                        .attacker
                        .as_ref()
                        .and_then(|attacker| output.player_info.get(attacker))
                        .map(|player| Code::Numeric(player.team as i64));

                    player_death.push(KillEvent {
                        tick: current_tick,
                        round: None,
                        attacker_team,
                    });
                }
                _ => {}
            },
            _ => {}
        };
    }

    tracing::debug!(
        round_end = round_end.len(),
        player_death = player_death.len(),
        bomb_planted = bomb_planted.len(),
        bomb_defused = bomb_defused.len(),
        "Loaded demo events"
    );

    Ok(EventStreams {
        header: Header {
            map_name: output.header.map_name().to_owned(),
            tickrate: None,
            match_id: None,
        },
        round_end,
        player_death: Some(player_death),
        bomb_planted: Some(bomb_planted),
        bomb_defused: Some(bomb_defused),
    })
}
