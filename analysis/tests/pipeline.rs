use analysis::events::EventStreams;
use analysis::reconstruct::Config;
use analysis::score::{SideCount, TeamDeclaration};
use analysis::{EndReason, Side};
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

fn load(file: &str) -> EventStreams {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/").to_owned() + file;
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
#[traced_test]
fn nuke_with_duplicate_round_end() {
    let streams = load("heroic-ct-vs-furia-t-m3-nuke.json");
    let config = Config::default().with_tick_rate(streams.header.tick_rate());

    let result = analysis::analyse(
        &config,
        &streams,
        Some([
            TeamDeclaration::new("Heroic", Side::CT),
            TeamDeclaration::new("Furia", Side::T),
        ]),
    )
    .unwrap();

    assert_eq!("de_nuke", result.meta.map_name);
    assert_eq!(22, result.rounds.len());
    assert_eq!(
        (1..=22).collect::<Vec<u32>>(),
        result.rounds.iter().map(|r| r.number).collect::<Vec<_>>()
    );

    let [heroic, furia] = result.teams.clone().unwrap();
    assert_eq!((8, 5, 0, 13), (heroic.first_half, heroic.second_half, heroic.overtime, heroic.total));
    assert_eq!((4, 5, 0, 9), (furia.first_half, furia.second_half, furia.overtime, furia.total));

    assert_eq!(SideCount { t: 4, ct: 8 }, result.sides.first_half);
    assert_eq!(SideCount { t: 5, ct: 5 }, result.sides.second_half);

    let first = &result.rounds[0];
    assert_eq!((Side::CT, EndReason::TsEliminated), (first.winner, first.reason));
    assert_eq!(256, first.duration_seconds);
    assert_eq!((5, Side::CT), (first.total_kills, first.first_kill_side));

    let second = &result.rounds[1];
    assert_eq!((Side::CT, EndReason::BombDefused), (second.winner, second.reason));
    assert_eq!(200, second.duration_seconds);
    assert!(second.bomb_planted && second.bomb_defused);
    assert_eq!((10, Side::T), (second.total_kills, second.first_kill_side));

    let third = &result.rounds[2];
    assert_eq!((Side::T, EndReason::BombDetonated), (third.winner, third.reason));
    assert!(third.bomb_planted && !third.bomb_defused);

    assert!(logs_contain("Applied round-end correction"));
}

#[test]
fn missing_round_end_stream_is_rejected() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/missing_round_end.json");
    let content = std::fs::read_to_string(path).unwrap();

    assert!(serde_json::from_str::<EventStreams>(&content).is_err());
}

#[test]
fn absent_auxiliary_streams_default() {
    let streams = load("scrim.json");

    let result = analysis::analyse(&Config::default(), &streams, None).unwrap();

    assert_eq!(3, result.rounds.len());
    assert!(result.rounds.iter().all(|r| !r.bomb_planted && r.total_kills == 0));
    assert_eq!(SideCount { t: 2, ct: 1 }, result.sides.first_half);
}
