use analysis::reconstruct::CanonicalRound;
use analysis::score::{aggregate, score_team, tally, MatchMeta, SideCount, TeamDeclaration, TeamScore};
use analysis::{EndReason, Error, Side};
use pretty_assertions::assert_eq;

fn rounds(pattern: &str) -> Vec<CanonicalRound> {
    pattern
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let winner = match c {
                'T' => Side::T,
                _ => Side::CT,
            };
            CanonicalRound {
                number: i as u32 + 1,
                winner,
                reason: EndReason::eliminated_by(winner),
                duration_seconds: 100,
                end_tick: (i as u32 + 1) * 6400,
                bomb_planted: false,
                bomb_defused: false,
                total_kills: 5,
                first_kill_side: winner,
            }
        })
        .collect()
}

fn teams() -> [TeamDeclaration; 2] {
    [
        TeamDeclaration::new("Alpha", Side::T),
        TeamDeclaration::new("Bravo", Side::CT),
    ]
}

#[test]
fn half_swap() {
    let result = aggregate(
        MatchMeta::default(),
        rounds("TTTTTTTTTTTTCCCCCCCCCCCC"),
        Some(teams()),
    )
    .unwrap();

    let [alpha, bravo] = result.teams.unwrap();
    assert_eq!(
        TeamScore {
            name: "Alpha".to_owned(),
            starting_side: Side::T,
            total: 24,
            first_half: 12,
            second_half: 12,
            overtime: 0,
        },
        alpha
    );
    assert_eq!(0, bravo.total);
}

#[test]
fn overtime_swap() {
    // Regulation ends 12-12, then T wins 25-27 and CT wins 28-30
    let result = aggregate(
        MatchMeta::default(),
        rounds("TTTTTTTTTTTTTTTTTTTTTTTTTTTCCC"),
        Some(teams()),
    )
    .unwrap();

    let [alpha, bravo] = result.teams.clone().unwrap();
    assert_eq!((12, 0, 6, 18), (alpha.first_half, alpha.second_half, alpha.overtime, alpha.total));
    assert_eq!((0, 12, 0, 12), (bravo.first_half, bravo.second_half, bravo.overtime, bravo.total));
    assert!(result.is_overtime());
}

#[test]
fn second_overtime_swaps_back() {
    let mut pattern = "C".repeat(24);
    // period 0: T, period 1: CT, period 2: T again for the T starter
    pattern.push_str("TTTCCCTTT");

    let alpha = score_team(&rounds(&pattern), &TeamDeclaration::new("Alpha", Side::T));

    assert_eq!(9, alpha.overtime);
    assert_eq!(12, alpha.second_half);
    assert_eq!(0, alpha.first_half);
}

#[test]
fn scores_are_conserved() {
    let patterns = [
        "",
        "TCT",
        "TCTTCCTCTCTTCCTCTCTCTCCT",
        "TCTTCCTCTCTTCCTCTCTCTCCTTCT",
        "CCCTTTCTCTCTTTCCCTCTCTCTCCTCTCTTTCCTC",
    ];

    for pattern in patterns {
        let n = pattern.len();
        let result = aggregate(MatchMeta::default(), rounds(pattern), Some(teams())).unwrap();
        let [a, b] = result.teams.clone().unwrap();

        assert_eq!(n.min(24), a.first_half + a.second_half + b.first_half + b.second_half, "{}", pattern);
        assert_eq!(n.saturating_sub(24), a.overtime + b.overtime, "{}", pattern);
        assert_eq!(n, a.total + b.total, "{}", pattern);
        for team in [&a, &b] {
            assert_eq!(team.total, team.first_half + team.second_half + team.overtime);
        }

        let sides = result.sides;
        assert_eq!(n, sides.total(Side::T) + sides.total(Side::CT), "{}", pattern);
        assert_eq!(n.min(12), sides.first_half.total(), "{}", pattern);
    }
}

#[test]
fn without_declarations_scores_by_side() {
    let result = aggregate(
        MatchMeta {
            map_name: "de_nuke".to_owned(),
            tick_rate: 64.0,
            match_id: None,
        },
        rounds("TTCTCCCCCCCCTCTCTTTTTTTTTC"),
        None,
    )
    .unwrap();

    assert_eq!(None, result.teams);
    assert_eq!(SideCount { t: 3, ct: 9 }, result.sides.first_half);
    assert_eq!(SideCount { t: 10, ct: 2 }, result.sides.second_half);
    assert_eq!(SideCount { t: 1, ct: 1 }, result.sides.overtime);
    assert_eq!(tally(&result.rounds), result.sides);
}

#[test]
fn conflicting_declarations() {
    let result = aggregate(
        MatchMeta::default(),
        rounds("TC"),
        Some([
            TeamDeclaration::new("Alpha", Side::T),
            TeamDeclaration::new("Bravo", Side::T),
        ]),
    );

    assert_eq!(Err(Error::ConflictingSides(Side::T)), result);
}
