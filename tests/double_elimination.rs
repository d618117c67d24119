//! Integration tests for bracket generation: shape, wiring and labels.

use dota_bracket_web::{
    bracket_size, generate_double_elimination, losers_round_count, round_label, round_labels,
    winners_round_count, BracketError, BracketType, Match, MatchSlot, MatchStatus, Team,
};
use pretty_assertions::assert_eq;

fn teams(n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("Team {i}"))).collect()
}

fn find<'a>(matches: &'a [Match], id: &str) -> &'a Match {
    matches.iter().find(|m| m.id == id).unwrap()
}

fn section(matches: &[Match], bracket_type: BracketType) -> Vec<&Match> {
    matches.iter().filter(|m| m.bracket_type == bracket_type).collect()
}

fn next(m: &Match) -> Option<(&str, MatchSlot)> {
    m.next_edge()
}

fn loser_next(m: &Match) -> Option<(&str, MatchSlot)> {
    m.loser_edge()
}

#[test]
fn fewer_than_two_teams_is_rejected() {
    assert_eq!(
        generate_double_elimination(&teams(0)),
        Err(BracketError::NotEnoughTeams { count: 0 })
    );
    assert_eq!(
        generate_double_elimination(&teams(1)),
        Err(BracketError::NotEnoughTeams { count: 1 })
    );
}

#[test]
fn size_helpers() {
    assert_eq!(bracket_size(2), 2);
    assert_eq!(bracket_size(5), 8);
    assert_eq!(bracket_size(8), 8);
    assert_eq!(bracket_size(9), 16);
    assert_eq!(winners_round_count(2), 1);
    assert_eq!(winners_round_count(5), 3);
    assert_eq!(losers_round_count(2), 0);
    assert_eq!(losers_round_count(4), 2);
    assert_eq!(losers_round_count(16), 6);
}

#[test]
fn two_teams_route_both_finalists_into_grand_finals() {
    let matches = generate_double_elimination(&teams(2)).unwrap();
    assert_eq!(matches.len(), 2);
    assert!(section(&matches, BracketType::Losers).is_empty());

    let final_match = find(&matches, "w-1");
    assert_eq!(next(final_match), Some(("gf-2", MatchSlot::Radiant)));
    assert_eq!(loser_next(final_match), Some(("gf-2", MatchSlot::Dire)));

    let gf = find(&matches, "gf-2");
    assert_eq!(gf.bracket_type, BracketType::GrandFinals);
    assert_eq!((gf.round, gf.position), (1, 0));
    assert_eq!(next(gf), None);
}

#[test]
fn four_teams_wiring() {
    let matches = generate_double_elimination(&teams(4)).unwrap();
    let ids: Vec<&str> = matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["w-1", "w-2", "w-3", "l-4", "l-5", "gf-6"]);

    assert_eq!(next(find(&matches, "w-1")), Some(("w-3", MatchSlot::Radiant)));
    assert_eq!(next(find(&matches, "w-2")), Some(("w-3", MatchSlot::Dire)));
    assert_eq!(next(find(&matches, "w-3")), Some(("gf-6", MatchSlot::Radiant)));

    // Both first-round losers meet in losers round 1.
    assert_eq!(loser_next(find(&matches, "w-1")), Some(("l-4", MatchSlot::Radiant)));
    assert_eq!(loser_next(find(&matches, "w-2")), Some(("l-4", MatchSlot::Dire)));
    // Winners final drops into the losers final.
    assert_eq!(loser_next(find(&matches, "w-3")), Some(("l-5", MatchSlot::Dire)));

    assert_eq!(next(find(&matches, "l-4")), Some(("l-5", MatchSlot::Radiant)));
    assert_eq!(next(find(&matches, "l-5")), Some(("gf-6", MatchSlot::Dire)));
    assert_eq!(loser_next(find(&matches, "l-4")), None);
}

#[test]
fn eight_teams_wiring() {
    let matches = generate_double_elimination(&teams(8)).unwrap();
    assert_eq!(matches.len(), 14);

    let winners = section(&matches, BracketType::Winners);
    let per_round: Vec<usize> = (1..=3).map(|r| winners.iter().filter(|m| m.round == r).count()).collect();
    assert_eq!(per_round, vec![4, 2, 1]);

    let losers = section(&matches, BracketType::Losers);
    let per_round: Vec<usize> = (1..=4).map(|r| losers.iter().filter(|m| m.round == r).count()).collect();
    assert_eq!(per_round, vec![2, 2, 1, 1]);

    let expected_losers_edges = [
        ("w-1", "l-8", MatchSlot::Radiant),
        ("w-2", "l-8", MatchSlot::Dire),
        ("w-3", "l-9", MatchSlot::Radiant),
        ("w-4", "l-9", MatchSlot::Dire),
        ("w-5", "l-10", MatchSlot::Dire),
        ("w-6", "l-11", MatchSlot::Dire),
        ("w-7", "l-13", MatchSlot::Dire),
    ];
    for (from, to, slot) in expected_losers_edges {
        assert_eq!(loser_next(find(&matches, from)), Some((to, slot)), "loser edge of {from}");
    }

    let expected_losers_forward = [
        ("l-8", "l-10", MatchSlot::Radiant),
        ("l-9", "l-11", MatchSlot::Radiant),
        ("l-10", "l-12", MatchSlot::Radiant),
        ("l-11", "l-12", MatchSlot::Dire),
        ("l-12", "l-13", MatchSlot::Radiant),
        ("l-13", "gf-14", MatchSlot::Dire),
    ];
    for (from, to, slot) in expected_losers_forward {
        assert_eq!(next(find(&matches, from)), Some((to, slot)), "winner edge of {from}");
    }
    assert_eq!(next(find(&matches, "w-7")), Some(("gf-14", MatchSlot::Radiant)));
}

#[test]
fn non_power_of_two_pads_to_next_size() {
    let five = generate_double_elimination(&teams(5)).unwrap();
    let eight = generate_double_elimination(&teams(8)).unwrap();
    assert_eq!(five, eight);
    assert_eq!(section(&five, BracketType::Winners).len(), 7);
    assert_eq!(section(&five, BracketType::Losers).len(), 6);
}

#[test]
fn every_match_starts_pending_and_double() {
    let matches = generate_double_elimination(&teams(16)).unwrap();
    assert!(matches.iter().all(|m| m.status == MatchStatus::Pending));
    assert!(matches.iter().all(|m| m.radiant_team_id.is_none() && m.dire_team_id.is_none()));
    assert_eq!(section(&matches, BracketType::GrandFinals).len(), 1);
}

#[test]
fn generation_is_deterministic() {
    let field = teams(12);
    assert_eq!(
        generate_double_elimination(&field).unwrap(),
        generate_double_elimination(&field).unwrap()
    );
}

#[test]
fn serializes_with_camel_case_fields() {
    let matches = generate_double_elimination(&teams(4)).unwrap();
    let value = serde_json::to_value(find(&matches, "w-1")).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "id": "w-1",
            "round": 1,
            "position": 0,
            "bracketType": "winners",
            "eliminationType": "double",
            "status": "pending",
            "nextMatchId": "w-3",
            "nextMatchSlot": "radiant",
            "loserNextMatchId": "l-4",
            "loserNextMatchSlot": "radiant"
        })
    );

    let gf = serde_json::to_value(find(&matches, "gf-6")).unwrap();
    assert_eq!(gf["bracketType"], "grand_finals");
    assert!(gf.get("nextMatchId").is_none());
}

#[test]
fn round_labels_for_each_section() {
    assert_eq!(round_label(BracketType::Winners, 3, Some(3)), "Winners Finals");
    assert_eq!(round_label(BracketType::Winners, 2, Some(3)), "Winners Semis");
    assert_eq!(round_label(BracketType::Winners, 1, Some(3)), "Winners R1");
    assert_eq!(round_label(BracketType::Winners, 3, None), "Winners R3");
    assert_eq!(round_label(BracketType::Losers, 4, Some(4)), "Losers Finals");
    assert_eq!(round_label(BracketType::Losers, 3, Some(4)), "Losers R3");
    assert_eq!(round_label(BracketType::GrandFinals, 1, None), "Grand Finals");
}

#[test]
fn round_labels_follow_bracket_order() {
    let matches = generate_double_elimination(&teams(8)).unwrap();
    let labels: Vec<String> = round_labels(&matches).into_iter().map(|l| l.label).collect();
    assert_eq!(
        labels,
        vec![
            "Winners R1",
            "Winners Semis",
            "Winners Finals",
            "Losers R1",
            "Losers R2",
            "Losers R3",
            "Losers Finals",
            "Grand Finals",
        ]
    );
}
