//! Battle system integration tests

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish::battle::*;
use skirmish::character::{Ability, CharacterBuilder};
use skirmish::combat::apply_damage;
use skirmish::core::config::{BattleConfig, GameSettings};
use skirmish::core::types::Side;
use skirmish::core::BattleSetupError;
use skirmish::roster::Roster;
use skirmish::team::TeamNode;

fn one_member_team(
    team_name: &str,
    member: &str,
    stats: (i32, i32, i32),
    abilities: &[Ability],
) -> TeamNode {
    let settings = GameSettings::default();
    let character = abilities
        .iter()
        .fold(
            CharacterBuilder::new(member).stats(stats.0, stats.1, stats.2),
            |b, &a| b.ability(a),
        )
        .build_shared(&settings, &[])
        .unwrap();
    let mut team = TeamNode::team(team_name);
    team.add(TeamNode::character(character), &settings).unwrap();
    team
}

#[test]
fn test_stronger_character_wins_one_on_one() {
    for seed in [1, 2, 3, 42, 1234] {
        let a = one_member_team("Red", "Ayla", (30, 10, 10), &[Ability::SuperForce]);
        let b = one_member_team("Blue", "Brom", (5, 5, 5), &[]);
        let mut battle = BattleOrchestrator::with_seed(BattleConfig::default(), seed);

        let report = battle
            .start_battle(&a, &b, &BalancedStrategy, &BalancedStrategy, |_| true)
            .unwrap();

        assert_eq!(report.outcome, BattleOutcome::Victory(Side::A), "seed {}", seed);
        assert!(report.rounds < BattleConfig::default().max_rounds);
    }
}

#[test]
fn test_team_battle_from_roster() {
    let mut roster = Roster::default();
    for (name, stats) in [
        ("Ayla", (18, 14, 12)),
        ("Brom", (22, 10, 8)),
        ("Cato", (10, 12, 20)),
        ("Dara", (15, 20, 10)),
    ] {
        roster
            .create(&CharacterBuilder::new(name).stats(stats.0, stats.1, stats.2))
            .unwrap();
    }
    roster.grant_ability("Cato", Ability::FirePower).unwrap();
    roster.grant_ability("Dara", Ability::Regeneration).unwrap();

    let red = roster.team("Red", &["Ayla", "Cato"]).unwrap();
    let blue = roster.team("Blue", &["Brom", "Dara"]).unwrap();

    let mut battle = BattleOrchestrator::with_seed(BattleConfig::default(), 77);
    let report = battle
        .start_battle(&red, &blue, &AggressiveStrategy, &DefensiveStrategy, |_| true)
        .unwrap();

    // Experience lands on the roster's characters
    let survivors: Vec<&String> = report
        .side_a_survivors
        .iter()
        .chain(report.side_b_survivors.iter())
        .collect();
    for name in survivors {
        let character = roster.get(name).unwrap();
        assert!(character.borrow().experience() > 0);
    }

    // Knocked out characters stay at zero health until restored
    for name in &report.stats.knockouts {
        assert_eq!(roster.get(name).unwrap().borrow().health(), 0);
    }
    roster.restore_all();
    assert!(roster.iter().all(|c| c.borrow().health() == c.borrow().max_health()));
}

#[test]
fn test_army_against_team() {
    let settings = GameSettings::default();
    let mut army = TeamNode::army("Host");
    army.add(
        one_member_team("Vanguard", "Ayla", (20, 15, 10), &[Ability::SuperForce]),
        &settings,
    )
    .unwrap();
    army.add(
        one_member_team("Rearguard", "Cato", (12, 12, 20), &[Ability::Telepathy]),
        &settings,
    )
    .unwrap();
    let lone = one_member_team("Lone", "Brom", (10, 10, 10), &[]);

    let mut battle = BattleOrchestrator::with_seed(BattleConfig::default(), 3);
    let report = battle
        .start_battle(&army, &lone, &BalancedStrategy, &BalancedStrategy, |_| true)
        .unwrap();

    assert_eq!(report.outcome, BattleOutcome::Victory(Side::A));
    assert_eq!(report.side_b_survivors.len(), 0);
    assert!(report.stats.actors.iter().any(|a| a.name == "Cato"));
}

#[test]
fn test_knocked_out_side_cannot_start() {
    let a = one_member_team("Red", "Ayla", (10, 10, 10), &[]);
    let b = one_member_team("Blue", "Brom", (10, 10, 10), &[]);
    {
        let members = b.characters();
        let mut brom = members[0].borrow_mut();
        let max = brom.max_health();
        apply_damage(&mut brom, max);
    }

    let mut battle = BattleOrchestrator::with_seed(BattleConfig::default(), 1);
    let err = battle
        .start_battle(&a, &b, &BalancedStrategy, &BalancedStrategy, |_| true)
        .unwrap_err();
    assert_eq!(err, BattleSetupError::EmptySide("Blue".into()));
}

#[test]
fn test_strategies_from_names() {
    let a = one_member_team("Red", "Ayla", (15, 10, 10), &[Ability::FirePower]);
    let b = one_member_team("Blue", "Brom", (15, 10, 10), &[Ability::Regeneration]);
    let strategy_a = "aggressive".parse::<StrategyKind>().unwrap().build();
    let strategy_b = "defensive".parse::<StrategyKind>().unwrap().build();

    let config = BattleConfig {
        max_rounds: 20,
        ..BattleConfig::default()
    };
    let mut battle = BattleOrchestrator::with_seed(config, 10);
    let report = battle
        .start_battle(&a, &b, strategy_a.as_ref(), strategy_b.as_ref(), |_| true)
        .unwrap();

    assert!(report.rounds <= 20);
    assert!(matches!(battle.phase(), BattlePhase::Finished(_)));
    assert_eq!(battle.history().len() as u32, report.stats.total_actions);
}

#[test]
fn test_report_serializes() {
    let a = one_member_team("Red", "Ayla", (20, 10, 10), &[]);
    let b = one_member_team("Blue", "Brom", (10, 10, 10), &[]);
    let mut battle = BattleOrchestrator::with_seed(BattleConfig::default(), 4);
    let report = battle
        .start_battle(&a, &b, &AggressiveStrategy, &AggressiveStrategy, |_| true)
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let back: BattleReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.outcome, report.outcome);
    assert_eq!(back.rounds, report.rounds);
}

#[test]
fn test_duel_exchange() {
    let settings = GameSettings::default();
    let a = CharacterBuilder::new("Ayla")
        .stats(25, 0, 10)
        .build_shared(&settings, &[])
        .unwrap();
    let b = CharacterBuilder::new("Brom")
        .stats(5, 0, 5)
        .build_shared(&settings, &[])
        .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    let report = duel(&a, &b, &mut rng);
    assert_eq!(report.winner.as_deref(), Some("Ayla"));
    assert_eq!(a.borrow().experience(), DUEL_WIN_EXPERIENCE);
}
