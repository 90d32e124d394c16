//! Action history replay tests

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish::battle::{ActionHistory, BalancedStrategy, BattleOrchestrator};
use skirmish::character::{Ability, CharacterBuilder, SharedCharacter};
use skirmish::combat::Action;
use skirmish::core::config::{BattleConfig, GameSettings};
use skirmish::team::TeamNode;

fn fighter(name: &str, stats: (i32, i32, i32)) -> SharedCharacter {
    let settings = GameSettings {
        max_stat_points: 200,
        ..GameSettings::default()
    };
    CharacterBuilder::new(name)
        .stats(stats.0, stats.1, stats.2)
        .build_shared(&settings, &[])
        .unwrap()
}

fn health_snapshot(characters: &[&SharedCharacter]) -> Vec<i32> {
    characters.iter().map(|c| c.borrow().health()).collect()
}

#[test]
fn test_rendering_records_never_mutates() {
    let a = fighter("Ayla", (15, 10, 10));
    let b = fighter("Brom", (12, 10, 10));
    let mut history = ActionHistory::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for _ in 0..5 {
        let action = Action::attack(&a, &b);
        action.execute(&mut rng);
        history.push(action);
    }
    let before = health_snapshot(&[&a, &b]);

    let first = history.render_records();
    let second = history.render_records();
    let _json = history.export_json().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
    assert_eq!(health_snapshot(&[&a, &b]), before);
}

/// Ten attacks with variance and crits, recording the damage of each
fn run_attacks(history: &ActionHistory, rng: &mut ChaCha8Rng) -> Vec<i32> {
    history
        .replay_with_side_effects(rng)
        .into_iter()
        .map(|o| o.amount)
        .collect()
}

#[test]
fn test_re_execution_depends_on_stream() {
    let a = fighter("Ayla", (0, 40, 0));
    let b = fighter("Brom", (5, 5, 5));
    b.borrow_mut()
        .grant_ability(Ability::Regeneration, &GameSettings::default())
        .unwrap();

    let mut history = ActionHistory::new();
    for _ in 0..10 {
        history.push(Action::attack(&a, &b));
    }

    // First run, and a continuation of the same stream
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    b.borrow_mut().restore();
    let first = run_attacks(&history, &mut rng);
    b.borrow_mut().restore();
    let continued = run_attacks(&history, &mut rng);
    assert_ne!(first, continued);

    // Reset to the identical seed: identical outcomes
    let mut reset = ChaCha8Rng::seed_from_u64(1);
    b.borrow_mut().restore();
    let replayed = run_attacks(&history, &mut reset);
    assert_eq!(first, replayed);
}

#[test]
fn test_battle_replay_is_deterministic_per_seed() {
    let build = || {
        let settings = GameSettings::default();
        let mut red = TeamNode::team("Red");
        red.add(TeamNode::character(fighter("Ayla", (15, 12, 10))), &settings)
            .unwrap();
        let mut blue = TeamNode::team("Blue");
        blue.add(TeamNode::character(fighter("Brom", (14, 12, 11))), &settings)
            .unwrap();
        (red, blue)
    };

    let run = |seed: u64| {
        let (red, blue) = build();
        let mut battle = BattleOrchestrator::with_seed(BattleConfig::default(), seed);
        battle
            .start_battle(&red, &blue, &BalancedStrategy, &BalancedStrategy, |_| true)
            .unwrap();
        let records = battle.history().render_records();
        let health: Vec<i32> = red
            .characters()
            .iter()
            .chain(blue.characters().iter())
            .map(|c| c.borrow().health())
            .collect();
        (records, health)
    };

    assert_eq!(run(2024), run(2024));
}
