//! Roster persistence and settings loading

use std::fs;
use std::path::Path;

use skirmish::character::{Ability, CharacterBuilder};
use skirmish::core::config::{GameSettings, SkirmishConfig};
use skirmish::persist::{CharacterStore, FileCharacterStore, MemoryCharacterStore};
use skirmish::roster::Roster;
use tempfile::tempdir;

fn data_path(file: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(file)
}

#[test]
fn test_bundled_settings_match_defaults() {
    let loaded = SkirmishConfig::load(&data_path("settings.toml")).unwrap();
    assert_eq!(loaded, SkirmishConfig::default());
}

#[test]
fn test_bundled_roster_imports_fully() {
    let mut roster = Roster::default();
    let imported = roster
        .import_from(&FileCharacterStore::new(data_path("roster.txt")))
        .unwrap();
    assert_eq!(imported, 6);
    assert_eq!(roster.names()[0], "Ayla");
}

#[test]
fn test_roster_round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.txt");

    let mut roster = Roster::default();
    roster
        .create(&CharacterBuilder::new("Ayla").stats(18, 14, 12).ability(Ability::Telepathy))
        .unwrap();
    roster
        .create(&CharacterBuilder::new("Brom").stats(22, 10, 8))
        .unwrap();

    let mut store = FileCharacterStore::new(&path);
    assert_eq!(roster.export_to(&mut store).unwrap(), 2);

    let mut restored = Roster::default();
    assert_eq!(restored.import_from(&store).unwrap(), 2);

    // Base stats survive, abilities do not
    let ayla = restored.get("Ayla").unwrap();
    let ayla = ayla.borrow();
    assert_eq!(ayla.base_strength(), 18);
    assert_eq!(ayla.base_agility(), 14);
    assert_eq!(ayla.base_intelligence(), 12);
    assert!(ayla.abilities().is_empty());
    assert_eq!(ayla.health(), ayla.max_health());
}

#[test]
fn test_malformed_and_invalid_lines_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.txt");
    fs::write(
        &path,
        "Ayla;10;10;10\n\
         garbage line\n\
         Brom;ten;10;10\n\
         Cato;40;40;40\n\
         \n\
         ayla;5;5;5\n\
         Dara;15;20;10\n",
    )
    .unwrap();

    let store = FileCharacterStore::new(&path);
    // Structurally valid lines load, even over-budget or duplicate ones
    assert_eq!(store.load_all().unwrap().len(), 4);

    // Import re-validates: Cato is over the stat budget, "ayla" collides
    let mut roster = Roster::default();
    assert_eq!(roster.import_from(&store).unwrap(), 2);
    assert_eq!(roster.names(), vec!["Ayla", "Dara"]);
}

#[test]
fn test_import_skips_stats_near_integer_limit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.txt");
    fs::write(&path, "Big;2147483647;1;1\nAyla;10;10;10\n").unwrap();

    let store = FileCharacterStore::new(&path);
    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].base_stat_total(), 2_147_483_649);

    let mut roster = Roster::default();
    assert_eq!(roster.import_from(&store).unwrap(), 1);
    assert_eq!(roster.names(), vec!["Ayla"]);
}

#[test]
fn test_import_honours_current_limits() {
    let mut store = MemoryCharacterStore::new();
    let settings = GameSettings::default();
    for (name, stats) in [("Ayla", (10, 10, 10)), ("Brom", (20, 15, 15))] {
        let c = CharacterBuilder::new(name)
            .stats(stats.0, stats.1, stats.2)
            .build(&settings, &[])
            .unwrap();
        store.save(&c).unwrap();
    }

    let mut strict = Roster::new(GameSettings {
        max_stat_points: 40,
        ..GameSettings::default()
    });
    assert_eq!(strict.import_from(&store).unwrap(), 1);
    assert!(strict.get("Brom").is_none());
}

#[test]
fn test_settings_file_partial_tables() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[battle]\nmax_rounds = 12\n").unwrap();

    let loaded = SkirmishConfig::load(&path).unwrap();
    assert_eq!(loaded.battle.max_rounds, 12);
    assert_eq!(loaded.limits, GameSettings::default());
}

#[test]
fn test_settings_file_rejects_zero_limits() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "[limits]\nmax_characters_per_team = 0\n").unwrap();

    assert!(SkirmishConfig::load(&path).is_err());
}
