//! Character validators
//!
//! Each validator is an independent function returning zero or more error
//! strings. They always all run, and their messages are concatenated into a
//! single `ValidationError`.

use crate::character::ability::Ability;
use crate::core::config::GameSettings;
use crate::core::error::ValidationError;

/// Candidate character data, checked before anything is constructed
#[derive(Debug, Clone, Copy)]
pub struct CharacterDraft<'a> {
    pub name: &'a str,
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub abilities: &'a [Ability],
}

/// Limits and roster state the validators read
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub settings: &'a GameSettings,
    pub existing_names: &'a [String],
}

pub type Validator = fn(&CharacterDraft<'_>, &ValidationContext<'_>) -> Vec<String>;

/// Full check run at character creation
pub const CREATION_VALIDATORS: &[Validator] = &[
    validate_name,
    validate_unique_name,
    validate_stats_not_negative,
    validate_stat_total,
    validate_ability_count,
    validate_unique_abilities,
];

/// Check run when granting an ability to an existing character
pub const GRANT_VALIDATORS: &[Validator] = &[validate_ability_count, validate_unique_abilities];

/// Run every validator and fold the results
pub fn run(
    validators: &[Validator],
    draft: &CharacterDraft<'_>,
    context: &ValidationContext<'_>,
) -> Result<(), ValidationError> {
    let errors: Vec<String> = validators
        .iter()
        .flat_map(|validate| validate(draft, context))
        .collect();
    ValidationError::check(errors)
}

pub fn validate_name(draft: &CharacterDraft<'_>, _: &ValidationContext<'_>) -> Vec<String> {
    if draft.name.trim().is_empty() {
        vec!["Name must not be empty".to_string()]
    } else {
        Vec::new()
    }
}

pub fn validate_unique_name(draft: &CharacterDraft<'_>, ctx: &ValidationContext<'_>) -> Vec<String> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Vec::new();
    }
    if ctx
        .existing_names
        .iter()
        .any(|existing| existing.trim().eq_ignore_ascii_case(name))
    {
        vec![format!("A character named '{}' already exists", name)]
    } else {
        Vec::new()
    }
}

pub fn validate_stats_not_negative(
    draft: &CharacterDraft<'_>,
    _: &ValidationContext<'_>,
) -> Vec<String> {
    [
        ("Strength", draft.strength),
        ("Agility", draft.agility),
        ("Intelligence", draft.intelligence),
    ]
    .into_iter()
    .filter(|(_, value)| *value < 0)
    .map(|(stat, value)| format!("{} must not be negative (got {})", stat, value))
    .collect()
}

pub fn validate_stat_total(draft: &CharacterDraft<'_>, ctx: &ValidationContext<'_>) -> Vec<String> {
    let total =
        i64::from(draft.strength) + i64::from(draft.agility) + i64::from(draft.intelligence);
    if total > i64::from(ctx.settings.max_stat_points) {
        vec![format!(
            "Stat total {} exceeds the maximum of {}",
            total, ctx.settings.max_stat_points
        )]
    } else {
        Vec::new()
    }
}

pub fn validate_ability_count(
    draft: &CharacterDraft<'_>,
    ctx: &ValidationContext<'_>,
) -> Vec<String> {
    if draft.abilities.len() > ctx.settings.max_abilities {
        vec![format!(
            "Too many abilities: {} (maximum {})",
            draft.abilities.len(),
            ctx.settings.max_abilities
        )]
    } else {
        Vec::new()
    }
}

pub fn validate_unique_abilities(
    draft: &CharacterDraft<'_>,
    _: &ValidationContext<'_>,
) -> Vec<String> {
    let mut seen: Vec<Ability> = Vec::new();
    let mut errors = Vec::new();
    for &ability in draft.abilities {
        if seen.contains(&ability) {
            errors.push(format!("Ability '{}' is already granted", ability));
        } else {
            seen.push(ability);
        }
    }
    errors
}
