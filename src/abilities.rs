//! Built-in ability catalog.

use schema::{AbilityData, AbilityEffect, CharacterClass, EffectTarget, StatusKind};

fn ability(
    name: &str,
    description: &str,
    required_class: Option<CharacterClass>,
    effects: Vec<AbilityEffect>,
    cooldown: u8,
    priority: i8,
) -> AbilityData {
    AbilityData {
        name: name.to_string(),
        description: description.to_string(),
        required_class,
        effects,
        cooldown,
        priority,
    }
}

pub fn power_strike() -> AbilityData {
    ability(
        "Power Strike",
        "A heavy blow that deals high damage",
        None,
        vec![AbilityEffect::damage(50)],
        1,
        0,
    )
}

pub fn quick_attack() -> AbilityData {
    ability(
        "Quick Attack",
        "A fast strike that acts before normal actions",
        None,
        vec![AbilityEffect::damage(30)],
        0,
        1,
    )
}

pub fn fireball() -> AbilityData {
    ability(
        "Fireball",
        "A ball of fire that may burn the target",
        Some(CharacterClass::Mage),
        vec![
            AbilityEffect::damage(40),
            AbilityEffect::status(StatusKind::Burn, EffectTarget::Opponent).with_chance(30),
        ],
        2,
        0,
    )
}

pub fn poison_strike() -> AbilityData {
    ability(
        "Poison Strike",
        "A venomous strike that may poison the target",
        Some(CharacterClass::Rogue),
        vec![
            AbilityEffect::damage(30),
            AbilityEffect::status(StatusKind::Poison, EffectTarget::Opponent).with_chance(50),
        ],
        2,
        0,
    )
}

pub fn shield_bash() -> AbilityData {
    ability(
        "Shield Bash",
        "A shield slam that may stun the target",
        Some(CharacterClass::Tank),
        vec![
            AbilityEffect::damage(35),
            AbilityEffect::status(StatusKind::Stun, EffectTarget::Opponent).with_chance(20),
        ],
        3,
        0,
    )
}

pub fn heal() -> AbilityData {
    ability(
        "Heal",
        "Restores the user's HP",
        Some(CharacterClass::Support),
        vec![AbilityEffect::heal(40)],
        3,
        0,
    )
}

pub fn battle_cry() -> AbilityData {
    ability(
        "Battle Cry",
        "Raises the user's attack",
        None,
        vec![AbilityEffect::buff()],
        4,
        0,
    )
}

pub fn iron_defense() -> AbilityData {
    ability(
        "Iron Defense",
        "Raises a protective shield",
        Some(CharacterClass::Tank),
        vec![AbilityEffect::status(StatusKind::Shield, EffectTarget::User)],
        3,
        0,
    )
}

pub fn intimidate() -> AbilityData {
    ability(
        "Intimidate",
        "Lowers the opponent's attack",
        None,
        vec![AbilityEffect::debuff()],
        3,
        0,
    )
}

pub fn basic_abilities() -> Vec<AbilityData> {
    vec![
        power_strike(),
        quick_attack(),
        fireball(),
        poison_strike(),
        shield_bash(),
        heal(),
        battle_cry(),
        iron_defense(),
        intimidate(),
    ]
}

/// Looks up a catalog ability by display name ("Power Strike") or key
/// ("power_strike"), ignoring case.
pub fn get_ability(name: &str) -> Option<AbilityData> {
    let wanted = name.trim().to_lowercase().replace('_', " ");
    basic_abilities()
        .into_iter()
        .find(|ability| ability.name.to_lowercase() == wanted)
}
