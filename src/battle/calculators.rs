use crate::battle::effectiveness::effectiveness;
use crate::battle::state::BattleRng;
use crate::character::Character;
use crate::config::BattleConfig;
use schema::StatusKind;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u16,
    pub type_multiplier: f64,
    /// True when the attacker's class has the upper hand on the defender's.
    pub exploited_advantage: bool,
}

/// Damage before the random jitter, plus the type multiplier used.
///
/// Base power is the ability's power if one is used, otherwise the
/// attacker's attack stat. Buff/Debuff scale it, then the class matchup,
/// then the defender's defense is subtracted and an active Shield cuts
/// the rest. The result never drops below 1.
fn pre_jitter_damage(
    attacker: &Character,
    defender: &Character,
    ability_power: Option<u16>,
) -> (u32, f64) {
    let base_power = ability_power.unwrap_or(attacker.stats.attack);
    let power = attacker.modified_power(base_power) as u32;

    let type_multiplier = effectiveness(attacker.class, defender.class);
    let typed = (power as f64 * type_multiplier) as u32;

    let mut damage = typed.saturating_sub(defender.stats.defense as u32).max(1);

    if let Some(shield) = defender.statuses.magnitude(StatusKind::Shield) {
        damage = (damage * (100 - shield.min(100) as u32) / 100).max(1);
    }

    (damage, type_multiplier)
}

fn apply_jitter(damage: u32, percent: u16) -> u16 {
    let jittered = (damage as u64 * percent as u64 / 100).max(1);
    jittered.min(u16::MAX as u64) as u16
}

/// Calculates the damage of one hit. Consumes exactly one jitter draw and
/// never touches HP.
pub fn calculate_damage(
    attacker: &Character,
    defender: &Character,
    ability_power: Option<u16>,
    config: &BattleConfig,
    rng: &mut BattleRng,
) -> DamageOutcome {
    let (damage, type_multiplier) = pre_jitter_damage(attacker, defender, ability_power);
    let percent = rng.jitter_percent(config.jitter_min_pct, config.jitter_max_pct);
    let damage = apply_jitter(damage, percent);

    tracing::debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        ability_power,
        type_multiplier,
        jitter_pct = percent,
        damage,
        "damage calculated"
    );

    DamageOutcome {
        damage,
        type_multiplier,
        exploited_advantage: type_multiplier > 1.0,
    }
}

/// Lowest and highest damage the hit could do, without consuming randomness.
pub fn estimate_damage_range(
    attacker: &Character,
    defender: &Character,
    ability_power: Option<u16>,
    config: &BattleConfig,
) -> (u16, u16) {
    let (damage, _) = pre_jitter_damage(attacker, defender, ability_power);
    (
        apply_jitter(damage, config.jitter_min_pct),
        apply_jitter(damage, config.jitter_max_pct),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::conditions::StatusEffect;
    use crate::battle::tests::common::TestCharacterBuilder;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use schema::CharacterClass;

    fn midpoint_rng() -> BattleRng {
        BattleRng::new_for_test(vec![50; 10])
    }

    #[test]
    fn test_plain_attack_neutral() {
        // Arrange
        let attacker = TestCharacterBuilder::new("A", CharacterClass::Warrior)
            .with_stats(100, 50, 20, 30)
            .build();
        let defender = TestCharacterBuilder::new("D", CharacterClass::Warrior)
            .with_stats(100, 50, 20, 30)
            .build();

        // Act
        let outcome = calculate_damage(
            &attacker,
            &defender,
            None,
            &BattleConfig::default(),
            &mut midpoint_rng(),
        );

        // Assert: 50 * 1.0 - 20 = 30, jitter 100%
        assert_eq!(outcome.damage, 30);
        assert_eq!(outcome.type_multiplier, 1.0);
        assert!(!outcome.exploited_advantage);
    }

    #[test]
    fn test_advantage_with_ability_power() {
        let attacker = TestCharacterBuilder::new("A", CharacterClass::Mage)
            .with_stats(80, 60, 10, 40)
            .build();
        let defender = TestCharacterBuilder::new("D", CharacterClass::Tank)
            .with_stats(120, 40, 30, 20)
            .build();

        let outcome = calculate_damage(
            &attacker,
            &defender,
            Some(40),
            &BattleConfig::default(),
            &mut midpoint_rng(),
        );

        // 40 * 1.5 = 60, - 30 = 30
        assert_eq!(outcome.damage, 30);
        assert!(outcome.exploited_advantage);
    }

    #[test]
    fn test_defense_wall_floors_at_one() {
        let attacker = TestCharacterBuilder::new("Weak", CharacterClass::Support)
            .with_stats(100, 10, 10, 30)
            .build();
        let defender = TestCharacterBuilder::new("Wall", CharacterClass::Tank)
            .with_stats(120, 40, 50, 20)
            .build();

        let outcome = calculate_damage(
            &attacker,
            &defender,
            None,
            &BattleConfig::default(),
            &mut BattleRng::new_for_test(vec![1]),
        );
        assert_eq!(outcome.damage, 1);
    }

    #[test]
    fn test_shield_halves_damage() {
        let attacker = TestCharacterBuilder::new("A", CharacterClass::Warrior)
            .with_stats(100, 60, 20, 30)
            .build();
        let mut defender = TestCharacterBuilder::new("D", CharacterClass::Warrior)
            .with_stats(100, 50, 20, 30)
            .build();
        defender.apply_status(StatusEffect::new(StatusKind::Shield, 2, 50));

        let outcome = calculate_damage(
            &attacker,
            &defender,
            None,
            &BattleConfig::default(),
            &mut midpoint_rng(),
        );
        // (60 - 20) * 50% = 20
        assert_eq!(outcome.damage, 20);
    }

    #[rstest]
    #[case(StatusKind::Buff, 45)] // 50 * 1.3 = 65, - 20
    #[case(StatusKind::Debuff, 15)] // 50 * 0.7 = 35, - 20
    fn test_attack_modifiers(#[case] status: StatusKind, #[case] expected: u16) {
        let mut attacker = TestCharacterBuilder::new("A", CharacterClass::Warrior)
            .with_stats(100, 50, 20, 30)
            .build();
        attacker.apply_status(StatusEffect::new(status, 3, 30));
        let defender = TestCharacterBuilder::new("D", CharacterClass::Warrior)
            .with_stats(100, 50, 20, 30)
            .build();

        let outcome = calculate_damage(
            &attacker,
            &defender,
            None,
            &BattleConfig::default(),
            &mut midpoint_rng(),
        );
        assert_eq!(outcome.damage, expected);
    }

    #[test]
    fn test_estimate_matches_jitter_bounds() {
        let attacker = TestCharacterBuilder::new("A", CharacterClass::Warrior)
            .with_stats(100, 120, 20, 30)
            .build();
        let defender = TestCharacterBuilder::new("D", CharacterClass::Rogue)
            .with_stats(90, 45, 15, 35)
            .build();
        let config = BattleConfig::default();

        // 120 * 1.5 = 180, - 15 = 165
        assert_eq!(
            estimate_damage_range(&attacker, &defender, None, &config),
            (148, 181)
        );

        let low = calculate_damage(
            &attacker,
            &defender,
            None,
            &config,
            &mut BattleRng::new_for_test(vec![1]),
        );
        let high = calculate_damage(
            &attacker,
            &defender,
            None,
            &config,
            &mut BattleRng::new_for_test(vec![100]),
        );
        assert_eq!((low.damage, high.damage), (148, 181));
    }

    #[test]
    fn test_extreme_jitter_saturates_instead_of_overflowing() {
        // Arrange: a hand-built config that skips validation
        let attacker = TestCharacterBuilder::new("Titan", CharacterClass::Warrior)
            .with_stats(100, 60000, 20, 30)
            .build();
        let defender = TestCharacterBuilder::new("Paper", CharacterClass::Rogue)
            .with_stats(100, 10, 1, 30)
            .build();
        let config = BattleConfig {
            jitter_min_pct: 60000,
            jitter_max_pct: 60000,
            ..BattleConfig::default()
        };

        // Act
        let outcome = calculate_damage(
            &attacker,
            &defender,
            None,
            &config,
            &mut BattleRng::new_for_test(vec![50]),
        );

        // Assert
        assert_eq!(outcome.damage, u16::MAX);
        assert_eq!(
            estimate_damage_range(&attacker, &defender, None, &config),
            (u16::MAX, u16::MAX)
        );
    }

    #[test]
    fn test_floor_holds_with_defense_shield_and_debuff() {
        let mut attacker = TestCharacterBuilder::new("A", CharacterClass::Support)
            .with_stats(100, 60, 10, 30)
            .build();
        attacker.apply_status(StatusEffect::new(StatusKind::Debuff, 3, 100));
        let mut defender = TestCharacterBuilder::new("D", CharacterClass::Tank)
            .with_stats(100, 10, 60000, 30)
            .build();
        defender.apply_status(StatusEffect::new(StatusKind::Shield, 2, 100));

        let outcome = calculate_damage(
            &attacker,
            &defender,
            None,
            &BattleConfig::default(),
            &mut BattleRng::new_for_test(vec![1]),
        );
        assert_eq!(outcome.damage, 1);
    }

    proptest! {
        #[test]
        fn prop_damage_is_at_least_one(
            attack in 1u16..=u16::MAX,
            defense in 1u16..=u16::MAX,
            power in proptest::option::of(0u16..300),
            shield in proptest::option::of(0u8..=100),
            buff in proptest::option::of(0u8..=100),
            debuff in proptest::option::of(0u8..=100),
            seed in any::<u64>(),
        ) {
            let mut attacker = TestCharacterBuilder::new("A", CharacterClass::Rogue)
                .with_stats(100, attack, 10, 30)
                .build();
            let mut defender = TestCharacterBuilder::new("D", CharacterClass::Warrior)
                .with_stats(100, 10, defense, 30)
                .build();
            if let Some(magnitude) = buff {
                attacker.apply_status(StatusEffect::new(StatusKind::Buff, 3, magnitude));
            }
            if let Some(magnitude) = debuff {
                attacker.apply_status(StatusEffect::new(StatusKind::Debuff, 3, magnitude));
            }
            if let Some(magnitude) = shield {
                defender.apply_status(StatusEffect::new(StatusKind::Shield, 2, magnitude));
            }

            let outcome = calculate_damage(
                &attacker,
                &defender,
                power,
                &BattleConfig::default(),
                &mut BattleRng::from_seed(seed),
            );
            let (low, high) = estimate_damage_range(&attacker, &defender, power, &BattleConfig::default());

            prop_assert!(outcome.damage >= 1);
            prop_assert!(low <= outcome.damage && outcome.damage <= high);
        }
    }
}
