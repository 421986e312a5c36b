use crate::battle::conditions::StatusEffect;
use crate::battle::state::{BattleRng, BattleState};
use crate::character::Character;
use crate::config::BattleConfig;
use crate::errors::BattleResult;
use crate::team::Team;
use schema::{AbilityData, AbilityEffect, BaseStats, CharacterClass};

/// A builder for creating test characters with common defaults.
///
/// # Example
/// ```ignore
/// let knight = TestCharacterBuilder::new("Knight", CharacterClass::Warrior)
///     .with_stats(100, 50, 20, 30)
///     .with_abilities(vec![ability("Slam", 40, 2)])
///     .build();
/// ```
pub struct TestCharacterBuilder {
    name: String,
    class: CharacterClass,
    stats: BaseStats,
    abilities: Vec<AbilityData>,
    statuses: Vec<StatusEffect>,
    current_hp: Option<u16>,
}

impl TestCharacterBuilder {
    /// Creates a new builder with 100 HP, 50 attack, 20 defense and 30 speed.
    pub fn new(name: &str, class: CharacterClass) -> Self {
        Self {
            name: name.to_string(),
            class,
            stats: BaseStats::new(100, 50, 20, 30),
            abilities: Vec::new(),
            statuses: Vec::new(),
            current_hp: None,
        }
    }

    pub fn with_stats(mut self, max_hp: u16, attack: u16, defense: u16, speed: u16) -> Self {
        self.stats = BaseStats::new(max_hp, attack, defense, speed);
        self
    }

    pub fn with_abilities(mut self, abilities: Vec<AbilityData>) -> Self {
        self.abilities = abilities;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_status(mut self, status: StatusEffect) -> Self {
        self.statuses.push(status);
        self
    }

    pub fn build(self) -> Character {
        let mut character =
            match Character::new(self.name.clone(), self.class, self.stats, self.abilities) {
                Ok(character) => character,
                Err(err) => panic!("Failed to build test character {}: {}", self.name, err),
            };

        if let Some(hp) = self.current_hp {
            character.set_hp(hp);
        }
        for status in self.statuses {
            character.apply_status(status);
        }

        character
    }
}

/// A builder for 3-character test teams.
///
/// Defaults to Knight (Warrior), Wizard (Mage) and Scout (Rogue), all with
/// the default test stats and no abilities.
pub struct TestTeamBuilder {
    name: String,
    members: [Option<Character>; 3],
}

impl TestTeamBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: [None, None, None],
        }
    }

    /// Replaces the first (active) character.
    pub fn with_lead(self, character: Character) -> Self {
        self.with_member(0, character)
    }

    pub fn with_member(mut self, index: usize, character: Character) -> Self {
        self.members[index] = Some(character);
        self
    }

    pub fn build(self) -> Team {
        let defaults = [
            ("Knight", CharacterClass::Warrior),
            ("Wizard", CharacterClass::Mage),
            ("Scout", CharacterClass::Rogue),
        ];
        let characters: Vec<Character> = self
            .members
            .into_iter()
            .zip(defaults)
            .map(|(member, (name, class))| {
                member.unwrap_or_else(|| TestCharacterBuilder::new(name, class).build())
            })
            .collect();

        match Team::new(self.name.clone(), characters) {
            Ok(team) => team,
            Err(err) => panic!("Failed to build test team {}: {}", self.name, err),
        }
    }
}

/// A class-agnostic damaging ability with priority 0.
pub fn ability(name: &str, power: u16, cooldown: u8) -> AbilityData {
    AbilityData {
        name: name.to_string(),
        description: format!("Test ability {}", name),
        required_class: None,
        effects: vec![AbilityEffect::damage(power)],
        cooldown,
        priority: 0,
    }
}

/// Creates a `BattleRng` with a long list of default values (50).
/// Useful for tests where the specific RNG outcome is not important, preventing panics from exhaustion.
/// Every jitter draw of 50 lands exactly on 100%.
pub fn predictable_rng() -> BattleRng {
    BattleRng::new_for_test(vec![50; 100])
}

/// Creates a battle that has not been started, with the default config and
/// a predictable RNG.
pub fn create_test_battle(team1: Team, team2: Team) -> BattleState {
    create_test_battle_with_rng(team1, team2, predictable_rng())
}

pub fn create_test_battle_with_rng(team1: Team, team2: Team, rng: BattleRng) -> BattleState {
    assert_ok(BattleState::with_rng(
        team1,
        team2,
        BattleConfig::default(),
        rng,
    ))
}

/// Same as [`create_test_battle`], already in progress.
pub fn create_started_battle(team1: Team, team2: Team) -> BattleState {
    let mut battle_state = create_test_battle(team1, team2);
    assert_ok(battle_state.start_battle());
    battle_state
}

pub fn create_started_battle_with_rng(team1: Team, team2: Team, rng: BattleRng) -> BattleState {
    let mut battle_state = create_test_battle_with_rng(team1, team2, rng);
    assert_ok(battle_state.start_battle());
    battle_state
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

/// Routes engine logs to the test output. Set `RUST_LOG=battle_rpg=debug`
/// to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
