use crate::abilities;
use crate::character::Character;
use crate::errors::BattleResult;
use crate::team::Team;
use schema::{AbilityData, BaseStats, CharacterClass};
use serde::{Deserialize, Serialize};

/// A predefined team configuration for quick battles and demos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefabTeam {
    pub id: String,
    pub name: String,
    pub description: String,
    pub characters: Vec<PrefabCharacter>,
}

/// A predefined character configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefabCharacter {
    pub name: String,
    pub class: CharacterClass,
    pub stats: BaseStats,
    pub abilities: Vec<AbilityData>,
}

impl PrefabCharacter {
    fn new(
        name: &str,
        class: CharacterClass,
        stats: BaseStats,
        abilities: Vec<AbilityData>,
    ) -> Self {
        Self {
            name: name.to_string(),
            class,
            stats,
            abilities,
        }
    }

    pub fn build(&self) -> BattleResult<Character> {
        Ok(Character::new(
            self.name.clone(),
            self.class,
            self.stats,
            self.abilities.clone(),
        )?)
    }
}

impl PrefabTeam {
    /// Builds a fresh, full-HP team from this configuration.
    pub fn build(&self) -> BattleResult<Team> {
        let characters = self
            .characters
            .iter()
            .map(PrefabCharacter::build)
            .collect::<BattleResult<Vec<_>>>()?;
        Ok(Team::new(self.name.clone(), characters)?)
    }
}

/// Get all available prefab teams
pub fn get_prefab_teams() -> Vec<PrefabTeam> {
    vec![
        PrefabTeam {
            id: "balanced_team".to_string(),
            name: "Balanced Team".to_string(),
            description: "One of each cycle class, trading blows evenly with most lineups"
                .to_string(),
            characters: vec![
                PrefabCharacter::new(
                    "Aldric",
                    CharacterClass::Warrior,
                    BaseStats::new(100, 50, 20, 30),
                    vec![abilities::power_strike(), abilities::battle_cry()],
                ),
                PrefabCharacter::new(
                    "Lyra",
                    CharacterClass::Mage,
                    BaseStats::new(80, 60, 10, 40),
                    vec![abilities::fireball(), abilities::quick_attack()],
                ),
                PrefabCharacter::new(
                    "Vex",
                    CharacterClass::Rogue,
                    BaseStats::new(90, 55, 15, 45),
                    vec![
                        abilities::poison_strike(),
                        abilities::quick_attack(),
                        abilities::intimidate(),
                    ],
                ),
            ],
        },
        PrefabTeam {
            id: "fortress_team".to_string(),
            name: "Fortress Team".to_string(),
            description: "Slow and sturdy, wearing opponents down behind shields and heals"
                .to_string(),
            characters: vec![
                PrefabCharacter::new(
                    "Brom",
                    CharacterClass::Tank,
                    BaseStats::new(120, 40, 30, 20),
                    vec![abilities::shield_bash(), abilities::iron_defense()],
                ),
                PrefabCharacter::new(
                    "Mira",
                    CharacterClass::Support,
                    BaseStats::new(90, 30, 15, 35),
                    vec![abilities::heal(), abilities::intimidate()],
                ),
                PrefabCharacter::new(
                    "Garrick",
                    CharacterClass::Warrior,
                    BaseStats::new(110, 55, 25, 25),
                    vec![abilities::power_strike(), abilities::battle_cry()],
                ),
            ],
        },
        PrefabTeam {
            id: "strike_team".to_string(),
            name: "Strike Team".to_string(),
            description: "Fast, fragile attackers that aim to finish the fight early".to_string(),
            characters: vec![
                PrefabCharacter::new(
                    "Ignis",
                    CharacterClass::Mage,
                    BaseStats::new(75, 70, 8, 42),
                    vec![abilities::fireball(), abilities::battle_cry()],
                ),
                PrefabCharacter::new(
                    "Shade",
                    CharacterClass::Rogue,
                    BaseStats::new(85, 60, 12, 50),
                    vec![abilities::poison_strike(), abilities::quick_attack()],
                ),
                PrefabCharacter::new(
                    "Sol",
                    CharacterClass::Support,
                    BaseStats::new(95, 35, 15, 32),
                    vec![abilities::heal(), abilities::battle_cry()],
                ),
            ],
        },
    ]
}

/// Get a specific prefab team by ID
pub fn get_prefab_team(team_id: &str) -> Option<PrefabTeam> {
    get_prefab_teams().into_iter().find(|team| team.id == team_id)
}

/// Validate that every prefab team builds into a legal team
pub fn validate_prefab_teams() -> BattleResult<()> {
    for team in get_prefab_teams() {
        team.build()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_prefab_teams() {
        let teams = get_prefab_teams();
        let team_ids: Vec<&str> = teams.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(team_ids, vec!["balanced_team", "fortress_team", "strike_team"]);
    }

    #[test]
    fn test_get_prefab_team() {
        let team = get_prefab_team("fortress_team").unwrap();
        assert_eq!(team.characters[0].class, CharacterClass::Tank);
        assert!(get_prefab_team("non_existent").is_none());
    }

    #[test]
    fn test_build_team_from_prefab() {
        let team = get_prefab_team("balanced_team").unwrap().build().unwrap();
        assert_eq!(team.name, "Balanced Team");
        assert_eq!(team.active_character().name, "Aldric");
        assert_eq!(team.characters()[2].ability_count(), 3);
        assert_eq!(team.total_hp_ratio(), 1.0);
    }

    #[test]
    fn test_validate_prefab_teams() {
        assert_eq!(validate_prefab_teams(), Ok(()));
    }

    #[test]
    fn test_prefab_abilities_match_classes() {
        for team in get_prefab_teams() {
            for character in &team.characters {
                for ability in &character.abilities {
                    assert!(
                        ability.can_be_used_by(character.class),
                        "{} cannot use {}",
                        character.name,
                        ability.name
                    );
                }
            }
        }
    }
}
