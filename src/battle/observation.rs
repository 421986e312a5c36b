use crate::battle::state::{BattlePhase, BattleState};
use crate::character::Character;
use crate::player::PlayerSide;
use crate::team::Team;
use schema::{CharacterClass, StatusKind};
use serde::{Deserialize, Serialize};

/// Read-only view of a battle for AI or UI consumers.
///
/// Holds no references into the live state, so it can be kept, serialized,
/// or compared across turns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ObservableState {
    pub turn_number: u32,
    pub phase: BattlePhase,
    /// Player 1 first.
    pub sides: [SideObservation; 2],
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SideObservation {
    pub team_name: String,
    pub active_index: usize,
    pub characters: Vec<CharacterObservation>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CharacterObservation {
    pub name: String,
    pub class: CharacterClass,
    pub current_hp: u16,
    pub max_hp: u16,
    pub hp_ratio: f64,
    pub fainted: bool,
    pub is_active: bool,
    pub statuses: Vec<StatusKind>,
    pub cooldowns: Vec<CooldownObservation>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CooldownObservation {
    pub ability: String,
    pub remaining: u8,
    pub length: u8,
}

impl ObservableState {
    pub fn capture(battle_state: &BattleState) -> Self {
        Self {
            turn_number: battle_state.turn_number(),
            phase: battle_state.phase(),
            sides: PlayerSide::BOTH.map(|side| SideObservation::capture(battle_state.team(side))),
        }
    }

    pub fn side(&self, side: PlayerSide) -> &SideObservation {
        &self.sides[side.to_index()]
    }
}

impl SideObservation {
    fn capture(team: &Team) -> Self {
        Self {
            team_name: team.name.clone(),
            active_index: team.active_index(),
            characters: team
                .characters()
                .iter()
                .map(CharacterObservation::capture)
                .collect(),
        }
    }

    pub fn active(&self) -> &CharacterObservation {
        &self.characters[self.active_index]
    }
}

impl CharacterObservation {
    fn capture(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            class: character.class,
            current_hp: character.current_hp(),
            max_hp: character.max_hp(),
            hp_ratio: character.hp_ratio(),
            fainted: character.is_fainted(),
            is_active: character.is_active,
            statuses: character.statuses.kinds(),
            cooldowns: character
                .abilities
                .iter()
                .flatten()
                .map(|ability| CooldownObservation {
                    ability: ability.data.name.clone(),
                    remaining: ability.cooldown_remaining,
                    length: ability.data.cooldown,
                })
                .collect(),
        }
    }
}
