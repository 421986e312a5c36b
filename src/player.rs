use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    /// Basic attack using the active character's attack stat.
    Attack,

    // The index refers to the ability's slot (0-3) on the active character.
    UseAbility { ability_index: usize },

    // The index refers to the character's position (0-2) in the player's team.
    Switch { team_index: usize },
}

impl PlayerAction {
    pub fn is_switch(&self) -> bool {
        matches!(self, PlayerAction::Switch { .. })
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Attack => write!(f, "attack"),
            PlayerAction::UseAbility { ability_index } => write!(f, "ability #{}", ability_index),
            PlayerAction::Switch { team_index } => write!(f, "switch to slot {}", team_index),
        }
    }
}

/// One of the two sides of a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSide {
    Player1,
    Player2,
}

impl PlayerSide {
    pub const BOTH: [PlayerSide; 2] = [PlayerSide::Player1, PlayerSide::Player2];

    pub fn to_index(self) -> usize {
        match self {
            PlayerSide::Player1 => 0,
            PlayerSide::Player2 => 1,
        }
    }

    pub fn opponent(self) -> PlayerSide {
        match self {
            PlayerSide::Player1 => PlayerSide::Player2,
            PlayerSide::Player2 => PlayerSide::Player1,
        }
    }

    pub fn from_index(index: usize) -> Option<PlayerSide> {
        match index {
            0 => Some(PlayerSide::Player1),
            1 => Some(PlayerSide::Player2),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerSide::Player1 => write!(f, "Player 1"),
            PlayerSide::Player2 => write!(f, "Player 2"),
        }
    }
}
