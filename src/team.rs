use crate::character::Character;
use crate::errors::{ActionViolation, TeamCompositionError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const TEAM_SIZE: usize = 3;

/// Three characters fighting for one player. Exactly one of them is active
/// at a time, and the active one is alive unless the whole team has fainted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Team {
    pub name: String,
    characters: [Character; TEAM_SIZE],
    active_index: usize,
}

impl Team {
    pub fn new(
        name: impl Into<String>,
        characters: Vec<Character>,
    ) -> Result<Self, TeamCompositionError> {
        let count = characters.len();
        let mut characters: [Character; TEAM_SIZE] = characters
            .try_into()
            .map_err(|_| TeamCompositionError::WrongSize(count))?;

        let mut seen = HashSet::new();
        for character in &characters {
            if !seen.insert(character.name.as_str()) {
                return Err(TeamCompositionError::DuplicateName(character.name.clone()));
            }
        }
        Self::ensure_all_standing(&characters)?;

        for (i, character) in characters.iter_mut().enumerate() {
            character.is_active = i == 0;
        }

        Ok(Self {
            name: name.into(),
            characters,
            active_index: 0,
        })
    }

    fn ensure_all_standing(characters: &[Character]) -> Result<(), TeamCompositionError> {
        match characters.iter().find(|c| c.is_fainted()) {
            Some(fainted) => Err(TeamCompositionError::FaintedAtStart(fainted.name.clone())),
            None => Ok(()),
        }
    }

    /// Re-checks the battle-start requirements. A deserialized team never
    /// went through `new`, so the active marker is checked as well.
    pub fn validate_for_battle(&self) -> Result<(), TeamCompositionError> {
        Self::ensure_all_standing(&self.characters)?;
        let flags_match = self
            .characters
            .iter()
            .enumerate()
            .all(|(i, c)| c.is_active == (i == self.active_index));
        if self.active_index >= TEAM_SIZE || !flags_match {
            return Err(TeamCompositionError::InconsistentActive(self.active_index));
        }
        Ok(())
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub(crate) fn characters_mut(&mut self) -> &mut [Character] {
        &mut self.characters
    }

    pub fn character(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    pub(crate) fn character_mut(&mut self, index: usize) -> Option<&mut Character> {
        self.characters.get_mut(index)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_character(&self) -> &Character {
        &self.characters[self.active_index]
    }

    pub fn active_character_mut(&mut self) -> &mut Character {
        &mut self.characters[self.active_index]
    }

    /// Checks whether the team could switch to `index` right now.
    pub fn can_switch_to(&self, index: usize) -> Result<(), ActionViolation> {
        let target = self
            .characters
            .get(index)
            .ok_or(ActionViolation::InvalidTeamIndex(index))?;
        if index == self.active_index {
            return Err(ActionViolation::SwitchToSelf(index));
        }
        if target.is_fainted() {
            return Err(ActionViolation::SwitchToFainted(index));
        }
        Ok(())
    }

    /// Makes the character at `index` active. Status effects stay with each character.
    pub fn switch_to(&mut self, index: usize) -> Result<(), ActionViolation> {
        self.can_switch_to(index)?;
        self.set_active(index);
        Ok(())
    }

    pub fn switch_to_name(&mut self, name: &str) -> Result<(), ActionViolation> {
        let index = self
            .index_of(name)
            .ok_or(ActionViolation::InvalidTeamIndex(TEAM_SIZE))?;
        self.switch_to(index)
    }

    fn set_active(&mut self, index: usize) {
        self.characters[self.active_index].is_active = false;
        self.active_index = index;
        self.characters[index].is_active = true;
    }

    /// If the active character has fainted, bring in the first living one.
    /// Returns `(old_index, new_index)` when a switch happened.
    pub fn auto_switch_on_faint(&mut self) -> Option<(usize, usize)> {
        if self.active_character().is_alive() {
            return None;
        }
        let old_index = self.active_index;
        let new_index = self.characters.iter().position(|c| c.is_alive())?;
        self.set_active(new_index);
        Some((old_index, new_index))
    }

    pub fn is_defeated(&self) -> bool {
        self.characters.iter().all(|c| c.is_fainted())
    }

    pub fn alive_count(&self) -> usize {
        self.characters.iter().filter(|c| c.is_alive()).count()
    }

    pub fn alive_characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(|c| c.is_alive())
    }

    pub fn total_hp(&self) -> u32 {
        self.characters.iter().map(|c| c.current_hp() as u32).sum()
    }

    pub fn total_max_hp(&self) -> u32 {
        self.characters.iter().map(|c| c.max_hp() as u32).sum()
    }

    pub fn total_hp_ratio(&self) -> f64 {
        self.total_hp() as f64 / self.total_max_hp() as f64
    }

    pub fn character_by_name(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.characters.iter().position(|c| c.name == name)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, character) in self.characters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let marker = if i == self.active_index { "*" } else { "" };
            write!(f, "{}{}", marker, character)?;
        }
        write!(f, "]")
    }
}
