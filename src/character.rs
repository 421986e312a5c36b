use crate::battle::conditions::{StatusEffect, StatusEffects};
use crate::errors::TeamCompositionError;
use schema::{AbilityData, BaseStats, CharacterClass, StatusKind};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_ABILITIES: usize = 4;

/// An ability owned by one character, with its own cooldown counter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AbilityInst {
    pub data: AbilityData,
    pub cooldown_remaining: u8,
}

impl AbilityInst {
    pub fn new(data: AbilityData) -> Self {
        Self {
            data,
            cooldown_remaining: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    /// Starts the full cooldown after the ability is used.
    pub fn put_on_cooldown(&mut self) {
        self.cooldown_remaining = self.data.cooldown;
    }

    pub fn reduce_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub stats: BaseStats,
    current_hp: u16,
    pub abilities: [Option<AbilityInst>; MAX_ABILITIES],
    pub statuses: StatusEffects,
    pub(crate) is_active: bool,
    pub damage_dealt: u32,
    pub damage_received: u32,
}

impl Character {
    /// Create a character at full HP.
    ///
    /// Fails if any stat is zero or more than four abilities are given.
    pub fn new(
        name: impl Into<String>,
        class: CharacterClass,
        stats: BaseStats,
        abilities: Vec<AbilityData>,
    ) -> Result<Self, TeamCompositionError> {
        let name = name.into();

        if let Some(stat) = stats.first_zero_stat() {
            return Err(TeamCompositionError::ZeroStat { name, stat });
        }
        if abilities.len() > MAX_ABILITIES {
            return Err(TeamCompositionError::TooManyAbilities {
                name,
                count: abilities.len(),
            });
        }

        let mut ability_slots = [const { None }; MAX_ABILITIES];
        for (i, data) in abilities.into_iter().enumerate() {
            ability_slots[i] = Some(AbilityInst::new(data));
        }

        Ok(Self {
            name,
            class,
            current_hp: stats.max_hp,
            stats,
            abilities: ability_slots,
            statuses: StatusEffects::new(),
            is_active: false,
            damage_dealt: 0,
            damage_received: 0,
        })
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_fainted()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Set HP directly, clamped to `[0, max_hp]`.
    pub(crate) fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.stats.max_hp);
    }

    /// Subtract HP, never going below zero. Returns the HP actually lost,
    /// which is also added to `damage_received`.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        self.damage_received += dealt as u32;
        dealt
    }

    /// Restore HP up to max. Fainted characters cannot be healed.
    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        if self.is_fainted() {
            return 0;
        }
        let restored = amount.min(self.stats.max_hp - self.current_hp);
        self.current_hp += restored;
        restored
    }

    pub fn hp_ratio(&self) -> f64 {
        self.current_hp as f64 / self.stats.max_hp as f64
    }

    pub fn is_stunned(&self) -> bool {
        self.statuses.has(StatusKind::Stun)
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.statuses.has(kind)
    }

    /// Adds or refreshes a status. Returns true if an active effect of the
    /// same kind was replaced.
    pub fn apply_status(&mut self, effect: StatusEffect) -> bool {
        self.statuses.apply(effect)
    }

    /// Scales `value` by the active Buff and Debuff percentages.
    pub fn modified_power(&self, value: u16) -> u16 {
        let mut power = value as u32;
        if let Some(buff) = self.statuses.magnitude(StatusKind::Buff) {
            power = power * (100 + buff as u32) / 100;
        }
        if let Some(debuff) = self.statuses.magnitude(StatusKind::Debuff) {
            power = power * (100 - debuff.min(100) as u32) / 100;
        }
        power.min(u16::MAX as u32) as u16
    }

    /// Attack stat after Buff/Debuff.
    pub fn effective_attack(&self) -> u16 {
        self.modified_power(self.stats.attack)
    }

    pub fn ability(&self, index: usize) -> Option<&AbilityInst> {
        self.abilities.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn ability_mut(&mut self, index: usize) -> Option<&mut AbilityInst> {
        self.abilities.get_mut(index).and_then(|slot| slot.as_mut())
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.iter().flatten().count()
    }

    pub fn reduce_cooldowns(&mut self) {
        for ability in self.abilities.iter_mut().flatten() {
            ability.reduce_cooldown();
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) HP {}/{}",
            self.name, self.class, self.current_hp, self.stats.max_hp
        )
    }
}
