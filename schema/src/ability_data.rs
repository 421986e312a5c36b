use crate::{CharacterClass, StatusKind};
use serde::{Deserialize, Serialize};

/// Who an ability effect lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum EffectTarget {
    Opponent,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Deals damage through the damage calculator with this base power.
    Damage { power: u16 },
    /// Restores a flat amount of HP.
    Heal { amount: u16 },
    ApplyStatus { status: StatusKind },
    /// Shorthand for applying [`StatusKind::Buff`].
    Buff,
    /// Shorthand for applying [`StatusKind::Debuff`].
    Debuff,
}

impl EffectKind {
    /// The status this effect applies, if it applies one.
    pub fn status(&self) -> Option<StatusKind> {
        match self {
            EffectKind::ApplyStatus { status } => Some(*status),
            EffectKind::Buff => Some(StatusKind::Buff),
            EffectKind::Debuff => Some(StatusKind::Debuff),
            EffectKind::Damage { .. } | EffectKind::Heal { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEffect {
    pub kind: EffectKind,
    pub target: EffectTarget,
    /// Percent chance (0-100) that this effect triggers when the ability is used.
    pub chance: u8,
    /// Overrides the configured status duration when this effect applies a status.
    #[serde(default)]
    pub duration: Option<u8>,
    /// Overrides the configured status magnitude (percent) when this effect applies a status.
    #[serde(default)]
    pub magnitude: Option<u8>,
}

impl AbilityEffect {
    pub fn damage(power: u16) -> Self {
        Self::new(EffectKind::Damage { power }, EffectTarget::Opponent)
    }

    pub fn heal(amount: u16) -> Self {
        Self::new(EffectKind::Heal { amount }, EffectTarget::User)
    }

    pub fn status(status: StatusKind, target: EffectTarget) -> Self {
        Self::new(EffectKind::ApplyStatus { status }, target)
    }

    pub fn buff() -> Self {
        Self::new(EffectKind::Buff, EffectTarget::User)
    }

    pub fn debuff() -> Self {
        Self::new(EffectKind::Debuff, EffectTarget::Opponent)
    }

    fn new(kind: EffectKind, target: EffectTarget) -> Self {
        Self {
            kind,
            target,
            chance: 100,
            duration: None,
            magnitude: None,
        }
    }

    pub fn with_chance(mut self, chance: u8) -> Self {
        self.chance = chance.min(100);
        self
    }

    pub fn with_target(mut self, target: EffectTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_duration(mut self, duration: u8) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_magnitude(mut self, magnitude: u8) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    /// True when the effect never needs a random roll.
    pub fn is_guaranteed(&self) -> bool {
        self.chance >= 100
    }
}

/// Static definition of an ability. Characters own their own copy together
/// with its cooldown counter, so nothing here changes during a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityData {
    pub name: String,
    pub description: String,
    /// Only characters of this class may use the ability. `None` means unrestricted.
    pub required_class: Option<CharacterClass>,
    pub effects: Vec<AbilityEffect>,
    /// Turns that must pass after use before the ability is usable again.
    pub cooldown: u8,
    /// Priority tier; higher tiers act before lower ones regardless of speed.
    pub priority: i8,
}

impl AbilityData {
    /// Sum of the power of every damage effect.
    pub fn base_power(&self) -> u16 {
        self.effects
            .iter()
            .filter_map(|effect| match effect.kind {
                EffectKind::Damage { power } => Some(power),
                _ => None,
            })
            .fold(0u16, |total, power| total.saturating_add(power))
    }

    /// Sum of every heal effect's amount.
    pub fn heal_amount(&self) -> u16 {
        self.effects
            .iter()
            .filter_map(|effect| match effect.kind {
                EffectKind::Heal { amount } => Some(amount),
                _ => None,
            })
            .fold(0u16, |total, amount| total.saturating_add(amount))
    }

    pub fn deals_damage(&self) -> bool {
        self.base_power() > 0
    }

    pub fn can_be_used_by(&self, class: CharacterClass) -> bool {
        self.required_class.map_or(true, |required| required == class)
    }

    /// Every status this ability may apply, in effect order.
    pub fn status_effects(&self) -> Vec<StatusKind> {
        self.effects
            .iter()
            .filter_map(|effect| effect.kind.status())
            .collect()
    }
}
