use crate::battle::state::{BattleEvent, EventBus};
use crate::character::Character;
use crate::config::StatusSettings;
use crate::player::PlayerSide;
use schema::StatusKind;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub turns_remaining: u8,
    /// Percent; meaning depends on `kind`.
    pub magnitude: u8,
    /// Number of poison ticks already taken. Always 0 for other kinds.
    pub escalation: u8,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, turns_remaining: u8, magnitude: u8) -> Self {
        Self {
            kind,
            turns_remaining,
            magnitude,
            escalation: 0,
        }
    }

    /// Builds an effect from the configured tuning, with optional per-ability overrides.
    pub fn from_settings(
        kind: StatusKind,
        settings: &StatusSettings,
        duration: Option<u8>,
        magnitude: Option<u8>,
    ) -> Self {
        let tuning = settings.tuning(kind);
        Self::new(
            kind,
            duration.unwrap_or(tuning.duration).max(1),
            magnitude.unwrap_or(tuning.magnitude).min(100),
        )
    }
}

/// Active status effects of one character, at most one per kind.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusEffects {
    slots: [Option<StatusEffect>; StatusKind::COUNT],
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `effect`, replacing any active effect of the same kind.
    /// Returns true if an existing effect was replaced.
    pub fn apply(&mut self, effect: StatusEffect) -> bool {
        self.slots[effect.kind.index()]
            .replace(effect)
            .is_some()
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.slots[kind.index()].as_ref()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn remove(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        self.slots[kind.index()].take()
    }

    /// Magnitude of an active effect, if the kind is active.
    pub fn magnitude(&self, kind: StatusKind) -> Option<u8> {
        self.get(kind).map(|effect| effect.magnitude)
    }

    /// Active effects in tick order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.slots.iter().flatten()
    }

    pub fn kinds(&self) -> Vec<StatusKind> {
        self.iter().map(|effect| effect.kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

/// Damage one tick of a damaging status deals, floored at 1.
pub fn status_tick_damage(effect: &StatusEffect, max_hp: u16, settings: &StatusSettings) -> u16 {
    let percent = match effect.kind {
        StatusKind::Burn => effect.magnitude as u32,
        StatusKind::Poison => {
            effect.magnitude as u32 + settings.poison_step as u32 * effect.escalation as u32
        }
        StatusKind::Stun | StatusKind::Shield | StatusKind::Buff | StatusKind::Debuff => return 0,
    };

    let damage = (max_hp as u32 * percent / 100).max(1);
    damage.min(u16::MAX as u32) as u16
}

/// Runs the end-of-turn tick for one character.
///
/// Damaging kinds hit first, in kind order; a character that faints stops
/// ticking right away. Survivors then have every effect's duration
/// decremented, and effects that reach 0 are removed.
pub fn process_end_of_turn(
    character: &mut Character,
    side: PlayerSide,
    settings: &StatusSettings,
    bus: &mut EventBus,
) {
    if character.is_fainted() {
        return;
    }

    for kind in StatusKind::iter().filter(|kind| kind.deals_damage()) {
        let Some(effect) = character.statuses.get(kind).copied() else {
            continue;
        };

        let damage = status_tick_damage(&effect, character.max_hp(), settings);
        let dealt = character.take_damage(damage);
        bus.push(BattleEvent::StatusDamage {
            side,
            target: character.name.clone(),
            status: kind,
            damage: dealt,
            remaining_hp: character.current_hp(),
        });

        if kind == StatusKind::Poison {
            if let Some(poison) = character.statuses.slots[kind.index()].as_mut() {
                poison.escalation = poison.escalation.saturating_add(1);
            }
        }

        if character.is_fainted() {
            tracing::debug!(character = %character.name, status = %kind, "fainted from status damage");
            bus.push(BattleEvent::CharacterFainted {
                side,
                character: character.name.clone(),
            });
            return;
        }
    }

    for slot in character.statuses.slots.iter_mut() {
        let expired = match slot.as_mut() {
            Some(effect) => {
                effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
                effect.turns_remaining == 0
            }
            None => false,
        };

        if expired {
            if let Some(effect) = slot.take() {
                bus.push(BattleEvent::StatusExpired {
                    side,
                    target: character.name.clone(),
                    status: effect.kind,
                });
            }
        }
    }
}
