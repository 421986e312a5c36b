use crate::errors::ConfigError;
use schema::StatusKind;
use serde::{Deserialize, Serialize};

/// Rule used when both actions share the same ordering key.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Player 1 acts first on odd turns, Player 2 on even turns.
    #[default]
    AlternateByTurn,
    PlayerOneFirst,
}

/// Duration and strength of one status kind.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTuning {
    pub duration: u8,
    /// Percent. Damage per tick for Burn/Poison, reduction for Shield,
    /// attack change for Buff/Debuff. Unused by Stun.
    pub magnitude: u8,
}

impl StatusTuning {
    pub const fn new(duration: u8, magnitude: u8) -> Self {
        Self {
            duration,
            magnitude,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StatusSettings {
    pub burn: StatusTuning,
    pub poison: StatusTuning,
    /// Extra percent of max HP added to poison damage on each successive tick.
    pub poison_step: u8,
    pub stun: StatusTuning,
    pub shield: StatusTuning,
    pub buff: StatusTuning,
    pub debuff: StatusTuning,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            burn: StatusTuning::new(3, 5),
            poison: StatusTuning::new(4, 5),
            poison_step: 5,
            // Applied mid-turn, so it has to survive that turn's tick to cost
            // the target its next action.
            stun: StatusTuning::new(2, 0),
            shield: StatusTuning::new(2, 50),
            buff: StatusTuning::new(3, 30),
            debuff: StatusTuning::new(3, 30),
        }
    }
}

impl StatusSettings {
    pub fn tuning(&self, kind: StatusKind) -> StatusTuning {
        match kind {
            StatusKind::Burn => self.burn,
            StatusKind::Poison => self.poison,
            StatusKind::Stun => self.stun,
            StatusKind::Shield => self.shield,
            StatusKind::Buff => self.buff,
            StatusKind::Debuff => self.debuff,
        }
    }
}

/// Tunable rules for one battle.
///
/// Every field has a default, so a RON document only needs to name the
/// values it overrides:
///
/// ```
/// use battle_rpg::config::{BattleConfig, TieBreak};
///
/// let config = BattleConfig::from_ron_str("(max_turns: 30, tie_break: PlayerOneFirst)").unwrap();
/// assert_eq!(config.max_turns, 30);
/// assert_eq!(config.tie_break, TieBreak::PlayerOneFirst);
/// assert_eq!(config.jitter_min_pct, 90);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BattleConfig {
    pub max_turns: u32,
    pub jitter_min_pct: u16,
    pub jitter_max_pct: u16,
    pub tie_break: TieBreak,
    pub statuses: StatusSettings,
}

/// Upper bound for either end of the damage jitter range.
pub const MAX_JITTER_PCT: u16 = 200;

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_turns: 100,
            jitter_min_pct: 90,
            jitter_max_pct: 110,
            tie_break: TieBreak::default(),
            statuses: StatusSettings::default(),
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns == 0 {
            return Err(invalid("max_turns", "must be at least 1".to_string()));
        }
        if self.jitter_min_pct == 0 {
            return Err(invalid("jitter_min_pct", "must be positive".to_string()));
        }
        if self.jitter_max_pct > MAX_JITTER_PCT {
            return Err(invalid(
                "jitter_max_pct",
                format!("{}% exceeds {}%", self.jitter_max_pct, MAX_JITTER_PCT),
            ));
        }
        if self.jitter_min_pct > self.jitter_max_pct {
            return Err(invalid(
                "jitter_min_pct",
                format!(
                    "{} is greater than jitter_max_pct {}",
                    self.jitter_min_pct, self.jitter_max_pct
                ),
            ));
        }

        let statuses = &self.statuses;
        let tunings = [
            ("statuses.burn", statuses.burn),
            ("statuses.poison", statuses.poison),
            ("statuses.stun", statuses.stun),
            ("statuses.shield", statuses.shield),
            ("statuses.buff", statuses.buff),
            ("statuses.debuff", statuses.debuff),
        ];
        for (field, tuning) in tunings {
            if tuning.duration == 0 {
                return Err(invalid(field, "duration must be at least 1".to_string()));
            }
            if tuning.magnitude > 100 {
                return Err(invalid(
                    field,
                    format!("magnitude {}% exceeds 100%", tuning.magnitude),
                ));
            }
        }
        if statuses.poison_step > 100 {
            return Err(invalid(
                "statuses.poison_step",
                format!("{}% exceeds 100%", statuses.poison_step),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}
