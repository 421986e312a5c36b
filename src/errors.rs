use crate::battle::state::BattlePhase;
use crate::player::PlayerSide;
use schema::CharacterClass;

/// Main error type for the battle engine.
///
/// `IllegalAction` is recoverable: the caller should pick a different action
/// (see [`crate::battle::validation::get_valid_actions`]). `InvalidState` means
/// the caller drove the state machine out of order and is not retryable on
/// the same battle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BattleError {
    #[error("invalid team composition: {0}")]
    InvalidTeamComposition(#[from] TeamCompositionError),

    #[error("illegal action for {side}: {violation}")]
    IllegalAction {
        side: PlayerSide,
        violation: ActionViolation,
    },

    #[error("cannot {operation} while the battle is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: BattlePhase,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Why a team (or one of its characters) cannot enter a battle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TeamCompositionError {
    #[error("a team needs exactly 3 characters, got {0}")]
    WrongSize(usize),
    #[error("character name '{0}' appears more than once")]
    DuplicateName(String),
    #[error("character '{0}' is fainted at battle start")]
    FaintedAtStart(String),
    #[error("active slot {0} does not match the characters' active markers")]
    InconsistentActive(usize),
    #[error("character '{name}' has {count} abilities, at most 4 are allowed")]
    TooManyAbilities { name: String, count: usize },
    #[error("character '{name}' has a zero {stat} stat")]
    ZeroStat { name: String, stat: &'static str },
}

/// The specific validation rule an action broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionViolation {
    #[error("the active character is stunned and must pass")]
    Stunned,
    #[error("the active character has fainted")]
    ActorFainted,
    #[error("no ability in slot {0}")]
    InvalidAbilityIndex(usize),
    #[error("{ability} requires class {required}, character is {actual}")]
    ClassMismatch {
        ability: String,
        required: CharacterClass,
        actual: CharacterClass,
    },
    #[error("{ability} is on cooldown for {remaining} more turn(s)")]
    OnCooldown { ability: String, remaining: u8 },
    #[error("team slot {0} does not exist")]
    InvalidTeamIndex(usize),
    #[error("character in slot {0} is already active")]
    SwitchToSelf(usize),
    #[error("character in slot {0} has fainted")]
    SwitchToFainted(usize),
}

/// Errors raised while building a [`crate::config::BattleConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse RON: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(err: ron::error::SpannedError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Type alias for Results using BattleError
pub type BattleResult<T> = Result<T, BattleError>;
