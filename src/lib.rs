// In: src/lib.rs

//! Battle RPG Engine
//!
//! A deterministic 3v3 turn-based battle engine. Characters of five classes
//! trade attacks and abilities under a class-effectiveness cycle, status
//! effects and per-ability cooldowns. Every random decision comes from a
//! seeded generator, so a seed plus a list of actions replays a battle exactly.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod abilities;
pub mod battle;
pub mod character;
pub mod config;
pub mod errors;
pub mod player;
pub mod prefab_teams;
pub mod team;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `battle-rpg` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export all core data definitions and static enums.
pub use schema::{
    // Core Data Structs
    AbilityData,
    AbilityEffect,
    BaseStats,
    // Core Enums
    CharacterClass,
    EffectKind,
    EffectTarget,
    StatusKind,
};

// --- From this crate's modules (`src/`) ---

// Core battle engine functions and state.
pub use battle::engine::{
    execute_turn, get_observable_state, start_battle, start_battle_with_config, TurnResult,
};
pub use battle::observation::ObservableState;
pub use battle::state::{BattleEvent, BattleOutcome, BattlePhase, BattleState};
pub use battle::validation::{get_valid_actions, validate_action};

// Core runtime types for a battle.
pub use character::Character;
pub use config::BattleConfig;
pub use player::{PlayerAction, PlayerSide};
pub use team::Team;

// Crate-specific error and result types.
pub use errors::{ActionViolation, BattleError, BattleResult, ConfigError, TeamCompositionError};
