// Battle RPG Schema - Shared type definitions
// This crate contains the closed enums and static data shapes shared by the
// engine and by anything that authors characters or abilities for it.

// Re-export the main types
pub use ability_data::*;
pub use battle_data::*;
pub use class_types::*;
pub use stats_data::*;

pub mod ability_data;
pub mod battle_data;
pub mod class_types;
pub mod stats_data;
