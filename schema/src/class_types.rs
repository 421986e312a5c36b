use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Tank,
    Support,
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl CharacterClass {
    /// Damage multiplier for an attacking class against a defending class.
    /// Returns: 1.5 = Super Effective, 1.0 = Neutral, 0.5 = Not Very Effective
    ///
    /// Warrior > Rogue > Mage > Warrior is the main cycle; the reverse direction
    /// of each cycle pair is resisted. Tank sits outside the cycle: it resists
    /// Warrior and Rogue, is weak to Mage, and hits everything neutrally.
    /// Support is neutral both ways.
    pub fn type_effectiveness(attacking: CharacterClass, defending: CharacterClass) -> f64 {
        use CharacterClass::*;

        match (attacking, defending) {
            // Support
            (Support, _) | (_, Support) => 1.0,

            // Warrior
            (Warrior, Rogue) => 1.5,
            (Warrior, Mage) | (Warrior, Tank) => 0.5,
            (Warrior, _) => 1.0,

            // Rogue
            (Rogue, Mage) => 1.5,
            (Rogue, Warrior) | (Rogue, Tank) => 0.5,
            (Rogue, _) => 1.0,

            // Mage
            (Mage, Warrior) | (Mage, Tank) => 1.5,
            (Mage, Rogue) => 0.5,
            (Mage, _) => 1.0,

            // Tank
            (Tank, _) => 1.0,
        }
    }

    pub fn is_super_effective(attacking: CharacterClass, defending: CharacterClass) -> bool {
        Self::type_effectiveness(attacking, defending) > 1.0
    }
}
