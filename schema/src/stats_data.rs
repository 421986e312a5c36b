use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub max_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub fn new(max_hp: u16, attack: u16, defense: u16, speed: u16) -> Self {
        Self {
            max_hp,
            attack,
            defense,
            speed,
        }
    }

    /// Name of the first stat that is zero, if any.
    pub fn first_zero_stat(&self) -> Option<&'static str> {
        if self.max_hp == 0 {
            Some("max_hp")
        } else if self.attack == 0 {
            Some("attack")
        } else if self.defense == 0 {
            Some("defense")
        } else if self.speed == 0 {
            Some("speed")
        } else {
            None
        }
    }
}

impl fmt::Display for BaseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP={} ATK={} DEF={} SPD={}",
            self.max_hp, self.attack, self.defense, self.speed
        )
    }
}
