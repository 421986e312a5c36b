use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumCount, EnumIter};

/// Kinds of status effect a character can carry. At most one effect of each
/// kind is active on a character at a time.
///
/// The declaration order is also the order in which effects tick at the end
/// of a turn.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Copy, EnumIter, EnumCount)]
pub enum StatusKind {
    Burn,
    Poison,
    Stun,
    Shield,
    Buff,
    Debuff,
}

impl StatusKind {
    /// Slot of this kind in a fixed-size table of `StatusKind::COUNT` entries.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether this kind deals damage when it ticks.
    pub fn deals_damage(self) -> bool {
        matches!(self, StatusKind::Burn | StatusKind::Poison)
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            StatusKind::Burn => "burn",
            StatusKind::Poison => "poison",
            StatusKind::Stun => "stun",
            StatusKind::Shield => "shield",
            StatusKind::Buff => "attack boost",
            StatusKind::Debuff => "attack drop",
        };

        write!(f, "{}", display_name)
    }
}
