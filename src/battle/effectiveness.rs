use schema::CharacterClass;
use serde::{Deserialize, Serialize};

/// Damage multiplier for `attacker` hitting `defender`: one of 0.5, 1.0 or 1.5.
pub fn effectiveness(attacker: CharacterClass, defender: CharacterClass) -> f64 {
    CharacterClass::type_effectiveness(attacker, defender)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effectiveness {
    SuperEffective,
    Neutral,
    NotVeryEffective,
}

impl Effectiveness {
    pub fn between(attacker: CharacterClass, defender: CharacterClass) -> Self {
        Self::from_multiplier(effectiveness(attacker, defender))
    }

    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else if multiplier < 1.0 {
            Effectiveness::NotVeryEffective
        } else {
            Effectiveness::Neutral
        }
    }
}

pub fn has_advantage(attacker: CharacterClass, defender: CharacterClass) -> bool {
    effectiveness(attacker, defender) > 1.0
}

pub fn has_disadvantage(attacker: CharacterClass, defender: CharacterClass) -> bool {
    effectiveness(attacker, defender) < 1.0
}

/// +1 for an advantage, -1 for a disadvantage, 0 otherwise.
pub fn advantage_score(attacker: CharacterClass, defender: CharacterClass) -> i8 {
    match Effectiveness::between(attacker, defender) {
        Effectiveness::SuperEffective => 1,
        Effectiveness::Neutral => 0,
        Effectiveness::NotVeryEffective => -1,
    }
}

/// Index of the candidate `attacker` hits hardest. Earlier candidates win ties.
pub fn best_matchup(attacker: CharacterClass, candidates: &[CharacterClass]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &defender) in candidates.iter().enumerate() {
        let multiplier = effectiveness(attacker, defender);
        if best.map_or(true, |(_, current)| multiplier > current) {
            best = Some((i, multiplier));
        }
    }
    best.map(|(i, _)| i)
}
