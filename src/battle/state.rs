use crate::character::Character;
use crate::config::BattleConfig;
use crate::errors::{BattleError, BattleResult};
use crate::player::{PlayerAction, PlayerSide};
use crate::team::Team;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use schema::StatusKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleOutcome {
    Player1Win,
    Player2Win,
    Draw,
    /// The turn limit was reached with both teams still standing.
    Timeout,
}

impl BattleOutcome {
    pub fn winner(self) -> Option<PlayerSide> {
        match self {
            BattleOutcome::Player1Win => Some(PlayerSide::Player1),
            BattleOutcome::Player2Win => Some(PlayerSide::Player2),
            BattleOutcome::Draw | BattleOutcome::Timeout => None,
        }
    }

    pub fn win_for(side: PlayerSide) -> Self {
        match side {
            PlayerSide::Player1 => BattleOutcome::Player1Win,
            PlayerSide::Player2 => BattleOutcome::Player2Win,
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::Player1Win => write!(f, "Player 1 wins"),
            BattleOutcome::Player2Win => write!(f, "Player 2 wins"),
            BattleOutcome::Draw => write!(f, "draw"),
            BattleOutcome::Timeout => write!(f, "timeout"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattlePhase {
    NotStarted,
    InProgress,
    Finished(BattleOutcome),
}

impl fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattlePhase::NotStarted => write!(f, "not started"),
            BattlePhase::InProgress => write!(f, "in progress"),
            BattlePhase::Finished(outcome) => write!(f, "finished ({})", outcome),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionFailureReason {
    /// The actor was stunned and its action became a pass.
    Stunned,
    /// The actor fainted earlier in the turn.
    ActorFainted,
    /// The opposing active character is fainted, so there is nothing to hit.
    TargetFainted,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Turn Management
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded {
        turn_number: u32,
    },

    // Actions
    CharacterSwitched {
        side: PlayerSide,
        old_character: String,
        new_character: String,
        /// True when the switch replaced a fainted character at end of turn.
        forced: bool,
    },
    AttackUsed {
        side: PlayerSide,
        character: String,
    },
    AbilityUsed {
        side: PlayerSide,
        character: String,
        ability: String,
    },
    EffectNotTriggered {
        side: PlayerSide,
        ability: String,
        effect_index: usize,
    },
    ActionFailed {
        side: PlayerSide,
        character: String,
        reason: ActionFailureReason,
    },

    // Damage and Healing
    TypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        side: PlayerSide,
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    CharacterHealed {
        side: PlayerSide,
        target: String,
        amount: u16,
        new_hp: u16,
    },
    CharacterFainted {
        side: PlayerSide,
        character: String,
    },

    // Status Effects
    StatusApplied {
        side: PlayerSide,
        target: String,
        status: StatusKind,
        /// True when an active effect of the same kind was replaced.
        refreshed: bool,
    },
    StatusDamage {
        side: PlayerSide,
        target: String,
        status: StatusKind,
        damage: u16,
        remaining_hp: u16,
    },
    StatusExpired {
        side: PlayerSide,
        target: String,
        status: StatusKind,
    },

    // Battle End
    PlayerDefeated {
        side: PlayerSide,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        match self {
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::TurnEnded { .. } => None,

            BattleEvent::CharacterSwitched {
                side,
                old_character,
                new_character,
                forced,
            } => {
                let team_name = &battle_state.team(*side).name;
                if *forced {
                    Some(format!("{} sent in {}!", team_name, new_character))
                } else {
                    Some(format!(
                        "{} withdrew {} and sent in {}!",
                        team_name, old_character, new_character
                    ))
                }
            }
            BattleEvent::AttackUsed { character, .. } => Some(format!("{} attacks!", character)),
            BattleEvent::AbilityUsed {
                character, ability, ..
            } => Some(format!("{} used {}!", character, ability)),
            BattleEvent::EffectNotTriggered { .. } => None,
            BattleEvent::ActionFailed {
                character, reason, ..
            } => Some(Self::format_action_failure(character, reason)),

            BattleEvent::TypeEffectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 => Some("It's not very effective...".to_string()),
                _ => None,
            },
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::CharacterHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::CharacterFainted { character, .. } => {
                Some(format!("{} fainted!", character))
            }

            BattleEvent::StatusApplied {
                target,
                status,
                refreshed,
                ..
            } => {
                if *refreshed {
                    Some(format!("{}'s {} was renewed!", target, status))
                } else {
                    Some(format!("{} was afflicted with {}!", target, status))
                }
            }
            BattleEvent::StatusDamage {
                target,
                status,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                target, status, damage
            )),
            BattleEvent::StatusExpired { target, status, .. } => {
                Some(format!("{}'s {} wore off.", target, status))
            }

            BattleEvent::PlayerDefeated { side } => Some(format!(
                "{} has no characters left standing!",
                battle_state.team(*side).name
            )),
            BattleEvent::BattleEnded { outcome } => match outcome.winner() {
                Some(side) => Some(format!(
                    "{} ({}) has won the battle!",
                    battle_state.team(side).name,
                    side
                )),
                None if *outcome == BattleOutcome::Draw => {
                    Some("The battle ended in a draw!".to_string())
                }
                None => Some("The battle reached its turn limit.".to_string()),
            },
        }
    }

    fn format_action_failure(character: &str, reason: &ActionFailureReason) -> String {
        match reason {
            ActionFailureReason::Stunned => format!("{} is stunned and can't move!", character),
            ActionFailureReason::ActorFainted => format!("{} can't act after fainting.", character),
            ActionFailureReason::TargetFainted => {
                format!("{}'s move failed: there is no target!", character)
            }
        }
    }
}

/// Event bus for collecting the events of one turn.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Human-readable lines for every non-silent event.
    pub fn formatted(&self, battle_state: &BattleState) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(battle_state))
            .collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Source of every random decision in a battle.
///
/// Seeded battles draw from ChaCha8, so the same seed and the same actions
/// replay identically on any platform. Tests can script the exact outcomes
/// instead.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(ChaCha8Rng),
    Scripted { outcomes: Vec<u8>, index: usize },
}

impl BattleRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Scripted outcomes in 1..=100, consumed in order. Running out panics.
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Next outcome in 1..=100.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let outcome = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(1..=100u8),
            RngSource::Scripted { outcomes, index } => {
                let Some(&outcome) = outcomes.get(*index) else {
                    panic!(
                        "BattleRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                };
                *index += 1;
                outcome
            }
        };

        tracing::trace!(outcome, reason, "rng consumed");
        outcome
    }

    /// Rolls a percent chance. 0 and 100+ are decided without a draw.
    pub fn roll_chance(&mut self, chance: u8, reason: &str) -> bool {
        if chance >= 100 {
            return true;
        }
        if chance == 0 {
            return false;
        }
        self.next_outcome(reason) <= chance
    }

    /// Integer percent drawn uniformly from `min..=max`.
    ///
    /// Scripted sources map their outcome linearly onto the range, so an
    /// outcome of 50 is the midpoint.
    pub fn jitter_percent(&mut self, min: u16, max: u16) -> u16 {
        if min >= max {
            return min;
        }
        let seeded = match &mut self.source {
            RngSource::Seeded(rng) => Some(rng.random_range(min..=max)),
            RngSource::Scripted { .. } => None,
        };
        let percent = match seeded {
            Some(percent) => percent,
            None => {
                let outcome = self.next_outcome("damage jitter").min(100) as u32;
                min + (outcome * (max - min) as u32 / 100) as u16
            }
        };
        tracing::trace!(percent, "damage jitter");
        percent
    }
}

/// The actions and events of one resolved turn.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TurnRecord {
    pub turn_number: u32,
    /// Submitted actions, Player 1 first.
    pub actions: [PlayerAction; 2],
    pub events: Vec<BattleEvent>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleSummary {
    pub turns_played: u32,
    pub phase: BattlePhase,
    pub winner: Option<PlayerSide>,
    pub team_names: [String; 2],
    pub total_hp: [u32; 2],
    pub alive_counts: [usize; 2],
    pub events_logged: usize,
}

#[derive(Debug, Clone)]
pub struct BattleState {
    pub(crate) teams: [Team; 2],
    pub(crate) turn_number: u32,
    pub(crate) phase: BattlePhase,
    pub(crate) config: BattleConfig,
    pub(crate) rng: BattleRng,
    pub(crate) log: Vec<TurnRecord>,
}

impl BattleState {
    /// Creates a battle that has not started yet. Randomness is seeded from `seed`.
    pub fn new(team1: Team, team2: Team, config: BattleConfig, seed: u64) -> BattleResult<Self> {
        Self::with_rng(team1, team2, config, BattleRng::from_seed(seed))
    }

    pub fn with_rng(
        team1: Team,
        team2: Team,
        config: BattleConfig,
        rng: BattleRng,
    ) -> BattleResult<Self> {
        config.validate()?;
        team1.validate_for_battle()?;
        team2.validate_for_battle()?;

        Ok(Self {
            teams: [team1, team2],
            turn_number: 0,
            phase: BattlePhase::NotStarted,
            config,
            rng,
            log: Vec::new(),
        })
    }

    pub fn start_battle(&mut self) -> BattleResult<()> {
        if self.phase != BattlePhase::NotStarted {
            return Err(BattleError::InvalidState {
                operation: "start battle",
                phase: self.phase,
            });
        }

        self.phase = BattlePhase::InProgress;
        tracing::info!(
            team1 = %self.teams[0].name,
            team2 = %self.teams[1].name,
            lead1 = %self.teams[0].active_character().name,
            lead2 = %self.teams[1].active_character().name,
            "battle started"
        );
        Ok(())
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn team(&self, side: PlayerSide) -> &Team {
        &self.teams[side.to_index()]
    }

    pub(crate) fn team_mut(&mut self, side: PlayerSide) -> &mut Team {
        &mut self.teams[side.to_index()]
    }

    pub fn active_character(&self, side: PlayerSide) -> &Character {
        self.team(side).active_character()
    }

    pub fn log(&self) -> &[TurnRecord] {
        &self.log
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, BattlePhase::Finished(_))
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<PlayerSide> {
        self.outcome().and_then(BattleOutcome::winner)
    }

    pub fn summary(&self) -> BattleSummary {
        BattleSummary {
            turns_played: self.turn_number,
            phase: self.phase,
            winner: self.winner(),
            team_names: [self.teams[0].name.clone(), self.teams[1].name.clone()],
            total_hp: [self.teams[0].total_hp(), self.teams[1].total_hp()],
            alive_counts: [self.teams[0].alive_count(), self.teams[1].alive_count()],
            events_logged: self.log.iter().map(|record| record.events.len()).sum(),
        }
    }
}
