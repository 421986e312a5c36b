use crate::battle::state::{BattlePhase, BattleState};
use crate::character::MAX_ABILITIES;
use crate::errors::ActionViolation;
use crate::player::{PlayerAction, PlayerSide};
use crate::team::{Team, TEAM_SIZE};

/// Checks an action against the submitting team without changing anything.
///
/// A stunned character may not do anything; the engine turns that
/// violation into a forced pass instead of rejecting the turn.
pub fn validate_action(team: &Team, action: &PlayerAction) -> Result<(), ActionViolation> {
    let actor = team.active_character();

    if actor.is_fainted() {
        return Err(ActionViolation::ActorFainted);
    }
    if actor.is_stunned() {
        return Err(ActionViolation::Stunned);
    }

    match action {
        PlayerAction::Attack => Ok(()),
        PlayerAction::UseAbility { ability_index } => {
            let ability = actor
                .ability(*ability_index)
                .ok_or(ActionViolation::InvalidAbilityIndex(*ability_index))?;

            if let Some(required) = ability.data.required_class {
                if required != actor.class {
                    return Err(ActionViolation::ClassMismatch {
                        ability: ability.data.name.clone(),
                        required,
                        actual: actor.class,
                    });
                }
            }
            if !ability.is_ready() {
                return Err(ActionViolation::OnCooldown {
                    ability: ability.data.name.clone(),
                    remaining: ability.cooldown_remaining,
                });
            }
            Ok(())
        }
        PlayerAction::Switch { team_index } => team.can_switch_to(*team_index),
    }
}

/// Every action `side` could legally submit right now.
///
/// Empty when the battle is not in progress or the active character is
/// stunned (its next action is a forced pass).
pub fn get_valid_actions(state: &BattleState, side: PlayerSide) -> Vec<PlayerAction> {
    if state.phase() != BattlePhase::InProgress {
        return Vec::new();
    }

    let team = state.team(side);
    let candidates = std::iter::once(PlayerAction::Attack)
        .chain((0..MAX_ABILITIES).map(|i| PlayerAction::UseAbility { ability_index: i }))
        .chain((0..TEAM_SIZE).map(|i| PlayerAction::Switch { team_index: i }));

    candidates
        .filter(|action| validate_action(team, action).is_ok())
        .collect()
}
