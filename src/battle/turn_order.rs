use crate::battle::state::BattleState;
use crate::config::TieBreak;
use crate::player::{PlayerAction, PlayerSide};
use std::cmp::Ordering;

/// An action scheduled for this turn. `None` is a forced pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAction {
    pub side: PlayerSide,
    pub action: Option<PlayerAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionPriority {
    pub action_priority: i8, // Switch: 6, everything else: 0
    pub ability_priority: i8, // Only relevant for abilities
    pub speed: u16,          // Base speed; status effects never change it
}

impl ActionPriority {
    fn cmp_desc(&self, other: &Self) -> Ordering {
        other
            .action_priority
            .cmp(&self.action_priority)
            .then_with(|| other.ability_priority.cmp(&self.ability_priority))
            .then_with(|| other.speed.cmp(&self.speed))
    }
}

pub fn calculate_action_priority(
    side: PlayerSide,
    action: Option<&PlayerAction>,
    battle_state: &BattleState,
) -> ActionPriority {
    let actor = battle_state.active_character(side);

    match action {
        Some(PlayerAction::Switch { .. }) => ActionPriority {
            action_priority: 6,
            ability_priority: 0,
            speed: 0,
        },
        Some(PlayerAction::UseAbility { ability_index }) => ActionPriority {
            action_priority: 0,
            ability_priority: actor
                .ability(*ability_index)
                .map_or(0, |ability| ability.data.priority),
            speed: actor.stats.speed,
        },
        Some(PlayerAction::Attack) | None => ActionPriority {
            action_priority: 0,
            ability_priority: 0,
            speed: actor.stats.speed,
        },
    }
}

/// Side that goes first when both keys are equal on `turn`.
pub fn tie_break_winner(tie_break: TieBreak, turn: u32) -> PlayerSide {
    match tie_break {
        TieBreak::PlayerOneFirst => PlayerSide::Player1,
        TieBreak::AlternateByTurn if turn % 2 == 1 => PlayerSide::Player1,
        TieBreak::AlternateByTurn => PlayerSide::Player2,
    }
}

/// Orders both sides' actions for `turn`.
///
/// Switches come first, then higher ability priority, then higher speed.
/// Exact ties follow the configured tie-break, except that two switches
/// always resolve Player 1 then Player 2.
pub fn determine_action_order(
    battle_state: &BattleState,
    actions: [ScheduledAction; 2],
    turn: u32,
) -> [ScheduledAction; 2] {
    let [first, second] = actions;
    let first_priority = calculate_action_priority(first.side, first.action.as_ref(), battle_state);
    let second_priority =
        calculate_action_priority(second.side, second.action.as_ref(), battle_state);

    let first_goes_first = match first_priority.cmp_desc(&second_priority) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => {
            let both_switch = first.action.is_some_and(|a| a.is_switch())
                && second.action.is_some_and(|a| a.is_switch());
            let leader = if both_switch {
                PlayerSide::Player1
            } else {
                tie_break_winner(battle_state.config().tie_break, turn)
            };
            first.side == leader
        }
    };

    if first_goes_first {
        [first, second]
    } else {
        [second, first]
    }
}
