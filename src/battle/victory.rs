use crate::battle::state::{BattleEvent, BattleOutcome, BattlePhase, BattleState, EventBus};
use crate::player::PlayerSide;

/// Outcome implied by the teams alone, ignoring the turn limit.
pub fn check_victory(battle_state: &BattleState) -> Option<BattleOutcome> {
    let p1_defeated = battle_state.team(PlayerSide::Player1).is_defeated();
    let p2_defeated = battle_state.team(PlayerSide::Player2).is_defeated();

    match (p1_defeated, p2_defeated) {
        (true, true) => Some(BattleOutcome::Draw),
        (true, false) => Some(BattleOutcome::Player2Win),
        (false, true) => Some(BattleOutcome::Player1Win),
        (false, false) => None,
    }
}

/// True once the turn limit is reached with both teams standing.
pub fn is_timed_out(battle_state: &BattleState) -> bool {
    battle_state.turn_number() >= battle_state.config().max_turns
        && check_victory(battle_state).is_none()
}

/// Finishes the battle if a team was wiped out, emitting the end events.
pub(crate) fn check_win_conditions(battle_state: &mut BattleState, bus: &mut EventBus) {
    let Some(outcome) = check_victory(battle_state) else {
        return;
    };

    for side in PlayerSide::BOTH {
        if battle_state.team(side).is_defeated() {
            bus.push(BattleEvent::PlayerDefeated { side });
        }
    }
    finish(battle_state, outcome, bus);
}

/// Ends the battle as a timeout if the turn limit has been reached.
pub(crate) fn check_turn_limit(battle_state: &mut BattleState, bus: &mut EventBus) {
    if battle_state.phase() == BattlePhase::InProgress && is_timed_out(battle_state) {
        finish(battle_state, BattleOutcome::Timeout, bus);
    }
}

fn finish(battle_state: &mut BattleState, outcome: BattleOutcome, bus: &mut EventBus) {
    battle_state.phase = BattlePhase::Finished(outcome);
    bus.push(BattleEvent::BattleEnded { outcome });
    tracing::info!(
        %outcome,
        turns = battle_state.turn_number(),
        "battle finished"
    );
}
