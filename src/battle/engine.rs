use crate::battle::calculators::{calculate_damage, DamageOutcome};
use crate::battle::conditions::{process_end_of_turn, StatusEffect};
use crate::battle::observation::ObservableState;
use crate::battle::state::{
    ActionFailureReason, BattleEvent, BattleOutcome, BattlePhase, BattleState, EventBus,
    TurnRecord,
};
use crate::battle::turn_order::{determine_action_order, ScheduledAction};
use crate::battle::validation::validate_action;
use crate::battle::victory::{check_turn_limit, check_win_conditions};
use crate::config::BattleConfig;
use crate::errors::{ActionViolation, BattleError, BattleResult};
use crate::player::{PlayerAction, PlayerSide};
use crate::team::Team;
use schema::{AbilityData, EffectKind, EffectTarget};
use serde::{Deserialize, Serialize};

/// What happened in one call to [`execute_turn`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub turn: u32,
    pub events: Vec<BattleEvent>,
    pub is_terminal: bool,
    pub outcome: Option<BattleOutcome>,
    pub winner: Option<PlayerSide>,
}

/// Creates and starts a battle with the default configuration.
pub fn start_battle(team1: Team, team2: Team, seed: u64) -> BattleResult<BattleState> {
    start_battle_with_config(team1, team2, BattleConfig::default(), seed)
}

pub fn start_battle_with_config(
    team1: Team,
    team2: Team,
    config: BattleConfig,
    seed: u64,
) -> BattleResult<BattleState> {
    let mut battle_state = BattleState::new(team1, team2, config, seed)?;
    battle_state.start_battle()?;
    Ok(battle_state)
}

pub fn get_observable_state(battle_state: &BattleState) -> ObservableState {
    ObservableState::capture(battle_state)
}

/// Resolves exactly one turn.
///
/// Both actions are validated before anything changes: a stunned side's
/// action becomes a forced pass, any other violation rejects the whole
/// turn and leaves the state untouched. The turn then runs switches,
/// attacks and abilities in order, end-of-turn status ticks and cooldowns,
/// replacement of fainted actives, and finally the victory and turn-limit
/// checks.
pub fn execute_turn(
    battle_state: &mut BattleState,
    player1_action: PlayerAction,
    player2_action: PlayerAction,
) -> BattleResult<TurnResult> {
    if battle_state.phase() != BattlePhase::InProgress {
        return Err(BattleError::InvalidState {
            operation: "execute turn",
            phase: battle_state.phase(),
        });
    }

    let scheduled = [
        schedule_action(battle_state, PlayerSide::Player1, player1_action)?,
        schedule_action(battle_state, PlayerSide::Player2, player2_action)?,
    ];

    let turn = battle_state.turn_number + 1;
    let _span = tracing::debug_span!("turn", turn).entered();
    let mut bus = EventBus::new();
    bus.push(BattleEvent::TurnStarted { turn_number: turn });

    // 1. Actions, in priority order
    let order = determine_action_order(battle_state, scheduled, turn);
    for action in order {
        execute_scheduled_action(action, battle_state, &mut bus)?;
    }

    // 2. End-of-turn effects
    execute_end_turn_phase(battle_state, &mut bus);

    // 3. Replace fainted actives
    resolve_forced_switches(battle_state, &mut bus);

    // 4. Victory, then the turn limit
    check_win_conditions(battle_state, &mut bus);
    battle_state.turn_number = turn;
    check_turn_limit(battle_state, &mut bus);

    bus.push(BattleEvent::TurnEnded { turn_number: turn });

    let events = bus.into_events();
    battle_state.log.push(TurnRecord {
        turn_number: turn,
        actions: [player1_action, player2_action],
        events: events.clone(),
    });

    Ok(TurnResult {
        turn,
        events,
        is_terminal: battle_state.is_finished(),
        outcome: battle_state.outcome(),
        winner: battle_state.winner(),
    })
}

fn schedule_action(
    battle_state: &BattleState,
    side: PlayerSide,
    action: PlayerAction,
) -> BattleResult<ScheduledAction> {
    match validate_action(battle_state.team(side), &action) {
        Ok(()) => Ok(ScheduledAction {
            side,
            action: Some(action),
        }),
        Err(ActionViolation::Stunned) => {
            tracing::debug!(%side, %action, "stunned, action replaced by a pass");
            Ok(ScheduledAction { side, action: None })
        }
        Err(violation) => {
            tracing::warn!(%side, %action, %violation, "action rejected");
            Err(BattleError::IllegalAction { side, violation })
        }
    }
}

fn execute_scheduled_action(
    scheduled: ScheduledAction,
    battle_state: &mut BattleState,
    bus: &mut EventBus,
) -> BattleResult<()> {
    let side = scheduled.side;
    let actor = battle_state.active_character(side);
    let actor_name = actor.name.clone();

    if actor.is_fainted() {
        bus.push(BattleEvent::ActionFailed {
            side,
            character: actor_name,
            reason: ActionFailureReason::ActorFainted,
        });
        return Ok(());
    }

    tracing::debug!(%side, actor = %actor_name, action = ?scheduled.action, "executing action");

    match scheduled.action {
        None => {
            bus.push(BattleEvent::ActionFailed {
                side,
                character: actor_name,
                reason: ActionFailureReason::Stunned,
            });
            Ok(())
        }
        Some(PlayerAction::Switch { team_index }) => {
            execute_switch(side, team_index, battle_state, bus)
        }
        Some(PlayerAction::Attack) => {
            execute_attack(side, battle_state, bus);
            Ok(())
        }
        Some(PlayerAction::UseAbility { ability_index }) => {
            execute_ability(side, ability_index, battle_state, bus)
        }
    }
}

fn execute_switch(
    side: PlayerSide,
    team_index: usize,
    battle_state: &mut BattleState,
    bus: &mut EventBus,
) -> BattleResult<()> {
    let team = battle_state.team_mut(side);
    let old_character = team.active_character().name.clone();

    team.switch_to(team_index)
        .map_err(|violation| BattleError::IllegalAction { side, violation })?;

    bus.push(BattleEvent::CharacterSwitched {
        side,
        old_character,
        new_character: team.active_character().name.clone(),
        forced: false,
    });
    Ok(())
}

fn execute_attack(side: PlayerSide, battle_state: &mut BattleState, bus: &mut EventBus) {
    let attacker_name = battle_state.active_character(side).name.clone();

    if battle_state.active_character(side.opponent()).is_fainted() {
        bus.push(BattleEvent::ActionFailed {
            side,
            character: attacker_name,
            reason: ActionFailureReason::TargetFainted,
        });
        return;
    }

    bus.push(BattleEvent::AttackUsed {
        side,
        character: attacker_name,
    });
    let outcome = roll_damage(battle_state, side, side.opponent(), None);
    deal_damage(battle_state, side, side.opponent(), outcome, bus);
}

fn execute_ability(
    side: PlayerSide,
    ability_index: usize,
    battle_state: &mut BattleState,
    bus: &mut EventBus,
) -> BattleResult<()> {
    let actor = battle_state.active_character(side);
    let actor_name = actor.name.clone();
    let ability = actor
        .ability(ability_index)
        .map(|inst| inst.data.clone())
        .ok_or(BattleError::IllegalAction {
            side,
            violation: ActionViolation::InvalidAbilityIndex(ability_index),
        })?;

    let hits_opponent = ability
        .effects
        .iter()
        .any(|effect| effect.target == EffectTarget::Opponent);
    if hits_opponent && battle_state.active_character(side.opponent()).is_fainted() {
        bus.push(BattleEvent::ActionFailed {
            side,
            character: actor_name,
            reason: ActionFailureReason::TargetFainted,
        });
        return Ok(());
    }

    bus.push(BattleEvent::AbilityUsed {
        side,
        character: actor_name,
        ability: ability.name.clone(),
    });
    if let Some(inst) = battle_state
        .team_mut(side)
        .active_character_mut()
        .ability_mut(ability_index)
    {
        inst.put_on_cooldown();
    }

    let triggered = roll_effect_chances(battle_state, side, &ability, bus);

    // Damage effects landing on the same target are added up into one hit.
    for target in [EffectTarget::Opponent, EffectTarget::User] {
        let power = ability
            .effects
            .iter()
            .zip(&triggered)
            .filter(|(effect, hit)| **hit && effect.target == target)
            .filter_map(|(effect, _)| match effect.kind {
                EffectKind::Damage { power } => Some(power),
                _ => None,
            })
            .fold(0u16, |total, power| total.saturating_add(power));
        if power == 0 {
            continue;
        }

        let target_side = resolve_target(side, target);
        if battle_state.active_character(target_side).is_fainted() {
            continue;
        }
        let outcome = roll_damage(battle_state, side, target_side, Some(power));
        deal_damage(battle_state, side, target_side, outcome, bus);
    }

    for (effect, _) in ability
        .effects
        .iter()
        .zip(&triggered)
        .filter(|(_, hit)| **hit)
    {
        let target_side = resolve_target(side, effect.target);
        match effect.kind {
            EffectKind::Damage { .. } => {}
            EffectKind::Heal { amount } => {
                let target = battle_state.team_mut(target_side).active_character_mut();
                let restored = target.heal(amount);
                if restored > 0 {
                    bus.push(BattleEvent::CharacterHealed {
                        side: target_side,
                        target: target.name.clone(),
                        amount: restored,
                        new_hp: target.current_hp(),
                    });
                }
            }
            EffectKind::ApplyStatus { .. } | EffectKind::Buff | EffectKind::Debuff => {
                let Some(kind) = effect.kind.status() else {
                    continue;
                };
                let status = StatusEffect::from_settings(
                    kind,
                    &battle_state.config.statuses,
                    effect.duration,
                    effect.magnitude,
                );
                let target = battle_state.team_mut(target_side).active_character_mut();
                if target.is_fainted() {
                    continue;
                }
                let refreshed = target.apply_status(status);
                bus.push(BattleEvent::StatusApplied {
                    side: target_side,
                    target: target.name.clone(),
                    status: kind,
                    refreshed,
                });
            }
        }
    }
    Ok(())
}

/// Rolls every effect's trigger chance in order.
fn roll_effect_chances(
    battle_state: &mut BattleState,
    side: PlayerSide,
    ability: &AbilityData,
    bus: &mut EventBus,
) -> Vec<bool> {
    ability
        .effects
        .iter()
        .enumerate()
        .map(|(effect_index, effect)| {
            let hit = battle_state
                .rng
                .roll_chance(effect.chance, "ability effect chance");
            if !hit {
                bus.push(BattleEvent::EffectNotTriggered {
                    side,
                    ability: ability.name.clone(),
                    effect_index,
                });
            }
            hit
        })
        .collect()
}

fn resolve_target(side: PlayerSide, target: EffectTarget) -> PlayerSide {
    match target {
        EffectTarget::Opponent => side.opponent(),
        EffectTarget::User => side,
    }
}

fn roll_damage(
    battle_state: &mut BattleState,
    attacker_side: PlayerSide,
    defender_side: PlayerSide,
    ability_power: Option<u16>,
) -> DamageOutcome {
    let attacker = battle_state.teams[attacker_side.to_index()].active_character();
    let defender = battle_state.teams[defender_side.to_index()].active_character();
    calculate_damage(
        attacker,
        defender,
        ability_power,
        &battle_state.config,
        &mut battle_state.rng,
    )
}

fn deal_damage(
    battle_state: &mut BattleState,
    attacker_side: PlayerSide,
    defender_side: PlayerSide,
    outcome: DamageOutcome,
    bus: &mut EventBus,
) {
    if outcome.type_multiplier != 1.0 {
        bus.push(BattleEvent::TypeEffectiveness {
            multiplier: outcome.type_multiplier,
        });
    }

    let defender = battle_state.team_mut(defender_side).active_character_mut();
    let dealt = defender.take_damage(outcome.damage);
    let defender_name = defender.name.clone();
    let fainted = defender.is_fainted();
    bus.push(BattleEvent::DamageDealt {
        side: defender_side,
        target: defender_name.clone(),
        damage: dealt,
        remaining_hp: defender.current_hp(),
    });

    battle_state
        .team_mut(attacker_side)
        .active_character_mut()
        .damage_dealt += dealt as u32;

    if fainted {
        tracing::debug!(side = %defender_side, character = %defender_name, "character fainted");
        bus.push(BattleEvent::CharacterFainted {
            side: defender_side,
            character: defender_name,
        });
    }
}

/// Status ticks for every living character on both teams, then cooldowns.
fn execute_end_turn_phase(battle_state: &mut BattleState, bus: &mut EventBus) {
    for side in PlayerSide::BOTH {
        for character in battle_state.teams[side.to_index()].characters_mut() {
            process_end_of_turn(character, side, &battle_state.config.statuses, bus);
        }
    }

    for team in battle_state.teams.iter_mut() {
        for character in team.characters_mut() {
            character.reduce_cooldowns();
        }
    }
}

fn resolve_forced_switches(battle_state: &mut BattleState, bus: &mut EventBus) {
    for side in PlayerSide::BOTH {
        let team = battle_state.team_mut(side);
        if let Some((old_index, new_index)) = team.auto_switch_on_faint() {
            let old_character = team.characters()[old_index].name.clone();
            let new_character = team.characters()[new_index].name.clone();
            tracing::debug!(%side, from = %old_character, to = %new_character, "forced switch");
            bus.push(BattleEvent::CharacterSwitched {
                side,
                old_character,
                new_character,
                forced: true,
            });
        }
    }
}
