#[cfg(test)]
mod tests {
    use crate::battle::engine::execute_turn;
    use crate::battle::state::{ActionFailureReason, BattleEvent, BattleOutcome, BattlePhase};
    use crate::battle::tests::common::{
        assert_ok, create_started_battle, create_test_battle, init_tracing, TestCharacterBuilder,
        TestTeamBuilder,
    };
    use crate::errors::{ActionViolation, BattleError};
    use crate::player::{PlayerAction, PlayerSide};
    use pretty_assertions::assert_eq;
    use schema::CharacterClass;

    fn default_battle() -> crate::battle::state::BattleState {
        create_started_battle(
            TestTeamBuilder::new("Red").build(),
            TestTeamBuilder::new("Blue").build(),
        )
    }

    #[test]
    fn test_basic_attack_exchange() {
        init_tracing();
        // Arrange: two identical Warriors, 50 attack against 20 defense
        let mut battle_state = default_battle();

        // Act
        let result = assert_ok(execute_turn(
            &mut battle_state,
            PlayerAction::Attack,
            PlayerAction::Attack,
        ));

        // Assert: speed tie on an odd turn, so Player 1 swings first
        assert_eq!(
            result.events,
            vec![
                BattleEvent::TurnStarted { turn_number: 1 },
                BattleEvent::AttackUsed {
                    side: PlayerSide::Player1,
                    character: "Knight".to_string(),
                },
                BattleEvent::DamageDealt {
                    side: PlayerSide::Player2,
                    target: "Knight".to_string(),
                    damage: 30,
                    remaining_hp: 70,
                },
                BattleEvent::AttackUsed {
                    side: PlayerSide::Player2,
                    character: "Knight".to_string(),
                },
                BattleEvent::DamageDealt {
                    side: PlayerSide::Player1,
                    target: "Knight".to_string(),
                    damage: 30,
                    remaining_hp: 70,
                },
                BattleEvent::TurnEnded { turn_number: 1 },
            ]
        );
        assert_eq!(result.turn, 1);
        assert!(!result.is_terminal);
        assert_eq!(result.outcome, None);
        assert_eq!(battle_state.turn_number(), 1);
        assert_eq!(battle_state.log().len(), 1);
        assert_eq!(
            battle_state.log()[0].actions,
            [PlayerAction::Attack, PlayerAction::Attack]
        );

        let knight = battle_state.active_character(PlayerSide::Player1);
        assert_eq!(knight.damage_dealt, 30);
        assert_eq!(knight.damage_received, 30);
    }

    #[test]
    fn test_speed_ties_alternate_between_turns() {
        let mut battle_state = default_battle();
        assert_ok(execute_turn(
            &mut battle_state,
            PlayerAction::Attack,
            PlayerAction::Attack,
        ));

        let result = assert_ok(execute_turn(
            &mut battle_state,
            PlayerAction::Attack,
            PlayerAction::Attack,
        ));

        assert_eq!(
            result.events[1],
            BattleEvent::AttackUsed {
                side: PlayerSide::Player2,
                character: "Knight".to_string(),
            }
        );
    }

    #[test]
    fn test_class_matchup_scales_damage() {
        // Arrange: Mage leads against a Warrior
        let mage = TestCharacterBuilder::new("Merlin", CharacterClass::Mage).build();
        let mut battle_state = create_started_battle(
            TestTeamBuilder::new("Red").with_lead(mage).build(),
            TestTeamBuilder::new("Blue").build(),
        );

        // Act
        let result = assert_ok(execute_turn(
            &mut battle_state,
            PlayerAction::Attack,
            PlayerAction::Attack,
        ));

        // Assert: 50 * 1.5 - 20 = 55 one way, 50 * 0.5 - 20 = 5 the other
        assert_eq!(
            &result.events[2..4],
            &[
                BattleEvent::TypeEffectiveness { multiplier: 1.5 },
                BattleEvent::DamageDealt {
                    side: PlayerSide::Player2,
                    target: "Knight".to_string(),
                    damage: 55,
                    remaining_hp: 45,
                },
            ]
        );
        assert_eq!(
            &result.events[5..7],
            &[
                BattleEvent::TypeEffectiveness { multiplier: 0.5 },
                BattleEvent::DamageDealt {
                    side: PlayerSide::Player1,
                    target: "Merlin".to_string(),
                    damage: 5,
                    remaining_hp: 95,
                },
            ]
        );
    }

    #[test]
    fn test_illegal_action_leaves_state_untouched() {
        // Arrange
        let mut battle_state = default_battle();
        let teams_before = [
            battle_state.team(PlayerSide::Player1).clone(),
            battle_state.team(PlayerSide::Player2).clone(),
        ];

        // Act: the default Knight has no abilities
        let result = execute_turn(
            &mut battle_state,
            PlayerAction::Attack,
            PlayerAction::UseAbility { ability_index: 0 },
        );

        // Assert
        assert_eq!(
            result,
            Err(BattleError::IllegalAction {
                side: PlayerSide::Player2,
                violation: ActionViolation::InvalidAbilityIndex(0),
            })
        );
        assert_eq!(battle_state.team(PlayerSide::Player1), &teams_before[0]);
        assert_eq!(battle_state.team(PlayerSide::Player2), &teams_before[1]);
        assert_eq!(battle_state.turn_number(), 0);
        assert!(battle_state.log().is_empty());

        // The rejected turn consumed no randomness either
        let retry = assert_ok(execute_turn(
            &mut battle_state,
            PlayerAction::Attack,
            PlayerAction::Attack,
        ));
        let mut fresh = default_battle();
        let expected = assert_ok(execute_turn(
            &mut fresh,
            PlayerAction::Attack,
            PlayerAction::Attack,
        ));
        assert_eq!(retry, expected);
    }

    #[test]
    fn test_player_one_violation_reported_first() {
        let mut battle_state = default_battle();
        let result = execute_turn(
            &mut battle_state,
            PlayerAction::Switch { team_index: 0 },
            PlayerAction::UseAbility { ability_index: 2 },
        );
        assert_eq!(
            result,
            Err(BattleError::IllegalAction {
                side: PlayerSide::Player1,
                violation: ActionViolation::SwitchToSelf(0),
            })
        );
    }

    #[test]
    fn test_turn_before_start_is_invalid_state() {
        let mut battle_state = create_test_battle(
            TestTeamBuilder::new("Red").build(),
            TestTeamBuilder::new("Blue").build(),
        );

        let result = execute_turn(&mut battle_state, PlayerAction::Attack, PlayerAction::Attack);

        assert_eq!(
            result,
            Err(BattleError::InvalidState {
                operation: "execute turn",
                phase: BattlePhase::NotStarted,
            })
        );
    }

    #[test]
    fn test_double_start_is_invalid_state() {
        let mut battle_state = default_battle();
        assert_eq!(
            battle_state.start_battle(),
            Err(BattleError::InvalidState {
                operation: "start battle",
                phase: BattlePhase::InProgress,
            })
        );
    }

    #[test]
    fn test_finishing_blow_ends_battle() {
        init_tracing();
        // Arrange: Blue is down to a single weakened Knight
        let mut battle_state = default_battle();
        {
            let blue = battle_state.team_mut(PlayerSide::Player2);
            blue.characters_mut()[0].set_hp(10);
            blue.characters_mut()[1].set_hp(0);
            blue.characters_mut()[2].set_hp(0);
        }

        // Act
        let result = assert_ok(execute_turn(
            &mut battle_state,
            PlayerAction::Attack,
            PlayerAction::Attack,
        ));

        // Assert
        assert_eq!(
            result.events,
            vec![
                BattleEvent::TurnStarted { turn_number: 1 },
                BattleEvent::AttackUsed {
                    side: PlayerSide::Player1,
                    character: "Knight".to_string(),
                },
                BattleEvent::DamageDealt {
                    side: PlayerSide::Player2,
                    target: "Knight".to_string(),
                    damage: 10,
                    remaining_hp: 0,
                },
                BattleEvent::CharacterFainted {
                    side: PlayerSide::Player2,
                    character: "Knight".to_string(),
                },
                BattleEvent::ActionFailed {
                    side: PlayerSide::Player2,
                    character: "Knight".to_string(),
                    reason: ActionFailureReason::ActorFainted,
                },
                BattleEvent::PlayerDefeated {
                    side: PlayerSide::Player2,
                },
                BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Player1Win,
                },
                BattleEvent::TurnEnded { turn_number: 1 },
            ]
        );
        assert!(result.is_terminal);
        assert_eq!(result.winner, Some(PlayerSide::Player1));
        assert_eq!(
            battle_state.phase(),
            BattlePhase::Finished(BattleOutcome::Player1Win)
        );

        // No further turns once finished
        assert_eq!(
            execute_turn(&mut battle_state, PlayerAction::Attack, PlayerAction::Attack),
            Err(BattleError::InvalidState {
                operation: "execute turn",
                phase: BattlePhase::Finished(BattleOutcome::Player1Win),
            })
        );
        assert_eq!(battle_state.turn_number(), 1);
    }

    #[test]
    fn test_formatted_log_reads_like_a_story() {
        let mut battle_state = default_battle();
        let result = assert_ok(execute_turn(
            &mut battle_state,
            PlayerAction::Attack,
            PlayerAction::Switch { team_index: 2 },
        ));

        let lines: Vec<String> = result
            .events
            .iter()
            .filter_map(|event| event.format(&battle_state))
            .collect();

        assert_eq!(lines[0], "=== Turn 1 ===");
        assert_eq!(lines[1], "Blue withdrew Knight and sent in Scout!");
        assert!(lines.iter().all(|line| !line.is_empty()));
    }
}
