//! Жизненный цикл стола: старт раздачи, кнопка дилера, посадка и уход
//! посреди раздачи, статусы после распределения банка.

mod common;

use common::*;

use holdem_engine::domain::{BettingRound, Chips, TableStatus};
use holdem_engine::engine::betting::{
    advance_betting_round, can_player_act, check_round_complete, get_player_to_act, player_action,
};
use holdem_engine::engine::{lifecycle, EngineError, PlayerAction, TableEvent};

#[test]
fn start_game_requires_two_funded_players() {
    let registry = registry();
    let table_id = registry.create_table(1, small_config()).unwrap();
    registry.join_table(table_id, 10, Chips(100)).unwrap();
    assert_eq!(registry.start_game(table_id), Err(EngineError::NotEnoughPlayers));
}

#[test]
fn start_game_sets_up_a_fresh_hand() {
    let registry = registry();
    let table_id = heads_up_table(&registry);
    registry.start_game(table_id).unwrap();

    let table = registry.table_snapshot(table_id).unwrap();
    assert_eq!(table.status, TableStatus::InProgress);
    assert_eq!(table.current_round, BettingRound::PreFlop);
    assert_eq!(table.game_number, 1);
    assert_eq!(table.dealer_position, Some(0));
    assert!(table.blinds_posted);
    assert!(table.hole_cards_dealt);
    assert_eq!(table.pot_total, Chips(3));
    assert_eq!(table.deck.next_card_index, 4);

    assert_eq!(
        registry.start_game(table_id),
        Err(EngineError::HandAlreadyInProgress)
    );
}

#[test]
fn dealer_button_rotates_between_hands() {
    let registry = registry();
    let table_id = heads_up_table(&registry);

    registry.start_game(table_id).unwrap();
    assert_eq!(registry.table_snapshot(table_id).unwrap().dealer_position, Some(0));
    registry.player_action(table_id, 10, PlayerAction::Fold).unwrap();
    registry.distribute_pot(table_id).unwrap();

    registry.start_game(table_id).unwrap();
    let table = registry.table_snapshot(table_id).unwrap();
    assert_eq!(table.dealer_position, Some(1));
    assert_eq!(table.game_number, 2);
    // Хедз-ап: дилер (игрок 11) на малом блайнде и ходит первым.
    assert_eq!(registry.get_player_to_act(table_id).unwrap(), Some(11));
}

#[test]
fn deck_is_derived_from_engine_seed_table_and_hand() {
    let a = registry();
    let b = registry();
    let ta = heads_up_table(&a);
    let tb = heads_up_table(&b);
    a.start_game(ta).unwrap();
    b.start_game(tb).unwrap();

    let deck_a = a.table_snapshot(ta).unwrap().deck;
    let deck_b = b.table_snapshot(tb).unwrap().deck;
    assert_eq!(deck_a.card_ids(), deck_b.card_ids());
    assert_eq!(deck_a.seed, deck_b.seed);

    // Следующая раздача: другой seed.
    a.player_action(ta, 10, PlayerAction::Fold).unwrap();
    a.distribute_pot(ta).unwrap();
    a.start_game(ta).unwrap();
    assert_ne!(a.table_snapshot(ta).unwrap().deck.seed, deck_a.seed);
}

#[test]
fn player_joining_mid_hand_waits_for_next_hand() {
    let registry = registry();
    let table_id = heads_up_table(&registry);
    registry.start_game(table_id).unwrap();

    assert_eq!(registry.join_table(table_id, 12, Chips(100)).unwrap(), 2);
    let table = registry.table_snapshot(table_id).unwrap();
    let late = table.player(2).unwrap();
    assert!(!late.is_active);
    assert!(late.hole_cards.is_none());
    assert_eq!(registry.get_active_players(table_id).unwrap(), vec![10, 11]);

    registry.player_action(table_id, 10, PlayerAction::Fold).unwrap();
    registry.distribute_pot(table_id).unwrap();
    registry.start_game(table_id).unwrap();

    let table = registry.table_snapshot(table_id).unwrap();
    assert!(table.player(2).unwrap().is_active);
    assert!(table.player(2).unwrap().hole_cards.is_some());
}

/// Игрок уже сходил и уходит посреди раздачи: его фишки остаются в банке,
/// место сразу свободно.
#[test]
fn leaving_after_acting_keeps_chips_in_pot() {
    let mut table = three_way_started();
    assert_eq!(table.current_player_position, Some(0));

    player_action(&mut table, 20, PlayerAction::Call).unwrap();
    assert_eq!(table.pot_total, Chips(25));

    let outcome = lifecycle::leave_table(&mut table, 20).unwrap();
    assert_eq!(outcome.refunded, Chips(190));
    assert_eq!(outcome.forfeited, Chips(10));
    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e, TableEvent::PlayerLeaveTable { player: 20, refunded } if *refunded == Chips(190))));

    assert_eq!(table.pot_total, Chips(25));
    assert_eq!(table.pot_total, table.contributed_total());
    assert!(table.player(0).is_none());
    assert_eq!(table.status, TableStatus::InProgress);
    // Ход был у SB: он и остаётся.
    assert_eq!(table.current_player_position, Some(1));

    lifecycle::join_table(&mut table, 23, Chips(100)).unwrap();
    assert_eq!(table.seat_of(23), Some(0));
    assert!(!table.player(0).unwrap().is_active);
    assert_eq!(table.pot_total, Chips(25));
}

#[test]
fn leaving_on_turn_passes_the_turn() {
    let mut table = three_way_started();
    let outcome = lifecycle::leave_table(&mut table, 20).unwrap();
    assert_eq!(outcome.refunded, Chips(200));
    assert_eq!(outcome.forfeited, Chips::ZERO);
    assert_eq!(table.current_player_position, Some(1));
}

#[test]
fn leaving_heads_up_ends_hand_uncontested() {
    let registry = registry();
    let table_id = heads_up_table(&registry);
    registry.start_game(table_id).unwrap();

    // Игрок 11 ушёл, не дождавшись хода: его большой блайнд становится мёртвыми деньгами.
    assert_eq!(registry.leave_table(table_id, 11).unwrap(), (Chips(98), Chips(2)));

    let table = registry.table_snapshot(table_id).unwrap();
    assert_eq!(table.status, TableStatus::Showdown);
    assert_eq!(table.current_player_position, None);
    assert_eq!(table.pot_total, Chips(3));

    let payouts = registry.distribute_pot(table_id).unwrap();
    assert_eq!(payouts.len(), 1);
    assert_eq!((payouts[0].player_id, payouts[0].amount), (10, Chips(3)));

    let table = registry.table_snapshot(table_id).unwrap();
    assert_eq!(table.player(0).unwrap().stack, Chips(102));
    // Один игрок: ждём соперника.
    assert_eq!(table.status, TableStatus::Waiting);
    assert!(!registry.is_table_ready_to_start(table_id).unwrap());
}

/// Соперник сфолдил, победитель уходит до выплаты: банк уходит с ним,
/// стол не застревает на шоудауне.
#[test]
fn winner_leaving_before_payout_takes_the_pot() {
    let mut table = table_with_players(small_config(), &[(10, 100), (11, 100)]);
    lifecycle::start_game(&mut table, &engine_config()).unwrap();
    player_action(&mut table, 10, PlayerAction::Fold).unwrap();
    assert_eq!(table.status, TableStatus::Showdown);
    assert_eq!(table.pot_total, Chips(3));

    let outcome = lifecycle::leave_table(&mut table, 11).unwrap();
    assert_eq!(outcome.refunded, Chips(101));
    assert_eq!(outcome.forfeited, Chips::ZERO);
    assert!(outcome.events.iter().any(|e| matches!(
        e,
        TableEvent::PotDistributed { winner: 11, amount, hand_rank: 0 } if *amount == Chips(3)
    )));
    assert!(!outcome
        .events
        .iter()
        .any(|e| matches!(e, TableEvent::GameReadyToStart { .. })));

    assert_eq!(table.status, TableStatus::Waiting);
    assert_eq!(table.pot_total, Chips::ZERO);
    assert!(table.dead_money.is_empty());
    assert_eq!(table.player(0).unwrap().stack, Chips(99));
    assert_eq!(outcome.refunded.0 + chips_in_play(&table), 200);
}

#[test]
fn table_reopens_after_winner_leaves_at_showdown() {
    let registry = registry();
    let table_id = heads_up_table(&registry);
    registry.start_game(table_id).unwrap();
    registry.player_action(table_id, 10, PlayerAction::Fold).unwrap();

    assert_eq!(registry.leave_table(table_id, 11).unwrap(), (Chips(101), Chips::ZERO));
    assert_eq!(
        registry.distribute_pot(table_id),
        Err(EngineError::ShowdownNotReached)
    );

    registry.join_table(table_id, 12, Chips(100)).unwrap();
    assert!(registry.is_table_ready_to_start(table_id).unwrap());
    registry.start_game(table_id).unwrap();

    let table = registry.table_snapshot(table_id).unwrap();
    assert_eq!(table.status, TableStatus::InProgress);
    assert_eq!(chips_in_play(&table), 199);
}

/// Уход закрыл торговлю на улице: второй претендент all-in, ход ни за кем не висит.
#[test]
fn leave_that_closes_betting_clears_the_turn() {
    let mut table = table_with_players(standard_config(), &[(20, 60), (21, 200), (22, 200)]);
    lifecycle::start_game(&mut table, &engine_config()).unwrap();
    player_action(&mut table, 20, PlayerAction::AllIn).unwrap();
    player_action(&mut table, 21, PlayerAction::Call).unwrap();
    player_action(&mut table, 22, PlayerAction::Call).unwrap();
    advance_betting_round(&mut table).unwrap();
    assert_eq!(table.current_round, BettingRound::Flop);
    assert_eq!(table.current_player_position, Some(1));

    let outcome = lifecycle::leave_table(&mut table, 22).unwrap();
    assert_eq!(outcome.forfeited, Chips(60));
    assert_eq!(table.status, TableStatus::InProgress);

    assert_eq!(table.current_player_position, None);
    assert_eq!(get_player_to_act(&table), None);
    assert!(!can_player_act(&table, 21));
    assert!(check_round_complete(&table));
    advance_betting_round(&mut table).unwrap();
    assert_eq!(table.current_round, BettingRound::Turn);
}

#[test]
fn leaving_between_hands_refunds_whole_stack() {
    let registry = registry();
    let table_id = heads_up_table(&registry);
    assert_eq!(registry.leave_table(table_id, 11).unwrap(), (Chips(100), Chips::ZERO));
    assert_eq!(
        registry.leave_table(table_id, 11),
        Err(EngineError::PlayerNotAtTable(11))
    );
    assert_eq!(registry.table_snapshot(table_id).unwrap().status, TableStatus::Waiting);
}

#[test]
fn busted_player_is_not_dealt_in() {
    let registry = registry();
    let table_id = registry.create_table(1, small_config()).unwrap();
    registry.join_table(table_id, 10, Chips(20)).unwrap();
    registry.join_table(table_id, 11, Chips(200)).unwrap();
    registry.join_table(table_id, 12, Chips(200)).unwrap();
    registry.start_game(table_id).unwrap();

    // Дилер место 0 (игрок 10), SB 11, BB 12, первым ходит 10.
    registry.player_action(table_id, 10, PlayerAction::AllIn).unwrap();
    registry.player_action(table_id, 11, PlayerAction::Fold).unwrap();
    registry.player_action(table_id, 12, PlayerAction::Fold).unwrap();
    let table = registry.table_snapshot(table_id).unwrap();
    assert_eq!(table.status, TableStatus::Showdown);
    registry.distribute_pot(table_id).unwrap();

    // Игрок без фишек остаётся за столом, но в раздачу не попадает.
    let mut table = registry.table_snapshot(table_id).unwrap();
    assert_eq!(table.status, TableStatus::Complete);
    table.player_mut(0).unwrap().stack = Chips::ZERO;
    lifecycle::start_game(&mut table, &engine_config()).unwrap();
    assert!(!table.player(0).unwrap().is_active);
    assert!(table.player(0).unwrap().hole_cards.is_none());
    assert_eq!(table.contenders().count(), 2);
}
