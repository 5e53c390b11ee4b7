//! Раунды ставок: блайнды, очередь хода, минимальный рейз, all-in,
//! переоткрытие торговли и переход улиц.

mod common;

use common::*;

use holdem_engine::domain::{BettingRound, Chips, TableStatus};
use holdem_engine::engine::betting::{
    advance_betting_round, can_player_act, check_round_complete, get_active_players,
    get_current_bet, get_player_to_act, player_action, post_blinds,
};
use holdem_engine::engine::{ActionKind, EngineError, PlayerAction, TableEvent};

// ===== БЛАЙНДЫ =====

#[test]
fn heads_up_dealer_posts_small_blind_and_acts_first() {
    let registry = registry();
    let table_id = heads_up_table(&registry);
    registry.start_game(table_id).unwrap();

    let table = registry.table_snapshot(table_id).unwrap();
    assert_eq!(table.player(0).unwrap().current_bet, Chips(1));
    assert_eq!(table.player(1).unwrap().current_bet, Chips(2));
    assert_eq!(table.current_bet, Chips(2));
    assert_eq!(table.last_raise_amount, Chips(2));
    assert_eq!(get_player_to_act(&table), Some(10));
    assert!(can_player_act(&table, 10));
    assert!(!can_player_act(&table, 11));
    assert!(!can_player_act(&table, 99));
}

#[test]
fn heads_up_flag_can_put_dealer_on_big_blind() {
    let mut config = engine_config();
    config.heads_up_dealer_posts_small_blind = false;
    let registry = holdem_engine::engine::TableRegistry::new(config);
    let table_id = heads_up_table(&registry);
    registry.start_game(table_id).unwrap();

    let table = registry.table_snapshot(table_id).unwrap();
    assert_eq!(table.player(0).unwrap().current_bet, Chips(2));
    assert_eq!(table.player(1).unwrap().current_bet, Chips(1));
    assert_eq!(get_player_to_act(&table), Some(11));
}

#[test]
fn three_handed_blinds_and_first_actor() {
    let table = three_way_started();
    assert_eq!(table.player(1).unwrap().current_bet, Chips(5));
    assert_eq!(table.player(2).unwrap().current_bet, Chips(10));
    assert_eq!(table.pot_total, Chips(15));
    assert_eq!(get_current_bet(&table), Chips(10));
    assert_eq!(get_player_to_act(&table), Some(20));
    assert_eq!(get_active_players(&table), vec![20, 21, 22]);
}

#[test]
fn blinds_cannot_be_posted_twice() {
    let mut table = three_way_started();
    assert_eq!(post_blinds(&mut table), Err(EngineError::BlindsAlreadyPosted));

    let mut idle = table_with_players(standard_config(), &[(1, 100), (2, 100)]);
    assert_eq!(
        post_blinds(&mut idle),
        Err(EngineError::NoActiveHand(TableStatus::Waiting))
    );
}

#[test]
fn short_blind_is_posted_all_in() {
    // У игрока на большом блайнде (место 2) всего 4 фишки.
    let mut table = table_with_players(standard_config(), &[(20, 200), (21, 200), (22, 200)]);
    table.player_mut(2).unwrap().stack = Chips(4);
    holdem_engine::engine::lifecycle::start_game(&mut table, &engine_config()).unwrap();

    let bb = table.player(2).unwrap();
    assert_eq!(bb.current_bet, Chips(4));
    assert!(bb.is_all_in());
    assert_eq!(table.current_bet, Chips(5));
    assert_eq!(table.pot_total, Chips(9));
}

// ===== ДЕЙСТВИЯ =====

#[test]
fn turn_order_is_enforced() {
    let mut table = three_way_started();
    assert_eq!(
        player_action(&mut table, 21, PlayerAction::Call),
        Err(EngineError::NotPlayersTurn(21))
    );
    assert_eq!(
        player_action(&mut table, 77, PlayerAction::Call),
        Err(EngineError::PlayerNotAtTable(77))
    );
}

#[test]
fn check_and_call_preconditions() {
    let mut table = three_way_started();
    assert_eq!(
        player_action(&mut table, 20, PlayerAction::Check),
        Err(EngineError::CannotCheck { to_call: Chips(10) })
    );
    assert_eq!(
        player_action(&mut table, 20, PlayerAction::Bet(Chips(30))),
        Err(EngineError::BetNotAllowed)
    );
    player_action(&mut table, 20, PlayerAction::Call).unwrap();
    player_action(&mut table, 21, PlayerAction::Call).unwrap();
    // BB: ставка уравнена, call невозможен, check можно.
    assert_eq!(
        player_action(&mut table, 22, PlayerAction::Call),
        Err(EngineError::CannotCall)
    );
    player_action(&mut table, 22, PlayerAction::Check).unwrap();
    assert!(check_round_complete(&table));

    advance_betting_round(&mut table).unwrap();
    assert_eq!(
        player_action(&mut table, 21, PlayerAction::Raise(Chips(20))),
        Err(EngineError::RaiseNotAllowed)
    );
}

/// Стек 5, нужно доплатить 10: call превращается в all-in на 5.
#[test]
fn short_call_goes_all_in() {
    let mut table = three_way_started();
    table.player_mut(0).unwrap().stack = Chips(5);

    let events = player_action(&mut table, 20, PlayerAction::Call).unwrap();
    let p = table.player(0).unwrap();
    assert_eq!(p.stack, Chips::ZERO);
    assert!(p.is_active);
    assert_eq!(p.total_contributed, Chips(5));
    assert_eq!(p.last_action, Some(ActionKind::AllIn));
    assert_eq!(table.pot_total, Chips(20));
    assert!(matches!(
        events[0],
        TableEvent::PlayerActed { player: 20, action: ActionKind::AllIn, amount: Chips(5), .. }
    ));
    // Неполный call не меняет ставку стола.
    assert_eq!(table.current_bet, Chips(10));
}

#[test]
fn minimum_raise_follows_last_full_raise() {
    let mut table = three_way_started();

    assert_eq!(
        player_action(&mut table, 20, PlayerAction::Raise(Chips(15))),
        Err(EngineError::RaiseTooSmall {
            minimum: Chips(20),
            attempted: Chips(15)
        })
    );
    player_action(&mut table, 20, PlayerAction::Raise(Chips(30))).unwrap();
    assert_eq!(table.current_bet, Chips(30));
    assert_eq!(table.last_raise_amount, Chips(20));

    // Следующий рейз минимум до 50.
    assert!(matches!(
        player_action(&mut table, 21, PlayerAction::Raise(Chips(45))),
        Err(EngineError::RaiseTooSmall { minimum: Chips(50), .. })
    ));
    player_action(&mut table, 21, PlayerAction::Raise(Chips(50))).unwrap();
    assert_eq!(table.player(1).unwrap().current_bet, Chips(50));
    assert_eq!(table.player(1).unwrap().stack, Chips(150));
    assert_eq!(table.pot_total, Chips(90));
}

#[test]
fn bet_beyond_stack_is_normalized_to_all_in() {
    let mut table = three_way_started();
    player_action(&mut table, 20, PlayerAction::Raise(Chips(10_000))).unwrap();
    let p = table.player(0).unwrap();
    assert_eq!(p.stack, Chips::ZERO);
    assert_eq!(p.current_bet, Chips(200));
    assert_eq!(p.last_action, Some(ActionKind::AllIn));
    assert_eq!(table.current_bet, Chips(200));
    assert_eq!(table.last_raise_amount, Chips(190));
}

#[test]
fn full_raise_reopens_action_short_all_in_does_not() {
    let mut table = three_way_started();
    // 20 рейзит до 30 (полный рейз на 20).
    player_action(&mut table, 20, PlayerAction::Raise(Chips(30))).unwrap();

    // SB (21) уходит all-in до 40: повышение 10 < 20, это короткий all-in.
    table.player_mut(1).unwrap().stack = Chips(35);
    player_action(&mut table, 21, PlayerAction::AllIn).unwrap();
    assert_eq!(table.current_bet, Chips(40));
    assert_eq!(table.last_raise_amount, Chips(20));
    assert!(table.player(0).unwrap().has_acted);

    // BB ещё не ходил: ему торговля открыта, но он уравнивает.
    assert!(matches!(
        player_action(&mut table, 22, PlayerAction::Raise(Chips(55))),
        Err(EngineError::RaiseTooSmall { minimum: Chips(60), .. })
    ));
    player_action(&mut table, 22, PlayerAction::Call).unwrap();

    // Игрок 20 уже ходил, торговля для него не переоткрыта.
    assert_eq!(get_player_to_act(&table), Some(20));
    assert_eq!(
        player_action(&mut table, 20, PlayerAction::Raise(Chips(100))),
        Err(EngineError::ActionNotReopened(0))
    );
    assert_eq!(
        player_action(&mut table, 20, PlayerAction::AllIn),
        Err(EngineError::ActionNotReopened(0))
    );
    assert!(!check_round_complete(&table));
    player_action(&mut table, 20, PlayerAction::Call).unwrap();

    assert!(check_round_complete(&table));
    assert_eq!(get_player_to_act(&table), None);
    assert_eq!(table.pot_total, Chips(120));
}

#[test]
fn fold_to_single_player_ends_hand() {
    let mut table = three_way_started();
    player_action(&mut table, 20, PlayerAction::Fold).unwrap();
    let events = player_action(&mut table, 21, PlayerAction::Fold).unwrap();

    assert_eq!(table.status, TableStatus::Showdown);
    assert_eq!(table.current_round, BettingRound::Showdown);
    assert_eq!(table.current_player_position, None);
    assert_eq!(get_active_players(&table), vec![22]);
    assert!(events
        .iter()
        .any(|e| matches!(e, TableEvent::BettingRoundComplete { round: BettingRound::Showdown, .. })));
}

// ===== ПЕРЕХОД УЛИЦ =====

#[test]
fn advance_resets_round_state_and_deals_board() {
    let mut table = three_way_started();
    player_action(&mut table, 20, PlayerAction::Call).unwrap();
    player_action(&mut table, 21, PlayerAction::Call).unwrap();
    assert!(!check_round_complete(&table));
    assert_eq!(advance_betting_round(&mut table), Err(EngineError::RoundNotComplete));
    player_action(&mut table, 22, PlayerAction::Check).unwrap();

    let events = advance_betting_round(&mut table).unwrap();
    assert_eq!(table.current_round, BettingRound::Flop);
    assert_eq!(table.community.cards_dealt, 3);
    assert_eq!(table.current_bet, Chips::ZERO);
    assert_eq!(table.last_raise_amount, Chips::ZERO);
    assert_eq!(table.players_acted_this_round, 0);
    assert!(table.players().all(|p| !p.has_acted && p.current_bet.is_zero()));
    // Постфлоп первым ходит первый слева от дилера.
    assert_eq!(get_player_to_act(&table), Some(21));
    assert!(matches!(events[0], TableEvent::CommunityCardsDealt { cards_dealt: 3, .. }));
    assert!(matches!(events[1], TableEvent::BettingRoundComplete { round: BettingRound::Flop, .. }));

    // Постфлоп минимальная ставка: большой блайнд.
    assert!(matches!(
        player_action(&mut table, 21, PlayerAction::Bet(Chips(5))),
        Err(EngineError::RaiseTooSmall { minimum: Chips(10), .. })
    ));
    player_action(&mut table, 21, PlayerAction::Bet(Chips(10))).unwrap();
    player_action(&mut table, 22, PlayerAction::Call).unwrap();
    player_action(&mut table, 20, PlayerAction::Call).unwrap();
    advance_betting_round(&mut table).unwrap();
    assert_eq!(table.current_round, BettingRound::Turn);
    assert_eq!(table.pot_total, Chips(60));

    for p in [21, 22, 20] {
        player_action(&mut table, p, PlayerAction::Check).unwrap();
    }
    advance_betting_round(&mut table).unwrap();
    assert_eq!(table.current_round, BettingRound::River);
    for p in [21, 22, 20] {
        player_action(&mut table, p, PlayerAction::Check).unwrap();
    }
    advance_betting_round(&mut table).unwrap();
    assert_eq!(table.current_round, BettingRound::Showdown);
    assert_eq!(table.status, TableStatus::Showdown);
    assert_eq!(table.community.cards_dealt, 5);
    assert_eq!(
        advance_betting_round(&mut table),
        Err(EngineError::NoActiveHand(TableStatus::Showdown))
    );
}

#[test]
fn all_in_players_skip_remaining_rounds() {
    let mut table = three_way_started();
    player_action(&mut table, 20, PlayerAction::AllIn).unwrap();
    player_action(&mut table, 21, PlayerAction::AllIn).unwrap();
    player_action(&mut table, 22, PlayerAction::Fold).unwrap();
    assert!(check_round_complete(&table));

    // Торговаться некому: каждая улица сразу завершена.
    for expected in [BettingRound::Flop, BettingRound::Turn, BettingRound::River] {
        advance_betting_round(&mut table).unwrap();
        assert_eq!(table.current_round, expected);
        assert_eq!(get_player_to_act(&table), None);
        assert!(check_round_complete(&table));
    }
    advance_betting_round(&mut table).unwrap();
    assert_eq!(table.status, TableStatus::Showdown);
    assert_eq!(table.pot_total, Chips(410));
}

#[test]
fn round_is_never_complete_without_a_hand() {
    let table = table_with_players(standard_config(), &[(1, 100), (2, 100)]);
    assert!(!check_round_complete(&table));
    assert!(get_active_players(&table).is_empty());
}
