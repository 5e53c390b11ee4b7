//! Общие утилиты интеграционных тестов движка стола.

#![allow(dead_code)]

use holdem_engine::domain::{
    BettingRound, Card, Chips, Player, PlayerId, SeatIndex, Table, TableConfig, TableId,
    TableStatus,
};
use holdem_engine::engine::{lifecycle, EngineError, PlayerAction, TableRegistry};
use holdem_engine::infra::EngineConfig;

pub fn engine_config() -> EngineConfig {
    EngineConfig {
        rng_seed: 7,
        ..EngineConfig::default()
    }
}

pub fn registry() -> TableRegistry {
    TableRegistry::new(engine_config())
}

/// Блайнды 1/2, бай-ин 20..200, 6 мест.
pub fn small_config() -> TableConfig {
    TableConfig::new(Chips(1), Chips(2), Chips(20), Chips(200), 6)
}

/// Блайнды 5/10, бай-ин 50..1000, 6 мест.
pub fn standard_config() -> TableConfig {
    TableConfig::new(Chips(5), Chips(10), Chips(50), Chips(1000), 6)
}

/// Хедз-ап через реестр: игроки 10 (место 0) и 11 (место 1) по 100 фишек.
pub fn heads_up_table(registry: &TableRegistry) -> TableId {
    let table_id = registry.create_table(1, small_config()).unwrap();
    registry.join_table(table_id, 10, Chips(100)).unwrap();
    registry.join_table(table_id, 11, Chips(100)).unwrap();
    table_id
}

/// Стол без реестра: игроки сидят по порядку мест с заданными бай-инами.
pub fn table_with_players(config: TableConfig, players: &[(PlayerId, u64)]) -> Table {
    let (mut table, _) = lifecycle::create_table(1, 1, config, &engine_config()).unwrap();
    for (player_id, buy_in) in players {
        lifecycle::join_table(&mut table, *player_id, Chips(*buy_in)).unwrap();
    }
    table
}

/// Трое по 200 фишек, блайнды 5/10: места 0, 1, 2 = игроки 20, 21, 22.
/// После `start_game`: дилер 0, SB 1, BB 2, первым ходит игрок 20.
pub fn three_way_started() -> Table {
    let mut table = table_with_players(standard_config(), &[(20, 200), (21, 200), (22, 200)]);
    lifecycle::start_game(&mut table, &engine_config()).unwrap();
    table
}

pub fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(|c| c.parse().unwrap()).collect()
}

pub fn hole(s: &str) -> [Card; 2] {
    let c = cards(s);
    [c[0], c[1]]
}

/// Стол, подготовленный сразу к шоудауну.
///
/// `players`: (id, вклад в банк, оставшийся стек, карманные карты или None = сфолдил).
pub fn showdown_table(
    dealer: SeatIndex,
    board: &str,
    players: &[(PlayerId, u64, u64, Option<&str>)],
) -> Table {
    let config = TableConfig::new(Chips(5), Chips(10), Chips(10), Chips(10_000), 6);
    let mut table = Table::new(1, 1, config);

    for (seat, (player_id, contributed, stack, hole_cards)) in players.iter().enumerate() {
        let mut p = Player::new(*player_id, seat as SeatIndex, Chips(*stack));
        p.total_contributed = Chips(*contributed);
        p.hole_cards = hole_cards.map(hole);
        p.is_active = hole_cards.is_some();
        table.seats[seat] = Some(p);
    }

    let b = cards(board);
    if b.len() >= 3 {
        table.community.flop = Some([b[0], b[1], b[2]]);
    }
    table.community.turn = b.get(3).copied();
    table.community.river = b.get(4).copied();
    table.community.cards_dealt = b.len() as u8;

    table.pot_total = table.contributed_total();
    table.dealer_position = Some(dealer);
    table.game_number = 1;
    table.current_round = BettingRound::Showdown;
    table.status = TableStatus::Showdown;
    table
}

/// Check, если можно, иначе call.
pub fn check_or_call(registry: &TableRegistry, table_id: TableId, player: PlayerId) {
    match registry.player_action(table_id, player, PlayerAction::Check) {
        Err(EngineError::CannotCheck { .. }) => registry
            .player_action(table_id, player, PlayerAction::Call)
            .unwrap(),
        other => other.unwrap(),
    }
}

/// Доиграть раздачу пассивно (check/call) до шоудауна.
pub fn play_to_showdown(registry: &TableRegistry, table_id: TableId) {
    for _ in 0..100 {
        let table = registry.table_snapshot(table_id).unwrap();
        if table.status != TableStatus::InProgress {
            return;
        }
        match registry.get_player_to_act(table_id).unwrap() {
            Some(player) => check_or_call(registry, table_id, player),
            None => registry.advance_betting_round(table_id).unwrap(),
        }
    }
    panic!("раздача не дошла до шоудауна");
}

/// Сумма фишек за столом: стеки + банк.
pub fn chips_in_play(table: &Table) -> u64 {
    table.players().map(|p| p.stack.0).sum::<u64>() + table.pot_total.0
}
