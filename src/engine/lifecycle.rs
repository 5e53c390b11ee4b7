//! Жизненный цикл стола: создание, посадка, уход, запуск раздачи.

use tracing::info;

use crate::domain::{
    BettingRound, Chips, DeadMoney, Player, PlayerId, SeatIndex, Table, TableConfig, TableId,
    TableStatus,
};
use crate::engine::actions::ActionKind;
use crate::engine::betting::{self, finish_if_uncontested, next_to_act};
use crate::engine::dealing;
use crate::engine::errors::EngineError;
use crate::engine::events::TableEvent;
use crate::engine::positions::next_dealer;
use crate::engine::showdown;
use crate::infra::config::EngineConfig;

/// Создать стол. Конфиг проверяется до создания.
pub fn create_table(
    id: TableId,
    creator: PlayerId,
    config: TableConfig,
    engine: &EngineConfig,
) -> Result<(Table, TableEvent), EngineError> {
    config.validate()?;

    let mut table = Table::new(id, creator, config);
    table.heads_up_dealer_posts_small_blind = engine.heads_up_dealer_posts_small_blind;

    info!(
        table_id = id,
        creator,
        sb = table.config.small_blind.0,
        bb = table.config.big_blind.0,
        max_players = table.config.max_players,
        "table created"
    );

    let event = TableEvent::TableCreated {
        creator,
        small_blind: table.config.small_blind,
        big_blind: table.config.big_blind,
        max_players: table.config.max_players,
    };
    Ok((table, event))
}

/// Посадить игрока на первое свободное место.
///
/// Во время раздачи игрок садится неактивным и попадает в следующую раздачу.
pub fn join_table(
    table: &mut Table,
    player_id: PlayerId,
    buy_in: Chips,
) -> Result<Vec<TableEvent>, EngineError> {
    if table.seat_of(player_id).is_some() {
        return Err(EngineError::AlreadySeated(player_id));
    }
    let (min, max) = (table.config.min_buy_in, table.config.max_buy_in);
    if buy_in < min || buy_in > max {
        return Err(EngineError::BuyInOutOfRange { buy_in, min, max });
    }
    let seat = table
        .lowest_free_seat()
        .ok_or(EngineError::TableFull(table.id))?;

    let mut player = Player::new(player_id, seat, buy_in);
    if table.hand_running() {
        player.is_active = false;
    }
    let dealt_in = player.is_active;
    table.seats[seat as usize] = Some(player);

    info!(
        table_id = table.id,
        player_id,
        seat,
        buy_in = buy_in.0,
        dealt_in,
        "player joined"
    );

    Ok(vec![TableEvent::PlayerJoinedTable {
        player: player_id,
        position: seat,
        buy_in,
    }])
}

/// Итог ухода из-за стола.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// Возвращённый игроку стек (без фишек, уже внесённых в банк).
    pub refunded: Chips,
    /// Внесённые в текущую раздачу фишки, оставшиеся в банке.
    pub forfeited: Chips,
    pub events: Vec<TableEvent>,
}

/// Уйти из-за стола. Разрешено всегда.
///
/// Посреди раздачи это неявный фолд: внесённые фишки остаются в банке
/// мёртвыми деньгами, возвращается только остаток стека. Место освобождается сразу.
/// Последний претендент на шоудауне сначала забирает банк и уходит со всем стеком.
pub fn leave_table(table: &mut Table, player_id: PlayerId) -> Result<LeaveOutcome, EngineError> {
    let seat = table.require_seat(player_id)?;
    let mut events = Vec::new();

    let sole_winner = table.status == TableStatus::Showdown
        && table.contenders().map(|p| p.position).eq([seat]);
    if sole_winner {
        let (_, paid) = showdown::distribute_pot(table)?;
        events.extend(
            paid.into_iter()
                .filter(|e| !matches!(e, TableEvent::GameReadyToStart { .. })),
        );
    }

    let player = table.seats[seat as usize]
        .take()
        .ok_or(EngineError::PlayerNotAtTable(player_id))?;
    let mut forfeited = Chips::ZERO;

    if table.hand_running() {
        if !player.total_contributed.is_zero() {
            forfeited = player.total_contributed;
            table.dead_money.push(DeadMoney {
                player_id,
                amount: forfeited,
            });
        }
        if player.is_contender() {
            events.push(TableEvent::PlayerActed {
                player: player_id,
                action: ActionKind::Fold,
                amount: Chips::ZERO,
                pot_total: table.pot_total,
            });
        }
        match finish_if_uncontested(table) {
            Some(event) => events.push(event),
            None => table.current_player_position = turn_after_leave(table, seat),
        }
    } else if table.funded_count() < 2 {
        table.status = TableStatus::Waiting;
    } else if sole_winner {
        events.push(TableEvent::GameReadyToStart {
            player_count: table.funded_count() as u8,
        });
    }

    info!(
        table_id = table.id,
        player_id,
        seat,
        refunded = player.stack.0,
        forfeited = forfeited.0,
        "player left"
    );

    events.push(TableEvent::PlayerLeaveTable {
        player: player_id,
        refunded: player.stack,
    });

    Ok(LeaveOutcome {
        refunded: player.stack,
        forfeited,
        events,
    })
}

/// Ход после ухода: остаётся у текущего игрока, если ему ещё нужно ходить,
/// иначе переходит дальше. `None`, если торговля на улице закрыта.
fn turn_after_leave(table: &Table, left_seat: SeatIndex) -> Option<SeatIndex> {
    let current = table.current_player_position?;
    let holds_turn = current != left_seat
        && table
            .player(current)
            .is_some_and(|p| betting::needs_to_act(table, p));
    if holds_turn {
        Some(current)
    } else {
        next_to_act(table, current)
    }
}

/// Можно ли запускать раздачу: не меньше двух игроков с фишками и раздача не идёт.
pub fn is_table_ready_to_start(table: &Table) -> bool {
    !table.hand_running() && table.funded_count() >= 2
}

/// Запустить новую раздачу: кнопка, сброс состояния, тасовка, блайнды, карманные карты.
pub fn start_game(table: &mut Table, engine: &EngineConfig) -> Result<Vec<TableEvent>, EngineError> {
    if table.hand_running() {
        return Err(EngineError::HandAlreadyInProgress);
    }
    if table.funded_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }
    let dealer = next_dealer(table).ok_or(EngineError::NotEnoughPlayers)?;

    let mut events = vec![TableEvent::GameReadyToStart {
        player_count: table.funded_count() as u8,
    }];

    table.game_number += 1;
    reset_for_new_hand(table);
    table.dealer_position = Some(dealer);
    table.status = TableStatus::InProgress;

    let seed = table.pending_seed.take().unwrap_or_else(|| {
        engine
            .base_seed()
            .derive(table.id, table.game_number)
            .to_u64()
    });
    dealing::shuffle(&mut table.deck, seed);

    let players: Vec<PlayerId> = table.contenders().map(|p| p.player_id).collect();

    info!(
        table_id = table.id,
        game_number = table.game_number,
        dealer,
        players = players.len(),
        seed,
        "hand started"
    );

    events.push(TableEvent::GameStarted {
        game_number: table.game_number,
        dealer_position: dealer,
        players,
    });
    events.extend(betting::post_blinds(table)?);
    events.extend(dealing::deal_hole_cards(table)?);

    Ok(events)
}

fn reset_for_new_hand(table: &mut Table) {
    for p in table.players_mut() {
        p.reset_for_hand();
    }
    table.current_round = BettingRound::PreFlop;
    table.current_player_position = None;
    table.current_bet = Chips::ZERO;
    table.last_raise_amount = Chips::ZERO;
    table.pot_total = Chips::ZERO;
    table.players_acted_this_round = 0;
    table.community.clear();
    table.blinds_posted = false;
    table.hole_cards_dealt = false;
    table.dead_money.clear();
    table.side_pots.clear();
}
