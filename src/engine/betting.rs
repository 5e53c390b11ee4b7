//! Раунды ставок: блайнды, действия игроков, очередь хода, переход улиц.

use tracing::{debug, info};

use crate::domain::{BettingRound, Chips, Player, PlayerId, SeatIndex, Table, TableStatus};
use crate::engine::actions::{ActionKind, PlayerAction};
use crate::engine::dealing;
use crate::engine::errors::EngineError;
use crate::engine::events::TableEvent;
use crate::engine::positions::{blind_seats, next_seat_where};
use crate::engine::validation::validate_action;

/// Раздача идёт и ставки ещё принимаются.
fn require_betting(table: &Table) -> Result<(), EngineError> {
    if table.status == TableStatus::InProgress {
        Ok(())
    } else {
        Err(EngineError::NoActiveHand(table.status))
    }
}

/// Торговля возможна, только пока фишки есть хотя бы у двух участников.
fn betting_open(table: &Table) -> bool {
    table.contenders().filter(|p| p.can_bet()).count() >= 2
}

/// Должен ли игрок ещё сходить на этой улице.
pub fn needs_to_act(table: &Table, player: &Player) -> bool {
    if !player.can_bet() {
        return false;
    }
    if player.current_bet < table.current_bet {
        return true;
    }
    !player.has_acted && betting_open(table)
}

/// Следующее после `after` место, которому нужно ходить.
pub fn next_to_act(table: &Table, after: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(table, after, false, |p| needs_to_act(table, p))
}

/// Поставить малый и большой блайнд.
///
/// Блайнд больше стека ставится на весь стек (all-in). После блайндов
/// `current_bet` = максимальный поставленный блайнд, ход у первого после BB.
pub fn post_blinds(table: &mut Table) -> Result<Vec<TableEvent>, EngineError> {
    require_betting(table)?;
    if table.blinds_posted {
        return Err(EngineError::BlindsAlreadyPosted);
    }
    let dealer = table
        .dealer_position
        .ok_or(EngineError::NoActiveHand(table.status))?;
    let (sb_seat, bb_seat) = blind_seats(table, dealer).ok_or(EngineError::NotEnoughPlayers)?;

    let small_blind = table.config.small_blind;
    let big_blind = table.config.big_blind;

    let (sb_player, sb_amount) = commit_blind(table, sb_seat, small_blind)?;
    let (bb_player, bb_amount) = commit_blind(table, bb_seat, big_blind)?;

    table.pot_total += sb_amount + bb_amount;
    table.current_bet = sb_amount.max(bb_amount);
    table.last_raise_amount = big_blind;
    table.blinds_posted = true;
    table.current_player_position = next_to_act(table, bb_seat);

    debug!(
        table_id = table.id,
        game_number = table.game_number,
        sb_seat,
        bb_seat,
        sb = sb_amount.0,
        bb = bb_amount.0,
        "blinds posted"
    );

    Ok(vec![TableEvent::BlindsPosted {
        small_blind_player: sb_player,
        big_blind_player: bb_player,
        small_blind_amount: sb_amount,
        big_blind_amount: bb_amount,
    }])
}

fn commit_blind(
    table: &mut Table,
    seat: SeatIndex,
    amount: Chips,
) -> Result<(PlayerId, Chips), EngineError> {
    let player = table
        .player_mut(seat)
        .ok_or(EngineError::PlayerCannotAct(seat))?;
    let paid = player.commit(amount);
    Ok((player.player_id, paid))
}

/// Может ли игрок сейчас ходить: его очередь, он в раздаче и у него есть фишки.
pub fn can_player_act(table: &Table, player_id: PlayerId) -> bool {
    let Some(seat) = table.seat_of(player_id) else {
        return false;
    };
    table.status == TableStatus::InProgress
        && table.current_player_position == Some(seat)
        && table.player(seat).is_some_and(Player::can_bet)
}

/// Применить действие игрока.
///
/// Bet/Raise задают итоговую ставку игрока на улице ("до"). Полный рейз
/// переоткрывает торговлю (сбрасывает `has_acted` остальных), короткий all-in не переоткрывает.
pub fn player_action(
    table: &mut Table,
    player_id: PlayerId,
    action: PlayerAction,
) -> Result<Vec<TableEvent>, EngineError> {
    require_betting(table)?;
    let seat = table.require_seat(player_id)?;
    if table.current_player_position != Some(seat) {
        return Err(EngineError::NotPlayersTurn(player_id));
    }

    let resolved = {
        let player = table.player(seat).ok_or(EngineError::PlayerNotAtTable(player_id))?;
        validate_action(player, &action, table)?
    };

    let min_raise = table.last_raise_amount.max(table.config.big_blind);
    let table_bet = table.current_bet;

    let new_level = {
        let player = table
            .player_mut(seat)
            .ok_or(EngineError::PlayerNotAtTable(player_id))?;
        if resolved.kind == ActionKind::Fold {
            player.is_active = false;
        }
        player.commit(resolved.commit);
        player.has_acted = true;
        player.last_action = Some(resolved.kind);
        player.current_bet
    };

    table.pot_total += resolved.commit;
    table.players_acted_this_round = table.players_acted_this_round.saturating_add(1);

    if new_level > table_bet {
        let raise_size = new_level - table_bet;
        table.current_bet = new_level;
        if raise_size >= min_raise {
            table.last_raise_amount = raise_size;
            for p in table.players_mut() {
                if p.position != seat {
                    p.has_acted = false;
                }
            }
        }
    }

    debug!(
        table_id = table.id,
        game_number = table.game_number,
        seat,
        action = ?resolved.kind,
        amount = resolved.commit.0,
        pot = table.pot_total.0,
        "player acted"
    );

    let mut events = vec![TableEvent::PlayerActed {
        player: player_id,
        action: resolved.kind,
        amount: resolved.commit,
        pot_total: table.pot_total,
    }];

    match finish_if_uncontested(table) {
        Some(event) => events.push(event),
        None => table.current_player_position = next_to_act(table, seat),
    }

    Ok(events)
}

/// Если в раздаче остался один претендент: сразу неоспоренный шоудаун.
pub(crate) fn finish_if_uncontested(table: &mut Table) -> Option<TableEvent> {
    if !table.hand_running() || table.contenders().count() > 1 {
        return None;
    }
    table.current_round = BettingRound::Showdown;
    table.status = TableStatus::Showdown;
    table.current_player_position = None;

    info!(
        table_id = table.id,
        game_number = table.game_number,
        "hand uncontested, moving to showdown"
    );

    Some(TableEvent::BettingRoundComplete {
        round: BettingRound::Showdown,
        pot_total: table.pot_total,
    })
}

/// Завершён ли текущий раунд ставок. Состояние не меняет.
pub fn check_round_complete(table: &Table) -> bool {
    match table.status {
        TableStatus::InProgress => !table.players().any(|p| needs_to_act(table, p)),
        TableStatus::Showdown => true,
        TableStatus::Waiting | TableStatus::Complete => false,
    }
}

/// Перейти на следующую улицу: открыть общие карты, сбросить ставки раунда,
/// отдать ход первому слева от дилера. После ривера: шоудаун.
pub fn advance_betting_round(table: &mut Table) -> Result<Vec<TableEvent>, EngineError> {
    require_betting(table)?;
    if !check_round_complete(table) {
        return Err(EngineError::RoundNotComplete);
    }
    let next = table
        .current_round
        .next()
        .ok_or(EngineError::NoActiveHand(table.status))?;

    let mut events = Vec::new();
    if let Some(dealt) = dealing::deal_board_for(table, next)? {
        events.push(dealt);
    }

    for p in table.players_mut() {
        p.reset_for_round();
    }
    table.current_bet = Chips::ZERO;
    table.last_raise_amount = Chips::ZERO;
    table.players_acted_this_round = 0;
    table.current_round = next;

    if next == BettingRound::Showdown {
        table.status = TableStatus::Showdown;
        table.current_player_position = None;
    } else {
        let dealer = table.dealer_position.unwrap_or(0);
        table.current_player_position = next_to_act(table, dealer);
    }

    info!(
        table_id = table.id,
        game_number = table.game_number,
        round = ?next,
        pot = table.pot_total.0,
        "betting round complete"
    );

    events.push(TableEvent::BettingRoundComplete {
        round: next,
        pot_total: table.pot_total,
    });
    Ok(events)
}

pub fn get_current_bet(table: &Table) -> Chips {
    table.current_bet
}

/// Игроки, которые ещё в раздаче (не сфолдили), в порядке мест.
pub fn get_active_players(table: &Table) -> Vec<PlayerId> {
    if !table.hand_running() {
        return Vec::new();
    }
    table.contenders().map(|p| p.player_id).collect()
}

pub fn get_player_to_act(table: &Table) -> Option<PlayerId> {
    table
        .current_player_position
        .and_then(|seat| table.player(seat))
        .map(|p| p.player_id)
}
