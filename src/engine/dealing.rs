//! Тасовка и раздача карт: карманные карты и общие карты улиц.

use tracing::debug;

use crate::domain::{BettingRound, Card, GameDeck, Player, Table, TableStatus};
use crate::engine::betting::{advance_betting_round, check_round_complete};
use crate::engine::errors::EngineError;
use crate::engine::events::TableEvent;
use crate::engine::positions::seats_clockwise_after;
use crate::engine::RandomSource;
use crate::infra::rng::DeterministicRng;

/// Перемешать колоду источником случайности `rng`.
pub fn shuffle_with<R: RandomSource>(deck: &mut GameDeck, seed: u64, rng: &mut R) {
    deck.reset(seed);
    rng.shuffle(&mut deck.cards);
}

/// Детерминированная тасовка: один и тот же seed даёт одну и ту же перестановку.
pub fn shuffle(deck: &mut GameDeck, seed: u64) {
    let mut rng = DeterministicRng::from_seed(seed);
    shuffle_with(deck, seed, &mut rng);
}

/// Задать seed следующей раздачи. Между раздачами колода сразу
/// перемешивается этим seed, `start_game` воспроизведёт ту же перестановку.
pub fn shuffle_deck(table: &mut Table, seed: u64) -> Result<(), EngineError> {
    if table.hand_running() {
        return Err(EngineError::HandAlreadyInProgress);
    }
    shuffle(&mut table.deck, seed);
    table.pending_seed = Some(seed);
    debug!(table_id = table.id, seed, "deck shuffled for next hand");
    Ok(())
}

fn take_cards(table: &mut Table, n: usize) -> Result<Vec<Card>, EngineError> {
    let remaining = table.deck.remaining();
    table.deck.issue(n).ok_or(EngineError::DeckExhausted {
        needed: n,
        remaining,
    })
}

/// Раздать по две карманные карты каждому участнику раздачи.
///
/// Порядок: слева от дилера по кругу, по одной карте за проход.
pub fn deal_hole_cards(table: &mut Table) -> Result<Vec<TableEvent>, EngineError> {
    if table.status != TableStatus::InProgress {
        return Err(EngineError::NoActiveHand(table.status));
    }
    if table.hole_cards_dealt {
        return Err(EngineError::AlreadyDealt("hole cards"));
    }

    let dealer = table.dealer_position.unwrap_or(0);
    let seats = seats_clockwise_after(table, dealer, Player::is_contender);
    let n = seats.len();
    let cards = take_cards(table, 2 * n)?;

    for (i, seat) in seats.iter().enumerate() {
        if let Some(player) = table.player_mut(*seat) {
            player.hole_cards = Some([cards[i], cards[n + i]]);
        }
    }
    table.hole_cards_dealt = true;

    debug!(
        table_id = table.id,
        game_number = table.game_number,
        players = n,
        "hole cards dealt"
    );

    Ok(vec![TableEvent::HoleCardsDealt {
        game_number: table.game_number,
        player_count: n as u8,
    }])
}

/// Открыть общие карты улицы `round`. Для префлопа и шоудауна карт нет.
pub(crate) fn deal_board_for(
    table: &mut Table,
    round: BettingRound,
) -> Result<Option<TableEvent>, EngineError> {
    let needed = match round {
        BettingRound::Flop => 3,
        BettingRound::Turn | BettingRound::River => 1,
        BettingRound::PreFlop | BettingRound::Showdown => return Ok(None),
    };
    if table.community.cards_dealt >= round.board_size() {
        return Err(EngineError::AlreadyDealt(street_name(round)));
    }

    let cards = take_cards(table, needed)?;
    match (round, cards.as_slice()) {
        (BettingRound::Flop, [a, b, c]) => table.community.flop = Some([*a, *b, *c]),
        (BettingRound::Turn, [t]) => table.community.turn = Some(*t),
        (BettingRound::River, [r]) => table.community.river = Some(*r),
        _ => {}
    }
    table.community.cards_dealt = round.board_size();

    debug!(
        table_id = table.id,
        game_number = table.game_number,
        round = ?round,
        "community cards dealt"
    );

    Ok(Some(TableEvent::CommunityCardsDealt {
        game_number: table.game_number,
        round,
        cards_dealt: table.community.cards_dealt,
    }))
}

fn street_name(round: BettingRound) -> &'static str {
    match round {
        BettingRound::Flop => "flop",
        BettingRound::Turn => "turn",
        BettingRound::River => "river",
        BettingRound::PreFlop | BettingRound::Showdown => "board",
    }
}

/// Общие карты можно открыть только после закрытого раунда нужной улицы.
/// Открытие улицы и есть переход раунда.
fn deal_street(table: &mut Table, from: BettingRound) -> Result<Vec<TableEvent>, EngineError> {
    if table.status != TableStatus::InProgress {
        return Err(EngineError::NoActiveHand(table.status));
    }
    if table.current_round != from {
        return Err(EngineError::WrongRound {
            expected: from,
            actual: table.current_round,
        });
    }
    if !check_round_complete(table) {
        return Err(EngineError::RoundNotComplete);
    }
    advance_betting_round(table)
}

pub fn deal_flop(table: &mut Table) -> Result<Vec<TableEvent>, EngineError> {
    deal_street(table, BettingRound::PreFlop)
}

pub fn deal_turn(table: &mut Table) -> Result<Vec<TableEvent>, EngineError> {
    deal_street(table, BettingRound::Flop)
}

pub fn deal_river(table: &mut Table) -> Result<Vec<TableEvent>, EngineError> {
    deal_street(table, BettingRound::Turn)
}
