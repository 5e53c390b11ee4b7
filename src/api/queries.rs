use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::table::{Table, TableStatus};
use crate::domain::{PlayerId, TableId};
use crate::engine::events::EventRecord;
use crate::engine::showdown::HandResult;
use crate::engine::side_pots::SidePot;

use super::dto::{PlayerViewDto, TableViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Получить состояние стола.
    GetTableInfo { table_id: TableId },

    /// Игроки за столом. Карманные карты видны только `viewer` (и всем на шоудауне).
    GetTablePlayers {
        table_id: TableId,
        viewer: Option<PlayerId>,
    },

    /// Получить список столов (для лобби).
    ListTables,

    IsTableReadyToStart { table_id: TableId },
    CanPlayerAct { table_id: TableId, player_id: PlayerId },
    CheckRoundComplete { table_id: TableId },
    GetCurrentBet { table_id: TableId },
    GetPlayerToAct { table_id: TableId },
    GetActivePlayers { table_id: TableId },
    GetSidePots { table_id: TableId },
    GetCommunityCards { table_id: TableId },
    EvaluateHands { table_id: TableId },

    /// Журнал событий стола.
    GetEvents { table_id: TableId },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Table(TableViewDto),
    Tables(Vec<TableViewDto>),
    Players(Vec<PlayerViewDto>),
    Flag(bool),
    Chips(Chips),
    PlayerToAct(Option<PlayerId>),
    ActivePlayers(Vec<PlayerId>),
    SidePots(Vec<SidePot>),
    CommunityCards(Vec<Card>),
    Hands(Vec<HandResult>),
    Events(Vec<EventRecord>),
}

/// Сформировать DTO стола.
pub fn build_table_view(table: &Table) -> TableViewDto {
    TableViewDto {
        table_id: table.id,
        creator: table.creator,
        small_blind: table.config.small_blind,
        big_blind: table.config.big_blind,
        min_buy_in: table.config.min_buy_in,
        max_buy_in: table.config.max_buy_in,
        max_players: table.config.max_players,
        status: table.status,
        current_round: table.current_round,
        dealer_position: table.dealer_position,
        current_player_position: table.current_player_position,
        current_bet: table.current_bet,
        pot_total: table.pot_total,
        game_number: table.game_number,
        board: table.community.cards(),
        players_seated: table.seated_count() as u8,
    }
}

/// Собрать DTO игроков за столом.
///
/// Чужие карты открываются только на оспоренном шоудауне с полным бордом.
/// Неоспоренный банк выигрывается без вскрытия.
pub fn build_players_dto(table: &Table, viewer: Option<PlayerId>) -> Vec<PlayerViewDto> {
    let showdown = table.status == TableStatus::Showdown
        && table.contenders().count() >= 2
        && table.community.full_board().is_some();

    table
        .players()
        .map(|p| {
            let show_cards = Some(p.player_id) == viewer || (showdown && p.is_contender());
            PlayerViewDto {
                player_id: p.player_id,
                seat_index: p.position,
                stack: p.stack,
                current_bet: p.current_bet,
                total_contributed: p.total_contributed,
                is_active: p.is_active,
                has_acted: p.has_acted,
                last_action: p.last_action,
                hole_cards: if show_cards {
                    p.hole_cards.map(|c| c.to_vec())
                } else {
                    None
                },
            }
        })
        .collect()
}
