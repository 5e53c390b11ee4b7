use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::BettingRound;
use crate::domain::table::TableStatus;
use crate::domain::{PlayerId, SeatIndex, TableId};
use crate::engine::actions::ActionKind;

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerViewDto {
    pub player_id: PlayerId,
    pub seat_index: SeatIndex,
    pub stack: Chips,
    pub current_bet: Chips,
    pub total_contributed: Chips,
    pub is_active: bool,
    pub has_acted: bool,
    pub last_action: Option<ActionKind>,
    /// Карманные карты – только для самого игрока или после шоудауна.
    pub hole_cards: Option<Vec<Card>>,
}

/// DTO стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub table_id: TableId,
    pub creator: PlayerId,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    pub max_players: u8,
    pub status: TableStatus,
    pub current_round: BettingRound,
    pub dealer_position: Option<SeatIndex>,
    pub current_player_position: Option<SeatIndex>,
    pub current_bet: Chips,
    pub pot_total: Chips,
    pub game_number: u64,
    pub board: Vec<Card>,
    pub players_seated: u8,
}
