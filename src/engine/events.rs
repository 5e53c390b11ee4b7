use serde::{Deserialize, Serialize};

use crate::domain::{BettingRound, Chips, PlayerId, SeatIndex, TableId};
use crate::engine::actions::ActionKind;

/// Запись, которую стол публикует наружу (UI, аудит).
/// На состояние движка события не влияют.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TableEvent {
    TableCreated {
        creator: PlayerId,
        small_blind: Chips,
        big_blind: Chips,
        max_players: u8,
    },

    PlayerJoinedTable {
        player: PlayerId,
        position: SeatIndex,
        buy_in: Chips,
    },

    /// Игрок ушёл; `refunded`: возвращённый стек.
    PlayerLeaveTable {
        player: PlayerId,
        refunded: Chips,
    },

    GameReadyToStart {
        player_count: u8,
    },

    GameStarted {
        game_number: u64,
        dealer_position: SeatIndex,
        players: Vec<PlayerId>,
    },

    BlindsPosted {
        small_blind_player: PlayerId,
        big_blind_player: PlayerId,
        small_blind_amount: Chips,
        big_blind_amount: Chips,
    },

    HoleCardsDealt {
        game_number: u64,
        player_count: u8,
    },

    CommunityCardsDealt {
        game_number: u64,
        round: BettingRound,
        cards_dealt: u8,
    },

    PlayerActed {
        player: PlayerId,
        action: ActionKind,
        /// Сколько фишек игрок внёс этим действием.
        amount: Chips,
        pot_total: Chips,
    },

    /// Раунд ставок закрыт, стол перешёл на `round`.
    BettingRoundComplete {
        round: BettingRound,
        pot_total: Chips,
    },

    /// Выплата одного пота одному победителю. `hand_rank` = 0 для неоспоренного банка.
    PotDistributed {
        winner: PlayerId,
        amount: Chips,
        hand_rank: u32,
    },
}

/// Событие с порядковым номером в журнале стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRecord {
    pub index: u64,
    pub table_id: TableId,
    pub event: TableEvent,
}

/// Append-only журнал событий одного стола.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventLog {
    next_index: u64,
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, table_id: TableId, event: TableEvent) {
        self.records.push(EventRecord {
            index: self.next_index,
            table_id,
            event,
        });
        self.next_index += 1;
    }

    pub fn extend(&mut self, table_id: TableId, events: impl IntoIterator<Item = TableEvent>) {
        for e in events {
            self.push(table_id, e);
        }
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Забрать накопленные записи. Нумерация продолжается.
    pub fn drain(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }

    /// JSON Lines, по записи на строку.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for r in &self.records {
            out.push_str(&serde_json::to_string(r)?);
            out.push('\n');
        }
        Ok(out)
    }
}
