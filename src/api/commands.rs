use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::TableConfig;
use crate::domain::{PlayerId, SeatIndex, TableId};
use crate::engine::actions::PlayerAction;
use crate::engine::showdown::Payout;

/// Команда верхнего уровня.
///
/// Эти команды превращаются в операции (`HoldemOperation`),
/// которые Linera экспонирует наружу. Одна команда: один переход состояния.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Создать новый стол.
    CreateTable(CreateTableCommand),

    /// Операция над конкретным столом.
    TableCommand(TableCommand),
}

/// Команда создания стола.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateTableCommand {
    /// Кто создаёт стол (уже аутентифицирован вызывающей стороной).
    pub creator: PlayerId,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    /// Количество мест (2–10).
    pub max_players: u8,
}

impl CreateTableCommand {
    pub fn table_config(&self) -> TableConfig {
        TableConfig::new(
            self.small_blind,
            self.big_blind,
            self.min_buy_in,
            self.max_buy_in,
            self.max_players,
        )
    }
}

/// Команды, которые относятся к существующему столу.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TableCommand {
    /// Сесть за стол с бай-ином.
    JoinTable(JoinTableCommand),

    /// Уйти из-за стола (посреди раздачи: фолд).
    LeaveTable(LeaveTableCommand),

    /// Запустить новую раздачу.
    StartGame { table_id: TableId },

    /// Задать seed колоды следующей раздачи.
    ShuffleDeck { table_id: TableId, seed: u64 },

    PostBlinds { table_id: TableId },
    DealHoleCards { table_id: TableId },
    DealFlop { table_id: TableId },
    DealTurn { table_id: TableId },
    DealRiver { table_id: TableId },

    /// Действие игрока в раздаче.
    PlayerAction(PlayerActionCommand),

    AdvanceBettingRound { table_id: TableId },

    /// Распределить банк после шоудауна.
    DistributePot { table_id: TableId },
}

impl TableCommand {
    pub fn table_id(&self) -> TableId {
        match self {
            TableCommand::JoinTable(c) => c.table_id,
            TableCommand::LeaveTable(c) => c.table_id,
            TableCommand::PlayerAction(c) => c.table_id,
            TableCommand::StartGame { table_id }
            | TableCommand::ShuffleDeck { table_id, .. }
            | TableCommand::PostBlinds { table_id }
            | TableCommand::DealHoleCards { table_id }
            | TableCommand::DealFlop { table_id }
            | TableCommand::DealTurn { table_id }
            | TableCommand::DealRiver { table_id }
            | TableCommand::AdvanceBettingRound { table_id }
            | TableCommand::DistributePot { table_id } => *table_id,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JoinTableCommand {
    pub table_id: TableId,
    pub player_id: PlayerId,
    pub buy_in: Chips,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeaveTableCommand {
    pub table_id: TableId,
    pub player_id: PlayerId,
}

/// Действие игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerActionCommand {
    pub table_id: TableId,
    pub player_id: PlayerId,
    pub action: PlayerAction,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Создан новый стол.
    TableCreated { table_id: TableId },

    /// Игрок посажен на место.
    Seated { seat: SeatIndex },

    /// Игрок ушёл: возвращённый стек и фишки, оставшиеся в банке.
    Left { refunded: Chips, forfeited: Chips },

    /// Банк распределён.
    PotDistributed { payouts: Vec<Payout> },
}
