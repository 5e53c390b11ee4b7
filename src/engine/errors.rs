use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{BettingRound, Chips, PlayerId, SeatIndex, TableId, TableStatus};

/// Класс ошибки: то, по чему вызывающая сторона решает, что делать дальше.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    /// Некорректные параметры или конфиг.
    Validation,
    /// Операция недопустима в текущей фазе / не в свой ход.
    State,
    /// Стол занят другой операцией: нужно повторить запрос.
    ConcurrencyConflict,
}

/// Ошибки движка стола.
///
/// Нехватка фишек на call/raise не ошибка: такие действия превращаются в all-in.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    // --- Validation ---
    #[error("Некорректный конфиг стола: {0}")]
    InvalidConfig(String),

    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    #[error("Бай-ин {buy_in} вне диапазона [{min}, {max}]")]
    BuyInOutOfRange { buy_in: Chips, min: Chips, max: Chips },

    #[error("Стол {0} заполнен")]
    TableFull(TableId),

    #[error("Игрок {0} уже сидит за этим столом")]
    AlreadySeated(PlayerId),

    #[error("Игрок {0} не найден за столом")]
    PlayerNotAtTable(PlayerId),

    // --- State ---
    #[error("Недостаточно игроков с фишками для раздачи")]
    NotEnoughPlayers,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна (статус {0:?})")]
    NoActiveHand(TableStatus),

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Игрок на месте {0} не может действовать")]
    PlayerCannotAct(SeatIndex),

    #[error("Невозможно выполнить check – нужно доплатить {to_call}")]
    CannotCheck { to_call: Chips },

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("Bet возможен только пока на улице нет ставки")]
    BetNotAllowed,

    #[error("Raise возможен только после ставки")]
    RaiseNotAllowed,

    #[error("Рейз до {attempted} меньше минимума {minimum}")]
    RaiseTooSmall { minimum: Chips, attempted: Chips },

    #[error("Торговля для места {0} не переоткрыта: только call или fold")]
    ActionNotReopened(SeatIndex),

    #[error("Раунд ставок не завершён")]
    RoundNotComplete,

    #[error("Ожидалась улица {expected:?}, а стол на {actual:?}")]
    WrongRound {
        expected: BettingRound,
        actual: BettingRound,
    },

    #[error("{0}: карты уже розданы в этой раздаче")]
    AlreadyDealt(&'static str),

    #[error("Блайнды уже поставлены в этой раздаче")]
    BlindsAlreadyPosted,

    #[error("Колода закончилась: нужно {needed}, осталось {remaining}")]
    DeckExhausted { needed: usize, remaining: usize },

    #[error("Шоудаун ещё не наступил")]
    ShowdownNotReached,

    #[error("Шоудауна нет: банк никто не оспаривает")]
    UncontestedPot,

    // --- Concurrency ---
    #[error("Стол {0} занят другой операцией, повторите запрос")]
    TableBusy(TableId),

    #[error("Блокировка стола {0} отравлена паникой")]
    LockPoisoned(TableId),

    // --- Export ---
    #[error("Не удалось сериализовать журнал событий: {0}")]
    Serialization(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        use EngineError::*;
        match self {
            InvalidConfig(_)
            | TableNotFound(_)
            | BuyInOutOfRange { .. }
            | TableFull(_)
            | AlreadySeated(_)
            | PlayerNotAtTable(_)
            | Serialization(_) => ErrorKind::Validation,

            TableBusy(_) | LockPoisoned(_) => ErrorKind::ConcurrencyConflict,

            NotEnoughPlayers
            | HandAlreadyInProgress
            | NoActiveHand(_)
            | NotPlayersTurn(_)
            | PlayerCannotAct(_)
            | CannotCheck { .. }
            | CannotCall
            | BetNotAllowed
            | RaiseNotAllowed
            | RaiseTooSmall { .. }
            | ActionNotReopened(_)
            | RoundNotComplete
            | WrongRound { .. }
            | AlreadyDealt(_)
            | BlindsAlreadyPosted
            | DeckExhausted { .. }
            | ShowdownNotReached
            | UncontestedPot => ErrorKind::State,
        }
    }
}
