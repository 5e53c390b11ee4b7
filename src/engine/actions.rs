use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Действие игрока. Сумма есть только у Bet/Raise и означает
/// итоговый уровень ставки игрока на этой улице ("поставить до").
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    /// Bet на улице, где ещё нет ставки.
    Bet(Chips),
    /// Raise существующей ставки.
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

/// Тип действия без суммы: для `last_action` и событий.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Bet(_) => ActionKind::Bet,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }

    /// Собрать действие из пары (тип, сумма), как её присылает клиент.
    /// Сумма учитывается только для Bet/Raise.
    pub fn from_parts(kind: ActionKind, amount: Chips) -> Self {
        match kind {
            ActionKind::Fold => PlayerAction::Fold,
            ActionKind::Check => PlayerAction::Check,
            ActionKind::Call => PlayerAction::Call,
            ActionKind::Bet => PlayerAction::Bet(amount),
            ActionKind::Raise => PlayerAction::Raise(amount),
            ActionKind::AllIn => PlayerAction::AllIn,
        }
    }
}

impl ActionKind {
    /// Числовой код действия для внешних записей (0..=5).
    pub fn code(self) -> u8 {
        match self {
            ActionKind::Fold => 0,
            ActionKind::Check => 1,
            ActionKind::Call => 2,
            ActionKind::Bet => 3,
            ActionKind::Raise => 4,
            ActionKind::AllIn => 5,
        }
    }
}
