use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::table::SeatIndex;
use crate::domain::PlayerId;
use crate::engine::actions::ActionKind;

/// Состояние игрока за конкретным столом.
///
/// Ключ: (стол, место). Место не меняется, пока игрок сидит за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub player_id: PlayerId,
    pub position: SeatIndex,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Ставка в текущем раунде ставок (обнуляется на каждой улице).
    pub current_bet: Chips,
    /// Сколько всего игрок внёс в банк в текущей раздаче.
    pub total_contributed: Chips,
    /// Карманные карты: `None` до раздачи, выставляются один раз за раздачу.
    pub hole_cards: Option<[Card; 2]>,
    /// false: сфолдил, выбыл или подсел посреди раздачи.
    pub is_active: bool,
    pub has_acted: bool,
    pub last_action: Option<ActionKind>,
}

impl Player {
    pub fn new(player_id: PlayerId, position: SeatIndex, buy_in: Chips) -> Self {
        Self {
            player_id,
            position,
            stack: buy_in,
            current_bet: Chips::ZERO,
            total_contributed: Chips::ZERO,
            hole_cards: None,
            is_active: true,
            has_acted: false,
            last_action: None,
        }
    }

    /// Участвует ли игрок в текущем банке (не сфолдил).
    pub fn is_contender(&self) -> bool {
        self.is_active
    }

    /// Может ли игрок ещё ставить (в раздаче и есть фишки).
    pub fn can_bet(&self) -> bool {
        self.is_contender() && !self.stack.is_zero()
    }

    pub fn is_all_in(&self) -> bool {
        self.is_contender() && self.stack.is_zero()
    }

    /// Переложить из стека в банк не более `amount`. Возвращает реально внесённое.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.stack);
        self.stack -= real;
        self.current_bet += real;
        self.total_contributed += real;
        real
    }

    /// Сброс перед новой раздачей. Игроки без фишек в раздачу не попадают.
    pub fn reset_for_hand(&mut self) {
        self.current_bet = Chips::ZERO;
        self.total_contributed = Chips::ZERO;
        self.hole_cards = None;
        self.is_active = !self.stack.is_zero();
        self.has_acted = false;
        self.last_action = None;
    }

    pub fn reset_for_round(&mut self) {
        self.current_bet = Chips::ZERO;
        self.has_acted = false;
    }
}
