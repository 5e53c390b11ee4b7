use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Раунд ставок (улица) раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BettingRound {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl BettingRound {
    /// Следующая улица. Для Showdown `None`.
    pub fn next(self) -> Option<BettingRound> {
        match self {
            BettingRound::PreFlop => Some(BettingRound::Flop),
            BettingRound::Flop => Some(BettingRound::Turn),
            BettingRound::Turn => Some(BettingRound::River),
            BettingRound::River => Some(BettingRound::Showdown),
            BettingRound::Showdown => None,
        }
    }

    /// Сколько общих карт должно лежать на борде в этом раунде.
    pub fn board_size(self) -> u8 {
        match self {
            BettingRound::PreFlop => 0,
            BettingRound::Flop => 3,
            BettingRound::Turn => 4,
            BettingRound::River | BettingRound::Showdown => 5,
        }
    }
}

/// Ранг руки: чем больше число, тем сильнее рука.
/// Кодирование: в `eval::hand_rank`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Общие карты текущей раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommunityCards {
    pub flop: Option<[Card; 3]>,
    pub turn: Option<Card>,
    pub river: Option<Card>,
    /// 0, 3, 4 или 5.
    pub cards_dealt: u8,
}

impl CommunityCards {
    pub fn clear(&mut self) {
        *self = CommunityCards::default();
    }

    /// Все открытые карты в порядке раздачи.
    pub fn cards(&self) -> Vec<Card> {
        let mut out = Vec::with_capacity(5);
        if let Some(flop) = self.flop {
            out.extend_from_slice(&flop);
        }
        out.extend(self.turn);
        out.extend(self.river);
        out
    }

    /// Полный борд, если открыты все пять карт.
    pub fn full_board(&self) -> Option<[Card; 5]> {
        match (self.flop, self.turn, self.river) {
            (Some([a, b, c]), Some(t), Some(r)) => Some([a, b, c, t, r]),
            _ => None,
        }
    }
}
