use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, CardId, DECK_SIZE};

/// Колода текущей раздачи стола.
///
/// `cards`: перестановка всех 52 карт, `next_card_index`: сколько карт уже
/// выдано сверху. Перемешивание делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameDeck {
    pub cards: Vec<Card>,
    pub next_card_index: u8,
    /// Seed, из которого получена текущая перестановка.
    pub seed: u64,
}

impl GameDeck {
    /// Неперемешанная колода в порядке идентификаторов 0..=51.
    pub fn standard_52() -> Self {
        let cards = (0..DECK_SIZE as CardId).filter_map(Card::from_id).collect();
        Self {
            cards,
            next_card_index: 0,
            seed: 0,
        }
    }

    /// Вернуть колоду в исходный порядок перед новой тасовкой.
    pub fn reset(&mut self, seed: u64) {
        *self = GameDeck::standard_52();
        self.seed = seed;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.next_card_index as usize)
    }

    /// Выдать `n` карт сверху. Если карт не хватает, `None` и колода не меняется.
    pub fn issue(&mut self, n: usize) -> Option<Vec<Card>> {
        if self.remaining() < n {
            return None;
        }
        let start = self.next_card_index as usize;
        let taken = self.cards[start..start + n].to_vec();
        self.next_card_index += n as u8;
        Some(taken)
    }

    /// Уже выданные в этой раздаче карты.
    pub fn issued(&self) -> &[Card] {
        &self.cards[..self.next_card_index as usize]
    }

    /// Идентификаторы карт в порядке колоды (для аудита тасовки).
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(Card::id).collect()
    }
}

impl Default for GameDeck {
    fn default() -> Self {
        GameDeck::standard_52()
    }
}
