use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];
}

impl HandRank {
    /// Собрать HandRank из категории и значимых рангов (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Rank: 2..14 (2..A) влазит в 4 бита. Незначимые позиции заполнены нулями,
    /// поэтому сравнение u32 = сравнение категории, затем кикеров.
    pub fn from_category_and_ranks(category: HandCategory, ranks: &[Rank]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, r) in ranks.iter().take(5).enumerate() {
            value |= (*r as u32) << (16 - 4 * i as u32);
        }
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        let cat_id = ((self.0 >> 20) & 0x0F) as usize;
        HandCategory::ALL
            .get(cat_id)
            .copied()
            .unwrap_or(HandCategory::HighCard)
    }

    /// Значимые ранги (от старшего к младшему).
    pub fn ranks(&self) -> Vec<Rank> {
        (0..5)
            .map(|i| ((self.0 >> (16 - 4 * i)) & 0x0F) as u8)
            .filter_map(Rank::from_value)
            .collect()
    }
}

/// Удобная функция – получить категорию из HandRank.
pub fn hand_category(rank: HandRank) -> HandCategory {
    rank.category()
}

/// Человеческое описание руки по категории.
pub fn describe_hand(rank: HandRank) -> String {
    let name = match rank.category() {
        HandCategory::HighCard => "High card",
        HandCategory::OnePair => "One pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
    };
    match rank.ranks().first() {
        Some(top) => format!("{name} ({top})"),
        None => name.to_string(),
    }
}
