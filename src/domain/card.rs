use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Идентификатор карты в колоде: 0..=51.
///
/// Раскладка: `id = suit * 13 + (rank - 2)`, т.е. 0..12: трефы 2..A,
/// 13..25: бубны, 26..38: червы, 39..51: пики.
pub type CardId = u8;

/// Количество карт в стандартной колоде.
pub const DECK_SIZE: usize = 52;

/// Масть карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn index(self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }
}

/// Ранг карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Ранг по числовому значению 2..=14.
    pub fn from_value(v: u8) -> Option<Rank> {
        if (2..=14).contains(&v) {
            Some(Rank::ALL[(v - 2) as usize])
        } else {
            None
        }
    }
}

/// Обычная покерная карта (52-карточная колода).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Карта по идентификатору 0..=51. `None` для значений вне колоды.
    pub fn from_id(id: CardId) -> Option<Card> {
        if id as usize >= DECK_SIZE {
            return None;
        }
        let suit = Suit::ALL[(id / 13) as usize];
        let rank = Rank::ALL[(id % 13) as usize];
        Some(Card { rank, suit })
    }

    pub fn id(&self) -> CardId {
        self.suit.index() * 13 + (self.rank as u8 - 2)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "Ah", "Td", "7c".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (r_ch, s_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err("Card string must have length 2".into()),
        };

        let rank = match r_ch {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            'A' | 'a' => Rank::Ace,
            _ => return Err(format!("Invalid rank: {r_ch}")),
        };

        let suit = match s_ch {
            'c' | 'C' => Suit::Clubs,
            'd' | 'D' => Suit::Diamonds,
            'h' | 'H' => Suit::Hearts,
            's' | 'S' => Suit::Spades,
            _ => return Err(format!("Invalid suit: {s_ch}")),
        };

        Ok(Card { rank, suit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_cover_whole_deck_once() {
        let mut seen = [false; DECK_SIZE];
        for id in 0..DECK_SIZE as u8 {
            let card = Card::from_id(id).unwrap();
            assert_eq!(card.id(), id);
            seen[id as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
        assert!(Card::from_id(52).is_none());
    }

    #[test]
    fn parse_and_display() {
        let c: Card = "Td".parse().unwrap();
        assert_eq!(c, Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!(c.to_string(), "Td");
        assert!("T".parse::<Card>().is_err());
        assert!("Tdx".parse::<Card>().is_err());
        assert!("Xd".parse::<Card>().is_err());
    }
}
