use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Оценка руки Texas Hold'em: 2 карманные + 5 общих карт.
///
/// Чистая функция: одинаковый набор карт всегда даёт одинаковый ранг.
pub fn evaluate(hole1: Card, hole2: Card, community: &[Card; 5]) -> HandRank {
    let cards = [
        hole1,
        hole2,
        community[0],
        community[1],
        community[2],
        community[3],
        community[4],
    ];
    best_of_all_5card_combinations(&cards)
}

/// Лучшая 5-карточная рука из hole + board.
///
/// Работает для любых 5–7 карт; для другого количества `None`.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Option<HandRank> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);

    if !(5..=7).contains(&all_cards.len()) {
        return None;
    }
    Some(best_of_all_5card_combinations(&all_cards))
}

/// Перебираем все комбинации 5 карт из N (N=5–7) и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> HandRank {
    let n = cards.len();
    let mut best = HandRank(0);

    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        best = best.max(evaluate_5card_hand(&five));
                    }
                }
            }
        }
    }

    best
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let mut rank_counts = [0u8; 15]; // индексы 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards {
        rank_counts[card.rank as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = detect_straight(rank_mask);

    // Группы (кол-во, ранг): сначала по количеству, затем по рангу, по убыванию.
    let mut groups: Vec<(u8, Rank)> = (2u8..=14)
        .filter(|&v| rank_counts[v as usize] > 0)
        .filter_map(|v| Rank::from_value(v).map(|r| (rank_counts[v as usize], r)))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let pattern: Vec<u8> = groups.iter().map(|(count, _)| *count).collect();
    let ordered: Vec<Rank> = groups.iter().map(|(_, r)| *r).collect();

    let (category, ranks) = match (is_flush, straight_high, pattern.as_slice()) {
        (true, Some(high), _) => (HandCategory::StraightFlush, vec![high]),
        (_, _, [4, 1]) => (HandCategory::FourOfAKind, ordered),
        (_, _, [3, 2]) => (HandCategory::FullHouse, ordered),
        (true, None, _) => (HandCategory::Flush, ordered),
        (false, Some(high), _) => (HandCategory::Straight, vec![high]),
        (_, _, [3, 1, 1]) => (HandCategory::ThreeOfAKind, ordered),
        (_, _, [2, 2, 1]) => (HandCategory::TwoPair, ordered),
        (_, _, [2, 1, 1, 1]) => (HandCategory::OnePair, ordered),
        _ => (HandCategory::HighCard, ordered),
    };

    HandRank::from_category_and_ranks(category, &ranks)
}
