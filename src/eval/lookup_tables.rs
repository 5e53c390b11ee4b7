use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маски всех стритов, индекс = (старшая карта - 5).
/// 0: wheel A2345, 9: broadway TJQKA.
pub const STRAIGHT_MASKS: [RankMask; 10] = build_straight_masks();

const fn build_straight_masks() -> [RankMask; 10] {
    let mut masks = [0u16; 10];
    // Wheel: A,2,3,4,5.
    masks[0] = 0b1_0000_0000_1111;
    let mut i = 1;
    while i < 10 {
        // Пять подряд начиная с ранга (i + 2), т.е. бита (i - 1).
        masks[i] = 0b1_1111 << (i - 1);
        i += 1;
    }
    masks
}

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank as u8 - 2)
}

/// Найти стрит в битовой маске рангов.
/// Возвращает старшую карту стрита, если он есть.
///
/// Особый случай: wheel (A2345) → возвращаем Rank::Five.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, sm)| rank_mask & **sm == **sm)
        .and_then(|(i, _)| Rank::from_value(i as u8 + 5))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(ranks: &[Rank]) -> RankMask {
        ranks.iter().fold(0, |m, r| m | rank_to_bit(*r))
    }

    #[test]
    fn wheel_and_broadway() {
        use Rank::*;
        assert_eq!(detect_straight(mask(&[Ace, Two, Three, Four, Five])), Some(Five));
        assert_eq!(detect_straight(mask(&[Ten, Jack, Queen, King, Ace])), Some(Ace));
        assert_eq!(
            detect_straight(mask(&[Ace, Two, Three, Four, Five, Six])),
            Some(Six)
        );
        assert_eq!(detect_straight(mask(&[Ace, King, Queen, Jack, Nine])), None);
    }
}
