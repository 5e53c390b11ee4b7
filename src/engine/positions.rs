use crate::domain::{Player, SeatIndex, Table};

/// Найти следующее место по кругу (включая/исключая start), где сидит игрок,
/// удовлетворяющий `pred`.
pub fn next_seat_where(
    table: &Table,
    start: SeatIndex,
    include_start: bool,
    pred: impl Fn(&Player) -> bool,
) -> Option<SeatIndex> {
    let max = table.seats.len();
    if max == 0 {
        return None;
    }

    let mut idx = start as usize % max;
    if !include_start {
        idx = (idx + 1) % max;
    }

    for _ in 0..max {
        if let Some(p) = table.seats[idx].as_ref() {
            if pred(p) {
                return Some(idx as SeatIndex);
            }
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Следующее занятое место по кругу.
pub fn next_occupied_seat(table: &Table, start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    next_seat_where(table, start, include_start, |_| true)
}

/// Все места с игроками, удовлетворяющими `pred`, по часовой стрелке,
/// начиная со следующего после `start`. Сам `start` идёт последним.
pub fn seats_clockwise_after(
    table: &Table,
    start: SeatIndex,
    pred: impl Fn(&Player) -> bool,
) -> Vec<SeatIndex> {
    let max = table.seats.len();
    let mut seats = Vec::new();
    if max == 0 {
        return seats;
    }

    let mut idx = (start as usize + 1) % max;
    for _ in 0..max {
        if let Some(p) = table.seats[idx].as_ref() {
            if pred(p) {
                seats.push(idx as SeatIndex);
            }
        }
        idx = (idx + 1) % max;
    }

    seats
}

/// Предложить следующую позицию дилера среди игроков с фишками:
/// - если кнопка уже была – следующее по кругу место (даже если старое место опустело);
/// - если нет – первое подходящее место с нуля.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    let funded = |p: &Player| !p.stack.is_zero();
    match table.dealer_position {
        Some(button) => next_seat_where(table, button, false, funded),
        None => next_seat_where(table, 0, true, funded),
    }
}

/// Места малого и большого блайнда для раздачи с кнопкой `dealer`.
///
/// Обычно SB ставит первый участник раздачи слева от дилера, BB следующий за ним.
/// В хедз-апе по умолчанию дилер сам ставит малый блайнд.
pub fn blind_seats(table: &Table, dealer: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    let in_hand = seats_clockwise_after(table, dealer, Player::is_contender);
    match in_hand.len() {
        0 | 1 => None,
        2 => {
            // in_hand = [другой игрок, дилер]
            let other = in_hand[0];
            if table.heads_up_dealer_posts_small_blind {
                Some((dealer, other))
            } else {
                Some((other, dealer))
            }
        }
        _ => Some((in_hand[0], in_hand[1])),
    }
}
