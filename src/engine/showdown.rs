//! Шоудаун: оценка рук претендентов и распределение банка по сайд-потам.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{Chips, HandRank, PlayerId, SeatIndex, Table, TableStatus};
use crate::engine::errors::EngineError;
use crate::engine::events::TableEvent;
use crate::engine::lifecycle::is_table_ready_to_start;
use crate::engine::positions::seats_clockwise_after;
use crate::engine::side_pots::{collect_contributions, compute_side_pots, SidePot};
use crate::eval::evaluate;

/// Рука претендента на шоудауне.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub rank: HandRank,
}

/// Выплата одного пота одному победителю.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub pot_index: usize,
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub amount: Chips,
    /// `None`: банк никто не оспаривал, руки не вскрывались.
    pub hand_rank: Option<HandRank>,
}

/// Оценить руки всех претендентов. Нужны шоудаун, полный борд и минимум двое в раздаче.
pub fn evaluate_hands(table: &Table) -> Result<Vec<HandResult>, EngineError> {
    if table.status != TableStatus::Showdown {
        return Err(EngineError::ShowdownNotReached);
    }
    if table.contenders().count() < 2 {
        return Err(EngineError::UncontestedPot);
    }
    let board = table
        .community
        .full_board()
        .ok_or(EngineError::ShowdownNotReached)?;

    Ok(table
        .contenders()
        .filter_map(|p| {
            p.hole_cards.map(|[c1, c2]| HandResult {
                seat: p.position,
                player_id: p.player_id,
                rank: evaluate(c1, c2, &board),
            })
        })
        .collect())
}

/// Распределить банк.
///
/// Каждый сайд-пот делится поровну между лучшими руками среди претендентов пота;
/// лишние фишки по одной раздаются победителям по кругу, начиная слева от дилера.
/// Неоспоренный банк целиком уходит единственному претенденту.
/// Если претендентов не осталось, раздача просто закрывается.
pub fn distribute_pot(table: &mut Table) -> Result<(Vec<Payout>, Vec<TableEvent>), EngineError> {
    if table.status != TableStatus::Showdown {
        return Err(EngineError::ShowdownNotReached);
    }

    let contenders: Vec<(SeatIndex, PlayerId)> = table
        .contenders()
        .map(|p| (p.position, p.player_id))
        .collect();

    let (pots, payouts) = match contenders.as_slice() {
        [] => {
            warn!(
                table_id = table.id,
                game_number = table.game_number,
                pot = table.pot_total.0,
                "showdown without contenders, closing hand"
            );
            (Vec::new(), Vec::new())
        }
        [(seat, player_id)] => {
            let amount = table.pot_total;
            let pot = SidePot {
                amount,
                eligible_players: vec![*seat],
            };
            let payout = Payout {
                pot_index: 0,
                seat: *seat,
                player_id: *player_id,
                amount,
                hand_rank: None,
            };
            (vec![pot], vec![payout])
        }
        _ => {
            let ranks: HashMap<SeatIndex, HandRank> = evaluate_hands(table)?
                .into_iter()
                .map(|r| (r.seat, r.rank))
                .collect();
            let pots = compute_side_pots(&collect_contributions(table));
            let payouts = split_pots(table, &pots, &ranks);
            (pots, payouts)
        }
    };

    let mut events = Vec::with_capacity(payouts.len() + 1);
    for payout in &payouts {
        if let Some(player) = table.player_mut(payout.seat) {
            player.stack += payout.amount;
        }
        events.push(TableEvent::PotDistributed {
            winner: payout.player_id,
            amount: payout.amount,
            hand_rank: payout.hand_rank.map_or(0, |r| r.0),
        });
    }

    let paid: Chips = payouts.iter().map(|p| p.amount).sum();
    info!(
        table_id = table.id,
        game_number = table.game_number,
        pots = pots.len(),
        paid = paid.0,
        "pot distributed"
    );

    table.pot_total = Chips::ZERO;
    table.side_pots = pots;
    events.extend(close_hand(table));

    Ok((payouts, events))
}

/// Завершить раздачу: `Complete`, если можно начинать следующую, иначе `Waiting`.
pub(crate) fn close_hand(table: &mut Table) -> Option<TableEvent> {
    table.current_player_position = None;
    table.status = TableStatus::Complete;
    if is_table_ready_to_start(table) {
        Some(TableEvent::GameReadyToStart {
            player_count: table.funded_count() as u8,
        })
    } else {
        table.status = TableStatus::Waiting;
        None
    }
}

fn split_pots(
    table: &Table,
    pots: &[SidePot],
    ranks: &HashMap<SeatIndex, HandRank>,
) -> Vec<Payout> {
    let dealer = table.dealer_position.unwrap_or(0);
    // Порядок для лишних фишек: первый слева от дилера, дилер последний.
    let order = seats_clockwise_after(table, dealer, |_| true);

    let mut payouts = Vec::new();
    for (pot_index, pot) in pots.iter().enumerate() {
        let Some(best) = pot
            .eligible_players
            .iter()
            .filter_map(|s| ranks.get(s))
            .max()
            .copied()
        else {
            continue;
        };

        let winners: Vec<SeatIndex> = order
            .iter()
            .copied()
            .filter(|s| pot.eligible_players.contains(s) && ranks.get(s) == Some(&best))
            .collect();

        let (share, remainder) = pot.amount.split(winners.len() as u64);
        for (i, seat) in winners.iter().enumerate() {
            let extra = if (i as u64) < remainder.0 { Chips(1) } else { Chips::ZERO };
            let player_id = table.player(*seat).map_or(0, |p| p.player_id);
            payouts.push(Payout {
                pot_index,
                seat: *seat,
                player_id,
                amount: share + extra,
                hand_rank: Some(best),
            });
        }
    }
    payouts
}
