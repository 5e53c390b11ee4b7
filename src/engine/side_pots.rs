use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex, Table};

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Места игроков, претендующих на этот пот (по возрастанию).
    pub eligible_players: Vec<SeatIndex>,
}

/// Вклад одного участника раздачи.
///
/// `seat == None`: фишки игрока, который уже ушёл из-за стола.
/// `live == false`: игрок сфолдил, фишки в банке, права на банк нет.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub seat: Option<SeatIndex>,
    pub amount: Chips,
    pub live: bool,
}

/// Собрать вклады всех участников текущей раздачи стола.
pub fn collect_contributions(table: &Table) -> Vec<Contribution> {
    let mut out: Vec<Contribution> = table
        .players()
        .filter(|p| p.is_contender() || !p.total_contributed.is_zero())
        .map(|p| Contribution {
            seat: Some(p.position),
            amount: p.total_contributed,
            live: p.is_contender(),
        })
        .collect();

    out.extend(table.dead_money.iter().map(|d| Contribution {
        seat: None,
        amount: d.amount,
        live: false,
    }));

    out
}

/// Посчитать сайд-поты из сумм, которые внесли игроки.
///
/// Уровни вкладов сортируются по возрастанию; каждый слой
/// `(level - prev) * число внёсших >= level` образует пот, на который
/// претендуют несфолдившие игроки с вкладом >= level. Слой без претендентов
/// (мёртвые фишки выше любого живого вклада) присоединяется к предыдущему поту.
/// Сумма потов всегда равна сумме вкладов.
pub fn compute_side_pots(contributions: &[Contribution]) -> Vec<SidePot> {
    let mut levels: Vec<Chips> = contributions
        .iter()
        .filter(|c| !c.amount.is_zero())
        .map(|c| c.amount)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::new();
    let mut prev_level = Chips::ZERO;
    // Фишки слоёв, на которые пока некому претендовать.
    let mut orphaned = Chips::ZERO;

    for level in levels {
        let level_diff = level - prev_level;
        let contributors = contributions.iter().filter(|c| c.amount >= level).count() as u64;

        let mut eligible: Vec<SeatIndex> = contributions
            .iter()
            .filter(|c| c.live && c.amount >= level)
            .filter_map(|c| c.seat)
            .collect();
        eligible.sort_unstable();

        let layer = Chips(level_diff.0 * contributors);

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(last) => last.amount += layer,
                None => orphaned += layer,
            }
        } else {
            match pots.last_mut() {
                // Тот же состав претендентов: это продолжение того же пота.
                Some(last) if last.eligible_players == eligible => last.amount += layer + orphaned,
                _ => pots.push(SidePot {
                    amount: layer + orphaned,
                    eligible_players: eligible,
                }),
            }
            orphaned = Chips::ZERO;
        }

        prev_level = level;
    }

    if !orphaned.is_zero() {
        // Никто из живых ничего не внёс: весь банк делят живые игроки.
        let mut live: Vec<SeatIndex> = contributions
            .iter()
            .filter(|c| c.live)
            .filter_map(|c| c.seat)
            .collect();
        live.sort_unstable();
        if !live.is_empty() {
            pots.push(SidePot {
                amount: orphaned,
                eligible_players: live,
            });
        }
    }

    pots
}
