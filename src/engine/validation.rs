use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::table::Table;
use crate::engine::actions::{ActionKind, PlayerAction};
use crate::engine::errors::EngineError;

/// Действие после проверки: сколько фишек реально уходит в банк
/// и каким типом его записать (call на остаток стека становится all-in).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAction {
    pub kind: ActionKind,
    pub commit: Chips,
}

impl ResolvedAction {
    fn new(kind: ActionKind, commit: Chips) -> Self {
        Self { kind, commit }
    }
}

/// Минимальный уровень, до которого можно поставить или повысить на этой улице.
pub fn min_raise_to(table: &Table) -> Chips {
    table.current_bet + table.last_raise_amount.max(table.config.big_blind)
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
pub fn diff_to_call(player: &Player, table: &Table) -> Chips {
    table.current_bet.saturating_sub(player.current_bet)
}

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
///
/// Очередь хода проверяет вызывающий код; здесь только правила торговли.
/// Нехватка фишек не ошибка: call и ставка больше стека превращаются в all-in.
pub fn validate_action(
    player: &Player,
    action: &PlayerAction,
    table: &Table,
) -> Result<ResolvedAction, EngineError> {
    if !player.can_bet() {
        return Err(EngineError::PlayerCannotAct(player.position));
    }

    let stack = player.stack;
    let to_call = diff_to_call(player, table);
    // Игрок уже ходил, а ставка выросла: значит, был только короткий all-in,
    // торговля для него не переоткрыта.
    let not_reopened = player.has_acted && !to_call.is_zero();

    match action {
        PlayerAction::Fold => Ok(ResolvedAction::new(ActionKind::Fold, Chips::ZERO)),

        PlayerAction::Check => {
            if to_call.is_zero() {
                Ok(ResolvedAction::new(ActionKind::Check, Chips::ZERO))
            } else {
                Err(EngineError::CannotCheck { to_call })
            }
        }

        PlayerAction::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else if stack <= to_call {
                // Call на весь стек.
                Ok(ResolvedAction::new(ActionKind::AllIn, stack))
            } else {
                Ok(ResolvedAction::new(ActionKind::Call, to_call))
            }
        }

        PlayerAction::Bet(target) => {
            if !table.current_bet.is_zero() {
                return Err(EngineError::BetNotAllowed);
            }
            resolve_raise_to(player, table, *target, ActionKind::Bet)
        }

        PlayerAction::Raise(target) => {
            if table.current_bet.is_zero() {
                // Когда нет ставки – это bet, а не raise.
                return Err(EngineError::RaiseNotAllowed);
            }
            if not_reopened {
                return Err(EngineError::ActionNotReopened(player.position));
            }
            resolve_raise_to(player, table, *target, ActionKind::Raise)
        }

        PlayerAction::AllIn => {
            if not_reopened && stack > to_call {
                return Err(EngineError::ActionNotReopened(player.position));
            }
            Ok(ResolvedAction::new(ActionKind::AllIn, stack))
        }
    }
}

/// Bet/Raise "до" `target`. Цель не меньше всего стека: это all-in,
/// иначе она должна дотягивать до минимального рейза.
fn resolve_raise_to(
    player: &Player,
    table: &Table,
    target: Chips,
    kind: ActionKind,
) -> Result<ResolvedAction, EngineError> {
    let all_in_level = player.current_bet + player.stack;
    if target >= all_in_level {
        return Ok(ResolvedAction::new(ActionKind::AllIn, player.stack));
    }

    let minimum = min_raise_to(table);
    if target < minimum {
        return Err(EngineError::RaiseTooSmall {
            minimum,
            attempted: target,
        });
    }

    Ok(ResolvedAction::new(kind, target - player.current_bet))
}
