//! Движок стола: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `TableRegistry`
//! Основные операции над одним столом:
//!   - `lifecycle::start_game` – запустить новую раздачу
//!   - `betting::player_action` – применить действие игрока
//!   - `betting::advance_betting_round` – переход на следующую улицу
//!   - `showdown::distribute_pot` – выплаты по сайд-потам

pub mod actions;
pub mod betting;
pub mod dealing;
pub mod errors;
pub mod events;
pub mod lifecycle;
pub mod positions;
pub mod showdown;
pub mod side_pots;
pub mod table_manager;
pub mod validation;

pub use actions::{ActionKind, PlayerAction};
pub use errors::{EngineError, ErrorKind};
pub use events::{EventLog, EventRecord, TableEvent};
pub use showdown::{HandResult, Payout};
pub use side_pots::SidePot;
pub use table_manager::{ManagedTable, TableRegistry};

/// RNG интерфейс для engine.
/// Детерминированная реализация: `infra::rng::DeterministicRng`.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
