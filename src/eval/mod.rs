//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate(hole1, hole2, board) -> HandRank`
//!   `evaluate_best_hand(hole, board) -> Option<HandRank>`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate, evaluate_best_hand};
pub use hand_rank::{describe_hand, hand_category, HandCategory};
