//! Движок стола Texas Hold'em для Linera.
//!
//! Здесь описываем ABI (Operation / Message / Query / Response) и
//! связываем его с командами и запросами `api`.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, CommandResponse, Query, QueryResponse};

/// Операции (внешние команды), которые модуль принимает.
///
/// Одна операция = одна команда из api::Command = один переход состояния.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum HoldemOperation {
    Command(Command),
}

/// Сообщения между приложениями Linera.
/// Столы живут в одной цепочке: сообщений нет.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum HoldemMessage {}

/// Запросы к сервису (read-only).
pub type HoldemQuery = Query;

/// Ответы на запросы.
pub type HoldemResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct HoldemAbi;

impl ContractAbi for HoldemAbi {
    type Operation = HoldemOperation;
    type Response = Result<CommandResponse, api::ApiError>;
}

impl ServiceAbi for HoldemAbi {
    type Query = HoldemQuery;
    type QueryResponse = Result<HoldemResponse, api::ApiError>;
}

/// Выполнить операцию контракта на реестре столов.
pub fn execute_operation(
    registry: &engine::TableRegistry,
    operation: HoldemOperation,
) -> Result<CommandResponse, api::ApiError> {
    match operation {
        HoldemOperation::Command(command) => registry.execute(command).map_err(Into::into),
    }
}

/// Ответить на запрос сервиса.
pub fn handle_query(
    registry: &engine::TableRegistry,
    query: HoldemQuery,
) -> Result<HoldemResponse, api::ApiError> {
    registry.query(query).map_err(Into::into)
}
