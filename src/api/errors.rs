use serde::{Deserialize, Serialize};

use crate::engine::errors::{EngineError, ErrorKind};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Некорректные параметры команды (конфиг, бай-ин, игрок не за столом).
    Validation(String),

    /// Команда не может быть выполнена в текущем состоянии стола.
    InvalidState(String),

    /// Стол занят другой операцией: запрос можно повторить.
    Conflict(String),
}

impl ApiError {
    /// Класс ошибки. Битый запрос считаем ошибкой валидации.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::InvalidState(_) => ErrorKind::State,
            ApiError::Conflict(_) => ErrorKind::ConcurrencyConflict,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Validation => ApiError::Validation(message),
            ErrorKind::State => ApiError::InvalidState(message),
            ErrorKind::ConcurrencyConflict => ApiError::Conflict(message),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
