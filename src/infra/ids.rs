use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::TableId;

/// Генерация ID столов на основе монотонного счётчика.
///
/// Счётчик атомарный: создание столов не требует общей блокировки реестра.
#[derive(Debug)]
pub struct IdGenerator {
    table_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор; первый выданный ID: 1.
    pub fn new() -> Self {
        Self {
            table_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_table_id(&self) -> TableId {
        self.table_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
