use serde::{Deserialize, Serialize};

use crate::infra::rng_seed::RngSeed;

/// Настройки движка (общие для всех столов реестра).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Базовый seed: из него выводится колода каждой раздачи,
    /// если вызывающая сторона не задала seed через shuffle_deck.
    pub rng_seed: u64,
    /// Хедз-ап: дилер ставит малый блайнд и ходит первым на префлопе.
    pub heads_up_dealer_posts_small_blind: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rng_seed: 0,
            heads_up_dealer_posts_small_blind: true,
        }
    }
}

impl EngineConfig {
    /// Разобрать конфиг из JSON. Отсутствующие поля берутся из `Default`.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn base_seed(&self) -> RngSeed {
        RngSeed::from_u64(self.rng_seed)
    }
}
