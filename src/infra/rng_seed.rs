//! RngSeed: доменный seed для тасовки колоды.
//!
//! Позволяет:
//!   - хранить базовый seed движка;
//!   - детерминированно выводить seed раздачи:
//!         new = H(domain || base || table_id || game_number)
//!
//! Одинаковые (base, table_id, game_number) всегда дают одну и ту же колоду.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    /// Seed из u64 (конфиг движка, тесты).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Доменное хэш-расширение для конкретной раздачи стола.
    pub fn derive(&self, table_id: u64, game_number: u64) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(b"HOLDEM_TABLE_DECK_V1");
        hasher.update(self.bytes);
        hasher.update(table_id.to_le_bytes());
        hasher.update(game_number.to_le_bytes());

        let hash = hasher.finalize();

        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    /// Первые 8 байт как u64: seed, который записывается в GameDeck.
    pub fn to_u64(&self) -> u64 {
        let mut b = [0u8; 8];
        b.copy_from_slice(&self.bytes[..8]);
        u64::from_le_bytes(b)
    }
}
