use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::engine::RandomSource;

/// Детерминированный RNG для тасовки колоды.
///
/// ChaCha8 даёт одинаковую последовательность на любой платформе (в т.ч. wasm32),
/// поэтому колоду можно воспроизвести по seed при аудите раздачи.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: ChaCha8Rng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    /// Fisher–Yates поверх потока ChaCha8.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
