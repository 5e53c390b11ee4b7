//! Инфраструктурный слой вокруг движка:
//! - генерация ID столов;
//! - детерминированный RNG и seed раздачи;
//! - конфиг движка.

pub mod config;
pub mod ids;
pub mod rng;
pub mod rng_seed;

pub use config::EngineConfig;
pub use ids::*;
pub use rng::*;
pub use rng_seed::RngSeed;
