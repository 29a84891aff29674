// src/generation/seed.rs

use chrono::Local;
use log::info;

use crate::generation::GenerationConfig;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Makes sure `config.seed` holds the token this generation will use.
///
/// When a fresh seed is requested (or none was given) the current local
/// time is written back into the config, so the run can be repeated later
/// by turning `use_random_seed` off.
pub fn resolve(config: &mut GenerationConfig) -> &str {
    if config.wants_fresh_seed() {
        config.seed = clock_seed();
        info!("Derived fresh seed {:?}", config.seed);
    }
    &config.seed
}

/// Collapses a seed token into a stable 64-bit value (FNV-1a over its UTF-8 bytes).
///
/// The value does not depend on the platform or the compiler version.
pub fn expand(token: &str) -> u64 {
    fnv1a(FNV_OFFSET_BASIS, token.as_bytes())
}

fn clock_seed() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

fn fnv1a(mut state: u64, bytes: &[u8]) -> u64 {
    for byte in bytes {
        state ^= u64::from(*byte);
        state = state.wrapping_mul(FNV_PRIME);
    }
    state
}
