//! Short code generation.
//!
//! Codes are 8 characters drawn uniformly, with replacement, from the base-62
//! alphabet `[a-zA-Z0-9]`. Codes identify links; they are not secrets, so a
//! fast non-cryptographic RNG is sufficient.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Number of characters in every generated code.
pub const CODE_LENGTH: usize = 8;

/// The base-62 alphabet codes are drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of candidate short codes.
///
/// Injected into the shortening service so tests can script exact codes,
/// including deliberate collisions.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Draws a code from the given RNG.
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` has the shape of a generated code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Production generator backed by the thread-local RNG.
///
/// Each worker thread draws from its own generator, so concurrent calls need
/// no locking.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code_with(&mut rand::rng())
    }
}

/// Deterministic generator for replayable runs.
///
/// Draws are serialized through a mutex around a single seeded RNG.
#[derive(Debug)]
pub struct SeededCodeGenerator {
    rng: Mutex<StdRng>,
}

impl SeededCodeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CodeGenerator for SeededCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        generate_code_with(&mut *rng)
    }
}
