//! # Share Codes
//!
//! Six characters from `A-Z0-9`, each drawn independently from a
//! non-cryptographic RNG. Nothing here checks for collisions: two calls can
//! return the same code, and only a unique column in the record store will
//! notice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::traits::CodeGenerator;

pub const CODE_LENGTH: usize = 6;
pub const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draws one code from `rng`.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Whether `code` has the shape `generate_code` produces.
/// Lookups never reject on this; it only feeds log output.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

/// Production generator backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodes;

impl CodeGenerator for RandomCodes {
    fn generate(&self) -> String {
        generate_code(&mut rand::thread_rng())
    }
}

/// Deterministic generator for tests and reproducible runs.
pub struct SeededCodes {
    rng: Mutex<StdRng>,
}

impl SeededCodes {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CodeGenerator for SeededCodes {
    fn generate(&self) -> String {
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        generate_code(&mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_have_expected_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()), "{code}");
        }
    }

    #[test]
    fn test_random_codes_are_well_formed() {
        let code = RandomCodes.generate();
        assert!(is_well_formed(&code), "{code}");
    }

    #[test]
    fn test_seeded_codes_repeat_per_seed() {
        let a = SeededCodes::new(42);
        let b = SeededCodes::new(42);
        let first: Vec<String> = (0..5).map(|_| a.generate()).collect();
        let second: Vec<String> = (0..5).map(|_| b.generate()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("A1B2C3"));
        assert!(is_well_formed("000000"));
        assert!(!is_well_formed("a1b2c3"));
        assert!(!is_well_formed("A1B2C"));
        assert!(!is_well_formed("A1B2C3D"));
        assert!(!is_well_formed("A1-2C3"));
    }
}
