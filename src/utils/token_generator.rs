//! Random redirect token generation.
//!
//! Tokens are drawn from an alphanumeric alphabet so they can be embedded as a
//! single URL path segment without escaping. Generators are pure: uniqueness
//! against stored links is checked by
//! [`TokenService`](crate::application::services::TokenService).

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Characters a generated token may contain.
pub const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Source of candidate tokens.
///
/// Implementations need not guarantee uniqueness.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Fixed-length generator over [`TOKEN_ALPHABET`] backed by an owned RNG.
///
/// The RNG is injected so tests can seed it; production uses
/// [`RandomTokenGenerator::from_os_rng`].
pub struct RandomTokenGenerator<R = StdRng> {
    rng: Mutex<R>,
    length: usize,
}

impl RandomTokenGenerator<StdRng> {
    /// Generator seeded from the operating system's entropy source.
    pub fn from_os_rng(length: usize) -> Self {
        Self::with_rng(StdRng::from_os_rng(), length)
    }
}

impl<R: Rng + Send> RandomTokenGenerator<R> {
    pub fn with_rng(rng: R, length: usize) -> Self {
        Self {
            rng: Mutex::new(rng),
            length,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl<R: Rng + Send> TokenGenerator for RandomTokenGenerator<R> {
    fn generate(&self) -> String {
        // Poisoning is ignored: the RNG carries no invariant.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        (0..self.length)
            .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_has_requested_length() {
        let generator = RandomTokenGenerator::from_os_rng(5);
        assert_eq!(generator.generate().len(), 5);
        assert_eq!(generator.length(), 5);

        let generator = RandomTokenGenerator::from_os_rng(12);
        assert_eq!(generator.generate().len(), 12);
    }

    #[test]
    fn test_generate_uses_alphabet_only() {
        let generator = RandomTokenGenerator::from_os_rng(32);

        for _ in 0..100 {
            let token = generator.generate();
            assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_seeded_generators_are_reproducible() {
        let a = RandomTokenGenerator::with_rng(StdRng::seed_from_u64(42), 8);
        let b = RandomTokenGenerator::with_rng(StdRng::seed_from_u64(42), 8);

        for _ in 0..10 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_generate_rarely_repeats() {
        let generator = RandomTokenGenerator::with_rng(StdRng::seed_from_u64(7), 8);
        let tokens: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_generator_is_usable_as_trait_object() {
        let generator: Box<dyn TokenGenerator> =
            Box::new(RandomTokenGenerator::with_rng(StdRng::seed_from_u64(1), 6));

        assert_eq!(generator.generate().len(), 6);
    }
}
