//! Key generation for email confirmation tokens.

use rand::{Rng, distributions::Alphanumeric};

/// Produces the opaque key stored on a confirmation token.
pub trait TokenGenerator: Send + Sync {
    fn generate_token(&self) -> String;
}

/// Random alphanumeric keys whose length is drawn from `min_length..=max_length`.
#[derive(Debug, Clone)]
pub struct RandomStringTokenGenerator {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for RandomStringTokenGenerator {
    fn default() -> Self {
        Self {
            min_length: 10,
            max_length: 50,
        }
    }
}

impl TokenGenerator for RandomStringTokenGenerator {
    fn generate_token(&self) -> String {
        let mut rng = rand::thread_rng();
        let min = self.min_length.max(1);
        let max = self.max_length.max(min);
        let length = rng.gen_range(min..=max);
        (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_respect_length_bounds() {
        let generator = RandomStringTokenGenerator::default();
        for _ in 0..200 {
            let key = generator.generate_token();
            assert!((10..=50).contains(&key.len()), "bad length {}", key.len());
            assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn degenerate_bounds_still_yield_a_key() {
        let generator = RandomStringTokenGenerator {
            min_length: 0,
            max_length: 0,
        };
        assert_eq!(generator.generate_token().len(), 1);
    }
}
