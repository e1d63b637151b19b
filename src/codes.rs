//! Random codes attached to orders.
//!
//! A [`CodeGenerator`] owns its RNG outright. Nothing in the crate shares one between
//! tasks; a component that needs codes gets its own generator, usually via
//! [`CodeGenerator::fork`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces display codes (`#NBO12345`) and one-time handshake codes (`4821`).
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    rng: StdRng,
    prefix: String,
}

impl CodeGenerator {
    /// Generator seeded from the operating system.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            prefix: prefix.into(),
        }
    }

    /// Deterministic generator for tests and reproducible demos.
    pub fn seeded(prefix: impl Into<String>, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            prefix: prefix.into(),
        }
    }

    /// Independent generator derived from this one. Deterministic if this one is seeded.
    pub fn fork(&mut self) -> Self {
        Self {
            rng: StdRng::from_rng(&mut self.rng),
            prefix: self.prefix.clone(),
        }
    }

    /// Prefix followed by five digits, 10000 through 99999.
    pub fn display_code(&mut self) -> String {
        let suffix: u32 = self.rng.random_range(10_000..=99_999);
        format!("{}{}", self.prefix, suffix)
    }

    /// Four digits, 1000 through 9999.
    pub fn one_time_code(&mut self) -> String {
        let code: u16 = self.rng.random_range(1_000..=9_999);
        format!("{code:04}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_code_shape() {
        let mut codes = CodeGenerator::seeded("#NBO", 7);
        for _ in 0..200 {
            let code = codes.display_code();
            let digits = code.strip_prefix("#NBO").unwrap();
            assert_eq!(digits.len(), 5);
            let n: u32 = digits.parse().unwrap();
            assert!((10_000..=99_999).contains(&n));
        }
    }

    #[test]
    fn test_one_time_code_shape() {
        let mut codes = CodeGenerator::seeded("#NBO", 7);
        for _ in 0..200 {
            let code = codes.one_time_code();
            assert_eq!(code.len(), 4);
            let n: u16 = code.parse().unwrap();
            assert!((1_000..=9_999).contains(&n));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = CodeGenerator::seeded("#NBO", 42);
        let mut b = CodeGenerator::seeded("#NBO", 42);
        assert_eq!(a.display_code(), b.display_code());
        assert_eq!(a.one_time_code(), b.one_time_code());

        let mut fork_a = a.fork();
        let mut fork_b = b.fork();
        assert_eq!(fork_a.display_code(), fork_b.display_code());
    }

    #[test]
    fn test_prefix_is_configurable() {
        let mut codes = CodeGenerator::seeded("#XYZ", 1);
        assert!(codes.display_code().starts_with("#XYZ"));
    }
}
