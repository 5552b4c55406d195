//! Configuration for a scavenging session.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for a scavenging session.
#[derive(Debug, Clone, Default)]
pub struct ScavengeConfig {
    /// RNG seed for reproducible rolls. `None` draws fresh entropy.
    pub seed: Option<u64>,
}

impl ScavengeConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the RNG this configuration asks for.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn default_is_unseeded() {
        assert!(ScavengeConfig::default().seed.is_none());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let cfg = ScavengeConfig::default().with_seed(123);
        assert_eq!(cfg.seed, Some(123));
        let a: u64 = cfg.rng().random();
        let b: u64 = cfg.rng().random();
        assert_eq!(a, b);
    }
}
