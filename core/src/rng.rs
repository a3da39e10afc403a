//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through StreamRng instances derived from
//! the single master seed held by the DatasetGenerator.
//!
//! Each table gets its own RNG stream, seeded deterministically
//! from (master_seed XOR table_index). This means:
//!   - Adding a new table never changes existing tables' streams.
//!   - Each table's stream is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single table's generation pass.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the master seed and a stable
    /// table index. The index must never change once assigned.
    pub fn new(master_seed: u64, table_index: u64) -> Self {
        let derived_seed = master_seed ^ (table_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform draw in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Standard normal draw via Box-Muller.
    pub fn standard_normal(&mut self) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }

    /// Normal draw with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }

    /// Log-normal draw: exp of a normal(mu, sigma) variate.
    pub fn log_normal(&mut self, mu: f64, sigma: f64) -> f64 {
        self.normal(mu, sigma).exp()
    }

    /// Exponential draw with the given mean (inverse rate).
    pub fn exponential(&mut self, mean: f64) -> f64 {
        let u = self.next_f64();
        -mean * (1.0 - u).ln()
    }

    /// Poisson draw (Knuth's multiplication method). Fine for the
    /// small lambdas used here; cost grows linearly with lambda.
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        let limit = (-lambda).exp();
        let mut k = 0u64;
        let mut p = 1.0f64;
        loop {
            p *= self.next_f64();
            if p <= limit {
                return k;
            }
            k += 1;
        }
    }

    /// Pick one element from a non-empty slice, uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }

    /// Sample an index from a categorical distribution. Weights need
    /// not sum to 1.0; the last index absorbs rounding remainder.
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        assert!(!weights.is_empty(), "weights must be non-empty");
        let total: f64 = weights.iter().sum();
        let roll = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if roll < cumulative {
                return i;
            }
        }
        weights.len() - 1
    }
}

/// All table RNG streams for one generator, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_table(&self, slot: TableSlot) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable table slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every table's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum TableSlot {
    Customer = 0,
    Deal = 1,
    Feedback = 2,
    // Add new tables here — append only.
}

impl TableSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Deal => "deal",
            Self::Feedback => "feedback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let bank_a = RngBank::new(42);
        let bank_b = RngBank::new(42);
        let mut a = bank_a.for_table(TableSlot::Customer);
        let mut b = bank_b.for_table(TableSlot::Customer);
        for _ in 0..256 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn streams_are_independent_per_slot() {
        let bank = RngBank::new(42);
        let mut customer = bank.for_table(TableSlot::Customer);
        let mut deal = bank.for_table(TableSlot::Deal);
        let diverged = (0..32).any(|_| customer.next_f64() != deal.next_f64());
        assert!(diverged, "Customer and deal streams should not coincide");
    }

    #[test]
    fn poisson_stays_small_for_small_lambda() {
        let bank = RngBank::new(7);
        let mut rng = bank.for_table(TableSlot::Deal);
        for _ in 0..1000 {
            let k = rng.poisson(1.5);
            assert!(k < 20, "Poisson(1.5) draw implausibly large: {k}");
        }
    }

    #[test]
    fn weighted_index_respects_degenerate_weights() {
        let bank = RngBank::new(9);
        let mut rng = bank.for_table(TableSlot::Customer);
        for _ in 0..100 {
            assert_eq!(rng.weighted_index(&[0.0, 1.0, 0.0]), 1);
        }
    }

    #[test]
    fn uniform_stays_in_range() {
        let bank = RngBank::new(11);
        let mut rng = bank.for_table(TableSlot::Feedback);
        for _ in 0..1000 {
            let x = rng.uniform(0.4, 0.6);
            assert!((0.4..0.6).contains(&x));
        }
    }
}
