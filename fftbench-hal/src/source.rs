use rand::Rng;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

const MAXF64: f64 = 9007199254740992.0;

pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Seeds from the thread-local OS-seeded generator: successive runs see
    /// different data.
    pub fn from_entropy() -> Source {
        let seed: [u8; 32] = rand::rng().random();
        Source::new(seed)
    }

    pub fn from_u64(seed: u64) -> Source {
        Source {
            source: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn branch(&mut self) -> ([u8; 32], Self) {
        let seed: [u8; 32] = self.new_seed();
        (seed, Source::new(seed))
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.fill_bytes(&mut seed);
        seed
    }

    /// Uniform sample in `[min, max)` built from the low 53 bits of a `u64`.
    #[inline(always)]
    pub fn next_f64(&mut self, min: f64, max: f64) -> f64 {
        min + ((self.next_u64() << 11 >> 11) as f64) / MAXF64 * (max - min)
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a: Source = Source::from_u64(7);
        let mut b: Source = Source::from_u64(7);
        for _ in 0..64 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn branches_diverge() {
        let mut root: Source = Source::new([1u8; 32]);
        let (seed_a, mut a) = root.branch();
        let (seed_b, mut b) = root.branch();
        assert_ne!(seed_a, seed_b);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn next_f64_stays_in_half_open_range() {
        let mut source: Source = Source::from_u64(0);
        for _ in 0..100_000 {
            let x: f64 = source.next_f64(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&x), "{x} out of range");
        }
    }
}
