/// Small deterministic LCG; the same seed always replays the same match.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    /// True roughly once every `n` calls.
    pub fn one_in(&mut self, n: u32) -> bool {
        self.next_u32() % n.max(1) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn one_in_one_always_fires() {
        let mut rng = Rng::new(1);
        assert!((0..64).all(|_| rng.one_in(1)));
        assert!(rng.one_in(0));
    }
}
