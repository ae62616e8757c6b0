//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no external state.

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Random integer in [min, max], inclusive on both ends.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max - min) as u32 + 1;
        min + self.next_int(span) as i32
    }

    /// Random float in [0, 1).
    pub fn unit_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Random float in [min, max).
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.unit_f32() * (max - min)
    }

    /// Fair coin flip.
    pub fn random_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }
}
