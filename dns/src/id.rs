use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of 16-bit transaction identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> u16;
}

/// Uniformly random ids, the production source.
#[derive(Debug)]
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> u16 {
        self.rng.gen()
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> u16,
{
    fn next_id(&mut self) -> u16 {
        self()
    }
}
