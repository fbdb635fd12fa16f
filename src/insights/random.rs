/// Source of randomness for message selection
///
/// Insight generation only ever needs a value in `[0, 1)`. Tests plug in a
/// fixed sequence; the server uses the thread RNG.

use rand::Rng;

pub trait RandomSource {
    /// Next value in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform pick from a non-empty pool
    fn pick<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        let r = self.next_unit();
        let index = if r.is_finite() && r > 0.0 {
            ((r * pool.len() as f64) as usize).min(pool.len().saturating_sub(1))
        } else {
            0
        };
        pool.get(index).copied().unwrap_or_default()
    }
}

/// Random source backed by `rand::thread_rng`
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            position: 0,
        }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_unit(&mut self) -> f64 {
        self()
    }
}
