use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::iter::FusedIterator;

/// A point drawn inside the bounding rectangle. Classified once, then dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// Builds the generator owned by a single estimation call.
///
/// A seed gives a reproducible ChaCha20 stream; `None` draws the key from
/// operating system entropy, so results vary between runs.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

/// Lazy stream of `remaining` points uniform over `[0, domain_bound] x [0, rect_height]`.
///
/// Every point consumes two independent draws from the borrowed generator,
/// `x` first. Bounds are expected to be validated by the caller
/// (finite, strictly positive).
pub struct PointSampler<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    x_range: Uniform<f64>,
    y_range: Uniform<f64>,
    remaining: usize,
}

impl<'a, R: Rng + ?Sized> PointSampler<'a, R> {
    pub fn new(rng: &'a mut R, domain_bound: f64, rect_height: f64, sample_count: usize) -> Self {
        Self {
            rng,
            x_range: Uniform::new_inclusive(0.0, domain_bound),
            y_range: Uniform::new_inclusive(0.0, rect_height),
            remaining: sample_count,
        }
    }
}

impl<R: Rng + ?Sized> Iterator for PointSampler<'_, R> {
    type Item = SamplePoint;

    fn next(&mut self) -> Option<SamplePoint> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let x = self.x_range.sample(&mut *self.rng);
        let y = self.y_range.sample(&mut *self.rng);
        Some(SamplePoint { x, y })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for PointSampler<'_, R> {}

impl<R: Rng + ?Sized> FusedIterator for PointSampler<'_, R> {}
