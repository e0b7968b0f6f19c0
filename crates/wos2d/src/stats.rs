//! Online accumulation of Monte Carlo samples.

use libm::sqrtf;

/// Welford running mean/variance over a stream of samples.
///
/// The estimator folds in one boundary sample per walk and reads the mean
/// once the path budget is spent; the spread of repeated estimates gives the
/// 1/√N error scaling its empirical check.
#[derive(Copy, Clone, Default, Debug)]
pub struct Stats {
    count: u32,
    mean: f32,
    m2: f32,
}

impl Stats {
    /// Fold one sample into the running moments.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        self.count = self.count.saturating_add(1);
        let delta = sample - self.mean;
        self.mean += delta / self.count as f32;
        self.m2 += delta * (sample - self.mean);
    }

    /// Mean of the samples seen so far (0 before the first push).
    #[inline]
    pub fn mean(&self) -> f32 {
        self.mean
    }

    /// Unbiased sample variance; 0 with fewer than two samples.
    #[inline]
    pub fn var(&self) -> f32 {
        if self.count > 1 {
            self.m2 / (self.count - 1) as f32
        } else {
            0.0
        }
    }

    /// Sample standard deviation.
    #[inline]
    pub fn std_dev(&self) -> f32 {
        sqrtf(self.var())
    }
}
