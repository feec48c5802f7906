//! Clustering options for palette quantization.

/// Configuration for the k-means run behind [`Quantizer`](super::Quantizer).
///
/// # Defaults
///
/// - attempts: 10 independent random restarts, best one kept
/// - max_iterations: 20 per attempt
/// - epsilon: 0.01 (largest center movement, in Oklab units, that still
///   counts as converged; roughly one unit on a 0..100 lightness scale)
/// - seed: none (fresh entropy per call)
///
/// ```
/// use pixel_transform::QuantizeOptions;
///
/// let options = QuantizeOptions::new().attempts(3).seed(Some(7));
/// assert_eq!(options.attempts, 3);
/// assert_eq!(options.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeOptions {
    /// Number of random restarts. Values below 1 behave as 1.
    pub attempts: u32,
    /// Upper bound on assign/update rounds per attempt.
    pub max_iterations: u32,
    /// Convergence threshold on center movement (Oklab distance).
    pub epsilon: f32,
    /// Seed for center initialization; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            attempts: 10,
            max_iterations: 20,
            epsilon: 0.01,
            seed: None,
        }
    }
}

impl QuantizeOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    #[inline]
    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[inline]
    pub fn epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Fix the random initialization so results are reproducible.
    #[inline]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = QuantizeOptions::default();
        assert_eq!(o.attempts, 10);
        assert_eq!(o.max_iterations, 20);
        assert!((o.epsilon - 0.01).abs() < f32::EPSILON);
        assert_eq!(o.seed, None);
    }

    #[test]
    fn test_builder_chaining() {
        let o = QuantizeOptions::new()
            .attempts(2)
            .max_iterations(50)
            .epsilon(0.5)
            .seed(Some(1));
        assert_eq!(o.attempts, 2);
        assert_eq!(o.max_iterations, 50);
        assert!((o.epsilon - 0.5).abs() < f32::EPSILON);
        assert_eq!(o.seed, Some(1));
    }
}
