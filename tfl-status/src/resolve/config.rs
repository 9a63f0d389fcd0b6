//! Station resolution configuration.

/// Tunable constants for choosing a best match among search results.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// A non-exact best match must score above this (0.0 to 1.0).
    pub confidence_threshold: f64,

    /// A non-exact best match must beat the runner-up by more than this.
    pub margin: f64,

    /// Number of candidates carried by an ambiguity error.
    pub max_candidates: usize,
}

impl ResolverConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(confidence_threshold: f64, margin: f64, max_candidates: usize) -> Self {
        Self {
            confidence_threshold,
            margin,
            max_candidates,
        }
    }

    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_max_candidates(mut self, n: usize) -> Self {
        self.max_candidates = n;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            margin: 0.1,
            max_candidates: 5,
        }
    }
}
