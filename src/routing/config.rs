//! Routing configuration.

/// Configuration for route optimization.
///
/// # Examples
///
/// ```
/// use optipick::routing::RoutingConfig;
///
/// let config = RoutingConfig::default()
///     .with_pick_time_per_stop(0.5)
///     .with_parallel(true);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RoutingConfig {
    /// Fixed handling time added per interior stop, in minutes.
    pub pick_time_per_stop: f64,

    /// Whether to optimize agents' routes in parallel using rayon.
    /// Purely a performance knob; results are identical either way.
    pub parallel: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            pick_time_per_stop: 0.0,
            parallel: false,
        }
    }
}

impl RoutingConfig {
    pub fn with_pick_time_per_stop(mut self, minutes: f64) -> Self {
        self.pick_time_per_stop = minutes;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
