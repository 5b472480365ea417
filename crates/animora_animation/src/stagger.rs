//! Staggered start offsets

use serde::Deserialize;

/// Default gap between consecutive elements, in milliseconds
pub const DEFAULT_STAGGER_MS: f64 = 100.0;

/// Stagger configuration
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    /// Gap between consecutive elements. Zero means "use the default".
    pub each: f64,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            each: DEFAULT_STAGGER_MS,
        }
    }
}

impl StaggerConfig {
    pub fn each(ms: f64) -> Self {
        Self { each: ms }
    }

    /// Effective gap. Zero and NaN fall back to the default; negative gaps
    /// are kept as given.
    pub fn step(&self) -> f64 {
        if self.each == 0.0 || self.each.is_nan() {
            DEFAULT_STAGGER_MS
        } else {
            self.each
        }
    }

    /// Delay for the element at `index`
    pub fn delay_for(&self, base_delay: f64, index: usize) -> f64 {
        base_delay + index as f64 * self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_grow_by_each() {
        let config = StaggerConfig::each(50.0);
        let delays: Vec<f64> = (0..3).map(|i| config.delay_for(0.0, i)).collect();
        assert_eq!(delays, vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_base_delay_is_added() {
        let config = StaggerConfig::each(25.0);
        assert_eq!(config.delay_for(200.0, 2), 250.0);
    }

    #[test]
    fn test_zero_falls_back_to_default() {
        assert_eq!(StaggerConfig::each(0.0).step(), DEFAULT_STAGGER_MS);
        assert_eq!(StaggerConfig::default().step(), DEFAULT_STAGGER_MS);
        assert_eq!(StaggerConfig::each(-20.0).step(), -20.0);
    }

    #[test]
    fn test_deserialize_missing_each() {
        let config: StaggerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.each, DEFAULT_STAGGER_MS);
    }
}
