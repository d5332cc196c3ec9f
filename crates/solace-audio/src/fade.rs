//! Linear volume ramps.

use std::time::Duration;

/// Total length of a crossfade.
pub const CROSSFADE_WINDOW: Duration = Duration::from_millis(500);

/// Number of volume steps in a crossfade.
pub const CROSSFADE_STEPS: u32 = 10;

/// A linear ramp split into equal steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeCurve {
    pub window: Duration,
    pub steps: u32,
}

impl Default for FadeCurve {
    fn default() -> Self {
        Self {
            window: CROSSFADE_WINDOW,
            steps: CROSSFADE_STEPS,
        }
    }
}

impl FadeCurve {
    /// Delay between two steps.
    pub fn step_interval(&self) -> Duration {
        self.window / self.steps.max(1)
    }

    /// Progress (0.0 exclusive - 1.0 inclusive) after each step.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> impl Iterator<Item = f32> {
        let steps = self.steps.max(1);
        (1..=steps).map(move |i| i as f32 / steps as f32)
    }

    /// Volumes visited when ramping from `from` to `to`, ending exactly on `to`.
    pub fn volumes(&self, from: f32, to: f32) -> impl Iterator<Item = f32> {
        self.progress().map(move |p| (to - from).mul_add(p, from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ten_steps_of_fifty_ms() {
        let curve = FadeCurve::default();
        assert_eq!(curve.step_interval(), Duration::from_millis(50));
        assert_eq!(curve.progress().count(), 10);
    }

    #[test]
    fn test_volumes_are_linear_and_end_on_target() {
        let curve = FadeCurve::default();
        let up: Vec<f32> = curve.volumes(0.0, 0.5).collect();
        assert!((up[0] - 0.05).abs() < 1e-6);
        assert!((up[4] - 0.25).abs() < 1e-6);
        assert!((up[9] - 0.5).abs() < 1e-6);

        let down: Vec<f32> = curve.volumes(0.8, 0.0).collect();
        assert!(down.windows(2).all(|w| w[1] < w[0]));
        assert!(down[9].abs() < 1e-6);
    }

    #[test]
    fn test_zero_steps_is_single_jump() {
        let curve = FadeCurve {
            window: Duration::from_millis(100),
            steps: 0,
        };
        assert_eq!(curve.volumes(0.0, 1.0).collect::<Vec<_>>(), vec![1.0]);
    }
}
