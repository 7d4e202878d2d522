//! Step count and coverage along a single axis.
//!
//! `n` frame positions spaced `step` apart span `(n - 1) * step`. The planner
//! wants the smallest `n` whose span reaches the requested extent.

use serde::{Deserialize, Serialize};

/// Get the number of `step_um` sized steps needed to cover `distance_um`.
///
/// Returns the step count and the resulting coverage `(steps - 1) * step_um`.
/// The coverage is never less than `distance_um`, and the count is at most
/// one above the floor-based estimate.
pub fn steps_and_coverage(step_um: f64, distance_um: f64) -> (usize, f64) {
    debug_assert!(step_um > 0.0, "step must be positive, got {step_um}");
    debug_assert!(distance_um >= 0.0, "distance must be non-negative, got {distance_um}");

    let mut steps = ((distance_um / step_um).floor() as usize).saturating_add(1);
    let mut coverage = (steps - 1) as f64 * step_um;
    if coverage < distance_um {
        steps = steps.saturating_add(1);
        coverage = (steps - 1) as f64 * step_um;
    }
    (steps, coverage)
}

/// Like [`steps_and_coverage`], but `None` unless both inputs are finite and
/// the step count stays within `max_steps`.
pub fn checked_steps_and_coverage(
    step_um: f64,
    distance_um: f64,
    max_steps: usize,
) -> Option<(usize, f64)> {
    if !(step_um.is_finite() && step_um > 0.0 && distance_um.is_finite() && distance_um >= 0.0) {
        return None;
    }
    if distance_um / step_um >= max_steps as f64 {
        return None;
    }
    let (steps, coverage) = steps_and_coverage(step_um, distance_um);
    (steps <= max_steps).then_some((steps, coverage))
}

/// Geometry of one scan axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisPlan {
    /// Number of frame positions along the axis
    pub steps: usize,
    /// Distance between neighbouring positions (um)
    pub step_um: f64,
    /// Span from the first to the last position (um)
    pub coverage_um: f64,
    /// Requested extent of the region (um)
    pub extent_um: f64,
    /// Excess coverage pushed outward on each edge to center the grid (um)
    pub margin_um: f64,
}

impl AxisPlan {
    /// Plan an axis of `extent_um` with the given step size
    pub fn new(step_um: f64, extent_um: f64) -> Self {
        let (steps, coverage_um) = steps_and_coverage(step_um, extent_um);
        Self::from_parts(steps, step_um, coverage_um, extent_um)
    }

    /// Plan an axis, or `None` if it would need more than `max_steps` positions
    pub fn checked(step_um: f64, extent_um: f64, max_steps: usize) -> Option<Self> {
        let (steps, coverage_um) = checked_steps_and_coverage(step_um, extent_um, max_steps)?;
        Some(Self::from_parts(steps, step_um, coverage_um, extent_um))
    }

    fn from_parts(steps: usize, step_um: f64, coverage_um: f64, extent_um: f64) -> Self {
        Self {
            steps,
            step_um,
            coverage_um,
            extent_um,
            margin_um: (coverage_um - extent_um) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple() {
        assert_eq!(steps_and_coverage(1000.0, 10_000.0), (11, 10_000.0));
    }

    #[test]
    fn test_bump_when_short() {
        // floor(2.5) + 1 = 3 covers only 2000
        assert_eq!(steps_and_coverage(1000.0, 2500.0), (4, 3000.0));
    }

    #[test]
    fn test_zero_extent() {
        assert_eq!(steps_and_coverage(1000.0, 0.0), (1, 0.0));
    }

    #[test]
    fn test_extent_smaller_than_step() {
        assert_eq!(steps_and_coverage(1000.0, 1.0), (2, 1000.0));
    }

    #[test]
    fn test_axis_margin() {
        let axis = AxisPlan::new(1000.0, 2500.0);
        assert_eq!(axis.steps, 4);
        assert_eq!(axis.margin_um, 250.0);

        let axis = AxisPlan::new(1000.0, 10_000.0);
        assert_eq!(axis.margin_um, 0.0);
    }

    #[test]
    fn test_minimality_over_range() {
        let step = 737.5;
        for i in 0..200 {
            let extent = i as f64 * 113.25;
            let (n, coverage) = steps_and_coverage(step, extent);
            assert!(coverage >= extent, "extent {extent}: coverage {coverage}");
            if n >= 2 {
                assert!(((n - 2) as f64) * step < extent, "extent {extent}: n {n} not minimal");
            }
        }
    }

    #[test]
    fn test_checked_rejects_huge_or_non_finite() {
        assert_eq!(checked_steps_and_coverage(1000.0, 2500.0, 10), Some((4, 3000.0)));
        assert_eq!(checked_steps_and_coverage(1000.0, 2500.0, 3), None);
        assert_eq!(checked_steps_and_coverage(1000.0, f64::INFINITY, usize::MAX), None);
        assert_eq!(checked_steps_and_coverage(1000.0, 1e300, usize::MAX), None);
        assert!(AxisPlan::checked(1000.0, 1e12, 1_000).is_none());
    }

    #[test]
    fn test_saturating_step_count() {
        let (steps, _) = steps_and_coverage(1.0, f64::MAX);
        assert_eq!(steps, usize::MAX);
    }
}
