//! Weight-goal progress.
//!
//! [`goal_progress`] turns the profile's start and target weights plus the
//! latest weigh-in into the numbers shown on the home card. It is a pure
//! function: any missing input yields [`GoalProgress::ZERO`].

use serde::{Deserialize, Serialize};

use crate::models::Goal;

/// Within this many kilograms of the target a maintenance goal counts as met.
pub const MAINTENANCE_TOLERANCE_KG: f64 = 0.5;

/// Smallest deviation span used to scale maintenance progress.
pub const MAINTENANCE_DEVIATION_FLOOR_KG: f64 = 5.0;

/// Progress towards the weight goal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Whole percent complete, always within `0..=100`.
    pub percent: u8,
    /// Kilograms still to go, never negative.
    pub remaining: f64,
}

impl GoalProgress {
    pub const ZERO: GoalProgress = GoalProgress {
        percent: 0,
        remaining: 0.0,
    };

    /// Progress as a `0.0..=1.0` fraction for bar widths.
    pub fn fraction(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }
}

/// Compute progress for `goal` given the three weights.
pub fn goal_progress(
    current: Option<f64>,
    initial: Option<f64>,
    target: Option<f64>,
    goal: Option<Goal>,
) -> GoalProgress {
    let (Some(current), Some(initial), Some(target), Some(goal)) = (current, initial, target, goal)
    else {
        return GoalProgress::ZERO;
    };
    if !(current.is_finite() && initial.is_finite() && target.is_finite()) {
        return GoalProgress::ZERO;
    }

    match goal {
        Goal::WeightLoss => directional(initial - current, initial - target, current - target),
        Goal::Gain => directional(current - initial, target - initial, target - current),
        Goal::Maintenance => maintenance(current, initial, target),
    }
}

/// Shared weight-loss / gain branch: `achieved` over `span`, with `left`
/// kilograms still between the current weight and the target.
fn directional(achieved: f64, span: f64, left: f64) -> GoalProgress {
    let remaining = left.max(0.0);
    let percent = if span > 0.0 {
        to_percent(achieved / span * 100.0)
    } else if remaining == 0.0 {
        100
    } else {
        0
    };
    GoalProgress { percent, remaining }
}

fn maintenance(current: f64, initial: f64, target: f64) -> GoalProgress {
    let deviation = (current - target).abs();
    if deviation <= MAINTENANCE_TOLERANCE_KG {
        return GoalProgress {
            percent: 100,
            remaining: 0.0,
        };
    }
    let max_deviation = (initial - target).abs().max(MAINTENANCE_DEVIATION_FLOOR_KG);
    GoalProgress {
        percent: to_percent((1.0 - deviation / max_deviation) * 100.0),
        remaining: deviation,
    }
}

fn to_percent(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loss(current: f64) -> GoalProgress {
        goal_progress(Some(current), Some(90.0), Some(80.0), Some(Goal::WeightLoss))
    }

    #[test]
    fn test_weight_loss_halfway() {
        let p = loss(85.0);
        assert_eq!(p.percent, 50);
        assert_eq!(p.remaining, 5.0);
    }

    #[test]
    fn test_weight_loss_endpoints() {
        assert_eq!(loss(90.0).percent, 0);
        assert_eq!(loss(80.0).percent, 100);
        assert_eq!(loss(80.0).remaining, 0.0);
    }

    #[test]
    fn test_weight_loss_clamps() {
        // Gained instead of lost.
        let p = loss(93.0);
        assert_eq!(p.percent, 0);
        assert_eq!(p.remaining, 13.0);
        // Overshot the target.
        let p = loss(77.0);
        assert_eq!(p.percent, 100);
        assert_eq!(p.remaining, 0.0);
    }

    #[test]
    fn test_gain_is_symmetric() {
        let gain = |current| goal_progress(Some(current), Some(60.0), Some(70.0), Some(Goal::Gain));
        assert_eq!(gain(60.0).percent, 0);
        assert_eq!(gain(60.0).remaining, 10.0);
        assert_eq!(gain(65.0).percent, 50);
        assert_eq!(gain(70.0).percent, 100);
        assert_eq!(gain(72.0).percent, 100);
        assert_eq!(gain(72.0).remaining, 0.0);
        assert_eq!(gain(58.0).percent, 0);
    }

    #[test]
    fn test_maintenance_within_tolerance() {
        let maint = |current| goal_progress(Some(current), Some(70.0), Some(70.0), Some(Goal::Maintenance));
        assert_eq!(maint(70.0).percent, 100);
        assert_eq!(maint(70.5).percent, 100);
        assert_eq!(maint(69.5).percent, 100);
        assert_eq!(maint(69.5).remaining, 0.0);
    }

    #[test]
    fn test_maintenance_decreases_linearly_against_floor() {
        let maint = |current| goal_progress(Some(current), Some(70.0), Some(70.0), Some(Goal::Maintenance));
        // Span floor is 5 kg when initial == target.
        assert_eq!(maint(71.0).percent, 80);
        assert_eq!(maint(72.5).percent, 50);
        assert_eq!(maint(72.5).remaining, 2.5);
        assert_eq!(maint(75.0).percent, 0);
        assert_eq!(maint(80.0).percent, 0);
    }

    #[test]
    fn test_maintenance_uses_wider_initial_span() {
        let p = goal_progress(Some(75.0), Some(80.0), Some(70.0), Some(Goal::Maintenance));
        assert_eq!(p.percent, 50);
        assert_eq!(p.remaining, 5.0);
    }

    #[test]
    fn test_missing_values_yield_zero() {
        assert_eq!(goal_progress(None, Some(90.0), Some(80.0), Some(Goal::WeightLoss)), GoalProgress::ZERO);
        assert_eq!(goal_progress(Some(85.0), None, Some(80.0), Some(Goal::WeightLoss)), GoalProgress::ZERO);
        assert_eq!(goal_progress(Some(85.0), Some(90.0), None, Some(Goal::WeightLoss)), GoalProgress::ZERO);
        assert_eq!(goal_progress(Some(85.0), Some(90.0), Some(80.0), None), GoalProgress::ZERO);
    }

    #[test]
    fn test_degenerate_span() {
        let p = goal_progress(Some(80.0), Some(80.0), Some(80.0), Some(Goal::WeightLoss));
        assert_eq!(p.percent, 100);
        let p = goal_progress(Some(82.0), Some(80.0), Some(80.0), Some(Goal::WeightLoss));
        assert_eq!(p.percent, 0);
        assert_eq!(p.remaining, 2.0);
    }

    #[test]
    fn test_bounds_hold_across_range() {
        for goal in Goal::ALL {
            let mut current = 40.0;
            while current <= 140.0 {
                let p = goal_progress(Some(current), Some(90.0), Some(75.0), Some(goal));
                assert!(p.percent <= 100);
                assert!(p.remaining >= 0.0);
                assert_eq!(p, goal_progress(Some(current), Some(90.0), Some(75.0), Some(goal)));
                current += 0.25;
            }
        }
    }
}
