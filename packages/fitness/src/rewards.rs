//! Achievements unlocked from the user's activity.

use crate::diary::Series;
use crate::progress::GoalProgress;

/// Activity counters the rewards are derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActivityStats {
    pub diary_entries: usize,
    pub series: Series,
    pub measurements: usize,
    pub lessons_completed: usize,
    pub goal: Option<GoalProgress>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    DiaryEntries,
    LongestSeries,
    Measurements,
    Lessons,
    GoalPercent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reward {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    pub threshold: u32,
}

pub static REWARDS: &[Reward] = &[
    Reward {
        id: "first-entry",
        title: "First step",
        description: "Write your first diary entry",
        metric: Metric::DiaryEntries,
        threshold: 1,
    },
    Reward {
        id: "ten-entries",
        title: "Chronicler",
        description: "Write 10 diary entries",
        metric: Metric::DiaryEntries,
        threshold: 10,
    },
    Reward {
        id: "week-series",
        title: "One week strong",
        description: "Keep the diary 7 days in a row",
        metric: Metric::LongestSeries,
        threshold: 7,
    },
    Reward {
        id: "month-series",
        title: "Habit formed",
        description: "Keep the diary 30 days in a row",
        metric: Metric::LongestSeries,
        threshold: 30,
    },
    Reward {
        id: "first-measurement",
        title: "Know your numbers",
        description: "Record a body measurement",
        metric: Metric::Measurements,
        threshold: 1,
    },
    Reward {
        id: "first-lesson",
        title: "Student",
        description: "Complete a lesson",
        metric: Metric::Lessons,
        threshold: 1,
    },
    Reward {
        id: "halfway",
        title: "Halfway there",
        description: "Reach 50% of your weight goal",
        metric: Metric::GoalPercent,
        threshold: 50,
    },
    Reward {
        id: "goal-reached",
        title: "Goal reached",
        description: "Reach your weight goal",
        metric: Metric::GoalPercent,
        threshold: 100,
    },
];

impl ActivityStats {
    pub fn value(&self, metric: Metric) -> u32 {
        let clamp = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        match metric {
            Metric::DiaryEntries => clamp(self.diary_entries),
            Metric::LongestSeries => self.series.longest,
            Metric::Measurements => clamp(self.measurements),
            Metric::Lessons => clamp(self.lessons_completed),
            Metric::GoalPercent => self.goal.map(|g| u32::from(g.percent)).unwrap_or(0),
        }
    }
}

/// A reward together with how far the user got.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardStatus {
    pub reward: &'static Reward,
    pub progress: u32,
}

impl RewardStatus {
    pub fn unlocked(&self) -> bool {
        self.progress >= self.reward.threshold
    }
}

pub fn evaluate(stats: &ActivityStats) -> Vec<RewardStatus> {
    REWARDS
        .iter()
        .map(|reward| RewardStatus {
            reward,
            progress: stats.value(reward.metric).min(reward.threshold),
        })
        .collect()
}

pub fn unlocked_count(stats: &ActivityStats) -> usize {
    evaluate(stats).iter().filter(|s| s.unlocked()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_unlocked_for_new_user() {
        assert_eq!(unlocked_count(&ActivityStats::default()), 0);
    }

    #[test]
    fn test_thresholds() {
        let stats = ActivityStats {
            diary_entries: 12,
            series: Series {
                current: 2,
                longest: 8,
                active_days: 12,
            },
            measurements: 0,
            lessons_completed: 1,
            goal: Some(GoalProgress {
                percent: 50,
                remaining: 5.0,
            }),
        };
        let unlocked: Vec<&str> = evaluate(&stats)
            .into_iter()
            .filter(|s| s.unlocked())
            .map(|s| s.reward.id)
            .collect();
        assert_eq!(
            unlocked,
            vec!["first-entry", "ten-entries", "week-series", "first-lesson", "halfway"]
        );
        let month = evaluate(&stats)
            .into_iter()
            .find(|s| s.reward.id == "month-series")
            .unwrap();
        assert_eq!(month.progress, 8);
    }
}
