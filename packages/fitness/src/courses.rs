//! The built-in course catalog and per-user lesson progress.

use std::collections::HashSet;

use crate::models::LessonProgress;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub minutes: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CourseModule {
    pub id: &'static str,
    pub title: &'static str,
    pub lessons: &'static [Lesson],
}

pub static CATALOG: &[CourseModule] = &[
    CourseModule {
        id: "nutrition-basics",
        title: "Nutrition basics",
        lessons: &[
            Lesson {
                id: "energy-balance",
                title: "Energy balance",
                summary: "Where calories come from and where they go.",
                minutes: 8,
            },
            Lesson {
                id: "macronutrients",
                title: "Protein, fat and carbohydrates",
                summary: "What each macronutrient does and how much you need.",
                minutes: 10,
            },
            Lesson {
                id: "plate-method",
                title: "Building a balanced plate",
                summary: "A simple way to portion every meal without counting.",
                minutes: 7,
            },
            Lesson {
                id: "hydration",
                title: "Hydration",
                summary: "How much water you need and how to tell.",
                minutes: 5,
            },
        ],
    },
    CourseModule {
        id: "habits",
        title: "Healthy habits",
        lessons: &[
            Lesson {
                id: "food-diary",
                title: "Keeping a food diary",
                summary: "Why writing meals down works and how to make it stick.",
                minutes: 6,
            },
            Lesson {
                id: "sleep",
                title: "Sleep and appetite",
                summary: "How rest affects hunger and cravings.",
                minutes: 7,
            },
            Lesson {
                id: "stress-eating",
                title: "Stress eating",
                summary: "Recognising emotional hunger and what to do instead.",
                minutes: 9,
            },
        ],
    },
    CourseModule {
        id: "movement",
        title: "Everyday movement",
        lessons: &[
            Lesson {
                id: "steps",
                title: "Walking and daily steps",
                summary: "Raising everyday activity without a gym.",
                minutes: 6,
            },
            Lesson {
                id: "strength-at-home",
                title: "Strength at home",
                summary: "A short routine with body-weight exercises.",
                minutes: 12,
            },
        ],
    },
];

pub fn find_module(module_id: &str) -> Option<&'static CourseModule> {
    CATALOG.iter().find(|m| m.id == module_id)
}

/// Set of completed `(module, lesson)` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseProgress {
    completed: HashSet<(String, String)>,
}

impl CourseProgress {
    pub fn from_rows(rows: &[LessonProgress]) -> Self {
        Self {
            completed: rows
                .iter()
                .filter(|r| r.completed)
                .map(|r| (r.module_id.clone(), r.lesson_id.clone()))
                .collect(),
        }
    }

    pub fn is_completed(&self, module_id: &str, lesson_id: &str) -> bool {
        self.completed
            .contains(&(module_id.to_string(), lesson_id.to_string()))
    }

    pub fn mark_completed(&mut self, module_id: &str, lesson_id: &str) {
        self.completed
            .insert((module_id.to_string(), lesson_id.to_string()));
    }

    /// Completed lessons that still exist in the catalog.
    pub fn completed_in(&self, module: &CourseModule) -> usize {
        module
            .lessons
            .iter()
            .filter(|l| self.is_completed(module.id, l.id))
            .count()
    }

    /// Whole percent of the module's lessons completed.
    pub fn module_percent(&self, module: &CourseModule) -> u8 {
        if module.lessons.is_empty() {
            return 0;
        }
        let done = self.completed_in(module) as f64;
        (done / module.lessons.len() as f64 * 100.0).round() as u8
    }

    pub fn total_completed(&self) -> usize {
        CATALOG.iter().map(|m| self.completed_in(m)).sum()
    }

    /// First incomplete lesson in catalog order, with its 1-based number
    /// inside the module. `None` once everything is done.
    pub fn current_lesson(&self) -> Option<CurrentLesson> {
        CATALOG.iter().find_map(|module| {
            module
                .lessons
                .iter()
                .enumerate()
                .find(|(_, l)| !self.is_completed(module.id, l.id))
                .map(|(i, lesson)| CurrentLesson {
                    module,
                    lesson,
                    number: i + 1,
                })
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentLesson {
    pub module: &'static CourseModule,
    pub lesson: &'static Lesson,
    pub number: usize,
}
