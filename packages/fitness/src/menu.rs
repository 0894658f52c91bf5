//! The daily meal plan shown from the home screen.

use crate::models::Goal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Meal {
    pub name: &'static str,
    pub dish: &'static str,
    pub kcal: u16,
}

static WEIGHT_LOSS: [Meal; 4] = [
    Meal { name: "Breakfast", dish: "Oatmeal with berries and a boiled egg", kcal: 350 },
    Meal { name: "Lunch", dish: "Chicken breast, buckwheat and cucumber salad", kcal: 450 },
    Meal { name: "Snack", dish: "Greek yogurt with an apple", kcal: 180 },
    Meal { name: "Dinner", dish: "Baked fish with steamed vegetables", kcal: 400 },
];

static MAINTENANCE: [Meal; 4] = [
    Meal { name: "Breakfast", dish: "Cottage cheese pancakes with sour cream", kcal: 450 },
    Meal { name: "Lunch", dish: "Beef stew, rice and vegetable salad", kcal: 650 },
    Meal { name: "Snack", dish: "Nuts and a banana", kcal: 250 },
    Meal { name: "Dinner", dish: "Turkey, quinoa and roasted peppers", kcal: 550 },
];

static GAIN: [Meal; 5] = [
    Meal { name: "Breakfast", dish: "Omelette of three eggs, toast and avocado", kcal: 600 },
    Meal { name: "Second breakfast", dish: "Peanut butter sandwich and milk", kcal: 450 },
    Meal { name: "Lunch", dish: "Pasta with chicken and cheese", kcal: 800 },
    Meal { name: "Snack", dish: "Protein shake with oats", kcal: 400 },
    Meal { name: "Dinner", dish: "Salmon, potatoes and green beans", kcal: 700 },
];

/// Meals for the day. Users without a goal get the maintenance plan.
pub fn daily_menu(goal: Option<Goal>) -> &'static [Meal] {
    match goal {
        Some(Goal::WeightLoss) => &WEIGHT_LOSS,
        Some(Goal::Gain) => &GAIN,
        Some(Goal::Maintenance) | None => &MAINTENANCE,
    }
}

pub fn total_kcal(meals: &[Meal]) -> u32 {
    meals.iter().map(|m| u32::from(m.kcal)).sum()
}
