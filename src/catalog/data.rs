//! Built-in diet plan cards and mock meal plans.

use super::{DietPlan, Macros, MealPlan, Meals, Recipe};

pub const DEFAULT_TARGET_CALORIES: u32 = 1800;

fn plan(
    id: &str,
    title: &str,
    description: &str,
    benefits: [&str; 3],
    calories: &str,
    photo: &str,
) -> DietPlan {
    DietPlan {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
        calories: calories.to_string(),
        image_url: format!(
            "https://images.unsplash.com/{}?w=800&h=600&fit=crop",
            photo
        ),
        detailed_info: None,
    }
}

pub fn diet_plans() -> Vec<DietPlan> {
    vec![
        plan(
            "balanced",
            "Balanced Global Diet",
            "Well-rounded nutrition with all food groups adapted to your regional preferences for sustainable lifestyle.",
            ["Sustainable", "All Nutrients", "Culturally Appropriate"],
            "1500-2200 calories",
            "photo-1490645935967-10de6ba17061",
        ),
        plan(
            "mediterranean",
            "Mediterranean Diet",
            "Traditional eating pattern emphasizing whole foods, healthy fats, and moderate wine consumption.",
            ["Heart Health", "Brain Function", "Longevity"],
            "1500-2200 calories",
            "photo-1498837167922-ddd27525d352",
        ),
        plan(
            "south_asia",
            "South Asian Wellness",
            "Ayurvedic principles with traditional spices, lentils, and vegetables for optimal health and digestion.",
            ["Digestive Health", "Anti-Inflammatory", "Traditional Wisdom"],
            "1400-2000 calories",
            "photo-1565557623262-b51c2513a641",
        ),
        plan(
            "east_asia",
            "East Asian Balance",
            "Traditional Chinese and Japanese nutrition focusing on balance, fresh ingredients, and longevity.",
            ["Longevity", "Heart Health", "Balanced Energy"],
            "1300-1900 calories",
            "photo-1553621042-f6e147245754",
        ),
        plan(
            "plant_based",
            "Global Plant-Based",
            "Plant-focused nutrition incorporating diverse cuisines from around the world for optimal health.",
            ["Heart Health", "Environmental Impact", "Global Flavors"],
            "1400-2000 calories",
            "photo-1512621776951-a57141f2eefd",
        ),
        plan(
            "high_protein",
            "International High Protein",
            "Protein-rich meals from various cultures designed for muscle building and sustained energy.",
            ["Muscle Building", "Higher Metabolism", "Cultural Variety"],
            "1600-2400 calories",
            "photo-1546833999-b9f581a1996d",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn recipe(
    id: u32,
    title: &str,
    photo: &str,
    ready_in_minutes: u32,
    calories: u32,
    protein: u32,
    carbs: u32,
    fat: u32,
) -> Recipe {
    Recipe {
        id,
        title: title.to_string(),
        image: format!(
            "https://images.unsplash.com/{}?w=400&h=300&fit=crop",
            photo
        ),
        ready_in_minutes,
        servings: 1,
        calories: Some(calories),
        protein: Some(protein),
        carbs: Some(carbs),
        fat: Some(fat),
        summary: None,
        instructions: None,
    }
}

pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        recipe(1, "Avocado Toast with Poached Egg", "photo-1506084868230-bb9d95c24759", 15, 320, 14, 25, 18),
        recipe(2, "Grilled Chicken Salad Bowl", "photo-1512621776951-a57141f2eefd", 25, 380, 35, 15, 22),
        recipe(3, "Salmon with Quinoa & Vegetables", "photo-1467003909585-2f8a72700288", 30, 450, 32, 35, 20),
        recipe(4, "Greek Yogurt with Berries", "photo-1488477181946-6428a0291777", 5, 180, 15, 20, 6),
        recipe(5, "Vegetable Stir Fry with Tofu", "photo-1512621776951-a57141f2eefd", 20, 340, 18, 28, 16),
        recipe(6, "Protein Smoothie Bowl", "photo-1511690743698-d9d85f2fbf38", 10, 280, 20, 32, 8),
    ]
}

/// Three mock plans around `target_calories` (default 1800): balanced at the
/// target, high protein at +100, plant-based at -50.
pub fn sample_meal_plans(target_calories: Option<u32>) -> Vec<MealPlan> {
    let target = target_calories.unwrap_or(DEFAULT_TARGET_CALORIES);
    let recipes = sample_recipes();
    let pick = |i: usize| recipes[i].clone();

    vec![
        MealPlan {
            id: "plan1".to_string(),
            title: "Balanced Nutrition Plan".to_string(),
            total_calories: target,
            macros: Macros {
                protein: 120,
                carbs: 180,
                fat: 60,
            },
            meals: Meals {
                breakfast: pick(0),
                lunch: pick(1),
                dinner: pick(2),
                snack: Some(pick(3)),
            },
        },
        MealPlan {
            id: "plan2".to_string(),
            title: "High Protein Focus".to_string(),
            total_calories: target.saturating_add(100),
            macros: Macros {
                protein: 140,
                carbs: 160,
                fat: 65,
            },
            meals: Meals {
                breakfast: pick(5),
                lunch: pick(1),
                dinner: pick(2),
                snack: Some(pick(3)),
            },
        },
        MealPlan {
            id: "plan3".to_string(),
            title: "Plant-Based Option".to_string(),
            total_calories: target.saturating_sub(50),
            macros: Macros {
                protein: 100,
                carbs: 200,
                fat: 55,
            },
            meals: Meals {
                breakfast: pick(5),
                lunch: pick(4),
                dinner: pick(4),
                snack: Some(pick(3)),
            },
        },
    ]
}
