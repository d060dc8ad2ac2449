//! 目录模块：饮食计划、食谱与膳食计划的类型化记录。
//!
//! # Catalog Module
//!
//! Typed records for the content the site translates, the dot paths of their
//! translatable fields, and the built-in sample data.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`DietPlan`] | Diet style card with optional detailed information |
//! | [`Recipe`] | Recipe summary with nutrition figures |
//! | [`MealPlan`] | A day of meals with target calories and macros |
//! | [`diet_plans`] | The six built-in diet style cards |
//! | [`sample_meal_plans`] | Mock meal plans around a calorie target |

mod data;

pub use data::{diet_plans, sample_meal_plans, sample_recipes, DEFAULT_TARGET_CALORIES};

use serde::{Deserialize, Serialize};

/// Translatable fields of a [`DietPlan`].
pub const DIET_PLAN_FIELDS: &[&str] = &[
    "title",
    "description",
    "benefits",
    "calories",
    "detailedInfo.overview",
    "detailedInfo.mealStructure",
    "detailedInfo.restrictions",
    "detailedInfo.nutritionFocus",
    "detailedInfo.sampleMeals.breakfast",
    "detailedInfo.sampleMeals.lunch",
    "detailedInfo.sampleMeals.dinner",
    "detailedInfo.sampleMeals.snacks",
    "detailedInfo.healthBenefits",
    "detailedInfo.tips",
];

/// Translatable fields of a [`Recipe`].
pub const RECIPE_FIELDS: &[&str] = &["title", "summary", "instructions"];

/// Translatable fields of a [`MealPlan`], including its recipe titles.
pub const MEAL_PLAN_FIELDS: &[&str] = &[
    "title",
    "meals.breakfast.title",
    "meals.lunch.title",
    "meals.dinner.title",
    "meals.snack.title",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    pub id: String,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
    /// Display range such as "1500-2200 calories".
    pub calories: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_info: Option<DetailedInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedInfo {
    pub overview: String,
    pub meal_structure: Vec<String>,
    pub restrictions: Vec<String>,
    pub nutrition_focus: Vec<String>,
    pub sample_meals: SampleMeals,
    pub health_benefits: Vec<String>,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleMeals {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub snacks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u32,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// May contain HTML markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: Recipe,
    pub lunch: Recipe,
    pub dinner: Recipe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snack: Option<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub title: String,
    pub total_calories: u32,
    pub macros: Macros,
    pub meals: Meals,
}
