//! ObjectTranslator over JSON and typed records

use crate::integration::mock_backend::MockBackend;
use dietplan_translate::{ObjectTranslator, TranslationService};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn translator_with(backend: &Arc<MockBackend>) -> ObjectTranslator {
    ObjectTranslator::new(TranslationService::new(backend.clone()))
}

#[tokio::test]
async fn test_fields_and_arrays_across_objects() {
    let backend = Arc::new(MockBackend::prefixing());
    let translator = translator_with(&backend);

    let objects = vec![json!({"a": "X", "b": ["Y", "Z"]}), json!({"a": "Q"})];
    let out = translator
        .translate_object_array(&objects, &["a", "b"], "es", "en")
        .await;

    assert_eq!(
        out,
        vec![json!({"a": "ES_X", "b": ["ES_Y", "ES_Z"]}), json!({"a": "ES_Q"})]
    );
}

#[tokio::test]
async fn test_input_is_left_unchanged() {
    let backend = Arc::new(MockBackend::prefixing());
    let translator = translator_with(&backend);

    let objects = vec![json!({"title": "Hello", "tags": ["a", "b"]})];
    let snapshot = objects.clone();
    let out = translator
        .translate_object_array(&objects, &["title", "tags"], "fr", "en")
        .await;

    assert_eq!(out, vec![json!({"title": "FR_Hello", "tags": ["FR_a", "FR_b"]})]);
    assert_eq!(objects, snapshot);
}

#[tokio::test]
async fn test_numeric_path_segments_index_into_arrays() {
    let backend = Arc::new(MockBackend::prefixing());
    let translator = translator_with(&backend);

    let plan = json!({
        "meals": [
            {"title": "Porridge", "calories": 350},
            {"title": "Lentil Soup", "ingredients": ["lentils", "carrot"]}
        ]
    });
    let out = translator
        .translate_object(&plan, &["meals.0.title", "meals.1.ingredients"], "es", "en")
        .await;

    assert!(out["meals"].is_array());
    assert_eq!(out["meals"][0], json!({"title": "ES_Porridge", "calories": 350}));
    assert_eq!(out["meals"][1]["title"], "Lentil Soup");
    assert_eq!(out["meals"][1]["ingredients"], json!(["ES_lentils", "ES_carrot"]));
}

#[tokio::test]
async fn test_texts_land_at_their_own_paths_under_uneven_latency() {
    let backend = Arc::new(
        MockBackend::prefixing()
            .with_text_delay("first", Duration::from_millis(120))
            .with_text_delay("third", Duration::from_millis(40)),
    );
    let translator = translator_with(&backend);

    let objects = vec![
        json!({"title": "first", "benefits": ["second", "third"]}),
        json!({"title": "fourth", "benefits": []}),
    ];
    let out = translator
        .translate_object_array(&objects, &["title", "benefits"], "es", "en")
        .await;

    assert_eq!(out[0]["title"], "ES_first");
    assert_eq!(out[0]["benefits"], json!(["ES_second", "ES_third"]));
    assert_eq!(out[1], json!({"title": "ES_fourth", "benefits": []}));
}

#[tokio::test]
async fn test_failed_strings_keep_original_text() {
    let backend = Arc::new(MockBackend::prefixing().failing_on("Y"));
    let translator = translator_with(&backend);

    let objects = vec![json!({"a": "X", "b": ["Y", "Z"]})];
    let out = translator
        .translate_object_array(&objects, &["a", "b"], "es", "en")
        .await;

    assert_eq!(out, vec![json!({"a": "ES_X", "b": ["Y", "ES_Z"]})]);
}

#[tokio::test]
async fn test_no_matching_fields_makes_no_calls() {
    let backend = Arc::new(MockBackend::prefixing());
    let translator = translator_with(&backend);

    let objects = vec![json!({"id": 1, "calories": 320}), json!("not an object")];
    let out = translator
        .translate_object_array(&objects, &["title", "summary", ""], "es", "en")
        .await;

    assert_eq!(out, objects);
    assert_eq!(backend.calls(), 0);
}

#[cfg(feature = "catalog")]
#[tokio::test]
async fn test_catalog_diet_plans_translate_typed() {
    use dietplan_translate::catalog::{diet_plans, DIET_PLAN_FIELDS};

    let backend = Arc::new(MockBackend::prefixing());
    let translator = translator_with(&backend);

    let plans = diet_plans();
    let out = translator
        .translate_records(&plans, DIET_PLAN_FIELDS, "es", "en")
        .await
        .unwrap();

    assert_eq!(out.len(), 6);
    assert_eq!(out[1].id, "mediterranean");
    assert_eq!(out[1].title, "ES_Mediterranean Diet");
    assert_eq!(out[1].benefits[0], "ES_Heart Health");
    assert_eq!(out[1].image_url, plans[1].image_url);
    assert_eq!(out[0].calories, "ES_1500-2200 calories");
}

#[cfg(feature = "catalog")]
#[tokio::test]
async fn test_catalog_meal_plans_translate_recipe_titles() {
    use dietplan_translate::catalog::{sample_meal_plans, MEAL_PLAN_FIELDS};

    let backend = Arc::new(MockBackend::prefixing());
    let translator = translator_with(&backend);

    let out = translator
        .translate_records(&sample_meal_plans(Some(2000)), MEAL_PLAN_FIELDS, "fr", "en")
        .await
        .unwrap();

    assert_eq!(out[0].title, "FR_Balanced Nutrition Plan");
    assert_eq!(out[0].total_calories, 2000);
    assert_eq!(out[2].meals.lunch.title, "FR_Vegetable Stir Fry with Tofu");
    assert_eq!(
        out[0].meals.snack.as_ref().map(|r| r.title.as_str()),
        Some("FR_Greek Yogurt with Berries")
    );
}
