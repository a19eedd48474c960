//! Shared helpers for integration tests

#![allow(dead_code)]

use pantry::catalog::models::{NutritionGrade, ProductDetails};
use pantry::catalog::services::sample_product;
use pantry::config::ApiProfile;
use std::time::Duration;

/// Profile pointed at a mock server
pub fn profile_for(base_url: &str) -> ApiProfile {
    let mut profile = ApiProfile::blank("test");
    profile.base_url = base_url.to_string();
    profile.timeout = Some(Duration::from_secs(5));
    profile
}

/// Products spread over two categories with mixed grades
pub fn pantry_shelf() -> Vec<ProductDetails> {
    vec![
        sample_product("1", "Apple Juice", Some("c1"), Some(NutritionGrade::C)),
        sample_product("2", "Banana Chips", Some("c2"), Some(NutritionGrade::D)),
        sample_product("3", "Carrot Soup", Some("c1"), Some(NutritionGrade::A)),
        sample_product("4", "Dark Chocolate", Some("c2"), Some(NutritionGrade::E)),
        sample_product("5", "Espresso", Some("c1"), None),
    ]
}

pub fn product_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "category": "snacks",
        "image_url": format!("https://img.example/{id}.png"),
        "ingredients": ["salt", "sugar"],
        "nutrition_grade": "b"
    })
}
