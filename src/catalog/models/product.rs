//! # Product Records
//!
//! Typed records decoded from the catalog API. Optional fields stay optional
//! all the way to the rendering boundary, where the views pick a fallback.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Nutrition quality rating assigned by the data source (`A` best, `E` worst)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NutritionGrade {
    A,
    B,
    C,
    D,
    E,
}

impl NutritionGrade {
    /// All grades from best to worst
    pub const ALL: [NutritionGrade; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Upper-case letter used for display
    pub fn letter(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }
}

impl fmt::Display for NutritionGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for NutritionGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            "e" => Ok(Self::E),
            other => Err(format!("unknown nutrition grade '{other}'")),
        }
    }
}

/// Summary record shown in the product list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    #[serde(alias = "code", alias = "barcode", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<String>,
    /// `None` when the source has no grade or an unrecognised one
    #[serde(default, deserialize_with = "lenient_grade")]
    pub nutrition_grade: Option<NutritionGrade>,
}

/// Nutrient facts per 100 g
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Nutriments {
    #[serde(default)]
    pub energy_100g: Option<f64>,
    #[serde(default)]
    pub fat_100g: Option<f64>,
    #[serde(default)]
    pub carbohydrates_100g: Option<f64>,
    #[serde(default)]
    pub proteins_100g: Option<f64>,
}

/// Full record shown on the detail screen
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutriments: Nutriments,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub labels: Vec<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D>(deserializer: D) -> Result<Nutriments, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Nutriments>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_grade<'de, D>(deserializer: D) -> Result<Option<NutritionGrade>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}
