//! Types shared across label parsing, classification, and recommendation

use serde::{Deserialize, Serialize};

/// Facts extracted from the OCR text of one label photo
#[derive(Debug, Clone, Serialize)]
pub struct ProductInfo {
    pub product_name: String,
    pub brand: String,
    pub nutrition: Nutrition,
    pub ingredients: Vec<String>,
}

/// The five nutrition figures the parser knows how to extract.
/// A nutrient the label doesn't mention reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    pub sodium: f64,
}

impl Nutrition {
    /// Look up a figure by its dataset/scaler feature name.
    /// Unknown feature names read as zero, matching the original lookup
    /// semantics of a dict with a zero default.
    pub fn feature(&self, name: &str) -> f64 {
        match name {
            "calories" => self.calories,
            "protein" => self.protein,
            "carbohydrates" => self.carbohydrates,
            "fat" => self.fat,
            "sodium" => self.sodium,
            _ => 0.0,
        }
    }
}

/// Static health-impact tier of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactTier {
    High,
    Moderate,
    Low,
}

impl std::fmt::Display for ImpactTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ImpactTier::High => "High",
            ImpactTier::Moderate => "Moderate",
            ImpactTier::Low => "Low",
        };
        f.write_str(s)
    }
}

/// Per-ingredient classification result
#[derive(Debug, Clone, Serialize)]
pub struct IngredientImpact {
    pub ingredient: String,
    pub impact: ImpactTier,
    pub unhealthy: bool,
}

/// Whole-list classification result
#[derive(Debug, Clone, Serialize)]
pub struct IngredientAnalysis {
    pub impacts: Vec<IngredientImpact>,
    pub health_summary: Vec<String>,
    pub overall_label: String,
    pub high_count: usize,
}

/// Canned suggestion attached to a High-tier ingredient
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub label: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sodium: f64,
    pub reason: String,
    pub benefits: String,
}

/// One row of the "healthy alternatives" dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    pub product_name: String,
    pub label: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbohydrates: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub sodium: f64,
}
