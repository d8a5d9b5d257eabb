//! Ingredient classification against static tables
//!
//! Two lookups drive the health report:
//! - a substring scan against a short unhealthy-keyword list
//! - an exact lowercase lookup in a three-tier impact table, defaulting
//!   to Moderate for anything the table doesn't know

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::types::{ImpactTier, IngredientAnalysis, IngredientImpact, Suggestion};

/// Keywords that flag an ingredient as unhealthy when they appear
/// anywhere in its lowercase form.
pub const UNHEALTHY_INGREDIENTS: [&str; 5] =
    ["sugar", "salt", "corn syrup", "hydrogenated", "trans fat"];

/// Static health-impact table. Exact lowercase match; unknown
/// ingredients default to Moderate.
static IMPACT_TABLE: Lazy<HashMap<&'static str, ImpactTier>> = Lazy::new(|| {
    use ImpactTier::{High, Low, Moderate};

    HashMap::from([
        ("sugar", High),
        ("salt", High),
        ("trans fat", High),
        ("butter", High),
        ("margarine", High),
        ("processed meat", High),
        ("mayonnaise", High),
        ("white bread", High),
        ("ice cream", High),
        ("chocolate syrup", High),
        ("cream", High),
        ("donuts", High),
        ("candy", High),
        ("honey", Moderate),
        ("flour", Moderate),
        ("soy lecithin", Moderate),
        ("corn syrup", Moderate),
        ("almond milk", Moderate),
        ("yogurt", Moderate),
        ("cheese", Moderate),
        ("rice", Moderate),
        ("pasta", Moderate),
        ("peanut butter", Moderate),
        ("oatmeal", Moderate),
        ("milk chocolate", Moderate),
        ("olive oil", Low),
        ("milk", Low),
        ("cocoa", Low),
        ("vegetables", Low),
        ("fruits", Low),
        ("nuts", Low),
        ("whole grains", Low),
        ("chicken breast", Low),
        ("fish", Low),
        ("tofu", Low),
    ])
});

/// Impact tier for one ingredient token.
pub fn impact_of(ingredient: &str) -> ImpactTier {
    IMPACT_TABLE
        .get(ingredient.to_lowercase().as_str())
        .copied()
        .unwrap_or(ImpactTier::Moderate)
}

/// Whether any unhealthy keyword occurs in the ingredient.
pub fn is_unhealthy(ingredient: &str) -> bool {
    let lower = ingredient.to_lowercase();
    UNHEALTHY_INGREDIENTS.iter().any(|kw| lower.contains(kw))
}

/// Classify an ingredient list: per-token impact and unhealthy flag, a
/// summary of what was found, and an overall Healthy/Unhealthy label.
pub fn analyze_ingredients(ingredients: &[String]) -> IngredientAnalysis {
    let impacts: Vec<IngredientImpact> = ingredients
        .iter()
        .map(|ingredient| IngredientImpact {
            ingredient: ingredient.clone(),
            impact: impact_of(ingredient),
            unhealthy: is_unhealthy(ingredient),
        })
        .collect();

    let unhealthy: Vec<&str> = impacts
        .iter()
        .filter(|i| i.unhealthy)
        .map(|i| i.ingredient.as_str())
        .collect();

    let high_count = impacts
        .iter()
        .filter(|i| i.impact == ImpactTier::High)
        .count();

    let mut health_summary = Vec::new();
    if unhealthy.is_empty() {
        health_summary.push("No unhealthy ingredients detected".to_string());
    } else {
        health_summary.push(format!(
            "Contains unhealthy ingredients: {}",
            unhealthy.join(", ")
        ));
    }
    health_summary.push(format!("{} high impact ingredient(s) detected.", high_count));

    let overall_label = if unhealthy.is_empty() {
        "Healthy".to_string()
    } else {
        "Unhealthy".to_string()
    };

    IngredientAnalysis {
        impacts,
        health_summary,
        overall_label,
        high_count,
    }
}

/// One canned suggestion per High-tier ingredient. The nutrition figures
/// are fixed placeholder values for the "better choice" card.
pub fn high_impact_suggestions(impacts: &[IngredientImpact]) -> Vec<Suggestion> {
    impacts
        .iter()
        .filter(|i| i.impact == ImpactTier::High)
        .map(|i| Suggestion {
            name: format!("Lower-sugar alternative to {}", title_case(&i.ingredient)),
            label: "Better Choice".to_string(),
            calories: 150.0,
            protein: 5.0,
            carbs: 18.0,
            fat: 6.0,
            sodium: 80.0,
            reason: format!("Reduce {}", i.ingredient),
            benefits: "Better for health".to_string(),
        })
        .collect()
}

/// A category membership check used by `process_ingredients`.
#[derive(Debug, Clone)]
pub struct CategoryCheck {
    pub name: String,
    pub enabled: bool,
    pub members: Vec<String>,
}

/// Result of scanning a list against an additive catalog and categories.
#[derive(Debug, Clone)]
pub struct ProcessedIngredients {
    /// Unique additive names in first-seen order
    pub additives: Vec<String>,
    /// Per-category hit flags, for every category passed in
    pub category_hits: HashMap<String, bool>,
}

/// Scan ingredients against an additive catalog (identifier -> display
/// name pairs) and a set of category membership lists. Additive matches
/// are by exact or case-insensitive equality; each additive name is
/// reported once. Disabled categories are never scanned and report false.
pub fn process_ingredients(
    ingredients: &[String],
    additives: &[(String, String)],
    categories: &[CategoryCheck],
) -> ProcessedIngredients {
    let mut results = Vec::new();
    let mut seen = std::collections::HashSet::new();
    let mut category_hits: HashMap<String, bool> =
        categories.iter().map(|c| (c.name.clone(), false)).collect();

    for ingredient in ingredients {
        let normalized = ingredient.trim();

        for (identifier, name) in additives {
            if normalized == identifier || normalized.to_lowercase() == identifier.to_lowercase() {
                if seen.insert(name.clone()) {
                    results.push(name.clone());
                }
            }
        }

        for category in categories {
            if !category.enabled {
                continue;
            }
            let hit = category
                .members
                .iter()
                .any(|m| normalized == m || normalized.to_lowercase() == m.to_lowercase());
            if hit {
                category_hits.insert(category.name.clone(), true);
            }
        }
    }

    ProcessedIngredients {
        additives: results,
        category_hits,
    }
}

/// Capitalize the first letter of each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
