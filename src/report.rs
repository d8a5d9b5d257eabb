//! Sample report data
//!
//! The history, insights, and goals pages are populated from fixed
//! sample data; scans are not persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One past scan shown on the history page
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub product_name: String,
    pub ingredients: Vec<String>,
    pub health_report: String,
    pub warnings: Vec<Warning>,
    pub recommendations: Vec<HistoryRecommendation>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    pub ingredient: String,
    pub level: String,
    pub concern: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecommendation {
    pub name: String,
    pub reason: String,
    pub benefits: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Goal {
    pub title: String,
    pub description: String,
}

fn entry(
    product_name: &str,
    ingredients: &[&str],
    health_report: &str,
    warnings: Vec<Warning>,
    recommendations: Vec<HistoryRecommendation>,
) -> HistoryEntry {
    HistoryEntry {
        product_name: product_name.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        health_report: health_report.to_string(),
        warnings,
        recommendations,
        timestamp: Utc::now(),
    }
}

/// The two sample scans every account sees.
pub fn sample_history() -> Vec<HistoryEntry> {
    vec![
        entry(
            "Chocolate Bar",
            &["Sugar", "Cocoa", "Milk"],
            "High in sugar and calories",
            vec![Warning {
                ingredient: "Sugar".to_string(),
                level: "High".to_string(),
                concern: "May affect blood sugar".to_string(),
            }],
            vec![HistoryRecommendation {
                name: "Dark Chocolate".to_string(),
                reason: "Less sugar".to_string(),
                benefits: "Better for health".to_string(),
            }],
        ),
        entry(
            "Granola Bar",
            &["Oats", "Honey", "Nuts"],
            "Good source of fiber",
            vec![],
            vec![HistoryRecommendation {
                name: "Add more nuts".to_string(),
                reason: "Increase protein".to_string(),
                benefits: "Muscle health".to_string(),
            }],
        ),
    ]
}

fn insight(title: &str, description: &str) -> Insight {
    Insight {
        title: title.to_string(),
        description: description.to_string(),
    }
}

/// Insights shown to logged-in users.
pub fn stored_insights() -> Vec<Insight> {
    vec![
        insight(
            "Reduce Sugar Intake",
            "Frequent consumption of high-sugar foods. Reduce them.",
        ),
        insight(
            "Increase Fiber",
            "Add vegetables and whole grains to improve digestion.",
        ),
    ]
}

/// Placeholder when a user has no insights yet.
pub fn empty_insights_placeholder() -> Vec<Insight> {
    vec![insight(
        "No insights yet",
        "Start logging your meals and activity to get insights.",
    )]
}

/// Generic insights for anonymous visitors.
pub fn anonymous_insights() -> Vec<Insight> {
    vec![
        insight("Stay Active", "Try to walk at least 30 minutes daily."),
        insight(
            "Balanced Diet",
            "Include a mix of protein, carbs, and healthy fats.",
        ),
        insight("Hydration", "Drink at least 2-3 liters of water daily."),
    ]
}

fn goal(title: &str, description: &str) -> Goal {
    Goal {
        title: title.to_string(),
        description: description.to_string(),
    }
}

/// The fixed diet goals, shared by anonymous and logged-in users.
pub fn sample_goals() -> Vec<Goal> {
    vec![
        goal("Increase Protein", "Include lean meats, eggs, and legumes."),
        goal("Reduce Sugar", "Avoid sugary drinks and snacks."),
        goal("Drink Water", "Stay hydrated with 2-3 liters daily."),
    ]
}

/// Placeholder when a user has no goals set.
pub fn empty_goals_placeholder() -> Vec<Goal> {
    vec![goal(
        "No goals set",
        "Set your diet goals to get started.",
    )]
}
