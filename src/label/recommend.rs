//! Dataset-backed "healthier alternative" lookup
//!
//! Loads a CSV of labeled products and returns the top-k rows labeled
//! healthy. With a fitted scaler on hand the candidates are reordered by
//! cosine similarity between standardized nutrient vectors; without one,
//! file order decides. A missing dataset means no recommendations, never
//! an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::types::{Alternative, Nutrition};

/// A serialized fitted StandardScaler: per-feature mean and scale in
/// feature_names order.
#[derive(Debug, Clone, Deserialize)]
pub struct FittedScaler {
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FittedScaler {
    /// Load a scaler from a JSON file, validating that the vector
    /// lengths line up.
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scaler {}: {}", path.display(), e))?;
        let scaler: FittedScaler = serde_json::from_str(&raw)
            .map_err(|e| format!("Failed to parse scaler {}: {}", path.display(), e))?;

        if scaler.mean.len() != scaler.feature_names.len()
            || scaler.scale.len() != scaler.feature_names.len()
        {
            return Err(format!(
                "Scaler {} has mismatched vector lengths",
                path.display()
            ));
        }

        Ok(scaler)
    }

    /// Standardize a raw feature vector (values in feature_names order).
    fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect()
    }
}

fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

pub struct Recommender {
    dataset_path: PathBuf,
    scaler: Option<FittedScaler>,
    top_k: usize,
}

impl Recommender {
    /// Build a recommender. A scaler that fails to load is logged and
    /// dropped; the recommender then falls back to file order.
    pub fn new(dataset_path: PathBuf, scaler_path: Option<&Path>, top_k: usize) -> Self {
        let scaler = scaler_path.and_then(|path| match FittedScaler::load(path) {
            Ok(scaler) => Some(scaler),
            Err(e) => {
                tracing::warn!("{}; recommendations fall back to file order", e);
                None
            }
        });

        Self {
            dataset_path,
            scaler,
            top_k,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_scaler(dataset_path: PathBuf, scaler: FittedScaler, top_k: usize) -> Self {
        Self {
            dataset_path,
            scaler: Some(scaler),
            top_k,
        }
    }

    /// Recommend up to top_k healthy-labeled products for a scanned
    /// nutrition profile.
    pub fn recommend(&self, nutrition: &Nutrition) -> Vec<Alternative> {
        let mut reader = match csv::Reader::from_path(&self.dataset_path) {
            Ok(reader) => reader,
            Err(e) => {
                tracing::debug!(
                    "Recommendation dataset {} unavailable: {}",
                    self.dataset_path.display(),
                    e
                );
                return Vec::new();
            }
        };

        let candidates: Vec<Alternative> = reader
            .deserialize::<Alternative>()
            .filter_map(|row| match row {
                Ok(row) => Some(row),
                Err(e) => {
                    tracing::warn!("Skipping malformed dataset row: {}", e);
                    None
                }
            })
            .filter(|row| row.label.to_lowercase() == "healthy")
            .collect();

        if candidates.is_empty() {
            return Vec::new();
        }

        match &self.scaler {
            Some(scaler) => self.rank_by_similarity(scaler, nutrition, candidates),
            None => candidates.into_iter().take(self.top_k).collect(),
        }
    }

    fn rank_by_similarity(
        &self,
        scaler: &FittedScaler,
        nutrition: &Nutrition,
        candidates: Vec<Alternative>,
    ) -> Vec<Alternative> {
        let user_raw: Vec<f64> = scaler
            .feature_names
            .iter()
            .map(|name| nutrition.feature(name))
            .collect();
        let user_vec = scaler.transform(&user_raw);

        let mut scored: Vec<(f64, Alternative)> = candidates
            .into_iter()
            .map(|row| {
                let raw: Vec<f64> = scaler
                    .feature_names
                    .iter()
                    .map(|name| row_feature(&row, name))
                    .collect();
                let vec = scaler.transform(&raw);
                (cosine_similarity(&user_vec, &vec), row)
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .take(self.top_k)
            .map(|(_, row)| row)
            .collect()
    }
}

/// Dataset rows expose the same feature names as the parser's nutrition
/// struct; unknown features read as zero.
fn row_feature(row: &Alternative, name: &str) -> f64 {
    match name {
        "calories" => row.calories,
        "protein" => row.protein,
        "carbohydrates" => row.carbohydrates,
        "fat" => row.fat,
        "sodium" => row.sodium,
        _ => 0.0,
    }
}
