//! Label analysis
//!
//! The heart of the scanner: heuristic parsing of OCR text into product
//! facts, classification of ingredient tokens against static tables, and
//! the dataset-backed "healthier alternative" lookup.
//!
//! The parsing heuristics are deliberately simple line/regex scans; their
//! fragility on messy OCR output is part of the documented behavior, not
//! something this module tries to repair.

pub mod classifier;
pub mod parser;
pub mod recommend;
mod types;

pub use types::{
    Alternative, ImpactTier, IngredientAnalysis, IngredientImpact, Nutrition, ProductInfo,
    Suggestion,
};
