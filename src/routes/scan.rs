//! Label scan route
//!
//! POST /api/v1/scan drives the whole pipeline: store the uploaded
//! photo, OCR it, parse the text, classify the ingredients, and attach
//! recommendations. OCR failure degrades to an empty text with a
//! warning on the report rather than failing the scan.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::label::classifier::{analyze_ingredients, high_impact_suggestions};
use crate::label::parser::parse_product_info;
use crate::label::{Alternative, IngredientImpact, Nutrition, Suggestion};
use crate::state::AppState;

/// Create the scan router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(scan))
        // Label photos from phone cameras run a few MB
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
}

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub image_file: String,
    pub extracted_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_warning: Option<String>,
    pub product_name: String,
    pub brand: String,
    pub nutrition: Nutrition,
    pub ingredients: Vec<String>,
    pub ingredient_impacts: Vec<IngredientImpact>,
    pub health_summary: Vec<String>,
    pub overall_label: String,
    pub suggestions: Vec<Suggestion>,
    pub alternatives: Vec<Alternative>,
}

/// POST /api/v1/scan
async fn scan(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ScanReport>> {
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
    {
        if field.name() == Some("image") {
            let filename = field.file_name().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read image data: {}", e)))?;
            upload = Some((filename, data.to_vec()));
            break;
        }
    }

    let Some((filename, data)) = upload else {
        return Err(AppError::BadRequest(
            "No image received. Please upload or capture an image.".to_string(),
        ));
    };

    let stored = state.images().store(filename.as_deref(), &data).await?;

    let (extracted_text, ocr_warning) = match state.ocr().recognize(&data, None, None).await {
        Ok(result) => {
            tracing::debug!(
                provider = ?result.provider,
                chars = result.text.len(),
                "OCR complete"
            );
            (result.text, None)
        }
        Err(e) => {
            tracing::warn!("OCR failed: {}. Proceeding without OCR text.", e);
            (
                String::new(),
                Some("OCR failed. Proceeding without OCR text.".to_string()),
            )
        }
    };

    let info = parse_product_info(&extracted_text);
    let analysis = analyze_ingredients(&info.ingredients);
    let suggestions = high_impact_suggestions(&analysis.impacts);
    let alternatives = state.recommender().recommend(&info.nutrition);

    tracing::info!(
        username = %user.username,
        image = %stored.filename,
        product = %info.product_name,
        ingredients = info.ingredients.len(),
        high_impact = analysis.high_count,
        "Scan complete"
    );

    Ok(Json(ScanReport {
        image_file: stored.filename,
        extracted_text,
        ocr_warning,
        product_name: info.product_name,
        brand: info.brand,
        nutrition: info.nutrition,
        ingredients: info.ingredients,
        ingredient_impacts: analysis.impacts,
        health_summary: analysis.health_summary,
        overall_label: analysis.overall_label,
        suggestions,
        alternatives,
    }))
}
