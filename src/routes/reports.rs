//! History, insights, and goals routes
//!
//! History requires a login; insights and goals serve anonymous
//! visitors a generic set.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::auth::{AuthUser, MaybeAuthUser};
use crate::report::{
    anonymous_insights, empty_goals_placeholder, empty_insights_placeholder, sample_goals,
    sample_history, stored_insights, Goal, HistoryEntry, Insight,
};
use crate::state::AppState;

/// Create the reports router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(history))
        .route("/insights", get(insights))
        .route("/goals", get(goals))
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub scans: Vec<HistoryEntry>,
    pub total: usize,
}

/// GET /api/v1/history
async fn history(AuthUser(_user): AuthUser) -> Json<HistoryResponse> {
    let scans = sample_history();
    let total = scans.len();
    Json(HistoryResponse { scans, total })
}

#[derive(Serialize)]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
}

/// GET /api/v1/insights
async fn insights(MaybeAuthUser(user): MaybeAuthUser) -> Json<InsightsResponse> {
    let insights = match user {
        Some(_) => {
            let stored = stored_insights();
            if stored.is_empty() {
                empty_insights_placeholder()
            } else {
                stored
            }
        }
        None => anonymous_insights(),
    };
    Json(InsightsResponse { insights })
}

#[derive(Serialize)]
pub struct GoalsResponse {
    pub goals: Vec<Goal>,
}

/// GET /api/v1/goals
async fn goals(MaybeAuthUser(user): MaybeAuthUser) -> Json<GoalsResponse> {
    let goals = match user {
        Some(_) => {
            let stored = sample_goals();
            if stored.is_empty() {
                empty_goals_placeholder()
            } else {
                stored
            }
        }
        None => sample_goals(),
    };
    Json(GoalsResponse { goals })
}
