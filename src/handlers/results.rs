use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{LeadContext, ProtectionMeter, QuizResult};
use crate::services::results;
use crate::state::AppState;

// GET /api/results
#[derive(Deserialize)]
pub struct ResultsQuery {
    pub score: u32,
    pub total: u32,
    pub name: Option<String>,
}

pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<QuizResult>, AppError> {
    if query.score > query.total {
        return Err(AppError::BadRequest(format!(
            "score {} exceeds total {}",
            query.score, query.total
        )));
    }

    let lead = LeadContext {
        lead_name: query.name,
        ..Default::default()
    };

    Ok(Json(results::summarize(
        query.score,
        query.total,
        &lead,
        &state.config.quiz_title,
        state.config.share_url.as_deref(),
    )))
}

// GET /api/meter
#[derive(Deserialize)]
pub struct MeterQuery {
    pub score: f64,
    pub max: Option<f64>,
}

pub async fn get_meter(Query(query): Query<MeterQuery>) -> Result<Json<ProtectionMeter>, AppError> {
    let max = query.max.unwrap_or(100.0);
    if !query.score.is_finite() || !max.is_finite() {
        return Err(AppError::BadRequest(
            "score and max must be finite numbers".to_string(),
        ));
    }

    Ok(Json(ProtectionMeter::reading(query.score, max)))
}
