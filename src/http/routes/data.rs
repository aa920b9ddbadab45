//! Combined weather + crypto endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::aggregate::CombinedReport;
use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CombinedQuery {
    #[validate(length(min = 1, max = 16))]
    pub city: String,

    #[validate(length(min = 1, max = 16))]
    pub currency: String,

    #[serde(default)]
    pub refresh: bool,
}

/// Fan out to both providers and merge; any provider failure surfaces as a
/// 500 with the provider's message string.
pub async fn combined(
    State(state): State<AppState>,
    Query(query): Query<CombinedQuery>,
) -> Result<Json<CombinedReport>, ApiError> {
    query.validate()?;

    let report = state
        .aggregator
        .get_combined(&query.city, &query.currency, query.refresh)
        .await
        .map_err(|e| {
            tracing::error!("Error during get weather and crypto data request, {e}");
            ApiError::from(e)
        })?;

    Ok(Json(report))
}
