use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{
    dto::analytics_dto::{AnalyticsResponse, AnalyticsSummary, PeriodAnalyticsResponse},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/analytics",
    responses(
        (status = 200, description = "Dashboard summary over the full record set", body = Json<AnalyticsResponse>),
        (status = 503, description = "Store unreachable; all-zero summary payload")
    )
)]
#[axum::debug_handler]
pub async fn get_analytics(State(state): State<AppState>) -> Response {
    match state.analytics_service.overview().await {
        Ok(summary) => Json(AnalyticsResponse {
            success: true,
            data: summary,
        })
        .into_response(),
        // Degrade instead of failing hard, so the dashboard can render an
        // empty state while the store is down.
        Err(Error::Unavailable(message)) => {
            tracing::warn!("serving degraded analytics: {}", message);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "Database not connected",
                    "data": AnalyticsSummary::empty(),
                })),
            )
                .into_response()
        }
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/analytics/period/{period}",
    params(
        ("period" = String, Path, description = "week, month, quarter or year; anything else means month")
    ),
    responses(
        (status = 200, description = "Totals and status counts for the period", body = Json<PeriodAnalyticsResponse>)
    )
)]
#[axum::debug_handler]
pub async fn get_period_analytics(
    State(state): State<AppState>,
    Path(period): Path<String>,
) -> Result<impl IntoResponse> {
    let summary = state.analytics_service.for_period(&period).await?;
    Ok(Json(PeriodAnalyticsResponse {
        success: true,
        data: summary,
    }))
}
