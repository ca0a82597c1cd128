use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApplicationDataResponse, ApplicationListQuery, ApplicationListResponse,
        ApplicationResponse, ChangesQuery, ChangesResponse, CreateApplicationPayload,
        DeleteApplicationResponse, StatusUpdatePayload, UpdateApplicationPayload,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/applications",
    params(
        ("status" = Option<String>, Query, description = "Exact status filter, or \"all\""),
        ("role" = Option<String>, Query, description = "Case-insensitive role substring, or \"all\""),
        ("search" = Option<String>, Query, description = "Substring over candidate name, role and email")
    ),
    responses(
        (status = 200, description = "Filtered list of applications", body = Json<ApplicationListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let applications = state.application_service.list(query).await?;
    let data: Vec<ApplicationResponse> = applications.into_iter().map(Into::into).collect();
    Ok(Json(ApplicationListResponse {
        success: true,
        count: data.len(),
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Json<ApplicationDataResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    Ok(Json(ApplicationDataResponse {
        success: true,
        message: None,
        data: application.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application created", body = Json<ApplicationDataResponse>),
        (status = 400, description = "Missing or invalid required fields")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state.application_service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationDataResponse {
            success: true,
            message: Some("Application created successfully".to_string()),
            data: application.into(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Application updated", body = Json<ApplicationDataResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state.application_service.update(id, payload).await?;
    Ok(Json(ApplicationDataResponse {
        success: true,
        message: Some("Application updated successfully".to_string()),
        data: application.into(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    request_body = StatusUpdatePayload,
    responses(
        (status = 200, description = "Status updated", body = Json<ApplicationDataResponse>),
        (status = 400, description = "Status outside the patchable set"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdatePayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .update_status(id, &payload.status)
        .await?;
    Ok(Json(ApplicationDataResponse {
        success: true,
        message: Some("Application status updated successfully".to_string()),
        data: application.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(
        ("id" = Uuid, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application deleted", body = Json<DeleteApplicationResponse>),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(id).await?;
    Ok(Json(DeleteApplicationResponse {
        success: true,
        message: "Application deleted successfully".to_string(),
    }))
}

fn default_since() -> chrono::DateTime<chrono::Utc> {
    crate::utils::time::now() - chrono::Duration::minutes(5)
}

#[utoipa::path(
    get,
    path = "/api/applications/changes/poll",
    params(
        ("since" = Option<String>, Query, description = "RFC 3339 timestamp; defaults to five minutes ago")
    ),
    responses(
        (status = 200, description = "Mutations since the given instant", body = Json<ChangesResponse>)
    )
)]
#[axum::debug_handler]
pub async fn poll_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangesQuery>,
) -> Result<impl IntoResponse> {
    let since = query.since.unwrap_or_else(default_since);
    let summary = state.application_service.changes_since(since).await?;
    Ok(Json(ChangesResponse {
        success: true,
        data: summary,
    }))
}
