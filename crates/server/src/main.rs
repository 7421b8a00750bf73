// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use rota_api::{
    ApiError, AssignmentResponse, AuthError, AuthenticatedActor, BulkDeleteRequest,
    BulkDeleteResponse, CopyWeekRequest, CopyWeekResponse, CreateAssignmentRequest,
    DayViewResponse, MarkChangedResponse, MyRotaRequest, MyRotaResponse, ResetWeekStatusResponse,
    Role, RoleBasedPolicy, RotaPolicy, SetWeekStatusRequest, SetWeekStatusResponse,
    ShiftPresetResponse, TeamViewRequest, UpdateAssignmentRequest, WeekStatusResponse,
    WeekViewResponse,
};
use rota_notify::{NotificationDispatcher, TracingDispatcher};
use rota_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Header carrying the caller's user id.
const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the caller's role.
const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Rota Server - HTTP server for the pharmacy weekly rota
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
///
/// The connection is held for the duration of one handler call.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    policy: Arc<dyn RotaPolicy + Send + Sync>,
    dispatcher: Arc<dyn NotificationDispatcher + Send + Sync>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable { .. } => {
                error!(error = %err, "Store unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        ApiError::from(err).into()
    }
}

/// Reads the caller's identity from the actor headers.
fn authenticate(headers: &HeaderMap) -> Result<AuthenticatedActor, HttpError> {
    let header = |name: &str| -> Result<String, HttpError> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                AuthError::AuthenticationFailed {
                    reason: format!("Missing '{name}' header"),
                }
                .into()
            })
    };

    let id: String = header(ACTOR_ID_HEADER)?;
    let role: Role = header(ACTOR_ROLE_HEADER)?.parse()?;
    Ok(AuthenticatedActor::new(id, role))
}

/// Handler for GET `/shift_presets`.
async fn handle_list_shift_presets(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ShiftPresetResponse>>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    Ok(Json(rota_api::list_shift_presets(
        &*app_state.policy,
        &actor,
    )?))
}

/// Handler for POST `/assignments`.
async fn handle_create_assignment(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = %actor.id,
        staff_id = %req.staff_id,
        week_id = %req.week_id,
        day_index = req.day_index,
        "Handling create_assignment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let created: AssignmentResponse =
        rota_api::create_assignment(&mut *persistence, &*app_state.policy, &actor, req)?;
    drop(persistence);

    info!(assignment_id = %created.id, "Created assignment");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET `/assignments/{id}`.
async fn handle_get_assignment(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<AssignmentResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::get_assignment(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &id,
    )?))
}

/// Handler for PATCH `/assignments/{id}`.
async fn handle_update_assignment(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<UpdateAssignmentRequest>,
) -> Result<Json<AssignmentResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = %actor.id, assignment_id = %id, "Handling update_assignment request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::update_assignment(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &id,
        req,
    )?))
}

/// Handler for DELETE `/assignments/{id}`.
async fn handle_delete_assignment(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = %actor.id, assignment_id = %id, "Handling delete_assignment request");

    let mut persistence = app_state.persistence.lock().await;
    rota_api::delete_assignment(&mut *persistence, &*app_state.policy, &actor, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/assignments/bulk_delete`.
async fn handle_bulk_delete(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = %actor.id, count = req.ids.len(), "Handling bulk_delete request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::bulk_delete_assignments(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &req,
    )?))
}

/// Handler for DELETE `/weeks/{week_id}/locations/{location_id}/assignments`.
async fn handle_delete_location_assignments(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((week_id, location_id)): Path<(String, String)>,
) -> Result<Json<BulkDeleteResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = %actor.id,
        %week_id,
        %location_id,
        "Handling delete_location_assignments request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::delete_location_assignments(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &week_id,
        &location_id,
    )?))
}

/// Handler for POST `/weeks/{week_id}/copy`.
async fn handle_copy_week(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(week_id): Path<String>,
    Json(req): Json<CopyWeekRequest>,
) -> Result<Json<CopyWeekResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = %actor.id,
        from = %week_id,
        to = %req.to_week_id,
        "Handling copy_week request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::copy_week(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &week_id,
        &req,
    )?))
}

/// Handler for POST `/weeks/{week_id}/teams/{team_id}/view`.
async fn handle_week_view(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((week_id, team_id)): Path<(String, String)>,
    Json(req): Json<TeamViewRequest>,
) -> Result<Json<WeekViewResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::week_view(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &week_id,
        &team_id,
        req,
    )?))
}

/// Handler for POST `/weeks/{week_id}/teams/{team_id}/days/{day_index}/view`.
async fn handle_day_view(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((week_id, team_id, day_index)): Path<(String, String, i64)>,
    Json(req): Json<TeamViewRequest>,
) -> Result<Json<DayViewResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::day_view(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &week_id,
        &team_id,
        day_index,
        req,
    )?))
}

/// Handler for POST `/weeks/{week_id}/staff/{staff_id}/rota`.
async fn handle_my_rota(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((week_id, staff_id)): Path<(String, String)>,
    Json(req): Json<MyRotaRequest>,
) -> Result<Json<MyRotaResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::my_rota(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &week_id,
        &staff_id,
        req,
    )?))
}

/// Handler for GET `/weeks/{week_id}/teams/{team_id}/status`.
async fn handle_get_week_status(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((week_id, team_id)): Path<(String, String)>,
) -> Result<Json<WeekStatusResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::get_week_status(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &week_id,
        &team_id,
    )?))
}

/// Handler for PUT `/weeks/{week_id}/teams/{team_id}/status`.
///
/// Sets the status and sends the notification the transition triggers.
async fn handle_set_week_status(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((week_id, team_id)): Path<(String, String)>,
    Json(req): Json<SetWeekStatusRequest>,
) -> Result<Json<SetWeekStatusResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor_id = %actor.id,
        %week_id,
        %team_id,
        status = %req.status,
        "Handling set_week_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SetWeekStatusResponse = rota_api::set_week_status(
        &mut *persistence,
        &*app_state.policy,
        &*app_state.dispatcher,
        &actor,
        &week_id,
        &team_id,
        req,
    )?;
    drop(persistence);

    info!(
        %week_id,
        %team_id,
        from = %response.previous_status,
        to = %response.status.status,
        "Set week status"
    );
    Ok(Json(response))
}

/// Handler for DELETE `/weeks/{week_id}/teams/{team_id}/status`.
async fn handle_reset_week_status(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((week_id, team_id)): Path<(String, String)>,
) -> Result<Json<ResetWeekStatusResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(actor_id = %actor.id, %week_id, %team_id, "Handling reset_week_status request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::reset_week_status(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &week_id,
        &team_id,
    )?))
}

/// Handler for POST `/weeks/{week_id}/teams/{team_id}/changes`.
async fn handle_mark_changed(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path((week_id, team_id)): Path<(String, String)>,
) -> Result<Json<MarkChangedResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rota_api::mark_changed(
        &mut *persistence,
        &*app_state.policy,
        &actor,
        &week_id,
        &team_id,
    )?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/shift_presets", get(handle_list_shift_presets))
        .route("/assignments", post(handle_create_assignment))
        .route("/assignments/bulk_delete", post(handle_bulk_delete))
        .route(
            "/assignments/{id}",
            get(handle_get_assignment)
                .patch(handle_update_assignment)
                .delete(handle_delete_assignment),
        )
        .route("/weeks/{week_id}/copy", post(handle_copy_week))
        .route(
            "/weeks/{week_id}/locations/{location_id}/assignments",
            delete(handle_delete_location_assignments),
        )
        .route("/weeks/{week_id}/teams/{team_id}/view", post(handle_week_view))
        .route(
            "/weeks/{week_id}/teams/{team_id}/days/{day_index}/view",
            post(handle_day_view),
        )
        .route("/weeks/{week_id}/staff/{staff_id}/rota", post(handle_my_rota))
        .route(
            "/weeks/{week_id}/teams/{team_id}/status",
            put(handle_set_week_status)
                .get(handle_get_week_status)
                .delete(handle_reset_week_status),
        )
        .route(
            "/weeks/{week_id}/teams/{team_id}/changes",
            post(handle_mark_changed),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Rota Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        policy: Arc::new(RoleBasedPolicy),
        dispatcher: Arc::new(TracingDispatcher),
    };

    let app: Router = build_router(app_state);

    let listener = tokio::net::TcpListener::bind((args.bind.as_str(), args.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
