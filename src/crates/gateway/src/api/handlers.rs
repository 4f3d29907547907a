//! Endpoint handler functions.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use actions::Action;
use agent::ResolveTarget;
use workbook::WorkbookError;

use crate::api::error::{ApiError, ApiResult};
use crate::api::response::{CommandRequest, CommandResponse, HealthResponse};
use crate::api::routes::AppState;
use crate::config::ExecutionMode;

/// Handler for `GET /health`.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        mode: state.config.mode.to_string(),
    })
}

/// Handler for `POST /excel-command`.
///
/// Local mode answers `{"response": <text>}`; delegated mode answers with the
/// resolved action descriptor, verbatim.
pub async fn excel_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> ApiResult<Response> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, command = %request.command, "received command");

    match state.config.mode {
        ExecutionMode::Local => {
            let text = execute_direct(&state, &request.command).await?;
            tracing::info!(%request_id, response = %text, "command finished");
            Ok(Json(CommandResponse { response: text }).into_response())
        }
        ExecutionMode::Delegated => {
            let descriptor = resolve_descriptor(&state, request).await?;
            tracing::info!(%request_id, action = descriptor.name(), "descriptor generated");
            Ok(Json(descriptor).into_response())
        }
    }
}

/// Resolve and execute one command against the configured local document.
///
/// User-correctable spreadsheet failures (missing file, missing sheet, bad
/// address) come back as the response text, phrased as an error message:
/// they are answers, not transport faults.
pub(crate) async fn execute_direct(state: &AppState, command: &str) -> ApiResult<String> {
    let action = state.resolver.resolve(command, &ResolveTarget::Local).await?;

    match action {
        Action::InformUser { message } | Action::Error { message } => Ok(message),
        action => {
            let path = &state.config.workbook_path;
            let outcome = match &state.pool {
                Some(pool) => {
                    pool.with_document(path, |book| workbook::execute(book, &action))
                        .await
                }
                None => {
                    workbook::with_document(path, |book| workbook::execute(book, &action)).await
                }
            };

            match outcome {
                Ok(result) => Ok(result.to_string()),
                Err(e) if is_reportable(&e) => Ok(format!("Error: {e}")),
                Err(e) => Err(ApiError::Workbook(e)),
            }
        }
    }
}

/// Resolve one command into a descriptor for the named workbook.
async fn resolve_descriptor(state: &AppState, request: CommandRequest) -> ApiResult<Action> {
    let workbook_name = request
        .workbook_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("'workbook_name' is required".to_string()))?;

    let target = ResolveTarget::Delegated { workbook_name };
    match state.resolver.resolve(&request.command, &target).await {
        Ok(action) => Ok(action),
        // User-correctable resolution failures become error descriptors the
        // front end can display; transport faults stay HTTP errors.
        Err(e) if e.is_user_correctable() => Ok(Action::error(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Failures the user can fix by rephrasing or by supplying the right file.
fn is_reportable(error: &WorkbookError) -> bool {
    matches!(error, WorkbookError::DocumentNotFound(_)) || error.is_user_correctable()
}
