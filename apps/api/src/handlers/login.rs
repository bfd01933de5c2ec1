use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use dochost_application::LoginOutcome;
use tracing::info;

use crate::dto::OkResponse;
use crate::error::ApiResult;
use crate::form_fields::FormFields;
use crate::request_context::RequestContext;
use crate::state::AppState;

/// POST /login - Check a username/password pair.
pub async fn login_handler(
    State(state): State<AppState>,
    context: RequestContext,
    form: FormFields,
) -> ApiResult<(StatusCode, Json<OkResponse>)> {
    let username = form.first("username").unwrap_or_default();
    let password = form.first("password").unwrap_or_default();

    let outcome = state
        .login_service
        .login(&context.metadata, username, password)
        .await?;

    info!(username, ?outcome, "login attempt");

    Ok(match outcome {
        LoginOutcome::Authenticated => (StatusCode::OK, Json(OkResponse { ok: true })),
        LoginOutcome::Rejected => (StatusCode::UNAUTHORIZED, Json(OkResponse { ok: false })),
    })
}
