use axum::Json;
use axum::extract::State;
use dochost_domain::SubmissionFields;

use crate::dto::OkResponse;
use crate::error::ApiResult;
use crate::form_fields::FormFields;
use crate::request_context::RequestContext;
use crate::state::AppState;

/// POST /submit - Record a form submission.
///
/// Fields that were not sent are logged as empty strings.
pub async fn submit_handler(
    State(state): State<AppState>,
    context: RequestContext,
    form: FormFields,
) -> ApiResult<Json<OkResponse>> {
    let fields = SubmissionFields::from_pairs(form.pairs());

    state
        .submission_service
        .submit(&context.metadata, fields, context.content_length)
        .await?;

    Ok(Json(OkResponse { ok: true }))
}
