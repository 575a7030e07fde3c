use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{WebError, WebResult},
    state::AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackQuery {
    /// Authorization code issued by GitHub
    pub code: Option<String>,
}

fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

#[utoipa::path(
    get,
    path = "/auth/start",
    responses(
        (status = 302, description = "Redirect to the GitHub authorize page"),
        (status = 500, description = "GitHub OAuth not configured")
    ),
    tag = "auth"
)]
pub async fn start(State(state): State<AppState>) -> WebResult<Response> {
    let url = state.oauth.authorize_url()?;
    Ok(found(url))
}

#[utoipa::path(
    get,
    path = "/auth/callback",
    params(CallbackQuery),
    responses(
        (status = 302, description = "Redirect to the completion page with token and username"),
        (status = 400, description = "No code provided"),
        (status = 500, description = "OAuth not configured or GitHub request failed")
    ),
    tag = "auth"
)]
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> WebResult<Response> {
    let code = query
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| WebError::BadRequest("No code provided".to_string()))?;

    let url = state.oauth.complete(&code).await?;
    Ok(found(url))
}
