use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header::ORIGIN},
    middleware::Next,
    response::Response,
};

use crate::{
    errors::HttpError,
    state::{HttpState, TOKEN_HEADER},
};

/// Accepts requests from loopback pages only and, when a token is
/// configured, only those presenting it.
pub async fn require_local_client(
    State(state): State<HttpState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    if let Some(origin) = req.headers().get(ORIGIN) {
        let origin = origin.to_str().map_err(|_| {
            HttpError::new(
                StatusCode::BAD_REQUEST,
                "invalid Origin header",
                Some("invalid_origin".to_string()),
            )
        })?;
        if !is_loopback_origin(origin) {
            return Err(HttpError::new(
                StatusCode::FORBIDDEN,
                "invalid origin",
                Some("invalid_origin".to_string()),
            ));
        }
    }

    if let Some(expected) = state.api_token.as_deref() {
        let token = req
            .headers()
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());
        if token != Some(expected) {
            return Err(HttpError::new(
                StatusCode::UNAUTHORIZED,
                "missing or invalid API token",
                Some("token_invalid".to_string()),
            ));
        }
    }

    Ok(next.run(req).await)
}

fn is_loopback_origin(origin: &str) -> bool {
    let Some((scheme, rest)) = origin.split_once("://") else {
        return false;
    };
    if scheme != "http" && scheme != "https" {
        return false;
    }
    let host = match rest.strip_prefix('[') {
        Some(v6) => v6.split_once(']').map(|(host, _)| host),
        None => Some(rest.split(':').next().unwrap_or(rest)),
    };
    matches!(host, Some("127.0.0.1" | "localhost" | "::1"))
}
