use app_api::AppContext;

/// Header carrying the optional API token.
pub const TOKEN_HEADER: &str = "x-session-costs-token";

#[derive(Clone)]
pub struct HttpState {
    pub context: AppContext,
    pub api_token: Option<String>,
}

impl HttpState {
    pub fn new(context: AppContext, api_token: Option<String>) -> Self {
        let api_token = api_token.filter(|token| !token.trim().is_empty());
        Self { context, api_token }
    }
}
