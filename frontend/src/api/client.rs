use std::rc::Rc;

use reqwest::{header::HeaderMap, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::session::{self, SessionStore},
    api::types::ApiError,
    config,
};

/// Thin wrapper over the REST backend. Owns the HTTP client, the resolved
/// base URL and the session store; every page repository goes through it.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: Rc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session: session::default_store(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
            session: session::default_store(),
        }
    }

    pub fn with_session_store(mut self, store: Rc<dyn SessionStore>) -> Self {
        self.session = store;
        self
    }

    pub fn session(&self) -> &Rc<dyn SessionStore> {
        &self.session
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) fn get_auth_headers(&self) -> Result<HeaderMap, ApiError> {
        let token = self
            .session
            .access_token()
            .ok_or_else(|| ApiError::unauthorized("Brak aktywnej sesji"))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| ApiError::unauthorized("Nieprawidłowy token sesji"))?,
        );
        Ok(headers)
    }

    /// Sends a request without the 401 handling. Used for the auth endpoints
    /// themselves (login, refresh), which must never trigger a refresh.
    pub(crate) async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<ApiResponse, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        self.execute(request).await
    }

    /// Sends an authenticated request with the refresh-once policy: a 401
    /// response triggers exactly one silent token refresh followed by one
    /// retry of the rebuilt request. A failed refresh, or a 401 on the
    /// retry, ends the session and redirects to the login page. The request
    /// is rebuilt through `build` so the retry picks up the new access token.
    pub(crate) async fn send_with_refresh<F>(&self, build: F) -> Result<ApiResponse, ApiError>
    where
        F: Fn() -> Result<reqwest::RequestBuilder, ApiError>,
    {
        let response = self.send(build()?).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        if let Err(err) = self.refresh_session().await {
            log::warn!("token refresh failed: {}", err.error);
            self.end_session();
            return Ok(response);
        }

        let retried = self.send(build()?).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            self.end_session();
        }
        Ok(retried)
    }

    /// Clears the session unconditionally and leaves the authenticated area.
    pub(crate) fn end_session(&self) {
        self.session.clear();
        redirect_to_login_if_needed();
    }

    pub(crate) async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<ApiResponse, ApiError> {
        #[cfg(all(test, not(target_arch = "wasm32")))]
        if let Some(responder) = lookup_mock(request.url().as_str()) {
            let mock = responder.respond(&request)?;
            let status = StatusCode::from_u16(mock.status)
                .map_err(|_| ApiError::unknown("Invalid mock status"))?;
            return Ok(ApiResponse {
                status,
                body: mock.body,
            });
        }

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::Null)
        };
        Ok(ApiResponse { status, body })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded response: status plus the JSON body (null when the body was empty
/// or not JSON).
pub(crate) struct ApiResponse {
    status: StatusCode,
    body: Value,
}

impl ApiResponse {
    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_value(self.body.clone()).map_err(|e| {
            ApiError::request_failed(format!("Nieprawidłowa odpowiedź serwera: {}", e))
        })
    }

    /// Maps a non-success response to the server-provided message when
    /// present, else a static fallback.
    pub(crate) fn api_error(&self) -> ApiError {
        serde_json::from_value::<ApiError>(self.body.clone())
            .ok()
            .filter(|err| !err.error.trim().is_empty())
            .unwrap_or_else(|| {
                ApiError::request_failed(format!(
                    "Żądanie nie powiodło się (HTTP {})",
                    self.status.as_u16()
                ))
            })
    }
}

fn redirect_to_login_if_needed() {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        let location = window.location();
        if let Ok(pathname) = location.pathname() {
            if pathname == "/login" {
                return;
            }
        }
        let _ = location.set_href("/login");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) use mock_transport::{lookup_mock, register_mock, MockResponse, TestResponder};

#[cfg(all(test, not(target_arch = "wasm32")))]
mod mock_transport {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, OnceLock};

    /// Canned response produced by a registered [`TestResponder`].
    #[derive(Clone)]
    pub struct MockResponse {
        pub status: u16,
        pub body: Value,
    }

    impl MockResponse {
        pub fn json(status: u16, body: Value) -> Self {
            Self { status, body }
        }
    }

    pub trait TestResponder: Send + Sync {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError>;
    }

    fn registry() -> &'static Mutex<HashMap<String, Arc<dyn TestResponder>>> {
        static REGISTRY: OnceLock<Mutex<HashMap<String, Arc<dyn TestResponder>>>> =
            OnceLock::new();
        REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
    }

    /// Routes every request whose URL starts with `base_url` to `responder`
    /// instead of the network.
    pub fn register_mock(base_url: String, responder: Arc<dyn TestResponder>) {
        registry()
            .lock()
            .expect("mock registry lock")
            .insert(base_url, responder);
    }

    pub(crate) fn lookup_mock(url: &str) -> Option<Arc<dyn TestResponder>> {
        let registry = registry().lock().expect("mock registry lock");
        registry
            .iter()
            .filter(|(base, _)| url.starts_with(base.as_str()))
            .max_by_key(|(base, _)| base.len())
            .map(|(_, responder)| Arc::clone(responder))
    }
}
