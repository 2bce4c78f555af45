//! REST Client
//!
//! [`ApiClient`] owns the HTTP connection pool and the [`Session`]; the
//! per-service facades borrow it and map one method to one endpoint.

mod auth;
mod conveyor;
mod defects;
mod logs;
mod maintenance;
mod notifications;
mod reports;

pub use auth::AuthService;
pub use conveyor::ConveyorService;
pub use defects::{DefectFilter, DefectService};
pub use logs::LogService;
pub use maintenance::{HealthReport, MaintenanceService};
pub use notifications::NotificationService;
pub use reports::ReportService;

use crate::config::ClientConfig;
use crate::infographics::InfographicsView;
use crate::model::{ConveyorParameters, Defect};
use crate::session::Session;
use crate::{BeltwatchError, Result};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the monitoring server
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
    /// No overall timeout: event streams stay open indefinitely
    stream_client: reqwest::Client,
    session: Session,
}

impl ApiClient {
    /// Client with a session taken from `config.token_path` (or in memory)
    pub fn new(config: ClientConfig) -> Self {
        let session = match &config.token_path {
            Some(path) => Session::persistent(path.clone()),
            None => Session::new(),
        };
        Self::with_session(config, session)
    }

    /// Client sharing an existing session
    pub fn with_session(config: ClientConfig, session: Session) -> Self {
        let http_client = build_or_default(
            "http",
            reqwest::Client::builder()
                .timeout(config.timeout())
                .user_agent(&config.user_agent),
        );
        let stream_client = build_or_default(
            "stream",
            reqwest::Client::builder()
                .connect_timeout(config.timeout())
                .tcp_keepalive(Duration::from_secs(30))
                .user_agent(&config.user_agent),
        );

        Self {
            base_url: config.base_url(),
            http_client,
            stream_client,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn defects(&self) -> DefectService<'_> {
        DefectService::new(self)
    }

    pub fn conveyor(&self) -> ConveyorService<'_> {
        ConveyorService::new(self)
    }

    pub fn logs(&self) -> LogService<'_> {
        LogService::new(self)
    }

    pub fn maintenance(&self) -> MaintenanceService<'_> {
        MaintenanceService::new(self)
    }

    pub fn notifications(&self) -> NotificationService<'_> {
        NotificationService::new(self)
    }

    pub fn reports(&self) -> ReportService<'_> {
        ReportService::new(self)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.http_client.request(method, self.url(path)))
    }

    pub(crate) fn stream_request(&self, path: &str) -> RequestBuilder {
        self.authorize(self.stream_client.get(self.url(path)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and turn non-success statuses into errors
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            warn!(target: "client", error = %e, "Request failed");
            BeltwatchError::HttpError(e)
        })?;

        let status = response.status();
        debug!(target: "client", url = %response.url(), status = %status, "Response received");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(status, &body);
        if status == StatusCode::UNAUTHORIZED {
            warn!(target: "client", detail = %detail, "Credentials rejected; signing out");
            self.session.logout();
            return Err(BeltwatchError::Unauthorized(detail));
        }
        warn!(target: "client", status = %status, detail = %detail, "API returned error");
        Err(BeltwatchError::ApiError {
            status: status.as_u16(),
            detail,
        })
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(self.request(Method::GET, path)).await
    }
}

/// A builder rejected by reqwest (e.g. an unusable user agent) falls back to
/// a stock client without the configured timeout or user agent.
fn build_or_default(kind: &'static str, builder: reqwest::ClientBuilder) -> reqwest::Client {
    builder.build().unwrap_or_else(|e| {
        warn!(target: "client", client = kind, error = %e, "Client settings rejected; using reqwest defaults");
        reqwest::Client::new()
    })
}

/// FastAPI reports failures as `{"detail": ...}`; fall back to the raw body
/// or the status reason.
fn error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(s)) => return s.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}

/// The two independent fetches the belt infographic waits on
#[async_trait]
pub trait InfographicsSource: Send + Sync {
    async fn fetch_defects(&self) -> Result<Vec<Defect>>;

    async fn fetch_parameters(&self) -> Result<ConveyorParameters>;
}

#[async_trait]
impl InfographicsSource for ApiClient {
    async fn fetch_defects(&self) -> Result<Vec<Defect>> {
        self.defects().all().await
    }

    async fn fetch_parameters(&self) -> Result<ConveyorParameters> {
        self.conveyor().parameters().await
    }
}

/// Outcome of both fetches; each side succeeds or fails on its own
#[derive(Debug)]
pub struct InfographicsInputs {
    pub defects: Result<Vec<Defect>>,
    pub parameters: Result<ConveyorParameters>,
}

impl InfographicsInputs {
    /// Feed whatever arrived into the view and hand back the failures for
    /// the caller to report. Returns the errors and whether the grid changed.
    pub fn apply(self, view: &mut InfographicsView) -> (bool, Vec<BeltwatchError>) {
        let mut errors = Vec::new();
        let mut recomputed = false;
        match self.parameters {
            Ok(params) => recomputed |= view.set_parameters(&params),
            Err(e) => errors.push(e),
        }
        match self.defects {
            Ok(defects) => recomputed |= view.set_defects(defects),
            Err(e) => errors.push(e),
        }
        (recomputed, errors)
    }
}

/// Run the defect and parameter fetches concurrently
pub async fn fetch_infographics_inputs<S>(source: &S) -> InfographicsInputs
where
    S: InfographicsSource + ?Sized,
{
    let (defects, parameters) = tokio::join!(source.fetch_defects(), source.fetch_parameters());
    InfographicsInputs {
        defects,
        parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_prefers_fastapi_detail() {
        let body = r#"{"detail":"There is no defect with id=9"}"#;
        assert_eq!(
            error_detail(StatusCode::NOT_FOUND, body),
            "There is no defect with id=9"
        );
    }

    #[test]
    fn error_detail_falls_back_to_body_then_reason() {
        assert_eq!(error_detail(StatusCode::BAD_GATEWAY, "upstream down\n"), "upstream down");
        assert_eq!(error_detail(StatusCode::SERVICE_UNAVAILABLE, ""), "Service Unavailable");
        let structured = r#"{"detail":[{"loc":["query"],"msg":"field required"}]}"#;
        assert!(error_detail(StatusCode::UNPROCESSABLE_ENTITY, structured).contains("field required"));
    }
}
