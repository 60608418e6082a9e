use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use reqwest::{
    RequestBuilder, Response, Url,
    cookie::{CookieStore, Jar},
};
use serde::de::DeserializeOwned;
use tracing::Instrument;
use uspy_model::{
    AuthenticatedUser, Credentials, GradeStats, PasswordRedefinition, Subject, SubjectKey,
    SubjectRelations, SubjectReview, UserGrade,
};
use uuid::Uuid;

use crate::{
    api::{AccountApi, SubjectApi},
    config::ClientConfig,
    error::ClientError,
    metrics, validation,
};

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Name of the session cookie set by the API on login
pub const SESSION_COOKIE: &str = "session";

/// HTTP client for the review API
///
/// Cheap to clone; clones share the connection pool and the cookie jar, so a
/// login through one clone authenticates all of them.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.api_url)))?;

        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.api_url.clone()));
        }

        let jar = Arc::new(Jar::default());
        if let Some(session) = &config.session {
            jar.add_cookie_str(&format!("{SESSION_COOKIE}={session}; Path=/"), &base_url);
        }

        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("uspy-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(api_url = %base_url, "API client created");

        Ok(Self {
            http,
            jar,
            base_url,
        })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Value of the session cookie currently held for the API, if any
    pub fn session(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let cookies = header.to_str().ok()?;

        cookies
            .split(';')
            .filter_map(|cookie| cookie.trim().split_once('='))
            .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
            .map(|(_, value)| value.to_string())
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `{base}/api/subject/{course}/{specialization}/{code}[/{tail}]`
    fn subject_endpoint(&self, key: &SubjectKey, tail: Option<&str>) -> Result<Url, ClientError> {
        let mut segments = vec!["api", "subject"];
        segments.extend(key.segments());
        segments.extend(tail);
        self.endpoint(&segments)
    }

    /// Send a request, tagging it with a request id and recording metrics.
    ///
    /// Non-success statuses are turned into [`ClientError`]s.
    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::debug_span!("api_request", operation, request_id = %request_id);

        async move {
            let started = Instant::now();
            let result = request
                .header(REQUEST_ID_HEADER, &request_id)
                .send()
                .await;
            let elapsed = started.elapsed();

            match result {
                Ok(response) => {
                    let status = response.status();
                    metrics::record_request(operation, Some(status.as_u16()), elapsed);

                    if status.is_success() {
                        tracing::debug!(status = status.as_u16(), ?elapsed, "request succeeded");
                        Ok(response)
                    } else {
                        tracing::debug!(status = status.as_u16(), ?elapsed, "request rejected");
                        Err(ClientError::from_status(status.as_u16()))
                    }
                }
                Err(e) => {
                    metrics::record_request(operation, None, elapsed);
                    tracing::warn!(error = %e, ?elapsed, "request failed");
                    Err(e.into())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
    ) -> Result<T, ClientError> {
        let response = self.send(operation, self.http.get(url)).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl SubjectApi for ApiClient {
    async fn subject(&self, key: &SubjectKey) -> Result<Subject, ClientError> {
        let url = self.subject_endpoint(key, None)?;
        self.get_json("get_subject", url).await
    }

    async fn subject_review(&self, key: &SubjectKey) -> Result<SubjectReview, ClientError> {
        let url = self.subject_endpoint(key, Some("review"))?;
        self.get_json("get_subject_review", url).await
    }

    async fn submit_review(
        &self,
        key: &SubjectKey,
        review: &SubjectReview,
    ) -> Result<(), ClientError> {
        let url = self.subject_endpoint(key, Some("review"))?;
        self.send("submit_subject_review", self.http.post(url).json(review))
            .await?;
        Ok(())
    }

    async fn subject_grades(&self, key: &SubjectKey) -> Result<GradeStats, ClientError> {
        let url = self.subject_endpoint(key, Some("grades"))?;
        self.get_json("get_subject_grades", url).await
    }

    async fn user_grade(&self, key: &SubjectKey) -> Result<UserGrade, ClientError> {
        let url = self.subject_endpoint(key, Some("grade"))?;
        self.get_json("get_user_grade", url).await
    }

    async fn subject_relations(&self, key: &SubjectKey) -> Result<SubjectRelations, ClientError> {
        let url = self.subject_endpoint(key, Some("relations"))?;
        self.get_json("get_subject_relations", url).await
    }
}

#[async_trait]
impl AccountApi for ApiClient {
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>, ClientError> {
        let url = self.endpoint(&["account"])?;
        match self.get_json("get_current_user", url).await {
            Ok(user) => Ok(Some(user)),
            Err(ClientError::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), ClientError> {
        validation::validate_login(&credentials.login, &credentials.password)?;

        let url = self.endpoint(&["account", "login"])?;
        self.send("login", self.http.post(url).json(credentials))
            .await?;

        tracing::info!(login = %credentials.login, "logged in");
        Ok(())
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let url = self.endpoint(&["account", "logout"])?;
        self.send("logout", self.http.get(url)).await?;
        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ClientError> {
        let email = email.trim();
        validation::validate_email(email)?;

        let url = self.endpoint(&["account", "password_redefinition"])?;
        let body = PasswordRedefinition {
            email: email.to_string(),
        };
        self.send("password_redefinition", self.http.post(url).json(&body))
            .await?;
        Ok(())
    }
}
