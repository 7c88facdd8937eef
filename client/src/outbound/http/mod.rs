//! Reqwest-backed adapter for the GoBarber REST API.
//!
//! This adapter owns transport details only: URL joining, bearer headers,
//! timeouts, status mapping and JSON decoding. One [`HttpApiClient`] implements
//! every gateway port.

mod dto;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use self::dto::{
    ForgotPasswordRequest, NewAccountRequest, ProfileUpdateRequest, ResetPasswordRequest,
    SessionRequest, SessionResponse,
};
use crate::domain::ports::{
    AccountGateway, ApiError, AuthGateway, PasswordGateway, ScheduleGateway,
};
use crate::domain::{
    Appointment, AuthToken, AvatarUpload, DayAvailability, NewAccount, PasswordReset,
    ProfileUpdate, Session, SignInCredentials, User, UserId,
};

/// Multipart field name expected by `PATCH users/avatar`.
const AVATAR_FIELD: &str = "avatar";

/// REST client bound to one API base URL.
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
}

impl HttpApiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: normalise_base_url(base_url),
        })
    }

    /// Base URL every endpoint is joined onto, always ending in `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|error| ApiError::invalid_request(format!("cannot join {path}: {error}")))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "api response");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        decode(&body)
    }
}

/// Make sure relative joins append to the base path instead of replacing it.
fn normalise_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid response payload: {error}")))
}

fn bearer(request: RequestBuilder, token: &AuthToken) -> RequestBuilder {
    request.bearer_auth(token.expose())
}

#[async_trait]
impl AuthGateway for HttpApiClient {
    async fn create_session(&self, credentials: &SignInCredentials) -> Result<Session, ApiError> {
        let url = self.endpoint("sessions")?;
        let request = self.client.post(url).json(&SessionRequest::from(credentials));
        let response: SessionResponse = self.send_json(request).await?;
        Ok(response.into_session())
    }
}

#[async_trait]
impl AccountGateway for HttpApiClient {
    async fn create_account(&self, account: &NewAccount) -> Result<User, ApiError> {
        let url = self.endpoint("users")?;
        let request = self.client.post(url).json(&NewAccountRequest::from(account));
        self.send_json(request).await
    }

    async fn update_profile(
        &self,
        token: &AuthToken,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let url = self.endpoint("profile")?;
        let request = bearer(self.client.put(url), token).json(&ProfileUpdateRequest::from(update));
        self.send_json(request).await
    }

    async fn upload_avatar(
        &self,
        token: &AuthToken,
        avatar: &AvatarUpload,
    ) -> Result<User, ApiError> {
        let url = self.endpoint("users/avatar")?;
        let part = Part::bytes(avatar.bytes.clone())
            .file_name(avatar.file_name.clone())
            .mime_str(&avatar.content_type)
            .map_err(|error| ApiError::invalid_request(format!("invalid content type: {error}")))?;
        let form = Form::new().part(AVATAR_FIELD, part);
        let request = bearer(self.client.patch(url), token).multipart(form);
        self.send_json(request).await
    }
}

#[async_trait]
impl PasswordGateway for HttpApiClient {
    async fn request_reset(&self, email: &str) -> Result<(), ApiError> {
        let url = self.endpoint("password/forgot")?;
        let request = self.client.post(url).json(&ForgotPasswordRequest { email });
        self.send(request).await.map(drop)
    }

    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), ApiError> {
        let url = self.endpoint("password/reset")?;
        let request = self.client.post(url).json(&ResetPasswordRequest::from(reset));
        self.send(request).await.map(drop)
    }
}

#[async_trait]
impl ScheduleGateway for HttpApiClient {
    async fn month_availability(
        &self,
        token: &AuthToken,
        provider_id: &UserId,
        year: i32,
        month: u32,
    ) -> Result<Vec<DayAvailability>, ApiError> {
        let url = self.endpoint(&format!("providers/{provider_id}/month-availability"))?;
        let request = bearer(self.client.get(url), token)
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        self.send_json(request).await
    }

    async fn appointments_on(
        &self,
        token: &AuthToken,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, ApiError> {
        let url = self.endpoint("appointments/me")?;
        let request = bearer(self.client.get(url), token).query(&[
            ("day", date.day().to_string()),
            ("month", date.month().to_string()),
            ("year", date.year().to_string()),
        ]);
        self.send_json(request).await
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::timeout(error.to_string())
    } else {
        ApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::UNAUTHORIZED => ApiError::unauthorized(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ApiError::timeout(message),
        _ => ApiError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
