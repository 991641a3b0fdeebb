use std::time::Duration;

use reqwest::Client as HttpClient;
use url::Url;

use crate::api::models::{
    meeting_records, MeetingRecord, Message, MessageHistory, OutgoingMessage,
};
use crate::api::{MeetingApi, MessageApi};
use crate::error::ApiError;

/// HTTP access to the chat and meetings backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub http: HttpClient,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            http: builder.build()?,
            base: Self::base_api(base_url)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn base_api(base_url: &str) -> Result<Url, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let api = if trimmed.ends_with("/api") {
            trimmed.to_string()
        } else {
            format!("{}/api", trimmed)
        };
        Ok(Url::parse(&api)?)
    }

    /// Appends percent-encoded path segments to the API base.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value, ApiError> {
        log::debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl MessageApi for ApiClient {
    async fn messages(&self, user_id: &str) -> Result<Vec<Message>, ApiError> {
        let json = self.get_json(self.endpoint(&["messages", user_id])?).await?;
        let history: MessageHistory = serde_json::from_value(json)?;
        Ok(history.messages)
    }

    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), ApiError> {
        let url = self.endpoint(&["messages"])?;
        log::debug!("POST {url}");
        let resp = self.http.post(url).form(message).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(())
    }
}

impl MeetingApi for ApiClient {
    async fn meetings(&self, user_id: &str) -> Result<Vec<MeetingRecord>, ApiError> {
        let json = self.get_json(self.endpoint(&["meetings", user_id])?).await?;
        Ok(meeting_records(json)?)
    }
}
