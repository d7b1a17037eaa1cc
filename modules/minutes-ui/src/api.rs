//! Typed HTTP client for the meetings API.
//!
//! One method per endpoint, no retries. Any transport error, non-2xx status
//! or undecodable body comes back as a [`ClientError`].

use async_trait::async_trait;
use minutes_types::{CreateMeetingRequest, ErrorResponse, Meeting, UpdateMeetingRequest};
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// The data access seam the views are written against
#[async_trait]
pub trait MeetingsApi: Send + Sync {
    async fn list_meetings(&self) -> Result<Vec<Meeting>, ClientError>;

    /// Search by substring. The query is sent as-is; callers decide what an
    /// empty query means.
    async fn search_meetings(&self, query: &str) -> Result<Vec<Meeting>, ClientError>;

    async fn get_meeting(&self, id: i64) -> Result<Meeting, ClientError>;

    async fn create_meeting(&self, req: &CreateMeetingRequest) -> Result<Meeting, ClientError>;

    async fn update_meeting(
        &self,
        id: i64,
        req: &UpdateMeetingRequest,
    ) -> Result<Meeting, ClientError>;

    async fn delete_meeting(&self, id: i64) -> Result<(), ClientError>;
}

pub struct MeetingsClient {
    base_url: String,
    client: reqwest::Client,
}

impl MeetingsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn meetings_url(&self) -> String {
        format!("{}/api/meetings", self.base_url)
    }

    fn meeting_url(&self, id: i64) -> String {
        format!("{}/api/meetings/{}", self.base_url, id)
    }
}

/// Turn a non-2xx response into an error, keeping the server's message
async fn check(resp: Response) -> Result<Response, ClientError> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .ok()
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()));

    log::debug!("Meetings API returned HTTP {}: {:?}", status, message);
    Err(ClientError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let resp = check(resp).await?;
    resp.json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl MeetingsApi for MeetingsClient {
    async fn list_meetings(&self) -> Result<Vec<Meeting>, ClientError> {
        let resp = self
            .client
            .get(self.meetings_url())
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(resp).await
    }

    async fn search_meetings(&self, query: &str) -> Result<Vec<Meeting>, ClientError> {
        let resp = self
            .client
            .get(self.meetings_url())
            .query(&[("q", query)])
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(resp).await
    }

    async fn get_meeting(&self, id: i64) -> Result<Meeting, ClientError> {
        let resp = self
            .client
            .get(self.meeting_url(id))
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(resp).await
    }

    async fn create_meeting(&self, req: &CreateMeetingRequest) -> Result<Meeting, ClientError> {
        let resp = self
            .client
            .post(self.meetings_url())
            .json(req)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(resp).await
    }

    async fn update_meeting(
        &self,
        id: i64,
        req: &UpdateMeetingRequest,
    ) -> Result<Meeting, ClientError> {
        let resp = self
            .client
            .put(self.meeting_url(id))
            .json(req)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        decode(resp).await
    }

    async fn delete_meeting(&self, id: i64) -> Result<(), ClientError> {
        let resp = self
            .client
            .delete(self.meeting_url(id))
            .send()
            .await
            .map_err(ClientError::Transport)?;
        check(resp).await?;
        Ok(())
    }
}
