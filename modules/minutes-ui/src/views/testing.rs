//! In-memory fakes for view tests.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use minutes_types::{CreateMeetingRequest, Meeting, UpdateMeetingRequest};

use super::{Route, Shell};
use crate::api::MeetingsApi;
use crate::error::ClientError;

pub fn meeting(id: i64, title: &str) -> Meeting {
    Meeting {
        id,
        title: title.to_string(),
        content: format!("Notes for {}", title),
        summary: None,
        action_items: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[derive(Default)]
pub struct FakeApi {
    meetings: Mutex<Vec<Meeting>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_meetings(meetings: Vec<Meeting>) -> Self {
        Self {
            meetings: Mutex::new(meetings),
            ..Self::default()
        }
    }

    /// Make every call to `op` fail with HTTP 500
    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Vec<Meeting> {
        self.meetings.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str, call: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(op) {
            return Err(ClientError::Status {
                status: 500,
                message: Some(format!("{} exploded", op)),
            });
        }
        Ok(())
    }

    fn not_found() -> ClientError {
        ClientError::Status {
            status: 404,
            message: Some("Meeting not found".to_string()),
        }
    }
}

#[async_trait]
impl MeetingsApi for FakeApi {
    async fn list_meetings(&self) -> Result<Vec<Meeting>, ClientError> {
        self.record("list", "list".to_string())?;
        Ok(self.stored())
    }

    async fn search_meetings(&self, query: &str) -> Result<Vec<Meeting>, ClientError> {
        self.record("search", format!("search:{}", query))?;
        let needle = query.to_lowercase();
        Ok(self
            .stored()
            .into_iter()
            .filter(|m| {
                m.title.to_lowercase().contains(&needle)
                    || m.content.to_lowercase().contains(&needle)
            })
            .collect())
    }

    async fn get_meeting(&self, id: i64) -> Result<Meeting, ClientError> {
        self.record("get", format!("get:{}", id))?;
        self.stored()
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(Self::not_found)
    }

    async fn create_meeting(&self, req: &CreateMeetingRequest) -> Result<Meeting, ClientError> {
        self.record("create", format!("create:{}", req.title))?;
        let mut meetings = self.meetings.lock().unwrap();
        let id = meetings.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let mut created = meeting(id, &req.title);
        created.content = req.content.clone();
        meetings.push(created.clone());
        Ok(created)
    }

    async fn update_meeting(
        &self,
        id: i64,
        req: &UpdateMeetingRequest,
    ) -> Result<Meeting, ClientError> {
        self.record("update", format!("update:{}", id))?;
        let mut meetings = self.meetings.lock().unwrap();
        let existing = meetings
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(Self::not_found)?;
        existing.title = req.title.clone();
        existing.content = req.content.clone();
        existing.updated_at = Some(Utc::now());
        if req.regenerate_summary {
            existing.summary = Some("- regenerated".to_string());
        }
        Ok(existing.clone())
    }

    async fn delete_meeting(&self, id: i64) -> Result<(), ClientError> {
        self.record("delete", format!("delete:{}", id))?;
        self.meetings.lock().unwrap().retain(|m| m.id != id);
        Ok(())
    }
}

/// Records everything a view asks of its host
#[derive(Debug, Default)]
pub struct RecordingShell {
    pub alerts: Vec<String>,
    pub questions: Vec<String>,
    pub answers: VecDeque<bool>,
    pub routes: Vec<Route>,
}

impl RecordingShell {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Shell for RecordingShell {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn navigate(&mut self, route: Route) {
        self.routes.push(route);
    }
}
