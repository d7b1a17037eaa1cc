//! New meeting form.

use minutes_types::{CreateMeetingRequest, Meeting};

use super::{InvalidTransition, Route, Shell};
use crate::api::MeetingsApi;
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatePhase {
    Idle,
    Submitting,
    /// Saved; the host was sent to the new meeting's page
    Created(i64),
}

#[derive(Debug)]
pub struct CreateView {
    phase: CreatePhase,
    title: String,
    content: String,
    error: Option<String>,
}

impl Default for CreateView {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateView {
    pub fn new() -> Self {
        Self {
            phase: CreatePhase::Idle,
            title: String::new(),
            content: String::new(),
            error: None,
        }
    }

    pub fn phase(&self) -> CreatePhase {
        self.phase
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Inline error shown under the form
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Validate and hand out the request to send. None means the form was
    /// rejected and [`error`](Self::error) says why.
    pub fn start_submit(&mut self) -> Result<Option<CreateMeetingRequest>, InvalidTransition> {
        if self.phase != CreatePhase::Idle {
            return Err(InvalidTransition {
                action: "submit",
                state: self.phase_name(),
            });
        }

        let request = CreateMeetingRequest {
            title: self.title.clone(),
            content: self.content.clone(),
        };
        if let Err(e) = request.validate() {
            self.error = Some(e.to_string());
            return Ok(None);
        }

        self.error = None;
        self.phase = CreatePhase::Submitting;
        Ok(Some(request))
    }

    pub fn finish_submit(
        &mut self,
        result: Result<Meeting, ClientError>,
        shell: &mut dyn Shell,
    ) -> Result<(), InvalidTransition> {
        if self.phase != CreatePhase::Submitting {
            return Err(InvalidTransition {
                action: "finish submitting",
                state: self.phase_name(),
            });
        }

        match result {
            Ok(meeting) => {
                log::info!("Created meeting {} ({})", meeting.id, meeting.title);
                self.phase = CreatePhase::Created(meeting.id);
                shell.navigate(Route::Detail(meeting.id));
            }
            Err(e) => {
                log::warn!("Failed to create meeting: {}", e);
                let reason = match e.server_message() {
                    Some(msg) => msg.to_string(),
                    None => e.to_string(),
                };
                self.error = Some(format!("Failed to create meeting: {}", reason));
                self.phase = CreatePhase::Idle;
            }
        }
        Ok(())
    }

    pub fn cancel(&mut self, shell: &mut dyn Shell) {
        shell.navigate(Route::Back);
    }

    pub async fn submit(
        &mut self,
        api: &dyn MeetingsApi,
        shell: &mut dyn Shell,
    ) -> Result<(), InvalidTransition> {
        let Some(request) = self.start_submit()? else {
            return Ok(());
        };
        let result = api.create_meeting(&request).await;
        self.finish_submit(result, shell)
    }

    fn phase_name(&self) -> &'static str {
        match self.phase {
            CreatePhase::Idle => "idle",
            CreatePhase::Submitting => "submitting",
            CreatePhase::Created(_) => "created",
        }
    }
}
