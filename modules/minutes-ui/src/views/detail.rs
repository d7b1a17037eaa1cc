//! Single meeting page: view, edit in place, delete.

use minutes_types::{Meeting, UpdateMeetingRequest};

use super::{InvalidTransition, Route, Shell};
use crate::api::MeetingsApi;
use crate::error::ClientError;
use crate::render::DetailSections;

pub const DELETE_CONFIRMATION: &str = "Delete this meeting? This cannot be undone.";
pub const DELETED_NOTICE: &str = "Meeting deleted.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPhase {
    Loading,
    Viewing,
    Editing,
    Updating,
    Deleting,
    /// The view navigated away and accepts nothing further
    Closed,
}

impl DetailPhase {
    fn name(self) -> &'static str {
        match self {
            DetailPhase::Loading => "loading",
            DetailPhase::Viewing => "viewing",
            DetailPhase::Editing => "editing",
            DetailPhase::Updating => "updating",
            DetailPhase::Deleting => "deleting",
            DetailPhase::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub title: String,
    pub content: String,
    pub regenerate_summary: bool,
}

impl EditForm {
    fn seeded_from(meeting: &Meeting) -> Self {
        Self {
            title: meeting.title.clone(),
            content: meeting.content.clone(),
            regenerate_summary: false,
        }
    }

    fn to_request(&self) -> UpdateMeetingRequest {
        UpdateMeetingRequest {
            title: self.title.clone(),
            content: self.content.clone(),
            regenerate_summary: self.regenerate_summary,
        }
    }
}

#[derive(Debug)]
pub struct DetailView {
    id: i64,
    phase: DetailPhase,
    meeting: Option<Meeting>,
    form: Option<EditForm>,
}

impl DetailView {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            phase: DetailPhase::Loading,
            meeting: None,
            form: None,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn phase(&self) -> DetailPhase {
        self.phase
    }

    pub fn meeting(&self) -> Option<&Meeting> {
        self.meeting.as_ref()
    }

    pub fn form(&self) -> Option<&EditForm> {
        self.form.as_ref()
    }

    /// Editable form, only while editing
    pub fn form_mut(&mut self) -> Option<&mut EditForm> {
        match self.phase {
            DetailPhase::Editing => self.form.as_mut(),
            _ => None,
        }
    }

    pub fn sections(&self) -> Option<DetailSections> {
        self.meeting.as_ref().map(DetailSections::from_meeting)
    }

    fn expect_phase(
        &self,
        expected: DetailPhase,
        action: &'static str,
    ) -> Result<(), InvalidTransition> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(InvalidTransition {
                action,
                state: self.phase.name(),
            })
        }
    }

    pub fn finish_load(
        &mut self,
        result: Result<Meeting, ClientError>,
        shell: &mut dyn Shell,
    ) -> Result<(), InvalidTransition> {
        self.expect_phase(DetailPhase::Loading, "finish loading")?;

        match result {
            Ok(meeting) => {
                self.meeting = Some(meeting);
                self.phase = DetailPhase::Viewing;
            }
            Err(e) => {
                log::warn!("Failed to load meeting {}: {}", self.id, e);
                shell.alert(&format!("Failed to load meeting: {}", e));
                shell.navigate(Route::List);
                self.phase = DetailPhase::Closed;
            }
        }
        Ok(())
    }

    /// Switch to the edit form, seeded from the current record
    pub fn begin_edit(&mut self) -> Result<(), InvalidTransition> {
        self.expect_phase(DetailPhase::Viewing, "edit")?;
        let Some(meeting) = self.meeting.as_ref() else {
            return Err(InvalidTransition {
                action: "edit",
                state: "empty",
            });
        };
        self.form = Some(EditForm::seeded_from(meeting));
        self.phase = DetailPhase::Editing;
        Ok(())
    }

    pub fn cancel_edit(&mut self) -> Result<(), InvalidTransition> {
        self.expect_phase(DetailPhase::Editing, "cancel editing")?;
        self.form = None;
        self.phase = DetailPhase::Viewing;
        Ok(())
    }

    /// Validate the form. Returns the request to send, or None when the
    /// form was rejected (the user has been alerted and stays editing).
    pub fn start_save(
        &mut self,
        shell: &mut dyn Shell,
    ) -> Result<Option<UpdateMeetingRequest>, InvalidTransition> {
        self.expect_phase(DetailPhase::Editing, "save")?;
        let Some(form) = self.form.as_ref() else {
            return Ok(None);
        };

        let request = form.to_request();
        if let Err(e) = request.validate() {
            shell.alert(&e.to_string());
            return Ok(None);
        }

        self.phase = DetailPhase::Updating;
        Ok(Some(request))
    }

    pub fn finish_save(
        &mut self,
        result: Result<Meeting, ClientError>,
        shell: &mut dyn Shell,
    ) -> Result<(), InvalidTransition> {
        self.expect_phase(DetailPhase::Updating, "finish saving")?;

        match result {
            Ok(meeting) => {
                self.meeting = Some(meeting);
                self.form = None;
                self.phase = DetailPhase::Viewing;
            }
            Err(e) => {
                log::warn!("Failed to update meeting {}: {}", self.id, e);
                shell.alert(&format!("Failed to update meeting: {}", e));
                self.phase = DetailPhase::Editing;
            }
        }
        Ok(())
    }

    /// Ask for confirmation. True means the delete request should be sent.
    pub fn start_delete(&mut self, shell: &mut dyn Shell) -> Result<bool, InvalidTransition> {
        self.expect_phase(DetailPhase::Viewing, "delete")?;
        if !shell.confirm(DELETE_CONFIRMATION) {
            return Ok(false);
        }
        self.phase = DetailPhase::Deleting;
        Ok(true)
    }

    pub fn finish_delete(
        &mut self,
        result: Result<(), ClientError>,
        shell: &mut dyn Shell,
    ) -> Result<(), InvalidTransition> {
        self.expect_phase(DetailPhase::Deleting, "finish deleting")?;

        match result {
            Ok(()) => {
                log::info!("Deleted meeting {}", self.id);
                shell.alert(DELETED_NOTICE);
                shell.navigate(Route::List);
                self.phase = DetailPhase::Closed;
            }
            Err(e) => {
                log::warn!("Failed to delete meeting {}: {}", self.id, e);
                shell.alert(&format!("Failed to delete meeting: {}", e));
                self.phase = DetailPhase::Viewing;
            }
        }
        Ok(())
    }

    pub async fn load(
        &mut self,
        api: &dyn MeetingsApi,
        shell: &mut dyn Shell,
    ) -> Result<(), InvalidTransition> {
        self.expect_phase(DetailPhase::Loading, "load")?;
        let result = api.get_meeting(self.id).await;
        self.finish_load(result, shell)
    }

    pub async fn save(
        &mut self,
        api: &dyn MeetingsApi,
        shell: &mut dyn Shell,
    ) -> Result<(), InvalidTransition> {
        let Some(request) = self.start_save(shell)? else {
            return Ok(());
        };
        let result = api.update_meeting(self.id, &request).await;
        self.finish_save(result, shell)
    }

    pub async fn delete(
        &mut self,
        api: &dyn MeetingsApi,
        shell: &mut dyn Shell,
    ) -> Result<(), InvalidTransition> {
        if !self.start_delete(shell)? {
            return Ok(());
        }
        let result = api.delete_meeting(self.id).await;
        self.finish_delete(result, shell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{meeting, FakeApi, RecordingShell};

    async fn loaded(api: &FakeApi, id: i64) -> (DetailView, RecordingShell) {
        let mut view = DetailView::new(id);
        let mut shell = RecordingShell::default();
        view.load(api, &mut shell).await.unwrap();
        (view, shell)
    }

    #[tokio::test]
    async fn test_load() {
        let api = FakeApi::with_meetings(vec![meeting(4, "Design review")]);
        let (view, shell) = loaded(&api, 4).await;

        assert_eq!(view.phase(), DetailPhase::Viewing);
        assert_eq!(view.meeting().unwrap().title, "Design review");
        assert!(shell.alerts.is_empty());
        assert!(view.sections().is_some());
    }

    #[tokio::test]
    async fn test_load_failure_returns_to_list() {
        let api = FakeApi::default();
        let (view, shell) = loaded(&api, 99).await;

        assert_eq!(view.phase(), DetailPhase::Closed);
        assert_eq!(shell.alerts.len(), 1);
        assert!(shell.alerts[0].contains("Meeting not found"));
        assert_eq!(shell.routes, vec![Route::List]);
    }

    #[tokio::test]
    async fn test_edit_seeds_form_and_cancel_discards() {
        let api = FakeApi::with_meetings(vec![meeting(1, "Standup")]);
        let (mut view, _) = loaded(&api, 1).await;

        view.begin_edit().unwrap();
        let form = view.form_mut().unwrap();
        assert_eq!(form.title, "Standup");
        assert!(!form.regenerate_summary);
        form.title = "Changed".to_string();

        view.cancel_edit().unwrap();
        assert_eq!(view.phase(), DetailPhase::Viewing);
        assert!(view.form().is_none());
        assert_eq!(view.meeting().unwrap().title, "Standup");

        view.begin_edit().unwrap();
        assert_eq!(view.form().unwrap().title, "Standup");
    }

    #[tokio::test]
    async fn test_save_replaces_record() {
        let api = FakeApi::with_meetings(vec![meeting(1, "Standup")]);
        let (mut view, mut shell) = loaded(&api, 1).await;

        view.begin_edit().unwrap();
        {
            let form = view.form_mut().unwrap();
            form.title = "Daily standup".to_string();
            form.regenerate_summary = true;
        }
        view.save(&api, &mut shell).await.unwrap();

        assert_eq!(view.phase(), DetailPhase::Viewing);
        let m = view.meeting().unwrap();
        assert_eq!(m.title, "Daily standup");
        assert_eq!(m.summary.as_deref(), Some("- regenerated"));
        assert!(m.updated_at.is_some());
        assert!(shell.alerts.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let api = FakeApi::with_meetings(vec![meeting(1, "Standup")]);
        let (mut view, mut shell) = loaded(&api, 1).await;

        view.begin_edit().unwrap();
        view.form_mut().unwrap().content = "   ".to_string();
        view.save(&api, &mut shell).await.unwrap();

        assert_eq!(view.phase(), DetailPhase::Editing);
        assert_eq!(shell.alerts, vec!["Content is required".to_string()]);
        assert!(!api.calls().iter().any(|c| c.starts_with("update")));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form() {
        let api = FakeApi::with_meetings(vec![meeting(1, "Standup")]);
        api.fail("update");
        let (mut view, mut shell) = loaded(&api, 1).await;

        view.begin_edit().unwrap();
        view.form_mut().unwrap().title = "Renamed".to_string();
        view.save(&api, &mut shell).await.unwrap();

        assert_eq!(view.phase(), DetailPhase::Editing);
        assert_eq!(view.form().unwrap().title, "Renamed");
        assert_eq!(shell.alerts.len(), 1);
        assert_eq!(view.meeting().unwrap().title, "Standup");
    }

    #[tokio::test]
    async fn test_declined_delete() {
        let api = FakeApi::with_meetings(vec![meeting(1, "Standup")]);
        let (mut view, _) = loaded(&api, 1).await;
        let mut shell = RecordingShell::answering(&[false]);

        view.delete(&api, &mut shell).await.unwrap();

        assert_eq!(view.phase(), DetailPhase::Viewing);
        assert_eq!(shell.questions, vec![DELETE_CONFIRMATION.to_string()]);
        assert_eq!(api.stored().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete() {
        let api = FakeApi::with_meetings(vec![meeting(1, "Standup")]);
        let (mut view, _) = loaded(&api, 1).await;
        let mut shell = RecordingShell::answering(&[true]);

        view.delete(&api, &mut shell).await.unwrap();

        assert_eq!(view.phase(), DetailPhase::Closed);
        assert_eq!(shell.alerts, vec![DELETED_NOTICE.to_string()]);
        assert_eq!(shell.routes, vec![Route::List]);
        assert!(api.stored().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_stays() {
        let api = FakeApi::with_meetings(vec![meeting(1, "Standup")]);
        api.fail("delete");
        let (mut view, _) = loaded(&api, 1).await;
        let mut shell = RecordingShell::answering(&[true]);

        view.delete(&api, &mut shell).await.unwrap();

        assert_eq!(view.phase(), DetailPhase::Viewing);
        assert!(shell.routes.is_empty());
        assert!(shell.alerts[0].starts_with("Failed to delete meeting"));
    }

    #[test]
    fn test_invalid_transitions() {
        let mut view = DetailView::new(1);
        let mut shell = RecordingShell::default();

        let err = view.begin_edit().unwrap_err();
        assert_eq!(err.to_string(), "cannot edit while loading");
        assert!(view.start_delete(&mut shell).is_err());
        assert!(view.finish_save(Ok(meeting(1, "x")), &mut shell).is_err());
        assert!(view.form_mut().is_none());
    }
}
