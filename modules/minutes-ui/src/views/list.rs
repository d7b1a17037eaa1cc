//! Meeting list with live search.
//!
//! Every request the view hands out carries a [`Ticket`]. Responses are only
//! applied when their ticket is the latest one issued, so a slow search can
//! never overwrite the results of a newer one.

use minutes_types::Meeting;

use super::Route;
use crate::api::MeetingsApi;
use crate::error::ClientError;
use crate::render::{format_timestamp, summary_preview};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// Initial full load has not resolved yet
    Loading,
    Ready,
}

/// Sequence number of a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// A fetch the host should run and hand back through [`ListView::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    LoadAll { ticket: Ticket },
    Search { ticket: Ticket, query: String },
}

impl ListRequest {
    pub fn ticket(&self) -> Ticket {
        match self {
            ListRequest::LoadAll { ticket } | ListRequest::Search { ticket, .. } => *ticket,
        }
    }

    pub async fn run(&self, api: &dyn MeetingsApi) -> Result<Vec<Meeting>, ClientError> {
        match self {
            ListRequest::LoadAll { .. } => api.list_meetings().await,
            ListRequest::Search { query, .. } => api.search_meetings(query).await,
        }
    }
}

/// One line of the list page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: i64,
    pub title: String,
    pub summary_preview: Option<String>,
    pub created_at: String,
    pub route: Route,
}

#[derive(Debug)]
pub struct ListView {
    phase: ListPhase,
    meetings: Vec<Meeting>,
    query: String,
    searching: bool,
    last_issued: u64,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Loading,
            meetings: Vec::new(),
            query: String::new(),
            searching: false,
            last_issued: 0,
        }
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// A search is in flight and has not been superseded
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    fn next_ticket(&mut self) -> Ticket {
        self.last_issued += 1;
        Ticket(self.last_issued)
    }

    fn request_for_query(&mut self) -> ListRequest {
        let ticket = self.next_ticket();
        if self.query.trim().is_empty() {
            self.searching = false;
            ListRequest::LoadAll { ticket }
        } else {
            self.searching = true;
            ListRequest::Search {
                ticket,
                query: self.query.clone(),
            }
        }
    }

    /// Fetch the full list, ignoring the current query
    pub fn mount(&mut self) -> ListRequest {
        self.searching = false;
        ListRequest::LoadAll {
            ticket: self.next_ticket(),
        }
    }

    /// The search box changed. A blank query reloads everything.
    pub fn set_query(&mut self, query: impl Into<String>) -> ListRequest {
        self.query = query.into();
        self.request_for_query()
    }

    /// Re-issue the request for the current query (Enter in the search box)
    pub fn submit(&mut self) -> ListRequest {
        self.request_for_query()
    }

    /// Apply a finished request. Returns false when the response was stale
    /// and dropped.
    pub fn apply(
        &mut self,
        request: &ListRequest,
        result: Result<Vec<Meeting>, ClientError>,
    ) -> bool {
        let ticket = request.ticket();
        if ticket.0 != self.last_issued {
            log::debug!(
                "Discarding stale list response #{} (latest is #{})",
                ticket.0,
                self.last_issued
            );
            return false;
        }

        self.searching = false;
        self.phase = ListPhase::Ready;

        match (request, result) {
            (_, Ok(meetings)) => self.meetings = meetings,
            (ListRequest::LoadAll { .. }, Err(e)) => {
                log::warn!("Failed to load meetings: {}", e);
                self.meetings.clear();
            }
            (ListRequest::Search { query, .. }, Err(e)) => {
                log::warn!("Search for {:?} failed: {}", query, e);
            }
        }
        true
    }

    pub fn rows(&self) -> Vec<ListRow> {
        self.meetings
            .iter()
            .map(|m| ListRow {
                id: m.id,
                title: m.title.clone(),
                summary_preview: m.summary.as_deref().and_then(summary_preview),
                created_at: format_timestamp(&m.created_at),
                route: Route::Detail(m.id),
            })
            .collect()
    }

    async fn run_and_apply(&mut self, api: &dyn MeetingsApi, request: ListRequest) {
        let result = request.run(api).await;
        self.apply(&request, result);
    }

    /// Load the full list (mount, or returning to the page)
    pub async fn refresh(&mut self, api: &dyn MeetingsApi) {
        let request = self.mount();
        self.run_and_apply(api, request).await;
    }

    pub async fn search(&mut self, api: &dyn MeetingsApi, query: &str) {
        let request = self.set_query(query);
        self.run_and_apply(api, request).await;
    }
}
