//! Page state machines: meeting list with live search, meeting detail with
//! edit/delete, and the creation form.
//!
//! Views own their state and never talk to the terminal (or any other UI)
//! directly. Anything user-facing outside the rendered page goes through the
//! host's [`Shell`]. Each in-flight operation is split into a `start_*` /
//! `finish_*` pair so hosts can run requests however they like; the async
//! helpers on each view simply chain the two.

pub mod create;
pub mod detail;
pub mod list;

#[cfg(test)]
pub(crate) mod testing;

pub use create::{CreatePhase, CreateView};
pub use detail::{DetailPhase, DetailView, EditForm};
pub use list::{ListPhase, ListRequest, ListRow, ListView, Ticket};

/// Pages a view can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(i64),
    New,
    /// Whatever page was showing before
    Back,
}

/// Host-provided interaction: blocking notifications, confirmations, navigation
pub trait Shell {
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question; true means the user agreed
    fn confirm(&mut self, message: &str) -> bool;

    fn navigate(&mut self, route: Route);
}

/// An event arrived in a state that does not accept it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} while {state}")]
pub struct InvalidTransition {
    pub action: &'static str,
    pub state: &'static str,
}
