//! Client side of the minutes service: a typed API client, page state
//! machines for listing, viewing and creating meetings, and the text
//! rendering they share.

pub mod api;
pub mod error;
pub mod render;
pub mod views;

pub use api::{MeetingsApi, MeetingsClient};
pub use error::ClientError;
pub use views::{Route, Shell};
