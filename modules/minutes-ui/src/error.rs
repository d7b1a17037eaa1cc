/// Every failure of the data access layer. Callers mostly only care that the
/// request failed; the detail is kept for logs and inline error messages.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request failed: {}", status_message(.status, .message))]
    Status { status: u16, message: Option<String> },

    #[error("request failed: invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The `error` text the server sent back, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status {
                message: Some(msg), ..
            } => Some(msg),
            _ => None,
        }
    }
}

fn status_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(msg) => format!("HTTP {} ({})", status, msg),
        None => format!("HTTP {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ClientError::Status {
            status: 404,
            message: Some("Meeting not found".to_string()),
        };
        assert_eq!(err.to_string(), "request failed: HTTP 404 (Meeting not found)");
        assert!(err.is_not_found());

        let bare = ClientError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(bare.to_string(), "request failed: HTTP 500");
        assert!(!bare.is_not_found());
    }
}
