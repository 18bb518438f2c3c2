use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error("another request is still in flight")]
    Busy,
    #[error("no employee at row {0}")]
    UnknownRow(usize),
    #[error("server responded with {status}")]
    Api { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The user-visible action an error interrupted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    Delete,
}

impl Operation {
    pub fn fallback(self) -> &'static str {
        match self {
            Operation::Load => "Error fetching employees.",
            Operation::Save => "Error saving employee.",
            Operation::Delete => "Error deleting employee.",
        }
    }
}

impl ClientError {
    /// Text shown to the user: the server's own message when it sent one,
    /// otherwise a generic line for the interrupted operation.
    pub fn notice(&self, operation: Operation) -> String {
        match self {
            ClientError::Validation(message) => message.clone(),
            ClientError::Busy => "Please wait for the current request to finish.".to_string(),
            ClientError::UnknownRow(_) => self.to_string(),
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => operation.fallback().to_string(),
        }
    }
}
