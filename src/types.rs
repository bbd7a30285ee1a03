use thiserror::Error;

/// Errors raised by the Brevo adapter.
#[derive(Debug, Error)]
pub enum BrevoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path} returned {status}: {message}")]
    Api {
        path: String,
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No Brevo API key was provided")]
    MissingApiKey,

    #[error("Failed to create contact: {0}")]
    CreateFailed(String),

    #[error("{0} was created but no ID was returned")]
    MissingIdAfterCreate(&'static str),

    #[error("Failed to fetch page at offset {offset}: {source}")]
    PageFetch {
        offset: u32,
        #[source]
        source: Box<BrevoError>,
    },
}

impl BrevoError {
    /// True when the remote API answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        match self {
            BrevoError::Api { status, .. } => *status == 404,
            BrevoError::Http(err) => err.status().map(|s| s.as_u16()) == Some(404),
            _ => false,
        }
    }

    /// Message suitable for surfacing to the host, without the request path.
    pub fn reason(&self) -> String {
        match self {
            BrevoError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
