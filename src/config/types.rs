use serde::{Deserialize, Serialize};

/// Configuration for the Brevo adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Offset past which paginated syncs stop and report truncation.
    #[serde(default = "default_max_sync_offset")]
    pub max_sync_offset: u32,

    /// IANA timezone used for naive date parameters.
    #[serde(default = "default_document_timezone")]
    pub document_timezone: String,

    /// Only fall back to contact creation when the lookup answered 404.
    #[serde(default)]
    pub create_only_on_not_found: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_sync_offset: default_max_sync_offset(),
            document_timezone: default_document_timezone(),
            create_only_on_not_found: false,
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.brevo.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_sync_offset() -> u32 {
    1000
}

fn default_document_timezone() -> String {
    "UTC".to_string()
}
