use chrono::{DateTime, Utc};
use serde::Serialize;

/// Input of the CreateEmailCampaign action, already translated from host types.
#[derive(Debug, Clone)]
pub struct CampaignDraft {
    pub sender_name: String,
    pub sender_email: String,
    pub campaign_name: String,
    pub template_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub subject: String,
    pub list_ids: Vec<i64>,
}

/// Result of the CreateEmailCampaign action.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CampaignRecord {
    pub id: i64,
}
