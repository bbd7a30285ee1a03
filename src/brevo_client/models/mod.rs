mod campaign;
mod contact;
mod list;
mod template;

use serde::Serialize;

pub use campaign::{CampaignDraft, CampaignRecord};
pub use contact::{AddToListResult, ContactRecord, ListContact};
pub use list::{ContactListRecord, CreatedList, FolderRecord};
pub use template::EmailTemplateRecord;

/// Rows handed to a host sync table.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SyncTable<T> {
    pub result: Vec<T>,
    /// True when the offset bound cut the sync short.
    pub truncated: bool,
}
