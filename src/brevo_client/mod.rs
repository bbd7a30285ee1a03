mod api;
mod client;
mod core;
mod helpers;
mod models;

pub use client::{BrevoClient, ListContactsQuery};
pub use self::core::pagination::{
    collect_all, Collected, Collection, PageBounds, PageFetcher, SyncCursor, DEFAULT_MAX_OFFSET,
    DEFAULT_PAGE_LIMIT,
};
pub use self::core::upsert::{get_or_create, KeyedResource, LookupFallback, UpsertOutcome};
pub use helpers::{parse_host_datetime, to_brevo_timestamp, validate_email, ApiKey, SortOrder};
pub use models::{
    AddToListResult, CampaignDraft, CampaignRecord, ContactListRecord, ContactRecord,
    CreatedList, EmailTemplateRecord, FolderRecord, ListContact, SyncTable,
};
