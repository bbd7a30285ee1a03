use serde::Serialize;

/// Filters for `GET /v3/smtp/templates`; the cursor is appended separately.
#[derive(Serialize, Default)]
pub struct TemplatesFilter {
    #[serde(rename = "templateStatus", skip_serializing_if = "Option::is_none")]
    pub template_status: Option<bool>,
}

/// Filters for `GET /v3/contacts/lists/{listId}/contacts`.
#[derive(Serialize, Default)]
pub struct ListContactsFilter {
    #[serde(rename = "modifiedSince", skip_serializing_if = "Option::is_none")]
    pub modified_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<&'static str>,
}
