use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Envelope returned by the paginated collection endpoints.
pub trait PageEnvelope {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

#[derive(Debug, Deserialize, Default)]
pub struct ContactListsResponse {
    #[serde(default)]
    pub lists: Vec<ContactListDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContactListDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub total_blacklisted: Option<i64>,
    #[serde(default)]
    pub total_subscribers: Option<i64>,
    #[serde(default)]
    pub unique_subscribers: Option<i64>,
    #[serde(default)]
    pub folder_id: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FoldersResponse {
    #[serde(default)]
    pub folders: Vec<FolderDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FolderDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub total_blacklisted: Option<i64>,
    #[serde(default)]
    pub total_subscribers: Option<i64>,
    #[serde(default)]
    pub unique_subscribers: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TemplatesResponse {
    #[serde(default)]
    pub templates: Vec<TemplateDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub test_sent: Option<bool>,
    #[serde(default)]
    pub sender: Option<TemplateSender>,
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub to_field: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub doi_template: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TemplateSender {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ContactsResponse {
    #[serde(default)]
    pub contacts: Vec<ContactDto>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_blacklisted: Option<bool>,
    #[serde(default)]
    pub sms_blacklisted: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl ContactDto {
    /// First non-empty string attribute among `keys`.
    pub fn attribute_alias(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.attributes.get(*key))
            .filter_map(|value| value.as_str())
            .find(|value| !value.is_empty())
    }
}

/// Body of a create call; Brevo answers `{"id": ...}` on success.
#[derive(Debug, Deserialize, Default)]
pub struct CreatedId {
    #[serde(default)]
    pub id: Option<i64>,
}

/// Error body returned by Brevo on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PageEnvelope for ContactListsResponse {
    type Item = ContactListDto;

    fn into_items(self) -> Vec<Self::Item> {
        self.lists
    }
}

impl PageEnvelope for FoldersResponse {
    type Item = FolderDto;

    fn into_items(self) -> Vec<Self::Item> {
        self.folders
    }
}

impl PageEnvelope for TemplatesResponse {
    type Item = TemplateDto;

    fn into_items(self) -> Vec<Self::Item> {
        self.templates
    }
}

impl PageEnvelope for ContactsResponse {
    type Item = ContactDto;

    fn into_items(self) -> Vec<Self::Item> {
        self.contacts
    }
}
