use serde::Serialize;

use crate::brevo_client::api::{ContactListDto, FolderDto};

/// Row of the ContactLists sync table.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactListRecord {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_blacklisted: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_subscribers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_subscribers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
}

impl From<ContactListDto> for ContactListRecord {
    fn from(dto: ContactListDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            total_blacklisted: dto.total_blacklisted,
            total_subscribers: dto.total_subscribers,
            unique_subscribers: dto.unique_subscribers,
            folder_id: dto.folder_id,
        }
    }
}

/// Row of the Folders sync table.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_blacklisted: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_subscribers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_subscribers: Option<i64>,
}

impl From<FolderDto> for FolderRecord {
    fn from(dto: FolderDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            total_blacklisted: dto.total_blacklisted,
            total_subscribers: dto.total_subscribers,
            unique_subscribers: dto.unique_subscribers,
        }
    }
}

/// Result of the CreateList action.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CreatedList {
    pub id: i64,
    pub name: String,
}
