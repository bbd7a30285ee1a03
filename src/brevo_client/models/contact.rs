use serde::Serialize;

use crate::brevo_client::api::ContactDto;

const FIRST_NAME_ALIASES: [&str; 2] = ["FIRSTNAME", "PRENOM"];
const LAST_NAME_ALIASES: [&str; 2] = ["LASTNAME", "NOM"];

/// Result of the CreateContact action.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: i64,
    pub email: String,
    pub already_exists: bool,
}

/// One row of the contacts-in-list read.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListContact {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_blacklisted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_blacklisted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

impl From<ContactDto> for ListContact {
    fn from(dto: ContactDto) -> Self {
        let first_name = dto
            .attribute_alias(&FIRST_NAME_ALIASES)
            .unwrap_or_default()
            .to_string();
        let last_name = dto
            .attribute_alias(&LAST_NAME_ALIASES)
            .unwrap_or_default()
            .to_string();

        Self {
            id: dto.id,
            email: dto.email.unwrap_or_default(),
            email_blacklisted: dto.email_blacklisted,
            sms_blacklisted: dto.sms_blacklisted,
            created_at: dto.created_at,
            modified_at: dto.modified_at,
            first_name,
            last_name,
        }
    }
}

/// Result of the AddContactToList compound action.
///
/// `contact_id` stays set when the contact was resolved but the list call
/// failed, so callers can tell the two failures apart.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddToListResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    pub email: String,
    pub contact_created: bool,
    pub added_to_list: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AddToListResult {
    /// The contact was created but Brevo returned no id, so the list step is skipped.
    pub fn created_without_id(email: &str) -> Self {
        Self {
            success: false,
            contact_id: None,
            email: email.to_string(),
            contact_created: true,
            added_to_list: false,
            error: Some("Contact was created but no ID was returned".to_string()),
        }
    }

    pub fn create_failed(email: &str, reason: &str) -> Self {
        Self {
            success: false,
            contact_id: None,
            email: email.to_string(),
            contact_created: false,
            added_to_list: false,
            error: Some(format!("Failed to create contact: {reason}")),
        }
    }

    pub fn added(email: &str, contact_id: i64, contact_created: bool) -> Self {
        Self {
            success: true,
            contact_id: Some(contact_id),
            email: email.to_string(),
            contact_created,
            added_to_list: true,
            error: None,
        }
    }

    pub fn add_failed(email: &str, contact_id: i64, contact_created: bool, reason: &str) -> Self {
        Self {
            success: false,
            contact_id: Some(contact_id),
            email: email.to_string(),
            contact_created,
            added_to_list: false,
            error: Some(format!("Failed to add contact to list: {reason}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dto(attributes: serde_json::Value) -> ContactDto {
        serde_json::from_value(json!({
            "id": 3,
            "email": "ana@x.com",
            "emailBlacklisted": false,
            "attributes": attributes,
        }))
        .unwrap()
    }

    #[test]
    fn names_resolve_english_then_french() {
        let english = ListContact::from(dto(json!({"FIRSTNAME": "Ana", "PRENOM": "Anne"})));
        assert_eq!(english.first_name, "Ana");

        let french = ListContact::from(dto(json!({"PRENOM": "Anne", "NOM": "Martin"})));
        assert_eq!(french.first_name, "Anne");
        assert_eq!(french.last_name, "Martin");

        let blank_english = ListContact::from(dto(json!({"FIRSTNAME": "", "PRENOM": "Anne"})));
        assert_eq!(blank_english.first_name, "Anne");
    }

    #[test]
    fn names_default_to_empty() {
        let contact = ListContact::from(dto(json!({"SMS": "+33600000000"})));
        assert_eq!(contact.first_name, "");
        assert_eq!(contact.last_name, "");
        assert_eq!(contact.email_blacklisted, Some(false));
        assert_eq!(contact.sms_blacklisted, None);
    }

    #[test]
    fn failures_before_the_list_step_are_distinct() {
        let missing = AddToListResult::created_without_id("a@x.com");
        assert!(missing.contact_created);
        assert!(!missing.success);

        let failed = AddToListResult::create_failed("a@x.com", "boom");
        assert!(!failed.contact_created);
        assert_eq!(failed.contact_id, None);
        assert_eq!(failed.error.as_deref(), Some("Failed to create contact: boom"));
    }

    #[test]
    fn serializes_camel_case_for_the_host() {
        let value = serde_json::to_value(AddToListResult::added("a@x.com", 9, true)).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "contactId": 9,
                "email": "a@x.com",
                "contactCreated": true,
                "addedToList": true
            })
        );
    }
}
