use serde::Serialize;

use crate::brevo_client::api::TemplateDto;

/// Row of the EmailTemplates sync table. The nested sender is flattened.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplateRecord {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_sent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi_template: Option<bool>,
}

impl From<TemplateDto> for EmailTemplateRecord {
    fn from(dto: TemplateDto) -> Self {
        let sender = dto.sender.unwrap_or_default();
        Self {
            id: dto.id,
            name: dto.name,
            subject: dto.subject,
            is_active: dto.is_active,
            test_sent: dto.test_sent,
            sender_name: sender.name,
            sender_email: sender.email,
            reply_to: dto.reply_to,
            to_field: dto.to_field,
            tag: dto.tag,
            html_content: dto.html_content,
            created_at: dto.created_at,
            modified_at: dto.modified_at,
            doi_template: dto.doi_template,
        }
    }
}
