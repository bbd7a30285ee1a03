use serde::Serialize;

/// Merge-field template placed in every campaign's "To" header.
pub const CAMPAIGN_TO_FIELD: &str = "{{contact.FIRSTNAME}} {{contact.LASTNAME}}";

#[derive(Debug, Serialize)]
pub struct CreateContactRequest<'a> {
    pub email: &'a str,
    pub attributes: ContactAttributes<'a>,
}

/// Brevo account attributes use the French names.
#[derive(Debug, Serialize)]
pub struct ContactAttributes<'a> {
    #[serde(rename = "PRENOM", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<&'a str>,
    #[serde(rename = "NOM", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest<'a> {
    pub name: &'a str,
    pub folder_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AddContactsRequest<'a> {
    pub emails: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest<'a> {
    pub sender: CampaignSender<'a>,
    pub name: &'a str,
    pub template_id: i64,
    pub scheduled_at: String,
    pub subject: &'a str,
    pub to_field: &'static str,
    pub recipients: CampaignRecipients<'a>,
}

#[derive(Debug, Serialize)]
pub struct CampaignSender<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecipients<'a> {
    pub list_ids: &'a [i64],
}
