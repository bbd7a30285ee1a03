//! Host-facing actions: parameter translation and dispatch.
//!
//! The host hands over loosely typed parameters (strings for dates, optional
//! numbers, plain arrays). Everything is validated here, before the client
//! issues a single request.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::brevo_client::{
    parse_host_datetime, ApiKey, BrevoClient, CampaignDraft, ListContactsQuery, SortOrder,
};
use crate::config::Config;
use crate::types::BrevoError;

/// One action invocation, as sent by the host: `{"action": ..., "params": {...}}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", content = "params")]
pub enum ActionRequest {
    CreateEmailCampaign(CreateEmailCampaignParams),
    CreateContact(CreateContactParams),
    CreateList(CreateListParams),
    GetContactsFromList(GetContactsFromListParams),
    AddContactToList(AddContactToListParams),
    SyncContactLists(SyncPageParams),
    SyncFolders(SyncPageParams),
    SyncEmailTemplates(SyncEmailTemplatesParams),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmailCampaignParams {
    #[serde(rename = "api_key", default)]
    pub api_key: Option<String>,
    pub sender_name: String,
    pub sender_email: String,
    pub campaign_name: String,
    pub template_id: i64,
    pub scheduled_at: String,
    pub subject: String,
    #[serde(default)]
    pub list_receiver_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactParams {
    #[serde(rename = "api_key", default)]
    pub api_key: Option<String>,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListParams {
    #[serde(rename = "api_key", default)]
    pub api_key: Option<String>,
    pub name: String,
    pub folder_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContactsFromListParams {
    #[serde(rename = "api_key", default)]
    pub api_key: Option<String>,
    pub list_id: i64,
    #[serde(default)]
    pub modified_since: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddContactToListParams {
    #[serde(rename = "api_key", default)]
    pub api_key: Option<String>,
    pub list_id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SyncPageParams {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncEmailTemplatesParams {
    #[serde(rename = "api_key", default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub template_status: Option<bool>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ActionRequest {
    pub fn from_json(raw: &str) -> Result<Self, BrevoError> {
        serde_json::from_str(raw)
            .map_err(|err| BrevoError::InvalidInput(format!("Malformed action request: {err}")))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionRequest::CreateEmailCampaign(_) => "CreateEmailCampaign",
            ActionRequest::CreateContact(_) => "CreateContact",
            ActionRequest::CreateList(_) => "CreateList",
            ActionRequest::GetContactsFromList(_) => "GetContactsFromList",
            ActionRequest::AddContactToList(_) => "AddContactToList",
            ActionRequest::SyncContactLists(_) => "SyncContactLists",
            ActionRequest::SyncFolders(_) => "SyncFolders",
            ActionRequest::SyncEmailTemplates(_) => "SyncEmailTemplates",
        }
    }
}

/// Runs host actions against one client and document timezone.
pub struct ActionRunner {
    client: BrevoClient,
    timezone: Tz,
}

impl ActionRunner {
    pub fn new(config: &Config) -> Result<Self, BrevoError> {
        Ok(Self {
            client: BrevoClient::new(config)?,
            timezone: config.timezone()?,
        })
    }

    /// Execute one action and return the record handed back to the host.
    pub async fn run(&self, request: ActionRequest) -> Result<Value, BrevoError> {
        let action = request.name();
        info!(action, "Running action");

        let value = match request {
            ActionRequest::CreateEmailCampaign(params) => {
                let api_key = ApiKey::resolve(params.api_key.as_deref())?;
                let scheduled_at = parse_host_datetime(&params.scheduled_at, self.timezone)?;
                debug!(
                    original = %params.scheduled_at,
                    timezone = %self.timezone,
                    utc = %scheduled_at,
                    "Converted campaign schedule"
                );
                let draft = CampaignDraft {
                    sender_name: params.sender_name,
                    sender_email: params.sender_email,
                    campaign_name: params.campaign_name,
                    template_id: params.template_id,
                    scheduled_at,
                    subject: params.subject,
                    list_ids: params.list_receiver_ids,
                };
                to_value(self.client.create_email_campaign(&api_key, &draft).await?)?
            }
            ActionRequest::CreateContact(params) => {
                let api_key = ApiKey::resolve(params.api_key.as_deref())?;
                let record = self
                    .client
                    .create_contact(
                        &api_key,
                        &params.email,
                        params.first_name.as_deref(),
                        params.last_name.as_deref(),
                    )
                    .await?;
                to_value(record)?
            }
            ActionRequest::CreateList(params) => {
                let api_key = ApiKey::resolve(params.api_key.as_deref())?;
                to_value(
                    self.client
                        .create_list(&api_key, &params.name, params.folder_id)
                        .await?,
                )?
            }
            ActionRequest::GetContactsFromList(params) => {
                let api_key = ApiKey::resolve(params.api_key.as_deref())?;
                let query = self.list_contacts_query(&params)?;
                to_value(self.client.get_contacts_from_list(&api_key, &query).await?)?
            }
            ActionRequest::AddContactToList(params) => {
                let api_key = ApiKey::resolve(params.api_key.as_deref())?;
                let result = self
                    .client
                    .add_contact_to_list(
                        &api_key,
                        params.list_id,
                        &params.email,
                        params.first_name.as_deref(),
                        params.last_name.as_deref(),
                    )
                    .await?;
                to_value(result)?
            }
            ActionRequest::SyncContactLists(params) => {
                let api_key = ApiKey::resolve(params.api_key.as_deref())?;
                to_value(self.client.sync_contact_lists(&api_key, params.limit).await?)?
            }
            ActionRequest::SyncFolders(params) => {
                let api_key = ApiKey::resolve(params.api_key.as_deref())?;
                to_value(self.client.sync_folders(&api_key, params.limit).await?)?
            }
            ActionRequest::SyncEmailTemplates(params) => {
                let api_key = ApiKey::resolve(params.api_key.as_deref())?;
                to_value(
                    self.client
                        .sync_email_templates(&api_key, params.template_status, params.limit)
                        .await?,
                )?
            }
        };

        Ok(value)
    }

    fn list_contacts_query(
        &self,
        params: &GetContactsFromListParams,
    ) -> Result<ListContactsQuery, BrevoError> {
        let modified_since = params
            .modified_since
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_host_datetime(raw, self.timezone))
            .transpose()?;
        let sort = params
            .sort
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(SortOrder::parse)
            .transpose()?;

        Ok(ListContactsQuery {
            list_id: params.list_id,
            modified_since,
            limit: params.limit,
            offset: params.offset.unwrap_or(0),
            sort,
        })
    }
}

fn to_value<T: Serialize>(record: T) -> Result<Value, BrevoError> {
    Ok(serde_json::to_value(record)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn runner_with_guard(timezone: &str) -> (ActionRunner, MockServer) {
        let server = MockServer::start().await;
        // Any request reaching the server fails the test on drop.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let config = Config {
            api_base_url: server.uri(),
            document_timezone: timezone.to_string(),
            ..Config::default()
        };
        (ActionRunner::new(&config).unwrap(), server)
    }

    #[test]
    fn parses_host_parameter_names() {
        let request = ActionRequest::from_json(
            r#"{
                "action": "GetContactsFromList",
                "params": {"api_key": "k", "listId": 4, "limit": 2, "sort": "desc"}
            }"#,
        )
        .unwrap();

        match request {
            ActionRequest::GetContactsFromList(params) => {
                assert_eq!(params.api_key.as_deref(), Some("k"));
                assert_eq!(params.list_id, 4);
                assert_eq!(params.limit, Some(2));
                assert_eq!(params.offset, None);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn unknown_actions_and_negative_limits_are_invalid_input() {
        let unknown = ActionRequest::from_json(r#"{"action": "DeleteEverything", "params": {}}"#);
        assert!(matches!(unknown, Err(BrevoError::InvalidInput(_))));

        let negative = ActionRequest::from_json(
            r#"{"action": "SyncFolders", "params": {"api_key": "k", "limit": -5}}"#,
        );
        assert!(matches!(negative, Err(BrevoError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn bad_campaign_date_never_reaches_the_network() {
        let (runner, _server) = runner_with_guard("Europe/Paris").await;
        let request = ActionRequest::from_json(
            &json!({
                "action": "CreateEmailCampaign",
                "params": {
                    "api_key": "k",
                    "senderName": "Shop",
                    "senderEmail": "news@shop.fr",
                    "campaignName": "Spring",
                    "templateId": 5,
                    "scheduledAt": "the day after tomorrow",
                    "subject": "Hi",
                    "listReceiverIds": [4]
                }
            })
            .to_string(),
        )
        .unwrap();

        let err = runner.run(request).await.unwrap_err();
        assert!(matches!(err, BrevoError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn bad_sort_never_reaches_the_network() {
        let (runner, _server) = runner_with_guard("UTC").await;
        let request = ActionRequest::from_json(
            r#"{"action": "GetContactsFromList", "params": {"api_key": "k", "listId": 4, "sort": "random"}}"#,
        )
        .unwrap();

        let err = runner.run(request).await.unwrap_err();
        assert!(matches!(err, BrevoError::InvalidInput(_)));
    }

    #[test]
    fn naive_modified_since_uses_document_timezone() {
        let config = Config {
            document_timezone: "Europe/Paris".to_string(),
            ..Config::default()
        };
        let runner = ActionRunner::new(&config).unwrap();
        let params = GetContactsFromListParams {
            api_key: None,
            list_id: 1,
            modified_since: Some("2024-01-01 01:00".to_string()),
            limit: None,
            offset: Some(3),
            sort: Some(" ".to_string()),
        };

        let query = runner.list_contacts_query(&params).unwrap();
        assert_eq!(
            query.modified_since.map(|t| t.to_rfc3339()),
            Some("2024-01-01T00:00:00+00:00".to_string())
        );
        assert_eq!(query.offset, 3);
        assert_eq!(query.sort, None);
    }
}
