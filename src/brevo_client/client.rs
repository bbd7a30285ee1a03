use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::types::BrevoError;

use super::api::{
    AddContactsRequest, CampaignRecipients, CampaignSender, ContactAttributes, ContactDto,
    ContactListsResponse, ContactsResponse, CreateCampaignRequest, CreateContactRequest,
    CreateListRequest, CreatedId, FoldersResponse, ListContactsFilter, PageEnvelope,
    TemplatesFilter, TemplatesResponse, CAMPAIGN_TO_FIELD,
};
use super::core::http::HttpClient;
use super::core::pagination::{collect_all, Collection, PageBounds, PageFetcher, SyncCursor};
use super::core::upsert::{get_or_create, KeyedResource, LookupFallback, UpsertOutcome};
use super::helpers::{to_brevo_timestamp, validate_email, ApiKey, SortOrder};
use super::models::{
    AddToListResult, CampaignDraft, CampaignRecord, ContactListRecord, ContactRecord,
    CreatedList, EmailTemplateRecord, FolderRecord, ListContact, SyncTable,
};

/// Parameters of the contacts-in-list read.
#[derive(Debug, Clone, Default)]
pub struct ListContactsQuery {
    pub list_id: i64,
    pub modified_since: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub offset: u32,
    pub sort: Option<SortOrder>,
}

/// Stateless Brevo client; every call carries its own API key.
#[derive(Clone)]
pub struct BrevoClient {
    http: HttpClient,
    max_sync_offset: u32,
    lookup_fallback: LookupFallback,
}

impl BrevoClient {
    pub fn new(config: &Config) -> Result<Self, BrevoError> {
        let lookup_fallback = if config.create_only_on_not_found {
            LookupFallback::NotFoundOnly
        } else {
            LookupFallback::AnyFailure
        };

        Ok(Self {
            http: HttpClient::new(config)?,
            max_sync_offset: config.max_sync_offset,
            lookup_fallback,
        })
    }

    /// Create an email campaign scheduled at `draft.scheduled_at`.
    pub async fn create_email_campaign(
        &self,
        api_key: &ApiKey,
        draft: &CampaignDraft,
    ) -> Result<CampaignRecord, BrevoError> {
        validate_email(&draft.sender_email)?;
        let scheduled_at = to_brevo_timestamp(&draft.scheduled_at);
        let payload = CreateCampaignRequest {
            sender: CampaignSender {
                name: &draft.sender_name,
                email: draft.sender_email.trim(),
            },
            name: &draft.campaign_name,
            template_id: draft.template_id,
            scheduled_at,
            subject: &draft.subject,
            to_field: CAMPAIGN_TO_FIELD,
            recipients: CampaignRecipients {
                list_ids: &draft.list_ids,
            },
        };
        debug!(
            campaign = %draft.campaign_name,
            scheduled_at = %payload.scheduled_at,
            lists = ?draft.list_ids,
            "Creating email campaign"
        );

        let created: CreatedId = self
            .http
            .post_json("/v3/emailCampaigns", api_key, &payload)
            .await?;
        let id = created
            .id
            .ok_or(BrevoError::MissingIdAfterCreate("Campaign"))?;
        info!(id, "Created email campaign");
        Ok(CampaignRecord { id })
    }

    /// Create a contact unless one with this email already exists.
    pub async fn create_contact(
        &self,
        api_key: &ApiKey,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<ContactRecord, BrevoError> {
        let email = validate_email(email)?;
        let directory = ContactDirectory {
            http: &self.http,
            api_key,
            first_name,
            last_name,
        };

        match get_or_create(&directory, email, self.lookup_fallback).await {
            UpsertOutcome::Found(id) => Ok(ContactRecord {
                id,
                email: email.to_string(),
                already_exists: true,
            }),
            UpsertOutcome::Created(id) => Ok(ContactRecord {
                id,
                email: email.to_string(),
                already_exists: false,
            }),
            UpsertOutcome::CreatedWithoutId => Err(BrevoError::MissingIdAfterCreate("Contact")),
            UpsertOutcome::Failed(reason) => Err(BrevoError::CreateFailed(reason)),
        }
    }

    /// Create a contact list inside `folder_id`.
    pub async fn create_list(
        &self,
        api_key: &ApiKey,
        name: &str,
        folder_id: i64,
    ) -> Result<CreatedList, BrevoError> {
        if name.trim().is_empty() {
            return Err(BrevoError::InvalidInput("List name must not be empty".to_string()));
        }
        let created: CreatedId = self
            .http
            .post_json(
                "/v3/contacts/lists",
                api_key,
                &CreateListRequest { name, folder_id },
            )
            .await?;
        let id = created.id.ok_or(BrevoError::MissingIdAfterCreate("List"))?;
        info!(id, folder_id, "Created contact list");
        Ok(CreatedList {
            id,
            name: name.to_string(),
        })
    }

    /// Read every contact of a list, page by page, from `query.offset` on.
    pub async fn get_contacts_from_list(
        &self,
        api_key: &ApiKey,
        query: &ListContactsQuery,
    ) -> Result<Vec<ListContact>, BrevoError> {
        let bounds = PageBounds::new(Collection::ListContacts, query.limit, self.max_sync_offset)?
            .starting_at(query.offset)?;
        let pager = EndpointPager::<ContactsResponse, _>::new(
            &self.http,
            api_key,
            format!("/v3/contacts/lists/{}/contacts", query.list_id),
            ListContactsFilter {
                modified_since: query.modified_since.as_ref().map(to_brevo_timestamp),
                sort: query.sort.map(SortOrder::as_str),
            },
        );

        let collected = collect_all(&pager, bounds).await?;
        info!(
            list_id = query.list_id,
            contacts = collected.items.len(),
            pages = collected.pages_fetched,
            "Fetched list contacts"
        );
        Ok(collected.items.into_iter().map(ListContact::from).collect())
    }

    /// Add a contact to a list, creating the contact first when needed.
    ///
    /// Remote failures are reported in the result rather than returned as errors.
    pub async fn add_contact_to_list(
        &self,
        api_key: &ApiKey,
        list_id: i64,
        email: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<AddToListResult, BrevoError> {
        let email = validate_email(email)?;
        let directory = ContactDirectory {
            http: &self.http,
            api_key,
            first_name,
            last_name,
        };

        let (contact_id, contact_created) =
            match get_or_create(&directory, email, self.lookup_fallback).await {
                UpsertOutcome::Found(id) => (id, false),
                UpsertOutcome::Created(id) => (id, true),
                UpsertOutcome::CreatedWithoutId => {
                    return Ok(AddToListResult::created_without_id(email));
                }
                UpsertOutcome::Failed(reason) => {
                    return Ok(AddToListResult::create_failed(email, &reason));
                }
            };

        let path = format!("/v3/contacts/lists/{list_id}/contacts/add");
        let body = AddContactsRequest {
            emails: vec![email],
        };
        match self.http.post_unit(&path, api_key, &body).await {
            Ok(()) => {
                info!(list_id, contact_id, contact_created, "Added contact to list");
                Ok(AddToListResult::added(email, contact_id, contact_created))
            }
            Err(err) => {
                warn!(list_id, contact_id, error = ?err, "Failed to add contact to list");
                Ok(AddToListResult::add_failed(
                    email,
                    contact_id,
                    contact_created,
                    &err.reason(),
                ))
            }
        }
    }

    pub async fn sync_contact_lists(
        &self,
        api_key: &ApiKey,
        limit: Option<u32>,
    ) -> Result<SyncTable<ContactListRecord>, BrevoError> {
        let bounds = PageBounds::new(Collection::ContactLists, limit, self.max_sync_offset)?;
        let pager = EndpointPager::<ContactListsResponse, _>::new(
            &self.http,
            api_key,
            "/v3/contacts/lists".to_string(),
            (),
        );
        self.sync_table(Collection::ContactLists, &pager, bounds).await
    }

    pub async fn sync_folders(
        &self,
        api_key: &ApiKey,
        limit: Option<u32>,
    ) -> Result<SyncTable<FolderRecord>, BrevoError> {
        let bounds = PageBounds::new(Collection::Folders, limit, self.max_sync_offset)?;
        let pager = EndpointPager::<FoldersResponse, _>::new(
            &self.http,
            api_key,
            "/v3/contacts/folders".to_string(),
            (),
        );
        self.sync_table(Collection::Folders, &pager, bounds).await
    }

    pub async fn sync_email_templates(
        &self,
        api_key: &ApiKey,
        template_status: Option<bool>,
        limit: Option<u32>,
    ) -> Result<SyncTable<EmailTemplateRecord>, BrevoError> {
        let bounds = PageBounds::new(Collection::EmailTemplates, limit, self.max_sync_offset)?;
        let pager = EndpointPager::<TemplatesResponse, _>::new(
            &self.http,
            api_key,
            "/v3/smtp/templates".to_string(),
            TemplatesFilter { template_status },
        );
        self.sync_table(Collection::EmailTemplates, &pager, bounds).await
    }

    async fn sync_table<P, R>(
        &self,
        collection: Collection,
        pager: &P,
        bounds: PageBounds,
    ) -> Result<SyncTable<R>, BrevoError>
    where
        P: PageFetcher,
        R: From<P::Item>,
    {
        let collected = collect_all(pager, bounds).await?;
        info!(
            collection = collection.label(),
            rows = collected.items.len(),
            pages = collected.pages_fetched,
            truncated = collected.truncated,
            "Synced collection"
        );
        Ok(SyncTable {
            result: collected.items.into_iter().map(R::from).collect(),
            truncated: collected.truncated,
        })
    }
}

/// Pages through one collection endpoint with a fixed filter.
struct EndpointPager<'a, E, F> {
    http: &'a HttpClient,
    api_key: &'a ApiKey,
    path: String,
    filter: F,
    envelope: PhantomData<fn() -> E>,
}

impl<'a, E, F> EndpointPager<'a, E, F> {
    fn new(http: &'a HttpClient, api_key: &'a ApiKey, path: String, filter: F) -> Self {
        Self {
            http,
            api_key,
            path,
            filter,
            envelope: PhantomData,
        }
    }
}

#[async_trait]
impl<'a, E, F> PageFetcher for EndpointPager<'a, E, F>
where
    E: PageEnvelope + DeserializeOwned + Send,
    E::Item: Send,
    F: Serialize + Send + Sync,
{
    type Item = E::Item;

    async fn fetch_page(&self, cursor: SyncCursor) -> Result<Vec<E::Item>, BrevoError> {
        let envelope: E = self
            .http
            .get_page(&self.path, self.api_key, &self.filter, &cursor)
            .await?;
        Ok(envelope.into_items())
    }
}

/// Contacts addressed by email, created with the French name attributes.
struct ContactDirectory<'a> {
    http: &'a HttpClient,
    api_key: &'a ApiKey,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
}

#[async_trait]
impl<'a> KeyedResource for ContactDirectory<'a> {
    async fn fetch_id(&self, email: &str) -> Result<i64, BrevoError> {
        let path = format!("/v3/contacts/{}", urlencoding::encode(email));
        let contact: ContactDto = self.http.get_json(&path, self.api_key).await?;
        Ok(contact.id)
    }

    async fn create(&self, email: &str) -> Result<Option<i64>, BrevoError> {
        let payload = CreateContactRequest {
            email,
            attributes: ContactAttributes {
                first_name: self.first_name,
                last_name: self.last_name,
            },
        };
        let created: CreatedId = self.http.post_json("/v3/contacts", self.api_key, &payload).await?;
        Ok(created.id)
    }
}
