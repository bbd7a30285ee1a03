mod queries;
mod requests;
mod types;

pub use queries::{ListContactsFilter, TemplatesFilter};
pub use requests::{
    AddContactsRequest, CampaignRecipients, CampaignSender, ContactAttributes,
    CreateCampaignRequest, CreateContactRequest, CreateListRequest, CAMPAIGN_TO_FIELD,
};
pub use types::{
    ApiErrorBody, ContactDto, ContactListDto, ContactListsResponse, ContactsResponse, CreatedId,
    FolderDto, FoldersResponse, PageEnvelope, TemplateDto, TemplatesResponse,
};
