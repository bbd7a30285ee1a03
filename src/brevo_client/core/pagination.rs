use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::types::BrevoError;

pub const DEFAULT_PAGE_LIMIT: u32 = 50;
pub const DEFAULT_MAX_OFFSET: u32 = 1000;

/// Offset/limit position in a remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncCursor {
    pub limit: u32,
    pub offset: u32,
}

/// Collections reachable through offset pagination, with their page size caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    ContactLists,
    Folders,
    EmailTemplates,
    ListContacts,
}

impl Collection {
    pub fn max_page_limit(self) -> u32 {
        match self {
            Collection::ContactLists | Collection::Folders => 50,
            Collection::EmailTemplates => 1000,
            Collection::ListContacts => 500,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Collection::ContactLists => "contact lists",
            Collection::Folders => "folders",
            Collection::EmailTemplates => "email templates",
            Collection::ListContacts => "list contacts",
        }
    }
}

/// Bounds for one collection run; the limit stays fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub limit: u32,
    pub start_offset: u32,
    pub max_offset: u32,
}

impl PageBounds {
    /// Validate a caller-supplied page size against the collection's cap.
    pub fn new(
        collection: Collection,
        limit: Option<u32>,
        max_offset: u32,
    ) -> Result<Self, BrevoError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        let max = collection.max_page_limit();
        if limit == 0 || limit > max {
            return Err(BrevoError::InvalidInput(format!(
                "limit for {} must be between 1 and {max}, got {limit}",
                collection.label()
            )));
        }
        Ok(Self {
            limit,
            start_offset: 0,
            max_offset,
        })
    }

    /// Start the run at `offset`, which must not lie past the offset bound.
    pub fn starting_at(mut self, offset: u32) -> Result<Self, BrevoError> {
        check_start(offset, self.max_offset)?;
        self.start_offset = offset;
        Ok(self)
    }
}

fn check_start(offset: u32, max_offset: u32) -> Result<(), BrevoError> {
    if offset > max_offset {
        return Err(BrevoError::InvalidInput(format!(
            "offset must be at most {max_offset}, got {offset}"
        )));
    }
    Ok(())
}

/// Anything that can serve one page of a collection.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    type Item: Send;

    async fn fetch_page(&self, cursor: SyncCursor) -> Result<Vec<Self::Item>, BrevoError>;
}

/// Items gathered by [`collect_all`].
#[derive(Debug)]
pub struct Collected<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    /// Set when the run stopped at the offset bound rather than on a short page.
    pub truncated: bool,
}

/// Walk a collection page by page until a short page or the offset bound.
///
/// A failing page aborts the whole run; nothing collected so far is returned.
pub async fn collect_all<F>(fetcher: &F, bounds: PageBounds) -> Result<Collected<F::Item>, BrevoError>
where
    F: PageFetcher + ?Sized,
{
    check_start(bounds.start_offset, bounds.max_offset)?;

    let mut cursor = SyncCursor {
        limit: bounds.limit,
        offset: bounds.start_offset,
    };
    let mut items = Vec::new();
    let mut pages_fetched = 0u32;
    let mut truncated = false;

    loop {
        let page = fetcher
            .fetch_page(cursor)
            .await
            .map_err(|err| BrevoError::PageFetch {
                offset: cursor.offset,
                source: Box::new(err),
            })?;
        pages_fetched = pages_fetched.saturating_add(1);

        let received = page.len();
        items.extend(page);
        debug!(offset = cursor.offset, received, "Fetched page");

        if received < cursor.limit as usize {
            break;
        }

        cursor.offset = cursor.offset.saturating_add(cursor.limit);
        if cursor.offset > bounds.max_offset {
            warn!(
                collected = items.len(),
                max_offset = bounds.max_offset,
                "Stopped at offset bound, collection truncated"
            );
            truncated = true;
            break;
        }
    }

    Ok(Collected {
        items,
        pages_fetched,
        truncated,
    })
}
