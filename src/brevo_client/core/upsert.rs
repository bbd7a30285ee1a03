use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::types::BrevoError;

/// Result of a get-or-create run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Found(i64),
    Created(i64),
    /// The create call succeeded but its response carried no id.
    CreatedWithoutId,
    Failed(String),
}

/// When a failed lookup may fall through to creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupFallback {
    /// Any lookup failure counts as "not found".
    #[default]
    AnyFailure,
    /// Only a 404 counts as "not found"; other failures end the run.
    NotFoundOnly,
}

/// A remote resource addressed by a natural key.
#[async_trait]
pub trait KeyedResource: Send + Sync {
    /// Look the resource up, returning its remote id.
    async fn fetch_id(&self, key: &str) -> Result<i64, BrevoError>;

    /// Create the resource, returning the id from the response if any.
    async fn create(&self, key: &str) -> Result<Option<i64>, BrevoError>;
}

/// Fetch `key`, creating it on a miss. Never retries.
pub async fn get_or_create<R>(resource: &R, key: &str, fallback: LookupFallback) -> UpsertOutcome
where
    R: KeyedResource + ?Sized,
{
    match resource.fetch_id(key).await {
        Ok(id) => {
            debug!(id, "Resource already exists");
            return UpsertOutcome::Found(id);
        }
        Err(err) if fallback == LookupFallback::NotFoundOnly && !err.is_not_found() => {
            warn!(error = ?err, "Lookup failed, not attempting creation");
            return UpsertOutcome::Failed(err.reason());
        }
        Err(err) => {
            debug!(error = %err, "Lookup missed, creating resource");
        }
    }

    match resource.create(key).await {
        Ok(Some(id)) => {
            info!(id, "Created resource");
            UpsertOutcome::Created(id)
        }
        Ok(None) => {
            warn!("Create succeeded without returning an id");
            UpsertOutcome::CreatedWithoutId
        }
        Err(err) => {
            warn!(error = ?err, "Create failed");
            UpsertOutcome::Failed(err.reason())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    enum CreateBehaviour {
        Assign,
        NoId,
        Reject(&'static str),
    }

    /// Remote store that keeps created keys, like Brevo's contact database.
    struct FakeStore {
        ids: Mutex<HashMap<String, i64>>,
        lookup_status: u16,
        create: CreateBehaviour,
        creates: Mutex<u32>,
    }

    impl FakeStore {
        fn new(create: CreateBehaviour) -> Self {
            Self {
                ids: Mutex::new(HashMap::new()),
                lookup_status: 404,
                create,
                creates: Mutex::new(0),
            }
        }

        fn with_existing(self, key: &str, id: i64) -> Self {
            self.ids.lock().unwrap().insert(key.to_string(), id);
            self
        }

        fn create_calls(&self) -> u32 {
            *self.creates.lock().unwrap()
        }
    }

    #[async_trait]
    impl KeyedResource for FakeStore {
        async fn fetch_id(&self, key: &str) -> Result<i64, BrevoError> {
            self.ids
                .lock()
                .unwrap()
                .get(key)
                .copied()
                .ok_or_else(|| BrevoError::Api {
                    path: format!("/v3/contacts/{key}"),
                    status: self.lookup_status,
                    code: None,
                    message: "Contact does not exist".to_string(),
                })
        }

        async fn create(&self, key: &str) -> Result<Option<i64>, BrevoError> {
            *self.creates.lock().unwrap() += 1;
            match self.create {
                CreateBehaviour::Assign => {
                    let mut ids = self.ids.lock().unwrap();
                    let id = 100 + ids.len() as i64;
                    ids.insert(key.to_string(), id);
                    Ok(Some(id))
                }
                CreateBehaviour::NoId => Ok(None),
                CreateBehaviour::Reject(message) => Err(BrevoError::Api {
                    path: "/v3/contacts".to_string(),
                    status: 400,
                    code: Some("invalid_parameter".to_string()),
                    message: message.to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn existing_key_is_found_without_create() {
        let store = FakeStore::new(CreateBehaviour::Assign).with_existing("a@x.com", 7);

        let outcome = get_or_create(&store, "a@x.com", LookupFallback::AnyFailure).await;

        assert_eq!(outcome, UpsertOutcome::Found(7));
        assert_eq!(store.create_calls(), 0);
    }

    #[tokio::test]
    async fn second_call_finds_what_first_created() {
        let store = FakeStore::new(CreateBehaviour::Assign);

        let first = get_or_create(&store, "new@x.com", LookupFallback::AnyFailure).await;
        let second = get_or_create(&store, "new@x.com", LookupFallback::AnyFailure).await;

        assert_eq!(first, UpsertOutcome::Created(100));
        assert_eq!(second, UpsertOutcome::Found(100));
        assert_eq!(store.create_calls(), 1);
    }

    #[tokio::test]
    async fn missing_id_is_its_own_outcome() {
        let store = FakeStore::new(CreateBehaviour::NoId);

        let outcome = get_or_create(&store, "new@x.com", LookupFallback::AnyFailure).await;

        assert_eq!(outcome, UpsertOutcome::CreatedWithoutId);
        assert_eq!(store.create_calls(), 1);
    }

    #[tokio::test]
    async fn create_failure_keeps_message_verbatim() {
        let store = FakeStore::new(CreateBehaviour::Reject("email is not valid in body"));

        let outcome = get_or_create(&store, "bad@x", LookupFallback::AnyFailure).await;

        assert_eq!(
            outcome,
            UpsertOutcome::Failed("email is not valid in body".to_string())
        );
    }

    #[tokio::test]
    async fn transient_lookup_errors_fall_back_by_default() {
        let mut store = FakeStore::new(CreateBehaviour::Assign);
        store.lookup_status = 503;

        let outcome = get_or_create(&store, "new@x.com", LookupFallback::AnyFailure).await;

        assert_eq!(outcome, UpsertOutcome::Created(100));
    }

    #[tokio::test]
    async fn strict_fallback_only_creates_on_404() {
        let mut unavailable = FakeStore::new(CreateBehaviour::Assign);
        unavailable.lookup_status = 503;
        let outcome = get_or_create(&unavailable, "new@x.com", LookupFallback::NotFoundOnly).await;
        assert!(matches!(outcome, UpsertOutcome::Failed(_)));
        assert_eq!(unavailable.create_calls(), 0);

        let missing = FakeStore::new(CreateBehaviour::Assign);
        let outcome = get_or_create(&missing, "new@x.com", LookupFallback::NotFoundOnly).await;
        assert_eq!(outcome, UpsertOutcome::Created(100));
    }
}
