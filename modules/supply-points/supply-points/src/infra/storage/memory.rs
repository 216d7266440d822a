use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use supply_points_sdk::SupplyPointId;

use crate::domain::ports::{Document, DocumentStore, Fields, StoreError};

const ID_LEN: usize = 20;

const ID_ALPHABET: [char; 62] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L',
    'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9',
];

#[derive(Default)]
struct Inner {
    collections: HashMap<String, BTreeMap<String, Fields>>,
    // Every id ever handed out, deleted or not.
    issued: HashSet<String>,
}

impl Inner {
    fn fresh_id(&mut self) -> String {
        loop {
            let id = nanoid::nanoid!(ID_LEN, &ID_ALPHABET);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// Process-local document store with the same per-document semantics as the
/// remote one. Each call holds the lock for exactly one document write.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<Inner>,
}

impl InMemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a document under a chosen id, bypassing every check.
    /// Stands in for writers outside this application.
    pub fn seed(&self, collection: &str, id: &str, fields: Fields) {
        let mut inner = self.inner.write();
        inner.issued.insert(id.to_owned());
        inner
            .collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id.to_owned(), fields);
    }

    #[must_use]
    pub fn get(&self, collection: &str, id: &SupplyPointId) -> Option<Fields> {
        self.inner
            .read()
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id.as_str()))
            .cloned()
    }

    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.inner
            .read()
            .collections
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.as_str(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<SupplyPointId, StoreError> {
        let mut inner = self.inner.write();
        let id = inner.fresh_id();
        inner
            .collections
            .entry(collection.to_owned())
            .or_default()
            .insert(id.clone(), fields);
        Ok(SupplyPointId::new(id))
    }

    async fn replace(
        &self,
        collection: &str,
        id: &SupplyPointId,
        fields: Fields,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let slot = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id.as_str()))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.clone(),
            })?;
        *slot = fields;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &SupplyPointId) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if let Some(docs) = inner.collections.get_mut(collection) {
            docs.remove(id.as_str());
        }
        Ok(())
    }
}
