use std::time::Duration;

use async_trait::async_trait;
use neeru_utils::SecretString;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use supply_points_sdk::SupplyPointId;
use tracing::{debug, instrument, warn};
use url::Url;

use super::firestore_value::{decode_fields, encode_fields};
use crate::domain::ports::{Document, DocumentStore, Fields, StoreError};

#[derive(Debug, Clone)]
pub struct FirestoreSettings {
    /// Versioned API root, e.g. `https://firestore.googleapis.com/v1`.
    pub base_url: Url,
    pub project_id: String,
    pub database: String,
    pub api_key: Option<SecretString>,
    pub bearer_token: Option<SecretString>,
    pub page_size: u32,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ListResponse {
    documents: Vec<RawDocument>,
    next_page_token: Option<String>,
}

impl RawDocument {
    fn id(&self) -> Result<&str, StoreError> {
        self.name
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| StoreError::Malformed(format!("document name '{}'", self.name)))
    }

    fn into_document(self) -> Result<Document, StoreError> {
        Ok(Document::new(self.id()?, decode_fields(self.fields.as_ref())?))
    }

    /// Like [`Self::into_document`], but a document whose fields cannot be
    /// decoded keeps its id with no fields, so validation rejects only it.
    fn into_listed_document(self) -> Result<Document, StoreError> {
        let id = self.id()?.to_owned();
        match decode_fields(self.fields.as_ref()) {
            Ok(fields) => Ok(Document::new(id, fields)),
            Err(e) => {
                warn!(id = %id, error = %e, "Undecodable document fields");
                Ok(Document::new(id, Fields::new()))
            }
        }
    }
}

/// Document store backed by the Firestore REST API.
pub struct FirestoreDocumentStore {
    client: reqwest::Client,
    settings: FirestoreSettings,
}

impl FirestoreDocumentStore {
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new(settings: FirestoreSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    fn collection_url(&self, collection: &str) -> Result<Url, StoreError> {
        let mut url = self.settings.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::Transport("Firestore base URL cannot be a base".to_owned()))?
            .pop_if_empty()
            .extend([
                "projects",
                self.settings.project_id.as_str(),
                "databases",
                self.settings.database.as_str(),
                "documents",
                collection,
            ]);
        Ok(url)
    }

    fn document_url(&self, collection: &str, id: &SupplyPointId) -> Result<Url, StoreError> {
        let mut url = self.collection_url(collection)?;
        url.path_segments_mut()
            .map_err(|()| StoreError::Transport("Firestore base URL cannot be a base".to_owned()))?
            .push(id.as_str());
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.settings.bearer_token {
            builder = builder.bearer_auth(token.expose());
        }
        if let Some(key) = &self.settings.api_key {
            builder = builder.query(&[("key", key.expose())]);
        }
        builder
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        collection: &str,
        id: Option<&SupplyPointId>,
    ) -> Result<Response, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.clone(),
            },
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
                StoreError::PermissionDenied(format!("HTTP {status}: {body}"))
            }
            _ => StoreError::Transport(format!("HTTP {status}: {body}")),
        })
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    response
        .json()
        .await
        .map_err(|e| StoreError::Malformed(e.without_url().to_string()))
}

#[async_trait]
impl DocumentStore for FirestoreDocumentStore {
    #[instrument(skip_all, fields(project = %self.settings.project_id, collection = %collection))]
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = self.collection_url(collection)?;
        let page_size = self.settings.page_size.to_string();
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut builder = self
                .request(Method::GET, url.clone())
                .query(&[("pageSize", page_size.as_str())]);
            if let Some(token) = &page_token {
                builder = builder.query(&[("pageToken", token.as_str())]);
            }
            let page: ListResponse = read_json(self.send(builder, collection, None).await?).await?;
            for raw in page.documents {
                documents.push(raw.into_listed_document()?);
            }
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        debug!(count = documents.len(), "Listed documents");
        Ok(documents)
    }

    #[instrument(skip_all, fields(project = %self.settings.project_id, collection = %collection))]
    async fn insert(&self, collection: &str, fields: Fields) -> Result<SupplyPointId, StoreError> {
        let url = self.collection_url(collection)?;
        let builder = self
            .request(Method::POST, url)
            .json(&json!({ "fields": encode_fields(&fields) }));
        let created: RawDocument = read_json(self.send(builder, collection, None).await?).await?;
        let doc = created.into_document()?;
        debug!(id = %doc.id, "Inserted document");
        Ok(doc.id)
    }

    #[instrument(skip_all, fields(project = %self.settings.project_id, collection = %collection, id = %id))]
    async fn replace(
        &self,
        collection: &str,
        id: &SupplyPointId,
        fields: Fields,
    ) -> Result<(), StoreError> {
        let url = self.document_url(collection, id)?;
        // Without an update mask PATCH overwrites the whole document.
        let builder = self
            .request(Method::PATCH, url)
            .query(&[("currentDocument.exists", "true")])
            .json(&json!({ "fields": encode_fields(&fields) }));
        self.send(builder, collection, Some(id)).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(project = %self.settings.project_id, collection = %collection, id = %id))]
    async fn delete(&self, collection: &str, id: &SupplyPointId) -> Result<(), StoreError> {
        let url = self.document_url(collection, id)?;
        self.send(self.request(Method::DELETE, url), collection, None)
            .await?;
        Ok(())
    }
}
