use crate::config::WeaviateConfig;
use crate::graphql::{extract_hits, render_get_query, GraphQlRequest, GraphQlResponse};
use crate::http::{read_json, transport_error};
use domain::models::{BatchObjectResult, QuestionRecord, VectorStoreObject};
use domain::ports::VectorStore;
use domain::query::NearTextQuery;
use domain::schema::ClassDefinition;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use shared::error::RagError;
use shared::types::RagResult;
use std::sync::Arc;

const SERVICE: &str = "weaviate";
const OPENAI_KEY_HEADER: &str = "X-OpenAI-Api-Key";

#[derive(Serialize)]
struct BatchRequest<'a> {
    objects: &'a [VectorStoreObject],
}

#[derive(Deserialize)]
struct BatchResponseItem {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    class: String,
    #[serde(default)]
    result: Option<BatchItemResult>,
}

#[derive(Deserialize)]
struct BatchItemResult {
    #[serde(default)]
    errors: Option<BatchErrors>,
}

#[derive(Deserialize)]
struct BatchErrors {
    #[serde(default)]
    error: Vec<BatchErrorMessage>,
}

#[derive(Deserialize)]
struct BatchErrorMessage {
    message: String,
}

impl From<BatchResponseItem> for BatchObjectResult {
    fn from(item: BatchResponseItem) -> Self {
        let errors = item
            .result
            .and_then(|r| r.errors)
            .map(|e| e.error.into_iter().map(|m| m.message).collect())
            .unwrap_or_default();
        Self {
            id: item.id,
            class: item.class,
            errors,
        }
    }
}

/// REST/GraphQL client for a Weaviate instance.
#[derive(Clone)]
pub struct WeaviateClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    openai_api_key: String,
}

impl WeaviateClient {
    pub fn new(config: &WeaviateConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: if config.host.trim().is_empty() {
                String::new()
            } else {
                config.base_url()
            },
            api_key: config.api_key.clone(),
            openai_api_key: config.openai_api_key.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, path: &str) -> RagResult<RequestBuilder> {
        if self.base_url.is_empty() {
            return Err(RagError::Configuration(
                "WEAVIATE_URL is not set".to_string(),
            ));
        }
        let mut request = self.client.post(format!("{}{}", self.base_url, path));
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }
        if !self.openai_api_key.is_empty() {
            request = request.header(OPENAI_KEY_HEADER, &self.openai_api_key);
        }
        Ok(request)
    }
}

impl VectorStore for WeaviateClient {
    async fn create_schema(&self, class: &ClassDefinition) -> RagResult<ClassDefinition> {
        tracing::info!(class = %class.class, "creating schema class");
        let response = self
            .post("/v1/schema")?
            .json(class)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        read_json(SERVICE, response).await
    }

    async fn batch_insert(&self, objects: &[VectorStoreObject]) -> RagResult<Vec<BatchObjectResult>> {
        let response = self
            .post("/v1/batch/objects")?
            .json(&BatchRequest { objects })
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        let items: Vec<BatchResponseItem> = read_json(SERVICE, response).await?;
        Ok(items.into_iter().map(BatchObjectResult::from).collect())
    }

    async fn search(&self, query: &NearTextQuery) -> RagResult<Vec<QuestionRecord>> {
        let request = GraphQlRequest {
            query: render_get_query(query),
        };
        tracing::debug!(query = %request.query, "running near-text query");
        let response = self
            .post("/v1/graphql")?
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        let body: GraphQlResponse = read_json(SERVICE, response).await?;
        extract_hits(body, &query.class_name)
    }
}
