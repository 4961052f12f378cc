use dotenvy::dotenv;
use shared::error::RagError;
use shared::types::RagResult;
use std::env;

/// Selects the dataset compiled into the binary.
pub const DEFAULT_DATASET_SOURCE: &str = "bundled";
pub const JEOPARDY_TINY_URL: &str =
    "https://raw.githubusercontent.com/weaviate-tutorials/quickstart/main/data/jeopardy_tiny.json";
pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for the vector store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaviateConfig {
    pub scheme: String,
    pub host: String,
    pub api_key: String,
    /// Forwarded to the store so its OpenAI modules can vectorize and generate.
    pub openai_api_key: String,
}

impl WeaviateConfig {
    /// `scheme://host` without a trailing slash. A host that already carries a
    /// scheme is used as is.
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.contains("://") {
            host.to_string()
        } else {
            format!("{}://{}", self.scheme, host)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub source: String,
    pub batch_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub weaviate: WeaviateConfig,
    pub openai: OpenAiConfig,
    pub dataset: DatasetConfig,
}

impl Config {
    /// Reads `.env` (if any) and the process environment.
    ///
    /// Credentials are not checked here; a missing key shows up as an
    /// authentication failure from the service that needed it.
    pub fn load() -> RagResult<Self> {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> RagResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let batch_size = match lookup("BATCH_SIZE") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                RagError::Configuration(format!("BATCH_SIZE must be a positive integer, got {raw:?}"))
            })?,
            None => DEFAULT_BATCH_SIZE,
        };

        Ok(Self {
            weaviate: WeaviateConfig {
                scheme: var("WEAVIATE_SCHEME", "https"),
                host: var("WEAVIATE_URL", ""),
                api_key: var("WEAVIATE_API_KEY", ""),
                openai_api_key: var("OPENAI_API_KEY", ""),
            },
            openai: OpenAiConfig {
                api_key: var("OPENAI_API_KEY", ""),
                base_url: var("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
                model: var("OPENAI_MODEL", DEFAULT_CHAT_MODEL),
            },
            dataset: DatasetConfig {
                source: var("DATASET_SOURCE", DEFAULT_DATASET_SOURCE),
                batch_size,
            },
        })
    }
}
