//! Loads the question dataset from the binary, from disk or over HTTP.
//!
//! The source schema uses capitalized keys (`Question`, `Answer`,
//! `Category`); every record is checked before it reaches the store.

use crate::config::DEFAULT_DATASET_SOURCE;
use crate::http::{read_body, transport_error};
use domain::models::QuestionRecord;
use reqwest::Client;
use serde_json::{Map, Value};
use shared::error::{ParseError, RagError};
use shared::types::RagResult;
use shared::utils::is_remote_source;
use std::path::PathBuf;

const SERVICE: &str = "dataset";

/// The ten-question jeopardy sample shipped with the workspace.
pub const BUNDLED_DATASET: &[u8] = include_bytes!("../../data/question.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Bundled,
    Local(PathBuf),
    Remote(String),
}

impl DatasetSource {
    /// `bundled` selects the embedded sample; use `./bundled` for a file of that name.
    pub fn parse(source: &str) -> Self {
        if source.trim() == DEFAULT_DATASET_SOURCE {
            DatasetSource::Bundled
        } else if is_remote_source(source) {
            DatasetSource::Remote(source.trim().to_string())
        } else {
            DatasetSource::Local(PathBuf::from(source))
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::Bundled => f.write_str("bundled question.json"),
            DatasetSource::Local(path) => write!(f, "{}", path.display()),
            DatasetSource::Remote(url) => f.write_str(url),
        }
    }
}

pub struct DatasetLoader {
    client: Client,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Reads the whole dataset into memory.
    pub async fn load(&self, source: &DatasetSource) -> RagResult<Vec<QuestionRecord>> {
        let bytes = match source {
            DatasetSource::Bundled => BUNDLED_DATASET.to_vec(),
            DatasetSource::Local(path) => {
                tokio::fs::read(path).await.map_err(|source| RagError::Io {
                    path: path.clone(),
                    source,
                })?
            }
            DatasetSource::Remote(url) => self.fetch(url).await?,
        };
        let records = parse_records(&bytes)?;
        tracing::info!(%source, records = records.len(), "dataset loaded");
        Ok(records)
    }

    async fn fetch(&self, url: &str) -> RagResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        Ok(read_body(SERVICE, response).await?.into_bytes())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn required_text(object: &Map<String, Value>, key: &str, index: usize) -> Result<String, ParseError> {
    match object.get(key) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(ParseError::InvalidRecord {
            index,
            reason: format!("key `{key}` must be a string, found {}", kind_of(other)),
        }),
        None => Err(ParseError::InvalidRecord {
            index,
            reason: format!("missing key `{key}`"),
        }),
    }
}

/// Parses a JSON array of `{Question, Answer, Category}` objects. Extra keys are ignored.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<QuestionRecord>, ParseError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ParseError::NotAnArray {
                found: kind_of(&other),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item.as_object().ok_or_else(|| ParseError::InvalidRecord {
                index,
                reason: format!("expected an object, found {}", kind_of(item)),
            })?;
            Ok(QuestionRecord {
                question: required_text(object, "Question", index)?,
                answer: required_text(object, "Answer", index)?,
                category: required_text(object, "Category", index)?,
            })
        })
        .collect()
}
