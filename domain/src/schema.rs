use crate::models::QUESTION_CLASS;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const TEXT_VECTORIZER: &str = "text2vec-openai";
pub const GENERATIVE_MODULE: &str = "generative-openai";

/// A vector-store class definition as accepted by the schema endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vectorizer: Option<String>,
    #[serde(
        rename = "moduleConfig",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub module_config: BTreeMap<String, Value>,
}

impl ClassDefinition {
    /// The `Question` class, vectorized by the OpenAI text module with the
    /// generative module enabled. Both modules use their default settings.
    pub fn question() -> Self {
        let module_config = [TEXT_VECTORIZER, GENERATIVE_MODULE]
            .into_iter()
            .map(|module| (module.to_string(), Value::Object(Map::new())))
            .collect();
        Self {
            class: QUESTION_CLASS.to_string(),
            vectorizer: Some(TEXT_VECTORIZER.to_string()),
            module_config,
        }
    }
}
