//! GraphQL `Get` queries for near-text search and decoding of their results.

use domain::models::QuestionRecord;
use domain::query::NearTextQuery;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::error::RagError;
use shared::types::RagResult;

const SERVICE: &str = "weaviate";

#[derive(Debug, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// JSON string escaping is a valid GraphQL string literal.
fn string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

fn string_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| string_literal(v)).collect();
    format!("[{}]", items.join(", "))
}

/// Renders e.g.
/// `{ Get { Question(nearText: {concepts: ["cute"]}, where: {path: ["category"], operator: Equal, valueText: "ANIMALS"}, limit: 2) { question answer category } } }`
pub fn render_get_query(query: &NearTextQuery) -> String {
    let mut arguments = vec![format!(
        "nearText: {{concepts: {}}}",
        string_list(&query.concepts)
    )];
    if let Some(filter) = &query.where_filter {
        arguments.push(format!(
            "where: {{path: {}, operator: Equal, valueText: {}}}",
            string_list(&filter.path),
            string_literal(&filter.value_text)
        ));
    }
    if let Some(limit) = query.limit {
        arguments.push(format!("limit: {limit}"));
    }
    format!(
        "{{ Get {{ {}({}) {{ {} }} }} }}",
        query.class_name,
        arguments.join(", "),
        query.fields.join(" ")
    )
}

/// Pulls `data.Get.<class>` out of a response, keeping the server's order.
pub fn extract_hits(response: GraphQlResponse, class_name: &str) -> RagResult<Vec<QuestionRecord>> {
    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(RagError::Upstream {
            service: SERVICE,
            status: 200,
            message: format!("graphql errors: {}", messages.join("; ")),
        });
    }

    let hits = response
        .data
        .as_ref()
        .and_then(|data| data.get("Get"))
        .and_then(|get| get.get(class_name))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            RagError::malformed(SERVICE, format!("response has no results for class {class_name}"))
        })?;

    hits.iter()
        .enumerate()
        .map(|(index, hit)| {
            QuestionRecord::deserialize(hit).map_err(|e| {
                RagError::malformed(SERVICE, format!("search hit {index} is malformed: {e}"))
            })
        })
        .collect()
}
