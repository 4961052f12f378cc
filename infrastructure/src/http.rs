use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::RagError;
use shared::types::RagResult;
use shared::utils::truncate_for_log;

const MAX_ERROR_BODY_CHARS: usize = 500;

/// Classifies a reqwest failure. A request that could not even be built
/// (empty host, bad scheme) is a configuration problem.
pub(crate) fn transport_error(service: &'static str, err: reqwest::Error) -> RagError {
    if err.is_builder() {
        RagError::Configuration(format!("cannot build {service} request: {err}"))
    } else {
        RagError::Network {
            service,
            message: err.to_string(),
        }
    }
}

/// Prefers the `{"error": {"message": ..}}` envelope of OpenAI-style APIs,
/// falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| truncate_for_log(body, MAX_ERROR_BODY_CHARS))
}

/// Reads the whole body and rejects non-success statuses.
pub(crate) async fn read_body(service: &'static str, response: Response) -> RagResult<String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| transport_error(service, e))?;
    if !status.is_success() {
        return Err(RagError::from_status(service, status.as_u16(), error_message(&text)));
    }
    Ok(text)
}

/// Like [`read_body`], then decodes JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> RagResult<T> {
    let text = read_body(service, response).await?;
    tracing::debug!(service, body = %truncate_for_log(&text, 2000), "response received");
    serde_json::from_str(&text).map_err(|e| {
        RagError::malformed(service, format!("unexpected response body: {e}"))
    })
}
