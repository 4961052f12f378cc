use anyhow::Context;
use domain::models::QuestionRecord;
use domain::ports::{ChatCompleter, VectorStore};
use domain::query::NearTextQuery;
use domain::session::ChatMessage;
use shared::telemetry::Telemetry;
use shared::types::Result;

pub const DEFAULT_CONCEPTS: [&str; 1] = ["2 legs"];
pub const DEFAULT_PROMPT: &str = "list all animals";

/// Renders one block per hit. Each block opens and closes with a newline, so a
/// single `\n` between blocks leaves exactly one blank line.
///
/// The indentation inside each block is part of the prompt sent to the model.
pub fn render_context(results: &[QuestionRecord]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(index, record)| {
            format!(
                "\n      Document {}\n      Title: {}\n      {}\n",
                index + 1,
                record.question,
                record.answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone)]
pub struct RagAnswer {
    pub hits: Vec<QuestionRecord>,
    pub context: String,
    pub message: ChatMessage,
}

pub struct RagService<S, C> {
    store: S,
    chat: C,
}

impl<S: VectorStore, C: ChatCompleter> RagService<S, C> {
    pub fn new(store: S, chat: C) -> Self {
        Self { store, chat }
    }

    /// Near-text search over `concepts` with no filter and no limit.
    pub async fn retrieve(&self, concepts: &[String]) -> Result<Vec<QuestionRecord>> {
        let query = NearTextQuery::questions(concepts.iter().cloned());
        let hits = self
            .store
            .search(&query)
            .await
            .context("Failed to retrieve context documents")?;
        tracing::info!(hits = hits.len(), concepts = ?concepts, "documents retrieved");
        Ok(hits)
    }

    /// Retrieves documents for `concepts` and asks the model `prompt` with them as system context.
    ///
    /// An empty result still reaches the model, with an empty context.
    pub async fn answer(&self, concepts: &[String], prompt: &str) -> Result<RagAnswer> {
        let telemetry = Telemetry::new("rag");
        let hits = self.retrieve(concepts).await?;
        if hits.is_empty() {
            tracing::warn!("no documents matched; asking the model without context");
        }

        let context = render_context(&hits);
        let message = self
            .chat
            .complete(&context, prompt)
            .await
            .context("Chat completion failed")?;
        telemetry.finish();

        Ok(RagAnswer {
            hits,
            context,
            message,
        })
    }
}
