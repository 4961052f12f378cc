//! Seams to the two remote collaborators.
//!
//! Services are generic over these traits, so a run can be wired to the
//! hosted services or to in-process fakes.

use crate::models::{BatchObjectResult, QuestionRecord, VectorStoreObject};
use crate::query::NearTextQuery;
use crate::schema::ClassDefinition;
use crate::session::ChatMessage;
use shared::types::RagResult;
use std::future::Future;

pub trait VectorStore {
    /// Creates a class. Fails if the class already exists.
    fn create_schema(
        &self,
        class: &ClassDefinition,
    ) -> impl Future<Output = RagResult<ClassDefinition>> + Send;

    /// Sends one batch. Each object's outcome is reported separately.
    fn batch_insert(
        &self,
        objects: &[VectorStoreObject],
    ) -> impl Future<Output = RagResult<Vec<BatchObjectResult>>> + Send;

    /// Runs a near-text query. Hits come back in the store's similarity order.
    fn search(
        &self,
        query: &NearTextQuery,
    ) -> impl Future<Output = RagResult<Vec<QuestionRecord>>> + Send;
}

pub trait ChatCompleter {
    /// One request, one reply. Nothing is remembered between calls.
    fn complete(
        &self,
        system_context: &str,
        user_prompt: &str,
    ) -> impl Future<Output = RagResult<ChatMessage>> + Send;
}
