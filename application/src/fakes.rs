use domain::models::{BatchObjectResult, QuestionRecord, VectorStoreObject};
use domain::ports::{ChatCompleter, VectorStore};
use domain::query::NearTextQuery;
use domain::schema::ClassDefinition;
use domain::session::ChatMessage;
use shared::error::RagError;
use shared::types::RagResult;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StoreState {
    classes: Vec<ClassDefinition>,
    batches: Vec<Vec<VectorStoreObject>>,
    queries: Vec<NearTextQuery>,
    hits: Vec<QuestionRecord>,
    fail_on_batch: Option<usize>,
    rejected_answers: Vec<String>,
}

/// Records every call and answers searches with canned hits.
#[derive(Clone, Default)]
pub struct RecordingStore {
    state: Arc<Mutex<StoreState>>,
}

impl RecordingStore {
    pub fn with_hits(hits: Vec<QuestionRecord>) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().hits = hits;
        store
    }

    /// The n-th batch call (0-based) fails with a 500.
    pub fn failing_on_batch(n: usize) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().fail_on_batch = Some(n);
        store
    }

    /// Objects with this answer come back with a per-object error.
    pub fn rejecting_answer(self, answer: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .rejected_answers
            .push(answer.to_string());
        self
    }

    pub fn classes(&self) -> Vec<ClassDefinition> {
        self.state.lock().unwrap().classes.clone()
    }

    pub fn batches(&self) -> Vec<Vec<VectorStoreObject>> {
        self.state.lock().unwrap().batches.clone()
    }

    pub fn queries(&self) -> Vec<NearTextQuery> {
        self.state.lock().unwrap().queries.clone()
    }
}

impl VectorStore for RecordingStore {
    async fn create_schema(&self, class: &ClassDefinition) -> RagResult<ClassDefinition> {
        let mut state = self.state.lock().unwrap();
        if state.classes.iter().any(|c| c.class == class.class) {
            return Err(RagError::Upstream {
                service: "fake",
                status: 422,
                message: format!("class name {} already exists", class.class),
            });
        }
        state.classes.push(class.clone());
        Ok(class.clone())
    }

    async fn batch_insert(&self, objects: &[VectorStoreObject]) -> RagResult<Vec<BatchObjectResult>> {
        let mut state = self.state.lock().unwrap();
        if state.fail_on_batch == Some(state.batches.len()) {
            return Err(RagError::Upstream {
                service: "fake",
                status: 500,
                message: "batch rejected".to_string(),
            });
        }
        state.batches.push(objects.to_vec());
        Ok(objects
            .iter()
            .map(|object| BatchObjectResult {
                id: None,
                class: object.class.clone(),
                errors: if state.rejected_answers.contains(&object.properties.answer) {
                    vec!["vectorizer failed".to_string()]
                } else {
                    Vec::new()
                },
            })
            .collect())
    }

    async fn search(&self, query: &NearTextQuery) -> RagResult<Vec<QuestionRecord>> {
        let mut state = self.state.lock().unwrap();
        state.queries.push(query.clone());
        Ok(state.hits.clone())
    }
}

/// Replies with a fixed message and remembers what it was asked.
#[derive(Clone)]
pub struct ScriptedChat {
    reply: String,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Arc::default(),
        }
    }

    /// `(system_context, user_prompt)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ChatCompleter for ScriptedChat {
    async fn complete(&self, system_context: &str, user_prompt: &str) -> RagResult<ChatMessage> {
        self.calls
            .lock()
            .unwrap()
            .push((system_context.to_string(), user_prompt.to_string()));
        Ok(ChatMessage {
            role: "assistant".to_string(),
            content: self.reply.clone(),
        })
    }
}
