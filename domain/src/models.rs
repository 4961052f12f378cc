use serde::{Deserialize, Serialize};

/// Class name every question object is stored under.
pub const QUESTION_CLASS: &str = "Question";

/// One question/answer pair with its category.
///
/// This is both the unit of the dataset and the shape of a search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub answer: String,
    pub category: String,
}

impl QuestionRecord {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
        }
    }
}

/// An object as sent to the vector store's batch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStoreObject {
    pub class: String,
    pub properties: QuestionRecord,
}

impl From<QuestionRecord> for VectorStoreObject {
    fn from(properties: QuestionRecord) -> Self {
        Self {
            class: QUESTION_CLASS.to_string(),
            properties,
        }
    }
}

/// Outcome of one object inside a batch insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchObjectResult {
    pub id: Option<String>,
    pub class: String,
    pub errors: Vec<String>,
}

impl BatchObjectResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
