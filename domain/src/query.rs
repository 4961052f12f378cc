use crate::models::QUESTION_CLASS;

/// Properties projected by every question search.
pub const QUESTION_FIELDS: [&str; 3] = ["question", "answer", "category"];

/// Equality filter on a single text property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereFilter {
    pub path: Vec<String>,
    pub value_text: String,
}

impl WhereFilter {
    pub fn equal(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: vec![property.into()],
            value_text: value.into(),
        }
    }

    /// Whether a record's property matches the filter. Unknown properties never match.
    pub fn matches(&self, record: &crate::models::QuestionRecord) -> bool {
        let field = match self.path.first().map(String::as_str) {
            Some("question") => &record.question,
            Some("answer") => &record.answer,
            Some("category") => &record.category,
            _ => return false,
        };
        field == &self.value_text
    }
}

/// A similarity search expressed as free-text concepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearTextQuery {
    pub class_name: String,
    pub fields: Vec<String>,
    pub concepts: Vec<String>,
    pub where_filter: Option<WhereFilter>,
    pub limit: Option<usize>,
}

impl NearTextQuery {
    /// Question search over `concepts` with the standard projection, no filter and no limit.
    pub fn questions<I, S>(concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class_name: QUESTION_CLASS.to_string(),
            fields: QUESTION_FIELDS.iter().map(|f| f.to_string()).collect(),
            concepts: concepts.into_iter().map(Into::into).collect(),
            where_filter: None,
            limit: None,
        }
    }

    pub fn with_where(mut self, filter: WhereFilter) -> Self {
        self.where_filter = Some(filter);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
