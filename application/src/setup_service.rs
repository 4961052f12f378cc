use anyhow::Context;
use domain::ports::VectorStore;
use domain::schema::ClassDefinition;
use shared::types::Result;

pub struct SetupService<S> {
    store: S,
}

impl<S: VectorStore> SetupService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates the `Question` class. Running it twice fails on the second call.
    pub async fn create_question_class(&self) -> Result<ClassDefinition> {
        let class = ClassDefinition::question();
        let created = self
            .store
            .create_schema(&class)
            .await
            .with_context(|| format!("Failed to create class {}", class.class))?;
        tracing::info!(class = %created.class, "schema class created");
        Ok(created)
    }
}
