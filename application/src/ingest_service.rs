use anyhow::Context;
use domain::models::{QuestionRecord, VectorStoreObject};
use domain::ports::VectorStore;
use shared::error::RagError;
use shared::telemetry::Telemetry;
use shared::types::Result;

/// Objects waiting for the next batch request.
#[derive(Debug)]
pub struct BatchQueue {
    objects: Vec<VectorStoreObject>,
    batch_size: usize,
}

impl BatchQueue {
    pub fn new(batch_size: usize) -> Self {
        Self {
            objects: Vec::with_capacity(batch_size),
            batch_size,
        }
    }

    /// Queues an object; true once the queue holds a full batch.
    pub fn push(&mut self, object: VectorStoreObject) -> bool {
        self.objects.push(object);
        self.objects.len() == self.batch_size
    }

    /// Empties the queue, returning what it held.
    pub fn take(&mut self) -> Vec<VectorStoreObject> {
        std::mem::replace(&mut self.objects, Vec::with_capacity(self.batch_size))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushReport {
    pub objects: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub flushes: Vec<FlushReport>,
}

impl IngestReport {
    pub fn objects_sent(&self) -> usize {
        self.flushes.iter().map(|f| f.objects).sum()
    }

    pub fn failed_objects(&self) -> usize {
        self.flushes.iter().map(|f| f.failed).sum()
    }
}

/// Pages records into the store in fixed-size batches.
pub struct IngestService<S> {
    store: S,
    batch_size: usize,
}

impl<S: VectorStore> IngestService<S> {
    pub fn new(store: S, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(RagError::Configuration("batch size must be at least 1".to_string()).into());
        }
        Ok(Self { store, batch_size })
    }

    /// Sends every record, in order. A batch goes out as soon as `batch_size`
    /// objects are queued, and a final batch is always sent for the remainder,
    /// even when nothing remains. The first failed request stops the run.
    pub async fn ingest(&self, records: Vec<QuestionRecord>) -> Result<IngestReport> {
        let telemetry = Telemetry::new("ingest");
        let mut queue = BatchQueue::new(self.batch_size);
        let mut report = IngestReport::default();

        for record in records {
            if queue.push(VectorStoreObject::from(record)) {
                self.flush(&mut queue, &mut report).await?;
            }
        }
        self.flush(&mut queue, &mut report).await?;

        tracing::info!(
            objects = report.objects_sent(),
            batches = report.flushes.len(),
            failed = report.failed_objects(),
            "ingestion finished"
        );
        telemetry.finish();
        Ok(report)
    }

    async fn flush(&self, queue: &mut BatchQueue, report: &mut IngestReport) -> Result<()> {
        let batch = queue.take();
        let number = report.flushes.len() + 1;
        let results = self
            .store
            .batch_insert(&batch)
            .await
            .with_context(|| format!("Batch {number} ({} objects) failed", batch.len()))?;

        let failed = results.iter().filter(|r| !r.is_ok()).count();
        for result in results.iter().filter(|r| !r.is_ok()) {
            tracing::warn!(id = ?result.id, errors = ?result.errors, "object rejected by the store");
        }
        tracing::info!(batch = number, objects = batch.len(), failed, "batch flushed");

        report.flushes.push(FlushReport {
            objects: batch.len(),
            failed,
        });
        Ok(())
    }
}
