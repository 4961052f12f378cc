use application::ingest_service::{IngestReport, IngestService};
use application::query_service::{QueryService, DEFAULT_QUERY_CONCEPTS};
use application::rag_service::{RagService, DEFAULT_CONCEPTS, DEFAULT_PROMPT};
use application::setup_service::SetupService;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use domain::models::QuestionRecord;
use infrastructure::chat_client::OpenAiChatClient;
use infrastructure::config::Config;
use infrastructure::dataset::{DatasetLoader, DatasetSource};
use infrastructure::weaviate_client::WeaviateClient;
use shared::types::Result;

#[derive(Parser, Debug)]
#[command(name = "rag_quickstart")]
#[command(about = "Load questions into Weaviate, search them and answer with an OpenAI chat model")]
pub struct Cli {
    /// What to do; defaults to `run`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create the `Question` class in the vector store
    Setup,
    /// Load the dataset and batch-import it
    Ingest(IngestArgs),
    /// Near-text search, optionally filtered by category
    Query(QueryArgs),
    /// Retrieve documents and ask the chat model about them
    Run(RunArgs),
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct IngestArgs {
    /// `bundled`, a dataset file or an http(s) URL (overrides DATASET_SOURCE)
    #[arg(long)]
    pub dataset: Option<String>,

    /// Objects per batch request (overrides BATCH_SIZE)
    #[arg(long)]
    pub batch_size: Option<usize>,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct QueryArgs {
    /// Concepts to search for
    #[arg(default_values = DEFAULT_QUERY_CONCEPTS)]
    pub concepts: Vec<String>,

    /// Only return questions in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Maximum number of hits
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct RunArgs {
    /// Concepts used to retrieve context documents
    #[arg(default_values = DEFAULT_CONCEPTS)]
    pub concepts: Vec<String>,

    /// Question asked to the chat model
    #[arg(long, default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Create the schema class first
    #[arg(long)]
    pub setup: bool,

    /// Import the dataset first
    #[arg(long)]
    pub ingest: bool,

    #[command(flatten)]
    pub ingest_args: IngestArgs,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            concepts: DEFAULT_CONCEPTS.map(String::from).to_vec(),
            prompt: DEFAULT_PROMPT.to_string(),
            setup: false,
            ingest: false,
            ingest_args: IngestArgs::default(),
        }
    }
}

pub struct CliApp {
    config: Config,
    store: WeaviateClient,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        let store = WeaviateClient::new(&config.weaviate);
        Self { config, store }
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        match cli.command.unwrap_or_else(|| Command::Run(RunArgs::default())) {
            Command::Setup => self.handle_setup().await,
            Command::Ingest(args) => self.handle_ingest(&args).await,
            Command::Query(args) => self.handle_query(&args).await,
            Command::Run(args) => self.handle_run(&args).await,
        }
    }

    async fn handle_setup(&self) -> Result<()> {
        let created = SetupService::new(self.store.clone())
            .create_question_class()
            .await?;
        println!("{}", "Schema class created:".green().bold());
        println!("{}", serde_json::to_string_pretty(&created)?);
        Ok(())
    }

    async fn handle_ingest(&self, args: &IngestArgs) -> Result<()> {
        let source = args
            .dataset
            .as_deref()
            .unwrap_or(&self.config.dataset.source);
        let source = DatasetSource::parse(source);
        let batch_size = args.batch_size.unwrap_or(self.config.dataset.batch_size);

        let records = DatasetLoader::new()
            .load(&source)
            .await
            .with_context(|| format!("Failed to load dataset from {source}"))?;
        let report = IngestService::new(self.store.clone(), batch_size)?
            .ingest(records)
            .await?;
        print_ingest_report(&report);
        Ok(())
    }

    async fn handle_query(&self, args: &QueryArgs) -> Result<()> {
        let hits = QueryService::new(self.store.clone())
            .search(&args.concepts, args.category.as_deref(), args.limit)
            .await?;
        print_hits(&hits)
    }

    async fn handle_run(&self, args: &RunArgs) -> Result<()> {
        if args.setup {
            self.handle_setup().await?;
        }
        if args.ingest {
            self.handle_ingest(&args.ingest_args).await?;
        }

        let chat = OpenAiChatClient::new(&self.config.openai);
        let answer = RagService::new(self.store.clone(), chat)
            .answer(&args.concepts, &args.prompt)
            .await?;
        tracing::debug!(context = %answer.context, "prompt context");

        println!(
            "{} {}",
            format!("{}:", answer.message.role).cyan().bold(),
            answer.message.content
        );
        Ok(())
    }
}

fn print_ingest_report(report: &IngestReport) {
    println!(
        "{} {} objects in {} batches",
        "Imported".green().bold(),
        report.objects_sent(),
        report.flushes.len()
    );
    let failed = report.failed_objects();
    if failed > 0 {
        println!("{} {} objects were rejected", "Warning:".yellow().bold(), failed);
    }
}

fn print_hits(hits: &[QuestionRecord]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(hits)?);
    Ok(())
}
