pub mod ingest_service;
pub mod query_service;
pub mod rag_service;
pub mod setup_service;

#[cfg(test)]
mod fakes;
