pub mod chat_client;
pub mod config;
pub mod dataset;
pub mod graphql;
mod http;
pub mod weaviate_client;
