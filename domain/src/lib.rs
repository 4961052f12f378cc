pub mod models;
pub mod ports;
pub mod query;
pub mod schema;
pub mod session;
