pub mod health_service;
pub mod ingest_service;
pub mod query_service;
pub mod signature;
pub mod stats_service;
