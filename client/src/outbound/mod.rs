//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest client for the REST gateways
//! - **storage**: key-value storage in memory or on disk
//! - **scheduler**: tokio timers for toast expiry
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod http;
pub mod scheduler;
pub mod storage;
