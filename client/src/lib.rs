//! Client core for the GoBarber booking app.
//!
//! The crate follows a hexagonal layout: `domain` owns the session store,
//! form pipelines, validation and toast queue; `domain::ports` declares the
//! boundaries; `outbound` provides the REST, storage and timer adapters; and
//! `inbound` drives everything from the command line.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::ClientSettings;
