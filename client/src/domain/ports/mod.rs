//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_gateway;
mod api_error;
mod auth_gateway;
mod key_value_storage;
mod navigator;
mod password_gateway;
mod removal_scheduler;
mod schedule_gateway;

pub use account_gateway::AccountGateway;
#[cfg(test)]
pub use account_gateway::MockAccountGateway;
pub use api_error::ApiError;
pub use auth_gateway::AuthGateway;
#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
#[cfg(test)]
pub use key_value_storage::MockKeyValueStorage;
pub use key_value_storage::{KeyValueStorage, StorageError};
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::Navigator;
#[cfg(test)]
pub use password_gateway::MockPasswordGateway;
pub use password_gateway::PasswordGateway;
pub use removal_scheduler::{CancelToken, ExpiryCallback, RemovalScheduler};
#[cfg(test)]
pub use schedule_gateway::MockScheduleGateway;
pub use schedule_gateway::ScheduleGateway;
