pub mod auth;
pub mod configuration;
pub mod database;
mod error;
pub mod graphql;
pub mod models;
pub mod payments;
pub mod routes;
mod startup;
pub mod telemetry;

#[cfg(test)]
mod test_helpers;

pub use configuration::get_configuration;
pub use error::{CheckoutError, ErrorKind};
pub use graphql::{CheckoutSchema, MutationRoot, QueryRoot};
pub use startup::{build_app, build_storage, generate_schema, CheckoutState};

pub type Result<T> = std::result::Result<T, CheckoutError>;
