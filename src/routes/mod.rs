mod graphql;
mod health_check;

pub use graphql::{graphql_index, graphql_playground};
pub use health_check::health_check;
