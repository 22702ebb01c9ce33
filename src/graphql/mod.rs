mod helpers;
mod inputs;
mod mutation;
mod query;

use async_graphql::{EmptySubscription, Schema};

pub use helpers::*;
pub use inputs::*;
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub type CheckoutSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;
