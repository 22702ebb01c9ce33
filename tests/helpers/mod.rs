#![allow(dead_code)]
mod app;
mod constants;
mod database;
mod graphql;
mod reqwest;
mod tokens;

pub use self::reqwest::*;
pub use app::{spawn_app, TestApp};
pub use constants::*;
pub use database::configure_database;
pub use graphql::{first_error, parse_graphql_response};
pub use tokens::*;

use lazy_static::lazy_static;

use checkout::telemetry::{generate_subscriber, init_subscriber};

lazy_static! {
    /// To ensure logs are only outputted in tests when required, by default
    /// tests run with no logs being captured
    ///
    /// In order to set logs to be captured during tests run them with:
    /// `TEST_LOG=true cargo test | bunyan`
    pub static ref TRACING: () = {
        if std::env::var("TEST_LOG").is_ok() {
            let subscriber = generate_subscriber("test".into(), "debug".into(), std::io::stdout);
            init_subscriber(subscriber);
        } else {
            let subscriber = generate_subscriber("test".into(), "error".into(), std::io::sink);
            init_subscriber(subscriber);
        }
    };
}
