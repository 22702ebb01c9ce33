use std::net::TcpListener;

use checkout::{
    auth::TokenVerifier,
    build_app, build_storage,
    configuration::{Settings, StorageBackend},
    get_configuration, CheckoutState,
};

use crate::helpers::TRACING;

pub struct TestApp {
    pub address: String,
    pub settings: Settings,
    /// Signs tokens with the same secret and issuer as the running app
    pub verifier: TokenVerifier,
}

/// Starts the app on a random port, backed by a fresh in-memory cart store
pub async fn spawn_app() -> TestApp {
    lazy_static::initialize(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let mut settings = get_configuration().expect("failed to read configuration");
    settings.application.storage = StorageBackend::Memory;
    settings.application.port = port;

    let carts = build_storage(&settings)
        .await
        .expect("failed to build cart storage");
    let state = CheckoutState::new(&settings, carts).expect("invalid payment configuration");
    let verifier = state.verifier.clone();

    let server = build_app(listener, state).expect("failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        settings,
        verifier,
    }
}
