use checkout::{
    build_app, build_storage, get_configuration,
    telemetry::{generate_subscriber, init_subscriber},
    CheckoutState,
};
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = generate_subscriber("checkout".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("failed to read configuration");

    let carts = build_storage(&configuration)
        .await
        .expect("failed to set up cart storage");
    let state = CheckoutState::new(&configuration, carts).expect("invalid payment configuration");

    let addr = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(addr)?;

    build_app(listener, state)?.await
}
