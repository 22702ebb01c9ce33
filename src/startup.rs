use actix_cors::Cors;
use actix_web::{
    dev::Server,
    guard,
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    web, App, HttpServer,
};
use async_graphql::{
    extensions::{ApolloTracing, Tracing},
    EmptySubscription, Schema,
};
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use tracing::info;

use crate::{
    auth::{TokenVerifier, ACCESS_TOKEN_DURATION_SECONDS, STORE_HEADER},
    configuration::{Settings, StorageBackend},
    database::{CartDatabase, CartRepository, InMemoryCartDatabase},
    graphql::{CheckoutSchema, MutationRoot, QueryRoot},
    payments::{PaymentCatalog, PaymentSelectionService},
    routes::*,
    Result,
};

/// Everything the resolvers pull off the schema context
pub struct CheckoutState {
    pub catalog: Arc<PaymentCatalog>,
    pub service: PaymentSelectionService,
    pub verifier: TokenVerifier,
}

impl CheckoutState {
    pub fn new(settings: &Settings, carts: Arc<dyn CartRepository>) -> Result<Self> {
        let catalog = PaymentCatalog::from_settings(&settings.payment)?;
        Ok(Self {
            catalog: Arc::new(catalog),
            service: PaymentSelectionService::new(carts, settings.application.storage_timeout()),
            verifier: TokenVerifier::new(&settings.auth),
        })
    }
}

pub fn generate_schema(state: Option<CheckoutState>) -> CheckoutSchema {
    let builder = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .extension(ApolloTracing)
        .extension(Tracing);
    if let Some(state) = state {
        builder
            .data(state.catalog)
            .data(state.service)
            .data(state.verifier)
            .finish()
    } else {
        builder.finish()
    }
}

/// Picks the cart store named in the configuration. Postgres connects lazily
/// but runs the migrations before handing the pool over.
pub async fn build_storage(settings: &Settings) -> Result<Arc<dyn CartRepository>> {
    match settings.application.storage {
        StorageBackend::Memory => {
            info!("using in-memory cart storage");
            Ok(Arc::new(InMemoryCartDatabase::new()))
        }
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .acquire_timeout(settings.application.storage_timeout())
                .connect_lazy_with(settings.database.with_db());
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!(database = %settings.database.database_name, "using postgres cart storage");
            Ok(Arc::new(CartDatabase::new(pool)))
        }
    }
}

pub fn build_app(listener: TcpListener, state: CheckoutState) -> std::io::Result<Server> {
    let schema = web::Data::new(generate_schema(Some(state)));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(
                Cors::default()
                    .allowed_origin_fn(|origin, _req_head| {
                        origin.as_bytes().starts_with(b"http://localhost")
                            || origin.as_bytes().starts_with(b"http://127.0.0.1")
                    })
                    .allowed_methods(vec!["GET", "POST"])
                    .allowed_headers(vec![AUTHORIZATION, CONTENT_TYPE])
                    .allowed_header(STORE_HEADER)
                    .max_age(ACCESS_TOKEN_DURATION_SECONDS as usize),
            )
            .app_data(schema.clone())
            .service(web::resource("/").guard(guard::Post()).to(graphql_index))
            .service(
                web::resource("/")
                    .guard(guard::Get())
                    .to(graphql_playground),
            )
            .route("/health_check", web::get().to(health_check))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
