use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

use checkout::{configuration::DatabaseSettings, get_configuration};

/// Creates a throwaway database named after a fresh uuid and runs the
/// migrations against it. Needs the postgres from `configuration/` to be up.
pub async fn configure_database() -> PgPool {
    let mut config: DatabaseSettings = get_configuration()
        .expect("failed to read configuration")
        .database;
    config.database_name = Uuid::new_v4().to_string();

    let mut connection = PgConnection::connect_with(&config.without_db())
        .await
        .expect("failed to connect to database");
    connection
        .execute(&*format!(r#"CREATE DATABASE "{}";"#, config.database_name))
        .await
        .expect("failed to create database");

    let pool = PgPool::connect_with(config.with_db())
        .await
        .expect("failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run database migrations");
    pool
}
