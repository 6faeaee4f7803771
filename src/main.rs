// main.rs
use std::time::Duration;

use article_api::config::Config;
use article_api::migration::Migrator;
use article_api::{PostStore, app};
use poem::{Server, listener::TcpListener};
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let mut opts = ConnectOptions::new(config.database_url.clone());
    opts.max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(opts).await?;
    db.ping().await?;
    Migrator::up(&db, None).await?;
    tracing::info!(max_connections = config.max_connections, "database ready");

    let app = app(PostStore::new(db));

    tracing::info!(addr = %config.bind_addr, "listening");
    Server::new(TcpListener::bind(config.bind_addr))
        .run(app)
        .await?;
    Ok(())
}
