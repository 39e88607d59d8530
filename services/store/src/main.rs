use sea_orm::Database;
use tracing::info;

use gamestore::config::StoreConfig;
use gamestore::infra::blob::HttpBlobStore;
use gamestore::infra::email::HttpEmailSender;
use gamestore::router::build_router;
use gamestore::state::AppState;
use gamestore::usecase::checkout::CustomerLocks;

#[tokio::main]
async fn main() {
    gamestore_core::tracing::init_tracing();

    let config = StoreConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        public_url: config.public_url,
        locks: CustomerLocks::new(),
        mailer: HttpEmailSender::new(config.mail_api_url, config.mail_sender),
        blobs: HttpBlobStore::new(config.blob_api_url, config.blob_public_url),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.store_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("store service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
