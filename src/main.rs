use std::sync::Arc;

use school_portal::{
    app,
    config::Config,
    db::setup_pool,
    schools::store::MysqlSchoolStore,
    storage::helpers::setup_storage,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "school_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("configuration");

    let pool = setup_pool(&config.database).expect("db pool");

    let storage = setup_storage(&config);
    storage
        .ensure_upload_dir()
        .await
        .expect("upload directory");

    let app_state = AppState {
        schools: Arc::new(MysqlSchoolStore::new(pool)),
        storage,
    };

    let app = app(app_state, config.max_upload_bytes);

    tracing::info!("listening on {}", config.bind_addr);

    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await
        .expect("start server");
}
