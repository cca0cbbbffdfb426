use std::sync::Arc;

use axum::{
    extract::FromRef,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};

use schools::store::SchoolStore;
use storage::interface::Storage;

pub mod config;
pub mod db;
pub mod pages;
pub mod schema;
pub mod schools;
pub mod storage;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub schools: Arc<dyn SchoolStore>,
    pub storage: Storage,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        schools::routes::create_school,
        schools::routes::get_schools,
    ),
    components(
        schemas(schools::models::CreateSchool),
        schemas(schools::models::SchoolCard),
        schemas(schools::models::MessageResponse),
        schemas(ErrorResponse),
    ),
    tags(
        (name = "Schools API"),
    )
)]
pub struct ApiDoc;

#[derive(Serialize, Deserialize, ToSchema, Debug, Default, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

/// Every route of the portal. Paths no route claims are served from the
/// public directory, which is where uploaded images land.
pub fn app(state: AppState, body_limit: usize) -> Router {
    let public_dir = state.storage.public_dir().to_path_buf();

    Router::new()
        .merge(pages::pages_router(body_limit))
        .merge(schools::routes::schools_router(body_limit))
        .route("/api-docs/openapi.json", get(openapi))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
