use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::{
    storage::{interface::Storage, ImageUpload},
    AppState,
};

use super::{
    models::{MessageResponse, SchoolCard, SchoolForm},
    store::SchoolStore,
    CreateSchoolError, SchoolsError,
};

pub const SCHOOL_SAVED: &str = "School data and image saved successfully!";

pub fn schools_router(body_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/api/schools", post(create_school).get(get_schools))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::from_fn_with_state(body_limit, payload_too_large))
}

/// Turns the limit layer's bare 413 into the create error payload.
async fn payload_too_large<B>(
    State(limit): State<usize>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let response = next.run(request).await;

    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }

    SchoolsError::from(CreateSchoolError::TooLarge { limit }).into_response()
}

/// Create a school
#[utoipa::path(
    post,
    path = "/api/schools",
    request_body(content = super::models::CreateSchool, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "School saved", body = MessageResponse),
        (status = 500, description = "Image or row could not be saved", body = crate::ErrorResponse),
    ),
    tag = "Schools API"
)]
#[axum::debug_handler(state = AppState)]
pub async fn create_school(
    State(schools): State<Arc<dyn SchoolStore>>,
    State(storage): State<Storage>,
    fields: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), SchoolsError> {
    let form = read_school_form(fields).await?;

    save_school(schools.as_ref(), &storage, &form).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: String::from(SCHOOL_SAVED),
        }),
    ))
}

/// List every school, newest first
#[utoipa::path(
    get,
    path = "/api/schools",
    responses(
        (status = 200, description = "All registered schools", body = [SchoolCard]),
        (status = 500, description = "Schools could not be loaded", body = crate::ErrorResponse),
    ),
    tag = "Schools API"
)]
#[axum::debug_handler(state = AppState)]
pub async fn get_schools(
    State(schools): State<Arc<dyn SchoolStore>>,
) -> Result<Json<Vec<SchoolCard>>, SchoolsError> {
    let schools = fetch_schools(schools.as_ref()).await?;

    Ok(Json(schools))
}

/// Decodes the multipart body. Text fields are taken verbatim, a file part
/// without a file name counts as no image.
pub async fn read_school_form(
    fields: Result<Multipart, MultipartRejection>,
) -> Result<SchoolForm, CreateSchoolError> {
    let mut fields = fields?;
    let mut form = SchoolForm::default();

    while let Some(field) = fields.next_field().await? {
        let Some(field_name) = field.name().map(str::to_owned) else {
            continue;
        };

        let target = match field_name.as_str() {
            "name" => &mut form.name,
            "address" => &mut form.address,
            "city" => &mut form.city,
            "state" => &mut form.state,
            "contact" => &mut form.contact,
            "email_id" => &mut form.email_id,
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await?;

                if file_name.is_empty() {
                    tracing::debug!("image field without a file");
                    continue;
                }

                tracing::debug!("adding image {file_name} ({} bytes)", bytes.len());
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes,
                });
                continue;
            }
            _ => {
                tracing::debug!("ignoring unknown field {field_name}");
                continue;
            }
        };

        tracing::debug!("adding {field_name}");
        *target = field.text().await?;
    }

    Ok(form)
}

/// Writes the image (if any), then inserts the row. The image is removed
/// again when the insert fails.
pub async fn save_school(
    schools: &dyn SchoolStore,
    storage: &Storage,
    form: &SchoolForm,
) -> Result<(), CreateSchoolError> {
    let stored = match &form.image {
        Some(upload) => Some(storage.put(upload).await?),
        None => None,
    };

    let new_school = form.to_new_school(stored.as_ref().map(|image| image.public_path.clone()));

    if let Err(err) = schools.insert(new_school).await {
        if let Some(image) = stored {
            tracing::debug!("insert failed, removing {}", image.file_path.display());

            if let Err(cleanup) = storage.delete(&image).await {
                tracing::warn!("orphaned image left behind: {cleanup}");
            }
        }

        return Err(err.into());
    }

    tracing::info!("saved school {:?}", form.name);

    Ok(())
}

pub async fn fetch_schools(schools: &dyn SchoolStore) -> Result<Vec<SchoolCard>, SchoolsError> {
    schools.list().await.map_err(SchoolsError::List)
}
