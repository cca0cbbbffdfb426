use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use validator::{Validate, ValidationErrors};

use crate::{
    schools::{
        models::SchoolForm,
        routes::{read_school_form, save_school},
        store::SchoolStore,
        CreateSchoolError, SchoolsError,
    },
    storage::interface::Storage,
    ErrorResponse,
};

use super::{escape, layout::layout};

pub const SCHOOL_ADDED: &str = "School added successfully!";

/// First failing rule per field.
pub type FieldErrors = HashMap<&'static str, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Success,
    Failed(String),
}

impl SubmissionState {
    pub fn failed(response: &ErrorResponse) -> Self {
        let error = if response.error.is_empty() {
            "Failed to add school."
        } else {
            response.error.as_str()
        };

        SubmissionState::Failed(format!(
            "Error: {} Details: {}",
            error,
            response.details.as_deref().unwrap_or_default()
        ))
    }

    fn banner(&self) -> String {
        match self {
            SubmissionState::Idle => String::new(),
            SubmissionState::Success => {
                format!(r#"<div class="banner banner-success">{SCHOOL_ADDED}</div>"#)
            }
            SubmissionState::Failed(message) => format!(
                r#"<div class="banner banner-error">{}</div>"#,
                escape(message)
            ),
        }
    }
}

pub async fn add_school_page() -> Html<String> {
    render(
        &SchoolForm::default(),
        &FieldErrors::new(),
        &SubmissionState::Idle,
    )
}

/// Validates the submission and only creates the school when every field
/// passes. Entered values survive a failed create, a successful one resets
/// the form.
#[axum::debug_handler(state = crate::AppState)]
pub async fn submit_school(
    State(schools): State<Arc<dyn SchoolStore>>,
    State(storage): State<Storage>,
    fields: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Html<String>) {
    let form = match read_school_form(fields).await {
        Ok(form) => form,
        Err(err) => return failure(&SchoolForm::default(), err),
    };

    if let Err(errors) = form.validate() {
        let errors = first_field_errors(&errors);
        tracing::debug!("submission blocked, invalid fields: {:?}", errors.keys());

        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            render(&form, &errors, &SubmissionState::Idle),
        );
    }

    match save_school(schools.as_ref(), &storage, &form).await {
        Ok(()) => (
            StatusCode::OK,
            render(
                &SchoolForm::default(),
                &FieldErrors::new(),
                &SubmissionState::Success,
            ),
        ),
        Err(err) => failure(&form, err),
    }
}

/// Renders the limit layer's bare 413 as the form with an error banner.
pub async fn payload_too_large<B>(
    State(limit): State<usize>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    let response = next.run(request).await;

    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }

    failure(
        &SchoolForm::default(),
        CreateSchoolError::TooLarge { limit },
    )
    .into_response()
}

fn failure(form: &SchoolForm, err: CreateSchoolError) -> (StatusCode, Html<String>) {
    let err = SchoolsError::from(err);
    tracing::error!("{:#?}", err);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        render(
            form,
            &FieldErrors::new(),
            &SubmissionState::failed(&err.error_response()),
        ),
    )
}

pub fn first_field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errors)| {
            let error = errors.first()?;
            let message = match &error.message {
                Some(message) => message.to_string(),
                None => error.code.to_string(),
            };
            Some((field, message))
        })
        .collect()
}

fn render(form: &SchoolForm, errors: &FieldErrors, state: &SubmissionState) -> Html<String> {
    let input = |id: &'static str, label: &str, kind: &str, placeholder: &str, value: &str| {
        format!(
            r#"<div class="field">
<label for="{id}">{label}</label>
<input id="{id}" name="{id}" type="{kind}" placeholder="{placeholder}" value="{value}">
{error}
</div>"#,
            value = escape(value),
            error = field_error(errors, id),
        )
    };

    let content = format!(
        r#"<div class="panel">
<h2>🏫 Add New School Data</h2>
{banner}
<form method="post" action="/addSchool" enctype="multipart/form-data" novalidate>
<div class="fields">
{name}
{email_id}
{contact}
{city}
{state_field}
<div class="field">
<label for="image">School Image</label>
<input id="image" name="image" type="file" accept="image/*">
{image_error}
</div>
</div>
<div class="field" style="margin-top: 1.5rem;">
<label for="address">Full Address</label>
<textarea id="address" name="address" rows="3" placeholder="123, Main Road, Karol Bagh">{address}</textarea>
{address_error}
</div>
<div class="actions">
<button type="submit">➕ Add School Data</button>
</div>
</form>
</div>"#,
        banner = state.banner(),
        name = input(
            "name",
            "School Name",
            "text",
            "D.P.S. (Delhi Public School)",
            &form.name
        ),
        email_id = input(
            "email_id",
            "Email ID",
            "email",
            "contact@schoolname.com",
            &form.email_id
        ),
        contact = input(
            "contact",
            "Contact Number",
            "text",
            "9876543210",
            &form.contact
        ),
        city = input("city", "City", "text", "New Delhi", &form.city),
        state_field = input("state", "State", "text", "Delhi", &form.state),
        image_error = field_error(errors, "image"),
        address = escape(&form.address),
        address_error = field_error(errors, "address"),
    );

    layout("Add School", &content)
}

fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!(r#"<p class="field-error">{}</p>"#, escape(message)),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_banner_joins_error_and_details() {
        let state = SubmissionState::failed(&ErrorResponse {
            error: String::from("Failed to add school data."),
            details: Some(String::from("failed to acquire database connection")),
        });

        assert_eq!(
            state,
            SubmissionState::Failed(String::from(
                "Error: Failed to add school data. Details: failed to acquire database connection"
            ))
        );
    }

    #[test]
    fn failure_banner_falls_back_to_generic_error() {
        let state = SubmissionState::failed(&ErrorResponse::default());

        assert_eq!(
            state,
            SubmissionState::Failed(String::from("Error: Failed to add school. Details: "))
        );
    }

    #[test]
    fn keeps_only_the_first_message_per_field() {
        let errors = SchoolForm::default().validate().unwrap_err();
        let errors = first_field_errors(&errors);

        assert_eq!(errors.get("email_id").map(String::as_str), Some("Email is required"));
        assert_eq!(
            errors.get("contact").map(String::as_str),
            Some("Contact Number is required")
        );
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn rendered_form_keeps_values_and_shows_errors() {
        let form = SchoolForm {
            name: String::from("St. Mary's <School>"),
            email_id: String::from("not-an-email"),
            ..Default::default()
        };
        let mut errors = FieldErrors::new();
        errors.insert("email_id", String::from("Invalid email address format"));

        let Html(page) = render(&form, &errors, &SubmissionState::Idle);

        assert!(page.contains(r#"value="St. Mary&#39;s &lt;School&gt;""#));
        assert!(page.contains(r#"<p class="field-error">Invalid email address format</p>"#));
        assert!(!page.contains(r#"<div class="banner"#));
    }
}
