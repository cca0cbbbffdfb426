use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html};

use crate::schools::{models::SchoolCard, routes::fetch_schools, store::SchoolStore};

use super::{escape, layout::layout};

pub const PLACEHOLDER_IMAGE: &str = "/default-school-placeholder.svg";
pub const LOAD_FAILED: &str = "Failed to load schools data. Check if XAMPP/MySQL is running.";
pub const LOAD_FAILED_HINT: &str =
    "Please ensure the MySQL server is active and the 'schools' table is correct.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Failed,
    Loaded(Vec<SchoolCard>),
}

impl Listing {
    pub fn status(&self) -> StatusCode {
        match self {
            Listing::Failed => StatusCode::INTERNAL_SERVER_ERROR,
            Listing::Loaded(_) => StatusCode::OK,
        }
    }

    pub fn render(&self) -> Html<String> {
        let content = match self {
            Listing::Failed => format!(
                r#"<div class="failure">❌ Error: {LOAD_FAILED}
<p>{}</p>
</div>"#,
                escape(LOAD_FAILED_HINT)
            ),
            Listing::Loaded(schools) if schools.is_empty() => String::from(
                r#"<h1>All Registered Schools 🎓</h1>
<div class="empty">😔 No schools found. Please <a href="/addSchool">add one</a> first!</div>"#,
            ),
            Listing::Loaded(schools) => {
                let cards: String = schools.iter().map(card).collect();
                format!(
                    r#"<h1>All Registered Schools 🎓</h1>
<div class="cards">
{cards}</div>"#
                )
            }
        };

        layout("Schools", &content)
    }
}

pub async fn show_schools_page(
    State(schools): State<Arc<dyn SchoolStore>>,
) -> (StatusCode, Html<String>) {
    let listing = match fetch_schools(schools.as_ref()).await {
        Ok(schools) => Listing::Loaded(schools),
        Err(err) => {
            tracing::error!("{:#?}", err);
            Listing::Failed
        }
    };

    (listing.status(), listing.render())
}

fn card(school: &SchoolCard) -> String {
    let name = escape(&school.name);
    let image = escape(school.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE));

    format!(
        r#"<div class="card" id="school-{id}">
<img src="{image}" alt="{name}" loading="lazy">
<div class="card-body">
<h2 title="{name}">{name}</h2>
<p><strong>📍 Address:</strong> {address}</p>
<p><strong>🏙️ City:</strong> {city}</p>
</div>
</div>
"#,
        id = school.id,
        address = escape(&school.address),
        city = escape(&school.city),
    )
}
