use axum::response::Html;

use super::layout::{layout, PORTAL_TITLE};

pub async fn home() -> Html<String> {
    layout(
        "",
        &format!(
            r#"<h1>{PORTAL_TITLE}</h1>
<p style="text-align: center; color: #6b7280;">Entry point for administration</p>
<div class="entry">
<a href="/addSchool">
<h2>Add New School</h2>
<p>Register a new school and upload its image.</p>
</a>
<a href="/showSchools">
<h2>View School List</h2>
<p>Browse every registered school as a card grid.</p>
</a>
</div>"#
        ),
    )
}
