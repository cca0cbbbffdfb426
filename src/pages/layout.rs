use axum::response::Html;

use super::escape;

pub const PORTAL_TITLE: &str = "School Management Portal";

const DESCRIPTION: &str = "Register schools and browse every registered school.";

const STYLES: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: #f3f4f6; color: #1f2937; }
a { color: #2563eb; }
.topbar { display: flex; gap: 1.5rem; align-items: center; padding: 1rem 2rem; background: #111827; }
.topbar a { color: #e5e7eb; text-decoration: none; font-weight: 600; }
.topbar .brand { color: #fff; margin-right: auto; }
main { max-width: 80rem; margin: 0 auto; padding: 2.5rem 1.5rem; }
h1, h2 { text-align: center; }
.panel { background: #fff; border-radius: 0.75rem; box-shadow: 0 10px 25px rgba(0, 0, 0, 0.12); padding: 2.5rem; max-width: 64rem; margin: 0 auto; }
.fields { display: grid; grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr)); gap: 1.5rem; }
.field label { display: block; font-size: 0.875rem; font-weight: 600; margin-bottom: 0.25rem; }
.field input, .field textarea { width: 100%; padding: 0.75rem; border: 1px solid #d1d5db; border-radius: 0.5rem; font: inherit; }
.field-error { color: #ef4444; font-size: 0.875rem; margin: 0.25rem 0 0; }
.actions { text-align: center; padding-top: 1.5rem; }
.actions button { padding: 0.75rem 2.5rem; border: 0; border-radius: 9999px; background: #2563eb; color: #fff; font-size: 1.125rem; font-weight: 700; cursor: pointer; }
.banner { padding: 1rem; margin-bottom: 1.5rem; border-radius: 0.5rem; font-weight: 500; text-align: center; }
.banner-success { background: #dcfce7; color: #15803d; }
.banner-error { background: #fee2e2; color: #b91c1c; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 2rem; }
.card { background: #fff; border-radius: 0.75rem; overflow: hidden; box-shadow: 0 10px 25px rgba(0, 0, 0, 0.12); }
.card img { display: block; width: 100%; height: 12rem; object-fit: cover; background: #e5e7eb; }
.card-body { padding: 1.5rem; }
.card-body h2 { text-align: left; margin: 0 0 0.75rem; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.card-body p { margin: 0.5rem 0; color: #4b5563; }
.empty { text-align: center; font-size: 1.5rem; color: #6b7280; padding: 4rem; border: 4px dashed #d1d5db; border-radius: 0.75rem; background: #fff; }
.failure { text-align: center; padding: 2rem; color: #b91c1c; background: #fee2e2; border: 1px solid #f87171; border-radius: 0.5rem; }
.entry { display: grid; grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr)); gap: 2rem; max-width: 56rem; margin: 0 auto; }
.entry a { display: block; padding: 2rem; border-radius: 1rem; background: #1f2937; color: #fff; text-decoration: none; text-align: center; }
.entry a p { color: #9ca3af; }
"#;

/// Wraps page content in the shared document shell.
pub fn layout(page_title: &str, content: &str) -> Html<String> {
    let title = if page_title.is_empty() {
        PORTAL_TITLE.to_string()
    } else {
        format!("{} | {}", escape(page_title), PORTAL_TITLE)
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{DESCRIPTION}">
<title>{title}</title>
<style>{STYLES}</style>
</head>
<body class="antialiased">
<nav class="topbar">
<a class="brand" href="/">{PORTAL_TITLE}</a>
<a href="/addSchool">Add School</a>
<a href="/showSchools">Schools</a>
</nav>
<main>
{content}
</main>
</body>
</html>
"#
    ))
}
