use axum::{extract::Query, response::Html};

use crate::{error::Result, ui::Skeleton};

/// Query names forwarded onto the element as attributes.
fn is_passthrough(name: &str) -> bool {
    matches!(name, "id" | "role" | "style" | "title")
        || name.starts_with("data-")
        || name.starts_with("aria-")
}

/// `GET /fragments/skeleton?class=h-4+w-32&data-row=3`
pub async fn skeleton(Query(params): Query<Vec<(String, String)>>) -> Result<Html<String>> {
    let mut sk = Skeleton::new();
    let mut has_class = false;
    for (name, value) in params {
        if name == "class" {
            // Later `class` params merge into the list rather than replace it.
            sk = if has_class { sk.attr(name, value) } else { sk.class_name(value) };
            has_class = true;
        } else if is_passthrough(&name) {
            sk = sk.attr(name, value);
        }
    }
    Ok(Html(sk.render()?))
}
