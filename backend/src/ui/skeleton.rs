//! Loading placeholder block.

use std::sync::LazyLock;

use serde::Serialize;
use tera::Tera;

use crate::error::{AppError, Result};

/// Classes every skeleton carries before any caller-supplied class.
pub const BASE_CLASSES: &[&str] = &["animate-pulse", "rounded-md", "bg-muted"];

const TEMPLATE_NAME: &str = "skeleton.html";

const TEMPLATE: &str = r#"<div class="{{ class }}"{% for attr in attrs %} {{ attr.name }}="{{ attr.value }}"{% endfor %}></div>"#;

/// Compiled once. The `.html` name turns on autoescaping.
static TEMPLATES: LazyLock<tera::Result<Tera>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
    Ok(tera)
});

#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    class_name: Option<String>,
    attrs: Vec<(String, String)>,
}

#[derive(Serialize)]
struct AttrCtx<'a> {
    name: &'a str,
    value: &'a str,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Adds a pass-through attribute. A `class` attribute is folded into the
    /// class list instead of being emitted twice.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Base classes, then `class_name`, then any `class` attributes.
    /// Duplicates are dropped, first occurrence wins.
    pub fn class_list(&self) -> Vec<&str> {
        let extra = self
            .class_name
            .iter()
            .map(String::as_str)
            .chain(
                self.attrs
                    .iter()
                    .filter(|(name, _)| name.eq_ignore_ascii_case("class"))
                    .map(|(_, value)| value.as_str()),
            )
            .flat_map(str::split_ascii_whitespace);

        let mut classes: Vec<&str> = BASE_CLASSES.to_vec();
        for class in extra {
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
        classes
    }

    pub fn render(&self) -> Result<String> {
        let mut attrs = Vec::with_capacity(self.attrs.len());
        for (name, value) in &self.attrs {
            if name.eq_ignore_ascii_case("class") {
                continue;
            }
            if !is_valid_attr_name(name) {
                return Err(AppError::BadRequest(format!(
                    "Invalid attribute name: {:?}",
                    name
                )));
            }
            attrs.push(AttrCtx { name, value });
        }

        let mut ctx = tera::Context::new();
        ctx.insert("class", &self.class_list().join(" "));
        ctx.insert("attrs", &attrs);

        let tera = TEMPLATES.as_ref().map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to compile skeleton template: {}", e))
        })?;

        tera.render(TEMPLATE_NAME, &ctx)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to render skeleton: {}", e)))
    }
}

/// Conservative subset of the HTML attribute-name grammar.
fn is_valid_attr_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}
