use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrganizationRequest {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: Option<String>,
}

impl CreateOrganizationRequest {
    /// Trims the name, then validates it.
    pub fn normalized(mut self) -> Result<Self, validator::ValidationErrors> {
        self.name = self.name.trim().to_string();
        self.validate()?;
        Ok(self)
    }
}

impl UpdateOrganizationRequest {
    pub fn normalized(mut self) -> Result<Self, validator::ValidationErrors> {
        self.name = self.name.map(|n| n.trim().to_string());
        self.validate()?;
        Ok(self)
    }
}

/// Query params for `GET /api/organizations`.
#[derive(Debug, Default, Deserialize)]
pub struct OrganizationListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Case-insensitive name substring.
    pub q: Option<String>,
}

impl OrganizationListParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(100).clamp(1, 500)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// `ILIKE` pattern for `q`, with `%`, `_` and `\` escaped. `None` when
    /// the filter is absent or blank.
    pub fn name_pattern(&self) -> Option<String> {
        let q = self.q.as_deref()?.trim();
        if q.is_empty() {
            return None;
        }
        let mut pattern = String::with_capacity(q.len() + 2);
        pattern.push('%');
        for c in q.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Some(pattern)
    }
}
