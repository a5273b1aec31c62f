use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::organization::{
        CreateOrganizationRequest, Organization, OrganizationListParams,
        UpdateOrganizationRequest,
    },
};

pub async fn list(
    State(pool): State<PgPool>,
    Query(params): Query<OrganizationListParams>,
) -> Result<Json<Vec<Organization>>> {
    let orgs = sqlx::query_as::<_, Organization>(
        r#"
        SELECT id, name, created_at, updated_at
        FROM organizations
        WHERE ($1::TEXT IS NULL OR name ILIKE $1)
        ORDER BY name
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(params.name_pattern())
    .bind(params.limit())
    .bind(params.offset())
    .fetch_all(&pool)
    .await?;

    Ok(Json(orgs))
}

pub async fn create(
    State(pool): State<PgPool>,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<Organization>)> {
    let req = req.normalized()?;

    let org = sqlx::query_as::<_, Organization>(
        r#"
        INSERT INTO organizations (id, name)
        VALUES ($1, $2)
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.name)
    .fetch_one(&pool)
    .await?;

    tracing::info!(org_id = %org.id, name = %org.name, "Organization created");

    Ok((StatusCode::CREATED, Json(org)))
}

pub async fn get(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<Json<Organization>> {
    let org = sqlx::query_as::<_, Organization>(
        "SELECT id, name, created_at, updated_at
         FROM organizations WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Organization {} not found", id)))?;

    Ok(Json(org))
}

pub async fn update(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrganizationRequest>,
) -> Result<Json<Organization>> {
    let req = req.normalized()?;

    // updated_at is bumped by the organizations_set_updated_at trigger
    let org = sqlx::query_as::<_, Organization>(
        r#"
        UPDATE organizations
        SET name = COALESCE($2, name)
        WHERE id = $1
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(req.name)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Organization {} not found", id)))?;

    tracing::info!(org_id = %org.id, name = %org.name, "Organization updated");

    Ok(Json(org))
}

pub async fn delete(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Organization {} not found", id)));
    }

    tracing::info!(org_id = %id, "Organization deleted");

    Ok(StatusCode::NO_CONTENT)
}
