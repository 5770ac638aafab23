use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::db::memberships::{self, Link};
use crate::db::positions;
use crate::errors::AppError;
use crate::utils::validation::validate_payload;

#[derive(Deserialize, Validate)]
pub struct PositionPayload {
    #[validate(length(min = 1, max = 100))]
    title: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    description: String,
}

pub async fn get_positions(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let positions = positions::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(positions))
}

/// Employees linked to the position through `employee_positions`.
pub async fn get_employees_by_position(
    pool: web::Data<PgPool>,
    position_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let position_id = position_id.into_inner();

    if !positions::exists(pool.get_ref(), position_id).await? {
        return Err(AppError::NotFound("Position not found".to_string()));
    }

    let employees = memberships::employees_for_target(pool.get_ref(), Link::Position, position_id).await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn create_position(
    pool: web::Data<PgPool>,
    payload: web::Json<PositionPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&payload.0)?;

    if positions::title_taken(pool.get_ref(), &payload.title, None).await? {
        return Err(AppError::Conflict("Position already exists".to_string()));
    }

    let position = positions::insert(pool.get_ref(), &payload.title, &payload.description).await?;
    log::info!("Created position {} ({})", position.id, position.title);

    Ok(HttpResponse::Created().json(position))
}

pub async fn update_position(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
    payload: web::Json<PositionPayload>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();

    if !positions::exists(pool.get_ref(), id).await? {
        return Err(AppError::NotFound("Position not found".to_string()));
    }

    validate_payload(&payload.0)?;

    if positions::title_taken(pool.get_ref(), &payload.title, Some(id)).await? {
        return Err(AppError::Conflict("Position already exists".to_string()));
    }

    let position = positions::update(pool.get_ref(), id, &payload.title, &payload.description)
        .await?
        .ok_or_else(|| AppError::NotFound("Position not found".to_string()))?;

    Ok(HttpResponse::Ok().json(position))
}

pub async fn delete_position(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();

    // The row lock keeps employees from being linked between the count and the delete.
    let mut tx = pool.begin().await?;
    if !positions::lock(&mut *tx, id).await? {
        return Err(AppError::NotFound("Position not found".to_string()));
    }

    let holders = memberships::count_for_target(&mut *tx, Link::Position, id).await?;
    if holders > 0 {
        log::warn!("Refused to delete position {} held by {} employee(s)", id, holders);
        return Err(AppError::BadRequest(
            "Cannot delete position because it has employees".to_string(),
        ));
    }

    positions::delete(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Position deleted successfully",
    })))
}
