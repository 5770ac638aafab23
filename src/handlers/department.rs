use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::db::departments;
use crate::db::memberships::{self, Link};
use crate::errors::AppError;
use crate::utils::validation::validate_payload;

/// Body of create and full-record update.
#[derive(Deserialize, Validate)]
pub struct DepartmentPayload {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    description: String,
}

pub async fn get_departments(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let departments = departments::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(departments))
}

pub async fn get_employees_by_department(
    pool: web::Data<PgPool>,
    department_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let department_id = department_id.into_inner();

    if !departments::exists(pool.get_ref(), department_id).await? {
        return Err(AppError::NotFound("Department not found".to_string()));
    }

    let employees = memberships::employees_for_target(pool.get_ref(), Link::Department, department_id).await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn create_department(
    pool: web::Data<PgPool>,
    payload: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&payload.0)?;

    if departments::name_taken(pool.get_ref(), &payload.name, None).await? {
        return Err(AppError::Conflict("Department with this name already exists".to_string()));
    }

    let department = departments::insert(pool.get_ref(), &payload.name, &payload.description).await?;
    log::info!("Created department {} ({})", department.id, department.name);

    Ok(HttpResponse::Created().json(department))
}

pub async fn update_department(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
    payload: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();

    if !departments::exists(pool.get_ref(), id).await? {
        return Err(AppError::NotFound("Department not found".to_string()));
    }

    validate_payload(&payload.0)?;

    if departments::name_taken(pool.get_ref(), &payload.name, Some(id)).await? {
        return Err(AppError::Conflict("Department with this name already exists".to_string()));
    }

    let department = departments::update(pool.get_ref(), id, &payload.name, &payload.description)
        .await?
        .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

    Ok(HttpResponse::Ok().json(department))
}

pub async fn delete_department(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();

    // The row lock keeps employees from being linked between the count and the delete.
    let mut tx = pool.begin().await?;
    if !departments::lock(&mut *tx, id).await? {
        return Err(AppError::NotFound("Department not found".to_string()));
    }

    let members = memberships::count_for_target(&mut *tx, Link::Department, id).await?;
    if members > 0 {
        log::warn!("Refused to delete department {} with {} employee(s)", id, members);
        return Err(AppError::BadRequest(
            "Cannot delete department because it has employees".to_string(),
        ));
    }

    departments::delete(&mut *tx, id).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Department deleted successfully",
    })))
}
