use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::db::{employees, work_assignments};
use crate::errors::AppError;
use crate::models::work_assignment::{
    AssignmentStatus, WorkAssignmentFields, WorkAssignmentWithEmployee,
};
use crate::utils::date::{option_ymd, ymd};
use crate::utils::validation::{dedup_ids, validate_payload};

#[derive(Deserialize, Validate)]
pub struct WorkAssignmentPayload {
    employee_id: i64,
    #[validate(length(min = 1, max = 1000))]
    assignment: String,
    #[serde(with = "ymd")]
    start_date: NaiveDate,
    #[serde(default, with = "option_ymd")]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    status: Option<AssignmentStatus>,
}

impl WorkAssignmentPayload {
    fn check_dates(&self) -> Result<(), AppError> {
        match self.end_date {
            Some(end) if end < self.start_date => Err(AppError::BadRequest(
                "end_date must not be before start_date".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn to_fields(&self, employee_name: String, status: AssignmentStatus) -> WorkAssignmentFields {
        WorkAssignmentFields {
            employee_id: self.employee_id,
            employee_name,
            assignment: self.assignment.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            status,
        }
    }
}

pub async fn get_work_assignments(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let assignments = work_assignments::list(pool.get_ref()).await?;

    let employee_ids: Vec<i64> = assignments.iter().map(|a| a.employee_id).collect();
    let employees_by_id: HashMap<i64, _> = employees::list_by_ids(pool.get_ref(), &dedup_ids(&employee_ids))
        .await?
        .into_iter()
        .map(|employee| (employee.id, employee))
        .collect();

    let assignments: Vec<WorkAssignmentWithEmployee> = assignments
        .into_iter()
        .map(|work_assignment| WorkAssignmentWithEmployee {
            employee: employees_by_id.get(&work_assignment.employee_id).cloned(),
            work_assignment,
        })
        .collect();

    Ok(HttpResponse::Ok().json(assignments))
}

pub async fn create_work_assignment(
    pool: web::Data<PgPool>,
    payload: web::Json<WorkAssignmentPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&payload.0)?;
    payload.check_dates()?;

    let employee = employees::find(pool.get_ref(), payload.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    let fields = payload.to_fields(employee.name, payload.status.unwrap_or_default());
    let work_assignment = work_assignments::insert(pool.get_ref(), &fields).await?;
    log::info!(
        "Created work assignment {} for employee {}",
        work_assignment.id,
        work_assignment.employee_id
    );

    Ok(HttpResponse::Created().json(json!({
        "message": "Work assignment created successfully",
        "data": work_assignment,
    })))
}

pub async fn update_work_assignment(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
    payload: web::Json<WorkAssignmentPayload>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();

    let current = work_assignments::find(pool.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Work assignment not found".to_string()))?;

    validate_payload(&payload.0)?;
    payload.check_dates()?;

    let employee_name = if payload.employee_id == current.employee_id {
        current.employee_name
    } else {
        employees::find(pool.get_ref(), payload.employee_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?
            .name
    };
    let status = payload.status.unwrap_or(current.status);

    let work_assignment = work_assignments::update(pool.get_ref(), id, &payload.to_fields(employee_name, status))
        .await?
        .ok_or_else(|| AppError::NotFound("Work assignment not found".to_string()))?;

    Ok(HttpResponse::Ok().json(work_assignment))
}

pub async fn delete_work_assignment(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if work_assignments::delete(pool.get_ref(), id.into_inner()).await? == 0 {
        return Err(AppError::NotFound("Work assignment not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Work assignment deleted successfully",
    })))
}
