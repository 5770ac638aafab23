use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::db::salaries::{self, SalaryFilter};
use crate::db::employees;
use crate::errors::AppError;
use crate::models::salary::{SalaryFields, SalaryStatus, SalaryWithEmployee};
use crate::utils::validation::validate_payload;

#[derive(Deserialize)]
pub struct SalaryQueryParams {
    month: Option<String>,
    quarter: Option<String>,
    year: Option<String>,
    status: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_period(name: &str, value: &Option<String>) -> Result<Option<i32>, AppError> {
    match present(value) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {} format", name))),
        None => Ok(None),
    }
}

impl SalaryQueryParams {
    /// Listing filter: unparseable numbers are dropped, status is matched verbatim.
    fn lenient_filter(&self) -> SalaryFilter {
        SalaryFilter {
            month: present(&self.month).and_then(|v| v.parse().ok()),
            quarter: present(&self.quarter).and_then(|v| v.parse().ok()),
            year: present(&self.year).and_then(|v| v.parse().ok()),
            status: present(&self.status).map(str::to_string),
        }
    }

    /// Statistics filter: every present value must parse, status must be canonical.
    fn strict_filter(&self) -> Result<SalaryFilter, AppError> {
        let status = match present(&self.status) {
            Some(raw) => Some(
                raw.parse::<SalaryStatus>()
                    .map_err(|_| {
                        AppError::BadRequest("Invalid status. Must be 'unpaid' or 'paid'".to_string())
                    })?
                    .as_str()
                    .to_string(),
            ),
            None => None,
        };

        Ok(SalaryFilter {
            month: parse_period("month", &self.month)?,
            quarter: parse_period("quarter", &self.quarter)?,
            year: parse_period("year", &self.year)?,
            status,
        })
    }
}

/// Body of create and full-record update. `status` is ignored on create.
#[derive(Deserialize, Validate)]
pub struct SalaryPayload {
    employee_id: i64,
    basic_salary: i64,
    coefficient: i64,
    bonus: i64,
    fine: i64,
    total_salary: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    working_days: i32,
    #[serde(default)]
    status: Option<SalaryStatus>,
}

impl SalaryPayload {
    fn to_fields(&self, employee_name: String, status: SalaryStatus) -> SalaryFields {
        SalaryFields {
            employee_id: self.employee_id,
            employee_name,
            basic_salary: self.basic_salary,
            coefficient: self.coefficient,
            bonus: self.bonus,
            fine: self.fine,
            total_salary: self.total_salary,
            working_days: self.working_days,
            status,
        }
    }
}

pub async fn get_salaries(
    pool: web::Data<PgPool>,
    query: web::Query<SalaryQueryParams>,
) -> Result<HttpResponse, AppError> {
    let salaries = salaries::list(pool.get_ref(), &query.lenient_filter()).await?;
    Ok(HttpResponse::Ok().json(salaries))
}

pub async fn get_salary(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let salary = salaries::find(pool.get_ref(), id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Salary not found".to_string()))?;

    let employee = employees::find(pool.get_ref(), salary.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(SalaryWithEmployee { salary, employee }))
}

pub async fn create_salary(
    pool: web::Data<PgPool>,
    payload: web::Json<SalaryPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&payload.0)?;

    let employee = employees::find(pool.get_ref(), payload.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    // New salaries always start unpaid.
    let fields = payload.to_fields(employee.name, SalaryStatus::Unpaid);
    let salary = salaries::insert(pool.get_ref(), &fields).await?;
    log::info!("Created salary {} for employee {}", salary.id, salary.employee_id);

    Ok(HttpResponse::Created().json(salary))
}

pub async fn update_salary(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
    payload: web::Json<SalaryPayload>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();

    let current = salaries::find(pool.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Salary not found".to_string()))?;

    validate_payload(&payload.0)?;

    let status = payload.status.unwrap_or(current.status);
    if !current.status.can_transition_to(status) {
        return Err(AppError::BadRequest(
            "A paid salary cannot be marked unpaid".to_string(),
        ));
    }

    let employee_name = if payload.employee_id == current.employee_id {
        current.employee_name
    } else {
        employees::find(pool.get_ref(), payload.employee_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?
            .name
    };

    let salary = salaries::update(pool.get_ref(), id, &payload.to_fields(employee_name, status))
        .await?
        .ok_or_else(|| AppError::NotFound("Salary not found".to_string()))?;

    Ok(HttpResponse::Ok().json(salary))
}

pub async fn delete_salary(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    if salaries::delete(pool.get_ref(), id.into_inner()).await? == 0 {
        return Err(AppError::NotFound("Salary not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Salary deleted successfully",
    })))
}

/// Marks the salary paid. Paying an already paid salary changes nothing but `updated_at`.
pub async fn pay_salary(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let salary = salaries::set_status(pool.get_ref(), id.into_inner(), SalaryStatus::Paid)
        .await?
        .ok_or_else(|| AppError::NotFound("Salary not found".to_string()))?;

    log::info!("Salary {} marked paid", salary.id);
    Ok(HttpResponse::Ok().json(salary))
}

pub async fn get_salary_statistics(
    pool: web::Data<PgPool>,
    query: web::Query<SalaryQueryParams>,
) -> Result<HttpResponse, AppError> {
    let filter = query.strict_filter()?;
    let total = salaries::total(pool.get_ref(), &filter).await?;
    Ok(HttpResponse::Ok().json(json!({ "total": total })))
}
